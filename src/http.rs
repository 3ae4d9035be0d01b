//! Transport primitives shared by the token exchanges and the endpoint facade.
//!
//! The module exposes [`ApiHttpClient`] alongside [`ResponseMetadata`] and
//! [`ResponseMetadataSlot`] so downstream crates can plug in custom HTTP stacks without losing
//! the interceptor. Every exchange, token grants included, runs through an [`InterceptedHandle`]
//! that maps transport failures, feeds the rate-limit tracker, and probes the buffered body for
//! an API error payload before anything reaches the caller.

// std
use std::ops::Deref;
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	interceptor,
	oauth::TransportErrorMapper,
	rate_limit::RateLimitTracker,
};

/// Abstraction over HTTP transports able to execute one buffered request at a time.
///
/// The trait is the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so a single instance can back every clone of an
/// [`api::Client`](crate::api::Client), and the handles they return must own whatever state is
/// required so their request futures stay `Send` for the whole exchange.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle tied to a [`ResponseMetadataSlot`].
	///
	/// The handle must return the whole body in [`HttpResponse`]; the interceptor reads it once
	/// and hands the same buffer on.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds an [`AsyncHttpClient`] handle that records outcomes in `slot`.
	///
	/// # Metadata Contract
	///
	/// - Call [`ResponseMetadataSlot::take`] before submitting the HTTP request.
	/// - Once a response status is known, save it with [`ResponseMetadataSlot::store`], even when
	///   reading the body fails afterwards.
	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle;
}

/// Captures metadata from the most recent HTTP response for error mapping.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadata {
	/// HTTP status code, if a response was received.
	pub status: Option<u16>,
}

/// Thread-safe slot for sharing [`ResponseMetadata`] between transport and error layers.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadataSlot(Arc<Mutex<Option<ResponseMetadata>>>);
impl ResponseMetadataSlot {
	/// Stores new metadata for the current request.
	pub fn store(&self, meta: ResponseMetadata) {
		*self.0.lock() = Some(meta);
	}

	/// Returns the captured metadata, if any, consuming it from the slot.
	pub fn take(&self) -> Option<ResponseMetadata> {
		self.0.lock().take()
	}

	/// Returns the recorded status without consuming the metadata.
	pub fn status(&self) -> Option<u16> {
		self.0.lock().as_ref().and_then(|meta| meta.status)
	}
}

/// Handle that routes one exchange through the transport and the response interceptor.
///
/// Failures are carried inside [`HttpClientError::Reqwest`] as a boxed [`Error`] so the `oauth2`
/// token client can drive the same pipeline as the endpoint facade; callers unwrap them with
/// [`into_client_error`].
pub(crate) struct InterceptedHandle<'a, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	inner: C::Handle,
	mapper: &'a M,
	rate_limit: &'a RateLimitTracker,
	slot: ResponseMetadataSlot,
	operation: &'static str,
}
impl<'a, C, M> InterceptedHandle<'a, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	pub(crate) fn new(
		http_client: &C,
		mapper: &'a M,
		rate_limit: &'a RateLimitTracker,
		operation: &'static str,
	) -> Self {
		let slot = ResponseMetadataSlot::default();

		Self { inner: http_client.with_metadata(slot.clone()), mapper, rate_limit, slot, operation }
	}

	/// Status recorded by the transport for the last exchange.
	pub(crate) fn status(&self) -> Option<u16> {
		self.slot.status()
	}

	/// Sends one request and returns the intercepted response.
	pub(crate) async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
		self.call(request).await.map_err(into_client_error)
	}
}
impl<'c, 'a, C, M> AsyncHttpClient<'c> for InterceptedHandle<'a, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	type Error = HttpClientError<Error>;
	type Future = Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		Box::pin(async move {
			let response = match self.inner.call(request).await {
				Ok(response) => response,
				Err(e) => {
					let meta = self.slot.take();
					let err = self.mapper.map_transport_error(self.operation, meta.as_ref(), e);

					return Err(HttpClientError::Reqwest(Box::new(err)));
				},
			};

			self.slot.store(ResponseMetadata { status: Some(response.status().as_u16()) });

			interceptor::inspect(response, self.rate_limit)
				.map_err(|e| HttpClientError::Reqwest(Box::new(e)))
		})
	}
}

/// Recovers the client error carried through an [`InterceptedHandle`].
pub(crate) fn into_client_error(err: HttpClientError<Error>) -> Error {
	match err {
		HttpClientError::Reqwest(inner) => *inner,
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) =>
			TransportError::network(std::io::Error::other(format!("HTTP client error: {message}.")))
				.into(),
		_ => TransportError::network(std::io::Error::other("Unknown HTTP client error.")).into(),
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The service answers directly, so a custom [`ReqwestClient`] should not follow redirects;
/// [`ClientConfig`](crate::config::ClientConfig) builds one that way.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type Handle = BufferedHandle;
	type TransportError = ReqwestError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		BufferedHandle::new(self.0.clone(), slot)
	}
}

#[cfg(feature = "reqwest")]
struct BufferedHttpClient {
	client: ReqwestClient,
	slot: ResponseMetadataSlot,
}

/// Handle returned by [`ReqwestHttpClient`]; buffers every body into memory.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct BufferedHandle(Arc<BufferedHttpClient>);
#[cfg(feature = "reqwest")]
impl BufferedHandle {
	fn new(client: ReqwestClient, slot: ResponseMetadataSlot) -> Self {
		Self(Arc::new(BufferedHttpClient { client, slot }))
	}
}
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for BufferedHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = Arc::clone(&self.0);

		Box::pin(async move {
			client.slot.take();

			let response = client
				.client
				.execute(request.try_into().map_err(Box::new)?)
				.await
				.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();

			client.slot.store(ResponseMetadata { status: Some(status.as_u16()) });

			let mut buffered = HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*buffered.status_mut() = status;
			*buffered.headers_mut() = headers;

			Ok(buffered)
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn slot_take_consumes_metadata() {
		let slot = ResponseMetadataSlot::default();

		slot.store(ResponseMetadata { status: Some(204) });

		assert_eq!(slot.status(), Some(204));
		assert_eq!(slot.take().and_then(|meta| meta.status), Some(204));
		assert!(slot.take().is_none());
		assert_eq!(slot.status(), None);
	}

	#[test]
	fn carried_errors_are_unwrapped_verbatim() {
		let err = into_client_error(HttpClientError::Reqwest(Box::new(Error::EmptyResult {
			operation: "release_info",
		})));

		assert!(matches!(err, Error::EmptyResult { operation: "release_info" }));

		let err = into_client_error(HttpClientError::Other("boom".into()));

		assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	}
}
