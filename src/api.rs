//! Endpoint facade.
//!
//! [`Client`] composes the session, the scope guard, pagination normalization, and the
//! intercepted transport. Every operation validates its arguments, runs the guard for restricted
//! endpoints, issues exactly one request, and decodes the typed result.

pub mod endpoint;

mod calendar;
mod comments;
mod ext_info;
mod favorites;
mod nfo;
mod p2p;
mod release;
mod search;
mod user;

pub use comments::*;
pub use ext_info::*;
pub use p2p::*;
pub use release::*;
pub use search::*;

// crates.io
use oauth2::HttpResponse;
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	api::endpoint::EndpointRequest,
	error::TransportError,
	http::{ApiHttpClient, InterceptedHandle},
	oauth::TransportErrorMapper,
	obs,
	rate_limit::{RateLimitSnapshot, RateLimitTracker},
	service::ServiceDescriptor,
	session::Session,
};
#[cfg(feature = "reqwest")]
use crate::{config::ClientConfig, http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestApiClient = Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Typed client for every service endpoint.
///
/// Cloning is cheap; clones share the transport, the session, and the rate-limit snapshot.
pub struct Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	descriptor: Arc<ServiceDescriptor>,
	session: Arc<Session>,
	http_client: Arc<C>,
	transport_mapper: Arc<M>,
	rate_limit: RateLimitTracker,
}
impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		descriptor: ServiceDescriptor,
		session: Session,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			descriptor: Arc::new(descriptor),
			session: Arc::new(session),
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			rate_limit: RateLimitTracker::default(),
		}
	}

	/// Session the client was built with.
	pub fn session(&self) -> &Session {
		&self.session
	}

	/// Endpoint set the client talks to.
	pub fn descriptor(&self) -> &ServiceDescriptor {
		&self.descriptor
	}

	/// Copy of the rate-limit state reported by the most recently completed response.
	pub fn rate_limit(&self) -> RateLimitSnapshot {
		self.rate_limit.snapshot()
	}

	/// Builds the consent URL for the authorization code grant; no network call is made.
	pub fn authorization_url(&self) -> Result<Url> {
		self.session.authorization_url(&self.descriptor)
	}

	pub(crate) fn intercepted(&self, operation: &'static str) -> InterceptedHandle<'_, C, M> {
		InterceptedHandle::new(
			self.http_client.as_ref(),
			self.transport_mapper.as_ref(),
			&self.rate_limit,
			operation,
		)
	}

	/// Guards, builds, and sends one request through the interceptor.
	async fn send(&self, request: EndpointRequest<'_>) -> Result<HttpResponse> {
		let authorization = request.access.authorize(&self.session)?;
		let http_request = request.build(&self.descriptor, authorization.as_deref())?;

		self.intercepted(request.endpoint.operation).send(http_request).await
	}

	/// Sends `request` and decodes the JSON payload.
	pub(crate) async fn fetch<T>(&self, request: EndpointRequest<'_>) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let operation = request.endpoint.operation;
		let response = self.send(request).await?;

		decode(operation, &response)
	}

	/// Sends `request` and returns the raw body.
	pub(crate) async fn fetch_bytes(&self, request: EndpointRequest<'_>) -> Result<Vec<u8>> {
		let operation = request.endpoint.operation;
		let body = self.send(request).await?.into_body();

		if body.is_empty() {
			return Err(Error::EmptyResult { operation });
		}

		Ok(body)
	}

	/// Runs `build` to validate arguments, then fetches the decoded payload, all under one span.
	pub(crate) async fn call<'a, T, F>(&'a self, operation: &'static str, build: F) -> Result<T>
	where
		T: DeserializeOwned,
		F: FnOnce() -> Result<EndpointRequest<'a>>,
	{
		obs::observe(operation, async move { self.fetch(build()?).await }).await
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client for the public service with default settings.
	pub fn new(session: Session) -> Result<Self> {
		Self::from_config(&ClientConfig::default(), session)
	}

	/// Creates a client from a [`ClientConfig`].
	pub fn from_config(config: &ClientConfig, session: Session) -> Result<Self> {
		Ok(Self::with_http_client(
			config.descriptor()?,
			session,
			config.http_client()?,
			ReqwestTransportErrorMapper,
		))
	}
}
impl<C, M> Clone for Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			descriptor: Arc::clone(&self.descriptor),
			session: Arc::clone(&self.session),
			http_client: Arc::clone(&self.http_client),
			transport_mapper: Arc::clone(&self.transport_mapper),
			rate_limit: self.rate_limit.clone(),
		}
	}
}
impl<C, M> Debug for Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("descriptor", &self.descriptor)
			.field("session", &self.session)
			.field("rate_limit", &self.rate_limit.snapshot())
			.finish()
	}
}

/// Decodes a JSON payload; empty and `null` bodies are empty results.
fn decode<T>(operation: &'static str, response: &HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let body = response.body();

	if is_empty_payload(body) {
		return Err(Error::EmptyResult { operation });
	}

	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
		TransportError::Decode { source, status: Some(response.status().as_u16()) }.into()
	})
}

fn is_empty_payload(body: &[u8]) -> bool {
	let trimmed = body.trim_ascii();

	trimmed.is_empty() || trimmed == b"null"
}

/// Rejects empty identifiers before any network access.
pub(crate) fn require_non_empty<'v>(name: &str, value: &'v str) -> Result<&'v str> {
	if value.trim().is_empty() {
		return Err(Error::invalid_argument(format!("{name} must not be empty")));
	}

	Ok(value)
}

/// Rejects ratings outside `1..=10`.
pub(crate) fn require_rating(name: &str, rating: u8) -> Result<u8> {
	if !(1..=10).contains(&rating) {
		return Err(Error::invalid_argument(format!("{name} must be between 1 and 10, got {rating}")));
	}

	Ok(rating)
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::StatusCode;
	// self
	use super::*;
	use crate::model::Filter;

	fn response(status: u16, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() =
			StatusCode::from_u16(status).expect("Status fixture should be a valid code.");

		response
	}

	#[test]
	fn empty_and_null_bodies_are_empty_results() {
		for body in ["", "  ", "null", " null\n"] {
			let err = decode::<Filter>("release_info", &response(200, body))
				.expect_err("Empty payloads must fail.");

			assert!(matches!(err, Error::EmptyResult { operation: "release_info" }));
		}

		let filters = decode::<Vec<Filter>>("release_filters", &response(200, "[]"))
			.expect("Empty arrays are values.");

		assert!(filters.is_empty());
	}

	#[test]
	fn decode_failures_carry_the_json_path() {
		let err = decode::<Vec<Filter>>("release_filters", &response(200, r#"[{"id":"x"}]"#))
			.expect_err("Mistyped payloads must fail.");

		match err {
			Error::Transport(TransportError::Decode { source, status }) => {
				assert_eq!(source.path().to_string(), "[0].id");
				assert_eq!(status, Some(200));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn argument_checks() {
		assert!(require_non_empty("id", " ").is_err());
		assert_eq!(require_non_empty("id", "abc").ok(), Some("abc"));
		assert!(require_rating("rating", 0).is_err());
		assert!(require_rating("rating", 11).is_err());
		assert_eq!(require_rating("rating", 10).ok(), Some(10));
	}
}
