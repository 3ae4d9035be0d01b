//! OAuth 2.0 token client built on the `oauth2` crate.
//!
//! The token endpoint is driven through the same [`InterceptedHandle`] as every other call, so
//! grant exchanges update the rate-limit snapshot and surface API error payloads the same way.

pub use oauth2;

// std
use std::borrow::Cow;
// crates.io
use oauth2::{
	AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
	HttpClientError, RedirectUrl, RefreshToken, RequestTokenError, Scope, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError, BasicTokenResponse},
};
// self
use crate::{
	_prelude::*,
	auth::{GrantType, ScopeSet, Token, TokenBuilderError, TokenSecret},
	error::{ConfigError, TransportError},
	http::{ApiHttpClient, InterceptedHandle, ResponseMetadata, into_client_error},
	interceptor::ApiError,
	service::ServiceDescriptor,
};

type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Maps HTTP transport failures into client [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a client error.
	fn map_transport_error(
		&self,
		operation: &'static str,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		operation: &'static str,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		#[cfg(feature = "tracing")]
		tracing::debug!(
			operation,
			status = meta.and_then(|value| value.status),
			"transport failure"
		);
		#[cfg(not(feature = "tracing"))]
		let _ = (operation, meta);

		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(*inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => TransportError::network(std::io::Error::other(
				format!("HTTP client error occurred while calling the API: {message}."),
			))
			.into(),
			_ => TransportError::network(std::io::Error::other(
				"HTTP client error occurred while calling the API.",
			))
			.into(),
		}
	}
}

/// Token endpoint client configured with the session's credentials.
pub(crate) struct TokenFacade {
	oauth_client: ConfiguredBasicClient,
}
impl TokenFacade {
	/// Builds a client that posts `client_id` and `client_secret` in the form body.
	pub(crate) fn from_descriptor(
		descriptor: &ServiceDescriptor,
		client_id: &str,
		client_secret: &str,
	) -> Result<Self> {
		let auth_url = AuthUrl::new(descriptor.authorization.to_string())
			.map_err(|source| ConfigError::InvalidUrl { source })?;
		let token_url = TokenUrl::new(descriptor.token.to_string())
			.map_err(|source| ConfigError::InvalidUrl { source })?;
		let oauth_client = BasicClient::new(ClientId::new(client_id.to_owned()))
			.set_client_secret(ClientSecret::new(client_secret.to_owned()))
			.set_auth_uri(auth_url)
			.set_token_uri(token_url)
			.set_auth_type(AuthType::RequestBody);

		Ok(Self { oauth_client })
	}

	pub(crate) async fn exchange_code<C, M>(
		&self,
		handle: &InterceptedHandle<'_, C, M>,
		code: &str,
		redirect_uri: Option<&Url>,
		scopes: Option<&ScopeSet>,
	) -> Result<Token>
	where
		C: ?Sized + ApiHttpClient,
		M: ?Sized + TransportErrorMapper<C::TransportError>,
	{
		let mut request = self.oauth_client.exchange_code(AuthorizationCode::new(code.to_owned()));

		if let Some(redirect) = redirect_uri {
			let redirect_url = RedirectUrl::new(redirect.to_string())
				.map_err(|source| ConfigError::InvalidUrl { source })?;

			request = request.set_redirect_uri(Cow::Owned(redirect_url));
		}
		if let Some(scopes) = scopes.filter(|scopes| !scopes.is_empty()) {
			request = request.add_extra_param("scope", scopes.normalized());
		}

		let response =
			request.request_async(handle).await.map_err(|err| map_request_error(handle, err))?;

		map_token_response(GrantType::AuthorizationCode, response, None)
	}

	pub(crate) async fn exchange_client_credentials<C, M>(
		&self,
		handle: &InterceptedHandle<'_, C, M>,
		redirect_uri: Option<&Url>,
		scopes: Option<&ScopeSet>,
	) -> Result<Token>
	where
		C: ?Sized + ApiHttpClient,
		M: ?Sized + TransportErrorMapper<C::TransportError>,
	{
		let mut request = self.oauth_client.exchange_client_credentials();

		if let Some(redirect) = redirect_uri {
			request = request.add_extra_param("redirect_uri", redirect.to_string());
		}
		for scope in scopes.into_iter().flatten() {
			request = request.add_scope(Scope::new(scope.to_owned()));
		}

		let response =
			request.request_async(handle).await.map_err(|err| map_request_error(handle, err))?;

		map_token_response(GrantType::ClientCredentials, response, None)
	}

	pub(crate) async fn exchange_refresh_token<C, M>(
		&self,
		handle: &InterceptedHandle<'_, C, M>,
		refresh_token: &TokenSecret,
		scopes: Option<&ScopeSet>,
	) -> Result<Token>
	where
		C: ?Sized + ApiHttpClient,
		M: ?Sized + TransportErrorMapper<C::TransportError>,
	{
		let refresh_secret = RefreshToken::new(refresh_token.expose().to_owned());
		let mut request = self.oauth_client.exchange_refresh_token(&refresh_secret);

		for scope in scopes.into_iter().flatten() {
			request = request.add_scope(Scope::new(scope.to_owned()));
		}

		let response =
			request.request_async(handle).await.map_err(|err| map_request_error(handle, err))?;

		map_token_response(GrantType::RefreshToken, response, Some(refresh_token))
	}
}

fn map_token_response(
	grant: GrantType,
	response: BasicTokenResponse,
	previous_refresh: Option<&TokenSecret>,
) -> Result<Token> {
	let expires_in = response.expires_in().ok_or(TransportError::MissingExpiresIn)?.as_secs();
	let expires_in = i64::try_from(expires_in).map_err(|_| TransportError::ExpiresInOutOfRange)?;
	let mut builder = Token::builder(grant)
		.token_type(response.token_type().as_ref())
		.access_token(response.access_token().secret().to_owned())
		.issued_at(OffsetDateTime::now_utc())
		.expires_in(Duration::seconds(expires_in));

	match (response.refresh_token(), previous_refresh) {
		(Some(fresh), _) => builder = builder.refresh_token(fresh.secret().to_owned()),
		(None, Some(previous)) => builder = builder.refresh_token(previous.expose()),
		(None, None) => {},
	}

	builder.build().map_err(|e| match e {
		TokenBuilderError::ExpiryOutOfRange => TransportError::ExpiresInOutOfRange.into(),
		e => ConfigError::from(e).into(),
	})
}

fn map_request_error<C, M>(
	handle: &InterceptedHandle<'_, C, M>,
	err: BasicRequestTokenError<HttpClientError<Error>>,
) -> Error
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	match err {
		RequestTokenError::ServerResponse(response) =>
			map_server_response_error(response, handle.status()),
		RequestTokenError::Request(error) => into_client_error(error),
		RequestTokenError::Parse(source, _body) =>
			TransportError::Decode { source, status: handle.status() }.into(),
		RequestTokenError::Other(message) => TransportError::network(std::io::Error::other(
			format!("Token endpoint returned an unexpected response: {message}."),
		))
		.into(),
	}
}

fn map_server_response_error(response: BasicErrorResponse, status: Option<u16>) -> Error {
	let error = ApiError {
		error: response.error().as_ref().to_owned(),
		error_description: response.error_description().cloned(),
		error_type: None,
	};

	Error::Api { description: error.description().to_owned(), error, status: status.unwrap_or(0) }
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	TransportError::from(err).into()
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::{StandardTokenResponse, basic::BasicTokenType};
	// self
	use super::*;

	fn token_response(refresh: Option<&str>, expires_in: Option<u64>) -> BasicTokenResponse {
		let mut response = StandardTokenResponse::new(
			oauth2::AccessToken::new("fresh-access".into()),
			BasicTokenType::Bearer,
			oauth2::EmptyExtraTokenFields {},
		);

		response.set_refresh_token(refresh.map(|value| RefreshToken::new(value.into())));
		response.set_expires_in(expires_in.map(std::time::Duration::from_secs).as_ref());

		response
	}

	#[test]
	fn builds_request_body_client() {
		let descriptor = ServiceDescriptor::builder()
			.api_base(Url::parse("https://api.example.com/v2/").expect("Base URL should parse."))
			.build()
			.expect("Descriptor should build.");

		assert!(TokenFacade::from_descriptor(&descriptor, "client-id", "secret").is_ok());
	}

	#[test]
	fn refresh_without_new_value_keeps_previous_refresh_token() {
		let previous = TokenSecret::new("old-refresh");
		let token = map_token_response(
			GrantType::RefreshToken,
			token_response(None, Some(3600)),
			Some(&previous),
		)
		.expect("Refresh response should map into a token.");

		assert_eq!(token.refresh_secret().map(TokenSecret::expose), Some("old-refresh"));
		assert_eq!(token.access_token.expose(), "fresh-access");
		assert_eq!(token.grant, GrantType::RefreshToken);

		let token = map_token_response(
			GrantType::RefreshToken,
			token_response(Some("new-refresh"), Some(3600)),
			Some(&previous),
		)
		.expect("Refresh response should map into a token.");

		assert_eq!(token.refresh_secret().map(TokenSecret::expose), Some("new-refresh"));
	}

	#[test]
	fn missing_expires_in_is_a_transport_error() {
		let err = map_token_response(GrantType::ClientCredentials, token_response(None, None), None)
			.expect_err("Missing expires_in must be rejected.");

		assert!(matches!(err, Error::Transport(TransportError::MissingExpiresIn)));
	}

	#[test]
	fn huge_expires_in_is_an_error_not_a_panic() {
		let err = map_token_response(
			GrantType::ClientCredentials,
			token_response(None, Some(1_000_000_000_000)),
			None,
		)
		.expect_err("Overflowing expires_in must be rejected.");

		assert!(matches!(err, Error::Transport(TransportError::ExpiresInOutOfRange)));
	}
}
