//! Client-level error types shared by the session, interceptor, and endpoint facade.

// self
use crate::{_prelude::*, interceptor::ApiError};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem (credentials, URLs, HTTP client setup).
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Restricted operation attempted without the required scope.
	#[error(transparent)]
	Permission(#[from] PermissionError),
	/// Transport failure, undecodable body, or a failing status without an API error payload.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Caller-supplied value is out of contract; raised before any network access.
	#[error("Invalid argument: {reason}.")]
	InvalidArgument {
		/// Human-readable description of the violated contract.
		reason: String,
	},
	/// Service answered with a structured error payload, whatever the status code said.
	#[error("API returned an error: {description}.")]
	Api {
		/// Description taken from `error_description`, or the error code when absent.
		description: String,
		/// Raw error payload.
		error: ApiError,
		/// HTTP status code observed alongside the payload.
		status: u16,
	},
	/// Operation guarantees a value but the service returned an empty or `null` body.
	#[error("The {operation} operation returned an empty result.")]
	EmptyResult {
		/// Operation label.
		operation: &'static str,
	},
}
impl Error {
	pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
		Self::InvalidArgument { reason: reason.into() }
	}

	/// Returns the HTTP status attached to API or transport status failures.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api { status, .. } => Some(*status),
			Self::Transport(TransportError::Status { status }) => Some(*status),
			Self::Transport(TransportError::Decode { status, .. }) => *status,
			_ => None,
		}
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Service descriptor is invalid.
	#[error(transparent)]
	InvalidDescriptor(#[from] crate::service::ServiceDescriptorError),
	/// An endpoint or redirect URL cannot be parsed.
	#[error("URL is invalid.")]
	InvalidUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},

	/// Session has no client identifier.
	#[error("No client ID provided.")]
	MissingClientId,
	/// One or more parameters needed for a token exchange are unset.
	#[error("Needed parameters not set: {}.", missing.join(" "))]
	MissingParameters {
		/// Every missing parameter, in wire-name form.
		missing: Vec<&'static str>,
	},
	/// Session scopes cannot be normalized.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// Token builder validation failed.
	#[error("Unable to build token.")]
	TokenBuild(#[from] crate::auth::TokenBuilderError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Scope guard failures; always raised before a request is built.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum PermissionError {
	/// The session was constructed without any scope list.
	#[error("No scope provided; `{required}` is required.")]
	ScopesNotConfigured {
		/// Scope (or access class) the operation needs.
		required: String,
	},
	/// The configured scope list does not include the required scope.
	#[error("The {required} scope was not provided.")]
	MissingScope {
		/// Scope the operation needs.
		required: String,
	},
}

/// Transport-level failures (network, IO, status, decoding).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
	/// Response status signalled failure and the body carried no API error payload.
	#[error("API responded with HTTP status {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
	},
	/// Response body could not be decoded into the expected type.
	#[error("API returned a body that could not be decoded.")]
	Decode {
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint response omitted `expires_in`.
	#[error("Token endpoint response is missing expires_in.")]
	MissingExpiresIn,
	/// Token endpoint returned an `expires_in` that cannot be represented as an expiry instant.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn missing_parameters_lists_every_name() {
		let err = ConfigError::MissingParameters { missing: vec!["client_id", "refresh_token"] };

		assert_eq!(err.to_string(), "Needed parameters not set: client_id refresh_token.");
	}

	#[test]
	fn status_is_exposed_for_api_and_status_errors() {
		let api = Error::Api {
			description: "y".into(),
			error: ApiError {
				error: "x".into(),
				error_description: Some("y".into()),
				error_type: Some("z".into()),
			},
			status: 200,
		};

		assert_eq!(api.status(), Some(200));
		assert_eq!(Error::from(TransportError::Status { status: 503 }).status(), Some(503));
		assert_eq!(Error::invalid_argument("id missing").status(), None);
	}
}
