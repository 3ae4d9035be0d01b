//! Response interceptor applied to every exchange with the service.
//!
//! The service is known to answer application-level failures with success-looking status codes,
//! so the body is always probed for an error payload before the status is consulted. The body is
//! buffered exactly once by the transport; the interceptor inspects that buffer and hands the same
//! [`HttpResponse`] back to the caller when no failure is found.

// crates.io
use oauth2::HttpResponse;
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, error::TransportError, rate_limit::RateLimitTracker};

/// Structured error payload (`{error, error_description, error_type}`) returned by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
	/// Machine-readable error code.
	pub error: String,
	/// Human-readable description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_description: Option<String>,
	/// Error category reported by the service.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_type: Option<String>,
}
impl ApiError {
	/// Attempts to read an error payload from a buffered body.
	///
	/// Returns `None` for anything that is not a JSON object with a non-empty `error` string;
	/// a failed probe means "no API error present" and is never itself an error.
	pub fn probe(body: &[u8]) -> Option<Self> {
		let object = match serde_json::from_slice::<Map<String, Value>>(body) {
			Ok(object) => object,
			Err(_e) => {
				#[cfg(feature = "tracing")]
				tracing::trace!(error = %_e, "response body is not an error payload");

				return None;
			},
		};
		let probe = serde_json::from_value::<ErrorProbe>(Value::Object(object)).ok()?;
		let error = probe.error.filter(|code| !code.is_empty())?;

		Some(Self { error, error_description: probe.error_description, error_type: probe.error_type })
	}

	/// Returns the description, falling back to the error code.
	pub fn description(&self) -> &str {
		self.error_description.as_deref().filter(|text| !text.is_empty()).unwrap_or(&self.error)
	}
}
impl Display for ApiError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match &self.error_type {
			Some(kind) => write!(f, "{} ({kind}): {}", self.error, self.description()),
			None => write!(f, "{}: {}", self.error, self.description()),
		}
	}
}

#[derive(Deserialize)]
struct ErrorProbe {
	#[serde(default)]
	error: Option<String>,
	#[serde(default)]
	error_description: Option<String>,
	#[serde(default)]
	error_type: Option<String>,
}

/// Records rate-limit metadata and classifies a buffered response.
///
/// - An error payload in the body fails with [`Error::Api`], whatever the status code.
/// - A failing status without an error payload fails with [`TransportError::Status`].
/// - Anything else is returned untouched.
pub fn inspect(response: HttpResponse, rate_limit: &RateLimitTracker) -> Result<HttpResponse> {
	let status = response.status();

	rate_limit.observe(status.as_u16(), response.headers());

	if let Some(error) = ApiError::probe(response.body()) {
		#[cfg(feature = "tracing")]
		tracing::debug!(status = status.as_u16(), code = %error.error, "api error detected");

		return Err(Error::Api {
			description: error.description().to_owned(),
			error,
			status: status.as_u16(),
		});
	}
	if !status.is_success() {
		return Err(TransportError::Status { status: status.as_u16() }.into());
	}

	Ok(response)
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::{HeaderValue, StatusCode};
	// self
	use super::*;

	fn response(status: u16, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() =
			StatusCode::from_u16(status).expect("Status fixture should be a valid code.");

		response
	}

	#[test]
	fn success_status_does_not_hide_error_payload() {
		let tracker = RateLimitTracker::default();
		let err = inspect(
			response(200, r#"{"error":"x","error_description":"y","error_type":"z"}"#),
			&tracker,
		)
		.expect_err("Error payload must fail even with status 200.");

		match err {
			Error::Api { description, error, status } => {
				assert_eq!(description, "y");
				assert_eq!(error.error, "x");
				assert_eq!(error.error_type.as_deref(), Some("z"));
				assert_eq!(status, 200);
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}

		assert_eq!(tracker.snapshot().status, 200);
	}

	#[test]
	fn failing_status_without_payload_is_a_transport_error() {
		let err = inspect(response(500, "<html>oops</html>"), &RateLimitTracker::default())
			.expect_err("Status 500 must fail.");

		assert!(matches!(err, Error::Transport(TransportError::Status { status: 500 })));
	}

	#[test]
	fn failing_status_with_payload_prefers_payload() {
		let err = inspect(
			response(401, r#"{"error":"invalid_token","error_type":"oauth2"}"#),
			&RateLimitTracker::default(),
		)
		.expect_err("Status 401 with payload must fail.");

		match err {
			Error::Api { description, status, .. } => {
				assert_eq!(description, "invalid_token");
				assert_eq!(status, 401);
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn payloads_pass_through_with_body_intact() {
		let mut ok = response(200, r#"{"id":"abc","dirname":"Some.Release-GRP"}"#);

		ok.headers_mut().insert("x-ratelimit-remaining", HeaderValue::from_static("7"));

		let tracker = RateLimitTracker::default();
		let passed = inspect(ok, &tracker).expect("Non-error payload should pass through.");

		assert_eq!(passed.body(), br#"{"id":"abc","dirname":"Some.Release-GRP"}"#);
		assert_eq!(tracker.snapshot().remaining, 7);
	}

	#[test]
	fn probe_ignores_non_objects_and_empty_codes() {
		assert!(ApiError::probe(br#"["x","y","z"]"#).is_none());
		assert!(ApiError::probe(br#"{"error":""}"#).is_none());
		assert!(ApiError::probe(br#"{"error":null,"error_description":"y"}"#).is_none());
		assert!(ApiError::probe(b"\x00\x01binary-nfo").is_none());
		assert!(ApiError::probe(br#"{"error":"x"}"#).is_some());
	}
}
