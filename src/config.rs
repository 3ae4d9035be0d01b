//! Serde-friendly client configuration.
//!
//! [`ClientConfig`] is the value applications load from their own settings files; it validates
//! into a [`ServiceDescriptor`] and, with the `reqwest` feature, a configured transport.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	service::{DEFAULT_API_BASE, ServiceDescriptor},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport settings for a [`Client`](crate::api::Client).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
	/// API base URL; must use HTTPS.
	pub base_url: String,
	/// `User-Agent` header sent with every request.
	pub user_agent: String,
	/// Whole-request timeout in seconds; `0` disables the timeout.
	pub timeout_secs: u64,
}
impl ClientConfig {
	/// Validates the configured base URL into a [`ServiceDescriptor`].
	pub fn descriptor(&self) -> Result<ServiceDescriptor> {
		let base = Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidUrl { source })?;

		ServiceDescriptor::builder().api_base(base).build().map_err(|e| ConfigError::from(e).into())
	}

	/// Returns the configured timeout, if any.
	pub fn timeout(&self) -> Option<std::time::Duration> {
		(self.timeout_secs > 0).then(|| std::time::Duration::from_secs(self.timeout_secs))
	}

	/// Builds a reqwest transport honoring the user agent and timeout; redirects are not followed.
	#[cfg(feature = "reqwest")]
	pub fn http_client(&self) -> Result<ReqwestHttpClient> {
		let mut builder = ReqwestClient::builder()
			.user_agent(self.user_agent.as_str())
			.redirect(reqwest::redirect::Policy::none());

		if let Some(timeout) = self.timeout() {
			builder = builder.timeout(timeout);
		}

		let client = builder.build().map_err(ConfigError::from)?;

		Ok(ReqwestHttpClient::with_client(client))
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_API_BASE.into(),
			user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into(),
			timeout_secs: DEFAULT_TIMEOUT_SECS,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn partial_documents_fall_back_to_defaults() {
		let config: ClientConfig = serde_json::from_str(r#"{"timeout_secs":5}"#)
			.expect("Partial configuration should deserialize.");

		assert_eq!(config.base_url, DEFAULT_API_BASE);
		assert_eq!(config.timeout(), Some(std::time::Duration::from_secs(5)));
		assert!(config.user_agent.starts_with("xrel-client/"));
	}

	#[test]
	fn descriptor_rejects_plain_http() {
		let config =
			ClientConfig { base_url: "http://api.xrel.to/v2/".into(), ..ClientConfig::default() };
		let err = config.descriptor().expect_err("Plain HTTP base must be rejected.");

		assert!(matches!(err, Error::Config(ConfigError::InvalidDescriptor(_))));
	}

	#[test]
	fn zero_timeout_disables_it() {
		let config = ClientConfig { timeout_secs: 0, ..ClientConfig::default() };

		assert!(config.timeout().is_none());
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn builds_reqwest_transport() {
		assert!(ClientConfig::default().http_client().is_ok());
	}
}
