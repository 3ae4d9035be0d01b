//! Validated endpoint set for the remote service.
//!
//! [`ServiceDescriptor`] pins the API base plus the two OAuth endpoints derived from it. All of
//! them must use HTTPS; the builder rejects anything else before a client is constructed.

pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, error::ConfigError};

/// Default API base of the public service.
pub const DEFAULT_API_BASE: &str = "https://api.xrel.to/v2/";
/// Authorization endpoint path relative to the API base.
pub const AUTHORIZATION_PATH: &str = "oauth2/auth";
/// Token endpoint path relative to the API base.
pub const TOKEN_PATH: &str = "oauth2/token.json";

/// Immutable endpoint set consumed by the client and session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
	/// Base URL every endpoint path is resolved against; always ends with `/`.
	pub api_base: Url,
	/// Authorization endpoint used to build the consent URL.
	pub authorization: Url,
	/// Token endpoint used for every grant exchange.
	pub token: Url,
}
impl ServiceDescriptor {
	/// Creates a new builder seeded with [`DEFAULT_API_BASE`].
	pub fn builder() -> ServiceDescriptorBuilder {
		ServiceDescriptorBuilder::new()
	}

	/// Resolves an endpoint path such as `release/info.json` against the API base.
	pub fn endpoint(&self, path: &str) -> Result<Url> {
		self.api_base.join(path).map_err(|source| ConfigError::InvalidUrl { source }.into())
	}
}
