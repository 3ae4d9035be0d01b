//! Builder that validates a [`ServiceDescriptor`](crate::service::ServiceDescriptor).

// self
use crate::{
	_prelude::*,
	service::{AUTHORIZATION_PATH, DEFAULT_API_BASE, ServiceDescriptor, TOKEN_PATH},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ServiceDescriptorError {
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Endpoint cannot be parsed or derived from the API base.
	#[error("The {endpoint} endpoint is invalid: {reason}.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Parser explanation.
		reason: String,
	},
	/// The API base cannot carry relative paths.
	#[error("The API base cannot be used as a base URL: {url}.")]
	CannotBeABase {
		/// Offending URL.
		url: String,
	},
}

/// Builder for [`ServiceDescriptor`] values.
#[derive(Debug, Default)]
pub struct ServiceDescriptorBuilder {
	/// API base; [`DEFAULT_API_BASE`] when unset.
	pub api_base: Option<Url>,
	/// Authorization endpoint override; derived from the API base when unset.
	pub authorization_endpoint: Option<Url>,
	/// Token endpoint override; derived from the API base when unset.
	pub token_endpoint: Option<Url>,
}
impl ServiceDescriptorBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the API base. A missing trailing `/` is added so relative paths resolve below it.
	pub fn api_base(mut self, url: Url) -> Self {
		self.api_base = Some(url);

		self
	}

	/// Overrides the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Overrides the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ServiceDescriptor, ServiceDescriptorError> {
		let mut api_base = match self.api_base {
			Some(url) => url,
			None => parse("api_base", DEFAULT_API_BASE)?,
		};

		if api_base.cannot_be_a_base() {
			return Err(ServiceDescriptorError::CannotBeABase { url: api_base.to_string() });
		}
		if !api_base.path().ends_with('/') {
			let path = format!("{}/", api_base.path());

			api_base.set_path(&path);
		}

		let authorization = match self.authorization_endpoint {
			Some(url) => url,
			None => derive("authorization", &api_base, AUTHORIZATION_PATH)?,
		};
		let token = match self.token_endpoint {
			Some(url) => url,
			None => derive("token", &api_base, TOKEN_PATH)?,
		};
		let descriptor = ServiceDescriptor { api_base, authorization, token };

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ServiceDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ServiceDescriptorError> {
		validate_endpoint("api_base", &self.api_base)?;
		validate_endpoint("authorization", &self.authorization)?;
		validate_endpoint("token", &self.token)?;

		Ok(())
	}
}

fn parse(endpoint: &'static str, raw: &str) -> Result<Url, ServiceDescriptorError> {
	Url::parse(raw)
		.map_err(|e| ServiceDescriptorError::InvalidEndpoint { endpoint, reason: e.to_string() })
}

fn derive(endpoint: &'static str, base: &Url, path: &str) -> Result<Url, ServiceDescriptorError> {
	base.join(path)
		.map_err(|e| ServiceDescriptorError::InvalidEndpoint { endpoint, reason: e.to_string() })
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ServiceDescriptorError> {
	if url.scheme() != "https" {
		Err(ServiceDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}
