//! Authorization URL construction for the Authorization Code grant.

// self
use crate::{
	_prelude::*, error::ConfigError, obs::RequestSpan, service::ServiceDescriptor,
	session::Session,
};

impl Session {
	/// Builds the URL end users visit to grant this application access.
	///
	/// Appends `response_type=code`, `client_id`, and, when configured, `redirect_uri`, `state`,
	/// and the space-joined `scope` (omitted for an empty list). No network call is made.
	pub fn authorization_url(&self, descriptor: &ServiceDescriptor) -> Result<Url> {
		let _guard = RequestSpan::new("authorization_url", "build").entered();
		let client_id = self.client_id().ok_or(ConfigError::MissingClientId)?;
		let mut url = descriptor.authorization.clone();
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("response_type", "code");
		pairs.append_pair("client_id", client_id);

		if let Some(redirect_uri) = self.redirect_uri() {
			pairs.append_pair("redirect_uri", redirect_uri.as_str());
		}
		if let Some(state) = self.state() {
			pairs.append_pair("state", state);
		}
		if let Some(scopes) = self.scopes().filter(|scopes| !scopes.is_empty()) {
			pairs.append_pair("scope", &scopes.normalized());
		}

		drop(pairs);

		Ok(url)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::ScopeSet;

	fn descriptor() -> ServiceDescriptor {
		ServiceDescriptor::builder().build().expect("Default descriptor should build.")
	}

	#[test]
	fn includes_every_configured_parameter() {
		let session = Session::new("my id", "secret")
			.with_redirect_uri(
				Url::parse("https://app.example.com/callback?x=1")
					.expect("Redirect fixture should parse."),
			)
			.with_state("abc123")
			.with_scopes(
				ScopeSet::new(["viewnfo", "addproof"]).expect("Scope fixture should be valid."),
			);
		let url = session.authorization_url(&descriptor()).expect("Authorization URL should build.");

		assert_eq!(
			url.as_str(),
			"https://api.xrel.to/v2/oauth2/auth?response_type=code&client_id=my+id\
			&redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback%3Fx%3D1&state=abc123\
			&scope=viewnfo+addproof"
		);
	}

	#[test]
	fn omits_unset_and_empty_parameters() {
		let session = Session::new("id", "secret").with_scopes(ScopeSet::default());
		let url = session.authorization_url(&descriptor()).expect("Authorization URL should build.");

		assert_eq!(url.query(), Some("response_type=code&client_id=id"));
	}

	#[test]
	fn requires_client_id() {
		let err = Session::anonymous()
			.authorization_url(&descriptor())
			.expect_err("Anonymous sessions cannot build an authorization URL.");

		assert!(matches!(err, Error::Config(ConfigError::MissingClientId)));
	}
}
