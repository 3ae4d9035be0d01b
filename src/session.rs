//! OAuth 2.0 session state and the scope guard.
//!
//! A [`Session`] carries the application's client credentials plus the optional redirect URI,
//! anti-CSRF state, and requested scopes. It is immutable once built and never stores tokens;
//! grant exchanges return new [`Token`](crate::auth::Token) values to the caller.

mod authorize;
mod exchange;

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{_prelude::*, auth::ScopeSet, error::PermissionError};

const STATE_LEN: usize = 32;

/// Client credentials and authorization preferences shared by every call of a client.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
	client_id: Option<String>,
	client_secret: Option<String>,
	redirect_uri: Option<Url>,
	state: Option<String>,
	scopes: Option<ScopeSet>,
}
impl Session {
	/// Session without credentials; only public endpoints are usable.
	pub fn anonymous() -> Self {
		Self::default()
	}

	/// Session for a registered application.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: Some(client_id.into()),
			client_secret: Some(client_secret.into()),
			..Self::default()
		}
	}

	/// Sets the redirect URI sent with the authorization URL and non-refresh grants.
	pub fn with_redirect_uri(mut self, redirect_uri: Url) -> Self {
		self.redirect_uri = Some(redirect_uri);

		self
	}

	/// Sets the anti-CSRF state echoed back by the authorization redirect.
	pub fn with_state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Sets a freshly generated 32-character alphanumeric state.
	pub fn with_random_state(self) -> Self {
		let state =
			rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect::<String>();

		self.with_state(state)
	}

	/// Fixes the requested scope list.
	///
	/// Restricted operations fail closed when no scope list was configured.
	pub fn with_scopes(mut self, scopes: ScopeSet) -> Self {
		self.scopes = Some(scopes);

		self
	}

	/// Client identifier, when configured.
	pub fn client_id(&self) -> Option<&str> {
		self.client_id.as_deref()
	}

	/// Client secret, when configured. Callers must avoid logging it.
	pub fn client_secret(&self) -> Option<&str> {
		self.client_secret.as_deref()
	}

	/// Redirect URI, when configured.
	pub fn redirect_uri(&self) -> Option<&Url> {
		self.redirect_uri.as_ref()
	}

	/// Anti-CSRF state, when configured.
	pub fn state(&self) -> Option<&str> {
		self.state.as_deref()
	}

	/// Requested scopes, when configured.
	pub fn scopes(&self) -> Option<&ScopeSet> {
		self.scopes.as_ref()
	}

	/// Returns true when the authorization redirect echoed the expected state.
	///
	/// Sessions without a state accept nothing.
	pub fn state_matches(&self, returned_state: &str) -> bool {
		self.state.as_deref().is_some_and(|state| state == returned_state)
	}

	/// Fails unless the configured scope list contains `required`.
	pub fn require_scope(&self, required: &str) -> Result<(), PermissionError> {
		let scopes = self.require_scopes_configured(required)?;

		if scopes.contains(required) {
			Ok(())
		} else {
			Err(PermissionError::MissingScope { required: required.to_owned() })
		}
	}

	/// Fails when no scope list was configured at all.
	pub fn require_scopes_configured(&self, required: &str) -> Result<&ScopeSet, PermissionError> {
		self.scopes
			.as_ref()
			.ok_or_else(|| PermissionError::ScopesNotConfigured { required: required.to_owned() })
	}
}
impl Debug for Session {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Session")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
			.field("redirect_uri", &self.redirect_uri)
			.field("state", &self.state)
			.field("scopes", &self.scopes)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::{SCOPE_ADD_PROOF, SCOPE_VIEW_NFO};

	fn scopes(values: &[&str]) -> ScopeSet {
		ScopeSet::new(values.iter().copied()).expect("Scope fixture should be valid.")
	}

	#[test]
	fn scope_guard_fails_closed() {
		let err = Session::new("id", "secret")
			.require_scope(SCOPE_VIEW_NFO)
			.expect_err("Sessions without scopes must be denied.");

		assert_eq!(err, PermissionError::ScopesNotConfigured { required: SCOPE_VIEW_NFO.into() });

		let session = Session::new("id", "secret").with_scopes(scopes(&[SCOPE_VIEW_NFO]));

		assert!(session.require_scope(SCOPE_VIEW_NFO).is_ok());
		assert_eq!(
			session.require_scope(SCOPE_ADD_PROOF),
			Err(PermissionError::MissingScope { required: SCOPE_ADD_PROOF.into() })
		);
	}

	#[test]
	fn empty_scope_list_counts_as_configured() {
		let session = Session::new("id", "secret").with_scopes(ScopeSet::default());

		assert!(session.require_scopes_configured("authenticated").is_ok());
		assert!(matches!(
			session.require_scope(SCOPE_VIEW_NFO),
			Err(PermissionError::MissingScope { .. })
		));
	}

	#[test]
	fn random_state_is_alphanumeric() {
		let session = Session::anonymous().with_random_state();
		let state = session.state().expect("Random state should be set.");

		assert_eq!(state.len(), STATE_LEN);
		assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
		assert!(session.state_matches(state));
		assert!(!session.state_matches("other"));
		assert!(!Session::anonymous().state_matches(""));
	}

	#[test]
	fn debug_redacts_secret() {
		let rendered = format!("{:?}", Session::new("id", "hunter2"));

		assert!(!rendered.contains("hunter2"));
		assert!(rendered.contains("<redacted>"));
	}
}
