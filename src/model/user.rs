//! Authenticated user.

// self
use crate::_prelude::*;

/// User the token was issued for.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	/// User identifier.
	pub id: String,
	/// User name.
	#[serde(default)]
	pub name: String,
	/// Per-user secret used by the service's own tools.
	#[serde(default)]
	pub secret: Option<String>,
	/// Preferred locale.
	#[serde(default)]
	pub locale: Option<String>,
	/// Avatar URL.
	#[serde(default)]
	pub avatar_url: Option<String>,
	/// Avatar thumbnail URL.
	#[serde(default)]
	pub avatar_thumb_url: Option<String>,
}
impl Debug for User {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("User")
			.field("id", &self.id)
			.field("name", &self.name)
			.field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
			.field("locale", &self.locale)
			.field("avatar_url", &self.avatar_url)
			.field("avatar_thumb_url", &self.avatar_thumb_url)
			.finish()
	}
}
