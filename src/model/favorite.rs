//! Favorite lists.

// self
use crate::{_prelude::*, model::ExtInfo};

/// Favorite list owned by the token's user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
	/// List identifier.
	pub id: i64,
	/// List name.
	#[serde(default)]
	pub name: String,
	/// List description.
	#[serde(default)]
	pub description: Option<String>,
	/// Whether the list is public.
	#[serde(default)]
	pub public: bool,
	/// Whether new releases trigger notifications.
	#[serde(default)]
	pub notify: bool,
	/// Automatic add mode.
	#[serde(default)]
	pub auto_add_type: Option<String>,
	/// Number of entries.
	#[serde(default)]
	pub num_entries: u32,
	/// Number of unread releases.
	#[serde(default)]
	pub num_unread_releases: u32,
}

/// Result of adding or removing a favorite-list entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntryChange {
	/// `1` when the change was applied.
	#[serde(default)]
	pub success: i32,
	/// Affected list.
	#[serde(default)]
	pub fav_list: Option<Favorite>,
	/// Affected media record.
	#[serde(default)]
	pub ext_info: Option<ExtInfo>,
}
impl FavoriteEntryChange {
	/// Returns true when the service reports success.
	pub fn is_success(&self) -> bool {
		self.success == 1
	}
}

/// Result of marking a release as read in a favorite list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteMarkRead {
	/// Affected list.
	#[serde(default)]
	pub fav_list: Option<Favorite>,
}
