//! P2P releases and their categories.

// self
use crate::{_prelude::*, model::ExtInfo};

/// P2P release.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct P2pRelease {
	/// Release identifier.
	pub id: String,
	/// Release directory name.
	#[serde(default)]
	pub dirname: String,
	/// Link to the release page.
	#[serde(default)]
	pub link_href: Option<String>,
	/// Primary language.
	#[serde(default)]
	pub main_lang: Option<String>,
	/// Publication instant in UTC epoch seconds.
	#[serde(default)]
	pub pub_time: Option<i64>,
	/// Post instant in UTC epoch seconds.
	#[serde(default)]
	pub post_time: Option<i64>,
	/// Size in megabytes.
	#[serde(default)]
	pub size_mb: Option<u64>,
	/// Releasing group.
	#[serde(default)]
	pub group: Option<P2pGroup>,
	/// Number of user ratings.
	#[serde(default)]
	pub num_ratings: u32,
	/// Linked media information.
	#[serde(default)]
	pub ext_info: Option<ExtInfo>,
	/// Season number for TV releases.
	#[serde(default)]
	pub tv_season: Option<u32>,
	/// Episode number for TV releases.
	#[serde(default)]
	pub tv_episode: Option<u32>,
	/// Number of comments.
	#[serde(default)]
	pub comments: u32,
	/// Category the release was posted in.
	#[serde(default)]
	pub category: Option<P2pCategory>,
}
impl P2pRelease {
	/// Publication instant, when reported and representable.
	pub fn published_at(&self) -> Option<OffsetDateTime> {
		super::epoch_to_datetime(self.pub_time)
	}
}

/// P2P releasing group.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct P2pGroup {
	/// Group identifier.
	pub id: String,
	/// Group name.
	#[serde(default)]
	pub name: String,
}

/// P2P category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct P2pCategory {
	/// Category identifier.
	pub id: String,
	/// Top-level category name.
	#[serde(default)]
	pub meta_cat: String,
	/// Sub-category name.
	#[serde(default)]
	pub sub_cat: String,
}
