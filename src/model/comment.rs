//! Release comments.

// self
use crate::_prelude::*;

/// Comment on a release.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
	/// Comment identifier.
	pub id: String,
	/// Creation instant in UTC epoch seconds.
	#[serde(default)]
	pub time: Option<i64>,
	/// Author.
	#[serde(default)]
	pub author: Option<CommentAuthor>,
	/// Comment text.
	#[serde(default)]
	pub text: String,
	/// Link to the comment.
	#[serde(default)]
	pub link_href: Option<String>,
	/// Ratings submitted with the comment.
	#[serde(default)]
	pub rating: Option<CommentRating>,
	/// Vote tally.
	#[serde(default)]
	pub votes: Option<CommentVotes>,
	/// Edit history summary.
	#[serde(default)]
	pub edits: Option<CommentEdits>,
}
impl Comment {
	/// Creation instant, when reported and representable.
	pub fn created_at(&self) -> Option<OffsetDateTime> {
		super::epoch_to_datetime(self.time)
	}
}

/// Comment author.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
	/// User identifier.
	pub id: String,
	/// User name.
	#[serde(default)]
	pub name: String,
}

/// Video and audio ratings in `1..=10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRating {
	/// Video rating.
	pub video: u8,
	/// Audio rating.
	pub audio: u8,
}

/// Vote tally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentVotes {
	/// Positive votes.
	#[serde(default)]
	pub positive: u32,
	/// Negative votes.
	#[serde(default)]
	pub negative: u32,
}

/// Edit history summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentEdits {
	/// Number of edits.
	#[serde(default)]
	pub count: u32,
	/// Last edit instant in UTC epoch seconds.
	#[serde(default)]
	pub last: Option<i64>,
}
