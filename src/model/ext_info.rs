//! Media information ("ext info") attached to releases.

// crates.io
use time::{Date, macros::format_description};
// self
use crate::_prelude::*;

/// Media information record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtInfo {
	/// Record identifier.
	pub id: String,
	/// Media type such as `movie`, `tv`, or `game`.
	#[serde(default, rename = "type")]
	pub kind: Option<String>,
	/// Title.
	#[serde(default)]
	pub title: String,
	/// Link to the media page.
	#[serde(default)]
	pub link_href: Option<String>,
	/// Average rating.
	#[serde(default)]
	pub rating: Option<f64>,
	/// Number of ratings.
	#[serde(default)]
	pub num_ratings: u32,
	/// Rating submitted by the token's user, when the request was authenticated.
	#[serde(default)]
	pub own_rating: Option<u8>,
	/// External URIs (for example IMDb links).
	#[serde(default)]
	pub uris: Vec<String>,
	/// Genre label.
	#[serde(default)]
	pub genre: Option<String>,
	/// Known release dates.
	#[serde(default)]
	pub release_dates: Vec<ReleaseDate>,
	/// Plot summaries.
	#[serde(default)]
	pub plots: Vec<String>,
}

/// Release date of a medium in one format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDate {
	/// Release format such as `dvd` or `cinema`.
	#[serde(default, rename = "type")]
	pub kind: String,
	/// Date in `YYYY-MM-DD` form.
	#[serde(default)]
	pub date: String,
}
impl ReleaseDate {
	/// Parses [`ReleaseDate::date`]; partial or malformed dates yield `None`.
	pub fn parsed(&self) -> Option<Date> {
		Date::parse(&self.date, format_description!("[year]-[month]-[day]")).ok()
	}
}

/// Media item (image or video) attached to a record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtInfoMedia {
	/// Media identifier.
	#[serde(default)]
	pub id: Option<String>,
	/// Media type such as `image` or `video`.
	#[serde(default, rename = "type")]
	pub kind: String,
	/// Description.
	#[serde(default)]
	pub description: Option<String>,
	/// Upload instant in UTC epoch seconds.
	#[serde(default)]
	pub time: Option<i64>,
	/// Thumbnail or preview URL.
	#[serde(default)]
	pub url_thumb: Option<String>,
	/// Full-size URL.
	#[serde(default)]
	pub url_full: Option<String>,
	/// Video URL.
	#[serde(default)]
	pub video_url: Option<String>,
	/// YouTube identifier.
	#[serde(default)]
	pub youtube_id: Option<String>,
}

/// Media-information search response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtInfoSearchResult {
	/// Total number of hits.
	#[serde(default)]
	pub total: u64,
	/// Hits.
	#[serde(default)]
	pub results: Vec<ExtInfo>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn release_dates_parse_leniently() {
		let info: ExtInfo = serde_json::from_str(
			r#"{"id":"e1","type":"movie","title":"Some Movie",
			"release_dates":[{"type":"dvd","date":"2024-03-01"},{"type":"cinema","date":"2024"}]}"#,
		)
		.expect("Ext info fixture should decode.");

		assert_eq!(info.kind.as_deref(), Some("movie"));
		assert_eq!(info.release_dates[0].parsed().map(|date| date.day()), Some(1));
		assert!(info.release_dates[1].parsed().is_none());
	}
}
