//! Scene releases, categories, filters, and search results.

// crates.io
use serde::{Deserializer, Serializer, de::Error as DeError};
// self
use crate::{
	_prelude::*,
	model::{ExtInfo, P2pRelease},
};

/// Scene release.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Release {
	/// Release identifier.
	pub id: String,
	/// Release directory name.
	#[serde(default)]
	pub dirname: String,
	/// Link to the release page.
	#[serde(default)]
	pub link_href: Option<String>,
	/// Publication instant in UTC epoch seconds.
	#[serde(default)]
	pub time: Option<i64>,
	/// Releasing group.
	#[serde(default)]
	pub group_name: Option<String>,
	/// Release size.
	#[serde(default)]
	pub size: Option<Size>,
	/// Video format label.
	#[serde(default)]
	pub video_type: Option<String>,
	/// Audio format label.
	#[serde(default)]
	pub audio_type: Option<String>,
	/// Number of user ratings.
	#[serde(default)]
	pub num_ratings: u32,
	/// Season number for TV releases.
	#[serde(default)]
	pub tv_season: Option<u32>,
	/// Episode number for TV releases.
	#[serde(default)]
	pub tv_episode: Option<u32>,
	/// Episode title for TV releases.
	#[serde(default)]
	pub tv_ep_title: Option<String>,
	/// Linked media information.
	#[serde(default)]
	pub ext_info: Option<ExtInfo>,
	/// Number of comments.
	#[serde(default)]
	pub comments: u32,
	/// Release flags such as `fix_rls` or `english`.
	#[serde(default)]
	pub flags: BTreeMap<String, bool>,
	/// Proof image URL, when one was uploaded.
	#[serde(default)]
	pub proof_url: Option<String>,
}
impl Release {
	/// Publication instant, when reported and representable.
	pub fn published_at(&self) -> Option<OffsetDateTime> {
		super::epoch_to_datetime(self.time)
	}
}

/// Size number as reported by the service: a value or a comparison marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeNumber {
	/// Empty string; size unknown.
	Unknown,
	/// `=`.
	Equals,
	/// `>`.
	GreaterThan,
	/// `>=`.
	GreaterThanOrEquals,
	/// `<=`.
	LessThanOrEquals,
	/// `<`.
	LessThan,
	/// Concrete number.
	Value(i64),
}
impl SizeNumber {
	/// Returns the concrete number, if any.
	pub fn value(self) -> Option<i64> {
		match self {
			SizeNumber::Value(value) => Some(value),
			_ => None,
		}
	}
}
impl FromStr for SizeNumber {
	type Err = std::num::ParseIntError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s {
			"" => SizeNumber::Unknown,
			"=" => SizeNumber::Equals,
			">" => SizeNumber::GreaterThan,
			">=" => SizeNumber::GreaterThanOrEquals,
			"<=" => SizeNumber::LessThanOrEquals,
			"<" => SizeNumber::LessThan,
			number => SizeNumber::Value(number.trim().parse()?),
		})
	}
}
impl Display for SizeNumber {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			SizeNumber::Unknown => Ok(()),
			SizeNumber::Equals => f.write_str("="),
			SizeNumber::GreaterThan => f.write_str(">"),
			SizeNumber::GreaterThanOrEquals => f.write_str(">="),
			SizeNumber::LessThanOrEquals => f.write_str("<="),
			SizeNumber::LessThan => f.write_str("<"),
			SizeNumber::Value(value) => write!(f, "{value}"),
		}
	}
}
impl Serialize for SizeNumber {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			SizeNumber::Value(value) => serializer.serialize_i64(*value),
			marker => serializer.collect_str(marker),
		}
	}
}
impl<'de> Deserialize<'de> for SizeNumber {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			Number(i64),
			Text(String),
		}

		match Raw::deserialize(deserializer)? {
			Raw::Number(value) => Ok(SizeNumber::Value(value)),
			Raw::Text(text) => text.parse().map_err(D::Error::custom),
		}
	}
}

/// Release size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
	/// Number or comparison marker.
	pub number: SizeNumber,
	/// Unit label such as `MB`.
	#[serde(default)]
	pub unit: String,
}

/// Scene release category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReleaseCategory {
	/// Category name; unique across the catalog.
	pub name: String,
	/// Name of the parent category, if any.
	#[serde(default)]
	pub parent_cat: Option<String>,
}

/// Category catalog with parent links resolved by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryTree {
	categories: Vec<ReleaseCategory>,
	by_name: BTreeMap<String, usize>,
}
impl CategoryTree {
	/// Indexes `categories` by name; later duplicates replace earlier ones in the index.
	pub fn new(categories: Vec<ReleaseCategory>) -> Self {
		let by_name = categories
			.iter()
			.enumerate()
			.map(|(index, category)| (category.name.clone(), index))
			.collect();

		Self { categories, by_name }
	}

	/// Looks a category up by name.
	pub fn get(&self, name: &str) -> Option<&ReleaseCategory> {
		self.by_name.get(name).map(|&index| &self.categories[index])
	}

	/// Resolves the parent of `category`; unknown parent names resolve to `None`.
	pub fn parent(&self, category: &ReleaseCategory) -> Option<&ReleaseCategory> {
		self.get(category.parent_cat.as_deref().filter(|name| !name.is_empty())?)
	}

	/// Iterates over categories in service order.
	pub fn iter(&self) -> impl Iterator<Item = &ReleaseCategory> {
		self.categories.iter()
	}

	/// Number of categories.
	pub fn len(&self) -> usize {
		self.categories.len()
	}

	/// Returns true when the catalog is empty.
	pub fn is_empty(&self) -> bool {
		self.categories.is_empty()
	}
}

/// Saved release filter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
	/// Filter identifier.
	pub id: i64,
	/// Display name.
	#[serde(default)]
	pub name: String,
}

/// Result of a proof upload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseAddProof {
	/// URL of the stored proof image.
	#[serde(default)]
	pub proof_url: Option<String>,
	/// Identifiers of the releases the proof was attached to.
	#[serde(default)]
	pub releases: Vec<String>,
}

/// Release search response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseSearchResult {
	/// Total number of hits.
	#[serde(default)]
	pub total: u64,
	/// Scene hits.
	#[serde(default)]
	pub results: Vec<Release>,
	/// P2P hits.
	#[serde(default)]
	pub p2p_results: Vec<P2pRelease>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn size_number_accepts_markers_and_numbers() {
		let sizes: Vec<Size> = serde_json::from_str(
			r#"[{"number":700,"unit":"MB"},{"number":"1400","unit":"MB"},{"number":">=","unit":""},
			{"number":"","unit":"GB"}]"#,
		)
		.expect("Size fixtures should decode.");
		let numbers = sizes.iter().map(|size| size.number).collect::<Vec<_>>();

		assert_eq!(
			numbers,
			[
				SizeNumber::Value(700),
				SizeNumber::Value(1400),
				SizeNumber::GreaterThanOrEquals,
				SizeNumber::Unknown
			]
		);
		assert!(serde_json::from_str::<SizeNumber>(r#""lots""#).is_err());
		assert_eq!(
			serde_json::to_string(&SizeNumber::LessThan).expect("Marker should serialize."),
			r#""<""#
		);
	}

	#[test]
	fn category_parents_resolve_by_name() {
		let tree = CategoryTree::new(vec![
			ReleaseCategory { name: "MOVIES".into(), parent_cat: None },
			ReleaseCategory { name: "XVID".into(), parent_cat: Some("MOVIES".into()) },
			ReleaseCategory { name: "ORPHAN".into(), parent_cat: Some("GONE".into()) },
		]);
		let xvid = tree.get("XVID").expect("XVID should be indexed.");

		assert_eq!(tree.parent(xvid).map(|parent| parent.name.as_str()), Some("MOVIES"));
		assert!(tree.parent(tree.get("ORPHAN").expect("ORPHAN should be indexed.")).is_none());
		assert!(tree.parent(tree.get("MOVIES").expect("MOVIES should be indexed.")).is_none());
		assert_eq!(tree.len(), 3);
	}

	#[test]
	fn release_decodes_with_sparse_fields() {
		let release: Release = serde_json::from_str(
			r#"{"id":"a1","dirname":"Some.Movie.2024-GRP","time":1700000000,
			"size":{"number":"=","unit":"MB"},"flags":{"english":true},"extra":1}"#,
		)
		.expect("Sparse release should decode.");

		assert_eq!(release.dirname, "Some.Movie.2024-GRP");
		assert_eq!(release.published_at().map(|at| at.year()), Some(2023));
		assert_eq!(release.flags.get("english"), Some(&true));
		assert!(release.ext_info.is_none());
	}
}
