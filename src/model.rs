//! Response payloads returned by the service.
//!
//! Types are deliberately lenient: every field the service may omit is optional or defaulted,
//! and unknown fields are ignored so additive API changes never break decoding.

pub mod comment;
pub mod ext_info;
pub mod favorite;
pub mod p2p;
pub mod release;
pub mod user;

pub use comment::*;
pub use ext_info::*;
pub use favorite::*;
pub use p2p::*;
pub use release::*;
pub use user::*;

// self
use crate::_prelude::*;

/// Pagination block attached to list responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
	/// Page returned by the service.
	#[serde(default)]
	pub current_page: u32,
	/// Page size applied by the service.
	#[serde(default)]
	pub per_page: u32,
	/// Number of pages available.
	#[serde(default)]
	pub total_pages: u64,
}

/// One page of a paginated list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaginationList<T> {
	/// Total number of entries across all pages.
	#[serde(default)]
	pub total_count: u64,
	/// Page metadata.
	#[serde(default)]
	pub pagination: Pagination,
	/// Entries on this page.
	#[serde(default = "Vec::new")]
	pub list: Vec<T>,
}
impl<T> PaginationList<T> {
	/// Returns true when another page follows this one.
	pub fn has_next_page(&self) -> bool {
		u64::from(self.pagination.current_page) < self.pagination.total_pages
	}
}

pub(crate) fn epoch_to_datetime(seconds: Option<i64>) -> Option<OffsetDateTime> {
	OffsetDateTime::from_unix_timestamp(seconds?).ok()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn decodes_partial_pages() {
		let page: PaginationList<Filter> = serde_json::from_str(
			r#"{"total_count":12,"pagination":{"current_page":1,"per_page":5,"total_pages":3},
			"list":[{"id":1,"name":"HD"}],"unknown":true}"#,
		)
		.expect("Page fixture should decode.");

		assert_eq!(page.total_count, 12);
		assert_eq!(page.list, [Filter { id: 1, name: "HD".into() }]);
		assert!(page.has_next_page());

		let empty: PaginationList<Filter> =
			serde_json::from_str("{}").expect("Empty page should decode.");

		assert!(empty.list.is_empty());
		assert!(!empty.has_next_page());
	}
}
