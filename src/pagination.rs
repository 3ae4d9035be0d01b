//! Page-size and page-number normalization applied before every paginated list request.

// self
use crate::_prelude::*;

/// Smallest page size the service accepts.
pub const PER_PAGE_MIN: u32 = 5;
/// Largest page size the service accepts.
pub const PER_PAGE_MAX: u32 = 100;

/// Clamps `per_page` into [`PER_PAGE_MIN`]..=[`PER_PAGE_MAX`] and `page` to at least 1.
///
/// Out-of-range inputs are corrected silently; this never fails.
pub fn normalize(per_page: i64, page: i64) -> (u32, u32) {
	let per_page = per_page.clamp(i64::from(PER_PAGE_MIN), i64::from(PER_PAGE_MAX));
	let page = page.clamp(1, i64::from(u32::MAX));

	// Both values were clamped into `u32` range above.
	(per_page as u32, page as u32)
}

/// Caller-supplied pagination request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
	/// Requested page size.
	pub per_page: i64,
	/// Requested page number, starting at 1.
	pub page: i64,
}
impl Page {
	/// Creates a request for `page` with `per_page` items.
	pub fn new(per_page: i64, page: i64) -> Self {
		Self { per_page, page }
	}

	/// Returns the normalized `(per_page, page)` pair.
	pub fn normalized(self) -> (u32, u32) {
		normalize(self.per_page, self.page)
	}

	pub(crate) fn query(self) -> [(&'static str, String); 2] {
		let (per_page, page) = self.normalized();

		[("per_page", per_page.to_string()), ("page", page.to_string())]
	}
}
impl Default for Page {
	fn default() -> Self {
		Self { per_page: 25, page: 1 }
	}
}
