//! Rate-limit bookkeeping fed by the response interceptor.
//!
//! The service reports its hourly budget through `X-RateLimit-*` headers. Every response that
//! passes through the interceptor updates one [`RateLimitTracker`] owned by the transport; the
//! tracker is last-write-wins and offers no ordering guarantee across concurrent requests.

// crates.io
use oauth2::http::HeaderMap;
// self
use crate::_prelude::*;

/// Header carrying the request budget for the current window.
pub const HEADER_LIMIT: &str = "x-ratelimit-limit";
/// Header carrying the requests left in the current window.
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";
/// Header carrying the window reset instant in UTC epoch seconds.
pub const HEADER_RESET: &str = "x-ratelimit-reset";

/// Point-in-time copy of the rate-limit state.
///
/// Every field starts at [`RateLimitSnapshot::UNKNOWN`] until a response reports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitSnapshot {
	/// Maximum number of requests permitted per window.
	pub limit: i64,
	/// Requests remaining in the current window.
	pub remaining: i64,
	/// Window reset instant in UTC epoch seconds.
	pub reset: i64,
	/// Status code of the most recently completed response.
	pub status: i64,
}
impl RateLimitSnapshot {
	/// Sentinel for values that have not been observed yet.
	pub const UNKNOWN: i64 = -1;

	/// Returns the reset instant when known and representable.
	pub fn reset_at(&self) -> Option<OffsetDateTime> {
		if self.reset == Self::UNKNOWN {
			return None;
		}

		OffsetDateTime::from_unix_timestamp(self.reset).ok()
	}

	/// Returns true once a window is known to be exhausted.
	pub fn is_exhausted(&self) -> bool {
		self.remaining == 0
	}
}
impl Default for RateLimitSnapshot {
	fn default() -> Self {
		Self {
			limit: Self::UNKNOWN,
			remaining: Self::UNKNOWN,
			reset: Self::UNKNOWN,
			status: Self::UNKNOWN,
		}
	}
}

/// Shared, mutable rate-limit state; cloning yields a handle to the same state.
#[derive(Clone, Debug, Default)]
pub struct RateLimitTracker(Arc<RwLock<RateLimitSnapshot>>);
impl RateLimitTracker {
	/// Returns a copy of the current state.
	pub fn snapshot(&self) -> RateLimitSnapshot {
		*self.0.read()
	}

	/// Applies the status code and any parsable rate-limit headers of a response.
	///
	/// Headers that are absent or not integers leave the previous value in place.
	pub fn observe(&self, status: u16, headers: &HeaderMap) {
		let limit = header_i64(headers, HEADER_LIMIT);
		let remaining = header_i64(headers, HEADER_REMAINING);
		let reset = header_i64(headers, HEADER_RESET);
		let mut state = self.0.write();

		state.status = i64::from(status);

		if let Some(value) = limit {
			state.limit = value;
		}
		if let Some(value) = remaining {
			state.remaining = value;
		}
		if let Some(value) = reset {
			state.reset = value;
		}

		#[cfg(feature = "tracing")]
		if limit.is_some() || remaining.is_some() || reset.is_some() {
			tracing::debug!(
				limit = state.limit,
				remaining = state.remaining,
				reset = state.reset,
				"rate limit updated"
			);
		}
	}
}

fn header_i64(headers: &HeaderMap, name: &str) -> Option<i64> {
	headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::{HeaderName, HeaderValue};
	// self
	use super::*;

	fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
		let mut map = HeaderMap::new();

		for &(name, value) in pairs {
			let name = HeaderName::from_bytes(name.as_bytes())
				.expect("Header name fixture should be valid.");

			map.insert(name, HeaderValue::from_static(value));
		}

		map
	}

	#[test]
	fn starts_unknown() {
		let snapshot = RateLimitTracker::default().snapshot();

		assert_eq!(snapshot.limit, RateLimitSnapshot::UNKNOWN);
		assert_eq!(snapshot.remaining, RateLimitSnapshot::UNKNOWN);
		assert_eq!(snapshot.reset, RateLimitSnapshot::UNKNOWN);
		assert_eq!(snapshot.status, RateLimitSnapshot::UNKNOWN);
		assert!(snapshot.reset_at().is_none());
	}

	#[test]
	fn absent_headers_keep_previous_values() {
		let tracker = RateLimitTracker::default();

		tracker.observe(
			200,
			&headers(&[
				("X-RateLimit-Limit", "100"),
				("X-RateLimit-Remaining", "42"),
				("X-RateLimit-Reset", "1700000000"),
			]),
		);
		tracker.observe(404, &HeaderMap::new());

		let snapshot = tracker.snapshot();

		assert_eq!(snapshot.limit, 100);
		assert_eq!(snapshot.remaining, 42);
		assert_eq!(snapshot.reset, 1_700_000_000);
		assert_eq!(snapshot.status, 404);
		assert_eq!(snapshot.reset_at().map(|at| at.unix_timestamp()), Some(1_700_000_000));
	}

	#[test]
	fn unparsable_headers_are_ignored_individually() {
		let tracker = RateLimitTracker::default();

		tracker.observe(200, &headers(&[("X-RateLimit-Limit", "300")]));
		tracker.observe(
			200,
			&headers(&[("X-RateLimit-Limit", "lots"), ("X-RateLimit-Remaining", "0")]),
		);

		let snapshot = tracker.snapshot();

		assert_eq!(snapshot.limit, 300);
		assert_eq!(snapshot.remaining, 0);
		assert!(snapshot.is_exhausted());
	}

	#[test]
	fn clones_share_state() {
		let tracker = RateLimitTracker::default();
		let clone = tracker.clone();

		clone.observe(201, &HeaderMap::new());

		assert_eq!(tracker.snapshot().status, 201);
	}
}
