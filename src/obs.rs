//! Optional observability helpers for facade operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `xrel_client.request` with the `operation`
//!   (endpoint label), `stage` (call site) and `outcome` fields.
//! - Enable `metrics` to increment the `xrel_client_request_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to a facade operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs one facade operation inside a [`RequestSpan`] and records its outcome.
pub(crate) async fn observe<T, Fut>(operation: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = RequestSpan::new(operation, "call");

	record_request_outcome(operation, RequestOutcome::Attempt);

	let result = span.instrument(fut).await;

	let outcome = match &result {
		Ok(_) => RequestOutcome::Success,
		Err(_e) => {
			#[cfg(feature = "tracing")]
			::tracing::debug!(operation, error = %_e, "operation failed");

			RequestOutcome::Failure
		},
	};

	span.record_outcome(outcome);
	record_request_outcome(operation, outcome);

	result
}
