// self
use crate::{_prelude::*, obs::RequestOutcome};

/// Future returned by [`RequestSpan::instrument`]; a plain passthrough without `tracing`.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`RequestSpan::instrument`]; a plain passthrough without `tracing`.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// `xrel_client.request` span covering one facade operation.
///
/// The span carries the endpoint `operation` label, the `stage` it was opened from, and an
/// `outcome` field that stays empty until [`RequestSpan::record_outcome`] fills it in.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Opens a span for `operation` at `stage`.
	pub fn new(operation: &'static str, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"xrel_client.request",
				operation,
				stage,
				outcome = tracing::field::Empty
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, stage);

			Self {}
		}
	}

	/// Stores the terminal outcome on the span.
	pub fn record_outcome(&self, outcome: RequestOutcome) {
		#[cfg(feature = "tracing")]
		self.span.record("outcome", outcome.as_str());
		#[cfg(not(feature = "tracing"))]
		let _ = outcome;
	}

	/// Enters the span for a synchronous operation such as building the consent URL.
	pub fn entered(self) -> RequestSpanGuard {
		#[cfg(feature = "tracing")]
		{
			RequestSpanGuard { _guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			RequestSpanGuard {}
		}
	}

	/// Attaches the span to an async operation.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Keeps a [`RequestSpan`] entered until dropped.
pub struct RequestSpanGuard {
	#[cfg(feature = "tracing")]
	_guard: tracing::span::EnteredSpan,
}
impl Debug for RequestSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RequestSpanGuard(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn consent_url_span_can_be_entered_and_tagged() {
		let span = RequestSpan::new("authorization_url", "build");

		span.record_outcome(RequestOutcome::Success);

		let _guard = span.entered();
	}

	#[cfg(feature = "tracing")]
	#[tokio::test]
	async fn instrumented_operation_yields_its_value() {
		let span = RequestSpan::new("release_latest", "call");
		let value = span.instrument(async { 42 }).await;

		span.record_outcome(RequestOutcome::Success);

		assert_eq!(value, 42);
	}
}
