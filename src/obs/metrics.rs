// self
use crate::obs::{FlowKind, FlowOutcome};

/// Counter incremented once per flow attempt and once per terminal outcome.
pub const FLOW_TOTAL: &str = "vk_oauth_flow_total";

/// Registers the counter description with the installed recorder.
///
/// Call once after installing a recorder; counters work without it, exporters just lack the
/// help text.
pub fn describe_metrics() {
	#[cfg(feature = "metrics")]
	metrics::describe_counter!(FLOW_TOTAL, "VK OAuth flow attempts and outcomes by flow.");
}

/// Increments [`FLOW_TOTAL`] for `kind` and `outcome` when the `metrics` feature is enabled.
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(FLOW_TOTAL, "flow" => kind.as_str(), "outcome" => outcome.as_str())
		.increment(1);

	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}
