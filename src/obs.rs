//! Optional observability helpers for VK OAuth flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `vk_oauth.flow` with the `flow` (grant)
//!   and `stage` (call site) fields.
//! - Enable `metrics` to increment the `vk_oauth_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Flow kinds observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Authorization URL for the code flow.
	AuthorizationCode,
	/// Authorization URL and redirect parsing for the implicit flow.
	Implicit,
	/// Authorization code exchange.
	CodeExchange,
	/// Resource owner password credentials.
	Password,
	/// Client credentials (service token).
	ClientCredentials,
	/// Session extension.
	ExtendSid,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::AuthorizationCode => "authorization_code",
			FlowKind::Implicit => "implicit",
			FlowKind::CodeExchange => "code_exchange",
			FlowKind::Password => "password",
			FlowKind::ClientCredentials => "client_credentials",
			FlowKind::ExtendSid => "extend_sid",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a flow.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}

	/// Terminal outcome of `result`.
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure }
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn labels_are_stable() {
		assert_eq!(FlowKind::ExtendSid.to_string(), "extend_sid");
		assert_eq!(FlowKind::CodeExchange.as_str(), "code_exchange");
		assert_eq!(FlowOutcome::of(&Ok::<_, ()>(1)), FlowOutcome::Success);
		assert_eq!(FlowOutcome::of(&Err::<(), _>(())), FlowOutcome::Failure);
	}
}
