//! Implicit flow: authorize URL and fragment parsing.

// self
use crate::{
	_prelude::*,
	auth::Token,
	config::Config,
	flows::common::{self, AuthParams},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	parse,
	query::AuthOption,
};

impl Config {
	/// Builds the URL that starts the Implicit flow.
	///
	/// The token is delivered in the fragment of the redirect URL; feed it to
	/// [`Config::implicit_flow_result`].
	pub fn implicit_flow_auth_url(&self, params: &AuthParams, overrides: &[AuthOption]) -> String {
		let _span = FlowSpan::new(FlowKind::Implicit, "implicit_flow_auth_url").entered();

		common::auth_url(self, "token", params, overrides)
	}

	/// Parses the redirect fragment (with or without the leading `#`).
	pub fn implicit_flow_result(&self, fragment: &str) -> Result<Token> {
		let span = FlowSpan::new(FlowKind::Implicit, "implicit_flow_result");
		let result = span.in_scope(|| parse::token_from_fragment(fragment));
		let outcome = FlowOutcome::of(&result);

		span.record_outcome(outcome);
		obs::record_flow_outcome(FlowKind::Implicit, outcome);

		result
	}

	/// Parses the fragment of a full redirect URL.
	///
	/// A URL without a fragment yields an empty token.
	pub fn implicit_flow_result_from_url(&self, url: &Url) -> Result<Token> {
		self.implicit_flow_result(url.fragment().unwrap_or_default())
	}
}
