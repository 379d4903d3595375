//! Authorization Code flow: authorize URL, redirect handling, and code exchange.

// self
use crate::{
	_prelude::*,
	auth::Token,
	config::Config,
	flows::common::{self, AuthParams},
	http::TokenHttpClient,
	obs::{FlowKind, FlowSpan},
	parse,
	query::AuthOption,
};

impl Config {
	/// Builds the URL that starts the Authorization Code flow.
	///
	/// After consent the provider redirects to [`Config::redirect_uri`] with a `code` query
	/// parameter; pass it to [`Config::exchange_code`].
	pub fn code_flow_auth_url(&self, params: &AuthParams, overrides: &[AuthOption]) -> String {
		let _span = FlowSpan::new(FlowKind::AuthorizationCode, "code_flow_auth_url").entered();

		common::auth_url(self, "code", params, overrides)
	}

	/// Extracts the authorization code from the redirect query (with or without a leading
	/// `?`).
	///
	/// Provider errors in the query are returned as [`Error::Provider`]; a missing or empty
	/// `code` is [`Error::MissingCode`].
	pub fn result_code(&self, query: &str) -> Result<String> {
		let query = query.strip_prefix('?').unwrap_or(query);

		parse::code_from_query(url::form_urlencoded::parse(query.as_bytes()))
	}

	/// Same as [`Config::result_code`], reading the query of a full redirect URL.
	pub fn result_code_from_url(&self, url: &Url) -> Result<String> {
		parse::code_from_query(url.query_pairs())
	}

	/// Exchanges an authorization code for a token at the token endpoint.
	pub async fn exchange_code(
		&self,
		http: Option<&dyn TokenHttpClient>,
		code: &str,
		overrides: &[AuthOption],
	) -> Result<Token> {
		let mut params = common::token_params(self);

		params.set("code", code).set("redirect_uri", self.redirect_uri.as_str());
		params.apply(overrides);

		common::observe(
			FlowKind::CodeExchange,
			"exchange_code",
			common::request_token(http, "token", &self.endpoint.token_url, params),
		)
		.await
	}
}
