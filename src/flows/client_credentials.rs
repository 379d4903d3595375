//! Client Credentials flow: application (service) tokens.

// self
use crate::{
	_prelude::*,
	auth::Token,
	config::Config,
	flows::common,
	http::TokenHttpClient,
	obs::FlowKind,
	query::AuthOption,
};

impl Config {
	/// Requests a service token with `grant_type=client_credentials` at the token endpoint.
	///
	/// Service tokens never carry a user id and usually do not expire.
	pub async fn service_token(
		&self,
		http: Option<&dyn TokenHttpClient>,
		overrides: &[AuthOption],
	) -> Result<Token> {
		let mut params = common::token_params(self);

		params.set("grant_type", "client_credentials");
		params.apply(overrides);

		common::observe(
			FlowKind::ClientCredentials,
			"service_token",
			common::request_token(http, "token", &self.endpoint.token_url, params),
		)
		.await
	}
}
