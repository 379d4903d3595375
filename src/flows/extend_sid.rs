//! Session extension: finishes an interrupted registration or login with `sid` + `hash`.

// self
use crate::{
	_prelude::*,
	auth::Token,
	config::Config,
	flows::common::{self, Captcha},
	http::TokenHttpClient,
	obs::FlowKind,
	query::AuthOption,
};

/// Intermediate session returned by a registration or validation step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidParams {
	/// Session identifier.
	pub sid: String,
	/// Session hash.
	pub hash: String,
	/// Answer to a previous CAPTCHA challenge.
	pub captcha: Option<Captcha>,
}
impl SidParams {
	/// Creates parameters for the given session.
	pub fn new(sid: impl Into<String>, hash: impl Into<String>) -> Self {
		Self { sid: sid.into(), hash: hash.into(), captcha: None }
	}

	/// Attaches a CAPTCHA answer.
	pub fn with_captcha(mut self, captcha: Captcha) -> Self {
		self.captcha = Some(captcha);

		self
	}
}

impl Config {
	/// Trades an intermediate session for a token with `grant_type=extend_sid` at the password
	/// token endpoint.
	pub async fn extend_sid(
		&self,
		http: Option<&dyn TokenHttpClient>,
		params: &SidParams,
		overrides: &[AuthOption],
	) -> Result<Token> {
		let mut form = common::token_params(self);

		form.set("grant_type", "extend_sid");

		if let Some(scope) = Config::scope_param(self.scope) {
			form.set("scope", scope);
		}

		Captcha::write(params.captcha.as_ref(), &mut form);
		form.set("sid", params.sid.as_str()).set("hash", params.hash.as_str());
		form.apply(overrides);

		common::observe(
			FlowKind::ExtendSid,
			"extend_sid",
			common::request_token(http, "password token", &self.endpoint.password_token_url, form),
		)
		.await
	}
}
