//! Resource owner password credentials (direct authorization for trusted applications).
//!
//! The provider may interrupt the grant with a `need_captcha` or `need_validation` error;
//! retry with [`PasswordParams::with_captcha`] or [`PasswordParams::with_code`] respectively.

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

/// User credentials and retry answers for [`Config::password_credentials`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PasswordParams {
	/// Login (phone number or email).
	pub username: String,
	/// Password; redacted in `Debug` output.
	pub password: String,
	/// Answer to a previous CAPTCHA challenge.
	pub captcha: Option<Captcha>,
	/// Two-factor authentication code.
	pub code: Option<String>,
	/// Announces that the application handles two-factor challenges (`2fa_supported=1`).
	pub two_fa_supported: bool,
	/// Requests the test validation page (`test_redirect_uri=1`).
	pub test_redirect_uri: bool,
}
impl PasswordParams {
	/// Creates parameters for `username`/`password`.
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Self { username: username.into(), password: password.into(), ..Default::default() }
	}

	/// Attaches a CAPTCHA answer.
	pub fn with_captcha(mut self, captcha: Captcha) -> Self {
		self.captcha = Some(captcha);

		self
	}

	/// Attaches a two-factor code.
	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.code = Some(code.into());

		self
	}

	/// Toggles `2fa_supported`.
	pub fn with_two_fa_supported(mut self, supported: bool) -> Self {
		self.two_fa_supported = supported;

		self
	}

	/// Toggles `test_redirect_uri`.
	pub fn with_test_redirect_uri(mut self, test: bool) -> Self {
		self.test_redirect_uri = test;

		self
	}
}
impl Debug for PasswordParams {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PasswordParams")
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.field("captcha", &self.captcha)
			.field("code_set", &self.code.is_some())
			.field("two_fa_supported", &self.two_fa_supported)
			.field("test_redirect_uri", &self.test_redirect_uri)
			.finish()
	}
}

impl Config {
	/// Exchanges user credentials for a token at the password token endpoint.
	///
	/// CAPTCHA and validation challenges surface as [`Error::Provider`]; inspect
	/// [`TokenError::kind`](crate::auth::TokenError::kind) to decide how to retry.
	pub async fn password_credentials(
		&self,
		http: Option<&dyn TokenHttpClient>,
		params: &PasswordParams,
		overrides: &[AuthOption],
	) -> Result<Token> {
		let mut form = common::token_params(self);

		form.set("grant_type", "password")
			.set("username", params.username.as_str())
			.set("password", params.password.as_str());

		if let Some(scope) = Config::scope_param(self.scope) {
			form.set("scope", scope);
		}
		if params.test_redirect_uri {
			form.set("test_redirect_uri", "1");
		}

		Captcha::write(params.captcha.as_ref(), &mut form);

		if let Some(code) = params.code.as_deref().filter(|code| !code.is_empty()) {
			form.set("code", code);
		}
		if params.two_fa_supported {
			form.set("2fa_supported", "1");
		}

		form.apply(overrides);

		common::observe(
			FlowKind::Password,
			"password_credentials",
			common::request_token(http, "password token", &self.endpoint.password_token_url, form),
		)
		.await
	}
}
