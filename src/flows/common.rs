//! Shared helpers for flow implementations (authorize URLs, token requests, captcha answers).

// crates.io
use oauth2::http::{Method, Request, header::CONTENT_TYPE};
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	auth::Token,
	config::Config,
	error::ConfigError,
	http::TokenHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	parse,
	query::{AuthOption, QueryParams},
};

const STATE_LEN: usize = 32;
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Layout of the authorization page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStyle {
	/// Full browser page.
	#[default]
	Page,
	/// Popup window.
	Popup,
	/// Mobile layout without JavaScript.
	Mobile,
}
impl DisplayStyle {
	/// Wire value of the `display` parameter.
	pub const fn as_str(self) -> &'static str {
		match self {
			DisplayStyle::Page => "page",
			DisplayStyle::Popup => "popup",
			DisplayStyle::Mobile => "mobile",
		}
	}
}
impl Display for DisplayStyle {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Optional authorize URL parameters shared by the code and implicit flows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthParams {
	/// Opaque value echoed back on redirect; used for CSRF protection.
	pub state: Option<String>,
	/// Forces the consent screen even if the rights were granted before.
	pub revoke: bool,
	/// Communities to request tokens for.
	pub group_ids: Vec<i64>,
	/// Page layout.
	pub display: Option<DisplayStyle>,
}
impl AuthParams {
	/// Sets the `state` value.
	pub fn with_state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Generates a random 32-character alphanumeric `state`.
	pub fn with_random_state(self) -> Self {
		self.with_state(random_string(STATE_LEN))
	}

	/// Toggles forced re-consent.
	pub fn with_revoke(mut self, revoke: bool) -> Self {
		self.revoke = revoke;

		self
	}

	/// Requests community tokens for `group_ids`.
	pub fn with_group_ids(mut self, group_ids: impl IntoIterator<Item = i64>) -> Self {
		self.group_ids = group_ids.into_iter().collect();

		self
	}

	/// Sets the page layout.
	pub fn with_display(mut self, display: DisplayStyle) -> Self {
		self.display = Some(display);

		self
	}
}

/// Answer to a CAPTCHA challenge (`need_captcha`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Captcha {
	/// `captcha_sid` from the challenge.
	pub sid: String,
	/// Text the user read from the image.
	pub key: String,
}
impl Captcha {
	/// Pairs a challenge identifier with the user's answer.
	pub fn new(sid: impl Into<String>, key: impl Into<String>) -> Self {
		Self { sid: sid.into(), key: key.into() }
	}

	/// Adds `captcha_key` and `captcha_sid` when an answer was given.
	pub(crate) fn write(captcha: Option<&Self>, params: &mut QueryParams) {
		if let Some(captcha) = captcha.filter(|captcha| !captcha.key.is_empty()) {
			params.set("captcha_key", captcha.key.as_str()).set("captcha_sid", captcha.sid.as_str());
		}
	}
}

/// Builds an authorize URL for `response_type`.
pub(crate) fn auth_url(
	config: &Config,
	response_type: &str,
	params: &AuthParams,
	overrides: &[AuthOption],
) -> String {
	let mut query = QueryParams::new();

	if let Some(display) = params.display {
		query.set("display", display.as_str());
	}

	query.set("v", config.version());

	if let Some(scope) = Config::scope_param(config.scope) {
		query.set("scope", scope);
	}

	query
		.set("redirect_uri", config.redirect_uri.as_str())
		.set("client_id", config.client_id.as_str())
		.set("response_type", response_type);

	if let Some(state) = params.state.as_deref().filter(|state| !state.is_empty()) {
		query.set("state", state);
	}
	if params.revoke {
		query.set("revoke", "1");
	}
	if !params.group_ids.is_empty() {
		let ids = params.group_ids.iter().map(i64::to_string).collect::<Vec<_>>();

		query.set("group_ids", ids.join(","));
	}

	query.apply(overrides);
	query.append_to(&config.endpoint.auth_url)
}

/// Client authentication and version parameters present in every token request.
pub(crate) fn token_params(config: &Config) -> QueryParams {
	let mut params = QueryParams::new();

	params
		.set("client_id", config.client_id.as_str())
		.set("client_secret", config.client_secret_str())
		.set("v", config.version());

	params
}

/// Posts `params` to `endpoint` and parses the answer.
///
/// A query already present on `endpoint` is moved into the form body; keys set by the flow
/// take precedence over it.
pub(crate) async fn request_token(
	http: Option<&dyn TokenHttpClient>,
	endpoint_name: &'static str,
	endpoint: &str,
	mut params: QueryParams,
) -> Result<Token> {
	let mut url = Url::parse(endpoint)
		.map_err(|source| ConfigError::InvalidEndpoint { endpoint: endpoint_name, source })?;

	for (key, value) in url.query_pairs() {
		if params.get(&key).is_none() {
			params.set(key, value);
		}
	}

	url.set_query(None);

	let request = Request::builder()
		.method(Method::POST)
		.uri(url.as_str())
		.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
		.body(params.encode().into_bytes())
		.map_err(ConfigError::from)?;
	let response = resolve_transport(http)?.execute(request).await?;

	parse::token_from_response(&response)
}

/// Runs an exchange inside its flow span and records its outcome.
pub(crate) async fn observe<F>(kind: FlowKind, stage: &'static str, exchange: F) -> Result<Token>
where
	F: Future<Output = Result<Token>>,
{
	let span = FlowSpan::new(kind, stage);

	obs::record_flow_outcome(kind, FlowOutcome::Attempt);

	let result = span.instrument(exchange).await;
	let outcome = FlowOutcome::of(&result);

	span.record_outcome(outcome);
	obs::record_flow_outcome(kind, outcome);

	result
}

fn resolve_transport(
	http: Option<&dyn TokenHttpClient>,
) -> Result<&dyn TokenHttpClient, ConfigError> {
	match http {
		Some(http) => Ok(http),
		#[cfg(feature = "reqwest")]
		None => Ok(crate::http::default_http_client()?),
		#[cfg(not(feature = "reqwest"))]
		None => Err(ConfigError::MissingTransport),
	}
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::Mutex;
	// crates.io
	use oauth2::http::StatusCode;
	// self
	use super::*;
	use crate::{
		auth::scope,
		config::Endpoint,
		error::TransportError,
		http::{HttpRequest, HttpResponse, TransportFuture},
	};

	#[derive(Default)]
	struct RecordingTransport {
		requests: Mutex<Vec<HttpRequest>>,
	}
	impl TokenHttpClient for RecordingTransport {
		fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
			self.requests.lock().expect("Recording lock should not be poisoned.").push(request);

			Box::pin(async {
				let mut response = HttpResponse::new(
					b"{\"access_token\":\"t\",\"user_id\":1,\"expires_in\":0}".to_vec(),
				);

				*response.status_mut() = StatusCode::OK;

				Ok::<_, TransportError>(response)
			})
		}
	}

	fn config() -> Config {
		Config::new("2274003")
			.with_scope(scope::group::PHOTOS | scope::user::WALL)
			.with_redirect_uri("blank.html")
	}

	#[test]
	fn auth_url_sets_only_requested_optionals() {
		let url = auth_url(&config(), "token", &AuthParams::default(), &[]);

		assert_eq!(
			url,
			"https://oauth.vk.com/authorize?client_id=2274003&redirect_uri=blank.html&response_type=token&scope=8196&v=5.131"
		);

		let url = auth_url(
			&config().with_scope(Default::default()),
			"code",
			&AuthParams::default().with_state("").with_display(DisplayStyle::Mobile),
			&[],
		);

		assert_eq!(
			url,
			"https://oauth.vk.com/authorize?client_id=2274003&display=mobile&redirect_uri=blank.html&response_type=code&v=5.131"
		);
	}

	#[test]
	fn random_state_is_alphanumeric() {
		let params = AuthParams::default().with_random_state();
		let state = params.state.expect("Random state should be set.");

		assert_eq!(state.len(), STATE_LEN);
		assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
		assert_ne!(AuthParams::default().with_random_state().state, Some(state));
	}

	#[test]
	fn captcha_requires_an_answer() {
		let mut params = QueryParams::new();

		Captcha::write(Some(&Captcha::new("12345", "")), &mut params);
		Captcha::write(None, &mut params);

		assert!(params.is_empty());

		Captcha::write(Some(&Captcha::new("12345", "abc")), &mut params);

		assert_eq!(params.encode(), "captcha_key=abc&captcha_sid=12345");
	}

	#[test]
	fn token_params_send_empty_secret_when_unset() {
		assert_eq!(token_params(&config()).encode(), "client_id=2274003&client_secret=&v=5.131");
	}

	#[tokio::test]
	async fn request_moves_endpoint_query_into_body() {
		let transport = RecordingTransport::default();
		let mut params = token_params(&config().with_client_secret("s"));

		params.set("grant_type", "client_credentials");

		let token = request_token(
			Some(&transport),
			"token",
			"https://proxy.example/token?v=1.0&tenant=vk",
			params,
		)
		.await
		.expect("Recorded exchange should succeed.");

		assert_eq!(token.access_token.expose(), "t");
		assert_eq!(token.user_id, Some(1));

		let requests = transport.requests.lock().expect("Recording lock should not be poisoned.");
		let request = requests.first().expect("Transport should receive one request.");

		assert_eq!(requests.len(), 1);
		assert_eq!(request.method(), Method::POST);
		assert_eq!(request.uri(), "https://proxy.example/token");
		assert_eq!(
			request.headers().get(CONTENT_TYPE).and_then(|value| value.to_str().ok()),
			Some(FORM_CONTENT_TYPE)
		);
		assert_eq!(
			String::from_utf8_lossy(request.body()),
			"client_id=2274003&client_secret=s&grant_type=client_credentials&tenant=vk&v=5.131"
		);
	}

	#[tokio::test]
	async fn invalid_endpoint_is_a_config_error() {
		let transport = RecordingTransport::default();
		let err = request_token(
			Some(&transport),
			"password token",
			Endpoint::uniform("not a url").password_token_url.as_str(),
			QueryParams::new(),
		)
		.await
		.expect_err("Unparseable endpoints must be rejected.");

		assert!(matches!(
			err,
			Error::Config(ConfigError::InvalidEndpoint { endpoint: "password token", .. })
		));
		assert!(transport.requests.lock().expect("Recording lock should not be poisoned.").is_empty());
	}
}
