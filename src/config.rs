//! Client configuration shared by every flow.
//!
//! A [`Config`] is immutable once built; flows borrow it and never mutate it, so a single
//! instance can serve concurrent requests. All fields are serde-friendly so the configuration
//! can be loaded from a file or environment-backed source.

// crates.io
use oauth2::{ClientId, ClientSecret};
// self
use crate::{_prelude::*, auth::Scope};

/// API version sent when [`Config::version`] is unset.
pub const DEFAULT_VERSION: &str = "5.131";
/// Authorization endpoint.
pub const AUTH_URL: &str = "https://oauth.vk.com/authorize";
/// Token endpoint used by the code exchange and client credentials flows.
pub const TOKEN_URL: &str = "https://oauth.vk.com/access_token";
/// Token endpoint used by the password and session extension flows.
pub const PASSWORD_TOKEN_URL: &str = "https://oauth.vk.com/token";

/// Endpoint set used by the flows.
///
/// URLs are validated lazily: build flows append to them as-is, exchanges parse them and
/// report [`ConfigError::InvalidEndpoint`](crate::error::ConfigError::InvalidEndpoint).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoint {
	/// Authorization URL.
	pub auth_url: String,
	/// Token URL for code exchanges and service tokens.
	pub token_url: String,
	/// Token URL for password grants and session extension.
	pub password_token_url: String,
}
impl Endpoint {
	/// Points every endpoint at `url`; handy for mock servers and proxies.
	pub fn uniform(url: impl Into<String>) -> Self {
		let url = url.into();

		Self { auth_url: url.clone(), token_url: url.clone(), password_token_url: url }
	}
}
impl Default for Endpoint {
	fn default() -> Self {
		Self {
			auth_url: AUTH_URL.into(),
			token_url: TOKEN_URL.into(),
			password_token_url: PASSWORD_TOKEN_URL.into(),
		}
	}
}

/// Application credentials and request defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
	/// Application identifier.
	pub client_id: ClientId,
	/// Application secret; sent as an empty value when unset.
	#[serde(default)]
	pub client_secret: Option<ClientSecret>,
	/// API version; [`DEFAULT_VERSION`] when unset.
	#[serde(default)]
	pub version: Option<String>,
	/// Provider endpoints.
	#[serde(default)]
	pub endpoint: Endpoint,
	/// Requested permissions; omitted from requests when empty.
	#[serde(default)]
	pub scope: Scope,
	/// Redirect URI registered for the application.
	#[serde(default)]
	pub redirect_uri: String,
}
impl Config {
	/// Creates a configuration with default endpoints and version.
	pub fn new(client_id: impl Into<String>) -> Self {
		Self {
			client_id: ClientId::new(client_id.into()),
			client_secret: None,
			version: None,
			endpoint: Endpoint::default(),
			scope: Scope::NONE,
			redirect_uri: String::new(),
		}
	}

	/// Sets the application secret.
	pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(ClientSecret::new(secret.into()));

		self
	}

	/// Pins the API version.
	pub fn with_version(mut self, version: impl Into<String>) -> Self {
		self.version = Some(version.into());

		self
	}

	/// Replaces the endpoint set.
	pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
		self.endpoint = endpoint;

		self
	}

	/// Sets the requested permissions.
	pub fn with_scope(mut self, scope: Scope) -> Self {
		self.scope = scope;

		self
	}

	/// Sets the redirect URI.
	pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
		self.redirect_uri = redirect_uri.into();

		self
	}

	/// API version sent with every request.
	pub fn version(&self) -> &str {
		self.version.as_deref().filter(|version| !version.is_empty()).unwrap_or(DEFAULT_VERSION)
	}

	/// Application secret as sent on the wire.
	pub(crate) fn client_secret_str(&self) -> &str {
		self.client_secret.as_ref().map(|secret| secret.secret().as_str()).unwrap_or_default()
	}

	/// Decimal scope parameter, or `None` when no scope is requested.
	pub(crate) fn scope_param(scope: Scope) -> Option<String> {
		(!scope.is_empty()).then(|| scope.to_string())
	}
}
