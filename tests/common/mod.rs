//! Shared fixtures for integration tests.

#![allow(dead_code)]

// std
use std::sync::atomic::{AtomicUsize, Ordering};
// crates.io
use httpmock::MockServer;
// self
use vk_oauth::{
	auth::scope,
	config::{Config, Endpoint},
	http::{HttpRequest, ReqwestHttpClient, TokenHttpClient, TransportFuture},
};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";
pub const USER_TOKEN: &str = "533bacf01e11f55b536a565b57531ac114461ae8736d6506a3";
pub const GROUP_TOKEN: &str = "a740d2bfe91caaa6eab794e1168da38cdaedc93c92f233638f";

/// Configuration whose endpoints all point at `server`.
pub fn config(server: &MockServer) -> Config {
	config_for(server.base_url())
}

/// Configuration whose endpoints all point at `base`.
pub fn config_for(base: impl Into<String>) -> Config {
	Config::new("CLIENT_ID")
		.with_client_secret("CLIENT_SECRET")
		.with_version("VERSION")
		.with_scope(scope::user::WALL | scope::group::STORIES)
		.with_redirect_uri("REDIRECT_URI")
		.with_endpoint(Endpoint::uniform(base))
}

/// Reqwest transport that counts the requests it forwards.
#[derive(Debug)]
pub struct CountingTransport {
	inner: ReqwestHttpClient,
	calls: AtomicUsize,
}
impl CountingTransport {
	pub fn new() -> Self {
		Self {
			inner: ReqwestHttpClient::new().expect("Reqwest client should build for tests."),
			calls: AtomicUsize::new(0),
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl TokenHttpClient for CountingTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		self.inner.execute(request)
	}
}
