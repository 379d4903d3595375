//! Transport primitives for token exchanges.
//!
//! The module exposes [`TokenHttpClient`], the only dependency the exchange flows have on an
//! HTTP stack. Every exchange takes an optional `&dyn TokenHttpClient`; passing `None` falls
//! back to the process-wide reqwest transport returned by [`default_http_client`]. Requests
//! and responses use the `oauth2` crate's [`HttpRequest`]/[`HttpResponse`] aliases so
//! existing `http`-based clients plug in without conversion layers.

// std
#[cfg(feature = "reqwest")] use std::{ops::Deref, sync::OnceLock};
// crates.io
pub use oauth2::{HttpRequest, HttpResponse};
use oauth2::http::HeaderMap;
#[cfg(feature = "reqwest")] use reqwest::redirect::Policy;
// self
use crate::{_prelude::*, error::TransportError};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`TokenHttpClient::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing token exchanges.
///
/// Implementations receive a fully-built `POST` request (URL without query, form body,
/// content-type header) and return the raw response regardless of its status code; status
/// interpretation happens in [`parse`](crate::parse). Only network or I/O failures should be
/// reported as [`TransportError`]. The trait is object safe so flows can accept
/// `Option<&dyn TokenHttpClient>` without generic plumbing.
pub trait TokenHttpClient
where
	Self: Send + Sync,
{
	/// Sends `request` and resolves to the provider's response.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// Captures metadata from the HTTP response that produced a provider error.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadata {
	/// HTTP status code returned by the token endpoint.
	pub status: u16,
	/// Response headers.
	pub headers: HeaderMap,
}
impl ResponseMetadata {
	/// Copies status and headers out of a response.
	pub fn from_response(response: &HttpResponse) -> Self {
		Self { status: response.status().as_u16(), headers: response.headers().clone() }
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Token requests should not follow redirects: the provider answers token calls directly.
/// [`ReqwestHttpClient::new`] disables redirect following; configure any custom client
/// passed to [`ReqwestHttpClient::with_client`] the same way.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client with redirect following disabled.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let request = reqwest::Request::try_from(request)?;
			let response = self.0.execute(request).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = HttpResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Returns the process-wide transport used when a flow receives no explicit client.
///
/// The client is built on first use and shared afterwards.
#[cfg(feature = "reqwest")]
pub fn default_http_client() -> Result<&'static ReqwestHttpClient, ConfigError> {
	static DEFAULT: OnceLock<ReqwestHttpClient> = OnceLock::new();

	if let Some(client) = DEFAULT.get() {
		return Ok(client);
	}

	let client = ReqwestHttpClient::new()?;

	Ok(DEFAULT.get_or_init(|| client))
}
