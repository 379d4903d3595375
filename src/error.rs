//! Crate-level error types shared across flows, parsers, and transports.

// self
use crate::{_prelude::*, auth::TokenError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// Callers branch on the variant to decide remediation: [`Error::Transport`] means the
/// provider was never reached, while [`Error::Provider`] carries the structured answer (for
/// example a CAPTCHA challenge or a validation redirect) that the provider sent back.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response or redirect parameters could not be parsed.
	#[error(transparent)]
	Parse(#[from] ParseError),
	/// Provider reported an error document.
	#[error(transparent)]
	Provider(#[from] Box<TokenError>),

	/// Redirect query carries neither an error nor an authorization code.
	#[error("Redirect query does not contain an authorization code.")]
	MissingCode,
}
impl Error {
	/// Returns the provider error document, if this is a [`Error::Provider`] failure.
	pub fn as_token_error(&self) -> Option<&TokenError> {
		match self {
			Self::Provider(err) => Some(err),
			_ => None,
		}
	}

	/// Returns true when the failure happened below HTTP (network or I/O).
	pub fn is_transport(&self) -> bool {
		matches!(self, Self::Transport(_))
	}
}
impl From<TokenError> for Error {
	fn from(e: TokenError) -> Self {
		Self::Provider(Box::new(e))
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// An endpoint URL cannot be parsed.
	#[error("The {endpoint} endpoint is not a valid URL.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// No transport was supplied and the crate was built without a default one.
	#[error("No HTTP transport supplied and the `reqwest` feature is disabled.")]
	MissingTransport,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Malformed token responses and redirect parameters.
#[derive(Debug, ThisError)]
pub enum ParseError {
	/// A group token key carries a non-numeric suffix.
	#[error("Group token key `{key}` does not end with a numeric group id.")]
	InvalidGroupId {
		/// The offending parameter name.
		key: String,
		/// Integer parsing failure.
		#[source]
		source: ParseIntError,
	},
	/// The `expires_in` parameter is not an integer.
	#[error("The expires_in value `{value}` is not an integer.")]
	InvalidExpiresIn {
		/// Raw parameter value.
		value: String,
		/// Integer parsing failure.
		#[source]
		source: ParseIntError,
	},
	/// The `user_id` parameter is not an integer.
	#[error("The user_id value `{value}` is not an integer.")]
	InvalidUserId {
		/// Raw parameter value.
		value: String,
		/// Integer parsing failure.
		#[source]
		source: ParseIntError,
	},
	/// The `expires_in` value pushes the expiry outside the representable range.
	#[error("The expires_in value {seconds} exceeds the supported range.")]
	ExpiresInOutOfRange {
		/// Raw number of seconds.
		seconds: i64,
	},
	/// Token endpoint responded with a success status but a malformed JSON document.
	#[error("Token endpoint returned malformed JSON.")]
	TokenBody {
		/// Structured parsing failure, including the JSON path of the bad field.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}
