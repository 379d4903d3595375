//! VK access token string that stays out of logs.

// self
use crate::_prelude::*;

/// Access token issued by VK for a user, an application, or a community.
///
/// `Debug` and `Display` print `<redacted>`, so a [`Token`](crate::auth::Token) can be logged
/// as a whole. Serde keeps the plain string so callers can persist tokens themselves.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps an `access_token` value.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Token string to pass as `access_token` in API calls.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Unwraps the token string.
	pub fn into_inner(self) -> String {
		self.0
	}

	/// Whether the redirect or response carried no user or application token.
	///
	/// Community grants deliver their tokens in [`Token::groups`](crate::auth::Token::groups)
	/// and leave this empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl From<String> for TokenSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for TokenSecret {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const USER_TOKEN: &str = "533bacf01e11f55b536a565b57531ac114461ae8736d6506a3";

	#[test]
	fn formatters_hide_the_access_token() {
		let token = TokenSecret::new(USER_TOKEN);

		assert_eq!(format!("{token:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{token}"), "<redacted>");
		assert!(!format!("{token:?}{token}").contains(USER_TOKEN));
		assert!(!token.is_empty());
		assert!(TokenSecret::default().is_empty());
	}

	#[test]
	fn serde_keeps_the_plain_token_for_storage() {
		let token = TokenSecret::from(USER_TOKEN);
		let json = serde_json::to_string(&token).expect("Token should serialize.");

		assert_eq!(json, format!("\"{USER_TOKEN}\""));

		let restored =
			serde_json::from_str::<TokenSecret>(&json).expect("Stored token should deserialize.");

		assert_eq!(restored, TokenSecret::from(USER_TOKEN.to_owned()));
		assert_eq!(restored.into_inner(), USER_TOKEN);
	}
}
