//! Result parsing for token endpoint responses and redirect parameters.
//!
//! Both variants converge on the same model: a [`Token`](crate::auth::Token) on success or a
//! [`TokenError`](crate::auth::TokenError) when the provider reported a failure.
//!
//! - [`json`] handles token endpoint responses (status code + JSON body).
//! - [`fragment`] handles redirect parameters, i.e. the decoded `#fragment` of an implicit flow
//!   redirect or the query of an authorization code redirect.
//!
//! Field names are classified once by [`classify_field`]: the primary token key, group token
//! keys (`access_token_<group_id>`), a few well-known scalars, and everything else. All fields
//! end up in the token's raw map regardless of their class.

pub mod fragment;
pub mod json;

pub use fragment::*;
pub use json::*;

// self
use crate::{_prelude::*, error::ParseError};

/// Key of the primary access token.
pub const ACCESS_TOKEN: &str = "access_token";

const GROUP_TOKEN_PREFIX: &str = "access_token_";

/// Role of a response field, derived from its name alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind<'a> {
	/// `access_token`.
	AccessToken,
	/// `access_token_<suffix>`; the suffix should be a group id.
	GroupToken(&'a str),
	/// `expires_in`.
	ExpiresIn,
	/// `user_id`.
	UserId,
	/// `state`.
	State,
	/// `error`.
	Error,
	/// `error_description`.
	ErrorDescription,
	/// Anything else.
	Other,
}

/// Classifies a response field name.
pub fn classify_field(key: &str) -> FieldKind<'_> {
	match key {
		ACCESS_TOKEN => FieldKind::AccessToken,
		"expires_in" => FieldKind::ExpiresIn,
		"user_id" => FieldKind::UserId,
		"state" => FieldKind::State,
		"error" => FieldKind::Error,
		"error_description" => FieldKind::ErrorDescription,
		_ => match key.strip_prefix(GROUP_TOKEN_PREFIX) {
			Some(suffix) => FieldKind::GroupToken(suffix),
			None => FieldKind::Other,
		},
	}
}

/// Absolute instant `seconds` after now.
pub(crate) fn expiry_after(seconds: i64) -> Result<OffsetDateTime, ParseError> {
	OffsetDateTime::now_utc()
		.checked_add(Duration::seconds(seconds))
		.ok_or(ParseError::ExpiresInOutOfRange { seconds })
}
