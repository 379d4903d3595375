//! Token endpoint responses: JSON success documents and JSON error documents.

// crates.io
use serde::{Deserializer, de::DeserializeOwned};
// self
use crate::{
	_prelude::*,
	auth::{GroupToken, RawFields, Token, TokenError, TokenSecret},
	error::ParseError,
	http::{HttpResponse, ResponseMetadata},
	parse::{self, FieldKind},
};

/// Success document returned by the token endpoint.
///
/// Every field is optional on the wire; a missing key or an explicit `null` yields the zero
/// value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessTokenResponse {
	/// User or application token.
	#[serde(deserialize_with = "null_as_default")]
	pub access_token: String,
	/// User identifier (`0` for application and community tokens).
	#[serde(deserialize_with = "null_as_default")]
	pub user_id: i64,
	/// Lifetime in seconds; `0` or negative means the token does not expire.
	#[serde(deserialize_with = "null_as_default")]
	pub expires_in: i64,
	/// Community tokens.
	#[serde(deserialize_with = "null_as_default")]
	pub groups: Vec<GroupTokenResponse>,
}
impl AccessTokenResponse {
	/// Absolute expiry computed from [`expires_in`](Self::expires_in).
	pub fn expires_at(&self) -> Result<Option<OffsetDateTime>, ParseError> {
		if self.expires_in <= 0 {
			return Ok(None);
		}

		parse::expiry_after(self.expires_in).map(Some)
	}
}

/// Entry of [`AccessTokenResponse::groups`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupTokenResponse {
	/// Community identifier.
	#[serde(deserialize_with = "null_as_default")]
	pub group_id: i64,
	/// Token scoped to the community.
	#[serde(deserialize_with = "null_as_default")]
	pub access_token: String,
}

/// Error document returned by the token endpoint.
///
/// Decoding is best effort: the body is read as a plain JSON object (a repeated key keeps its
/// last value), every field accepts strings, numbers, or booleans, and anything missing or
/// unreadable stays empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenErrorResponse {
	/// Error code.
	pub error: String,
	/// Human-readable description.
	pub error_description: String,
	/// Validation page.
	pub redirect_uri: Option<String>,
	/// Error subtype.
	pub error_type: Option<String>,
	/// Validation channel.
	pub validation_type: Option<String>,
	/// Validation session identifier.
	pub validation_sid: Option<String>,
	/// Masked phone number.
	pub phone_mask: Option<String>,
	/// Re-send channel.
	pub validation_resend: Option<String>,
	/// CAPTCHA identifier.
	pub captcha_sid: Option<String>,
	/// CAPTCHA image URL.
	pub captcha_img: Option<String>,
}
impl TokenErrorResponse {
	/// Picks the known fields out of a decoded JSON object.
	pub fn from_fields(fields: &JsonMap<String, JsonValue>) -> Self {
		let field = |key: &str| fields.get(key).and_then(lenient_text);

		Self {
			error: field("error").unwrap_or_default(),
			error_description: field("error_description").unwrap_or_default(),
			redirect_uri: field("redirect_uri"),
			error_type: field("error_type"),
			validation_type: field("validation_type"),
			validation_sid: field("validation_sid"),
			phone_mask: field("phone_mask"),
			validation_resend: field("validation_resend"),
			captcha_sid: field("captcha_sid"),
			captcha_img: field("captcha_img"),
		}
	}

	/// Converts the wire document into a [`TokenError`].
	pub fn into_token_error(self) -> TokenError {
		TokenError {
			code: self.error,
			description: self.error_description,
			redirect_uri: self.redirect_uri,
			error_type: self.error_type,
			captcha_sid: self.captcha_sid,
			captcha_img: self.captcha_img,
			validation_type: self.validation_type,
			validation_sid: self.validation_sid,
			phone_mask: self.phone_mask,
			validation_resend: self.validation_resend,
			..Default::default()
		}
	}
}

/// Converts a token endpoint response into a [`Token`].
///
/// Non-2xx responses become [`Error::Provider`] with whatever the error document contained.
/// A 2xx response whose body is not a valid success document is a [`ParseError::TokenBody`].
pub fn token_from_response(response: &HttpResponse) -> Result<Token> {
	let status = response.status();

	if !status.is_success() {
		return Err(token_error_from_response(response).into());
	}

	let body = response.body();
	let document = decode::<AccessTokenResponse>(body)
		.map_err(|source| ParseError::TokenBody { source, status: status.as_u16() })?;
	let raw = serde_json::from_slice::<JsonMap<String, JsonValue>>(body)
		.map(|fields| fields.into_iter().collect::<RawFields>())
		.unwrap_or_default();

	token_from_document(document, raw)
}

/// Builds a [`TokenError`] from a non-2xx response, keeping the body and HTTP metadata.
///
/// Bodies that are not JSON objects still produce an error with empty fields.
pub fn token_error_from_response(response: &HttpResponse) -> TokenError {
	let body = response.body();
	let document = match serde_json::from_slice::<JsonMap<String, JsonValue>>(body) {
		Ok(fields) => TokenErrorResponse::from_fields(&fields),
		Err(e) => {
			#[cfg(feature = "tracing")]
			tracing::debug!(error = %e, status = response.status().as_u16(), "Token error body could not be decoded.");
			#[cfg(not(feature = "tracing"))]
			let _ = e;

			TokenErrorResponse::default()
		},
	};

	document
		.into_token_error()
		.with_body(body.clone())
		.with_response(ResponseMetadata::from_response(response))
}

/// Assembles a [`Token`] from a decoded success document and the raw field map.
///
/// Group tokens come from the `groups` list in source order. When the list is empty, string
/// fields named `access_token_<group_id>` are used instead, sorted by group id; names with
/// non-numeric suffixes only stay in the raw map.
pub fn token_from_document(document: AccessTokenResponse, raw: RawFields) -> Result<Token> {
	let expires_at = document.expires_at()?;
	let mut groups = document
		.groups
		.into_iter()
		.map(|group| GroupToken::new(group.group_id, group.access_token))
		.collect::<Vec<_>>();

	if groups.is_empty() {
		groups = group_tokens_from_raw(&raw);
	}

	Ok(Token {
		access_token: TokenSecret::new(document.access_token),
		user_id: (document.user_id != 0).then_some(document.user_id),
		expires_at,
		groups,
		state: None,
		raw,
	})
}

fn group_tokens_from_raw(raw: &RawFields) -> Vec<GroupToken> {
	let mut groups = raw
		.iter()
		.filter_map(|(key, value)| match parse::classify_field(key) {
			FieldKind::GroupToken(suffix) => {
				let group_id = suffix.parse::<i64>().ok()?;

				Some(GroupToken::new(group_id, value.as_str()?))
			},
			_ => None,
		})
		.collect::<Vec<_>>();

	groups.sort_by_key(|group| group.group_id);

	groups
}

fn decode<T>(body: &[u8]) -> Result<T, serde_path_to_error::Error<serde_json::Error>>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(<Option<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_text(value: &JsonValue) -> Option<String> {
	match value {
		JsonValue::Null => None,
		JsonValue::String(text) if text.is_empty() => None,
		JsonValue::String(text) => Some(text.clone()),
		other => Some(other.to_string()),
	}
}
