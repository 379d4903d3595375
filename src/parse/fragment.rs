//! Redirect parameters: implicit flow fragments and authorization code queries.

// crates.io
use url::form_urlencoded::{self, Serializer};
// self
use crate::{
	_prelude::*,
	auth::{GroupToken, Token, TokenError, TokenSecret},
	error::ParseError,
	parse::{self, FieldKind},
};

type Pairs = Vec<(String, String)>;
type Fields = BTreeMap<String, String>;

/// Parses an implicit flow fragment such as `access_token=...&expires_in=86400&user_id=1`.
///
/// A leading `#` is ignored, so both `Url::fragment()` output and a raw `#...` suffix work.
pub fn token_from_fragment(fragment: &str) -> Result<Token> {
	let fragment = fragment.strip_prefix('#').unwrap_or(fragment);

	token_from_query(form_urlencoded::parse(fragment.as_bytes()))
}

/// Parses already-decoded redirect parameters into a [`Token`].
///
/// The first value of a repeated key wins. A non-empty `error` or `error_description` yields
/// [`Error::Provider`] without looking at any other key.
pub fn token_from_query<I, K, V>(pairs: I) -> Result<Token>
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	let pairs = collect_pairs(pairs);
	let fields = first_values(&pairs);

	if let Some(e) = error_from_fields(&fields, &pairs) {
		return Err(e.into());
	}

	let mut token = Token::default();

	for (key, value) in &fields {
		match parse::classify_field(key) {
			FieldKind::AccessToken => token.access_token = TokenSecret::new(value.as_str()),
			FieldKind::GroupToken(suffix) => {
				let group_id = suffix
					.parse::<i64>()
					.map_err(|source| ParseError::InvalidGroupId { key: key.clone(), source })?;

				token.groups.push(GroupToken::new(group_id, value.as_str()));
			},
			FieldKind::ExpiresIn if !value.is_empty() => {
				let seconds = value.parse::<i64>().map_err(|source| {
					ParseError::InvalidExpiresIn { value: value.clone(), source }
				})?;

				if seconds != 0 {
					token.expires_at = Some(parse::expiry_after(seconds)?);
				}
			},
			FieldKind::UserId if !value.is_empty() => {
				let user_id = value
					.parse::<i64>()
					.map_err(|source| ParseError::InvalidUserId { value: value.clone(), source })?;

				token.user_id = (user_id != 0).then_some(user_id);
			},
			FieldKind::State => token.state = Some(value.clone()),
			_ => {},
		}
	}

	token.groups.sort_by_key(|group| group.group_id);
	token.raw =
		fields.into_iter().map(|(key, value)| (key, JsonValue::String(value))).collect();

	Ok(token)
}

/// Extracts the authorization code from redirect parameters.
///
/// Provider errors take precedence over the code; a missing or empty `code` is
/// [`Error::MissingCode`].
pub fn code_from_query<I, K, V>(pairs: I) -> Result<String>
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	let pairs = collect_pairs(pairs);
	let mut fields = first_values(&pairs);

	if let Some(e) = error_from_fields(&fields, &pairs) {
		return Err(e.into());
	}

	fields.remove("code").filter(|code| !code.is_empty()).ok_or(Error::MissingCode)
}

fn collect_pairs<I, K, V>(pairs: I) -> Pairs
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	pairs
		.into_iter()
		.map(|(key, value)| (key.as_ref().to_owned(), value.as_ref().to_owned()))
		.collect()
}

fn first_values(pairs: &[(String, String)]) -> Fields {
	let mut fields = Fields::new();

	for (key, value) in pairs {
		fields.entry(key.clone()).or_insert_with(|| value.clone());
	}

	fields
}

/// The diagnostic body keeps every received pair, grouped by key with values in arrival order.
fn error_from_fields(fields: &Fields, pairs: &[(String, String)]) -> Option<TokenError> {
	let code = fields.get("error").map(String::as_str).unwrap_or_default();
	let description = fields.get("error_description").map(String::as_str).unwrap_or_default();

	if code.is_empty() && description.is_empty() {
		return None;
	}

	let mut sorted =
		pairs.iter().map(|(key, value)| (key.as_str(), value.as_str())).collect::<Vec<_>>();

	sorted.sort_by_key(|(key, _)| *key);

	let body = Serializer::new(String::new()).extend_pairs(sorted).finish();

	Some(TokenError::new(code, description).with_body(body.into_bytes()))
}
