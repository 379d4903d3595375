//! Normalized token returned by every successful flow.

// self
use crate::{_prelude::*, auth::token::secret::TokenSecret};

/// Raw response fields keyed by their wire name.
pub type RawFields = BTreeMap<String, JsonValue>;

/// Access token issued for a single community.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupToken {
	/// Community identifier.
	pub group_id: i64,
	/// Token scoped to the community; callers must avoid logging it.
	pub access_token: TokenSecret,
}
impl GroupToken {
	/// Creates a group token entry.
	pub fn new(group_id: i64, access_token: impl Into<String>) -> Self {
		Self { group_id, access_token: TokenSecret::new(access_token) }
	}
}
impl Debug for GroupToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GroupToken")
			.field("group_id", &self.group_id)
			.field("access_token", &"<redacted>")
			.finish()
	}
}

/// Normalized authorization result.
///
/// A token may carry a user or application token in [`access_token`](Self::access_token),
/// any number of community tokens in [`groups`](Self::groups), or both. Every field the
/// provider sent, including ones modeled here, is kept in [`raw`](Self::raw) so extra
/// profile attributes (`first_name`, `email`, ...) stay reachable.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Token {
	/// User or application token; empty when only group tokens were issued.
	pub access_token: TokenSecret,
	/// User identifier; `None` for application and community tokens.
	pub user_id: Option<i64>,
	/// Absolute expiry instant; `None` for non-expiring tokens.
	pub expires_at: Option<OffsetDateTime>,
	/// Community tokens in the order the parser produced them.
	pub groups: Vec<GroupToken>,
	/// `state` echoed back by the implicit flow redirect.
	pub state: Option<String>,
	/// Every field observed in the response.
	pub raw: RawFields,
}
impl Token {
	/// Returns `true` if the token has an expiry at or before `instant`.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| instant >= expires_at)
	}

	/// Returns `true` if the token is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	/// Looks up the token issued for `group_id`.
	pub fn group(&self, group_id: i64) -> Option<&GroupToken> {
		self.groups.iter().find(|group| group.group_id == group_id)
	}

	/// Returns a raw response field.
	pub fn raw_field(&self, key: &str) -> Option<&JsonValue> {
		self.raw.get(key)
	}

	/// Returns a raw response field when it is a string.
	pub fn raw_str(&self, key: &str) -> Option<&str> {
		self.raw.get(key).and_then(JsonValue::as_str)
	}
}
impl Debug for Token {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Token")
			.field("access_token", &self.access_token)
			.field("user_id", &self.user_id)
			.field("expires_at", &self.expires_at)
			.field("groups", &self.groups)
			.field("state", &self.state)
			.field("raw_keys", &self.raw.keys().collect::<Vec<_>>())
			.finish()
	}
}
