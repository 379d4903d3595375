//! Request parameter assembly shared by authorize URLs and token request bodies.
//!
//! [`QueryParams`] keeps one value per key and serializes with keys in lexicographic order,
//! so building the same request twice yields byte-identical output. Flows set their
//! defaults first and then apply caller-supplied [`AuthOption`] overrides, which may replace
//! any computed parameter (including `client_id`, `client_secret`, or `state`).

// crates.io
use url::form_urlencoded::Serializer;
// self
use crate::_prelude::*;

/// Late-bound override applied after a flow has set its own parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOption {
	/// Sets `key` to `value`, replacing any value the flow computed.
	SetParam {
		/// Parameter name.
		key: String,
		/// Parameter value.
		value: String,
	},
}
impl AuthOption {
	/// Override that sets a custom URL or body parameter.
	pub fn set_param(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self::SetParam { key: key.into(), value: value.into() }
	}

	/// Applies the override to `params`.
	pub fn apply(&self, params: &mut QueryParams) {
		match self {
			Self::SetParam { key, value } => {
				params.set(key.as_str(), value.as_str());
			},
		}
	}
}

/// Key-deduplicated parameter set with deterministic encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);
impl QueryParams {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `key` to `value`, overwriting any previous value.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.0.insert(key.into(), value.into());

		self
	}

	/// Applies overrides in order; later overrides win.
	pub fn apply(&mut self, overrides: &[AuthOption]) -> &mut Self {
		for option in overrides {
			option.apply(self);
		}

		self
	}

	/// Returns the value stored for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no parameter is set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates parameters in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}

	/// Form-urlencodes the parameters with keys sorted lexicographically.
	pub fn encode(&self) -> String {
		Serializer::new(String::new()).extend_pairs(self.iter()).finish()
	}

	/// Appends the encoded parameters to `base`, joining with `&` when `base` already has a
	/// query and `?` otherwise.
	pub fn append_to(&self, base: &str) -> String {
		let separator = if base.contains('?') { '&' } else { '?' };
		let encoded = self.encode();
		let mut uri = String::with_capacity(base.len() + 1 + encoded.len());

		uri.push_str(base);
		uri.push(separator);
		uri.push_str(&encoded);

		uri
	}
}
impl<K, V> FromIterator<(K, V)> for QueryParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut params = Self::new();

		for (key, value) in iter {
			params.set(key, value);
		}

		params
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn encoding_sorts_keys_and_escapes_values() {
		let mut params = QueryParams::new();

		params.set("v", "5.131").set("group_ids", "1,2,3").set("client_id", "2274003");
		params.set("redirect_uri", "https://example.com/cb?x=1 2");

		assert_eq!(
			params.encode(),
			"client_id=2274003&group_ids=1%2C2%2C3&redirect_uri=https%3A%2F%2Fexample.com%2Fcb%3Fx%3D1+2&v=5.131"
		);
	}

	#[test]
	fn encoding_is_idempotent() {
		let params: QueryParams = [("b", "2"), ("a", "1")].into_iter().collect();

		assert_eq!(params.encode(), params.clone().encode());
		assert_eq!(params.encode(), "a=1&b=2");
	}

	#[test]
	fn overrides_replace_existing_keys_and_append_new_ones() {
		let mut params: QueryParams =
			[("client_id", "CLIENT_ID"), ("state", "origin_state")].into_iter().collect();

		params.apply(&[
			AuthOption::set_param("state", "new_state"),
			AuthOption::set_param("foo", "bar"),
			AuthOption::set_param("state", "last_state"),
		]);

		assert_eq!(params.len(), 3);
		assert_eq!(params.get("state"), Some("last_state"));
		assert_eq!(params.encode(), "client_id=CLIENT_ID&foo=bar&state=last_state");
	}

	#[test]
	fn append_to_picks_separator() {
		let params: QueryParams = [("a", "1")].into_iter().collect();

		assert_eq!(
			params.append_to("https://oauth.vk.com/authorize"),
			"https://oauth.vk.com/authorize?a=1"
		);
		assert_eq!(params.append_to("https://host/auth?x=y"), "https://host/auth?x=y&a=1");
		assert_eq!(params.append_to(""), "?a=1");
		assert!(QueryParams::new().is_empty());
	}
}
