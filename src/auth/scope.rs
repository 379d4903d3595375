//! Permission bitmask used by authorize URLs and token requests.
//!
//! VK encodes permissions as bit flags. Individual rights live in [`user`] and [`group`];
//! combine them with `|`:
//!
//! ```
//! use vk_oauth::auth::scope::{self, Scope};
//!
//! let mask = scope::group::PHOTOS | scope::user::WALL;
//!
//! assert_eq!(mask.bits(), 8196);
//! assert!(mask.contains(scope::user::WALL));
//! assert_eq!(Scope::all_up_to(2).bits(), 0b111);
//! ```

// std
use std::ops::{BitAnd, BitOr, BitOrAssign};
// self
use crate::_prelude::*;

/// Integer permission bitmask.
///
/// Bit positions range over `0..=63`; [`Scope::bit`] and [`Scope::all_up_to`] saturate past
/// that range instead of overflowing. A zero mask means that no explicit scope is requested;
/// flows omit the `scope` parameter in that case.
#[derive(
	Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Scope(u64);
impl Scope {
	/// Empty mask.
	pub const NONE: Self = Self(0);

	/// Wraps raw bits.
	pub const fn from_bits(bits: u64) -> Self {
		Self(bits)
	}

	/// Mask with a single bit set at `position`; empty when `position` is 64 or more.
	pub const fn bit(position: u32) -> Self {
		match 1_u64.checked_shl(position) {
			Some(bits) => Self(bits),
			None => Self::NONE,
		}
	}

	/// Mask with the low `max_bit + 1` bits set; every bit when `max_bit` is 63 or more.
	pub const fn all_up_to(max_bit: u32) -> Self {
		if max_bit >= u64::BITS - 1 {
			return Self(u64::MAX);
		}

		Self((1 << (max_bit + 1)) - 1)
	}

	/// Raw bits.
	pub const fn bits(self) -> u64 {
		self.0
	}

	/// Returns true when no permission is requested.
	pub const fn is_empty(self) -> bool {
		self.0 == 0
	}

	/// Returns true when every bit of `other` is also set in `self`.
	pub const fn contains(self, other: Self) -> bool {
		self.0 & other.0 == other.0
	}
}
impl BitOr for Scope {
	type Output = Self;

	fn bitor(self, rhs: Self) -> Self::Output {
		Self(self.0 | rhs.0)
	}
}
impl BitOrAssign for Scope {
	fn bitor_assign(&mut self, rhs: Self) {
		self.0 |= rhs.0;
	}
}
impl BitAnd for Scope {
	type Output = Self;

	fn bitand(self, rhs: Self) -> Self::Output {
		Self(self.0 & rhs.0)
	}
}
impl From<u64> for Scope {
	fn from(bits: u64) -> Self {
		Self(bits)
	}
}
impl Display for Scope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(&self.0, f)
	}
}
impl FromStr for Scope {
	type Err = ParseIntError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		s.trim().parse().map(Self)
	}
}

/// Permissions requested on behalf of a user.
pub mod user {
	use super::Scope;

	/// Notifications about answers.
	pub const NOTIFY: Scope = Scope::bit(0);
	/// Friends list.
	pub const FRIENDS: Scope = Scope::bit(1);
	/// Photos.
	pub const PHOTOS: Scope = Scope::bit(2);
	/// Audio.
	pub const AUDIO: Scope = Scope::bit(3);
	/// Video.
	pub const VIDEO: Scope = Scope::bit(4);
	/// Stories.
	pub const STORIES: Scope = Scope::bit(6);
	/// Wiki pages.
	pub const PAGES: Scope = Scope::bit(7);
	/// Link in the left menu.
	pub const PLUS_256: Scope = Scope::bit(8);
	/// Status.
	pub const STATUS: Scope = Scope::bit(10);
	/// Notes.
	pub const NOTES: Scope = Scope::bit(11);
	/// Messages.
	pub const MESSAGES: Scope = Scope::bit(12);
	/// Wall.
	pub const WALL: Scope = Scope::bit(13);
	/// Ads cabinet.
	pub const ADS: Scope = Scope::bit(15);
	/// Non-expiring token.
	pub const OFFLINE: Scope = Scope::bit(16);
	/// Documents.
	pub const DOCS: Scope = Scope::bit(17);
	/// Communities.
	pub const GROUPS: Scope = Scope::bit(18);
	/// Notifications.
	pub const NOTIFICATIONS: Scope = Scope::bit(19);
	/// Statistics.
	pub const STATS: Scope = Scope::bit(20);
	/// E-mail address.
	pub const EMAIL: Scope = Scope::bit(22);
	/// Market.
	pub const MARKET: Scope = Scope::bit(27);
	/// Every user permission.
	pub const ALL: Scope = Scope::all_up_to(27);
}

/// Permissions requested on behalf of a community.
pub mod group {
	use super::Scope;

	/// Stories.
	pub const STORIES: Scope = Scope::bit(0);
	/// Photos.
	pub const PHOTOS: Scope = Scope::bit(2);
	/// Community app widgets.
	pub const APP_WIDGET: Scope = Scope::bit(6);
	/// Messages.
	pub const MESSAGES: Scope = Scope::bit(12);
	/// Documents.
	pub const DOCS: Scope = Scope::bit(17);
	/// Community management.
	pub const MANAGE: Scope = Scope::bit(18);
	/// Every community permission.
	pub const ALL: Scope = Scope::all_up_to(18);
}
