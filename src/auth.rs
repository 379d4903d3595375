//! Auth-domain permission masks and token models.

pub mod scope;
pub mod token;

pub use scope::Scope;
pub use token::{error::*, record::*, secret::*};
