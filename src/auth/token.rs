//! Normalized token results and provider error documents.

pub mod error;
pub mod record;
pub mod secret;
