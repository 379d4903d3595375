//! Provider-reported error documents and their remediation classes.

// self
use crate::{_prelude::*, http::ResponseMetadata};

/// Remediation classes derived from the provider error code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenErrorKind {
	/// Code, password, or session was rejected.
	InvalidGrant,
	/// The user declined the consent screen.
	AccessDenied,
	/// Client authentication failed.
	InvalidClient,
	/// Requested scope is not allowed.
	InvalidScope,
	/// Show [`TokenError::captcha_img`] and retry with the answer.
	NeedCaptcha,
	/// Send the user to [`TokenError::redirect_uri`] to confirm the login.
	NeedValidation,
	/// Anything else.
	Other,
}

/// Error document returned by the provider.
///
/// Built from a non-2xx token endpoint response or from `error`/`error_description`
/// parameters in a redirect. Optional fields are only present for the flows that use
/// them: CAPTCHA challenges for password and session grants, validation fields for
/// partially registered accounts.
#[derive(Clone, Debug, Default, ThisError)]
#[error("Provider rejected the token request: {code} ({description}).")]
pub struct TokenError {
	/// Machine-readable error code such as `invalid_grant` or `need_captcha`.
	pub code: String,
	/// Human-readable description.
	pub description: String,
	/// Validation page the user must open.
	pub redirect_uri: Option<String>,
	/// Provider-specific error subtype.
	pub error_type: Option<String>,
	/// CAPTCHA challenge identifier.
	pub captcha_sid: Option<String>,
	/// CAPTCHA image URL.
	pub captcha_img: Option<String>,
	/// Validation channel (for example `2fa_sms` or `2fa_app`).
	pub validation_type: Option<String>,
	/// Validation session identifier.
	pub validation_sid: Option<String>,
	/// Masked phone number the code was sent to.
	pub phone_mask: Option<String>,
	/// Channel the validation code can be re-sent through.
	pub validation_resend: Option<String>,
	/// Raw response body (or re-encoded redirect query).
	pub body: Vec<u8>,
	/// HTTP metadata when the error came from the token endpoint.
	pub response: Option<ResponseMetadata>,
}
impl TokenError {
	/// Creates an error document from its code and description.
	pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
		Self { code: code.into(), description: description.into(), ..Default::default() }
	}

	/// Attaches the raw body used for diagnostics.
	pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.body = body.into();

		self
	}

	/// Attaches HTTP response metadata.
	pub fn with_response(mut self, response: ResponseMetadata) -> Self {
		self.response = Some(response);

		self
	}

	/// HTTP status of the response, when the error came from the token endpoint.
	pub fn status(&self) -> Option<u16> {
		self.response.as_ref().map(|meta| meta.status)
	}

	/// Lossy UTF-8 view of [`body`](Self::body).
	pub fn body_text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}

	/// Classifies the error code.
	pub fn kind(&self) -> TokenErrorKind {
		let code = self.code.as_str();

		if code.eq_ignore_ascii_case("need_captcha") {
			TokenErrorKind::NeedCaptcha
		} else if code.eq_ignore_ascii_case("need_validation") {
			TokenErrorKind::NeedValidation
		} else if code.eq_ignore_ascii_case("invalid_grant") {
			TokenErrorKind::InvalidGrant
		} else if code.eq_ignore_ascii_case("access_denied") {
			TokenErrorKind::AccessDenied
		} else if code.eq_ignore_ascii_case("invalid_client")
			|| code.eq_ignore_ascii_case("unauthorized_client")
		{
			TokenErrorKind::InvalidClient
		} else if code.eq_ignore_ascii_case("invalid_scope") {
			TokenErrorKind::InvalidScope
		} else {
			TokenErrorKind::Other
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn kind_follows_error_code() {
		assert_eq!(TokenError::new("need_captcha", "").kind(), TokenErrorKind::NeedCaptcha);
		assert_eq!(TokenError::new("need_validation", "").kind(), TokenErrorKind::NeedValidation);
		assert_eq!(TokenError::new("INVALID_GRANT", "").kind(), TokenErrorKind::InvalidGrant);
		assert_eq!(TokenError::new("access_denied", "").kind(), TokenErrorKind::AccessDenied);
		assert_eq!(TokenError::new("invalid_client", "").kind(), TokenErrorKind::InvalidClient);
		assert_eq!(TokenError::new("invalid_scope", "").kind(), TokenErrorKind::InvalidScope);
		assert_eq!(TokenError::new("flood_control", "").kind(), TokenErrorKind::Other);
	}

	#[test]
	fn body_and_status_are_kept_for_diagnostics() {
		let err = TokenError::new("invalid_request", "Bad request.")
			.with_body(b"{\"error\":\"invalid_request\"}".to_vec())
			.with_response(ResponseMetadata { status: 400, ..Default::default() });

		assert_eq!(err.status(), Some(400));
		assert_eq!(err.body_text(), "{\"error\":\"invalid_request\"}");
		assert!(TokenError::default().status().is_none());
	}
}
