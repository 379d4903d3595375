mod common;

// crates.io
use httpmock::prelude::*;
// self
use vk_oauth::{
	auth::TokenErrorKind,
	flows::{Captcha, PasswordParams, SidParams},
	query::AuthOption,
};

#[tokio::test]
async fn password_credentials_posts_every_answer() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/").body(
				"2fa_supported=1&captcha_key=abc&captcha_sid=12345&client_id=CLIENT_ID&client_secret=CLIENT_SECRET&code=12345&foo=bar&grant_type=password&password=PASSWORD&scope=8193&test_redirect_uri=1&username=USERNAME&v=VERSION",
			);
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"9d77c727986d7668986d7668049870402D1986d986d76684bbc9b1bf8488de9\",\"expires_in\":0,\"user_id\":85635407}",
			);
		})
		.await;
	let params = PasswordParams::new("USERNAME", "PASSWORD")
		.with_captcha(Captcha::new("12345", "abc"))
		.with_code("12345")
		.with_two_fa_supported(true)
		.with_test_redirect_uri(true);
	let token = common::config(&server)
		.password_credentials(None, &params, &[AuthOption::set_param("foo", "bar")])
		.await
		.expect("Password grant should succeed.");

	mock.assert_async().await;

	assert_eq!(
		token.access_token.expose(),
		"9d77c727986d7668986d7668049870402D1986d986d76684bbc9b1bf8488de9"
	);
	assert_eq!(token.user_id, Some(85635407));
	assert!(token.expires_at.is_none());
}

#[tokio::test]
async fn password_credentials_with_empty_params_and_overrides() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/").body(
				"client_id=CLIENT_ID&client_secret=new_client_secret&foo=bar&grant_type=password&password=&scope=8193&username=&v=VERSION",
			);
			then.status(200).body("{\"access_token\":\"t\"}");
		})
		.await;

	common::config(&server)
		.password_credentials(None, &PasswordParams::default(), &[
			AuthOption::set_param("client_secret", "new_client_secret"),
			AuthOption::set_param("foo", "bar"),
		])
		.await
		.expect("Overridden password grant should succeed.");

	mock.assert_async().await;
}

#[tokio::test]
async fn password_credentials_surfaces_captcha_challenge() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/");
			then.status(401).header("content-type", "application/json").body(
				"{\"error\":\"need_captcha\",\"captcha_sid\":\"854844498568\",\"captcha_img\":\"http://api.vk.com/captcha.php?sid=854844498568&s=1\"}",
			);
		})
		.await;
	let err = common::config(&server)
		.password_credentials(None, &PasswordParams::new("USERNAME", "PASSWORD"), &[])
		.await
		.expect_err("CAPTCHA challenges must fail the grant.");

	mock.assert_async().await;

	let token_error = err.as_token_error().expect("Error should carry the provider document.");

	assert_eq!(token_error.kind(), TokenErrorKind::NeedCaptcha);
	assert_eq!(token_error.captcha_sid.as_deref(), Some("854844498568"));
	assert_eq!(
		token_error.captcha_img.as_deref(),
		Some("http://api.vk.com/captcha.php?sid=854844498568&s=1")
	);
	assert!(token_error.description.is_empty());
}

#[tokio::test]
async fn password_credentials_surfaces_validation_redirect() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/");
			then.status(401).header("content-type", "application/json").body(
				"{\"error\":\"need_validation\",\"error_description\":\"please open redirect_uri in browser\",\"redirect_uri\":\"https://oauth.vk.com/security_check?type=test&mid=66748&hash=23132d8b8744f8b1b2\"}",
			);
		})
		.await;
	let err = common::config(&server)
		.password_credentials(
			None,
			&PasswordParams::new("USERNAME", "PASSWORD").with_test_redirect_uri(true),
			&[],
		)
		.await
		.expect_err("Validation challenges must fail the grant.");

	mock.assert_async().await;

	let token_error = err.as_token_error().expect("Error should carry the provider document.");

	assert_eq!(token_error.kind(), TokenErrorKind::NeedValidation);
	assert_eq!(token_error.description, "please open redirect_uri in browser");
	assert_eq!(
		token_error.redirect_uri.as_deref(),
		Some("https://oauth.vk.com/security_check?type=test&mid=66748&hash=23132d8b8744f8b1b2")
	);
	assert_eq!(token_error.status(), Some(401));
}

#[tokio::test]
async fn extend_sid_posts_session_and_captcha() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/").body(
				"captcha_key=abc&captcha_sid=777&client_id=CLIENT_ID&client_secret=CLIENT_SECRET&grant_type=extend_sid&hash=HASH&scope=8193&sid=SID&v=VERSION",
			);
			then.status(200).body("{\"access_token\":\"extended\",\"user_id\":66748}");
		})
		.await;
	let params = SidParams::new("SID", "HASH").with_captcha(Captcha::new("777", "abc"));
	let token = common::config(&server)
		.extend_sid(None, &params, &[])
		.await
		.expect("Session extension should succeed.");

	mock.assert_async().await;

	assert_eq!(token.access_token.expose(), "extended");
	assert_eq!(token.user_id, Some(66748));
}
