//! Runs the password grant against a mock provider, answering a CAPTCHA challenge on retry.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use vk_oauth::{
	auth::TokenErrorKind,
	config::{Config, Endpoint},
	flows::{Captcha, PasswordParams},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let challenge = server
		.mock_async(|when, then| {
			when.method(POST).path("/token").body_excludes("captcha_key");
			then.status(401).header("content-type", "application/json").body(
				"{\"error\":\"need_captcha\",\"captcha_sid\":\"854844498568\",\"captcha_img\":\"http://api.vk.com/captcha.php?sid=854844498568&s=1\"}",
			);
		})
		.await;
	let granted = server
		.mock_async(|when, then| {
			when.method(POST).path("/token").body_includes("captcha_key=q7z2");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-user-token\",\"expires_in\":86400,\"user_id\":85635407}");
		})
		.await;
	let config = Config::new("2274003")
		.with_client_secret("hHbZxrka2uZ6jB1inYsH")
		.with_endpoint(Endpoint { password_token_url: server.url("/token"), ..Default::default() });
	let mut params = PasswordParams::new("+79990000000", "correct horse").with_two_fa_supported(true);
	let token = loop {
		match config.password_credentials(None, &params, &[]).await {
			Ok(token) => break token,
			Err(e) => match e.as_token_error() {
				Some(challenge) if challenge.kind() == TokenErrorKind::NeedCaptcha => {
					println!(
						"CAPTCHA required, image at {}.",
						challenge.captcha_img.as_deref().unwrap_or_default()
					);

					let sid = challenge.captcha_sid.clone().unwrap_or_default();

					params = params.with_captcha(Captcha::new(sid, "q7z2"));
				},
				_ => return Err(e.into()),
			},
		}
	};

	println!("User {:?} authorized: {:?}.", token.user_id, token.access_token);

	challenge.assert_async().await;
	granted.assert_async().await;

	Ok(())
}
