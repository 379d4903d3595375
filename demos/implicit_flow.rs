//! Builds an implicit flow authorize URL and parses the redirect the browser lands on.

// crates.io
use color_eyre::Result;
use url::Url;
// self
use vk_oauth::{
	auth::scope,
	config::Config,
	flows::{AuthParams, DisplayStyle},
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let config = Config::new("2274003")
		.with_scope(scope::user::WALL | scope::user::OFFLINE | scope::group::MESSAGES)
		.with_redirect_uri("https://oauth.vk.com/blank.html");
	let params = AuthParams::default()
		.with_random_state()
		.with_display(DisplayStyle::Popup)
		.with_group_ids([123456, 654321]);
	let authorize_url = config.implicit_flow_auth_url(&params, &[]);

	println!("Open this URL in a browser: {authorize_url}.");

	let state = params.state.unwrap_or_default();
	let redirect = Url::parse(&format!(
		"https://oauth.vk.com/blank.html#access_token_123456=group-a&access_token_654321=group-b&expires_in=0&state={state}"
	))?;
	let token = config.implicit_flow_result_from_url(&redirect)?;

	if token.state.as_deref() != Some(state.as_str()) {
		color_eyre::eyre::bail!("State mismatch; the redirect did not originate from this request.");
	}

	for group in &token.groups {
		println!("Community {} token received ({}).", group.group_id, group.access_token);
	}

	Ok(())
}
