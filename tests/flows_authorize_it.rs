// self
use vk_oauth::{
	auth::scope,
	config::{Config, Endpoint},
	flows::{AuthParams, DisplayStyle},
	query::AuthOption,
};

fn config() -> Config {
	Config::new("CLIENT_ID")
		.with_client_secret("CLIENT_SECRET")
		.with_version("VERSION")
		.with_scope(scope::user::WALL | scope::group::STORIES)
		.with_redirect_uri("REDIRECT_URI")
}

#[test]
fn overrides_rewrite_client_id_and_state() {
	let url = config().with_endpoint(Endpoint::uniform("")).implicit_flow_auth_url(
		&AuthParams::default().with_state("origin_state"),
		&[
			AuthOption::set_param("client_id", "new_client_id"),
			AuthOption::set_param("state", "new_state"),
		],
	);

	assert_eq!(
		url,
		"?client_id=new_client_id&redirect_uri=REDIRECT_URI&response_type=token&scope=8193&state=new_state&v=VERSION"
	);
}

#[test]
fn endpoint_query_is_extended() {
	let endpoint = Endpoint {
		auth_url: "https://proxy.example/authorize?tenant=vk".into(),
		..Default::default()
	};
	let url = config()
		.with_endpoint(endpoint)
		.code_flow_auth_url(&AuthParams::default().with_display(DisplayStyle::Page), &[]);

	assert_eq!(
		url,
		"https://proxy.example/authorize?tenant=vk&client_id=CLIENT_ID&display=page&redirect_uri=REDIRECT_URI&response_type=code&scope=8193&v=VERSION"
	);
}

#[test]
fn repeated_builds_are_identical() {
	let config = config();
	let params = AuthParams::default().with_random_state().with_group_ids([42]);

	assert_eq!(
		config.code_flow_auth_url(&params, &[]),
		config.code_flow_auth_url(&params, &[])
	);
	assert!(config.code_flow_auth_url(&params, &[]).contains("group_ids=42"));
}

#[test]
fn full_user_scope_is_decimal() {
	let url = Config::new("1")
		.with_scope(scope::user::ALL)
		.implicit_flow_auth_url(&AuthParams::default(), &[]);

	assert!(url.contains(&format!("scope={}", (1u64 << 28) - 1)));
}
