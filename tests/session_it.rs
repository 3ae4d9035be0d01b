// crates.io
use httpmock::prelude::*;
// self
use xrel_client::{
	_preludet::*,
	auth::{GrantType, SCOPE_VIEW_NFO, ScopeSet, Token},
	error::ConfigError,
	session::Session,
};

const TOKEN_PATH: &str = "/v2/oauth2/token.json";

fn session_with_redirect() -> Session {
	Session::new("client-id", "client-secret")
		.with_redirect_uri(Url::parse("https://app.example.com/cb").expect("Redirect should parse."))
		.with_scopes(ScopeSet::new([SCOPE_VIEW_NFO]).expect("Scope fixture should be valid."))
}

fn stale_token(refresh: &str) -> Token {
	Token::builder(GrantType::AuthorizationCode)
		.access_token("stale-access")
		.refresh_token(refresh)
		.expires_in(Duration::seconds(-10))
		.build()
		.expect("Token fixture should build.")
}

#[tokio::test]
async fn authorization_code_exchange_posts_expected_form() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.url("/v2/"), session_with_redirect());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.form_urlencoded_tuple("grant_type", "authorization_code")
				.form_urlencoded_tuple("code", "auth-code")
				.form_urlencoded_tuple("client_id", "client-id")
				.form_urlencoded_tuple("client_secret", "client-secret")
				.form_urlencoded_tuple("redirect_uri", "https://app.example.com/cb")
				.form_urlencoded_tuple("scope", "viewnfo");
			then.status(200)
				.header("content-type", "application/json")
				.header("X-RateLimit-Remaining", "299")
				.body(
					r#"{"access_token":"user-access","token_type":"Bearer","expires_in":3600,
					"refresh_token":"user-refresh"}"#,
				);
		})
		.await;
	let token =
		client.exchange_authorization_code("auth-code").await.expect("Code exchange should succeed.");

	assert_eq!(token.grant, GrantType::AuthorizationCode);
	assert_eq!(token.access_token.expose(), "user-access");
	assert_eq!(token.refresh_secret().map(|secret| secret.expose()), Some("user-refresh"));
	assert!(!token.is_expired());
	assert_eq!(client.rate_limit().remaining, 299);

	mock.assert_async().await;
}

#[tokio::test]
async fn client_credentials_exchange_returns_new_token() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.url("/v2/"), session_with_redirect());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.form_urlencoded_tuple("grant_type", "client_credentials")
				.form_urlencoded_tuple("client_id", "client-id")
				.form_urlencoded_tuple("redirect_uri", "https://app.example.com/cb")
				.form_urlencoded_tuple("scope", "viewnfo");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"app-access","token_type":"Bearer","expires_in":1800}"#);
		})
		.await;
	let token =
		client.exchange_client_credentials().await.expect("Client credentials should succeed.");

	assert_eq!(token.grant, GrantType::ClientCredentials);
	assert_eq!(token.access_token.expose(), "app-access");
	assert!(token.refresh_token.is_none());

	mock.assert_async().await;
}

#[tokio::test]
async fn refresh_carries_previous_refresh_value() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.url("/v2/"), session_with_redirect());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.form_urlencoded_tuple("grant_type", "refresh_token")
				.form_urlencoded_tuple("refresh_token", "user-refresh")
				.form_urlencoded_tuple("scope", "viewnfo")
				.form_urlencoded_tuple_missing("redirect_uri");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"fresh-access","token_type":"Bearer","expires_in":3600}"#);
		})
		.await;
	let stale = stale_token("user-refresh");
	let fresh = client.refresh(&stale).await.expect("Refresh should succeed.");

	assert_eq!(fresh.access_token.expose(), "fresh-access");
	assert_eq!(fresh.refresh_secret().map(|secret| secret.expose()), Some("user-refresh"));
	assert_eq!(stale.access_token.expose(), "stale-access");
	assert!(stale.is_expired());

	mock.assert_async().await;
}

#[tokio::test]
async fn refresh_with_empty_value_makes_no_call() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.url("/v2/"), session_with_redirect());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"never","token_type":"Bearer","expires_in":3600}"#);
		})
		.await;
	let err = client.refresh(&stale_token("")).await.expect_err("Empty refresh must be rejected.");

	match err {
		Error::Config(ConfigError::MissingParameters { missing }) =>
			assert_eq!(missing, ["refresh_token"]),
		other => panic!("Unexpected error variant: {other:?}."),
	}

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn missing_credentials_are_reported_together() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.url("/v2/"), Session::anonymous());
	let err = client
		.exchange_token(GrantType::AuthorizationCode, None, None)
		.await
		.expect_err("Anonymous sessions cannot exchange codes.");

	assert_eq!(err.to_string(), "Needed parameters not set: client_id client_secret code.");
}

#[tokio::test]
async fn token_endpoint_error_payload_is_an_api_error() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.url("/v2/"), session_with_redirect());

	server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(400).header("content-type", "application/json").body(
				r#"{"error":"invalid_grant","error_description":"Code expired.","error_type":"oauth2"}"#,
			);
		})
		.await;

	let err = client
		.exchange_authorization_code("expired-code")
		.await
		.expect_err("Invalid grants must fail.");

	match err {
		Error::Api { description, error, status } => {
			assert_eq!(description, "Code expired.");
			assert_eq!(error.error, "invalid_grant");
			assert_eq!(status, 400);
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[test]
fn authorization_url_carries_session_parameters() {
	let client = build_reqwest_test_client(
		"https://api.example.com/v2/",
		session_with_redirect().with_state("csrf-state"),
	);
	let url = client.authorization_url().expect("Authorization URL should build.");

	assert_eq!(
		url.as_str(),
		"https://api.example.com/v2/oauth2/auth?response_type=code&client_id=client-id\
		&redirect_uri=https%3A%2F%2Fapp.example.com%2Fcb&state=csrf-state&scope=viewnfo"
	);
}
