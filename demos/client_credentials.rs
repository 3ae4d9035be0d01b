//! Demonstrates obtaining an application token with the client-credentials grant against a mock
//! service, then reading the rate-limit snapshot the exchange reported.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use xrel_client::{
	api::ReqwestApiClient, http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper,
	reqwest::Client, service::ServiceDescriptor, session::Session,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/oauth2/token.json");
			then.status(200)
				.header("content-type", "application/json")
				.header("X-RateLimit-Limit", "300")
				.header("X-RateLimit-Remaining", "299")
				.body(r#"{"access_token":"demo-access","token_type":"bearer","expires_in":900}"#);
		})
		.await;
	let descriptor =
		ServiceDescriptor::builder().api_base(Url::parse(&server.url("/v2/"))?).build()?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client = ReqwestApiClient::with_http_client(
		descriptor,
		Session::new("demo-client", "super-secret"),
		http_client,
		ReqwestTransportErrorMapper,
	);
	let token = client.exchange_client_credentials().await?;
	let rate_limit = client.rate_limit();

	println!("Application token expires at {}.", token.expires_at);
	println!("Requests left this window: {} of {}.", rate_limit.remaining, rate_limit.limit);

	token_mock.assert_async().await;

	Ok(())
}
