//! Lists the latest scene releases from a mock service, showing pagination normalization and
//! how an error payload behind a 200 status surfaces as an API error.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use xrel_client::{
	api::{LatestOptions, ReleaseLookup, ReqwestApiClient},
	error::Error,
	http::ReqwestHttpClient,
	oauth::ReqwestTransportErrorMapper,
	pagination::Page,
	reqwest::Client,
	service::ServiceDescriptor,
	session::Session,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let latest_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v2/release/latest.json")
				.query_param("per_page", "5")
				.query_param("page", "1");
			then.status(200).header("content-type", "application/json").body(
				r#"{"total_count":2,"pagination":{"current_page":1,"per_page":5,"total_pages":1},
				"list":[{"id":"r1","dirname":"Some.Movie.2024.1080p-GRP","size":{"number":4400,"unit":"MB"}},
				{"id":"r2","dirname":"Some.Show.S01E01.720p-GRP","size":{"number":">","unit":""}}]}"#,
			);
		})
		.await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/release/info.json");
			then.status(200).header("content-type", "application/json").body(
				r#"{"error":"not_found","error_description":"Release not found.","error_type":"api"}"#,
			);
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
		Session::anonymous(),
		http_client,
		ReqwestTransportErrorMapper,
	);
	let latest =
		client.release_latest(&LatestOptions::default().with_page(Page::new(1, 0)), None).await?;

	for release in &latest.list {
		let size = release.size.as_ref().map(|size| format!("{}{}", size.number, size.unit));

		println!("{} ({}).", release.dirname, size.as_deref().unwrap_or("unknown size"));
	}

	match client.release_info(&ReleaseLookup::id("missing")).await {
		Err(Error::Api { description, status, .. }) =>
			println!("Lookup failed with status {status}: {description}"),
		other => println!("Unexpected lookup outcome: {other:?}."),
	}

	latest_mock.assert_async().await;

	Ok(())
}
