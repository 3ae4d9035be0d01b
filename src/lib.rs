//! Typed async client for the xREL release-tracking API: explicit OAuth 2.0 sessions, scope
//! guards that fail before the network, and a response interceptor that reads every body for an
//! error payload because the service's status codes cannot be trusted on their own.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod model;
pub mod oauth;
pub mod obs;
pub mod pagination;
pub mod rate_limit;
pub mod service;
pub mod session;
#[cfg(feature = "reqwest")]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers for unit and integration tests.

	pub use crate::_prelude::*;

	// self
	use crate::{
		api::Client, http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper,
		service::ServiceDescriptor, session::Session,
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds a service descriptor whose endpoints all live on the provided mock base URL.
	pub fn test_descriptor(base_url: &str) -> ServiceDescriptor {
		let base = Url::parse(base_url).expect("Mock base URL should parse successfully.");

		ServiceDescriptor::builder()
			.api_base(base)
			.build()
			.expect("Mock service descriptor should build successfully.")
	}

	/// Constructs a [`Client`] against `base_url` using the insecure reqwest transport.
	pub fn build_reqwest_test_client(base_url: &str, session: Session) -> ReqwestTestClient {
		Client::with_http_client(
			test_descriptor(base_url),
			session,
			test_reqwest_http_client(),
			ReqwestTransportErrorMapper,
		)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
