//! Search endpoints.

// self
use crate::{
	_prelude::*,
	api::{
		Client, ExtInfoKind,
		endpoint::{Endpoint, EndpointRequest},
		require_non_empty,
	},
	http::ApiHttpClient,
	model::{ExtInfoSearchResult, ReleaseSearchResult},
	oauth::TransportErrorMapper,
};

/// Options for [`Client::search_releases`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReleaseSearchOptions {
	/// Include scene releases.
	pub scene: bool,
	/// Include P2P releases.
	pub p2p: bool,
	/// Maximum number of hits; at least 1 when set.
	pub limit: Option<u32>,
}
impl ReleaseSearchOptions {
	/// Caps the number of hits.
	pub fn with_limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);

		self
	}
}
impl Default for ReleaseSearchOptions {
	fn default() -> Self {
		Self { scene: true, p2p: true, limit: None }
	}
}

/// Options for [`Client::search_ext_info`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ExtInfoSearchOptions {
	/// Restrict to a media type.
	pub kind: Option<ExtInfoKind>,
	/// Maximum number of hits; at least 1 when set.
	pub limit: Option<u32>,
}
impl ExtInfoSearchOptions {
	/// Restricts hits to `kind`.
	pub fn with_kind(mut self, kind: ExtInfoKind) -> Self {
		self.kind = Some(kind);

		self
	}

	/// Caps the number of hits.
	pub fn with_limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);

		self
	}
}

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Searches scene and/or P2P releases.
	pub async fn search_releases(
		&self,
		query: &str,
		options: ReleaseSearchOptions,
	) -> Result<ReleaseSearchResult> {
		self.call(Endpoint::SEARCH_RELEASES.operation, || {
			if !options.scene && !options.p2p {
				return Err(Error::invalid_argument("at least one of scene or p2p must be searched"));
			}

			Ok(EndpointRequest::new(Endpoint::SEARCH_RELEASES)
				.query("q", require_non_empty("query", query)?)
				.query("scene", bool_param(options.scene))
				.query("p2p", bool_param(options.p2p))
				.query_opt("limit", checked_limit(options.limit)?))
		})
		.await
	}

	/// Searches media records.
	pub async fn search_ext_info(
		&self,
		query: &str,
		options: ExtInfoSearchOptions,
	) -> Result<ExtInfoSearchResult> {
		self.call(Endpoint::SEARCH_EXT_INFO.operation, || {
			Ok(EndpointRequest::new(Endpoint::SEARCH_EXT_INFO)
				.query("q", require_non_empty("query", query)?)
				.query_opt("type", options.kind.map(ExtInfoKind::as_str))
				.query_opt("limit", checked_limit(options.limit)?))
		})
		.await
	}
}

fn checked_limit(limit: Option<u32>) -> Result<Option<String>> {
	match limit {
		Some(0) => Err(Error::invalid_argument("limit must be at least 1")),
		limit => Ok(limit.map(|limit| limit.to_string())),
	}
}

pub(crate) fn bool_param(value: bool) -> &'static str {
	if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn limits_must_be_positive() {
		assert!(checked_limit(Some(0)).is_err());
		assert_eq!(checked_limit(Some(3)).ok().flatten().as_deref(), Some("3"));
		assert_eq!(checked_limit(None).ok(), Some(None));
	}
}
