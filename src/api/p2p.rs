//! P2P release endpoints.

// self
use crate::{
	_prelude::*,
	api::{
		Client, ReleaseLookup,
		endpoint::{Endpoint, EndpointRequest},
		require_non_empty,
	},
	http::ApiHttpClient,
	model::{P2pCategory, P2pRelease, PaginationList},
	oauth::TransportErrorMapper,
	pagination::Page,
};

/// Options for [`Client::p2p_releases`]; every filter is independent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct P2pOptions {
	/// Requested page.
	pub page: Page,
	/// Restrict to a category.
	pub category_id: Option<String>,
	/// Restrict to a releasing group.
	pub group_id: Option<String>,
	/// Restrict to a media record.
	pub ext_info_id: Option<String>,
}
impl P2pOptions {
	/// Sets the requested page.
	pub fn with_page(mut self, page: Page) -> Self {
		self.page = page;

		self
	}

	/// Restricts results to `category`.
	pub fn with_category(mut self, category: &P2pCategory) -> Self {
		self.category_id = Some(category.id.clone());

		self
	}

	/// Restricts results to the group with `group_id`.
	pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
		self.group_id = Some(group_id.into());

		self
	}

	/// Restricts results to the media record with `ext_info_id`.
	pub fn with_ext_info(mut self, ext_info_id: impl Into<String>) -> Self {
		self.ext_info_id = Some(ext_info_id.into());

		self
	}
}

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists P2P releases.
	pub async fn p2p_releases(&self, options: &P2pOptions) -> Result<PaginationList<P2pRelease>> {
		self.call(Endpoint::P2P_RELEASES.operation, || {
			let category_id = checked_opt("category_id", options.category_id.as_deref())?;
			let group_id = checked_opt("group_id", options.group_id.as_deref())?;
			let ext_info_id = checked_opt("ext_info_id", options.ext_info_id.as_deref())?;

			Ok(EndpointRequest::new(Endpoint::P2P_RELEASES)
				.page(options.page)
				.query_opt("category_id", category_id)
				.query_opt("group_id", group_id)
				.query_opt("ext_info_id", ext_info_id))
		})
		.await
	}

	/// Lists P2P categories.
	pub async fn p2p_categories(&self) -> Result<Vec<P2pCategory>> {
		self.call(Endpoint::P2P_CATEGORIES.operation, || {
			Ok(EndpointRequest::new(Endpoint::P2P_CATEGORIES))
		})
		.await
	}

	/// Fetches one P2P release.
	pub async fn p2p_release_info(&self, lookup: &ReleaseLookup) -> Result<P2pRelease> {
		self.call(Endpoint::P2P_RELEASE_INFO.operation, || {
			let (name, value) = lookup.query_pair()?;

			Ok(EndpointRequest::new(Endpoint::P2P_RELEASE_INFO).query(name, value))
		})
		.await
	}
}

fn checked_opt<'v>(name: &str, value: Option<&'v str>) -> Result<Option<&'v str>> {
	value.map(|value| require_non_empty(name, value)).transpose()
}
