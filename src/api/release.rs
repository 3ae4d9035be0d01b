//! Scene release endpoints.

// self
use crate::{
	_prelude::*,
	api::{
		Client, ExtInfoKind,
		endpoint::{Access, Endpoint, EndpointRequest},
		require_non_empty,
	},
	auth::{SCOPE_ADD_PROOF, Token},
	http::ApiHttpClient,
	model::{CategoryTree, Filter, PaginationList, Release, ReleaseAddProof, ReleaseCategory},
	oauth::TransportErrorMapper,
	pagination::Page,
};

/// Value of the `filter` parameter selecting the token user's personal overview.
pub const FILTER_OVERVIEW: &str = "overview";

/// Selects a single release by identifier or directory name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReleaseLookup {
	/// Release identifier.
	Id(String),
	/// Release directory name.
	Dirname(String),
}
impl ReleaseLookup {
	/// Lookup by identifier.
	pub fn id(id: impl Into<String>) -> Self {
		Self::Id(id.into())
	}

	/// Lookup by directory name.
	pub fn dirname(dirname: impl Into<String>) -> Self {
		Self::Dirname(dirname.into())
	}

	pub(crate) fn query_pair(&self) -> Result<(&'static str, &str)> {
		match self {
			Self::Id(id) => Ok(("id", require_non_empty("id", id)?)),
			Self::Dirname(dirname) => Ok(("dirname", require_non_empty("dirname", dirname)?)),
		}
	}
}

/// Identifies a scene or P2P release for endpoints that accept both.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReleaseRef {
	/// Scene release identifier.
	Scene(String),
	/// P2P release identifier.
	P2p(String),
}
impl ReleaseRef {
	/// Scene release reference.
	pub fn scene(id: impl Into<String>) -> Self {
		Self::Scene(id.into())
	}

	/// P2P release reference.
	pub fn p2p(id: impl Into<String>) -> Self {
		Self::P2p(id.into())
	}

	/// Release identifier.
	pub fn id(&self) -> &str {
		match self {
			Self::Scene(id) | Self::P2p(id) => id,
		}
	}

	/// Wire value of the `type` parameter.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Scene(_) => "release",
			Self::P2p(_) => "p2p_rls",
		}
	}

	pub(crate) fn checked_id(&self) -> Result<&str> {
		require_non_empty("release id", self.id())
	}
}

/// Options for [`Client::release_latest`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LatestOptions {
	/// Requested page.
	pub page: Page,
	/// Archive month in `YYYY-MM` form.
	pub archive: Option<String>,
	/// Saved filter to apply.
	pub filter: Option<Filter>,
}
impl LatestOptions {
	/// Sets the requested page.
	pub fn with_page(mut self, page: Page) -> Self {
		self.page = page;

		self
	}

	/// Browses the archive of `month` (`YYYY-MM`).
	pub fn with_archive(mut self, month: impl Into<String>) -> Self {
		self.archive = Some(month.into());

		self
	}

	/// Applies a saved filter.
	pub fn with_filter(mut self, filter: Filter) -> Self {
		self.filter = Some(filter);

		self
	}

	fn filter_param(&self, authenticated: bool) -> Option<String> {
		match &self.filter {
			Some(filter) => Some(filter.id.to_string()),
			None if authenticated => Some(FILTER_OVERVIEW.to_owned()),
			None => None,
		}
	}
}

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches one scene release.
	pub async fn release_info(&self, lookup: &ReleaseLookup) -> Result<Release> {
		self.call(Endpoint::RELEASE_INFO.operation, || {
			let (name, value) = lookup.query_pair()?;

			Ok(EndpointRequest::new(Endpoint::RELEASE_INFO).query(name, value))
		})
		.await
	}

	/// Lists the latest scene releases.
	///
	/// With a `token` the call is authenticated and, unless a filter is set, uses the user's
	/// personal overview filter.
	pub async fn release_latest(
		&self,
		options: &LatestOptions,
		token: Option<&Token>,
	) -> Result<PaginationList<Release>> {
		self.call(Endpoint::RELEASE_LATEST.operation, || {
			let archive = options
				.archive
				.as_deref()
				.map(|archive| require_non_empty("archive", archive))
				.transpose()?;
			let access = token.map_or(Access::Public, Access::Authenticated);

			Ok(EndpointRequest::new(Endpoint::RELEASE_LATEST)
				.access(access)
				.page(options.page)
				.query_opt("archive", archive)
				.query_opt("filter", options.filter_param(token.is_some())))
		})
		.await
	}

	/// Lists scene release categories with parent links resolved by name.
	pub async fn release_categories(&self) -> Result<CategoryTree> {
		self.call::<Vec<ReleaseCategory>, _>(Endpoint::RELEASE_CATEGORIES.operation, || {
			Ok(EndpointRequest::new(Endpoint::RELEASE_CATEGORIES))
		})
		.await
		.map(CategoryTree::new)
	}

	/// Browses one category, optionally restricted to a media type.
	pub async fn release_browse_category(
		&self,
		category: &str,
		ext_info_type: Option<ExtInfoKind>,
		page: Page,
	) -> Result<PaginationList<Release>> {
		self.call(Endpoint::RELEASE_BROWSE_CATEGORY.operation, || {
			Ok(EndpointRequest::new(Endpoint::RELEASE_BROWSE_CATEGORY)
				.query("category_name", require_non_empty("category", category)?)
				.query_opt("ext_info_type", ext_info_type.map(ExtInfoKind::as_str))
				.page(page))
		})
		.await
	}

	/// Lists scene releases linked to a media record.
	pub async fn release_ext_info(
		&self,
		ext_info_id: &str,
		page: Page,
	) -> Result<PaginationList<Release>> {
		self.call(Endpoint::RELEASE_EXT_INFO.operation, || {
			Ok(EndpointRequest::new(Endpoint::RELEASE_EXT_INFO)
				.query("id", require_non_empty("ext_info_id", ext_info_id)?)
				.page(page))
		})
		.await
	}

	/// Lists the public release filters.
	pub async fn release_filters(&self) -> Result<Vec<Filter>> {
		self.call(Endpoint::RELEASE_FILTERS.operation, || {
			Ok(EndpointRequest::new(Endpoint::RELEASE_FILTERS))
		})
		.await
	}

	/// Uploads a proof image for one or more releases; needs the `addproof` scope.
	///
	/// `image` is sent verbatim in the `image` field (a base64 data URI).
	pub async fn release_add_proof<S>(
		&self,
		release_ids: &[S],
		image: &str,
		token: &Token,
	) -> Result<ReleaseAddProof>
	where
		S: AsRef<str>,
	{
		self.call(Endpoint::RELEASE_ADD_PROOF.operation, || {
			if release_ids.is_empty() {
				return Err(Error::invalid_argument("at least one release id is required"));
			}

			let mut request = EndpointRequest::new(Endpoint::RELEASE_ADD_PROOF)
				.access(Access::Scoped { scope: SCOPE_ADD_PROOF, token });

			for id in release_ids {
				request = request.form("id", require_non_empty("release id", id.as_ref())?);
			}

			Ok(request.form("image", require_non_empty("image", image)?))
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn lookup_rejects_empty_values() {
		assert_eq!(
			ReleaseLookup::dirname("Some.Release-GRP").query_pair().ok(),
			Some(("dirname", "Some.Release-GRP"))
		);
		assert!(matches!(ReleaseLookup::id("").query_pair(), Err(Error::InvalidArgument { .. })));
	}

	#[test]
	fn release_refs_map_to_wire_types() {
		assert_eq!(ReleaseRef::scene("a").kind(), "release");
		assert_eq!(ReleaseRef::p2p("b").kind(), "p2p_rls");
		assert_eq!(ReleaseRef::p2p("b").id(), "b");
		assert!(ReleaseRef::scene(" ").checked_id().is_err());
	}

	#[test]
	fn latest_filter_prefers_explicit_filter() {
		let plain = LatestOptions::default();
		let filtered = LatestOptions::default().with_filter(Filter { id: 7, name: "HD".into() });

		assert_eq!(plain.filter_param(false), None);
		assert_eq!(plain.filter_param(true).as_deref(), Some(FILTER_OVERVIEW));
		assert_eq!(filtered.filter_param(false).as_deref(), Some("7"));
		assert_eq!(filtered.filter_param(true).as_deref(), Some("7"));
	}
}
