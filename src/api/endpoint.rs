//! Endpoint catalog and request construction.
//!
//! An [`EndpointRequest`] is the boundary between the facade and the transport: it names the
//! endpoint, carries query and form parameters, and declares the [`Access`] class that decides
//! whether the scope guard runs and a bearer header is attached.

// crates.io
use oauth2::{
	HttpRequest,
	http::{
		Method,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::Token,
	error::{ConfigError, PermissionError},
	pagination::Page,
	service::ServiceDescriptor,
	session::Session,
};

/// Scope label reported when an authenticated endpoint is called without any scope list.
pub const ACCESS_AUTHENTICATED: &str = "authenticated";

/// One service endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
	/// Operation label used in spans, metrics, and empty-result errors.
	pub operation: &'static str,
	/// HTTP method.
	pub method: Method,
	/// Path relative to the API base.
	pub path: &'static str,
}
impl Endpoint {
	const fn get(operation: &'static str, path: &'static str) -> Self {
		Self { operation, method: Method::GET, path }
	}

	const fn post(operation: &'static str, path: &'static str) -> Self {
		Self { operation, method: Method::POST, path }
	}
}

#[allow(missing_docs)]
impl Endpoint {
	pub const CALENDAR_UPCOMING: Self = Self::get("calendar_upcoming", "calendar/upcoming.json");
	pub const COMMENTS_ADD: Self = Self::post("add_comment", "comments/add.json");
	pub const COMMENTS_GET: Self = Self::get("comments", "comments/get.json");
	pub const EXT_INFO: Self = Self::get("ext_info", "ext_info/info.json");
	pub const EXT_INFO_MEDIA: Self = Self::get("ext_info_media", "ext_info/media.json");
	pub const EXT_INFO_RATE: Self = Self::post("ext_info_rate", "ext_info/rate.json");
	pub const FAVS_LISTS: Self = Self::get("favorite_lists", "favs/lists.json");
	pub const FAVS_LIST_ADD_ENTRY: Self =
		Self::post("favorite_list_add_entry", "favs/list_addentry.json");
	pub const FAVS_LIST_DEL_ENTRY: Self =
		Self::post("favorite_list_remove_entry", "favs/list_delentry.json");
	pub const FAVS_LIST_ENTRIES: Self = Self::get("favorite_list_entries", "favs/list_entries.json");
	pub const FAVS_LIST_MARK_READ: Self =
		Self::post("favorite_list_mark_read", "favs/list_markread.json");
	pub const NFO_P2P_RELEASE: Self = Self::get("nfo", "nfo/p2p_rls.json");
	pub const NFO_RELEASE: Self = Self::get("nfo", "nfo/release.json");
	pub const P2P_CATEGORIES: Self = Self::get("p2p_categories", "p2p/categories.json");
	pub const P2P_RELEASES: Self = Self::get("p2p_releases", "p2p/releases.json");
	pub const P2P_RELEASE_INFO: Self = Self::get("p2p_release_info", "p2p/rls_info.json");
	pub const RELEASE_ADD_PROOF: Self = Self::post("release_add_proof", "release/addproof.json");
	pub const RELEASE_BROWSE_CATEGORY: Self =
		Self::get("release_browse_category", "release/browse_category.json");
	pub const RELEASE_CATEGORIES: Self = Self::get("release_categories", "release/categories.json");
	pub const RELEASE_EXT_INFO: Self = Self::get("release_ext_info", "release/ext_info.json");
	pub const RELEASE_FILTERS: Self = Self::get("release_filters", "release/filters.json");
	pub const RELEASE_INFO: Self = Self::get("release_info", "release/info.json");
	pub const RELEASE_LATEST: Self = Self::get("release_latest", "release/latest.json");
	pub const SEARCH_EXT_INFO: Self = Self::get("search_ext_info", "search/ext_info.json");
	pub const SEARCH_RELEASES: Self = Self::get("search_releases", "search/releases.json");
	pub const USER_INFO: Self = Self::post("user_info", "user/info.json");
}

/// Access class of a request.
#[derive(Clone, Copy, Debug)]
pub enum Access<'a> {
	/// No guard, no bearer header.
	Public,
	/// Requires a configured scope list; attaches the token.
	Authenticated(&'a Token),
	/// Requires `scope` in the configured scope list; attaches the token.
	Scoped {
		/// Scope the endpoint needs.
		scope: &'static str,
		/// Token attached as the bearer header.
		token: &'a Token,
	},
}
impl Access<'_> {
	/// Runs the scope guard and returns the `Authorization` value to attach, if any.
	pub fn authorize(&self, session: &Session) -> Result<Option<String>, PermissionError> {
		match self {
			Access::Public => Ok(None),
			Access::Authenticated(token) => {
				session.require_scopes_configured(ACCESS_AUTHENTICATED)?;

				Ok(Some(token.bearer_header()))
			},
			Access::Scoped { scope, token } => {
				session.require_scope(scope)?;

				Ok(Some(token.bearer_header()))
			},
		}
	}

	/// Returns true when the endpoint is restricted.
	pub fn is_restricted(&self) -> bool {
		!matches!(self, Access::Public)
	}
}

/// Request for one endpoint, before the scope guard and URL resolution.
#[derive(Clone, Debug)]
pub struct EndpointRequest<'a> {
	/// Target endpoint.
	pub endpoint: Endpoint,
	/// Access class.
	pub access: Access<'a>,
	query: Vec<(&'static str, String)>,
	form: Vec<(&'static str, String)>,
}
impl<'a> EndpointRequest<'a> {
	/// Starts a public request for `endpoint`.
	pub fn new(endpoint: Endpoint) -> Self {
		Self { endpoint, access: Access::Public, query: Vec::new(), form: Vec::new() }
	}

	/// Sets the access class.
	pub fn access(mut self, access: Access<'a>) -> Self {
		self.access = access;

		self
	}

	/// Appends a query parameter.
	pub fn query(mut self, name: &'static str, value: impl Into<String>) -> Self {
		self.query.push((name, value.into()));

		self
	}

	/// Appends a query parameter when `value` is present.
	pub fn query_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
		match value {
			Some(value) => self.query(name, value),
			None => self,
		}
	}

	/// Appends the normalized `per_page` and `page` parameters.
	pub fn page(mut self, page: Page) -> Self {
		self.query.extend(page.query());

		self
	}

	/// Appends a form field; repeated names are sent repeatedly.
	pub fn form(mut self, name: &'static str, value: impl Into<String>) -> Self {
		self.form.push((name, value.into()));

		self
	}

	/// Appends a form field when `value` is present.
	pub fn form_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
		match value {
			Some(value) => self.form(name, value),
			None => self,
		}
	}

	/// Query parameters in insertion order.
	pub fn query_pairs(&self) -> &[(&'static str, String)] {
		&self.query
	}

	/// Form fields in insertion order.
	pub fn form_pairs(&self) -> &[(&'static str, String)] {
		&self.form
	}

	/// Builds the HTTP request; `authorization` is attached verbatim when present.
	pub(crate) fn build(
		&self,
		descriptor: &ServiceDescriptor,
		authorization: Option<&str>,
	) -> Result<HttpRequest> {
		let mut url = descriptor.endpoint(self.endpoint.path)?;

		if !self.query.is_empty() {
			url.query_pairs_mut().extend_pairs(&self.query);
		}

		let mut builder = oauth2::http::Request::builder()
			.method(self.endpoint.method.clone())
			.uri(url.as_str())
			.header(ACCEPT, "application/json");

		if let Some(value) = authorization {
			builder = builder.header(AUTHORIZATION, value);
		}

		let body = if self.endpoint.method == Method::POST {
			builder = builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded");

			form_urlencoded::Serializer::new(String::new())
				.extend_pairs(&self.form)
				.finish()
				.into_bytes()
		} else {
			Vec::new()
		};

		builder.body(body).map_err(|e| ConfigError::from(e).into())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::{GrantType, SCOPE_ADD_PROOF, SCOPE_VIEW_NFO, ScopeSet};

	fn descriptor() -> ServiceDescriptor {
		ServiceDescriptor::builder()
			.api_base(Url::parse("https://api.example.com/v2/").expect("Base URL should parse."))
			.build()
			.expect("Descriptor should build.")
	}

	fn token() -> Token {
		Token::builder(GrantType::ClientCredentials)
			.access_token("access")
			.issued_at(OffsetDateTime::now_utc())
			.expires_in(Duration::hours(1))
			.build()
			.expect("Token fixture should build.")
	}

	#[test]
	fn get_requests_carry_query_and_no_body() {
		let request = EndpointRequest::new(Endpoint::RELEASE_LATEST)
			.page(Page::new(3, 0))
			.query_opt("archive", Some("2024-01"))
			.query_opt("filter", None::<String>)
			.build(&descriptor(), None)
			.expect("Request should build.");

		assert_eq!(request.method(), &Method::GET);
		assert_eq!(
			request.uri().to_string(),
			"https://api.example.com/v2/release/latest.json?per_page=5&page=1&archive=2024-01"
		);
		assert!(request.body().is_empty());
		assert!(request.headers().get(AUTHORIZATION).is_none());
	}

	#[test]
	fn post_requests_repeat_form_fields() {
		let request = EndpointRequest::new(Endpoint::RELEASE_ADD_PROOF)
			.form("id", "a")
			.form("id", "b")
			.form("image", "data:image/png;base64,AA==")
			.build(&descriptor(), Some("Bearer access"))
			.expect("Request should build.");

		assert_eq!(request.body(), b"id=a&id=b&image=data%3Aimage%2Fpng%3Bbase64%2CAA%3D%3D");
		assert_eq!(
			request.headers().get(CONTENT_TYPE).and_then(|value| value.to_str().ok()),
			Some("application/x-www-form-urlencoded")
		);
		assert_eq!(
			request.headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok()),
			Some("Bearer access")
		);
	}

	#[test]
	fn access_classes_guard_before_attaching_tokens() {
		let token = token();
		let scoped = Access::Scoped { scope: SCOPE_ADD_PROOF, token: &token };
		let anonymous = Session::anonymous();
		let viewer = Session::new("id", "secret").with_scopes(
			ScopeSet::new([SCOPE_VIEW_NFO]).expect("Scope fixture should be valid."),
		);

		assert_eq!(Access::Public.authorize(&anonymous), Ok(None));
		assert!(matches!(
			Access::Authenticated(&token).authorize(&anonymous),
			Err(PermissionError::ScopesNotConfigured { .. })
		));
		assert_eq!(
			Access::Authenticated(&token).authorize(&viewer),
			Ok(Some(token.bearer_header()))
		);
		assert!(matches!(scoped.authorize(&viewer), Err(PermissionError::MissingScope { .. })));
		assert!(scoped.is_restricted());
		assert!(!Access::Public.is_restricted());
	}
}
