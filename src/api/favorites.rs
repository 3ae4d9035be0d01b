//! Favorite list endpoints; all of them are authenticated.

// self
use crate::{
	_prelude::*,
	api::{
		Client, ReleaseRef,
		endpoint::{Access, Endpoint, EndpointRequest},
		require_non_empty,
		search::bool_param,
	},
	auth::Token,
	http::ApiHttpClient,
	model::{ExtInfo, Favorite, FavoriteEntryChange, FavoriteMarkRead},
	oauth::TransportErrorMapper,
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists the token user's favorite lists.
	pub async fn favorite_lists(&self, token: &Token) -> Result<Vec<Favorite>> {
		self.call(Endpoint::FAVS_LISTS.operation, || {
			Ok(EndpointRequest::new(Endpoint::FAVS_LISTS).access(Access::Authenticated(token)))
		})
		.await
	}

	/// Lists the entries of one favorite list, optionally with their unread releases.
	pub async fn favorite_list_entries(
		&self,
		list_id: i64,
		get_releases: bool,
		token: &Token,
	) -> Result<Vec<ExtInfo>> {
		self.call(Endpoint::FAVS_LIST_ENTRIES.operation, || {
			Ok(EndpointRequest::new(Endpoint::FAVS_LIST_ENTRIES)
				.access(Access::Authenticated(token))
				.query("id", list_id.to_string())
				.query("get_releases", bool_param(get_releases)))
		})
		.await
	}

	/// Adds a media record to a favorite list.
	pub async fn favorite_list_add_entry(
		&self,
		list_id: i64,
		ext_info_id: &str,
		token: &Token,
	) -> Result<FavoriteEntryChange> {
		self.change_entry(Endpoint::FAVS_LIST_ADD_ENTRY, list_id, ext_info_id, token).await
	}

	/// Removes a media record from a favorite list.
	pub async fn favorite_list_remove_entry(
		&self,
		list_id: i64,
		ext_info_id: &str,
		token: &Token,
	) -> Result<FavoriteEntryChange> {
		self.change_entry(Endpoint::FAVS_LIST_DEL_ENTRY, list_id, ext_info_id, token).await
	}

	/// Marks a release in a favorite list as read.
	pub async fn favorite_list_mark_read(
		&self,
		list_id: i64,
		release: &ReleaseRef,
		token: &Token,
	) -> Result<FavoriteMarkRead> {
		self.call(Endpoint::FAVS_LIST_MARK_READ.operation, || {
			Ok(EndpointRequest::new(Endpoint::FAVS_LIST_MARK_READ)
				.access(Access::Authenticated(token))
				.form("id", list_id.to_string())
				.form("release_id", release.checked_id()?)
				.form("type", release.kind()))
		})
		.await
	}

	async fn change_entry(
		&self,
		endpoint: Endpoint,
		list_id: i64,
		ext_info_id: &str,
		token: &Token,
	) -> Result<FavoriteEntryChange> {
		self.call(endpoint.operation, || {
			Ok(EndpointRequest::new(endpoint)
				.access(Access::Authenticated(token))
				.form("id", list_id.to_string())
				.form("ext_info_id", require_non_empty("ext_info_id", ext_info_id)?))
		})
		.await
	}
}
