//! NFO retrieval.

// self
use crate::{
	_prelude::*,
	api::{
		Client, ReleaseRef,
		endpoint::{Access, Endpoint, EndpointRequest},
	},
	auth::{SCOPE_VIEW_NFO, Token},
	http::ApiHttpClient,
	obs,
	oauth::TransportErrorMapper,
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Downloads the NFO image of a release as raw bytes; needs the `viewnfo` scope.
	///
	/// The body is still probed for an error payload, so a JSON error never comes back as image
	/// data.
	pub async fn nfo(&self, release: &ReleaseRef, token: &Token) -> Result<Vec<u8>> {
		let endpoint = match release {
			ReleaseRef::Scene(_) => Endpoint::NFO_RELEASE,
			ReleaseRef::P2p(_) => Endpoint::NFO_P2P_RELEASE,
		};

		obs::observe(endpoint.operation, async move {
			let id = release.checked_id()?;
			let request = EndpointRequest::new(endpoint)
				.access(Access::Scoped { scope: SCOPE_VIEW_NFO, token })
				.query("id", id);

			self.fetch_bytes(request).await
		})
		.await
	}
}
