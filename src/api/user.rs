//! Authenticated user.

// self
use crate::{
	_prelude::*,
	api::{
		Client,
		endpoint::{Access, Endpoint, EndpointRequest},
	},
	auth::Token,
	http::ApiHttpClient,
	model::User,
	oauth::TransportErrorMapper,
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the user the token was issued for.
	pub async fn user_info(&self, token: &Token) -> Result<User> {
		self.call(Endpoint::USER_INFO.operation, || {
			Ok(EndpointRequest::new(Endpoint::USER_INFO).access(Access::Authenticated(token)))
		})
		.await
	}
}
