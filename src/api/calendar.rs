//! Release calendar.

// self
use crate::{
	_prelude::*,
	api::{
		Client,
		endpoint::{Endpoint, EndpointRequest},
	},
	http::ApiHttpClient,
	model::ExtInfo,
	oauth::TransportErrorMapper,
};

const COUNTRIES: [&str; 2] = ["de", "us"];

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists upcoming media for `country` (`de` or `us`).
	pub async fn calendar_upcoming(&self, country: &str) -> Result<Vec<ExtInfo>> {
		self.call(Endpoint::CALENDAR_UPCOMING.operation, || {
			if !COUNTRIES.contains(&country) {
				return Err(Error::invalid_argument(format!(
					"country must be one of de, us; got `{country}`"
				)));
			}

			Ok(EndpointRequest::new(Endpoint::CALENDAR_UPCOMING).query("country", country))
		})
		.await
	}
}
