//! Media information endpoints.

// self
use crate::{
	_prelude::*,
	api::{
		Client,
		endpoint::{Access, Endpoint, EndpointRequest},
		require_non_empty, require_rating,
	},
	auth::Token,
	http::ApiHttpClient,
	model::{ExtInfo, ExtInfoMedia},
	oauth::TransportErrorMapper,
};

/// Media type filter accepted by browse and search endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtInfoKind {
	/// Movies.
	Movie,
	/// TV shows.
	Tv,
	/// PC games.
	Game,
	/// Console games.
	Console,
	/// Software.
	Software,
	/// Adult content.
	Xxx,
}
impl ExtInfoKind {
	/// Wire value.
	pub const fn as_str(self) -> &'static str {
		match self {
			ExtInfoKind::Movie => "movie",
			ExtInfoKind::Tv => "tv",
			ExtInfoKind::Game => "game",
			ExtInfoKind::Console => "console",
			ExtInfoKind::Software => "software",
			ExtInfoKind::Xxx => "xxx",
		}
	}
}
impl Display for ExtInfoKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for ExtInfoKind {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"movie" => Ok(ExtInfoKind::Movie),
			"tv" => Ok(ExtInfoKind::Tv),
			"game" => Ok(ExtInfoKind::Game),
			"console" => Ok(ExtInfoKind::Console),
			"software" => Ok(ExtInfoKind::Software),
			"xxx" => Ok(ExtInfoKind::Xxx),
			other => Err(Error::invalid_argument(format!("unknown media type `{other}`"))),
		}
	}
}

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches one media record; with a `token` the response includes the user's own rating.
	pub async fn ext_info(&self, id: &str, token: Option<&Token>) -> Result<ExtInfo> {
		self.call(Endpoint::EXT_INFO.operation, || {
			Ok(EndpointRequest::new(Endpoint::EXT_INFO)
				.access(token.map_or(Access::Public, Access::Authenticated))
				.query("id", require_non_empty("ext_info_id", id)?))
		})
		.await
	}

	/// Lists images and videos attached to a media record.
	pub async fn ext_info_media(&self, id: &str) -> Result<Vec<ExtInfoMedia>> {
		self.call(Endpoint::EXT_INFO_MEDIA.operation, || {
			Ok(EndpointRequest::new(Endpoint::EXT_INFO_MEDIA)
				.query("id", require_non_empty("ext_info_id", id)?))
		})
		.await
	}

	/// Rates a media record with a value in `1..=10`.
	pub async fn ext_info_rate(&self, id: &str, rating: u8, token: &Token) -> Result<ExtInfo> {
		self.call(Endpoint::EXT_INFO_RATE.operation, || {
			let rating = require_rating("rating", rating)?;

			Ok(EndpointRequest::new(Endpoint::EXT_INFO_RATE)
				.access(Access::Authenticated(token))
				.form("id", require_non_empty("ext_info_id", id)?)
				.form("rating", rating.to_string()))
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn kinds_round_trip_through_wire_values() {
		for kind in [ExtInfoKind::Movie, ExtInfoKind::Tv, ExtInfoKind::Xxx] {
			assert_eq!(kind.as_str().parse::<ExtInfoKind>().ok(), Some(kind));
		}

		assert!("music".parse::<ExtInfoKind>().is_err());
	}
}
