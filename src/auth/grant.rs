//! Grant types understood by the token endpoint.

// self
use crate::_prelude::*;

/// OAuth 2.0 grant types accepted by the token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Authorization Code grant for user-delegated tokens.
	AuthorizationCode,
	/// Refresh Token grant exchanging a prior token's refresh value.
	RefreshToken,
	/// Client Credentials grant for app-only tokens.
	ClientCredentials,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
			GrantType::ClientCredentials => "client_credentials",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for GrantType {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"authorization_code" => Ok(GrantType::AuthorizationCode),
			"refresh_token" => Ok(GrantType::RefreshToken),
			"client_credentials" => Ok(GrantType::ClientCredentials),
			other => Err(Error::invalid_argument(format!("invalid grant_type `{other}`"))),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn parses_exactly_three_literals() {
		for grant in
			[GrantType::AuthorizationCode, GrantType::RefreshToken, GrantType::ClientCredentials]
		{
			assert_eq!(GrantType::from_str(grant.as_str()).ok(), Some(grant));
		}

		let err = GrantType::from_str("password").expect_err("Unknown grants must be rejected.");

		assert!(matches!(err, Error::InvalidArgument { .. }));
		assert!(GrantType::from_str("Authorization_Code").is_err());
	}
}
