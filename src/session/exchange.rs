//! Token exchanges for the three supported grants.
//!
//! Every parameter a grant needs is checked before the request is built; all missing ones are
//! reported together in one [`ConfigError::MissingParameters`], and no network call is made.

// self
use crate::{
	_prelude::*,
	api::Client,
	auth::{GrantType, Token, TokenSecret},
	error::ConfigError,
	http::ApiHttpClient,
	oauth::{TokenFacade, TransportErrorMapper},
	obs,
	session::Session,
};

/// Grant-specific input that passed validation.
#[derive(Clone, Copy, Debug)]
pub(crate) enum ExchangeGrant<'a> {
	AuthorizationCode { code: &'a str },
	ClientCredentials,
	RefreshToken { refresh_token: &'a TokenSecret },
}

/// Validated credentials plus grant input for one exchange.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ExchangePlan<'a> {
	pub(crate) client_id: &'a str,
	pub(crate) client_secret: &'a str,
	pub(crate) grant: ExchangeGrant<'a>,
}

impl Session {
	/// Collects every parameter `grant` needs, in wire order
	/// `client_id client_secret code refresh_token`.
	pub(crate) fn plan_exchange<'a>(
		&'a self,
		grant: GrantType,
		code: Option<&'a str>,
		token: Option<&'a Token>,
	) -> Result<ExchangePlan<'a>, ConfigError> {
		let client_id = self.client_id();
		let client_secret = self.client_secret();
		let code = code.filter(|code| !code.is_empty());
		let refresh_token = token.and_then(Token::refresh_secret);
		let mut missing = Vec::new();

		if client_id.is_none() {
			missing.push("client_id");
		}
		if client_secret.is_none() {
			missing.push("client_secret");
		}
		if grant == GrantType::AuthorizationCode && code.is_none() {
			missing.push("code");
		}
		if grant == GrantType::RefreshToken && refresh_token.is_none() {
			missing.push("refresh_token");
		}

		let grant = match grant {
			GrantType::AuthorizationCode =>
				code.map(|code| ExchangeGrant::AuthorizationCode { code }),
			GrantType::ClientCredentials => Some(ExchangeGrant::ClientCredentials),
			GrantType::RefreshToken =>
				refresh_token.map(|refresh_token| ExchangeGrant::RefreshToken { refresh_token }),
		};

		match (client_id, client_secret, grant) {
			(Some(client_id), Some(client_secret), Some(grant)) if missing.is_empty() =>
				Ok(ExchangePlan { client_id, client_secret, grant }),
			_ => Err(ConfigError::MissingParameters { missing }),
		}
	}
}

impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Performs one grant exchange against the token endpoint.
	///
	/// `code` is required for [`GrantType::AuthorizationCode`]; `token` must carry a non-empty
	/// refresh value for [`GrantType::RefreshToken`]. The returned token is a new value; `token`
	/// is never modified. When a refresh response omits a new refresh value, the previous one is
	/// carried over.
	pub async fn exchange_token(
		&self,
		grant: GrantType,
		code: Option<&str>,
		token: Option<&Token>,
	) -> Result<Token> {
		let operation = exchange_operation(grant);

		obs::observe(operation, async move {
			let session = self.session();
			let plan = session.plan_exchange(grant, code, token)?;
			let facade =
				TokenFacade::from_descriptor(self.descriptor(), plan.client_id, plan.client_secret)?;
			let handle = self.intercepted(operation);
			let scopes = session.scopes();

			match plan.grant {
				ExchangeGrant::AuthorizationCode { code } =>
					facade.exchange_code(&handle, code, session.redirect_uri(), scopes).await,
				ExchangeGrant::ClientCredentials =>
					facade.exchange_client_credentials(&handle, session.redirect_uri(), scopes).await,
				ExchangeGrant::RefreshToken { refresh_token } =>
					facade.exchange_refresh_token(&handle, refresh_token, scopes).await,
			}
		})
		.await
	}

	/// Exchanges an authorization code returned by the consent redirect.
	pub async fn exchange_authorization_code(&self, code: &str) -> Result<Token> {
		self.exchange_token(GrantType::AuthorizationCode, Some(code), None).await
	}

	/// Obtains an application token with the client credentials grant.
	pub async fn exchange_client_credentials(&self) -> Result<Token> {
		self.exchange_token(GrantType::ClientCredentials, None, None).await
	}

	/// Trades `token`'s refresh value for a new token.
	pub async fn refresh(&self, token: &Token) -> Result<Token> {
		self.exchange_token(GrantType::RefreshToken, None, Some(token)).await
	}
}

fn exchange_operation(grant: GrantType) -> &'static str {
	match grant {
		GrantType::AuthorizationCode => "exchange_authorization_code",
		GrantType::ClientCredentials => "exchange_client_credentials",
		GrantType::RefreshToken => "refresh",
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn token(refresh: &str) -> Token {
		Token::builder(GrantType::AuthorizationCode)
			.access_token("access")
			.refresh_token(refresh)
			.expires_in(Duration::hours(1))
			.build()
			.expect("Token fixture should build.")
	}

	fn missing(err: ConfigError) -> Vec<&'static str> {
		match err {
			ConfigError::MissingParameters { missing } => missing,
			other => panic!("Unexpected config error: {other:?}."),
		}
	}

	#[test]
	fn anonymous_refresh_lists_everything_in_order() {
		let err = Session::anonymous()
			.plan_exchange(GrantType::RefreshToken, None, None)
			.expect_err("Anonymous refresh must be rejected.");

		assert_eq!(missing(err), ["client_id", "client_secret", "refresh_token"]);

		let err = Session::anonymous()
			.plan_exchange(GrantType::AuthorizationCode, Some(""), None)
			.expect_err("Anonymous code exchange must be rejected.");

		assert_eq!(missing(err), ["client_id", "client_secret", "code"]);
	}

	#[test]
	fn empty_refresh_value_is_missing() {
		let session = Session::new("id", "secret");
		let prior = token("");
		let err = session
			.plan_exchange(GrantType::RefreshToken, None, Some(&prior))
			.expect_err("Empty refresh values must be rejected.");

		assert_eq!(missing(err), ["refresh_token"]);
	}

	#[test]
	fn plans_each_grant() {
		let session = Session::new("id", "secret");
		let prior = token("refresh");
		let plan = session
			.plan_exchange(GrantType::RefreshToken, Some("ignored"), Some(&prior))
			.expect("Refresh with a refresh value should plan.");

		assert_eq!((plan.client_id, plan.client_secret), ("id", "secret"));
		assert!(matches!(
			plan.grant,
			ExchangeGrant::RefreshToken { refresh_token } if refresh_token.expose() == "refresh"
		));
		assert!(matches!(
			session.plan_exchange(GrantType::AuthorizationCode, Some("abc"), None).map(|p| p.grant),
			Ok(ExchangeGrant::AuthorizationCode { code: "abc" })
		));
		assert!(matches!(
			session.plan_exchange(GrantType::ClientCredentials, None, None).map(|p| p.grant),
			Ok(ExchangeGrant::ClientCredentials)
		));
	}
}
