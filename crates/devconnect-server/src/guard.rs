//! Per-route authentication guard.

use std::sync::Arc;

use devconnect_core::token::TokenService;
use devconnect_core::{Error, Result};

use crate::http::Request;

/// Header carrying the bearer token.
pub const AUTH_HEADER: &str = "x-auth-token";

/// Resolves the caller identity on protected routes.
///
/// Pure request decoration: the guard never touches the store and has
/// no side effects beyond attaching the user id.
pub struct AuthGuard {
	tokens: Arc<TokenService>,
}

impl AuthGuard {
	pub fn new(tokens: Arc<TokenService>) -> Self {
		Self { tokens }
	}

	/// Attach the authenticated user id to the request, or fail with
	/// `Unauthorized`.
	pub fn authenticate(&self, request: &mut Request) -> Result<()> {
		let token = request
			.header(AUTH_HEADER)
			.ok_or_else(|| Error::Unauthorized("No token, authorization denied".to_string()))?;
		let user_id = self.tokens.verify(token)?;
		request.auth_user = Some(user_id);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bytes::Bytes;
	use hyper::{HeaderMap, Method, Uri};

	fn request_with_headers(headers: HeaderMap) -> Request {
		Request::new(Method::GET, Uri::from_static("/api/auth"), headers, Bytes::new())
	}

	#[test]
	fn missing_header_is_unauthorized() {
		let guard = AuthGuard::new(Arc::new(TokenService::new(b"secret")));
		let mut request = request_with_headers(HeaderMap::new());

		assert!(matches!(
			guard.authenticate(&mut request),
			Err(Error::Unauthorized(_))
		));
		assert!(request.auth_user.is_none());
	}

	#[test]
	fn valid_token_decorates_the_request() {
		let tokens = Arc::new(TokenService::new(b"secret"));
		let token = tokens.issue("user-1").unwrap();
		let guard = AuthGuard::new(tokens);

		let mut headers = HeaderMap::new();
		headers.insert(AUTH_HEADER, token.parse().unwrap());
		let mut request = request_with_headers(headers);

		guard.authenticate(&mut request).unwrap();
		assert_eq!(request.auth_user.as_deref(), Some("user-1"));
	}

	#[test]
	fn bad_token_is_unauthorized() {
		let guard = AuthGuard::new(Arc::new(TokenService::new(b"secret")));

		let mut headers = HeaderMap::new();
		headers.insert(AUTH_HEADER, "garbage".parse().unwrap());
		let mut request = request_with_headers(headers);

		assert!(matches!(
			guard.authenticate(&mut request),
			Err(Error::Unauthorized(_))
		));
	}
}
