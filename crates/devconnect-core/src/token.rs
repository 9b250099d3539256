//! Issues and verifies the signed identity assertions carried in the
//! `x-auth-token` header.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Claims embedded in an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
	/// Owning user id.
	pub sub: String,
	/// Issued-at, seconds since the epoch.
	pub iat: i64,
	/// Expiry instant, `iat` plus the service TTL.
	pub exp: i64,
}

/// Stateless token service.
///
/// Nothing is persisted and there is no refresh or revocation list:
/// an expired token forces the caller to authenticate again, and
/// logout is purely client-side discard.
pub struct TokenService {
	encoding_key: EncodingKey,
	decoding_key: DecodingKey,
	validation: Validation,
	ttl: Duration,
}

impl TokenService {
	pub fn new(secret: &[u8]) -> Self {
		let mut validation = Validation::new(Algorithm::HS256);
		// The expiry instant itself is the cutoff.
		validation.leeway = 0;

		Self {
			encoding_key: EncodingKey::from_secret(secret),
			decoding_key: DecodingKey::from_secret(secret),
			validation,
			ttl: Duration::hours(1),
		}
	}

	/// Override the one-hour default lifetime.
	pub fn with_ttl(mut self, ttl: Duration) -> Self {
		self.ttl = ttl;
		self
	}

	/// Produce a signed token asserting `user_id` until the TTL elapses.
	pub fn issue(&self, user_id: &str) -> Result<String> {
		let now = Utc::now();
		let claims = Claims {
			sub: user_id.to_owned(),
			iat: now.timestamp(),
			exp: (now + self.ttl).timestamp(),
		};

		encode(&Header::default(), &claims, &self.encoding_key)
			.map_err(|e| Error::Internal(e.to_string()))
	}

	/// Resolve the user id asserted by `token`.
	///
	/// Fails uniformly for a bad signature, a malformed payload, and
	/// an elapsed expiry.
	pub fn verify(&self, token: &str) -> Result<String> {
		decode::<Claims>(token, &self.decoding_key, &self.validation)
			.map(|data| data.claims.sub)
			.map_err(|_| Error::Unauthorized("Token is not valid".to_string()))
	}
}
