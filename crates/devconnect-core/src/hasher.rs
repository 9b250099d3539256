//! Password hashing behind a trait so the stores never see the
//! algorithm.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::{Error, Result};

pub trait PasswordHasher: Send + Sync {
	/// Hash a plaintext password with a fresh salt.
	fn hash(&self, password: &str) -> Result<String>;

	/// `Ok(true)` when the password matches the stored hash.
	fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Argon2id with default parameters, a moderate work factor.
#[derive(Debug, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
	pub fn new() -> Self {
		Self
	}
}

impl PasswordHasher for Argon2Hasher {
	fn hash(&self, password: &str) -> Result<String> {
		let salt = SaltString::generate(&mut OsRng);
		Argon2::default()
			.hash_password(password.as_bytes(), &salt)
			.map(|hash| hash.to_string())
			.map_err(|e| Error::Internal(e.to_string()))
	}

	fn verify(&self, password: &str, hash: &str) -> Result<bool> {
		let parsed = PasswordHash::new(hash).map_err(|e| Error::Internal(e.to_string()))?;
		Ok(Argon2::default()
			.verify_password(password.as_bytes(), &parsed)
			.is_ok())
	}
}
