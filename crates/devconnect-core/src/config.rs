//! Runtime configuration pulled from the environment.

use std::env;

use crate::{Error, Result};

/// Process-wide settings.
///
/// `DATABASE_URL` and `PORT` fall back to local-development defaults;
/// the signing secret never does, so a deployment cannot silently run
/// with a hard-coded key.
#[derive(Debug, Clone)]
pub struct Settings {
	pub database_url: String,
	pub jwt_secret: String,
	pub port: u16,
}

impl Settings {
	pub fn from_env() -> Result<Self> {
		let database_url = env::var("DATABASE_URL")
			.unwrap_or_else(|_| "sqlite:devconnect.db?mode=rwc".to_string());
		let jwt_secret = env::var("JWT_SECRET")
			.map_err(|_| Error::Internal("JWT_SECRET is not set".to_string()))?;
		let port = match env::var("PORT") {
			Ok(raw) => raw
				.parse()
				.map_err(|_| Error::Internal(format!("invalid PORT value: {raw}")))?,
			Err(_) => 5000,
		};

		Ok(Self {
			database_url,
			jwt_secret,
			port,
		})
	}
}
