use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account.
///
/// The password hash never crosses the serialization boundary: it is
/// skipped on output, so no handler can leak it, and defaulted on
/// input, so API responses round-trip through clients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
	pub id: String,
	pub name: String,
	pub email: String,
	#[serde(skip_serializing, default)]
	pub password_hash: String,
	pub avatar: String,
	pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn password_hash_is_never_serialized() {
		let user = User {
			id: "u1".to_string(),
			name: "Dev".to_string(),
			email: "dev@example.com".to_string(),
			password_hash: "secret-hash".to_string(),
			avatar: "https://example.com/a.png".to_string(),
			created_at: Utc::now(),
		};

		let json = serde_json::to_string(&user).unwrap();
		assert!(!json.contains("secret-hash"));
		assert!(!json.contains("password_hash"));
	}
}
