//! Credential store: registration, password login, lookup, and
//! account cascade deletion.

use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::hasher::PasswordHasher;
use crate::models::User;
use crate::{avatar, Error, Result};

#[derive(Clone)]
pub struct UserStore {
	pool: SqlitePool,
	hasher: Arc<dyn PasswordHasher>,
}

impl UserStore {
	pub fn new(pool: SqlitePool, hasher: Arc<dyn PasswordHasher>) -> Self {
		Self { pool, hasher }
	}

	/// Create an account.
	///
	/// The duplicate check and the insert are separate statements, so
	/// two concurrent registrations of one email can race; the unique
	/// index on `email` then fails the loser instead of minting a
	/// second account.
	pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
		let taken =
			sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = ?")
				.bind(email)
				.fetch_one(&self.pool)
				.await?;
		if taken > 0 {
			return Err(Error::Conflict("User already exists".to_string()));
		}

		let user = User {
			id: Uuid::new_v4().to_string(),
			name: name.to_owned(),
			email: email.to_owned(),
			password_hash: self.hasher.hash(password)?,
			avatar: avatar::url_for(email),
			created_at: Utc::now(),
		};

		sqlx::query(
			"INSERT INTO users (id, name, email, password_hash, avatar, created_at) \
			 VALUES (?, ?, ?, ?, ?, ?)",
		)
		.bind(&user.id)
		.bind(&user.name)
		.bind(&user.email)
		.bind(&user.password_hash)
		.bind(&user.avatar)
		.bind(user.created_at)
		.execute(&self.pool)
		.await?;

		Ok(user)
	}

	/// Resolve a password login to a user id.
	///
	/// Unknown email and wrong password fail identically so callers
	/// cannot probe which addresses hold accounts.
	pub async fn authenticate(&self, email: &str, password: &str) -> Result<String> {
		let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
			.bind(email)
			.fetch_optional(&self.pool)
			.await?
			.ok_or(Error::InvalidCredentials)?;

		if self.hasher.verify(password, &user.password_hash)? {
			Ok(user.id)
		} else {
			Err(Error::InvalidCredentials)
		}
	}

	pub async fn load_by_id(&self, user_id: &str) -> Result<User> {
		sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
			.bind(user_id)
			.fetch_optional(&self.pool)
			.await?
			.ok_or_else(|| Error::NotFound("User not found".to_string()))
	}

	/// Delete the account, its profile, and all of its posts, in that
	/// order.
	///
	/// The three deletes run as separate statements without a
	/// transaction; a failure partway through leaves the remaining
	/// documents behind. Known non-atomic operation, surfaced to the
	/// caller as the failing step's error.
	pub async fn delete_cascade(&self, user_id: &str) -> Result<()> {
		sqlx::query("DELETE FROM users WHERE id = ?")
			.bind(user_id)
			.execute(&self.pool)
			.await?;
		sqlx::query("DELETE FROM profiles WHERE user_id = ?")
			.bind(user_id)
			.execute(&self.pool)
			.await?;
		sqlx::query("DELETE FROM posts WHERE author = ?")
			.bind(user_id)
			.execute(&self.pool)
			.await?;
		Ok(())
	}
}
