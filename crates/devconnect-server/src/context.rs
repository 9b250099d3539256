//! Shared application state.

use std::sync::Arc;

use sqlx::SqlitePool;

use devconnect_core::config::Settings;
use devconnect_core::hasher::Argon2Hasher;
use devconnect_core::store::{PostStore, ProfileStore, UserStore};
use devconnect_core::token::TokenService;

/// Everything a handler needs, shared across connection tasks.
///
/// Handlers hold no other state; aggregate-level concurrency control
/// is the database's, so concurrent read-modify-write sequences on
/// one document can still lose updates (accepted limitation).
pub struct AppContext {
	pub settings: Settings,
	pub tokens: Arc<TokenService>,
	pub users: UserStore,
	pub profiles: ProfileStore,
	pub posts: PostStore,
}

impl AppContext {
	pub fn new(settings: Settings, pool: SqlitePool) -> Self {
		let tokens = Arc::new(TokenService::new(settings.jwt_secret.as_bytes()));
		let hasher = Arc::new(Argon2Hasher::new());

		Self {
			tokens,
			users: UserStore::new(pool.clone(), hasher),
			profiles: ProfileStore::new(pool.clone()),
			posts: PostStore::new(pool),
			settings,
		}
	}
}
