//! SQL-backed aggregate stores.

mod posts;
mod profiles;
mod users;

pub use posts::PostStore;
pub use profiles::ProfileStore;
pub use users::UserStore;

#[cfg(test)]
pub(crate) mod testing {
	use sqlx::sqlite::SqlitePoolOptions;
	use sqlx::SqlitePool;

	/// In-memory pool pinned to one connection so every statement
	/// sees the same database.
	pub async fn memory_pool() -> SqlitePool {
		let pool = SqlitePoolOptions::new()
			.max_connections(1)
			.connect("sqlite::memory:")
			.await
			.expect("in-memory pool");
		sqlx::raw_sql(crate::db::SCHEMA)
			.execute(&pool)
			.await
			.expect("schema bootstrap");
		pool
	}
}
