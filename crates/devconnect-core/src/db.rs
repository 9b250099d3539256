//! Database pool construction and schema bootstrap.
//!
//! Each aggregate keeps its nested sub-collections in JSON columns,
//! so a row updates atomically as a unit; there are no
//! multi-statement transactions anywhere in the service.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::Result;

pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    avatar TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS profiles (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL UNIQUE,
    status TEXT NOT NULL,
    company TEXT,
    website TEXT,
    location TEXT,
    bio TEXT,
    githubusername TEXT,
    skills TEXT NOT NULL,
    social TEXT NOT NULL,
    experience TEXT NOT NULL,
    education TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS posts (
    id TEXT PRIMARY KEY,
    author TEXT NOT NULL,
    text TEXT NOT NULL,
    name TEXT NOT NULL,
    avatar TEXT NOT NULL,
    likes TEXT NOT NULL,
    comments TEXT NOT NULL,
    created_at TEXT NOT NULL
);
"#;

/// Open a pool against `database_url` and make sure the schema
/// exists. Exits the caller with an error rather than limping along
/// without a database.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
	let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
	let pool = SqlitePoolOptions::new().connect_with(options).await?;
	sqlx::raw_sql(SCHEMA).execute(&pool).await?;
	Ok(pool)
}
