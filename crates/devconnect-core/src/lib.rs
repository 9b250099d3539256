//! Domain logic for the devconnect developer-connector service.
//!
//! The HTTP layer lives in `devconnect-server`; this crate holds
//! everything beneath it: configuration, the error taxonomy, token
//! issuance and verification, password hashing, avatar derivation,
//! the data model, and the SQL-backed aggregate stores.

pub mod avatar;
pub mod config;
pub mod db;
pub mod error;
pub mod hasher;
pub mod models;
pub mod store;
pub mod token;

pub use error::{Error, Result};
