//! Caller-owned authentication state.
//!
//! The session is seeded exactly once, at startup, from a token file;
//! after that it is a plain value passed to the [`ApiClient`], never a
//! process-wide global. Logout is a client-side discard: the server
//! keeps no session state to invalidate.
//!
//! [`ApiClient`]: crate::ApiClient

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The current bearer token, optionally backed by a file.
#[derive(Debug, Clone, Default)]
pub struct Session {
	token: Option<String>,
	path: Option<PathBuf>,
}

impl Session {
	/// A session with no persistence, starting logged out.
	pub fn in_memory() -> Self {
		Self::default()
	}

	/// Seed a session from `path`. A missing file means logged out;
	/// any other read failure is surfaced.
	pub fn load(path: impl Into<PathBuf>) -> io::Result<Self> {
		let path = path.into();
		let token = match fs::read_to_string(&path) {
			Ok(raw) => {
				let trimmed = raw.trim();
				(!trimmed.is_empty()).then(|| trimmed.to_string())
			}
			Err(err) if err.kind() == io::ErrorKind::NotFound => None,
			Err(err) => return Err(err),
		};

		Ok(Self {
			token,
			path: Some(path),
		})
	}

	pub fn token(&self) -> Option<&str> {
		self.token.as_deref()
	}

	pub fn is_authenticated(&self) -> bool {
		self.token.is_some()
	}

	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	/// Adopt a freshly issued token and persist it if the session is
	/// file-backed.
	pub fn store(&mut self, token: String) -> io::Result<()> {
		if let Some(path) = &self.path {
			fs::write(path, &token)?;
		}
		self.token = Some(token);
		Ok(())
	}

	/// Log out: drop the token and remove the backing file. A file
	/// that is already gone is not an error.
	pub fn clear(&mut self) -> io::Result<()> {
		self.token = None;
		if let Some(path) = &self.path {
			match fs::remove_file(path) {
				Ok(()) => {}
				Err(err) if err.kind() == io::ErrorKind::NotFound => {}
				Err(err) => return Err(err),
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use uuid::Uuid;

	fn scratch_path() -> PathBuf {
		std::env::temp_dir().join(format!("devconnect-session-{}", Uuid::new_v4()))
	}

	#[test]
	fn missing_file_means_logged_out() {
		let session = Session::load(scratch_path()).unwrap();
		assert!(!session.is_authenticated());
	}

	#[test]
	fn store_persists_and_reload_seeds() {
		let path = scratch_path();
		let mut session = Session::load(&path).unwrap();
		session.store("abc.def.ghi".to_string()).unwrap();

		let reloaded = Session::load(&path).unwrap();
		assert_eq!(reloaded.token(), Some("abc.def.ghi"));

		std::fs::remove_file(&path).unwrap();
	}

	#[test]
	fn clear_removes_the_file_and_is_idempotent() {
		let path = scratch_path();
		let mut session = Session::load(&path).unwrap();
		session.store("abc.def.ghi".to_string()).unwrap();

		session.clear().unwrap();
		assert!(!session.is_authenticated());
		assert!(!path.exists());

		// No file left behind, still fine.
		session.clear().unwrap();
	}

	#[test]
	fn in_memory_sessions_touch_no_files() {
		let mut session = Session::in_memory();
		session.store("abc.def.ghi".to_string()).unwrap();
		assert!(session.is_authenticated());
		session.clear().unwrap();
		assert_eq!(session.token(), None);
	}
}
