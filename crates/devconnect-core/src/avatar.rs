//! Deterministic avatar references derived from an email address.

use sha2::{Digest, Sha256};

/// Gravatar-style URL for `email`.
///
/// The address is trimmed and lowercased before hashing so the same
/// mailbox always maps to the same image, whatever the caller typed.
pub fn url_for(email: &str) -> String {
	let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
	let mut hex = String::with_capacity(digest.len() * 2);
	for byte in digest {
		hex.push_str(&format!("{byte:02x}"));
	}
	format!("https://www.gravatar.com/avatar/{hex}?s=200&r=pg&d=mm")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn derivation_is_deterministic_and_case_insensitive() {
		assert_eq!(url_for("dev@example.com"), url_for(" Dev@Example.COM "));
	}

	#[test]
	fn distinct_emails_get_distinct_avatars() {
		assert_ne!(url_for("a@example.com"), url_for("b@example.com"));
	}
}
