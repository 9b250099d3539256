use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One like; the likes list is a set keyed by `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
	pub user: String,
}

/// A comment under a post, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
	pub id: String,
	/// Commenting user id; only they may remove the comment.
	pub user: String,
	pub text: String,
	pub name: String,
	pub avatar: String,
	pub date: DateTime<Utc>,
}

/// Authored content with nested likes and comments.
///
/// `name` and `avatar` are denormalized from the author at creation
/// time, so posts stay renderable after the account is gone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
	pub id: String,
	pub author: String,
	pub text: String,
	pub name: String,
	pub avatar: String,
	pub likes: Vec<Like>,
	pub comments: Vec<Comment>,
	pub created_at: DateTime<Utc>,
}
