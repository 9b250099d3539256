//! Post aggregate: authored content with nested likes and comments.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::models::{Comment, Like, Post, User};
use crate::{Error, Result};

#[derive(FromRow)]
struct PostRow {
	id: String,
	author: String,
	text: String,
	name: String,
	avatar: String,
	likes: Json<Vec<Like>>,
	comments: Json<Vec<Comment>>,
	created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
	fn from(row: PostRow) -> Self {
		Post {
			id: row.id,
			author: row.author,
			text: row.text,
			name: row.name,
			avatar: row.avatar,
			likes: row.likes.0,
			comments: row.comments.0,
			created_at: row.created_at,
		}
	}
}

#[derive(Clone)]
pub struct PostStore {
	pool: SqlitePool,
}

impl PostStore {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Create a post, denormalizing the author's current name and
	/// avatar onto it.
	pub async fn create(&self, author: &User, text: &str) -> Result<Post> {
		let row = PostRow {
			id: Uuid::new_v4().to_string(),
			author: author.id.clone(),
			text: text.to_owned(),
			name: author.name.clone(),
			avatar: author.avatar.clone(),
			likes: Json(Vec::new()),
			comments: Json(Vec::new()),
			created_at: Utc::now(),
		};

		sqlx::query(
			"INSERT INTO posts (id, author, text, name, avatar, likes, comments, created_at) \
			 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
		)
		.bind(&row.id)
		.bind(&row.author)
		.bind(&row.text)
		.bind(&row.name)
		.bind(&row.avatar)
		.bind(&row.likes)
		.bind(&row.comments)
		.bind(row.created_at)
		.execute(&self.pool)
		.await?;

		Ok(row.into())
	}

	pub async fn get(&self, post_id: &str) -> Result<Post> {
		self.require_row(post_id).await.map(Into::into)
	}

	/// All posts, newest first.
	pub async fn list(&self) -> Result<Vec<Post>> {
		let rows =
			sqlx::query_as::<_, PostRow>("SELECT * FROM posts ORDER BY created_at DESC")
				.fetch_all(&self.pool)
				.await?;
		Ok(rows.into_iter().map(Into::into).collect())
	}

	/// Delete a post; only its author may.
	pub async fn delete(&self, post_id: &str, requester: &str) -> Result<()> {
		let row = self.require_row(post_id).await?;
		if row.author != requester {
			return Err(Error::Forbidden("User not authorized".to_string()));
		}

		sqlx::query("DELETE FROM posts WHERE id = ?")
			.bind(post_id)
			.execute(&self.pool)
			.await?;
		Ok(())
	}

	/// Add `user_id` to the likes set; liking twice is a conflict.
	pub async fn like(&self, post_id: &str, user_id: &str) -> Result<Vec<Like>> {
		let mut row = self.require_row(post_id).await?;
		if row.likes.0.iter().any(|like| like.user == user_id) {
			return Err(Error::Conflict("Post already liked".to_string()));
		}

		row.likes.0.insert(
			0,
			Like {
				user: user_id.to_owned(),
			},
		);
		self.save(&row).await?;
		Ok(row.likes.0)
	}

	/// Remove exactly one like for `user_id`; unliking a post the
	/// user never liked is a conflict.
	pub async fn unlike(&self, post_id: &str, user_id: &str) -> Result<Vec<Like>> {
		let mut row = self.require_row(post_id).await?;
		let position = row
			.likes
			.0
			.iter()
			.position(|like| like.user == user_id)
			.ok_or_else(|| Error::Conflict("Post has not yet been liked".to_string()))?;

		row.likes.0.remove(position);
		self.save(&row).await?;
		Ok(row.likes.0)
	}

	/// Prepend a comment and return the updated comment list.
	pub async fn add_comment(&self, post_id: &str, user: &User, text: &str) -> Result<Vec<Comment>> {
		let mut row = self.require_row(post_id).await?;
		row.comments.0.insert(
			0,
			Comment {
				id: Uuid::new_v4().to_string(),
				user: user.id.clone(),
				text: text.to_owned(),
				name: user.name.clone(),
				avatar: user.avatar.clone(),
				date: Utc::now(),
			},
		);
		self.save(&row).await?;
		Ok(row.comments.0)
	}

	/// Remove a comment; only its author may.
	pub async fn remove_comment(
		&self,
		post_id: &str,
		comment_id: &str,
		requester: &str,
	) -> Result<Vec<Comment>> {
		let mut row = self.require_row(post_id).await?;
		let comment = row
			.comments
			.0
			.iter()
			.find(|comment| comment.id == comment_id)
			.ok_or_else(|| Error::NotFound("Comment not found".to_string()))?;
		if comment.user != requester {
			return Err(Error::Forbidden("User not authorized".to_string()));
		}

		row.comments.0.retain(|comment| comment.id != comment_id);
		self.save(&row).await?;
		Ok(row.comments.0)
	}

	async fn require_row(&self, post_id: &str) -> Result<PostRow> {
		sqlx::query_as::<_, PostRow>("SELECT * FROM posts WHERE id = ?")
			.bind(post_id)
			.fetch_optional(&self.pool)
			.await?
			.ok_or_else(|| Error::NotFound("No post found".to_string()))
	}

	async fn save(&self, row: &PostRow) -> Result<()> {
		sqlx::query("UPDATE posts SET likes = ?, comments = ? WHERE id = ?")
			.bind(&row.likes)
			.bind(&row.comments)
			.bind(&row.id)
			.execute(&self.pool)
			.await?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::hasher::Argon2Hasher;
	use crate::store::testing::memory_pool;
	use crate::store::UserStore;
	use std::sync::Arc;

	async fn fixtures() -> (PostStore, User, User) {
		let pool = memory_pool().await;
		let users = UserStore::new(pool.clone(), Arc::new(Argon2Hasher::new()));
		let alice = users
			.register("Alice", "alice@example.com", "hunter22")
			.await
			.unwrap();
		let bob = users
			.register("Bob", "bob@example.com", "hunter22")
			.await
			.unwrap();
		(PostStore::new(pool), alice, bob)
	}

	#[tokio::test]
	async fn create_denormalizes_author_fields() {
		let (posts, alice, _) = fixtures().await;
		let post = posts.create(&alice, "hello world").await.unwrap();

		assert_eq!(post.author, alice.id);
		assert_eq!(post.name, "Alice");
		assert_eq!(post.avatar, alice.avatar);
	}

	#[tokio::test]
	async fn list_orders_newest_first() {
		let (posts, alice, _) = fixtures().await;
		let first = posts.create(&alice, "first").await.unwrap();
		// created_at has sub-second precision; a short pause keeps the
		// ordering test deterministic.
		tokio::time::sleep(std::time::Duration::from_millis(5)).await;
		let second = posts.create(&alice, "second").await.unwrap();

		let listed = posts.list().await.unwrap();
		assert_eq!(listed[0].id, second.id);
		assert_eq!(listed[1].id, first.id);
	}

	#[tokio::test]
	async fn only_the_author_may_delete() {
		let (posts, alice, bob) = fixtures().await;
		let post = posts.create(&alice, "mine").await.unwrap();

		assert!(matches!(
			posts.delete(&post.id, &bob.id).await,
			Err(Error::Forbidden(_))
		));

		posts.delete(&post.id, &alice.id).await.unwrap();
		assert!(matches!(posts.get(&post.id).await, Err(Error::NotFound(_))));
	}

	#[tokio::test]
	async fn double_like_conflicts_and_unlike_removes_one() {
		let (posts, alice, bob) = fixtures().await;
		let post = posts.create(&alice, "likeable").await.unwrap();

		let likes = posts.like(&post.id, &bob.id).await.unwrap();
		assert_eq!(likes.len(), 1);

		assert!(matches!(
			posts.like(&post.id, &bob.id).await,
			Err(Error::Conflict(_))
		));

		let likes = posts.unlike(&post.id, &bob.id).await.unwrap();
		assert!(likes.is_empty());

		assert!(matches!(
			posts.unlike(&post.id, &bob.id).await,
			Err(Error::Conflict(_))
		));
	}

	#[tokio::test]
	async fn comments_prepend_and_only_their_author_removes() {
		let (posts, alice, bob) = fixtures().await;
		let post = posts.create(&alice, "discuss").await.unwrap();

		posts.add_comment(&post.id, &alice, "first").await.unwrap();
		let comments = posts.add_comment(&post.id, &bob, "second").await.unwrap();
		assert_eq!(comments[0].text, "second");
		assert_eq!(comments[0].name, "Bob");

		let bobs_comment_id = comments[0].id.clone();
		assert!(matches!(
			posts
				.remove_comment(&post.id, &bobs_comment_id, &alice.id)
				.await,
			Err(Error::Forbidden(_))
		));

		let remaining = posts
			.remove_comment(&post.id, &bobs_comment_id, &bob.id)
			.await
			.unwrap();
		assert_eq!(remaining.len(), 1);
		assert_eq!(remaining[0].text, "first");
	}

	#[tokio::test]
	async fn removing_missing_comment_is_not_found() {
		let (posts, alice, _) = fixtures().await;
		let post = posts.create(&alice, "quiet").await.unwrap();

		assert!(matches!(
			posts.remove_comment(&post.id, "missing", &alice.id).await,
			Err(Error::NotFound(_))
		));
	}
}
