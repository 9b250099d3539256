//! View state advanced by explicit commands.
//!
//! Every mutation of what a UI would render goes through
//! [`AppState::apply`], a pure transition from one state value to the
//! next. View layers observe the resulting value; nothing dispatches
//! into shared mutable globals.

use devconnect_core::models::{Comment, Like, Post, Profile, User};

/// A transient notice for the user, shown until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
	pub id: String,
	pub message: String,
	pub kind: AlertKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
	Success,
	Danger,
}

/// Everything a view layer needs to render.
#[derive(Debug, Clone, Default)]
pub struct AppState {
	pub user: Option<User>,
	pub profile: Option<Profile>,
	pub profiles: Vec<Profile>,
	pub posts: Vec<Post>,
	pub active_post: Option<Post>,
	pub alerts: Vec<Alert>,
}

/// One observed fact about the world, applied to the state.
#[derive(Debug, Clone)]
pub enum Command {
	LoggedIn(User),
	LoggedOut,
	ProfileLoaded(Profile),
	ProfileCleared,
	ProfilesLoaded(Vec<Profile>),
	PostsLoaded(Vec<Post>),
	PostOpened(Post),
	PostCreated(Post),
	PostDeleted(String),
	LikesUpdated { post_id: String, likes: Vec<Like> },
	CommentsUpdated { post_id: String, comments: Vec<Comment> },
	AlertRaised(Alert),
	AlertDismissed(String),
}

impl AppState {
	/// Advance the state by one command. Consumes and returns the
	/// state so callers cannot observe a half-applied transition.
	pub fn apply(mut self, command: Command) -> Self {
		match command {
			Command::LoggedIn(user) => {
				self.user = Some(user);
			}
			Command::LoggedOut => {
				// Logging out invalidates everything derived from
				// the account, not just the user itself.
				self.user = None;
				self.profile = None;
				self.posts.clear();
				self.active_post = None;
			}
			Command::ProfileLoaded(profile) => {
				self.profile = Some(profile);
			}
			Command::ProfileCleared => {
				self.profile = None;
			}
			Command::ProfilesLoaded(profiles) => {
				self.profiles = profiles;
			}
			Command::PostsLoaded(posts) => {
				self.posts = posts;
			}
			Command::PostOpened(post) => {
				self.active_post = Some(post);
			}
			Command::PostCreated(post) => {
				self.posts.insert(0, post);
			}
			Command::PostDeleted(post_id) => {
				self.posts.retain(|p| p.id != post_id);
				if self.active_post.as_ref().is_some_and(|p| p.id == post_id) {
					self.active_post = None;
				}
			}
			Command::LikesUpdated { post_id, likes } => {
				if let Some(post) = self.posts.iter_mut().find(|p| p.id == post_id) {
					post.likes = likes.clone();
				}
				if let Some(post) = self.active_post.as_mut().filter(|p| p.id == post_id) {
					post.likes = likes;
				}
			}
			Command::CommentsUpdated { post_id, comments } => {
				if let Some(post) = self.posts.iter_mut().find(|p| p.id == post_id) {
					post.comments = comments.clone();
				}
				if let Some(post) = self.active_post.as_mut().filter(|p| p.id == post_id) {
					post.comments = comments;
				}
			}
			Command::AlertRaised(alert) => {
				self.alerts.push(alert);
			}
			Command::AlertDismissed(alert_id) => {
				self.alerts.retain(|a| a.id != alert_id);
			}
		}
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use devconnect_core::models::User;

	fn user() -> User {
		User {
			id: "u1".to_string(),
			name: "Alice".to_string(),
			email: "alice@example.com".to_string(),
			password_hash: String::new(),
			avatar: "https://example.com/a".to_string(),
			created_at: chrono::Utc::now(),
		}
	}

	fn post(id: &str) -> Post {
		Post {
			id: id.to_string(),
			author: "u1".to_string(),
			text: "hello".to_string(),
			name: "Alice".to_string(),
			avatar: "https://example.com/a".to_string(),
			likes: Vec::new(),
			comments: Vec::new(),
			created_at: chrono::Utc::now(),
		}
	}

	#[test]
	fn logout_clears_account_derived_state() {
		let state = AppState::default()
			.apply(Command::LoggedIn(user()))
			.apply(Command::PostsLoaded(vec![post("p1")]))
			.apply(Command::PostOpened(post("p1")))
			.apply(Command::LoggedOut);

		assert!(state.user.is_none());
		assert!(state.posts.is_empty());
		assert!(state.active_post.is_none());
	}

	#[test]
	fn created_posts_appear_first() {
		let state = AppState::default()
			.apply(Command::PostsLoaded(vec![post("old")]))
			.apply(Command::PostCreated(post("new")));

		assert_eq!(state.posts[0].id, "new");
		assert_eq!(state.posts[1].id, "old");
	}

	#[test]
	fn deleting_the_open_post_closes_it() {
		let state = AppState::default()
			.apply(Command::PostsLoaded(vec![post("p1"), post("p2")]))
			.apply(Command::PostOpened(post("p1")))
			.apply(Command::PostDeleted("p1".to_string()));

		assert_eq!(state.posts.len(), 1);
		assert!(state.active_post.is_none());
	}

	#[test]
	fn like_updates_reach_both_views_of_a_post() {
		let likes = vec![Like {
			user: "u2".to_string(),
		}];
		let state = AppState::default()
			.apply(Command::PostsLoaded(vec![post("p1")]))
			.apply(Command::PostOpened(post("p1")))
			.apply(Command::LikesUpdated {
				post_id: "p1".to_string(),
				likes,
			});

		assert_eq!(state.posts[0].likes.len(), 1);
		assert_eq!(state.active_post.unwrap().likes.len(), 1);
	}

	#[test]
	fn alerts_dismiss_by_id() {
		let alert = Alert {
			id: "a1".to_string(),
			message: "Profile Updated".to_string(),
			kind: AlertKind::Success,
		};
		let state = AppState::default()
			.apply(Command::AlertRaised(alert))
			.apply(Command::AlertDismissed("a1".to_string()));

		assert!(state.alerts.is_empty());
	}
}
