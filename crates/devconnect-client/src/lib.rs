//! Typed client for the devconnect API.
//!
//! [`ApiClient`] wraps a [`reqwest::Client`] with one method per
//! endpoint, carrying authentication through a caller-owned
//! [`Session`]. Error bodies come back as [`devconnect_core::Error`]
//! values, so callers match on the same taxonomy the server raises.

pub mod session;
pub mod state;

use serde::Deserialize;

use devconnect_core::models::inputs::{
	CommentInput, EducationInput, ExperienceInput, LoginInput, PostInput, ProfileInput,
	RegisterInput,
};
use devconnect_core::models::{Comment, Like, Post, Profile, User};
use devconnect_core::Error as ApiError;

pub use session::Session;
pub use state::{Alert, AlertKind, AppState, Command};

const AUTH_HEADER: &str = "x-auth-token";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
	#[error(transparent)]
	Transport(#[from] reqwest::Error),
	/// The server rejected the request; carries the decoded API error.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// A protected call was attempted with no token in the session.
	#[error("not logged in")]
	NotLoggedIn,
	/// The session's backing token file could not be read or written.
	#[error("session storage: {0}")]
	Session(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Deserialize)]
struct TokenResponse {
	token: String,
}

/// Wire shape of API error bodies; both `{"errors": [{"msg": ..}]}`
/// and `{"msg": ..}` decode through it.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
	#[serde(default)]
	errors: Vec<ErrorMessage>,
	#[serde(default)]
	msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
	msg: String,
}

pub struct ApiClient {
	http: reqwest::Client,
	base_url: String,
	session: Session,
}

impl ApiClient {
	pub fn new(base_url: impl Into<String>, session: Session) -> Self {
		Self {
			http: reqwest::Client::new(),
			base_url: base_url.into().trim_end_matches('/').to_string(),
			session,
		}
	}

	pub fn session(&self) -> &Session {
		&self.session
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	fn token(&self) -> Result<&str> {
		self.session.token().ok_or(ClientError::NotLoggedIn)
	}

	/// Register a new account and adopt its token into the session.
	pub async fn register(&mut self, input: &RegisterInput) -> Result<()> {
		let response = self
			.http
			.post(self.url("/api/users"))
			.json(input)
			.send()
			.await?;
		let body: TokenResponse = decode(response).await?;
		self.session.store(body.token)?;
		Ok(())
	}

	/// Log in and adopt the issued token into the session.
	pub async fn login(&mut self, input: &LoginInput) -> Result<()> {
		let response = self
			.http
			.post(self.url("/api/auth"))
			.json(input)
			.send()
			.await?;
		let body: TokenResponse = decode(response).await?;
		self.session.store(body.token)?;
		Ok(())
	}

	/// Discard the session token. Purely client-side.
	pub fn logout(&mut self) -> Result<()> {
		self.session.clear()?;
		Ok(())
	}

	pub async fn current_user(&self) -> Result<User> {
		let response = self
			.http
			.get(self.url("/api/auth"))
			.header(AUTH_HEADER, self.token()?)
			.send()
			.await?;
		decode(response).await
	}

	pub async fn my_profile(&self) -> Result<Profile> {
		let response = self
			.http
			.get(self.url("/api/profile/me"))
			.header(AUTH_HEADER, self.token()?)
			.send()
			.await?;
		decode(response).await
	}

	pub async fn upsert_profile(&self, input: &ProfileInput) -> Result<Profile> {
		let response = self
			.http
			.post(self.url("/api/profile"))
			.header(AUTH_HEADER, self.token()?)
			.json(input)
			.send()
			.await?;
		decode(response).await
	}

	pub async fn profiles(&self) -> Result<Vec<Profile>> {
		let response = self.http.get(self.url("/api/profile")).send().await?;
		decode(response).await
	}

	pub async fn profile_by_user(&self, user_id: &str) -> Result<Profile> {
		let response = self
			.http
			.get(self.url(&format!("/api/profile/user/{user_id}")))
			.send()
			.await?;
		decode(response).await
	}

	/// Delete the account, its profile, and its posts, then drop the
	/// now-useless token.
	pub async fn delete_account(&mut self) -> Result<()> {
		let response = self
			.http
			.delete(self.url("/api/profile"))
			.header(AUTH_HEADER, self.token()?)
			.send()
			.await?;
		decode::<serde_json::Value>(response).await?;
		self.session.clear()?;
		Ok(())
	}

	pub async fn add_experience(&self, input: &ExperienceInput) -> Result<Profile> {
		let response = self
			.http
			.put(self.url("/api/profile/experience"))
			.header(AUTH_HEADER, self.token()?)
			.json(input)
			.send()
			.await?;
		decode(response).await
	}

	pub async fn remove_experience(&self, exp_id: &str) -> Result<Profile> {
		let response = self
			.http
			.delete(self.url(&format!("/api/profile/experience/{exp_id}")))
			.header(AUTH_HEADER, self.token()?)
			.send()
			.await?;
		decode(response).await
	}

	pub async fn add_education(&self, input: &EducationInput) -> Result<Profile> {
		let response = self
			.http
			.put(self.url("/api/profile/education"))
			.header(AUTH_HEADER, self.token()?)
			.json(input)
			.send()
			.await?;
		decode(response).await
	}

	pub async fn remove_education(&self, edu_id: &str) -> Result<Profile> {
		let response = self
			.http
			.delete(self.url(&format!("/api/profile/education/{edu_id}")))
			.header(AUTH_HEADER, self.token()?)
			.send()
			.await?;
		decode(response).await
	}

	pub async fn create_post(&self, input: &PostInput) -> Result<Post> {
		let response = self
			.http
			.post(self.url("/api/posts"))
			.header(AUTH_HEADER, self.token()?)
			.json(input)
			.send()
			.await?;
		decode(response).await
	}

	pub async fn posts(&self) -> Result<Vec<Post>> {
		let response = self
			.http
			.get(self.url("/api/posts"))
			.header(AUTH_HEADER, self.token()?)
			.send()
			.await?;
		decode(response).await
	}

	pub async fn post(&self, post_id: &str) -> Result<Post> {
		let response = self
			.http
			.get(self.url(&format!("/api/posts/{post_id}")))
			.header(AUTH_HEADER, self.token()?)
			.send()
			.await?;
		decode(response).await
	}

	pub async fn delete_post(&self, post_id: &str) -> Result<()> {
		let response = self
			.http
			.delete(self.url(&format!("/api/posts/{post_id}")))
			.header(AUTH_HEADER, self.token()?)
			.send()
			.await?;
		decode::<serde_json::Value>(response).await?;
		Ok(())
	}

	pub async fn like_post(&self, post_id: &str) -> Result<Vec<Like>> {
		let response = self
			.http
			.put(self.url(&format!("/api/posts/like/{post_id}")))
			.header(AUTH_HEADER, self.token()?)
			.send()
			.await?;
		decode(response).await
	}

	pub async fn unlike_post(&self, post_id: &str) -> Result<Vec<Like>> {
		let response = self
			.http
			.put(self.url(&format!("/api/posts/unlike/{post_id}")))
			.header(AUTH_HEADER, self.token()?)
			.send()
			.await?;
		decode(response).await
	}

	pub async fn add_comment(&self, post_id: &str, input: &CommentInput) -> Result<Vec<Comment>> {
		let response = self
			.http
			.post(self.url(&format!("/api/posts/comment/{post_id}")))
			.header(AUTH_HEADER, self.token()?)
			.json(input)
			.send()
			.await?;
		decode(response).await
	}

	pub async fn remove_comment(&self, post_id: &str, comment_id: &str) -> Result<Vec<Comment>> {
		let response = self
			.http
			.delete(self.url(&format!("/api/posts/comment/{post_id}/{comment_id}")))
			.header(AUTH_HEADER, self.token()?)
			.send()
			.await?;
		decode(response).await
	}
}

/// Decode a success body, or turn an error response back into the
/// server's error taxonomy.
async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
	let status = response.status();
	if status.is_success() {
		return Ok(response.json().await?);
	}

	let body = response.json::<ErrorBody>().await.unwrap_or_default();
	Err(ClientError::Api(error_from_wire(status.as_u16(), body)))
}

fn error_from_wire(status: u16, body: ErrorBody) -> ApiError {
	let mut messages: Vec<String> = body.errors.into_iter().map(|e| e.msg).collect();
	if let Some(msg) = body.msg {
		messages.push(msg);
	}
	let first = messages
		.first()
		.cloned()
		.unwrap_or_else(|| "Server Error".to_string());

	match status {
		400 if first == "Invalid Credentials" => ApiError::InvalidCredentials,
		400 => ApiError::Validation(messages),
		// Ownership rejections share the 401 class on the wire but
		// keep their own variant.
		401 if first == "User not authorized" => ApiError::Forbidden(first),
		401 => ApiError::Unauthorized(first),
		404 => ApiError::NotFound(first),
		_ => ApiError::Internal(first),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn validation_bodies_keep_every_message() {
		let body = ErrorBody {
			errors: vec![
				ErrorMessage {
					msg: "Name is required".to_string(),
				},
				ErrorMessage {
					msg: "Please include a valid email".to_string(),
				},
			],
			msg: None,
		};

		match error_from_wire(400, body) {
			ApiError::Validation(messages) => assert_eq!(messages.len(), 2),
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[test]
	fn invalid_credentials_keep_their_own_variant() {
		let body = ErrorBody {
			errors: vec![ErrorMessage {
				msg: "Invalid Credentials".to_string(),
			}],
			msg: None,
		};

		assert!(matches!(
			error_from_wire(400, body),
			ApiError::InvalidCredentials
		));
	}

	#[test]
	fn ownership_rejections_decode_to_forbidden() {
		let body = ErrorBody {
			errors: vec![ErrorMessage {
				msg: "User not authorized".to_string(),
			}],
			msg: None,
		};

		assert!(matches!(
			error_from_wire(401, body),
			ApiError::Forbidden(_)
		));

		let body = ErrorBody {
			errors: vec![ErrorMessage {
				msg: "Token is not valid".to_string(),
			}],
			msg: None,
		};

		assert!(matches!(
			error_from_wire(401, body),
			ApiError::Unauthorized(_)
		));
	}

	#[test]
	fn not_found_bodies_use_the_bare_msg_shape() {
		let body = ErrorBody {
			errors: Vec::new(),
			msg: Some("No post found".to_string()),
		};

		match error_from_wire(404, body) {
			ApiError::NotFound(msg) => assert_eq!(msg, "No post found"),
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[test]
	fn base_url_trailing_slash_is_normalized() {
		let client = ApiClient::new("http://localhost:5000/", Session::in_memory());
		assert_eq!(client.url("/api/auth"), "http://localhost:5000/api/auth");
	}
}
