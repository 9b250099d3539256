use std::sync::Arc;

use hyper::Method;
use serde_json::json;
use validator::Validate;

use devconnect_core::models::inputs::{CommentInput, PostInput};
use devconnect_core::Result;

use crate::context::AppContext;
use crate::http::{Request, Response};
use crate::router::{Access, Router};

pub fn register(router: &mut Router) {
	router.route(Method::POST, "/api/posts", Access::Protected, create);
	router.route(Method::GET, "/api/posts", Access::Protected, list);
	router.route(Method::GET, "/api/posts/{post_id}", Access::Protected, get);
	router.route(Method::DELETE, "/api/posts/{post_id}", Access::Protected, delete);
	router.route(Method::PUT, "/api/posts/like/{post_id}", Access::Protected, like);
	router.route(
		Method::PUT,
		"/api/posts/unlike/{post_id}",
		Access::Protected,
		unlike,
	);
	router.route(
		Method::POST,
		"/api/posts/comment/{post_id}",
		Access::Protected,
		add_comment,
	);
	router.route(
		Method::DELETE,
		"/api/posts/comment/{post_id}/{comment_id}",
		Access::Protected,
		remove_comment,
	);
}

/// POST /api/posts — publish a post as the caller.
async fn create(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	let input: PostInput = req.json()?;
	input.validate()?;

	let author = ctx.users.load_by_id(req.user_id()?).await?;
	let post = ctx.posts.create(&author, &input.text).await?;
	Ok(Response::json(&post))
}

/// GET /api/posts — all posts, newest first.
async fn list(ctx: Arc<AppContext>, _req: Request) -> Result<Response> {
	let posts = ctx.posts.list().await?;
	Ok(Response::json(&posts))
}

/// GET /api/posts/{post_id}.
async fn get(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	let post = ctx.posts.get(req.param("post_id")?).await?;
	Ok(Response::json(&post))
}

/// DELETE /api/posts/{post_id} — author only.
async fn delete(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	ctx.posts.delete(req.param("post_id")?, req.user_id()?).await?;
	Ok(Response::json(&json!({ "msg": "Post removed" })))
}

/// PUT /api/posts/like/{post_id} — returns the updated likes.
async fn like(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	let likes = ctx.posts.like(req.param("post_id")?, req.user_id()?).await?;
	Ok(Response::json(&likes))
}

/// PUT /api/posts/unlike/{post_id} — returns the updated likes.
async fn unlike(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	let likes = ctx
		.posts
		.unlike(req.param("post_id")?, req.user_id()?)
		.await?;
	Ok(Response::json(&likes))
}

/// POST /api/posts/comment/{post_id} — returns the updated comments.
async fn add_comment(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	let input: CommentInput = req.json()?;
	input.validate()?;

	let commenter = ctx.users.load_by_id(req.user_id()?).await?;
	let comments = ctx
		.posts
		.add_comment(req.param("post_id")?, &commenter, &input.text)
		.await?;
	Ok(Response::json(&comments))
}

/// DELETE /api/posts/comment/{post_id}/{comment_id} — comment author only.
async fn remove_comment(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	let comments = ctx
		.posts
		.remove_comment(
			req.param("post_id")?,
			req.param("comment_id")?,
			req.user_id()?,
		)
		.await?;
	Ok(Response::json(&comments))
}
