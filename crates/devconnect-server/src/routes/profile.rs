use std::sync::Arc;

use hyper::Method;
use serde_json::json;
use validator::Validate;

use devconnect_core::models::inputs::{EducationInput, ExperienceInput, ProfileInput};
use devconnect_core::Result;

use crate::context::AppContext;
use crate::http::{Request, Response};
use crate::router::{Access, Router};

pub fn register(router: &mut Router) {
	router.route(Method::GET, "/api/profile/me", Access::Protected, me);
	router.route(Method::POST, "/api/profile", Access::Protected, upsert);
	router.route(Method::GET, "/api/profile", Access::Public, list);
	router.route(Method::GET, "/api/profile/user/{user_id}", Access::Public, by_user);
	router.route(Method::DELETE, "/api/profile", Access::Protected, delete_account);
	router.route(
		Method::PUT,
		"/api/profile/experience",
		Access::Protected,
		add_experience,
	);
	router.route(
		Method::DELETE,
		"/api/profile/experience/{exp_id}",
		Access::Protected,
		remove_experience,
	);
	router.route(
		Method::PUT,
		"/api/profile/education",
		Access::Protected,
		add_education,
	);
	router.route(
		Method::DELETE,
		"/api/profile/education/{edu_id}",
		Access::Protected,
		remove_education,
	);
}

/// GET /api/profile/me — the caller's own profile.
async fn me(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	let profile = ctx.profiles.get(req.user_id()?).await?;
	Ok(Response::json(&profile))
}

/// POST /api/profile — create or merge the caller's profile.
async fn upsert(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	let input: ProfileInput = req.json()?;
	input.validate()?;

	let profile = ctx.profiles.upsert(req.user_id()?, input).await?;
	Ok(Response::json(&profile))
}

/// GET /api/profile — every profile, with its owner's name and avatar.
async fn list(ctx: Arc<AppContext>, _req: Request) -> Result<Response> {
	let profiles = ctx.profiles.list().await?;
	Ok(Response::json(&profiles))
}

/// GET /api/profile/user/{user_id} — a profile by owning user.
async fn by_user(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	let profile = ctx.profiles.get(req.param("user_id")?).await?;
	Ok(Response::json(&profile))
}

/// DELETE /api/profile — remove the account, its profile, and its posts.
async fn delete_account(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	ctx.users.delete_cascade(req.user_id()?).await?;
	Ok(Response::json(&json!({ "msg": "User deleted" })))
}

/// PUT /api/profile/experience — prepend an experience entry.
async fn add_experience(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	let input: ExperienceInput = req.json()?;
	input.validate()?;

	let profile = ctx.profiles.add_experience(req.user_id()?, input).await?;
	Ok(Response::json(&profile))
}

/// DELETE /api/profile/experience/{exp_id} — drop an entry by sub-id.
async fn remove_experience(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	let profile = ctx
		.profiles
		.remove_experience(req.user_id()?, req.param("exp_id")?)
		.await?;
	Ok(Response::json(&profile))
}

/// PUT /api/profile/education — prepend an education entry.
async fn add_education(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	let input: EducationInput = req.json()?;
	input.validate()?;

	let profile = ctx.profiles.add_education(req.user_id()?, input).await?;
	Ok(Response::json(&profile))
}

/// DELETE /api/profile/education/{edu_id} — drop an entry by sub-id.
async fn remove_education(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	let profile = ctx
		.profiles
		.remove_education(req.user_id()?, req.param("edu_id")?)
		.await?;
	Ok(Response::json(&profile))
}
