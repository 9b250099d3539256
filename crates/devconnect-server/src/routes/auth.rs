use std::sync::Arc;

use hyper::Method;
use serde_json::json;
use validator::Validate;

use devconnect_core::models::inputs::LoginInput;
use devconnect_core::Result;

use crate::context::AppContext;
use crate::http::{Request, Response};
use crate::router::{Access, Router};

pub fn register(router: &mut Router) {
	router.route(Method::POST, "/api/auth", Access::Public, login);
	router.route(Method::GET, "/api/auth", Access::Protected, current_user);
}

/// POST /api/auth — exchange credentials for a token.
async fn login(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	let input: LoginInput = req.json()?;
	input.validate()?;

	let user_id = ctx.users.authenticate(&input.email, &input.password).await?;
	let token = ctx.tokens.issue(&user_id)?;

	Ok(Response::json(&json!({ "token": token })))
}

/// GET /api/auth — the authenticated user, password hash projected out.
async fn current_user(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	let user = ctx.users.load_by_id(req.user_id()?).await?;
	Ok(Response::json(&user))
}
