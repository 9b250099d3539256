use std::sync::Arc;

use hyper::Method;
use serde_json::json;
use validator::Validate;

use devconnect_core::models::inputs::RegisterInput;
use devconnect_core::Result;

use crate::context::AppContext;
use crate::http::{Request, Response};
use crate::router::{Access, Router};

pub fn register(router: &mut Router) {
	router.route(Method::POST, "/api/users", Access::Public, register_user);
}

/// POST /api/users — create an account and hand back a token.
async fn register_user(ctx: Arc<AppContext>, req: Request) -> Result<Response> {
	let input: RegisterInput = req.json()?;
	input.validate()?;

	let user = ctx
		.users
		.register(&input.name, &input.email, &input.password)
		.await?;
	let token = ctx.tokens.issue(&user.id)?;

	Ok(Response::json(&json!({ "token": token })))
}
