//! Route handlers, one module per API group.

mod auth;
mod posts;
mod profile;
mod users;

use hyper::Method;
use serde_json::json;
use std::sync::Arc;

use devconnect_core::Result;

use crate::context::AppContext;
use crate::http::{Request, Response};
use crate::router::{Access, Router};

pub fn register(router: &mut Router) {
	router.route(Method::GET, "/", Access::Public, running);
	users::register(router);
	auth::register(router);
	profile::register(router);
	posts::register(router);
}

/// GET / — liveness probe.
async fn running(_ctx: Arc<AppContext>, _req: Request) -> Result<Response> {
	Ok(Response::json(&json!("API Running")))
}
