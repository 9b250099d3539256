//! HTTP layer for the devconnect service.
//!
//! A small hyper-based stack: request/response wrappers, a middleware
//! chain, a pattern router with a per-route auth guard, and the route
//! handlers themselves.

pub mod context;
pub mod guard;
pub mod http;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod server;

use std::sync::Arc;

use crate::context::AppContext;
use crate::guard::AuthGuard;
use crate::middleware::{Handler, LoggingMiddleware, MiddlewareChain};
use crate::router::Router;

/// Assemble the full application handler: all routes behind the
/// request-logging middleware.
pub fn build_app(context: Arc<AppContext>) -> Arc<dyn Handler> {
	let guard = AuthGuard::new(context.tokens.clone());
	let mut router = Router::new(context, guard);
	routes::register(&mut router);

	MiddlewareChain::new(Arc::new(router))
		.with_middleware(Arc::new(LoggingMiddleware::new()))
		.into_handler()
}
