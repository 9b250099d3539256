//! Handler and middleware seams, plus the request-logging middleware.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::http::{Request, Response};
use devconnect_core::Result;

/// Terminal request handler.
#[async_trait]
pub trait Handler: Send + Sync {
	async fn handle(&self, request: Request) -> Result<Response>;
}

/// Wraps the next handler; middlewares run in registration order,
/// outermost first.
#[async_trait]
pub trait Middleware: Send + Sync {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response>;
}

struct Wrapped {
	middleware: Arc<dyn Middleware>,
	next: Arc<dyn Handler>,
}

#[async_trait]
impl Handler for Wrapped {
	async fn handle(&self, request: Request) -> Result<Response> {
		self.middleware.process(request, self.next.clone()).await
	}
}

/// Builds a handler from a terminal handler plus middlewares; the
/// first middleware added sits outermost and runs first.
pub struct MiddlewareChain {
	terminal: Arc<dyn Handler>,
	middlewares: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
	pub fn new(terminal: Arc<dyn Handler>) -> Self {
		Self {
			terminal,
			middlewares: Vec::new(),
		}
	}

	pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middlewares.push(middleware);
		self
	}

	pub fn into_handler(self) -> Arc<dyn Handler> {
		self.middlewares
			.into_iter()
			.rev()
			.fold(self.terminal, |next, middleware| {
				Arc::new(Wrapped { middleware, next })
			})
	}
}

/// Logs one line per request: method, path, status, duration.
pub struct LoggingMiddleware;

impl LoggingMiddleware {
	pub fn new() -> Self {
		Self
	}
}

impl Default for LoggingMiddleware {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Middleware for LoggingMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let start = Instant::now();
		let method = request.method.to_string();
		let path = request.path().to_string();

		let result = next.handle(request).await;
		let elapsed_ms = start.elapsed().as_millis();

		match &result {
			Ok(response) => {
				tracing::info!(%method, %path, status = response.status.as_u16(), elapsed_ms);
			}
			Err(err) => {
				tracing::error!(%method, %path, error = %err, elapsed_ms);
			}
		}

		result
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bytes::Bytes;
	use hyper::{HeaderMap, Method, StatusCode, Uri};

	struct Terminal;

	#[async_trait]
	impl Handler for Terminal {
		async fn handle(&self, _request: Request) -> Result<Response> {
			let mut response = Response::new(StatusCode::OK);
			response.body = Bytes::from_static(b"end");
			Ok(response)
		}
	}

	struct Tag(&'static str);

	#[async_trait]
	impl Middleware for Tag {
		async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
			let mut response = next.handle(request).await?;
			let mut body = self.0.as_bytes().to_vec();
			body.extend_from_slice(&response.body);
			response.body = Bytes::from(body);
			Ok(response)
		}
	}

	fn request() -> Request {
		Request::new(
			Method::GET,
			Uri::from_static("/"),
			HeaderMap::new(),
			Bytes::new(),
		)
	}

	#[tokio::test]
	async fn middlewares_run_in_registration_order() {
		let handler = MiddlewareChain::new(Arc::new(Terminal))
			.with_middleware(Arc::new(Tag("first:")))
			.with_middleware(Arc::new(Tag("second:")))
			.into_handler();

		let response = handler.handle(request()).await.unwrap();
		assert_eq!(&response.body[..], b"first:second:end");
	}
}
