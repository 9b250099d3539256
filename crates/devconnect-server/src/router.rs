//! Method plus path-pattern router for the fixed API surface.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use hyper::Method;
use serde_json::json;

use devconnect_core::Result;

use crate::context::AppContext;
use crate::guard::AuthGuard;
use crate::http::{Request, Response};
use crate::middleware::Handler;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
type HandlerFn = Arc<dyn Fn(Arc<AppContext>, Request) -> BoxFuture<Result<Response>> + Send + Sync>;

/// Whether a route runs behind the auth guard.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Access {
	Public,
	Protected,
}

enum Segment {
	Literal(String),
	/// `{name}` placeholder, captured into the request's path params.
	Param(String),
}

struct Route {
	method: Method,
	segments: Vec<Segment>,
	access: Access,
	handler: HandlerFn,
}

pub struct Router {
	context: Arc<AppContext>,
	guard: AuthGuard,
	routes: Vec<Route>,
}

impl Router {
	pub fn new(context: Arc<AppContext>, guard: AuthGuard) -> Self {
		Self {
			context,
			guard,
			routes: Vec::new(),
		}
	}

	/// Register a handler for `method` on `pattern`, where `{name}`
	/// segments capture path parameters.
	pub fn route<F, Fut>(&mut self, method: Method, pattern: &str, access: Access, handler: F)
	where
		F: Fn(Arc<AppContext>, Request) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<Response>> + Send + 'static,
	{
		let handler: HandlerFn = Arc::new(move |context, request| {
			Box::pin(handler(context, request))
		});
		self.routes.push(Route {
			method,
			segments: parse_pattern(pattern),
			access,
			handler,
		});
	}

	fn find(&self, method: &Method, path: &str) -> Option<(&Route, HashMap<String, String>)> {
		let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
		self.routes.iter().find_map(|route| {
			if route.method != *method {
				return None;
			}
			match_segments(&route.segments, &segments).map(|params| (route, params))
		})
	}
}

fn parse_pattern(pattern: &str) -> Vec<Segment> {
	pattern
		.trim_matches('/')
		.split('/')
		.map(|segment| {
			segment
				.strip_prefix('{')
				.and_then(|rest| rest.strip_suffix('}'))
				.map(|name| Segment::Param(name.to_owned()))
				.unwrap_or_else(|| Segment::Literal(segment.to_owned()))
		})
		.collect()
}

fn match_segments(pattern: &[Segment], path: &[&str]) -> Option<HashMap<String, String>> {
	if pattern.len() != path.len() {
		return None;
	}

	let mut params = HashMap::new();
	for (segment, value) in pattern.iter().zip(path) {
		match segment {
			Segment::Literal(literal) if literal == value => {}
			Segment::Literal(_) => return None,
			Segment::Param(name) => {
				params.insert(name.clone(), (*value).to_owned());
			}
		}
	}
	Some(params)
}

#[async_trait]
impl Handler for Router {
	async fn handle(&self, mut request: Request) -> Result<Response> {
		let Some((route, params)) = self.find(&request.method, request.path()) else {
			return Ok(Response::json_with_status(
				hyper::StatusCode::NOT_FOUND,
				&json!({ "msg": "Not found" }),
			));
		};

		request.path_params = params;

		if route.access == Access::Protected {
			if let Err(err) = self.guard.authenticate(&mut request) {
				return Ok(err.into());
			}
		}

		match (route.handler)(self.context.clone(), request).await {
			Ok(response) => Ok(response),
			Err(err) => Ok(err.into()),
		}
	}
}
