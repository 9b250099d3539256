//! Request and response wrappers over hyper's types.

use std::collections::HashMap;

use bytes::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{HeaderMap, Method, StatusCode, Uri};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use devconnect_core::Error;

/// Incoming request, decoded eagerly; the router injects path
/// parameters and the auth guard decorates the identity before a
/// handler sees it.
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub headers: HeaderMap,
	pub body: Bytes,
	pub path_params: HashMap<String, String>,
	/// Identity resolved by the auth guard; `None` on public routes.
	pub auth_user: Option<String>,
}

impl Request {
	pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
		Self {
			method,
			uri,
			headers,
			body,
			path_params: HashMap::new(),
			auth_user: None,
		}
	}

	pub fn path(&self) -> &str {
		self.uri.path()
	}

	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|value| value.to_str().ok())
	}

	/// Path parameter extracted by the router.
	pub fn param(&self, name: &str) -> Result<&str, Error> {
		self.path_params
			.get(name)
			.map(String::as_str)
			.ok_or_else(|| Error::Internal(format!("missing route parameter: {name}")))
	}

	/// Decode the body as JSON.
	pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
		serde_json::from_slice(&self.body)
			.map_err(|e| Error::Validation(vec![format!("Invalid JSON body: {e}")]))
	}

	/// Identity attached by the auth guard.
	pub fn user_id(&self) -> Result<&str, Error> {
		self.auth_user
			.as_deref()
			.ok_or_else(|| Error::Unauthorized("No token, authorization denied".to_string()))
	}
}

/// Outgoing response.
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// 200 with a JSON body.
	pub fn json<T: Serialize>(value: &T) -> Self {
		Self::json_with_status(StatusCode::OK, value)
	}

	pub fn json_with_status<T: Serialize>(status: StatusCode, value: &T) -> Self {
		let mut response = Self::new(status);
		response.body = Bytes::from(serde_json::to_vec(value).unwrap_or_default());
		response
			.headers
			.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		response
	}

	fn text(status: StatusCode, body: &str) -> Self {
		let mut response = Self::new(status);
		response.body = Bytes::from(body.to_owned());
		response
			.headers
			.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
		response
	}
}

fn error_list(status: StatusCode, messages: &[String]) -> Response {
	let errors: Vec<_> = messages.iter().map(|msg| json!({ "msg": msg })).collect();
	Response::json_with_status(status, &json!({ "errors": errors }))
}

/// Wire mapping of the error taxonomy: `{errors:[{msg}]}` for the
/// 400/401 class, `{msg}` for 404, and an opaque string for 500.
impl From<Error> for Response {
	fn from(err: Error) -> Self {
		match err {
			Error::Validation(messages) => error_list(StatusCode::BAD_REQUEST, &messages),
			Error::InvalidCredentials => {
				error_list(StatusCode::BAD_REQUEST, &[err.to_string()])
			}
			Error::Conflict(msg) => error_list(StatusCode::BAD_REQUEST, &[msg]),
			Error::Unauthorized(msg) => error_list(StatusCode::UNAUTHORIZED, &[msg]),
			Error::Forbidden(msg) => error_list(StatusCode::UNAUTHORIZED, &[msg]),
			Error::NotFound(msg) => {
				Response::json_with_status(StatusCode::NOT_FOUND, &json!({ "msg": msg }))
			}
			Error::Database(err) => {
				tracing::error!(error = %err, "database fault");
				Response::text(StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
			}
			Error::Internal(msg) => {
				tracing::error!(error = %msg, "internal fault");
				Response::text(StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
			}
		}
	}
}
