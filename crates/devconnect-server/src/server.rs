//! Hyper HTTP/1 server loop with graceful shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper::StatusCode;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};

use crate::http::{Request, Response};
use crate::middleware::Handler;

pub struct HttpServer {
	listener: TcpListener,
	handler: Arc<dyn Handler>,
}

impl HttpServer {
	/// Bind immediately so callers (and tests binding port 0) learn
	/// the real address before the accept loop starts.
	pub async fn bind(addr: SocketAddr, handler: Arc<dyn Handler>) -> std::io::Result<Self> {
		let listener = TcpListener::bind(addr).await?;
		Ok(Self { listener, handler })
	}

	pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
		self.listener.local_addr()
	}

	/// Accept connections until `shutdown` resolves; each connection
	/// is served on its own task, so no request blocks another.
	pub async fn run_with_shutdown<F>(self, shutdown: F) -> std::io::Result<()>
	where
		F: Future<Output = ()>,
	{
		tokio::pin!(shutdown);

		loop {
			tokio::select! {
				accepted = self.listener.accept() => {
					let (stream, remote) = accepted?;
					let handler = self.handler.clone();
					tokio::spawn(async move {
						if let Err(err) = serve_connection(stream, handler).await {
							tracing::debug!(%remote, error = %err, "connection ended with error");
						}
					});
				}
				_ = &mut shutdown => {
					tracing::info!("shutdown signal received, stopping server");
					break;
				}
			}
		}

		Ok(())
	}

	/// Accept connections until the process is signalled.
	pub async fn run(self) -> std::io::Result<()> {
		self.run_with_shutdown(shutdown_signal()).await
	}
}

/// Resolves on SIGINT.
pub async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %err, "failed to listen for shutdown signal");
	}
}

async fn serve_connection(
	stream: TcpStream,
	handler: Arc<dyn Handler>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
	let io = TokioIo::new(stream);
	let service = RequestService { handler };
	http1::Builder::new().serve_connection(io, service).await?;
	Ok(())
}

struct RequestService {
	handler: Arc<dyn Handler>,
}

impl Service<hyper::Request<Incoming>> for RequestService {
	type Response = hyper::Response<Full<Bytes>>;
	type Error = Box<dyn std::error::Error + Send + Sync>;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		let handler = self.handler.clone();

		Box::pin(async move {
			let (parts, body) = req.into_parts();
			let body = body.collect().await?.to_bytes();
			let request = Request::new(parts.method, parts.uri, parts.headers, body);

			// The router maps domain errors to responses itself; an
			// Err here is a fault in the HTTP layer proper.
			let response = handler.handle(request).await.unwrap_or_else(|err| {
				tracing::error!(error = %err, "unhandled server fault");
				let mut response = Response::new(StatusCode::INTERNAL_SERVER_ERROR);
				response.body = Bytes::from_static(b"Server Error");
				response
			});

			let mut builder = hyper::Response::builder().status(response.status);
			for (name, value) in response.headers.iter() {
				builder = builder.header(name, value);
			}
			Ok(builder.body(Full::new(response.body))?)
		})
	}
}
