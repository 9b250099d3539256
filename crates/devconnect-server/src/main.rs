use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use devconnect_core::config::Settings;
use devconnect_core::db;
use devconnect_server::context::AppContext;
use devconnect_server::server::HttpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let settings = Settings::from_env()?;
	let pool = db::connect(&settings.database_url).await?;
	tracing::info!(database_url = %settings.database_url, "connected to database");

	let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
	let context = Arc::new(AppContext::new(settings, pool));
	let app = devconnect_server::build_app(context);

	let server = HttpServer::bind(addr, app).await?;
	tracing::info!("Server listening on http://{}", server.local_addr()?);
	server.run().await?;

	Ok(())
}
