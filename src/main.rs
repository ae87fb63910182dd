//! Service entry-point: configuration, persistence, and the HTTP server.

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use stockroom::inbound::http::health::HealthState;
use stockroom::outbound::persistence::{DbPool, PoolConfig};
use stockroom::server::{AppConfig, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env()?;

    let mut server_config = ServerConfig::new(config.bind_addr);
    if let Some(database_url) = &config.database_url {
        let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(config.pool_size))
            .await
            .map_err(|err| std::io::Error::other(format!("database pool setup failed: {err}")))?;
        server_config = server_config.with_db_pool(pool);
    } else {
        warn!("DATABASE_URL not set; falling back to in-memory stores (state is lost on restart)");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, server_config).await?;
    server.await
}
