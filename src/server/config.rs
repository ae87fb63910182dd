//! Server and application configuration.

use std::env;
use std::net::SocketAddr;

use crate::outbound::persistence::DbPool;

/// Environment-driven application settings.
///
/// | variable | default | meaning |
/// |---|---|---|
/// | `BIND_ADDR` | `0.0.0.0:8080` | socket the HTTP server binds |
/// | `DATABASE_URL` | unset | PostgreSQL URL; in-memory stores when absent |
/// | `DATABASE_POOL_SIZE` | `10` | connection pool size |
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection URL; `None` selects the in-memory stores.
    pub database_url: Option<String>,
    /// Maximum connections in the database pool.
    pub pool_size: u32,
}

impl AppConfig {
    /// Collect settings from the process environment.
    pub fn from_env() -> std::io::Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_owned())
            .parse()
            .map_err(|err| std::io::Error::other(format!("invalid BIND_ADDR: {err}")))?;

        let database_url = env::var("DATABASE_URL").ok();

        let pool_size = match env::var("DATABASE_POOL_SIZE") {
            Ok(raw) => raw.parse().map_err(|err| {
                std::io::Error::other(format!("invalid DATABASE_POOL_SIZE: {err}"))
            })?,
            Err(_) => 10,
        };

        Ok(Self {
            bind_addr,
            database_url,
            pool_size,
        })
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration for the given bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the persistence adapters.
    ///
    /// Without a pool the server runs on in-memory stores, which is the
    /// test and local-demo configuration.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
