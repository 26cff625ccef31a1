//! Backend entry-point: configuration from the environment, tracing setup,
//! and server start.

mod server;

use std::env;
use std::net::SocketAddr;

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::persistence::{DbPool, PoolConfig};
use server::ServerConfig;

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

    let mut config = ServerConfig::new(bind_addr_from_env());
    if let Ok(url) = env::var("DATABASE_URL") {
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
        config = config.with_db_pool(pool);
    }

    server::run(config).await
}

/// `BIND_ADDR` from the environment, defaulting to port 8080 on all
/// interfaces; an unparsable value falls back to the default with a warning.
fn bind_addr_from_env() -> SocketAddr {
    let default = SocketAddr::from(([0, 0, 0, 0], 8080));
    match env::var("BIND_ADDR") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(value = %raw, "invalid BIND_ADDR, using default");
            default
        }),
        Err(_) => default,
    }
}
