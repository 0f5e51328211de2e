//! Service entry-point: configuration from the environment, then the server.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use tableside::inbound::http::health::HealthState;
use tableside::outbound::persistence::{DbPool, PoolConfig};
use tableside::server::{ServerConfig, create_server};

fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

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

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let mut config = ServerConfig::new(key, cookie_secure, SameSite::Lax, bind_addr);
    match env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = DbPool::new(PoolConfig::new(database_url))
                .await
                .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
            config = config.with_db_pool(pool);
        }
        Err(_) => {
            warn!("DATABASE_URL not set; serving from the in-memory store");
        }
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "server started");
    server.await
}
