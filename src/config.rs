use std::env;
use std::net::SocketAddr;

use tracing::warn;

/// Shipped default so the server still starts unconfigured. Real
/// deployments must set SECRET_API_KEY.
pub const DEFAULT_API_KEY: &str = "insecure-dev-key";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub api_key: String,
}

impl Config {
    /// Reads DATABASE_URL, BIND_ADDR and SECRET_API_KEY, falling back to
    /// development defaults. The API-key fallback is logged loudly.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://courses.db".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .and_then(|addr| addr.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

        let api_key = env::var("SECRET_API_KEY").unwrap_or_else(|_| {
            warn!(
                "SECRET_API_KEY is not set, falling back to the insecure default key"
            );
            DEFAULT_API_KEY.to_string()
        });

        Self {
            database_url,
            bind_addr,
            api_key,
        }
    }
}
