//! Server configuration from environment variables.

use std::path::PathBuf;

/// Runtime configuration, read once at startup.
pub struct Config {
    /// Address the HTTP listener binds to.
    pub listen_addr: String,
    /// Path of the holdings CSV export.
    pub portfolio_file: PathBuf,
    /// Minimum interval between consecutive holdings, in milliseconds.
    pub pacing_ms: u64,
    /// Bounded wait per provider call, in milliseconds.
    pub provider_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: env_or("SECTORFOLIO_LISTEN_ADDR", "0.0.0.0:3000"),
            portfolio_file: PathBuf::from(env_or("SECTORFOLIO_PORTFOLIO_FILE", "portfolio.csv")),
            pacing_ms: env_parsed("SECTORFOLIO_PACING_MS", 1000),
            provider_timeout_ms: env_parsed("SECTORFOLIO_PROVIDER_TIMEOUT_MS", 10_000),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparseable {}={}, using {}", key, value, default);
            default
        }),
        Err(_) => default,
    }
}
