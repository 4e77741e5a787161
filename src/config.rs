//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the registry
//! is constructed.
//!
//! ## Variables
//!
//! All variables are optional:
//!
//! - `BASE_URL` - Display prefix for short URLs (default: `http://localhost:3000`)
//! - `MAX_ACTIVE_LINKS` - Concurrent active-link quota (default: 5, min: 1)
//! - `OP_DELAY_MS` - Simulated per-operation latency in ms (default: 0)
//! - `AUDIT_CAPACITY` - Retained audit entries (default: 1000, min: 10)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use url::Url;

/// Registry configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Display prefix for short URLs, without a trailing slash.
    pub base_url: String,
    /// How many records may be active at once.
    pub max_active_links: usize,
    /// Simulated latency applied before each operation.
    pub op_delay_ms: u64,
    /// How many audit entries the in-memory log retains.
    pub audit_capacity: usize,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            max_active_links: 5,
            op_delay_ms: 0,
            audit_capacity: 1000,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `BASE_URL` is set but does not parse as a URL.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let base_url = env::var("BASE_URL").unwrap_or(defaults.base_url);
        Url::parse(&base_url).with_context(|| format!("BASE_URL is not a valid URL: {base_url}"))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let max_active_links = env::var("MAX_ACTIVE_LINKS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_active_links)
            .max(1);

        let op_delay_ms = env::var("OP_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.op_delay_ms);

        let audit_capacity = env::var("AUDIT_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.audit_capacity)
            .max(10);

        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        Ok(Self {
            base_url,
            max_active_links,
            op_delay_ms,
            audit_capacity,
            log_level,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.max_active_links, 5);
        assert_eq!(config.op_delay_ms, 0);
        assert_eq!(config.audit_capacity, 1000);
    }
}
