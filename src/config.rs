//! Configuration Module
//!
//! Handles loading the Redis connection settings from environment variables.

use std::env;

/// Default Redis endpoint, the client library's local default.
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/";

/// Connection configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL
    pub redis_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Redis connection URL (default: `redis://127.0.0.1:6379/`)
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: DEFAULT_REDIS_URL.to_string(),
        }
    }
}
