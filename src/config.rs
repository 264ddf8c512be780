//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Key prefix applied when `CACHE_INSTANCE_NAME` is not set.
pub const DEFAULT_INSTANCE_NAME: &str = "myCacheRedisMainKey:";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection string; the in-memory store is used when absent
    pub redis_url: Option<String>,
    /// Namespace prefix prepended to every cache key
    pub instance_name: String,
    /// HTTP server port
    pub server_port: u16,
    /// Memory store sweep interval in seconds
    pub cleanup_interval: u64,
    /// Whether simulated database queries sleep
    pub simulate_latency: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Redis connection string (default: unset, in-memory store)
    /// - `CACHE_INSTANCE_NAME` - Cache key prefix (default: `myCacheRedisMainKey:`)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Memory store sweep frequency in seconds (default: 60)
    /// - `SIMULATE_LATENCY` - `false`/`0` disables database delays (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            redis_url: env::var("REDIS_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            instance_name: env::var("CACHE_INSTANCE_NAME").unwrap_or(defaults.instance_name),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cleanup_interval),
            simulate_latency: env::var("SIMULATE_LATENCY")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.simulate_latency),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            instance_name: DEFAULT_INSTANCE_NAME.to_string(),
            server_port: 3000,
            cleanup_interval: 60,
            simulate_latency: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
