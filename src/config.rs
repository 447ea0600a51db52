//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON file holding the item catalog
    pub data_path: PathBuf,
    /// HTTP server port
    pub server_port: u16,
    /// Lifetime of a computed stats value in seconds
    pub stats_cache_ttl: u64,
    /// Maximum number of changed items the incremental stats path will absorb
    pub stats_incremental_threshold: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATA_PATH` - Item catalog file (default: data/items.json)
    /// - `SERVER_PORT` - HTTP server port (default: 3001)
    /// - `STATS_CACHE_TTL` - Stats cache TTL in seconds (default: 300)
    /// - `STATS_INCREMENTAL_THRESHOLD` - Max diff size for incremental updates (default: 5)
    pub fn from_env() -> Self {
        Self {
            data_path: env::var("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/items.json")),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3001),
            stats_cache_ttl: env::var("STATS_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            stats_incremental_threshold: env::var("STATS_INCREMENTAL_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Stats cache TTL as a Duration.
    pub fn stats_ttl(&self) -> Duration {
        Duration::from_secs(self.stats_cache_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/items.json"),
            server_port: 3001,
            stats_cache_ttl: 300,
            stats_incremental_threshold: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.data_path, PathBuf::from("data/items.json"));
        assert_eq!(config.server_port, 3001);
        assert_eq!(config.stats_cache_ttl, 300);
        assert_eq!(config.stats_incremental_threshold, 5);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("DATA_PATH");
        env::remove_var("SERVER_PORT");
        env::remove_var("STATS_CACHE_TTL");
        env::remove_var("STATS_INCREMENTAL_THRESHOLD");

        let config = Config::from_env();
        assert_eq!(config.data_path, PathBuf::from("data/items.json"));
        assert_eq!(config.server_port, 3001);
        assert_eq!(config.stats_cache_ttl, 300);
        assert_eq!(config.stats_incremental_threshold, 5);
    }

    #[test]
    fn test_stats_ttl_duration() {
        let config = Config::default();
        assert_eq!(config.stats_ttl(), Duration::from_secs(300));
    }
}
