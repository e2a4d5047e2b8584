//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::thread;
use std::time::Duration;

/// Multiplier applied to hardware parallelism to pick the default shard count.
const SHARD_FACTOR: usize = 4;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of independently-locked cache shards
    pub shard_count: usize,
    /// Default TTL in seconds for entries without explicit TTL
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background eviction sweep interval in seconds
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SHARD_COUNT` - Number of cache shards (default: 4x available parallelism)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 1800)
    /// - `SERVER_PORT` - HTTP server port (default: 4000)
    /// - `SWEEP_INTERVAL` - Eviction sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            shard_count: env::var("SHARD_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or_else(default_shard_count),
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1800),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4000),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }

    /// Default TTL as a Duration.
    pub fn default_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    /// Sweep interval as a Duration.
    pub fn sweep_interval_duration(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shard_count: default_shard_count(),
            default_ttl: 1800,
            server_port: 4000,
            sweep_interval: 60,
        }
    }
}

/// Default shard count: a small multiple of the hardware parallelism.
pub fn default_shard_count() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        * SHARD_FACTOR
}
