//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Shortest accepted sweep interval in seconds.
pub const MIN_SWEEP_INTERVAL: u64 = 1;

/// Which storage strategy the server's cache is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Process-local map, lost on restart
    Memory,
    /// Sled-backed table store
    Durable,
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StrategyKind::Memory),
            "durable" | "sled" => Ok(StrategyKind::Durable),
            other => Err(format!("Unknown cache strategy: {}", other)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Memory => write!(f, "memory"),
            StrategyKind::Durable => write!(f, "durable"),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage strategy behind the cache
    pub strategy: StrategyKind,
    /// TTL in seconds for writes that do not specify one
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background expiry sweep interval in seconds
    pub sweep_interval: u64,
    /// Database path for the durable strategy
    pub db_path: String,
    /// Table name for the durable strategy
    pub table: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_STRATEGY` - `memory` or `durable` (default: memory)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Expiry sweep frequency in seconds, at least 1 (default: 60)
    /// - `CACHE_DB_PATH` - Sled database path (default: ./data/cache.sled)
    /// - `CACHE_TABLE` - Table used by the durable strategy (default: cache)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            strategy: parse_var("CACHE_STRATEGY").unwrap_or(defaults.strategy),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            sweep_interval: sweep_interval(parse_var("SWEEP_INTERVAL"), defaults.sweep_interval),
            db_path: env::var("CACHE_DB_PATH").unwrap_or(defaults.db_path),
            table: env::var("CACHE_TABLE").unwrap_or(defaults.table),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn sweep_interval(value: Option<u64>, default: u64) -> u64 {
    value.unwrap_or(default).max(MIN_SWEEP_INTERVAL)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Memory,
            default_ttl: 300,
            server_port: 3000,
            sweep_interval: 60,
            db_path: "./data/cache.sled".to_string(),
            table: "cache".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.strategy, StrategyKind::Memory);
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 60);
        assert_eq!(config.table, "cache");
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_STRATEGY");
        env::remove_var("DEFAULT_TTL");
        env::remove_var("SERVER_PORT");
        env::remove_var("SWEEP_INTERVAL");
        env::remove_var("CACHE_DB_PATH");
        env::remove_var("CACHE_TABLE");

        let config = Config::from_env();
        assert_eq!(config.strategy, StrategyKind::Memory);
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 60);
        assert_eq!(config.db_path, "./data/cache.sled");
    }

    #[test]
    fn test_zero_sweep_interval_is_clamped() {
        assert_eq!(sweep_interval(Some(0), 60), MIN_SWEEP_INTERVAL);
        assert_eq!(sweep_interval(Some(5), 60), 5);
        assert_eq!(sweep_interval(None, 60), 60);
    }

    #[test]
    fn test_strategy_kind_parse() {
        assert_eq!("memory".parse::<StrategyKind>(), Ok(StrategyKind::Memory));
        assert_eq!(" Durable ".parse::<StrategyKind>(), Ok(StrategyKind::Durable));
        assert_eq!("sled".parse::<StrategyKind>(), Ok(StrategyKind::Durable));
        assert!("redis".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_strategy_kind_display() {
        assert_eq!(StrategyKind::Memory.to_string(), "memory");
        assert_eq!(StrategyKind::Durable.to_string(), "durable");
    }
}
