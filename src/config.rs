//! Configuration Module
//!
//! Handles loading server configuration from environment variables and
//! building the configured cache engine from it.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde_json::Value;

use crate::cache::{CacheConfig, LruCache};
use crate::error::{CacheError, ConfigError, ConfigViolation, Result};

// == Cache Type ==
/// Eviction policy selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheType {
    Lru,
}

impl FromStr for CacheType {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LRU" => Ok(CacheType::Lru),
            _ => Err(CacheError::UnsupportedCacheType(s.to_string())),
        }
    }
}

impl fmt::Display for CacheType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheType::Lru => write!(f, "LRU"),
        }
    }
}

/// Server configuration parameters.
///
/// Unset variables take their defaults. The cache type is kept verbatim and
/// only interpreted by [`build_cache`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Eviction policy name, e.g. "LRU"
    pub cache_type: String,
    /// Background sweep interval in seconds, 0 disables sweeping
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_TYPE` - Eviction policy (default: LRU)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidConfig`] if any variable is set to a value
    /// that does not parse or breaks a cache rule, listing every violation.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads the configuration through `lookup`, which maps a variable name
    /// to its value when set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let capacity = parse_var::<_, usize>(&lookup, "CACHE_CAPACITY");
        let sweep_interval = parse_var::<_, u64>(&lookup, "SWEEP_INTERVAL");
        let server_port = parse_var::<_, u16>(&lookup, "SERVER_PORT");

        let mut violations: Vec<ConfigViolation> = [
            capacity.as_ref().err(),
            sweep_interval.as_ref().err(),
            server_port.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect();

        if !violations.is_empty() {
            // Unparsable values get always-valid stand-ins for the rule check
            let capacity = capacity.unwrap_or(Some(1)).unwrap_or(defaults.capacity);
            let interval = sweep_interval.unwrap_or(Some(0)).unwrap_or(defaults.sweep_interval);
            if let Err(err) = CacheConfig::new(capacity, Duration::from_secs(interval)) {
                violations.extend(err.violations);
            }
            return Err(ConfigError { violations }.into());
        }

        Ok(Self {
            capacity: capacity.ok().flatten().unwrap_or(defaults.capacity),
            cache_type: lookup("CACHE_TYPE").unwrap_or(defaults.cache_type),
            sweep_interval: sweep_interval.ok().flatten().unwrap_or(defaults.sweep_interval),
            server_port: server_port.ok().flatten().unwrap_or(defaults.server_port),
        })
    }

    /// Validates the cache portion of the configuration.
    pub fn cache_config(&self) -> Result<CacheConfig> {
        let config = CacheConfig::new(self.capacity, Duration::from_secs(self.sweep_interval))?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1000,
            cache_type: CacheType::Lru.to_string(),
            sweep_interval: 60,
            server_port: 8080,
        }
    }
}

/// Reads one variable, `Ok(None)` when unset.
fn parse_var<F, T>(lookup: &F, name: &'static str) -> std::result::Result<Option<T>, ConfigViolation>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigViolation::Unparsable {
            variable: name,
            value: raw.clone(),
        })
}

// == Cache Factory ==
/// Builds the cache engine named by `config.cache_type`.
///
/// Fails on an unknown cache type or on any configuration violation, in
/// which case no engine is created.
pub fn build_cache(config: &Config) -> Result<LruCache<String, Value>> {
    let cache_type: CacheType = config.cache_type.parse()?;
    let cache_config = config.cache_config()?;

    match cache_type {
        CacheType::Lru => Ok(LruCache::new(cache_config)),
    }
}
