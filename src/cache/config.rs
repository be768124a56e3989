//! Cache Configuration Module
//!
//! Validated construction parameters for a cache engine.

use std::time::Duration;

use crate::error::{ConfigError, ConfigViolation};

/// Smallest non-zero sweep interval accepted by [`CacheConfig::new`].
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(30);

// == Cache Config ==
/// Capacity and sweep settings for a cache engine.
///
/// Fields are private so a `CacheConfig` can only exist in a validated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    capacity: usize,
    sweep_interval: Duration,
}

impl CacheConfig {
    // == Constructor ==
    /// Validates and builds a configuration.
    ///
    /// Every rule is checked before returning, so the error lists all
    /// violations at once.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, must be > 0
    /// * `sweep_interval` - Background sweep period; zero disables sweeping,
    ///   otherwise it must be at least [`MIN_SWEEP_INTERVAL`]
    pub fn new(capacity: usize, sweep_interval: Duration) -> Result<Self, ConfigError> {
        let mut violations = Vec::with_capacity(2);

        if capacity == 0 {
            violations.push(ConfigViolation::ZeroCapacity);
        }
        if !sweep_interval.is_zero() && sweep_interval < MIN_SWEEP_INTERVAL {
            violations.push(ConfigViolation::SweepIntervalTooShort {
                interval: sweep_interval,
                minimum: MIN_SWEEP_INTERVAL,
            });
        }

        if !violations.is_empty() {
            return Err(ConfigError { violations });
        }

        Ok(Self {
            capacity,
            sweep_interval,
        })
    }

    /// Maximum number of entries the cache may hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Period of the background sweep, zero when disabled.
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    /// Returns true if a background sweep task should run.
    pub fn sweep_enabled(&self) -> bool {
        !self.sweep_interval.is_zero()
    }
}
