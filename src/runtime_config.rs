//! # Runtime Configuration Module
//!
//! Environment variable based configuration for action selection.
//!
//! ## Environment Variables
//!
//! ### `BRRTR_SLOW_SELECT_US`
//!
//! Selections taking longer than this many microseconds are logged at `warn`
//! as slow. Accepts decimal or `0x` hexadecimal.
//!
//! Default: `1000` (1 ms)
//!
//! ### `BRRTR_PREWARM_INVENTORY`
//!
//! When `true`, [`ActionSelector::prewarm`](crate::selector::ActionSelector::prewarm)
//! builds inventories eagerly at startup. When `false` it does nothing and every
//! inventory is built on its controller's first request.
//!
//! Default: `true`
//!
//! ## Usage
//!
//! ```rust
//! use brrtrouter_actions::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Slow selection threshold: {:?}", config.slow_select_threshold);
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_SLOW_SELECT_US: u64 = 1000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Selections slower than this are logged as slow
    pub slow_select_threshold: Duration,
    /// Build inventories eagerly in `prewarm`
    pub prewarm_inventory: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            slow_select_threshold: Duration::from_micros(DEFAULT_SLOW_SELECT_US),
            prewarm_inventory: true,
        }
    }
}

fn parse_u64(val: &str) -> Option<u64> {
    match val.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let slow_select_threshold = lookup("BRRTR_SLOW_SELECT_US")
            .and_then(|v| parse_u64(&v))
            .map(Duration::from_micros)
            .unwrap_or(defaults.slow_select_threshold);
        let prewarm_inventory = lookup("BRRTR_PREWARM_INVENTORY")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.prewarm_inventory);
        RuntimeConfig {
            slow_select_threshold,
            prewarm_inventory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = RuntimeConfig::from_lookup(lookup(&[]));
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.slow_select_threshold, Duration::from_millis(1));
    }

    #[test]
    fn test_decimal_and_hex_thresholds() {
        let config = RuntimeConfig::from_lookup(lookup(&[("BRRTR_SLOW_SELECT_US", "250")]));
        assert_eq!(config.slow_select_threshold, Duration::from_micros(250));
        let config = RuntimeConfig::from_lookup(lookup(&[("BRRTR_SLOW_SELECT_US", "0x100")]));
        assert_eq!(config.slow_select_threshold, Duration::from_micros(256));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("BRRTR_SLOW_SELECT_US", "soon"),
            ("BRRTR_PREWARM_INVENTORY", "maybe"),
        ]));
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn test_prewarm_can_be_disabled() {
        let config = RuntimeConfig::from_lookup(lookup(&[("BRRTR_PREWARM_INVENTORY", "off")]));
        assert!(!config.prewarm_inventory);
    }
}
