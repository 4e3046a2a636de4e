//! Runtime configuration read from the environment.
//!
//! | Variable              | Default          |
//! |-----------------------|------------------|
//! | `BLOCKFALL_SEED`      | wall clock       |
//! | `BLOCKFALL_TICK_MS`   | 50               |
//! | `BLOCKFALL_LOG_PATH`  | unset, no log    |
//! | `BLOCKFALL_LOG_LEVEL` | `info`           |
//!
//! Unparseable values fall back to the default. A tick outside 1..=1000 ms
//! parses but is rejected by [`Config::validate`].

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};
use log::LevelFilter;

use crate::types::TICK_MS;

pub const MAX_TICK_MS: u32 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub seed: u64,
    pub tick_ms: u32,
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            tick_ms: TICK_MS,
            log_path: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let tick_ms = lookup("BLOCKFALL_TICK_MS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(TICK_MS);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        let log_level = lookup("BLOCKFALL_LOG_LEVEL")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(LevelFilter::Info);

        Self {
            seed,
            tick_ms,
            log_path,
            log_level,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 || self.tick_ms > MAX_TICK_MS {
            bail!(
                "tick length must be between 1 and {} ms, got {}",
                MAX_TICK_MS,
                self.tick_ms
            );
        }
        Ok(())
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms as u64)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
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
    fn test_config_from_env() {
        // Only checks that reading the real environment does not panic.
        let _config = Config::from_env();
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.tick_ms, 50);
        assert_eq!(config.log_path, None);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_values_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("BLOCKFALL_SEED", "42"),
            ("BLOCKFALL_TICK_MS", " 16 "),
            ("BLOCKFALL_LOG_PATH", "/tmp/blockfall.log"),
            ("BLOCKFALL_LOG_LEVEL", "debug"),
        ]));
        assert_eq!(config.seed, 42);
        assert_eq!(config.tick_ms, 16);
        assert_eq!(config.tick_duration(), Duration::from_millis(16));
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/blockfall.log")));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("BLOCKFALL_TICK_MS", "fast"),
            ("BLOCKFALL_LOG_PATH", "   "),
            ("BLOCKFALL_LOG_LEVEL", "loud"),
        ]));
        assert_eq!(config.tick_ms, 50);
        assert_eq!(config.log_path, None);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_out_of_range_tick_fails_validation() {
        let zero = Config::from_lookup(lookup(&[("BLOCKFALL_TICK_MS", "0")]));
        assert_eq!(zero.tick_ms, 0);
        assert!(zero.validate().is_err());

        let slow = Config::from_lookup(lookup(&[("BLOCKFALL_TICK_MS", "5000")]));
        assert_eq!(slow.tick_ms, 5000);
        assert!(slow.validate().is_err());

        let max = Config::from_lookup(lookup(&[("BLOCKFALL_TICK_MS", "1000")]));
        assert_eq!(max.tick_ms, MAX_TICK_MS);
        assert!(max.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_tick() {
        let config = Config {
            tick_ms: 0,
            ..Config::from_lookup(lookup(&[]))
        };
        assert!(config.validate().is_err());
    }
}
