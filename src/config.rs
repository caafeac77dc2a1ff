//! Server configuration read from the environment
//!
//! | Variable | Default |
//! |----------|---------|
//! | `JOB_STREAM_HOST` | `0.0.0.0` |
//! | `JOB_STREAM_PORT` | `8080` |
//! | `JOB_STREAM_INBOX_CAPACITY` | `100` |
//! | `JOB_STREAM_LOG_CAPACITY` | `100` |
//! | `JOB_STREAM_COMMAND_CAPACITY` | `100` |
//! | `JOB_STREAM_SLOW_POLICY` | `block` (or `disconnect`) |
//! | `JOB_STREAM_STEP_SCALE` | `1.0` |

use std::env;
use std::str::FromStr;

use crate::broadcaster::{BroadcasterConfig, SlowSubscriberPolicy};

/// Configuration error for one environment variable
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the binary needs to start
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub broadcaster: BroadcasterConfig,
    /// Multiplier for every job step delay; 0 runs the job without pauses
    pub step_delay_scale: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            broadcaster: BroadcasterConfig::default(),
            step_delay_scale: 1.0,
        }
    }
}

impl AppConfig {
    /// Read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup, falling back to defaults for missing keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("JOB_STREAM_HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or(defaults.host);
        let port = parse_var(&lookup, "JOB_STREAM_PORT", defaults.port)?;

        let broadcaster = BroadcasterConfig {
            inbox_capacity: parse_capacity(
                &lookup,
                "JOB_STREAM_INBOX_CAPACITY",
                defaults.broadcaster.inbox_capacity,
            )?,
            log_capacity: parse_capacity(
                &lookup,
                "JOB_STREAM_LOG_CAPACITY",
                defaults.broadcaster.log_capacity,
            )?,
            command_capacity: parse_capacity(
                &lookup,
                "JOB_STREAM_COMMAND_CAPACITY",
                defaults.broadcaster.command_capacity,
            )?,
            slow_subscriber_policy: parse_var::<SlowSubscriberPolicy, _>(
                &lookup,
                "JOB_STREAM_SLOW_POLICY",
                defaults.broadcaster.slow_subscriber_policy,
            )?,
        };

        let step_delay_scale: f64 =
            parse_var(&lookup, "JOB_STREAM_STEP_SCALE", defaults.step_delay_scale)?;
        if !step_delay_scale.is_finite() || step_delay_scale < 0.0 {
            return Err(ConfigError::Invalid {
                key: "JOB_STREAM_STEP_SCALE",
                value: step_delay_scale.to_string(),
                reason: "must be a finite number >= 0".to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            broadcaster,
            step_delay_scale,
        })
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}

fn parse_capacity<F>(lookup: &F, key: &'static str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = parse_var(lookup, key, default)?;
    if value == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: "0".to_string(),
            reason: "capacity must be at least 1".to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("JOB_STREAM_HOST", "127.0.0.1"),
            ("JOB_STREAM_PORT", "9090"),
            ("JOB_STREAM_INBOX_CAPACITY", "8"),
            ("JOB_STREAM_SLOW_POLICY", "disconnect"),
            ("JOB_STREAM_STEP_SCALE", "0.1"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:9090");
        assert_eq!(config.broadcaster.inbox_capacity, 8);
        assert_eq!(
            config.broadcaster.slow_subscriber_policy,
            SlowSubscriberPolicy::Disconnect
        );
        assert!((config.step_delay_scale - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = AppConfig::from_lookup(lookup_from(&[("JOB_STREAM_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "JOB_STREAM_PORT", .. }));

        let err =
            AppConfig::from_lookup(lookup_from(&[("JOB_STREAM_INBOX_CAPACITY", "0")])).unwrap_err();
        assert!(err.to_string().contains("at least 1"));

        assert!(AppConfig::from_lookup(lookup_from(&[("JOB_STREAM_STEP_SCALE", "-2")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("JOB_STREAM_SLOW_POLICY", "maybe")])).is_err());
    }
}
