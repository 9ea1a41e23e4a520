use std::env;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

use crate::room::types::UnknownActionPolicy;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_CHAT_HISTORY_LIMIT: usize = 500;
pub const DEFAULT_EVENT_QUEUE_CAPACITY: usize = 1024;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Server settings, read from the environment at startup
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Per-room chat buffer size; the oldest line is dropped once full
    pub chat_history_limit: usize,
    pub unknown_action_policy: UnknownActionPolicy,
    /// Bound of the queue feeding the event worker
    pub event_queue_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            chat_history_limit: DEFAULT_CHAT_HISTORY_LIMIT,
            unknown_action_policy: UnknownActionPolicy::Relay,
            event_queue_capacity: DEFAULT_EVENT_QUEUE_CAPACITY,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = host.parse::<IpAddr>().map_err(|e| ConfigError::InvalidValue {
            name: "HOST",
            reason: e.to_string(),
        })?;

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;

        let chat_history_limit =
            parse_or(&lookup, "CHAT_HISTORY_LIMIT", DEFAULT_CHAT_HISTORY_LIMIT)?;
        if chat_history_limit == 0 {
            return Err(ConfigError::InvalidValue {
                name: "CHAT_HISTORY_LIMIT",
                reason: "must be at least 1".to_string(),
            });
        }

        let unknown_action_policy = match lookup("UNKNOWN_ACTION_POLICY") {
            Some(raw) => raw
                .parse::<UnknownActionPolicy>()
                .map_err(|reason| ConfigError::InvalidValue {
                    name: "UNKNOWN_ACTION_POLICY",
                    reason,
                })?,
            None => UnknownActionPolicy::default(),
        };

        let event_queue_capacity =
            parse_or(&lookup, "EVENT_QUEUE_CAPACITY", DEFAULT_EVENT_QUEUE_CAPACITY)?;
        if event_queue_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                name: "EVENT_QUEUE_CAPACITY",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            chat_history_limit,
            unknown_action_policy,
            event_queue_capacity,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue {
                name,
                reason: e.to_string(),
            }),
        None => Ok(default),
    }
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
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:3001");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "4000"),
            ("CHAT_HISTORY_LIMIT", "10"),
            ("UNKNOWN_ACTION_POLICY", "reject"),
            ("EVENT_QUEUE_CAPACITY", "8"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:4000");
        assert_eq!(config.chat_history_limit, 10);
        assert_eq!(config.unknown_action_policy, UnknownActionPolicy::Reject);
        assert_eq!(config.event_queue_capacity, 8);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "abc")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "PORT", .. }));

        let err =
            ServerConfig::from_lookup(lookup_from(&[("CHAT_HISTORY_LIMIT", "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "CHAT_HISTORY_LIMIT",
                ..
            }
        ));

        let err = ServerConfig::from_lookup(lookup_from(&[("UNKNOWN_ACTION_POLICY", "drop")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "UNKNOWN_ACTION_POLICY",
                ..
            }
        ));

        let err = ServerConfig::from_lookup(lookup_from(&[("HOST", "not-an-ip")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "HOST", .. }));
    }
}
