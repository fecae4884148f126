use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub const ENV_HTTP_TIMEOUT_SECS: &str = "ONEPLATFORM_HTTP_TIMEOUT_SECS";
pub const ENV_ALLOW_INSECURE_TLS: &str = "ONEPLATFORM_ALLOW_INSECURE_TLS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub allow_insecure_tls: bool,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            allow_insecure_tls: false,
            user_agent: default_user_agent(),
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_insecure_tls(mut self, enabled: bool) -> Self {
        self.allow_insecure_tls = enabled;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Builds the config from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    name: ENV_HTTP_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup(ENV_ALLOW_INSECURE_TLS) {
            config.allow_insecure_tls = parse_bool(ENV_ALLOW_INSECURE_TLS, &raw)?;
        }
        Ok(config)
    }
}

pub fn default_user_agent() -> String {
    format!("oneplatform-sdk-rust/{}", crate::version())
}

/// Reads a process environment variable, treating empty values as unset.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

pub fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name).ok_or(ConfigError::Missing(name))
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
        }),
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
    fn defaults_are_secure_with_five_second_timeout() {
        let config = TransportConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.allow_insecure_tls);
        assert!(config.user_agent.starts_with("oneplatform-sdk-rust/"));
    }

    #[test]
    fn lookup_overrides_timeout_and_tls() {
        let config = TransportConfig::from_lookup(lookup(&[
            (ENV_HTTP_TIMEOUT_SECS, "30"),
            (ENV_ALLOW_INSECURE_TLS, "TRUE"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.allow_insecure_tls);
    }

    #[test]
    fn lookup_rejects_zero_timeout() {
        let err =
            TransportConfig::from_lookup(lookup(&[(ENV_HTTP_TIMEOUT_SECS, "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: ENV_HTTP_TIMEOUT_SECS,
                value: "0".into()
            }
        );
    }

    #[test]
    fn lookup_rejects_unknown_bool() {
        let err =
            TransportConfig::from_lookup(lookup(&[(ENV_ALLOW_INSECURE_TLS, "maybe")])).unwrap_err();
        assert!(err.to_string().contains(ENV_ALLOW_INSECURE_TLS));
    }

    #[test]
    fn require_reports_missing_key() {
        let err = require(&lookup(&[]), "ONEID_CLIENT_ID").unwrap_err();
        assert_eq!(err.to_string(), "ONEID_CLIENT_ID must be set");
    }
}
