use std::time::Duration;

use thiserror::Error;
use timeseek_core::DEFAULT_USER_ID;

use crate::{DevToolsSettings, SearchSettings};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/search_video";
pub const DEFAULT_DEVTOOLS_URL: &str = "http://127.0.0.1:9222";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_ENDPOINT: &str = "TIMESEEK_ENDPOINT";
pub const ENV_USER_ID: &str = "TIMESEEK_USER_ID";
pub const ENV_TIMEOUT_SECS: &str = "TIMESEEK_TIMEOUT_SECS";
pub const ENV_DEVTOOLS_URL: &str = "TIMESEEK_DEVTOOLS_URL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid http(s) URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
    #[error("{var} must be a positive whole number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Runtime settings for the side panel, read from the environment.
///
/// Blank variables count as unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub endpoint: String,
    pub user_id: String,
    pub request_timeout: Duration,
    pub devtools_url: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            devtools_url: DEFAULT_DEVTOOLS_URL.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };
        let defaults = Self::default();

        let endpoint = match value(ENV_ENDPOINT) {
            Some(raw) => validate_url(ENV_ENDPOINT, raw)?,
            None => defaults.endpoint,
        };
        let devtools_url = match value(ENV_DEVTOOLS_URL) {
            Some(raw) => validate_url(ENV_DEVTOOLS_URL, raw)?,
            None => defaults.devtools_url,
        };
        let request_timeout = match value(ENV_TIMEOUT_SECS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: ENV_TIMEOUT_SECS,
                        value: raw,
                    })
                }
            },
            None => defaults.request_timeout,
        };
        let user_id = value(ENV_USER_ID).unwrap_or(defaults.user_id);

        Ok(Self {
            endpoint,
            user_id,
            request_timeout,
            devtools_url,
        })
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            endpoint: self.endpoint.clone(),
            request_timeout: self.request_timeout,
            ..SearchSettings::default()
        }
    }

    pub fn devtools_settings(&self) -> DevToolsSettings {
        DevToolsSettings {
            base_url: self.devtools_url.clone(),
            ..DevToolsSettings::default()
        }
    }
}

fn validate_url(var: &'static str, raw: String) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(&raw).map_err(|err| ConfigError::InvalidUrl {
        var,
        reason: err.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(raw),
        other => Err(ConfigError::InvalidUrl {
            var,
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}
