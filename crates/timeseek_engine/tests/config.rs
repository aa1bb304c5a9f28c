use std::collections::HashMap;
use std::time::Duration;

use pretty_assertions::assert_eq;
use timeseek_engine::{
    ConfigError, EngineConfig, ENV_DEVTOOLS_URL, ENV_ENDPOINT, ENV_TIMEOUT_SECS, ENV_USER_ID,
};

fn config_from(vars: &[(&str, &str)]) -> Result<EngineConfig, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    EngineConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_match_the_bundled_service() {
    let config = config_from(&[]).expect("defaults");

    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.endpoint, "http://127.0.0.1:8000/search_video");
    assert_eq!(config.user_id, "user789");
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert_eq!(config.devtools_url, "http://127.0.0.1:9222");
}

#[test]
fn environment_overrides_every_value() {
    let config = config_from(&[
        (ENV_ENDPOINT, " https://search.example.com/search_video "),
        (ENV_USER_ID, "alice"),
        (ENV_TIMEOUT_SECS, "5"),
        (ENV_DEVTOOLS_URL, "http://localhost:9333"),
    ])
    .expect("config");

    assert_eq!(config.endpoint, "https://search.example.com/search_video");
    assert_eq!(config.user_id, "alice");
    assert_eq!(config.request_timeout, Duration::from_secs(5));
    assert_eq!(config.devtools_url, "http://localhost:9333");

    let search = config.search_settings();
    assert_eq!(search.endpoint, config.endpoint);
    assert_eq!(search.request_timeout, Duration::from_secs(5));
    assert_eq!(config.devtools_settings().base_url, "http://localhost:9333");
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let config = config_from(&[(ENV_USER_ID, "  "), (ENV_ENDPOINT, "")]).expect("config");

    assert_eq!(config, EngineConfig::default());
}

#[test]
fn invalid_values_are_rejected() {
    assert!(matches!(
        config_from(&[(ENV_ENDPOINT, "not a url")]),
        Err(ConfigError::InvalidUrl {
            var: ENV_ENDPOINT,
            ..
        })
    ));
    assert!(matches!(
        config_from(&[(ENV_DEVTOOLS_URL, "ftp://localhost:9222")]),
        Err(ConfigError::InvalidUrl {
            var: ENV_DEVTOOLS_URL,
            ..
        })
    ));
    assert_eq!(
        config_from(&[(ENV_TIMEOUT_SECS, "0")]),
        Err(ConfigError::InvalidTimeout {
            var: ENV_TIMEOUT_SECS,
            value: "0".to_string(),
        })
    );
    assert!(config_from(&[(ENV_TIMEOUT_SECS, "soon")]).is_err());
}
