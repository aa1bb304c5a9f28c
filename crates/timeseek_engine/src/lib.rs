//! Timeseek engine: search service client, browser tab control, effect execution.
mod browser;
mod config;
mod engine;
mod search;
mod types;

pub use browser::{BrowserTab, DevToolsSettings, DevToolsTabs, TabController};
pub use config::{
    ConfigError, EngineConfig, DEFAULT_DEVTOOLS_URL, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS,
    ENV_DEVTOOLS_URL, ENV_ENDPOINT, ENV_TIMEOUT_SECS, ENV_USER_ID,
};
pub use engine::{EngineError, EngineEvents, EngineHandle};
pub use search::{ReqwestSearchClient, SearchClient, SearchSettings};
pub use types::{BrowserError, EngineEvent, SearchError, SearchFailureKind};
