use std::fmt;
use std::time::Duration;

use thiserror::Error;
use timeseek_core::{CycleId, SeekTimestamp};

use crate::BrowserTab;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ActiveTab {
        cycle: CycleId,
        result: Result<BrowserTab, BrowserError>,
    },
    SearchFinished {
        cycle: CycleId,
        result: Result<SeekTimestamp, SearchError>,
    },
    Navigated {
        cycle: CycleId,
        result: Result<(), BrowserError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SearchError {
    pub kind: SearchFailureKind,
    pub message: String,
}

impl SearchError {
    pub(crate) fn new(kind: SearchFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn timeout(after: Duration) -> Self {
        Self::new(
            SearchFailureKind::Timeout { after },
            format!("no response within {}s", after.as_secs()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout { after: Duration },
    Network,
    /// The request body could not be serialized.
    Encode,
    Decode,
}

impl fmt::Display for SearchFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchFailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            SearchFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            SearchFailureKind::Timeout { after } => write!(f, "timeout after {after:?}"),
            SearchFailureKind::Network => write!(f, "network error"),
            SearchFailureKind::Encode => write!(f, "invalid request body"),
            SearchFailureKind::Decode => write!(f, "invalid response body"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowserError {
    #[error("no page tab is open in the browser")]
    NoActiveTab,
    #[error("tab {0} is no longer open")]
    TabClosed(String),
    #[error("tab {0} is already attached to another debugger")]
    DebuggerBusy(String),
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("browser answered with http status {0}")]
    HttpStatus(u16),
    #[error("browser is unreachable: {0}")]
    Network(String),
    #[error("unexpected browser response: {0}")]
    Decode(String),
}
