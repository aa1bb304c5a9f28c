//! Browser tab control over the Chromium remote-debugging endpoint.
//!
//! The browser must be started with `--remote-debugging-port=9222` (or the
//! port configured in `TIMESEEK_DEVTOOLS_URL`). Tabs are listed over HTTP and
//! navigated with `Page.navigate` on the tab's own debugger WebSocket, so the
//! tab keeps its id and history.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use timeseek_logging::{seek_debug, seek_info};
use tokio_tungstenite::tungstenite::Message;

use crate::{BrowserError, DEFAULT_DEVTOOLS_URL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserTab {
    pub id: String,
    pub url: String,
}

/// Reads the active tab and navigates tabs.
#[async_trait]
pub trait TabController: Send + Sync {
    async fn active_tab(&self) -> Result<BrowserTab, BrowserError>;

    /// Loads `url` in the tab `tab_id`.
    async fn navigate(&self, tab_id: &str, url: &str) -> Result<(), BrowserError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevToolsSettings {
    pub base_url: String,
    /// Deadline for each HTTP call and for the `Page.navigate` exchange.
    pub request_timeout: Duration,
}

impl Default for DevToolsSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DEVTOOLS_URL.to_string(),
            request_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DevToolsTarget {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    url: String,
    /// Absent while another DevTools client is attached to the target.
    #[serde(rename = "webSocketDebuggerUrl")]
    debugger_url: Option<String>,
}

const NAVIGATE_COMMAND_ID: u64 = 1;

#[derive(Debug, Deserialize)]
struct CdpReply {
    id: Option<u64>,
    result: Option<NavigateResult>,
    error: Option<CdpError>,
}

#[derive(Debug, Deserialize)]
struct NavigateResult {
    #[serde(rename = "errorText")]
    error_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CdpError {
    message: String,
}

#[derive(Debug, Clone)]
pub struct DevToolsTabs {
    settings: DevToolsSettings,
    client: reqwest::Client,
}

impl DevToolsTabs {
    pub fn new(settings: DevToolsSettings) -> Result<Self, BrowserError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| BrowserError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    async fn call(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, BrowserError> {
        let response = request
            .send()
            .await
            .map_err(|err| BrowserError::Network(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(BrowserError::HttpStatus(status.as_u16()));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| BrowserError::Network(err.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn call_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BrowserError> {
        let bytes = self.call(request).await?;
        serde_json::from_slice(&bytes).map_err(|err| BrowserError::Decode(err.to_string()))
    }

    async fn targets(&self) -> Result<Vec<DevToolsTarget>, BrowserError> {
        self.call_json(self.client.get(self.endpoint("/json/list")))
            .await
    }
}

#[async_trait]
impl TabController for DevToolsTabs {
    async fn active_tab(&self) -> Result<BrowserTab, BrowserError> {
        // The browser lists the most recently focused page first.
        let target = self
            .targets()
            .await?
            .into_iter()
            .find(|target| target.kind == "page")
            .ok_or(BrowserError::NoActiveTab)?;
        seek_debug!("Active tab id={} url={}", target.id, target.url);
        Ok(BrowserTab {
            id: target.id,
            url: target.url,
        })
    }

    async fn navigate(&self, tab_id: &str, url: &str) -> Result<(), BrowserError> {
        let target = self
            .targets()
            .await?
            .into_iter()
            .find(|target| target.id == tab_id)
            .ok_or_else(|| BrowserError::TabClosed(tab_id.to_string()))?;
        let debugger_url = target
            .debugger_url
            .ok_or_else(|| BrowserError::DebuggerBusy(tab_id.to_string()))?;

        let deadline = self.settings.request_timeout;
        match tokio::time::timeout(deadline, page_navigate(&debugger_url, url)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(BrowserError::Network(format!(
                    "no answer to Page.navigate within {}s",
                    deadline.as_secs()
                )))
            }
        }
        seek_info!("Navigated tab {} to {}", tab_id, url);
        Ok(())
    }
}

async fn page_navigate(debugger_url: &str, url: &str) -> Result<(), BrowserError> {
    let (mut socket, _) = tokio_tungstenite::connect_async(debugger_url)
        .await
        .map_err(|err| BrowserError::Network(err.to_string()))?;
    let command = json!({
        "id": NAVIGATE_COMMAND_ID,
        "method": "Page.navigate",
        "params": { "url": url },
    });
    socket
        .send(Message::Text(command.to_string()))
        .await
        .map_err(|err| BrowserError::Network(err.to_string()))?;

    while let Some(frame) = socket.next().await {
        let frame = frame.map_err(|err| BrowserError::Network(err.to_string()))?;
        let Message::Text(text) = frame else {
            continue;
        };
        let reply: CdpReply =
            serde_json::from_str(&text).map_err(|err| BrowserError::Decode(err.to_string()))?;
        // Events carry no id.
        if reply.id != Some(NAVIGATE_COMMAND_ID) {
            continue;
        }
        if let Err(err) = socket.close(None).await {
            seek_debug!("Closing debugger socket failed: {}", err);
        }
        if let Some(error) = reply.error {
            return Err(BrowserError::Navigation(error.message));
        }
        return match reply.result.and_then(|result| result.error_text) {
            Some(error_text) => Err(BrowserError::Navigation(error_text)),
            None => Ok(()),
        };
    }
    Err(BrowserError::Network(
        "debugger connection closed before Page.navigate was answered".to_string(),
    ))
}
