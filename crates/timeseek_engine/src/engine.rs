use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use timeseek_core::{CycleId, QueryRequest};
use timeseek_logging::{seek_debug, seek_warn};

use crate::{
    BrowserError, DevToolsTabs, EngineConfig, EngineEvent, ReqwestSearchClient, SearchClient,
    SearchError, TabController,
};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("search client setup failed: {0}")]
    Search(#[from] SearchError),
    #[error("browser client setup failed: {0}")]
    Browser(#[from] BrowserError),
}

enum EngineCommand {
    ResolveActiveTab {
        cycle: CycleId,
    },
    Search {
        cycle: CycleId,
        request: QueryRequest,
    },
    Navigate {
        cycle: CycleId,
        tab_id: String,
        url: String,
    },
}

/// Sends IO commands to the engine thread.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receives the outcome of every command, in completion order.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(
        search: Arc<dyn SearchClient>,
        tabs: Arc<dyn TabController>,
    ) -> (Self, EngineEvents) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let search = search.clone();
                let tabs = tabs.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(search.as_ref(), tabs.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        (Self { cmd_tx }, EngineEvents { event_rx })
    }

    /// Builds the HTTP search client and the DevTools tab controller from config.
    pub fn from_config(config: &EngineConfig) -> Result<(Self, EngineEvents), EngineError> {
        let search = ReqwestSearchClient::new(config.search_settings())?;
        let tabs = DevToolsTabs::new(config.devtools_settings())?;
        Ok(Self::new(Arc::new(search), Arc::new(tabs)))
    }

    pub fn resolve_active_tab(&self, cycle: CycleId) {
        self.submit(EngineCommand::ResolveActiveTab { cycle });
    }

    pub fn search(&self, cycle: CycleId, request: QueryRequest) {
        self.submit(EngineCommand::Search { cycle, request });
    }

    pub fn navigate(&self, cycle: CycleId, tab_id: impl Into<String>, url: impl Into<String>) {
        self.submit(EngineCommand::Navigate {
            cycle,
            tab_id: tab_id.into(),
            url: url.into(),
        });
    }

    fn submit(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            seek_warn!("Engine thread has stopped; command dropped");
        }
    }
}

impl EngineEvents {
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event; `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    search: &dyn SearchClient,
    tabs: &dyn TabController,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::ResolveActiveTab { cycle } => {
            seek_debug!("cycle={} resolving active tab", cycle);
            EngineEvent::ActiveTab {
                cycle,
                result: tabs.active_tab().await,
            }
        }
        EngineCommand::Search { cycle, request } => {
            seek_debug!("cycle={} searching video_id={}", cycle, request.video_id);
            EngineEvent::SearchFinished {
                cycle,
                result: search.search(&request).await,
            }
        }
        EngineCommand::Navigate { cycle, tab_id, url } => {
            seek_debug!("cycle={} navigating tab {}", cycle, tab_id);
            EngineEvent::Navigated {
                cycle,
                result: tabs.navigate(&tab_id, &url).await,
            }
        }
    }
}
