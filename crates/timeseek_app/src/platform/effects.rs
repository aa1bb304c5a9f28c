use std::sync::mpsc;
use std::thread;

use timeseek_core::{Effect, Msg, SearchFailure, TabSnapshot};
use timeseek_engine::{EngineEvent, EngineEvents, EngineHandle, SearchError, SearchFailureKind};
use timeseek_logging::{seek_info, seek_warn};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    /// Starts forwarding engine events as messages; `repaint` wakes the UI for each one.
    pub fn new(
        engine: EngineHandle,
        events: EngineEvents,
        msg_tx: mpsc::Sender<Msg>,
        repaint: egui::Context,
    ) -> Self {
        spawn_event_loop(events, msg_tx, repaint);
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::QueryActiveTab { cycle } => {
                    seek_info!("cycle={} QueryActiveTab", cycle);
                    self.engine.resolve_active_tab(cycle);
                }
                Effect::PostQuery { cycle, request } => {
                    seek_info!(
                        "cycle={} PostQuery video_id={} query_len={}",
                        cycle,
                        request.video_id,
                        request.query.len()
                    );
                    self.engine.search(cycle, request);
                }
                Effect::NavigateTab { cycle, tab_id, url } => {
                    seek_info!("cycle={} NavigateTab tab_id={} url={}", cycle, tab_id, url);
                    self.engine.navigate(cycle, tab_id, url);
                }
                Effect::ScrollToLatest => {
                    // handled by the view
                }
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, msg_tx: mpsc::Sender<Msg>, repaint: egui::Context) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if msg_tx.send(map_event(event)).is_err() {
                break;
            }
            repaint.request_repaint();
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ActiveTab { cycle, result } => Msg::ActiveTabResolved {
            cycle,
            result: result
                .map(|tab| TabSnapshot {
                    id: tab.id,
                    url: tab.url,
                })
                .map_err(|err| {
                    seek_warn!("cycle={} active tab query failed: {}", cycle, err);
                    err.to_string()
                }),
        },
        EngineEvent::SearchFinished { cycle, result } => Msg::SearchCompleted {
            cycle,
            result: result.map_err(|err| {
                seek_warn!("cycle={} search failed ({}): {}", cycle, err.kind, err.message);
                map_search_error(err)
            }),
        },
        EngineEvent::Navigated { cycle, result } => Msg::NavigationFinished {
            cycle,
            result: result.map_err(|err| {
                seek_warn!("cycle={} navigation failed: {}", cycle, err);
                err.to_string()
            }),
        },
    }
}

fn map_search_error(err: SearchError) -> SearchFailure {
    match err.kind {
        SearchFailureKind::HttpStatus(code) => SearchFailure::HttpStatus(code),
        SearchFailureKind::Timeout { after } => SearchFailure::Timeout {
            after_secs: after.as_secs(),
        },
        SearchFailureKind::InvalidEndpoint
        | SearchFailureKind::Network
        | SearchFailureKind::Encode
        | SearchFailureKind::Decode => SearchFailure::Exception(err.message),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use timeseek_core::SeekTimestamp;
    use timeseek_engine::{BrowserError, BrowserTab};

    use super::*;

    fn search_error(kind: SearchFailureKind, message: &str) -> SearchError {
        SearchError {
            kind,
            message: message.to_string(),
        }
    }

    #[test]
    fn search_errors_map_to_failure_kinds() {
        assert_eq!(
            map_search_error(search_error(
                SearchFailureKind::HttpStatus(500),
                "500 Internal Server Error"
            )),
            SearchFailure::HttpStatus(500)
        );
        assert_eq!(
            map_search_error(search_error(
                SearchFailureKind::Timeout {
                    after: Duration::from_secs(30)
                },
                "no response within 30s"
            )),
            SearchFailure::Timeout { after_secs: 30 }
        );
        assert_eq!(
            map_search_error(search_error(
                SearchFailureKind::Network,
                "error sending request"
            )),
            SearchFailure::Exception("error sending request".to_string())
        );
        assert_eq!(
            map_search_error(search_error(SearchFailureKind::Decode, "expected value")),
            SearchFailure::Exception("expected value".to_string())
        );
    }

    #[test]
    fn request_encoding_failures_are_not_blamed_on_the_response() {
        assert_eq!(SearchFailureKind::Encode.to_string(), "invalid request body");
        assert_eq!(
            map_search_error(search_error(SearchFailureKind::Encode, "key must be a string")),
            SearchFailure::Exception("key must be a string".to_string())
        );
    }

    #[test]
    fn engine_events_become_cycle_messages() {
        let tab = BrowserTab {
            id: "PAGE1".to_string(),
            url: "https://youtu.be/abc".to_string(),
        };
        assert_eq!(
            map_event(EngineEvent::ActiveTab {
                cycle: 3,
                result: Ok(tab),
            }),
            Msg::ActiveTabResolved {
                cycle: 3,
                result: Ok(TabSnapshot {
                    id: "PAGE1".to_string(),
                    url: "https://youtu.be/abc".to_string(),
                }),
            }
        );
        assert_eq!(
            map_event(EngineEvent::SearchFinished {
                cycle: 3,
                result: Ok(SeekTimestamp::from_seconds(42)),
            }),
            Msg::SearchCompleted {
                cycle: 3,
                result: Ok(SeekTimestamp::from_seconds(42)),
            }
        );
        assert_eq!(
            map_event(EngineEvent::Navigated {
                cycle: 3,
                result: Err(BrowserError::NoActiveTab),
            }),
            Msg::NavigationFinished {
                cycle: 3,
                result: Err("no page tab is open in the browser".to_string()),
            }
        );
    }
}
