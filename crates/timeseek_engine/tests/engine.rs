use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use timeseek_core::{extract_video_id, QueryRequest, SeekTimestamp};
use timeseek_engine::{
    BrowserError, BrowserTab, EngineEvent, EngineHandle, SearchClient, SearchError,
    TabController,
};

const WAIT: Duration = Duration::from_secs(5);

struct FixedSearch(SeekTimestamp);

#[async_trait]
impl SearchClient for FixedSearch {
    async fn search(&self, _request: &QueryRequest) -> Result<SeekTimestamp, SearchError> {
        Ok(self.0)
    }
}

#[derive(Default)]
struct RecordingTabs {
    navigations: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl TabController for RecordingTabs {
    async fn active_tab(&self) -> Result<BrowserTab, BrowserError> {
        Ok(BrowserTab {
            id: "PAGE1".to_string(),
            url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
        })
    }

    async fn navigate(&self, tab_id: &str, url: &str) -> Result<(), BrowserError> {
        self.navigations
            .lock()
            .unwrap()
            .push((tab_id.to_string(), url.to_string()));
        Ok(())
    }
}

#[test]
fn commands_are_answered_with_tagged_events() {
    timeseek_logging::initialize_for_tests();
    let tabs = Arc::new(RecordingTabs::default());
    let (engine, events) = EngineHandle::new(
        Arc::new(FixedSearch(SeekTimestamp::from_seconds(42))),
        tabs.clone(),
    );

    engine.resolve_active_tab(7);
    match events.recv_timeout(WAIT) {
        Some(EngineEvent::ActiveTab {
            cycle: 7,
            result: Ok(tab),
        }) => assert_eq!(tab.id, "PAGE1"),
        other => panic!("unexpected event {other:?}"),
    }

    engine.search(
        7,
        QueryRequest {
            video_id: extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            query: "intro part".to_string(),
            user_id: "user789".to_string(),
        },
    );
    assert_eq!(
        events.recv_timeout(WAIT),
        Some(EngineEvent::SearchFinished {
            cycle: 7,
            result: Ok(SeekTimestamp::from_seconds(42)),
        })
    );

    engine.navigate(7, "PAGE1", "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s");
    assert_eq!(
        events.recv_timeout(WAIT),
        Some(EngineEvent::Navigated {
            cycle: 7,
            result: Ok(()),
        })
    );
    assert_eq!(
        tabs.navigations.lock().unwrap().as_slice(),
        &[(
            "PAGE1".to_string(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s".to_string()
        )]
    );
    assert!(events.try_recv().is_none());
}
