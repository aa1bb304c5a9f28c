use crate::transcript::{error_text, failure_text, jump_text};
use crate::{
    extract_video_id, watch_url, AppState, CycleId, Effect, Msg, SearchFailure, SeekTimestamp,
    TabSnapshot, TranscriptLine, NO_VIDEO_ID_TEXT,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SendClicked | Msg::EnterPressed => send(&mut state),
        Msg::ActiveTabResolved { cycle, result } => active_tab_resolved(&mut state, cycle, result),
        Msg::SearchCompleted { cycle, result } => search_completed(&mut state, cycle, result),
        Msg::NavigationFinished { cycle, result } => {
            navigation_finished(&mut state, cycle, result)
        }
    };

    (state, effects)
}

fn send(state: &mut AppState) -> Vec<Effect> {
    if state.input().trim().is_empty() || state.is_busy() {
        return Vec::new();
    }
    let query = state.input().to_string();
    state.push_line(TranscriptLine::user(query.clone()));
    let cycle = state.begin_cycle(query);
    vec![Effect::QueryActiveTab { cycle }]
}

fn active_tab_resolved(
    state: &mut AppState,
    cycle: CycleId,
    result: Result<TabSnapshot, String>,
) -> Vec<Effect> {
    if state.cycle_mut(cycle).is_none() {
        return Vec::new();
    }
    let tab = match result {
        Ok(tab) => tab,
        Err(message) => return finish_with(state, error_text(&message)),
    };
    let Some(video_id) = extract_video_id(&tab.url) else {
        return finish_with(state, NO_VIDEO_ID_TEXT.to_string());
    };
    match state.capture_target(cycle, tab, video_id) {
        Some(request) => vec![Effect::PostQuery { cycle, request }],
        None => Vec::new(),
    }
}

fn search_completed(
    state: &mut AppState,
    cycle: CycleId,
    result: Result<SeekTimestamp, SearchFailure>,
) -> Vec<Effect> {
    let Some(current) = state.cycle_mut(cycle) else {
        return Vec::new();
    };
    let timestamp = match result {
        Ok(timestamp) => timestamp,
        Err(failure) => return finish_with(state, failure_text(&failure)),
    };
    // A search result can only arrive after the target was captured.
    let Some(target) = current.target.as_ref() else {
        return Vec::new();
    };
    let tab_id = target.tab.id.clone();
    let url = watch_url(&target.video_id, timestamp);
    current.timestamp = Some(timestamp);
    vec![Effect::NavigateTab { cycle, tab_id, url }]
}

fn navigation_finished(
    state: &mut AppState,
    cycle: CycleId,
    result: Result<(), String>,
) -> Vec<Effect> {
    let Some(current) = state.cycle_mut(cycle) else {
        return Vec::new();
    };
    let timestamp = current.timestamp.unwrap_or_default();
    let text = match result {
        Ok(()) => jump_text(timestamp),
        Err(message) => error_text(&message),
    };
    finish_with(state, text)
}

/// Appends the closing system line and finishes the cycle.
fn finish_with(state: &mut AppState, text: String) -> Vec<Effect> {
    state.push_line(TranscriptLine::system(text));
    state.finish_cycle();
    vec![Effect::ScrollToLatest]
}
