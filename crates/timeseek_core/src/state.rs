use crate::view_model::AppViewModel;
use crate::{
    CycleId, QueryRequest, SeekTimestamp, TabSnapshot, TranscriptLine, VideoId, DEFAULT_USER_ID,
};

/// Tab and identifier captured when the cycle resolved the active tab.
/// Navigation targets this, never the tab that is active later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CapturedTarget {
    pub tab: TabSnapshot,
    pub video_id: VideoId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cycle {
    pub id: CycleId,
    pub query: String,
    pub target: Option<CapturedTarget>,
    pub timestamp: Option<SeekTimestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    user_id: String,
    input: String,
    transcript: Vec<TranscriptLine>,
    last_cycle: CycleId,
    cycle: Option<Cycle>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_USER_ID)
    }
}

impl AppState {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            input: String::new(),
            transcript: Vec::new(),
            last_cycle: 0,
            cycle: None,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            lines: self.transcript.clone(),
            input: self.input.clone(),
            send_enabled: self.cycle.is_none(),
        }
    }

    /// Returns whether the view changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_busy(&self) -> bool {
        self.cycle.is_some()
    }

    pub fn in_flight_cycle(&self) -> Option<CycleId> {
        self.cycle.as_ref().map(|cycle| cycle.id)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
    }

    pub(crate) fn push_line(&mut self, line: TranscriptLine) {
        self.transcript.push(line);
        self.dirty = true;
    }

    pub(crate) fn begin_cycle(&mut self, query: String) -> CycleId {
        self.last_cycle += 1;
        self.cycle = Some(Cycle {
            id: self.last_cycle,
            query,
            target: None,
            timestamp: None,
        });
        self.dirty = true;
        self.last_cycle
    }

    /// The in-flight cycle, if `id` names it.
    pub(crate) fn cycle_mut(&mut self, id: CycleId) -> Option<&mut Cycle> {
        self.cycle.as_mut().filter(|cycle| cycle.id == id)
    }

    /// Records the resolved target and builds the request for it.
    pub(crate) fn capture_target(
        &mut self,
        id: CycleId,
        tab: TabSnapshot,
        video_id: VideoId,
    ) -> Option<QueryRequest> {
        let user_id = self.user_id.clone();
        let cycle = self.cycle_mut(id)?;
        cycle.target = Some(CapturedTarget {
            tab,
            video_id: video_id.clone(),
        });
        Some(QueryRequest {
            video_id,
            query: cycle.query.clone(),
            user_id,
        })
    }

    /// Ends the in-flight cycle: the input is cleared and sends are enabled again.
    pub(crate) fn finish_cycle(&mut self) {
        self.cycle = None;
        self.input.clear();
        self.dirty = true;
    }
}
