use crate::{CycleId, SearchFailure, SeekTimestamp, TabSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the query input.
    InputChanged(String),
    /// User clicked Send.
    SendClicked,
    /// User pressed Enter while the input had focus.
    EnterPressed,
    /// Browser answered the active tab query for a cycle.
    ActiveTabResolved {
        cycle: CycleId,
        result: Result<TabSnapshot, String>,
    },
    /// Search service answered (or failed) for a cycle.
    SearchCompleted {
        cycle: CycleId,
        result: Result<SeekTimestamp, SearchFailure>,
    },
    /// Browser finished navigating the captured tab.
    NavigationFinished {
        cycle: CycleId,
        result: Result<(), String>,
    },
}
