use crate::VideoId;

/// Identifies one send cycle; messages from older cycles are dropped.
pub type CycleId = u64;

/// User id sent when no other is configured.
pub const DEFAULT_USER_ID: &str = "user789";

/// Active browser tab as seen when a cycle resolved it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSnapshot {
    pub id: String,
    pub url: String,
}

/// Body of one search call. Built once per cycle and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub video_id: VideoId,
    pub query: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFailure {
    /// Non-2xx status; the body is not inspected.
    HttpStatus(u16),
    /// The call outlived its deadline.
    Timeout { after_secs: u64 },
    /// Transport or decoding failure, surfaced verbatim.
    Exception(String),
}
