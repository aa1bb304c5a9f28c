use crate::{CycleId, QueryRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    QueryActiveTab { cycle: CycleId },
    PostQuery { cycle: CycleId, request: QueryRequest },
    NavigateTab {
        cycle: CycleId,
        tab_id: String,
        url: String,
    },
    ScrollToLatest,
}
