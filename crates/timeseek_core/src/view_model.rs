use crate::TranscriptLine;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub lines: Vec<TranscriptLine>,
    pub input: String,
    /// False while a send cycle is in flight.
    pub send_enabled: bool,
}
