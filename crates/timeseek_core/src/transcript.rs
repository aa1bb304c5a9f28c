use crate::{SearchFailure, SeekTimestamp};

pub const NO_VIDEO_ID_TEXT: &str = "Unable to extract video ID from the current YouTube URL.";
pub const FETCH_FAILED_TEXT: &str = "Error: Unable to fetch timestamp.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    System,
}

/// One visible line of the side panel log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub role: Role,
    pub text: String,
}

impl TranscriptLine {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            text: text.into(),
        }
    }
}

pub(crate) fn error_text(message: &str) -> String {
    format!("Error: {message}")
}

pub(crate) fn failure_text(failure: &SearchFailure) -> String {
    match failure {
        SearchFailure::HttpStatus(_) => FETCH_FAILED_TEXT.to_string(),
        SearchFailure::Timeout { after_secs } => {
            format!("Error: search request timed out after {after_secs}s")
        }
        SearchFailure::Exception(message) => error_text(message),
    }
}

pub(crate) fn jump_text(timestamp: SeekTimestamp) -> String {
    format!("Jumping to {timestamp} seconds!")
}
