use std::fmt;

/// Position in a video, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SeekTimestamp(u64);

impl SeekTimestamp {
    pub fn from_seconds(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Validates a raw timestamp as reported by the search service.
    ///
    /// Fractional seconds are truncated.
    pub fn from_reported(seconds: f64) -> Result<Self, TimestampError> {
        if !seconds.is_finite() {
            return Err(TimestampError::NotFinite);
        }
        if seconds < 0.0 {
            return Err(TimestampError::Negative(seconds));
        }
        Ok(Self(seconds.trunc() as u64))
    }

    pub fn seconds(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SeekTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimestampError {
    Negative(f64),
    NotFinite,
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampError::Negative(value) => write!(f, "negative timestamp {value}"),
            TimestampError::NotFinite => write!(f, "timestamp is not a finite number"),
        }
    }
}

impl std::error::Error for TimestampError {}
