//! Timeseek core: pure state machine for the seek side panel.
mod effect;
mod msg;
mod query;
mod state;
mod timestamp;
mod transcript;
mod update;
mod video_id;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use query::{CycleId, QueryRequest, SearchFailure, TabSnapshot, DEFAULT_USER_ID};
pub use state::AppState;
pub use timestamp::{SeekTimestamp, TimestampError};
pub use transcript::{Role, TranscriptLine, FETCH_FAILED_TEXT, NO_VIDEO_ID_TEXT};
pub use update::update;
pub use video_id::{extract_video_id, watch_url, VideoId, WATCH_URL_BASE};
pub use view_model::AppViewModel;
