//! Video identifier extraction and canonical watch URLs.

use std::fmt;

use crate::SeekTimestamp;

/// Base of the canonical watch URL the navigator builds.
pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch";

const QUERY_MARKERS: [&str; 2] = ["?v=", "&v="];
const QUERY_STOPS: [char; 1] = ['&'];
const SHORT_LINK_MARKERS: [&str; 1] = ["youtu.be/"];
const SHORT_LINK_STOPS: [char; 2] = ['?', '&'];

/// Platform token naming a video, as captured from its URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the video identifier from a page URL.
///
/// The `v` query parameter (`?v=` or `&v=`) is tried first, then the
/// `youtu.be/` short link. The capture is taken as-is; only emptiness
/// disqualifies a match.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    capture_after(url, &QUERY_MARKERS, &QUERY_STOPS)
        .or_else(|| capture_after(url, &SHORT_LINK_MARKERS, &SHORT_LINK_STOPS))
        .map(|id| VideoId(id.to_string()))
}

/// Builds `https://www.youtube.com/watch?v=<id>&t=<seconds>s`.
///
/// The id goes in exactly as it was captured, escapes included.
pub fn watch_url(video_id: &VideoId, timestamp: SeekTimestamp) -> String {
    format!("{WATCH_URL_BASE}?v={video_id}&t={}s", timestamp.seconds())
}

// Leftmost marker occurrence with a non-empty capture wins, so `?v=&v=abc`
// still yields `abc`.
fn capture_after<'a>(url: &'a str, markers: &[&str], stops: &[char]) -> Option<&'a str> {
    url.char_indices().find_map(|(start, _)| {
        let rest = &url[start..];
        markers.iter().find_map(|marker| {
            let tail = rest.strip_prefix(marker)?;
            let end = tail.find(stops).unwrap_or(tail.len());
            (end > 0).then(|| &tail[..end])
        })
    })
}
