//! Video identifier extraction from YouTube URLs

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Short-link host (`https://youtu.be/<id>`)
pub const SHORT_HOST: &str = "youtu.be";

/// Canonical hosts (`https://www.youtube.com/watch?v=<id>`)
pub const CANONICAL_HOSTS: [&str; 2] = ["www.youtube.com", "youtube.com"];

const WATCH_URL: &str = "https://www.youtube.com/watch";

/// Platform-specific video identifier parsed from a URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch page for this video
    pub fn watch_url(&self) -> String {
        format!("{}?v={}", WATCH_URL, self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the video identifier from a YouTube URL.
///
/// Returns `None` for unparseable input, unknown hosts, an empty short-link
/// path, or a canonical URL without a non-blank `v` parameter.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    let url = Url::parse(input).ok()?;
    let host = url.host_str()?;

    if host == SHORT_HOST {
        // everything after the leading slash, including any further segments
        let id = url.path().strip_prefix('/').unwrap_or(url.path());
        if id.is_empty() {
            return None;
        }
        return Some(VideoId::new(id));
    }

    if CANONICAL_HOSTS.contains(&host) {
        return url
            .query_pairs()
            .find(|(key, value)| key == "v" && !value.is_empty())
            .map(|(_, value)| VideoId::new(value.into_owned()));
    }

    None
}
