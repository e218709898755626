//! YouTube json3 timed-text documents

use serde::{Deserialize, Serialize};

/// Top-level json3 document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Json3Document {
    pub events: Vec<CaptionEvent>,
}

/// Timed caption event; window/style events carry no `segs`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptionEvent {
    #[serde(rename = "tStartMs", default)]
    pub start_ms: Option<u64>,
    #[serde(rename = "dDurationMs", default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub segs: Option<Vec<CaptionSegment>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptionSegment {
    #[serde(default)]
    pub utf8: String,
}

impl CaptionEvent {
    /// Text of the first segment, if the event has any
    pub fn first_text(&self) -> Option<&str> {
        self.segs
            .as_ref()
            .and_then(|segs| segs.first())
            .map(|seg| seg.utf8.as_str())
    }
}

impl Json3Document {
    /// Space-joined first-segment text of every event that has segments
    pub fn to_transcript(&self) -> String {
        self.events
            .iter()
            .filter_map(CaptionEvent::first_text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
