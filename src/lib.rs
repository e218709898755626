/// YouTube Summarizer - Rust Implementation
///
/// Fetches a video's caption track and condenses it with a pretrained
/// summarization model, served over a small HTTP API.

pub mod api;
pub mod captions;
pub mod config;
pub mod logging;
pub mod summarizer;
pub mod video_id;

// Re-export main types for easy access
pub use crate::api::{build_router, ApiServer, AppState};
pub use crate::captions::{CaptionRetriever, TranscriptError, VideoInfo, YtDlpExtractor};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::summarizer::{
    chunk_text, create_summarizer, summarize_text, GenerationParams, Summarizer,
    SummarizerError, SummarizerProvider, CHUNK_SIZE,
};
pub use crate::video_id::{extract_video_id, VideoId};
