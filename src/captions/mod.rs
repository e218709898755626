//! Caption retrieval: subtitle listing, track download and transcript flattening

pub mod extractor;
pub mod json3;
pub mod tracks;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::SubtitleConfig;
use crate::video_id::VideoId;
use extractor::VideoExtractor;
use json3::Json3Document;

pub use extractor::{ExtractorError, YtDlpExtractor};
pub use tracks::{SelectedTrack, SubtitleTracks, TrackDescriptor, VideoInfo};

/// Why a transcript could not be produced.
///
/// The display strings are returned verbatim to API clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptError {
    #[error("Error: No subtitles found.")]
    NoSubtitles,
    #[error("Error fetching transcript: {0}")]
    Fetch(String),
}

impl TranscriptError {
    fn fetch(err: impl std::fmt::Display) -> Self {
        Self::Fetch(err.to_string())
    }
}

/// Resolves a video to its caption track and flattens it into plain text
pub struct CaptionRetriever {
    extractor: Arc<dyn VideoExtractor>,
    client: reqwest::Client,
    preferred_language: String,
    format: String,
}

impl CaptionRetriever {
    pub fn new(extractor: Arc<dyn VideoExtractor>, config: &SubtitleConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            extractor,
            client: builder.build()?,
            preferred_language: config.preferred_language.clone(),
            format: config.format.clone(),
        })
    }

    /// Fetch the transcript for `video_id`
    #[tracing::instrument(skip(self), fields(video_id = %video_id))]
    pub async fn fetch_transcript(&self, video_id: &VideoId) -> Result<String, TranscriptError> {
        let watch_url = video_id.watch_url();

        let info = self
            .extractor
            .extract_info(&watch_url)
            .await
            .map_err(TranscriptError::fetch)?;

        if info.has_no_subtitles() {
            info!("No subtitles listed for {}", video_id);
            return Err(TranscriptError::NoSubtitles);
        }

        let track = info
            .select_track(&self.preferred_language, &self.format)
            .ok_or_else(|| TranscriptError::fetch("subtitle listing has no downloadable track"))?;

        debug!(
            language = track.language,
            automatic = track.automatic,
            "Downloading subtitle track"
        );

        let document = self.download_track(&track.descriptor.url).await?;
        let transcript = document.to_transcript();

        info!(
            "📝 Transcript for {}: {} events, {} chars",
            video_id,
            document.events.len(),
            transcript.chars().count()
        );
        Ok(transcript)
    }

    async fn download_track(&self, url: &str) -> Result<Json3Document, TranscriptError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .inspect_err(|e| warn!("Subtitle download failed: {}", e))
            .map_err(TranscriptError::fetch)?;

        response
            .json::<Json3Document>()
            .await
            .map_err(TranscriptError::fetch)
    }
}
