//! API request handlers

use anyhow::Result;
use serde_json::Value;
use tracing::{info, warn};

use super::models::SummarizeResponse;
use super::server::AppState;
use crate::summarizer::{summarize_text, SummarizerError};
use crate::video_id::extract_video_id;

pub const INVALID_URL_MESSAGE: &str = "Invalid YouTube URL.";

/// Handle health check requests
pub async fn health_check(state: &AppState) -> Result<Value> {
    Ok(serde_json::json!({
        "status": "healthy",
        "service": "yt-summarizer",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.summarizer.model_name(),
        "provider": format!("{:?}", state.summarizer.provider_type()),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Run the URL -> transcript -> summary pipeline for one request.
///
/// Invalid URLs and transcript failures are ordinary responses; only a
/// summarization failure is returned as an error.
#[tracing::instrument(skip(state))]
pub async fn summarize_video(state: &AppState, url: &str) -> Result<SummarizeResponse, SummarizerError> {
    let Some(video_id) = extract_video_id(url) else {
        info!("Rejected URL without a recognizable video id");
        return Ok(SummarizeResponse::error(INVALID_URL_MESSAGE));
    };

    let transcript = match state.retriever.fetch_transcript(&video_id).await {
        Ok(transcript) => transcript,
        Err(e) => {
            warn!("Transcript unavailable for {}: {}", video_id, e);
            return Ok(SummarizeResponse::error(e.to_string()));
        }
    };

    let settings = &state.config.summarizer;
    let summary = summarize_text(
        state.summarizer.as_ref(),
        &transcript,
        settings.chunk_size,
        &settings.generation_params(),
    )
    .await?;

    info!("✅ Summarized {} ({} chars)", video_id, summary.chars().count());
    Ok(SummarizeResponse::summary(summary))
}
