pub mod providers;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::config::SummarizerConfig;

/// Characters of transcript fed to the model per call
pub const CHUNK_SIZE: usize = 1024;

/// Summarization backend types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SummarizerProvider {
    /// Hosted Hugging Face inference API
    HuggingFace,
    /// Self-hosted pipeline speaking the same wire format
    Local,
}

/// Decoding constraints passed with every chunk
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationParams {
    pub max_length: u32,
    pub min_length: u32,
    pub do_sample: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length: 150,
            min_length: 40,
            do_sample: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizerError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Empty response from summarization model")]
    EmptyResponse,
}

/// Trait for summarization models
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize_chunk(
        &self,
        chunk: &str,
        params: &GenerationParams,
    ) -> Result<String, SummarizerError>;

    fn model_name(&self) -> &str;

    fn provider_type(&self) -> SummarizerProvider;
}

/// Split `text` into slices of `chunk_size` characters.
///
/// Slicing is by character offset and ignores word boundaries; the last chunk
/// may be shorter. Empty input yields a single empty chunk.
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(chunk_size.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Summarize a transcript chunk by chunk and join the partial summaries.
///
/// The first failing chunk aborts the whole summary.
#[tracing::instrument(skip_all, fields(model = summarizer.model_name(), chars = text.chars().count()))]
pub async fn summarize_text(
    summarizer: &dyn Summarizer,
    text: &str,
    chunk_size: usize,
    params: &GenerationParams,
) -> Result<String, SummarizerError> {
    let chunks = chunk_text(text, chunk_size);
    let total = chunks.len();
    let mut summary = String::new();

    for (index, chunk) in chunks.iter().enumerate() {
        debug!("Summarizing chunk {}/{}", index + 1, total);
        let partial = summarizer.summarize_chunk(chunk, params).await?;
        summary.push_str(&partial);
        summary.push(' ');
    }

    Ok(summary.trim().to_string())
}

/// Create a summarizer based on configuration
pub fn create_summarizer(config: &SummarizerConfig) -> Result<Arc<dyn Summarizer>> {
    match config.provider {
        SummarizerProvider::HuggingFace => {
            Ok(Arc::new(providers::HuggingFaceProvider::new(config.clone())?))
        }
        SummarizerProvider::Local => {
            Ok(Arc::new(providers::LocalPipelineProvider::new(config.clone())?))
        }
    }
}
