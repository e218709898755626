use super::{GenerationParams, Summarizer, SummarizerError, SummarizerProvider};
use crate::config::SummarizerConfig;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParams,
}

#[derive(Debug, Deserialize)]
struct SummaryText {
    summary_text: String,
}

/// Pipelines answer with a one-element list; some local servers drop the list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SummarizationResponse {
    List(Vec<SummaryText>),
    Single(SummaryText),
}

impl SummarizationResponse {
    fn into_text(self) -> Option<String> {
        match self {
            Self::List(items) => items.into_iter().next().map(|s| s.summary_text),
            Self::Single(item) => Some(item.summary_text),
        }
    }
}

fn build_client(config: &SummarizerConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

async fn send_summarization_request(
    request: reqwest::RequestBuilder,
    chunk: &str,
    params: &GenerationParams,
) -> Result<String, SummarizerError> {
    let response = request
        .json(&SummarizationRequest {
            inputs: chunk,
            parameters: params,
        })
        .send()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Failed to reach summarization endpoint"))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        return Err(SummarizerError::Api { status, message });
    }

    response
        .json::<SummarizationResponse>()
        .await?
        .into_text()
        .ok_or(SummarizerError::EmptyResponse)
}

/// Hosted inference base URL; the model id is appended per request
pub const HUGGINGFACE_ENDPOINT: &str = "https://router.huggingface.co/hf-inference/models";

/// Hugging Face inference API provider
pub struct HuggingFaceProvider {
    config: SummarizerConfig,
    client: reqwest::Client,
    url: String,
}

impl HuggingFaceProvider {
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        if config.model.trim().is_empty() {
            return Err(anyhow!("Hugging Face model name required"));
        }

        let base = config
            .endpoint
            .as_deref()
            .unwrap_or(HUGGINGFACE_ENDPOINT)
            .trim_end_matches('/');
        let url = format!("{}/{}", base, config.model);
        let client = build_client(&config)?;

        Ok(Self { config, client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Summarizer for HuggingFaceProvider {
    async fn summarize_chunk(
        &self,
        chunk: &str,
        params: &GenerationParams,
    ) -> Result<String, SummarizerError> {
        debug!("Sending {} chars to Hugging Face model {}", chunk.len(), self.config.model);

        let mut request = self.client.post(&self.url);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        send_summarization_request(request, chunk, params).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn provider_type(&self) -> SummarizerProvider {
        SummarizerProvider::HuggingFace
    }
}

/// Self-hosted summarization pipeline provider
pub struct LocalPipelineProvider {
    config: SummarizerConfig,
    client: reqwest::Client,
    endpoint: String,
}

impl LocalPipelineProvider {
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| anyhow!("Local pipeline endpoint not configured"))?;
        let client = build_client(&config)?;

        Ok(Self {
            config,
            client,
            endpoint,
        })
    }
}

#[async_trait]
impl Summarizer for LocalPipelineProvider {
    async fn summarize_chunk(
        &self,
        chunk: &str,
        params: &GenerationParams,
    ) -> Result<String, SummarizerError> {
        debug!("Sending {} chars to local pipeline at {}", chunk.len(), self.endpoint);
        send_summarization_request(self.client.post(&self.endpoint), chunk, params).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn provider_type(&self) -> SummarizerProvider {
        SummarizerProvider::Local
    }
}
