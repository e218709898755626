use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use yt_summarizer::{GenerationParams, Summarizer, SummarizerError, SummarizerProvider};

#[derive(Clone)]
pub struct MockSummarizer {
    pub summary: String,
    pub calls: Arc<Mutex<Vec<(String, GenerationParams)>>>,
    pub fail_with: Option<u16>,
}

impl MockSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            summary: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(status),
        }
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize_chunk(
        &self,
        chunk: &str,
        params: &GenerationParams,
    ) -> Result<String, SummarizerError> {
        self.calls.lock().unwrap().push((chunk.to_string(), *params));
        if let Some(status) = self.fail_with {
            return Err(SummarizerError::Api {
                status,
                message: "Model facebook/bart-large-cnn is currently loading".to_string(),
            });
        }
        Ok(self.summary.clone())
    }

    fn model_name(&self) -> &str {
        "mock-bart"
    }

    fn provider_type(&self) -> SummarizerProvider {
        SummarizerProvider::Local
    }
}
