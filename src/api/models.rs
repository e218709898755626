//! API data models

use serde::{Deserialize, Serialize};

/// Query string of `GET /summarize`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeQuery {
    /// YouTube video URL
    pub url: String,
}

/// Body of every handled `GET /summarize` outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummarizeResponse {
    Summary { summary: String },
    Error { error: String },
}

impl SummarizeResponse {
    pub fn summary(summary: String) -> Self {
        Self::Summary { summary }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }
}
