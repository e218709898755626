//! Video metadata extraction through yt-dlp

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use super::tracks::VideoInfo;
use crate::config::ExtractorConfig;

#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("yt-dlp exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("yt-dlp timed out after {0}s")]
    Timeout(u64),
    #[error("invalid yt-dlp output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of video metadata, including the available subtitle tracks
#[async_trait]
pub trait VideoExtractor: Send + Sync {
    async fn extract_info(&self, watch_url: &str) -> Result<VideoInfo, ExtractorError>;
}

/// Extractor backed by the `yt-dlp` command line tool
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    binary: PathBuf,
    cookies_path: Option<PathBuf>,
    timeout: Option<Duration>,
    sub_format: String,
}

impl YtDlpExtractor {
    pub fn new(config: &ExtractorConfig, sub_format: impl Into<String>) -> Self {
        Self {
            binary: config.ytdlp_path.clone(),
            cookies_path: config.cookies_path.clone(),
            timeout: config.timeout_seconds.map(Duration::from_secs),
            sub_format: sub_format.into(),
        }
    }

    /// Arguments for a metadata-only run that lists manual and automatic subtitles
    fn build_args(&self, watch_url: &str) -> Vec<String> {
        let mut args = vec![
            "--skip-download".to_string(),
            "--write-subs".to_string(),
            "--write-auto-subs".to_string(),
            "--sub-format".to_string(),
            self.sub_format.clone(),
            "--dump-single-json".to_string(),
            "--quiet".to_string(),
            "--no-warnings".to_string(),
        ];

        if let Some(cookies) = &self.cookies_path {
            args.push("--cookies".to_string());
            args.push(cookies.display().to_string());
        }

        args.push(watch_url.to_string());
        args
    }
}

#[async_trait]
impl VideoExtractor for YtDlpExtractor {
    #[tracing::instrument(skip(self))]
    async fn extract_info(&self, watch_url: &str) -> Result<VideoInfo, ExtractorError> {
        let mut command = Command::new(&self.binary);
        command
            .args(self.build_args(watch_url))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        debug!("Running {} for {}", self.binary.display(), watch_url);

        let run = command.output();
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, run)
                .await
                .map_err(|_| ExtractorError::Timeout(limit.as_secs()))?,
            None => run.await,
        }
        .map_err(|source| ExtractorError::Spawn {
            binary: self.binary.display().to_string(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("yt-dlp failed for {}: {}", watch_url, stderr);
            return Err(ExtractorError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }

        let info: VideoInfo = serde_json::from_slice(&output.stdout)?;
        debug!(
            manual = info.subtitles.len(),
            automatic = info.automatic_captions.len(),
            "Extracted subtitle listing"
        );
        Ok(info)
    }
}
