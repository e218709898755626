use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use yt_summarizer::{extract_video_id, logging, CaptionRetriever, Config, YtDlpExtractor};

/// Print the transcript the summarizer would see for a video
#[derive(Parser)]
#[command(name = "fetch-transcript", version)]
struct Cli {
    /// YouTube video URL
    url: String,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also report chunk count for the configured chunk size
    #[arg(long)]
    chunks: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(logging::env_filter("yt_summarizer=info,fetch_transcript=info"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_default(),
    };

    let video_id = extract_video_id(&cli.url)
        .ok_or_else(|| anyhow!("Invalid YouTube URL: {}", cli.url))?;
    info!("🔍 Fetching transcript for {}", video_id);

    let extractor = YtDlpExtractor::new(&config.extractor, config.subtitles.format.clone());
    let retriever = CaptionRetriever::new(Arc::new(extractor), &config.subtitles)?;

    match retriever.fetch_transcript(&video_id).await {
        Ok(transcript) => {
            if cli.chunks {
                let chunks = yt_summarizer::chunk_text(&transcript, config.summarizer.chunk_size);
                info!(
                    "📦 {} chunk(s) of up to {} chars",
                    chunks.len(),
                    config.summarizer.chunk_size
                );
            }
            println!("{}", transcript);
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e.into())
        }
    }
}
