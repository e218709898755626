use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use yt_summarizer::captions::extractor::{ExtractorError, VideoExtractor};
use yt_summarizer::captions::{SubtitleTracks, TrackDescriptor, VideoInfo};

#[derive(Clone)]
pub struct MockExtractor {
    pub info: VideoInfo,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockExtractor {
    /// Manual subtitles listing the given language -> url pairs
    pub fn with_subtitles(tracks: &[(&str, &str)]) -> Self {
        Self::from_info(VideoInfo {
            subtitles: listing(tracks),
            ..Default::default()
        })
    }

    /// Automatic captions only
    pub fn with_automatic_captions(tracks: &[(&str, &str)]) -> Self {
        Self::from_info(VideoInfo {
            automatic_captions: listing(tracks),
            ..Default::default()
        })
    }

    pub fn without_subtitles() -> Self {
        Self::from_info(VideoInfo::default())
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            info: VideoInfo::default(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }

    fn from_info(info: VideoInfo) -> Self {
        Self {
            info,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }
}

fn listing(tracks: &[(&str, &str)]) -> SubtitleTracks {
    tracks
        .iter()
        .map(|(lang, url)| {
            (
                lang.to_string(),
                vec![TrackDescriptor::new(*url, Some("json3"))],
            )
        })
        .collect()
}

#[async_trait]
impl VideoExtractor for MockExtractor {
    async fn extract_info(&self, watch_url: &str) -> Result<VideoInfo, ExtractorError> {
        self.calls.lock().unwrap().push(watch_url.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(ExtractorError::Failed {
                status: "exit status: 1".to_string(),
                stderr: msg.clone(),
            });
        }
        Ok(self.info.clone())
    }
}
