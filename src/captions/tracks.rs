//! Subtitle listings as reported by the extractor and track selection

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language code -> available renditions of that language's track
pub type SubtitleTracks = BTreeMap<String, Vec<TrackDescriptor>>;

/// Subset of the extractor's metadata this service needs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subtitles: SubtitleTracks,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub automatic_captions: SubtitleTracks,
}

/// One fetchable rendition of a subtitle track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    pub url: String,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl TrackDescriptor {
    pub fn new(url: impl Into<String>, ext: Option<&str>) -> Self {
        Self {
            url: url.into(),
            ext: ext.map(str::to_string),
            name: None,
        }
    }
}

/// A track picked for download
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedTrack<'a> {
    pub language: &'a str,
    pub automatic: bool,
    pub descriptor: &'a TrackDescriptor,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<SubtitleTracks, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<SubtitleTracks>::deserialize(deserializer)?.unwrap_or_default())
}

impl VideoInfo {
    /// True when neither manual nor automatic subtitles are listed
    pub fn has_no_subtitles(&self) -> bool {
        self.subtitles.is_empty() && self.automatic_captions.is_empty()
    }

    /// Pick the track to download.
    ///
    /// Manual subtitles win over automatic captions when any are listed. Within
    /// the chosen listing the preferred language is taken if present, otherwise
    /// the first language in code order. Within a language the rendition in
    /// `format` is preferred, otherwise the first one listed.
    pub fn select_track(&self, preferred_language: &str, format: &str) -> Option<SelectedTrack<'_>> {
        let (tracks, automatic) = if !self.subtitles.is_empty() {
            (&self.subtitles, false)
        } else {
            (&self.automatic_captions, true)
        };

        let (language, renditions) = tracks
            .get_key_value(preferred_language)
            .or_else(|| tracks.iter().next())?;

        let descriptor = renditions
            .iter()
            .find(|d| d.ext.as_deref() == Some(format))
            .or_else(|| renditions.first())?;

        Some(SelectedTrack {
            language: language.as_str(),
            automatic,
            descriptor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks(entries: Vec<(&str, Vec<(&str, &str)>)>) -> SubtitleTracks {
        entries
            .into_iter()
            .map(|(lang, renditions)| {
                (
                    lang.to_string(),
                    renditions
                        .into_iter()
                        .map(|(url, ext)| TrackDescriptor::new(url, Some(ext)))
                        .collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_prefers_english() {
        let info = VideoInfo {
            subtitles: tracks(vec![
                ("de", vec![("https://subs/de", "json3")]),
                ("en", vec![("https://subs/en", "json3")]),
            ]),
            ..Default::default()
        };

        let selected = info.select_track("en", "json3").unwrap();
        assert_eq!(selected.language, "en");
        assert_eq!(selected.descriptor.url, "https://subs/en");
        assert!(!selected.automatic);
    }

    #[test]
    fn test_falls_back_to_first_language() {
        let info = VideoInfo {
            subtitles: tracks(vec![
                ("fr", vec![("https://subs/fr", "json3")]),
                ("de", vec![("https://subs/de", "json3")]),
            ]),
            ..Default::default()
        };

        let selected = info.select_track("en", "json3").unwrap();
        assert_eq!(selected.language, "de");
    }

    #[test]
    fn test_manual_subtitles_win_over_automatic() {
        let info = VideoInfo {
            subtitles: tracks(vec![("es", vec![("https://subs/es", "json3")])]),
            automatic_captions: tracks(vec![("en", vec![("https://auto/en", "json3")])]),
            ..Default::default()
        };

        let selected = info.select_track("en", "json3").unwrap();
        assert_eq!(selected.descriptor.url, "https://subs/es");
        assert!(!selected.automatic);
    }

    #[test]
    fn test_automatic_captions_used_when_no_manual() {
        let info = VideoInfo {
            automatic_captions: tracks(vec![("en", vec![("https://auto/en", "json3")])]),
            ..Default::default()
        };

        let selected = info.select_track("en", "json3").unwrap();
        assert_eq!(selected.descriptor.url, "https://auto/en");
        assert!(selected.automatic);
    }

    #[test]
    fn test_prefers_requested_format() {
        let info = VideoInfo {
            subtitles: tracks(vec![(
                "en",
                vec![("https://subs/en.vtt", "vtt"), ("https://subs/en.json3", "json3")],
            )]),
            ..Default::default()
        };

        let selected = info.select_track("en", "json3").unwrap();
        assert_eq!(selected.descriptor.url, "https://subs/en.json3");

        let selected = info.select_track("en", "srv1").unwrap();
        assert_eq!(selected.descriptor.url, "https://subs/en.vtt");
    }

    #[test]
    fn test_empty_listing() {
        let info = VideoInfo::default();
        assert!(info.has_no_subtitles());
        assert!(info.select_track("en", "json3").is_none());
    }

    #[test]
    fn test_deserializes_null_listings() {
        let json = r#"{"id": "abc", "title": "t", "subtitles": null, "automatic_captions": {}}"#;
        let info: VideoInfo = serde_json::from_str(json).unwrap();
        assert!(info.has_no_subtitles());
        assert_eq!(info.id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_deserializes_ytdlp_listing() {
        let json = r#"{
            "id": "abc123",
            "subtitles": {},
            "automatic_captions": {
                "en": [
                    {"ext": "json3", "url": "https://www.youtube.com/api/timedtext?lang=en&fmt=json3", "name": "English"},
                    {"ext": "vtt", "url": "https://www.youtube.com/api/timedtext?lang=en&fmt=vtt", "name": "English"}
                ]
            },
            "duration": 212
        }"#;
        let info: VideoInfo = serde_json::from_str(json).unwrap();
        let selected = info.select_track("en", "json3").unwrap();
        assert!(selected.automatic);
        assert!(selected.descriptor.url.ends_with("fmt=json3"));
        assert_eq!(selected.descriptor.name.as_deref(), Some("English"));
    }
}
