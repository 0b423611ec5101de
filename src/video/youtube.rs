//! YouTube source implementation backed by yt-dlp.

use super::{SearchResult, VideoId, VideoMetadata, VideoSource};
use crate::chapters::{seconds_to_ts, AuthoritativeChapter};
use crate::config::YoutubeSettings;
use crate::error::{Result, YtquizError};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// YouTube video source.
pub struct YoutubeSource {
    ytdlp_path: String,
    subtitle_languages: Vec<String>,
}

impl YoutubeSource {
    pub fn new(settings: &YoutubeSettings) -> Self {
        Self {
            ytdlp_path: settings.ytdlp_path.clone(),
            subtitle_languages: settings.subtitle_languages.clone(),
        }
    }

    /// Run yt-dlp with the given arguments and return its output.
    async fn run_ytdlp(&self, args: &[&str]) -> Result<Output> {
        debug!("Running {} {}", self.ytdlp_path, args.join(" "));

        Command::new(&self.ytdlp_path)
            .args(args)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    YtquizError::ToolNotFound(self.ytdlp_path.clone())
                } else {
                    YtquizError::ToolFailed(format!("Failed to run yt-dlp: {}", e))
                }
            })
    }

    /// Pick the caption file for the most preferred language.
    fn find_caption_file(&self, dir: &Path, id: &VideoId) -> Option<PathBuf> {
        for lang in &self.subtitle_languages {
            let candidate = dir.join(format!("{}.{}.json3", id, lang));
            if candidate.exists() {
                return Some(candidate);
            }
        }

        std::fs::read_dir(dir)
            .ok()?
            .flatten()
            .map(|entry| entry.path())
            .find(|path| path.extension().is_some_and(|ext| ext == "json3"))
    }
}

#[async_trait]
impl VideoSource for YoutubeSource {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let search_term = format!("ytsearch{}:{}", limit, query);
        let output = self
            .run_ytdlp(&["--dump-json", "--flat-playlist", "--no-warnings", &search_term])
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(YtquizError::VideoSource(format!("Search failed: {}", stderr)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let results: Vec<SearchResult> = stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
            .filter_map(|json| parse_search_entry(&json))
            .collect();

        info!("Search returned {} results", results.len());
        Ok(results)
    }

    #[instrument(skip(self), fields(video_id = %id))]
    async fn fetch_metadata(&self, id: &VideoId) -> Result<VideoMetadata> {
        let url = id.watch_url();
        let output = self
            .run_ytdlp(&["--dump-json", "--skip-download", "--no-warnings", "--no-playlist", &url])
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(YtquizError::VideoNotFound(format!(
                "Video {} not found or unavailable: {}",
                id, stderr
            )));
        }

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).map_err(|e| {
            YtquizError::VideoSource(format!("Failed to parse yt-dlp output: {}", e))
        })?;

        Ok(parse_metadata(id, &json))
    }

    #[instrument(skip(self), fields(video_id = %id))]
    async fn fetch_transcript(&self, id: &VideoId) -> Result<String> {
        let dir = tempfile::tempdir()?;
        let template = dir.path().join("%(id)s.%(ext)s");
        let template = template.to_string_lossy();
        let languages = self.subtitle_languages.join(",");
        let url = id.watch_url();

        let output = self
            .run_ytdlp(&[
                "--skip-download",
                "--write-subs",
                "--write-auto-subs",
                "--sub-langs",
                &languages,
                "--sub-format",
                "json3",
                "--no-warnings",
                "--quiet",
                "--no-playlist",
                "--output",
                &template,
                &url,
            ])
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(YtquizError::TranscriptUnavailable(format!("{}: {}", id, stderr.trim())));
        }

        let caption_path = self.find_caption_file(dir.path(), id).ok_or_else(|| {
            YtquizError::TranscriptUnavailable(format!(
                "No captions in [{}] for video {}",
                languages, id
            ))
        })?;

        debug!("Reading captions from {:?}", caption_path);
        let content = std::fs::read_to_string(&caption_path)?;
        let snippets = parse_json3(&content)?;

        if snippets.is_empty() {
            return Err(YtquizError::TranscriptUnavailable(format!(
                "Captions for video {} are empty",
                id
            )));
        }

        info!("Fetched transcript with {} snippets", snippets.len());
        Ok(snippets.join(" "))
    }
}

#[derive(Debug, Deserialize)]
struct Json3Captions {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(default)]
    segs: Vec<Json3Segment>,
}

#[derive(Debug, Deserialize)]
struct Json3Segment {
    #[serde(default)]
    utf8: String,
}

/// Extract caption snippets from a YouTube `json3` caption document.
///
/// One snippet per event; line breaks inside an event become spaces and
/// events without visible text are dropped.
fn parse_json3(content: &str) -> Result<Vec<String>> {
    let captions: Json3Captions = serde_json::from_str(content)?;

    Ok(captions
        .events
        .iter()
        .map(|event| {
            event
                .segs
                .iter()
                .map(|seg| seg.utf8.as_str())
                .collect::<String>()
                .replace('\n', " ")
                .trim()
                .to_string()
        })
        .filter(|text| !text.is_empty())
        .collect())
}

fn parse_metadata(id: &VideoId, json: &serde_json::Value) -> VideoMetadata {
    let chapters = json
        .get("chapters")
        .filter(|c| c.is_array())
        .and_then(|c| serde_json::from_value::<Vec<AuthoritativeChapter>>(c.clone()).ok())
        .unwrap_or_default();

    VideoMetadata {
        id: id.clone(),
        title: json["title"].as_str().unwrap_or("Unknown Title").to_string(),
        channel: json["channel"]
            .as_str()
            .or_else(|| json["uploader"].as_str())
            .map(|s| s.to_string()),
        duration_seconds: json["duration"].as_f64().map(|d| d as u64),
        description: json["description"].as_str().unwrap_or_default().to_string(),
        chapters,
    }
}

fn parse_search_entry(json: &serde_json::Value) -> Option<SearchResult> {
    let video_id = json["id"].as_str()?.to_string();

    let duration_display = match json["duration"].as_f64() {
        Some(d) => seconds_to_ts(d as u64),
        None if json["live_status"].as_str() == Some("is_live") => "live".to_string(),
        None => "?".to_string(),
    };

    Some(SearchResult {
        video_id,
        title: json["title"].as_str().unwrap_or("Unknown Title").to_string(),
        channel: json["channel"]
            .as_str()
            .or_else(|| json["uploader"].as_str())
            .unwrap_or("Unknown channel")
            .to_string(),
        duration_display,
    })
}
