//! Video source abstraction for ytquiz.
//!
//! Provides a trait-based interface over the platform that hosts the videos:
//! search, metadata (duration, description, chapters) and captions.

mod id;
mod youtube;

pub use id::VideoId;
pub use youtube::YoutubeSource;

use crate::chapters::AuthoritativeChapter;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Metadata about a single video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub id: VideoId,
    pub title: String,
    /// Channel or uploader name (if available).
    pub channel: Option<String>,
    /// Duration in seconds (if known).
    pub duration_seconds: Option<u64>,
    /// Free-text description, empty when the video has none.
    pub description: String,
    /// Chapters defined by the uploader. Empty when there are none.
    pub chapters: Vec<AuthoritativeChapter>,
}

/// A single hit from a video search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    /// Human-readable duration such as `12:34`, or `live`/`?`.
    pub duration_display: String,
}

/// Trait for video platform providers.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Search for videos matching a free-text query.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>>;

    /// Fetch metadata for a video.
    async fn fetch_metadata(&self, id: &VideoId) -> Result<VideoMetadata>;

    /// Fetch the caption text of a video, snippets joined by single spaces.
    async fn fetch_transcript(&self, id: &VideoId) -> Result<String>;
}
