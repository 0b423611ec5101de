//! Chapter resolution.
//!
//! Chapters come from structured video metadata when the uploader defined
//! them. Otherwise they are inferred from timestamp lines in the video
//! description, e.g.:
//!
//! ```text
//! 0:00 Intro
//! 1:30 - Setup
//! 1:02:15 Conclusion
//! ```

use crate::video::VideoMetadata;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A timestamp at the start of a line followed by an optional dash and a title.
static TIMESTAMP_LINE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^\s*(?P<ts>(?:[0-9]{1,2}:)?[0-9]{1,2}:[0-9]{2})\s*[-–—]?\s*(?P<title>.+?)\s*$",
    )
    .expect("Invalid regex")
});

/// A resolved chapter with formatted timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start_time: String,
    /// End of the chapter. Absent for the last chapter when the video
    /// duration is unknown.
    #[serde(default)]
    pub end_time: Option<String>,
}

impl ChapterEntry {
    fn new(title: impl Into<String>, start_seconds: u64, end_seconds: Option<u64>) -> Self {
        Self {
            title: title.into(),
            start_time: seconds_to_ts(start_seconds),
            end_time: end_seconds.map(seconds_to_ts),
        }
    }
}

/// A chapter as reported by the video metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthoritativeChapter {
    #[serde(default)]
    pub start_time: Option<f64>,
    #[serde(default)]
    pub end_time: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A timestamp found in a description, before end times are known.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawTimestampMatch {
    title: String,
    start_seconds: u64,
}

/// Convert a `M:SS` or `H:MM:SS` timestamp to seconds.
pub fn ts_to_seconds(ts: &str) -> Option<u64> {
    let parts = ts
        .split(':')
        .map(|p| p.trim().parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;

    match parts.as_slice() {
        [m, s] => m.checked_mul(60)?.checked_add(*s),
        [h, m, s] => h
            .checked_mul(3600)?
            .checked_add(m.checked_mul(60)?)?
            .checked_add(*s),
        _ => None,
    }
}

/// Format seconds as `M:SS`, or `H:MM:SS` once the hour mark is reached.
pub fn seconds_to_ts(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Resolve the chapter list from fetched video metadata.
pub fn for_metadata(metadata: &VideoMetadata) -> Vec<ChapterEntry> {
    resolve_chapters(
        &metadata.chapters,
        &metadata.description,
        metadata.duration_seconds,
    )
}

/// Resolve the chapter list for a video.
///
/// Authoritative chapters win and are returned in the given order. Without
/// them the description is scanned for timestamp lines.
pub fn resolve_chapters(
    authoritative: &[AuthoritativeChapter],
    description: &str,
    duration_seconds: Option<u64>,
) -> Vec<ChapterEntry> {
    if !authoritative.is_empty() {
        return authoritative
            .iter()
            .map(|c| {
                let start = c.start_time.unwrap_or(0.0).max(0.0) as u64;
                let end = c.end_time.map(|e| e.max(0.0) as u64);
                ChapterEntry::new(c.title.as_deref().unwrap_or_default().trim(), start, end)
            })
            .collect();
    }

    chapters_from_description(description, duration_seconds)
}

/// Infer chapters from timestamp lines in a free-text description.
///
/// Entries are sorted by start time (stable, so equal timestamps keep their
/// text order). Each chapter ends where the next one starts; the last one
/// ends at `duration_seconds` if known.
pub fn chapters_from_description(
    description: &str,
    duration_seconds: Option<u64>,
) -> Vec<ChapterEntry> {
    let mut starts = scan_description(description);
    starts.sort_by_key(|m| m.start_seconds);

    starts
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let end = starts
                .get(i + 1)
                .map(|next| next.start_seconds)
                .or(duration_seconds);
            ChapterEntry::new(item.title.clone(), item.start_seconds, end)
        })
        .collect()
}

fn scan_description(description: &str) -> Vec<RawTimestampMatch> {
    description
        .lines()
        .filter_map(|line| {
            let caps = TIMESTAMP_LINE.captures(line)?;
            let start_seconds = ts_to_seconds(&caps["ts"])?;
            Some(RawTimestampMatch {
                title: caps["title"].trim().to_string(),
                start_seconds,
            })
        })
        .collect()
}
