//! YouTube video identifiers.

use crate::error::{Result, YtquizError};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

static VIDEO_ID_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Invalid regex"));

/// An 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Parse a bare video ID or a YouTube URL.
    ///
    /// Fails without touching the network if the result is not a valid ID.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let candidate = extract_from_url(input).unwrap_or_else(|| input.to_string());

        if VIDEO_ID_PATTERN.is_match(&candidate) {
            Ok(Self(candidate))
        } else {
            Err(YtquizError::InvalidVideoId(input.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for VideoId {
    type Err = YtquizError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VideoId {
    type Error = YtquizError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

/// Pull the video ID out of the URL forms YouTube hands out.
fn extract_from_url(input: &str) -> Option<String> {
    let url = Url::parse(input).ok()?;
    let host = url.host_str()?;

    match host {
        "www.youtube.com" | "youtube.com" | "m.youtube.com" | "music.youtube.com" => {
            if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
                return Some(v.into_owned());
            }
            let mut segments = url.path_segments()?;
            match segments.next()? {
                "embed" | "shorts" | "live" | "v" => segments.next().map(str::to_string),
                _ => None,
            }
        }
        "youtu.be" => url.path_segments()?.next().map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_id() {
        let id = VideoId::parse("  dQw4w9WgXcQ ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
        assert_eq!(id.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn test_parse_urls() {
        for input in [
            "https://www.youtube.com/watch?v=b1Fo_M_tj6w",
            "https://youtube.com/watch?feature=share&v=b1Fo_M_tj6w&t=42s",
            "https://m.youtube.com/watch?v=b1Fo_M_tj6w",
            "https://youtu.be/b1Fo_M_tj6w",
            "https://youtu.be/b1Fo_M_tj6w?t=10",
            "https://www.youtube.com/embed/b1Fo_M_tj6w",
            "https://www.youtube.com/shorts/b1Fo_M_tj6w",
        ] {
            assert_eq!(VideoId::parse(input).unwrap().as_str(), "b1Fo_M_tj6w", "{}", input);
        }
    }

    #[test]
    fn test_rejects_invalid_ids() {
        assert!(matches!(VideoId::parse("abc"), Err(YtquizError::InvalidVideoId(_))));
        assert!(VideoId::parse("").is_err());
        assert!(VideoId::parse("dQw4w9WgXcQx").is_err());
        assert!(VideoId::parse("dQw4w9WgX!Q").is_err());
        assert!(VideoId::parse("https://example.com/watch?v=dQw4w9WgXcQ").is_err());
        assert!(VideoId::parse("https://www.youtube.com/watch?v=short").is_err());
    }

    #[test]
    fn test_serde_validates() {
        let id: VideoId = serde_json::from_str("\"dQw4w9WgXcQ\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"dQw4w9WgXcQ\"");
        assert!(serde_json::from_str::<VideoId>("\"abc\"").is_err());
    }
}
