//! Error types for ytquiz.

use thiserror::Error;

/// Library-level error type for ytquiz operations.
#[derive(Error, Debug)]
pub enum YtquizError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Video source error: {0}")]
    VideoSource(String),

    #[error("Invalid video ID '{0}': expected 11 characters like 'b1Fo_M_tj6w'")]
    InvalidVideoId(String),

    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("Quiz generation failed: {0}")]
    Generator(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for ytquiz operations.
pub type Result<T> = std::result::Result<T, YtquizError>;
