//! Interpretation of the generator's raw reply.
//!
//! The reply should be JSON, but models often wrap it in a markdown code
//! fence or answer in prose. Attempts run in order: the whole reply as JSON,
//! then the first fenced block, then the reply kept verbatim.

use super::models::{AnalysisResult, GeneratedContent};
use crate::chapters::ChapterEntry;
use std::sync::LazyLock;

static FENCED_BLOCK: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("Invalid regex"));

/// The generator's reply after parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorOutput {
    /// The reply was a JSON document.
    Structured(GeneratedContent),
    /// The JSON document was found inside a fenced code block.
    Fenced(GeneratedContent),
    /// Neither attempt worked; the reply is kept as text.
    Raw(String),
}

impl GeneratorOutput {
    /// Parse a raw reply.
    pub fn parse(reply: &str) -> Self {
        if let Some(content) = parse_direct(reply) {
            return Self::Structured(content);
        }
        if let Some(content) = parse_fenced(reply) {
            return Self::Fenced(content);
        }
        Self::Raw(reply.to_string())
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Structured(_) => "structured",
            Self::Fenced(_) => "fenced",
            Self::Raw(_) => "raw",
        }
    }

    /// Combine with resolved chapters into the stored result.
    pub fn into_analysis(self, chapters: Vec<ChapterEntry>) -> AnalysisResult {
        match self {
            Self::Structured(content) | Self::Fenced(content) => AnalysisResult {
                summary: content.summary,
                quiz: content.quiz,
                chapters,
                raw_response: None,
            },
            Self::Raw(text) => AnalysisResult {
                summary: None,
                quiz: Vec::new(),
                chapters,
                raw_response: Some(text),
            },
        }
    }
}

fn parse_direct(reply: &str) -> Option<GeneratedContent> {
    parse_content(reply)
}

fn parse_fenced(reply: &str) -> Option<GeneratedContent> {
    let caps = FENCED_BLOCK.captures(reply)?;
    parse_content(caps.get(1)?.as_str())
}

/// A JSON object only counts when it carries a summary or a quiz.
fn parse_content(text: &str) -> Option<GeneratedContent> {
    serde_json::from_str::<GeneratedContent>(text.trim())
        .ok()
        .filter(|content| !content.is_empty())
}
