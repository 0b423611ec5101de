//! Data models for summaries and quizzes.

use crate::chapters::ChapterEntry;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A multiple-choice question.
///
/// Every field defaults when missing so that loosely shaped generator output
/// and older cache files still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(default)]
    pub question: String,
    /// Option letter ("A".."D") to option text, ordered by letter.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    /// Letter of the correct option.
    #[serde(default)]
    pub answer: String,
}

impl QuizQuestion {
    /// Check a user's answer, ignoring case and surrounding whitespace.
    pub fn is_correct(&self, answer: &str) -> bool {
        let expected = self.answer.trim();
        !expected.is_empty() && answer.trim().eq_ignore_ascii_case(expected)
    }

    /// Whether `letter` names one of this question's options.
    pub fn has_option(&self, letter: &str) -> bool {
        self.options
            .keys()
            .any(|key| key.trim().eq_ignore_ascii_case(letter.trim()))
    }
}

/// Summary and quiz as produced by the generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    /// Models sometimes answer with a list of bullets instead of a string.
    #[serde(default, deserialize_with = "text_or_bullets")]
    pub summary: Option<String>,
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
}

impl GeneratedContent {
    /// True when neither a summary nor a quiz was found.
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.quiz.is_empty()
    }
}

fn text_or_bullets<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Summary {
        Text(String),
        Bullets(Vec<String>),
    }

    Ok(Option::<Summary>::deserialize(deserializer)?.map(|summary| match summary {
        Summary::Text(text) => text,
        Summary::Bullets(lines) => lines
            .iter()
            .map(|line| format!("- {}", line.trim()))
            .collect::<Vec<_>>()
            .join("\n"),
    }))
}

/// Everything stored for a video: summary, quiz and chapters.
///
/// Written once per video and never updated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
    #[serde(default)]
    pub chapters: Vec<ChapterEntry>,
    /// Unparsed generator reply, kept when it was not valid JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl AnalysisResult {
    /// The summary, if there is a non-blank one.
    pub fn summary_text(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn has_quiz(&self) -> bool {
        !self.quiz.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer: &str) -> QuizQuestion {
        QuizQuestion {
            question: "Q?".to_string(),
            options: [("A", "one"), ("B", "two"), ("C", "three"), ("D", "four")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn test_is_correct_ignores_case() {
        let q = question("B");
        assert!(q.is_correct("b"));
        assert!(q.is_correct(" B\n"));
        assert!(!q.is_correct("A"));
        assert!(!question("").is_correct(""));
    }

    #[test]
    fn test_has_option() {
        let q = question("A");
        assert!(q.has_option("d"));
        assert!(!q.has_option("E"));
    }

    #[test]
    fn test_permissive_cache_shape() {
        let result: AnalysisResult = serde_json::from_str(r#"{"summary": "Short"}"#).unwrap();
        assert_eq!(result.summary_text(), Some("Short"));
        assert!(!result.has_quiz());
        assert!(result.chapters.is_empty());

        let raw: AnalysisResult = serde_json::from_str(r#"{"raw_response": "oops"}"#).unwrap();
        assert_eq!(raw.summary_text(), None);
        assert_eq!(raw.raw_response.as_deref(), Some("oops"));
    }

    #[test]
    fn test_summary_as_bullet_list() {
        let content: GeneratedContent = serde_json::from_str(
            r#"{"summary": ["Weights are learned", " Loss goes down "], "quiz": [{"question": "Q?", "answer": "A"}]}"#,
        )
        .unwrap();
        assert_eq!(
            content.summary.as_deref(),
            Some("- Weights are learned\n- Loss goes down")
        );
        assert_eq!(content.quiz.len(), 1);

        let missing: GeneratedContent = serde_json::from_str(r#"{"summary": null}"#).unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let result = AnalysisResult {
            summary: Some("S".to_string()),
            quiz: vec![question("C")],
            chapters: vec![ChapterEntry {
                title: "Intro".to_string(),
                start_time: "0:00".to_string(),
                end_time: None,
            }],
            raw_response: None,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["quiz"][0]["options"]["C"], "three");
        assert_eq!(value["chapters"][0]["end_time"], serde_json::Value::Null);
        assert!(value.get("raw_response").is_none());
    }
}
