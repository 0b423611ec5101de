//! Prompt templates for ytquiz.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub quiz: QuizPrompts,
    pub summary: SummaryPrompts,
    pub agent: AgentPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for summary and quiz generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizPrompts {
    pub system: String,
    pub user: String,
}

impl Default for QuizPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a teaching assistant. You read video transcripts and write concise summaries and multiple-choice quizzes that test real understanding of the content.

Respond with valid JSON only. Do not wrap it in prose."#
                .to_string(),

            user: r#"Here is the transcript of a video:

{{transcript}}

Then:
1. Summarize the key points of the video.
2. Generate a quiz with {{question_count}} multiple-choice questions to test understanding of the video content. Each question should have 4 options (A, B, C, D) with one correct answer.

Return the result as valid JSON with this structure:
{"summary": "...", "quiz": [{"question": "...", "options": {"A": "...", "B": "...", "C": "...", "D": "..."}, "answer": "A"}, ...]}"#
                .to_string(),
        }
    }
}

/// Prompt for the structured markdown summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub user: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            user: r#"Help me summarize this transcript.

Output format (use headings):
## Summary (bullets)
- ...

## Key quotes
- "..."

## Key concepts
- ...

Transcript:
{{transcript}}"#
                .to_string(),
        }
    }
}

/// System prompt for the tool-calling agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPrompts {
    pub system: String,
}

impl Default for AgentPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are an intelligent assistant that works with YouTube videos.

You have tools to search for videos, fetch a video's transcript, and list its chapters.
Think step-by-step about what information you need, then use the appropriate tools.

Guidelines:
- Use 'search_videos' to find videos about a topic
- Use 'get_transcript' to get a full video transcript for summaries, quizzes, or deep analysis
- Use 'get_chapters' to get the chapter list of a video with start and end times

When you have gathered enough information, provide your final response.
Cite chapter titles and timestamps when relevant.
Format your responses clearly with appropriate structure (headers, lists, etc.)."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let quiz_path = custom_path.join("quiz.toml");
            if quiz_path.exists() {
                let content = std::fs::read_to_string(&quiz_path)?;
                prompts.quiz = toml::from_str(&content)?;
            }

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }

            let agent_path = custom_path.join("agent.toml");
            if agent_path.exists() {
                let content = std::fs::read_to_string(&agent_path)?;
                prompts.agent = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.quiz.user.contains("{{transcript}}"));
        assert!(prompts.quiz.user.contains("{{question_count}}"));
        assert!(prompts.summary.user.contains("{{transcript}}"));
        assert!(!prompts.agent.system.is_empty());
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_provided_vars_override_custom() {
        let mut custom = HashMap::new();
        custom.insert("audience".to_string(), "students".to_string());
        custom.insert("transcript".to_string(), "stale".to_string());
        let prompts = Prompts::load(None, Some(&custom)).unwrap();

        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), "fresh".to_string());

        let rendered = prompts.render_with_custom("{{audience}}: {{transcript}}", &vars);
        assert_eq!(rendered, "students: fresh");
    }

    #[test]
    fn test_custom_dir_overrides_quiz_prompt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("quiz.toml"),
            "system = \"Be brief.\"\nuser = \"Quiz me on {{transcript}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.quiz.system, "Be brief.");
        assert!(prompts.summary.user.contains("Key quotes"));
    }
}
