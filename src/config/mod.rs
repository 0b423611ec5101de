//! Configuration module for ytquiz.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AgentPrompts, Prompts, QuizPrompts, SummaryPrompts};
pub use settings::{
    AgentSettings, GeneralSettings, GeneratorSettings, PromptSettings, Settings, YoutubeSettings,
};
