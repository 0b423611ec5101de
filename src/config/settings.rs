//! Configuration settings for ytquiz.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub generator: GeneratorSettings,
    pub agent: AgentSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Directory holding one analysis file per video.
    pub cache_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.ytquiz".to_string(),
            cache_dir: "~/.ytquiz/cache".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// YouTube-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Path or name of the yt-dlp executable.
    pub ytdlp_path: String,
    /// Caption languages in order of preference.
    pub subtitle_languages: Vec<String>,
    /// Number of results shown for a search.
    pub search_limit: usize,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            ytdlp_path: "yt-dlp".to_string(),
            subtitle_languages: vec!["en".to_string(), "en-US".to_string(), "en-GB".to_string()],
            search_limit: 5,
        }
    }
}

/// Summary and quiz generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// LLM model used for summaries and quizzes.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Number of quiz questions to request.
    pub question_count: u32,
    /// Timeout for a single API request.
    pub timeout_seconds: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            question_count: 5,
            timeout_seconds: 300, // 5 minutes
        }
    }
}

/// Tool-calling agent settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// LLM model driving the agent.
    pub model: String,
    /// Maximum LLM round trips before giving up.
    pub max_iterations: usize,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_iterations: 15,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&Path>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::YtquizError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ytquiz")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded cache directory path.
    pub fn cache_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.cache_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [generator]
            model = "gpt-4o"

            [youtube]
            subtitle_languages = ["de"]
            "#,
        )
        .unwrap();

        assert_eq!(settings.generator.model, "gpt-4o");
        assert_eq!(settings.generator.question_count, 5);
        assert_eq!(settings.youtube.subtitle_languages, vec!["de"]);
        assert_eq!(settings.youtube.ytdlp_path, "yt-dlp");
        assert_eq!(settings.agent.max_iterations, 15);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.general.cache_dir = "/tmp/ytquiz-test-cache".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(path.as_path())).unwrap();
        assert_eq!(loaded.cache_dir(), PathBuf::from("/tmp/ytquiz-test-cache"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(Some(dir.path().join("absent.toml").as_path())).unwrap();
        assert_eq!(settings.youtube.search_limit, 5);
    }
}
