//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{Result, YtquizError};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Generating summaries and quizzes needs yt-dlp and an API key.
    Generate,
    /// Searching and reading chapters only needs yt-dlp.
    Fetch,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Generate => {
            check_api_key()?;
            check_tool(&settings.youtube.ytdlp_path)?;
        }
        Operation::Fetch => {
            check_tool(&settings.youtube.ytdlp_path)?;
        }
    }
    Ok(())
}

/// Check if OpenAI API key is configured.
pub fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(YtquizError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        Err(_) => Err(YtquizError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}

/// Check if an external tool is available.
pub fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(YtquizError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(YtquizError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(YtquizError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_reports_missing_ytdlp() {
        let mut settings = Settings::default();
        settings.youtube.ytdlp_path = "ytquiz-definitely-not-installed".to_string();

        let err = check(Operation::Fetch, &settings).unwrap_err();
        assert!(matches!(err, YtquizError::ToolNotFound(_)));
    }
}
