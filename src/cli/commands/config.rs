//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the config command against the config file in effect.
pub fn run_config(action: &ConfigAction, settings: &Settings, config_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("# {}", config_path.display());
            println!("{}", render(settings)?);
        }

        ConfigAction::Edit => {
            if ensure_config_file(settings, config_path)? {
                Output::info(&format!("Wrote current settings to {}", config_path.display()));
            }

            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
            Output::info(&format!("Opening {} in {}...", config_path.display(), editor));

            match std::process::Command::new(&editor).arg(config_path).status() {
                Ok(status) if status.success() => {
                    // Catch typos before the next run does
                    match Settings::load_from(Some(config_path)) {
                        Ok(_) => Output::success("Config saved."),
                        Err(e) => Output::warning(&format!("Config no longer parses: {}", e)),
                    }
                }
                Ok(_) => Output::warning("Editor exited with non-zero status."),
                Err(e) => {
                    Output::error(&format!("Failed to open editor '{}': {}", editor, e));
                    Output::info(&format!("Config file is at: {}", config_path.display()));
                }
            }
        }

        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

fn render(settings: &Settings) -> Result<String> {
    toml::to_string_pretty(settings).context("Failed to serialize config")
}

/// Write `settings` to `path` unless a file is already there.
/// Returns whether a file was created.
fn ensure_config_file(settings: &Settings, path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    settings.save_to(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_config_file_uses_given_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ytquiz.toml");
        let mut settings = Settings::default();
        settings.youtube.search_limit = 9;

        assert!(ensure_config_file(&settings, &path).unwrap());
        assert!(!ensure_config_file(&Settings::default(), &path).unwrap());

        let loaded = Settings::load_from(Some(path.as_path())).unwrap();
        assert_eq!(loaded.youtube.search_limit, 9);
    }

    #[test]
    fn test_render_round_trips() {
        let text = render(&Settings::default()).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed.general.log_level, "warn");
    }
}
