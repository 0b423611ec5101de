//! Doctor command - verify system requirements and configuration.

use crate::cache::AnalysisCache;
use crate::cli::output::format_size;
use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::path::Path;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("ytquiz doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("External Tools").bold());
    let tool_check = check_ytdlp(&settings.youtube.ytdlp_path);
    tool_check.print();
    checks.push(tool_check);

    println!();

    println!("{}", style("API Configuration").bold());
    let api_check = check_openai_api_key();
    api_check.print();
    checks.push(api_check);

    println!();

    println!("{}", style("Directories").bold());
    let dir_checks = check_directories(settings);
    for check in &dir_checks {
        check.print();
    }
    checks.extend(dir_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(config_path);
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using ytquiz.",
            errors
        ));
        anyhow::bail!("doctor found {} error(s)", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! ytquiz is ready to use.");
    }

    Ok(())
}

/// Check that the configured yt-dlp binary runs.
fn check_ytdlp(path: &str) -> CheckResult {
    let hint = install_hint_ytdlp();

    match Command::new(path).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();
            CheckResult::ok("yt-dlp", &version)
        }
        Ok(_) => CheckResult::error("yt-dlp", "installed but not working", hint),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            CheckResult::error("yt-dlp", &format!("{} not found", path), hint)
        }
        Err(e) => CheckResult::error("yt-dlp", &format!("error: {}", e), hint),
    }
}

fn check_openai_api_key() -> CheckResult {
    api_key_result(std::env::var("OPENAI_API_KEY").ok())
}

fn api_key_result(key: Option<String>) -> CheckResult {
    match key {
        Some(key) if key.starts_with("sk-") && key.chars().count() > 20 => {
            let head: String = key.chars().take(7).collect();
            let tail: String = key.chars().skip(key.chars().count() - 4).collect();
            CheckResult::ok("OPENAI_API_KEY", &format!("configured ({}...{})", head, tail))
        }
        Some(key) if key.is_empty() => CheckResult::error(
            "OPENAI_API_KEY",
            "empty",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
        Some(_) => CheckResult::warning(
            "OPENAI_API_KEY",
            "set but format looks unusual",
            "Expected format: sk-... (OpenAI API key)",
        ),
        None => CheckResult::error(
            "OPENAI_API_KEY",
            "not set",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
    }
}

fn check_directories(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let data_dir = settings.data_dir();
    if data_dir.exists() {
        results.push(CheckResult::ok("Data directory", &format!("{}", data_dir.display())));
    } else {
        results.push(CheckResult::warning(
            "Data directory",
            &format!("{} (will be created)", data_dir.display()),
            "Directory will be created on first use",
        ));
    }

    let cache = AnalysisCache::new(settings.cache_dir());
    match cache.list() {
        Ok(entries) if cache.dir().exists() => {
            let total: u64 = entries.iter().map(|e| e.size_bytes).sum();
            results.push(CheckResult::ok(
                "Cache directory",
                &format!(
                    "{} ({} analyses, {})",
                    cache.dir().display(),
                    entries.len(),
                    format_size(total)
                ),
            ));
        }
        Ok(_) => results.push(CheckResult::warning(
            "Cache directory",
            &format!("{} (not created yet)", cache.dir().display()),
            "Cache will be created on first quiz",
        )),
        Err(e) => results.push(CheckResult::error(
            "Cache directory",
            &format!("{}: {}", cache.dir().display(), e),
            "Check the cache_dir setting and its permissions",
        )),
    }

    results
}

fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: ytquiz config edit",
        )
    }
}

/// Platform-specific install hint for yt-dlp.
fn install_hint_ytdlp() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install yt-dlp"
    } else if cfg!(target_os = "linux") {
        "Install with: pip install yt-dlp (or your package manager)"
    } else {
        "Install from: https://github.com/yt-dlp/yt-dlp"
    }
}
