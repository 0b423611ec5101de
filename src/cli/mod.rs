//! CLI module for ytquiz.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::config::Settings;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ytquiz - learn from YouTube videos
///
/// Fetches a video's transcript and chapters, asks an LLM for a summary and a
/// multiple-choice quiz, caches the result, and quizzes you in the terminal.
/// Run without a subcommand to search for a video interactively.
#[derive(Parser, Debug)]
#[command(name = "ytquiz")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search YouTube for videos
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Summarize a video and take its quiz
    Quiz {
        /// YouTube URL or video ID
        video: String,

        /// Regenerate even if a cached result exists
        #[arg(short, long)]
        force: bool,

        /// Only show the summary and chapters
        #[arg(long)]
        no_quiz: bool,
    },

    /// Show the chapters of a video
    Chapters {
        /// YouTube URL or video ID
        video: String,

        /// Print chapters as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a structured markdown summary of a video (not cached)
    Summarize {
        /// YouTube URL or video ID
        video: String,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Run an AI agent with access to search, transcripts and chapters
    Agent {
        /// The task for the agent to perform (e.g., "Summarize video aircAruvnKk")
        task: String,

        /// Focus on a specific video (optional)
        #[arg(long)]
        video: Option<String>,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Manage cached analyses
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Check system requirements and configuration
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cached videos
    List,

    /// Print the cached analysis of a video as JSON
    Show {
        /// YouTube URL or video ID
        video: String,
    },

    /// Remove the cached analysis of a video
    Remove {
        /// YouTube URL or video ID
        video: String,
    },

    /// Remove all cached analyses
    Clear,

    /// Show the cache directory
    Path,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

impl Cli {
    /// The config file in effect: `--config` if given, else the default location.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .as_deref()
            .map(Settings::expand_path)
            .unwrap_or_else(Settings::default_config_path)
    }

    /// Log filter directive. `-v` flags take precedence over `configured`.
    pub fn log_directive(&self, configured: &str) -> String {
        let level = match self.verbose {
            0 if configured.trim().is_empty() => "warn",
            0 => configured.trim(),
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        format!("ytquiz={}", level)
    }
}
