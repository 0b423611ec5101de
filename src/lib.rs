//! ytquiz - Summaries and quizzes for YouTube videos
//!
//! A terminal tool that turns a YouTube video into a study session.
//!
//! # Overview
//!
//! ytquiz allows you to:
//! - Search YouTube and pick a video
//! - Fetch its transcript and chapters through yt-dlp
//! - Generate a summary and a multiple-choice quiz with an LLM
//! - Take the quiz in the terminal and see your score
//!
//! Generated results are cached per video so a second run is instant.
//!
//! # Architecture
//!
//! - `config` - Configuration and prompt templates
//! - `video` - Video IDs and the yt-dlp backed video source
//! - `chapters` - Chapter resolution from metadata or description timestamps
//! - `generator` - LLM summary and quiz generation
//! - `quiz` - Quiz models, reply parsing, and the interactive session
//! - `cache` - Per-video analysis cache
//! - `agent` - Tool-calling agent over the video source
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use ytquiz::config::Settings;
//! use ytquiz::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(&settings)?;
//!
//!     let analysis = orchestrator.analyze("dQw4w9WgXcQ", false).await?;
//!     println!("{} questions", analysis.result.quiz.len());
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cache;
pub mod chapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod openai;
pub mod orchestrator;
pub mod quiz;
pub mod video;

pub use error::{Result, YtquizError};
