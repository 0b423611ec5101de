//! Chapters command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::video::VideoId;
use anyhow::Result;

/// Run the chapters command.
pub async fn run_chapters(video: &str, json: bool, settings: &Settings) -> Result<()> {
    // Reject malformed IDs before anything else runs
    if let Err(e) = VideoId::parse(video) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    if let Err(e) = preflight::check(Operation::Fetch, settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ytquiz doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Fetching chapters...");
    let chapters = orchestrator.chapters(video).await;
    spinner.finish_and_clear();

    let chapters = match chapters {
        Ok(chapters) => chapters,
        Err(e) => {
            Output::error(&format!("Failed to fetch chapters: {}", e));
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&chapters)?);
    } else {
        Output::chapters(&chapters);
    }

    Ok(())
}
