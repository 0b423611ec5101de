//! Search command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(query: &str, limit: Option<usize>, settings: &Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Fetch, settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ytquiz doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(settings)?;
    let limit = limit.unwrap_or(settings.youtube.search_limit);

    let spinner = Output::spinner("Searching...");
    let results = orchestrator.search(query, limit).await;
    spinner.finish_and_clear();

    match results {
        Ok(videos) => {
            if videos.is_empty() {
                Output::warning("No videos found matching your query.");
            } else {
                Output::success(&format!("Found {} videos", videos.len()));
                for (i, video) in videos.iter().enumerate() {
                    Output::search_result(i + 1, video);
                }
                println!();
                Output::info("Take a quiz with: ytquiz quiz <video id>");
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
