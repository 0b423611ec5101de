//! Summarize command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::generator::OpenAIGenerator;
use crate::orchestrator::Orchestrator;
use crate::video::VideoId;
use anyhow::Result;

/// Run the summarize command.
pub async fn run_summarize(video: &str, model: Option<String>, settings: &Settings) -> Result<()> {
    let video_id = match VideoId::parse(video) {
        Ok(id) => id,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    if let Err(e) = preflight::check(Operation::Generate, settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ytquiz doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(settings)?;
    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let mut generator = OpenAIGenerator::new(&settings.generator, prompts)?;
    if let Some(model) = &model {
        generator = generator.with_model(model);
    }

    let spinner = Output::spinner("Fetching transcript...");
    let transcript = orchestrator.transcript(video_id.as_str()).await;
    spinner.finish_and_clear();
    let transcript = match transcript {
        Ok(text) => text,
        Err(e) => {
            Output::error(&format!("Failed to fetch transcript: {}", e));
            return Err(e.into());
        }
    };

    let spinner = Output::spinner("Summarizing...");
    let summary = generator.summarize(&transcript).await;
    spinner.finish_and_clear();

    match summary {
        Ok(text) => println!("\n{}\n", text.trim()),
        Err(e) => {
            Output::error(&format!("Summary failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
