//! Agent command implementation.

use crate::agent::{Agent, ToolContext};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the agent command.
pub async fn run_agent(
    task: &str,
    video: Option<String>,
    model: Option<String>,
    settings: &Settings,
) -> Result<()> {
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

    let context = video.as_ref().map(|id| format!("Focus on video ID: {}", id));

    let tool_context = ToolContext::new(orchestrator.source());
    let mut agent = Agent::new(tool_context, &settings.agent, &prompts)?;
    if let Some(model) = &model {
        agent = agent.with_model(model);
    }

    let spinner = Output::spinner("Agent working...");

    match agent.run(task, context.as_deref()).await {
        Ok(response) => {
            spinner.finish_and_clear();

            println!("\n{}\n", response.content);

            if !response.tool_calls.is_empty() {
                Output::header(&format!("Tool calls ({})", response.tool_calls.len()));
                for call in &response.tool_calls {
                    Output::info(&format!("  {}", truncate(&call.to_string(), 60)));
                }
                println!();
            }

            Output::info(&format!("Completed in {} iteration(s)", response.iterations));
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Agent failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("get_transcript({\"video_id\": \"x\"})", 10), "get_tra...");
    }
}
