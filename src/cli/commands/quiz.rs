//! Quiz command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{Analysis, Orchestrator};
use crate::quiz::QuizSession;
use crate::video::VideoId;
use anyhow::Result;
use console::style;
use std::io;

/// Run the quiz command.
pub async fn run_quiz(video: &str, force: bool, no_quiz: bool, settings: &Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;
    let analysis = analyze(&orchestrator, video, force, settings).await?;
    present(&analysis, !no_quiz)
}

/// Analyze a video, running pre-flight checks only when generation is needed.
pub(super) async fn analyze(
    orchestrator: &Orchestrator,
    video: &str,
    force: bool,
    settings: &Settings,
) -> Result<Analysis> {
    let video_id = match VideoId::parse(video) {
        Ok(id) => id,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    if force || !orchestrator.cache().contains(&video_id) {
        if let Err(e) = preflight::check(Operation::Generate, settings) {
            Output::error(&format!("{}", e));
            Output::info("Run 'ytquiz doctor' for detailed diagnostics.");
            return Err(e.into());
        }
    }

    let spinner = Output::spinner(&format!("Analyzing {}...", video_id));
    let result = orchestrator.analyze(video_id.as_str(), force).await;
    spinner.finish_and_clear();

    match result {
        Ok(analysis) => {
            if analysis.from_cache {
                Output::info(&format!("Loaded cached analysis ({})", analysis.cache_path.display()));
            } else {
                Output::success(&format!("Saved analysis to {}", analysis.cache_path.display()));
            }
            Ok(analysis)
        }
        Err(e) => {
            Output::error(&format!("Failed to analyze {}: {}", video_id, e));
            Err(e.into())
        }
    }
}

/// Print summary and chapters, then optionally run the quiz on stdin/stdout.
pub(super) fn present(analysis: &Analysis, take_quiz: bool) -> Result<()> {
    let result = &analysis.result;

    Output::header("Summary");
    match result.summary_text() {
        Some(summary) => println!("{}", summary),
        None => {
            println!("{}", style("No summary available.").dim());
            if let Some(raw) = &result.raw_response {
                println!("\n{}", style("The model replied with unstructured text:").dim());
                println!("{}", raw);
            }
        }
    }

    Output::chapters(&result.chapters);

    if !take_quiz {
        return Ok(());
    }

    if !result.has_quiz() {
        Output::warning("No quiz available for this video.");
        return Ok(());
    }

    Output::header(&format!("Quiz ({} questions)", result.quiz.len()));
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let score = QuizSession::new(&result.quiz).run(&mut stdin.lock(), &mut stdout)?;

    if score.correct == score.total {
        Output::success(&format!("Perfect score: {}", score));
    } else {
        Output::info(&format!("Final score: {}", score));
    }

    Ok(())
}
