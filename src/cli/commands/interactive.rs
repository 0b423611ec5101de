//! Interactive session: search, pick a video, read the summary, take the quiz.

use super::quiz::{analyze, present};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::YtquizError;
use crate::orchestrator::Orchestrator;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive session.
pub async fn run_interactive(settings: &Settings) -> Result<()> {
    println!("\n{}", style("ytquiz").bold().cyan());
    println!("{}\n", style("Search for a video, read its summary, then take the quiz.").dim());

    let Some(query) = prompt("Search YouTube:")? else {
        return Ok(());
    };
    if query.is_empty() {
        Output::warning("Nothing to search for.");
        return Ok(());
    }

    if let Err(e) = preflight::check(Operation::Fetch, settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ytquiz doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Searching...");
    let results = orchestrator.search(&query, settings.youtube.search_limit).await;
    spinner.finish_and_clear();

    let results = match results {
        Ok(results) => results,
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    };

    if results.is_empty() {
        Output::warning("No videos found.");
        return Ok(());
    }

    Output::header("Results");
    for (i, result) in results.iter().enumerate() {
        Output::search_result(i + 1, result);
    }
    println!();

    let answer = prompt(&format!("Select a video [1-{}]:", results.len()))?.unwrap_or_default();
    let index = match parse_selection(&answer, results.len()) {
        Ok(index) => index,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    let chosen = &results[index];
    Output::info(&format!("Selected: {}", chosen.title));

    let analysis = analyze(&orchestrator, &chosen.video_id, false, settings).await?;
    present(&analysis, true)
}

/// Turn a 1-based menu answer into an index into `count` items.
fn parse_selection(input: &str, count: usize) -> std::result::Result<usize, YtquizError> {
    let input = input.trim();
    let number: usize = input
        .parse()
        .map_err(|_| YtquizError::InvalidSelection(format!("'{}' is not a number", input)))?;

    if number == 0 || number > count {
        return Err(YtquizError::InvalidSelection(format!(
            "{} is out of range (1-{})",
            number, count
        )));
    }

    Ok(number - 1)
}

/// Print a prompt and read one trimmed line. `None` at end of input.
fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{} ", style(label).green().bold());
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("1", 5).unwrap(), 0);
        assert_eq!(parse_selection(" 5\n", 5).unwrap(), 4);
    }

    #[test]
    fn test_parse_selection_rejects_bad_input() {
        for input in ["", "abc", "0", "6", "-1", "2.5"] {
            assert!(
                matches!(parse_selection(input, 5), Err(YtquizError::InvalidSelection(_))),
                "{:?}",
                input
            );
        }
    }
}
