//! CLI output formatting utilities.

use crate::chapters::ChapterEntry;
use crate::video::SearchResult;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a numbered search result.
    pub fn search_result(index: usize, result: &SearchResult) {
        println!(
            "  {} {} {}",
            style(format!("{:>2}.", index)).cyan().bold(),
            style(&result.title).bold(),
            style(format!("({}, {}, {})", result.channel, result.duration_display, result.video_id)).dim()
        );
    }

    /// Print the chapter list, or a note that there is none.
    pub fn chapters(chapters: &[ChapterEntry]) {
        Output::header("Chapters");
        if chapters.is_empty() {
            println!("  {}", style("No chapters available.").dim());
            return;
        }

        for chapter in chapters {
            let range = match &chapter.end_time {
                Some(end) => format!("{} - {}", chapter.start_time, end),
                None => format!("{} -", chapter.start_time),
            };
            println!("  {} {}", style(format!("{:>17}", range)).cyan(), chapter.title);
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Format a byte count for display.
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
