//! Cache command implementation.

use crate::cache::AnalysisCache;
use crate::cli::output::format_size;
use crate::cli::{CacheAction, Output};
use crate::config::Settings;
use crate::video::VideoId;
use anyhow::Result;

/// Run the cache command.
pub fn run_cache(action: &CacheAction, settings: &Settings) -> Result<()> {
    let cache = AnalysisCache::new(settings.cache_dir());

    match action {
        CacheAction::List => {
            let entries = cache.list()?;
            if entries.is_empty() {
                Output::info("No cached analyses yet. Use 'ytquiz quiz <video>' to create one.");
                return Ok(());
            }

            Output::header(&format!("Cached analyses ({})", entries.len()));
            println!();
            for entry in &entries {
                let modified = entry
                    .modified
                    .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                Output::kv(
                    &entry.video_id,
                    &format!("{} ({})", modified, format_size(entry.size_bytes)),
                );
            }
        }

        CacheAction::Show { video } => {
            let id = VideoId::parse(video)?;
            match cache.load(&id)? {
                Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                None => Output::warning(&format!("No cached analysis for {}", id)),
            }
        }

        CacheAction::Remove { video } => {
            let id = VideoId::parse(video)?;
            if cache.remove(&id)? {
                Output::success(&format!("Removed cached analysis for {}", id));
            } else {
                Output::warning(&format!("No cached analysis for {}", id));
            }
        }

        CacheAction::Clear => {
            let removed = cache.clear()?;
            Output::success(&format!("Removed {} cached analyses", removed));
        }

        CacheAction::Path => {
            println!("{}", cache.dir().display());
        }
    }

    Ok(())
}
