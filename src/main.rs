//! ytquiz CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ytquiz::cli::{commands, Cli, Commands};
use ytquiz::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config_path();
    let settings = Settings::load_from(Some(config_path.as_path()))?;

    // Logs go to stderr so they never mix with quiz prompts or JSON output
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| cli.log_directive(&settings.general.log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    std::fs::create_dir_all(settings.data_dir())?;
    std::fs::create_dir_all(settings.cache_dir())?;

    match &cli.command {
        None => {
            commands::run_interactive(&settings).await?;
        }

        Some(Commands::Search { query, limit }) => {
            commands::run_search(query, *limit, &settings).await?;
        }

        Some(Commands::Quiz { video, force, no_quiz }) => {
            commands::run_quiz(video, *force, *no_quiz, &settings).await?;
        }

        Some(Commands::Chapters { video, json }) => {
            commands::run_chapters(video, *json, &settings).await?;
        }

        Some(Commands::Summarize { video, model }) => {
            commands::run_summarize(video, model.clone(), &settings).await?;
        }

        Some(Commands::Agent { task, video, model }) => {
            commands::run_agent(task, video.clone(), model.clone(), &settings).await?;
        }

        Some(Commands::Cache { action }) => {
            commands::run_cache(action, &settings)?;
        }

        Some(Commands::Config { action }) => {
            commands::run_config(action, &settings, &config_path)?;
        }

        Some(Commands::Doctor) => {
            commands::run_doctor(&settings, &config_path)?;
        }
    }

    Ok(())
}
