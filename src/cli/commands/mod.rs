//! CLI command implementations.

mod agent;
mod cache;
mod chapters;
mod config;
mod doctor;
mod interactive;
mod quiz;
mod search;
mod summarize;

pub use agent::run_agent;
pub use cache::run_cache;
pub use chapters::run_chapters;
pub use config::run_config;
pub use doctor::run_doctor;
pub use interactive::run_interactive;
pub use quiz::run_quiz;
pub use search::run_search;
pub use summarize::run_summarize;
