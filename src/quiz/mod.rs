//! Summaries, quizzes and the interactive quiz session.

mod models;
mod parse;
mod session;

pub use models::{AnalysisResult, GeneratedContent, QuizQuestion};
pub use parse::GeneratorOutput;
pub use session::{QuizScore, QuizSession};
