//! Interactive quiz session.

use super::models::QuizQuestion;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Final tally of a quiz run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
}

impl std::fmt::Display for QuizScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

/// Runs a quiz over any line-oriented input and output.
///
/// Answers are single option letters, case-insensitive. Anything else is
/// re-prompted. End of input leaves the remaining questions unanswered.
pub struct QuizSession<'a> {
    questions: &'a [QuizQuestion],
}

impl<'a> QuizSession<'a> {
    pub fn new(questions: &'a [QuizQuestion]) -> Self {
        Self { questions }
    }

    /// Ask every question and return the score.
    pub fn run<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> io::Result<QuizScore> {
        let total = self.questions.len();
        let mut score = QuizScore { correct: 0, total };
        let mut exhausted = false;

        for (i, question) in self.questions.iter().enumerate() {
            writeln!(output, "\nQ{}/{}: {}", i + 1, total, question.question)?;
            for (letter, text) in &question.options {
                writeln!(output, "  {}) {}", letter, text)?;
            }

            let given = if exhausted {
                None
            } else {
                let answer = read_answer(question, input, output)?;
                exhausted = answer.is_none();
                answer
            };

            let correct = given.as_deref().is_some_and(|a| question.is_correct(a));
            let expected = question.answer.trim().to_uppercase();

            if correct {
                score.correct += 1;
                writeln!(output, "Correct!")?;
            } else {
                writeln!(output, "Wrong. The correct answer is {}.", expected)?;
            }
            debug!("Question {} answered {:?}, correct: {}", i + 1, given, correct);
        }

        Ok(score)
    }
}

/// Prompt until a valid letter is given. Returns `None` at end of input.
fn read_answer<R: BufRead, W: Write>(
    question: &QuizQuestion,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<String>> {
    loop {
        write!(output, "Your answer: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(None);
        }

        let answer = line.trim().to_uppercase();
        let single_letter = answer.len() == 1 && answer.chars().all(|c| c.is_ascii_alphabetic());
        if single_letter && (question.options.is_empty() || question.has_option(&answer)) {
            return Ok(Some(answer));
        }

        let letters: Vec<&str> = question.options.keys().map(String::as_str).collect();
        writeln!(output, "Please answer with one of: {}", letters.join(", "))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn question(text: &str, answer: &str) -> QuizQuestion {
        QuizQuestion {
            question: text.to_string(),
            options: ["A", "B", "C", "D"]
                .iter()
                .map(|l| (l.to_string(), format!("option {}", l)))
                .collect(),
            answer: answer.to_string(),
        }
    }

    fn five_questions() -> Vec<QuizQuestion> {
        vec![
            question("One", "A"),
            question("Two", "B"),
            question("Three", "C"),
            question("Four", "D"),
            question("Five", "A"),
        ]
    }

    #[test]
    fn test_three_of_five() {
        let questions = five_questions();
        let mut input = Cursor::new("a\nB\nd\nd\nc\n");
        let mut output = Vec::new();

        let score = QuizSession::new(&questions).run(&mut input, &mut output).unwrap();

        assert_eq!(score, QuizScore { correct: 3, total: 5 });
        assert_eq!(score.to_string(), "3/5");
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("Q1/5: One"));
        assert!(printed.contains("  C) option C"));
        assert!(!printed.to_lowercase().contains("score"));
    }

    #[test]
    fn test_invalid_answers_are_reprompted() {
        let questions = vec![question("Only", "C")];
        let mut input = Cursor::new("\nE\nabc\n  c  \n");
        let mut output = Vec::new();

        let score = QuizSession::new(&questions).run(&mut input, &mut output).unwrap();

        assert_eq!(score.to_string(), "1/1");
        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("Please answer with one of: A, B, C, D").count(), 3);
    }

    #[test]
    fn test_end_of_input_counts_remaining_as_wrong() {
        let questions = five_questions();
        let mut input = Cursor::new("A\nB\n");
        let mut output = Vec::new();

        let score = QuizSession::new(&questions).run(&mut input, &mut output).unwrap();
        assert_eq!(score, QuizScore { correct: 2, total: 5 });
    }

    #[test]
    fn test_empty_quiz() {
        let mut output = Vec::new();
        let score = QuizSession::new(&[])
            .run(&mut Cursor::new(""), &mut output)
            .unwrap();
        assert_eq!(score.to_string(), "0/0");
    }
}
