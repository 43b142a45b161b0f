use crate::types::{QuizResult, QuizSubmission};
use thiserror::Error;

/// Failure reported by the scoring boundary
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SubmitError {
    #[error("submission rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("could not reach scoring service: {0}")]
    Transport(String),
}

/// Sends a finished attempt to the external scoring API.
///
/// Scoring never happens locally; the session only records what comes back.
pub trait QuizSubmitter {
    fn submit(&mut self, submission: &QuizSubmission) -> Result<QuizResult, SubmitError>;
}

impl<F> QuizSubmitter for F
where
    F: FnMut(&QuizSubmission) -> Result<QuizResult, SubmitError>,
{
    fn submit(&mut self, submission: &QuizSubmission) -> Result<QuizResult, SubmitError> {
        self(submission)
    }
}
