//! Quiz attempt state machine.
//!
//! ```text
//! NotStarted --start--> InProgress --advance on last / leave--> Submitting --complete--> Completed
//!                           ^                                       |
//!                           +------------- fail_submission ---------+
//! ```
//!
//! Answers are a plain map from question id to chosen option; selecting again
//! overwrites. Leaving the quiz while it is in progress submits whatever has been
//! recorded, exactly once. Scoring belongs to the external API.

mod submit;

#[cfg(test)]
mod tests;

pub use submit::{QuizSubmitter, SubmitError};

use crate::types::{Quiz, QuizQuestion, QuizResponse, QuizResult, QuizSubmission};
use chrono::{DateTime, TimeDelta, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizState {
    NotStarted,
    InProgress,
    Submitting,
    Completed,
}

impl fmt::Display for QuizState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizState::NotStarted => write!(f, "not_started"),
            QuizState::InProgress => write!(f, "in_progress"),
            QuizState::Submitting => write!(f, "submitting"),
            QuizState::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuizError {
    #[error("quiz has no questions")]
    NoQuestions,

    #[error("select an answer for question '{question_id}' before continuing")]
    NoAnswerSelected { question_id: String },

    #[error("cannot {action} while the quiz is {state}")]
    InvalidTransition { action: &'static str, state: QuizState },

    #[error("question '{0}' is not part of this quiz")]
    UnknownQuestion(String),

    #[error("'{answer}' is not an option for question '{question_id}'")]
    InvalidOption { question_id: String, answer: String },

    #[error(transparent)]
    Submission(#[from] SubmitError),
}

/// Outcome of [`QuizSession::advance`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at this index
    Next(usize),
    /// The last question was answered; send this to the scoring API
    Submit(QuizSubmission),
}

/// One student's attempt at a quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: Quiz,
    state: QuizState,
    current: usize,
    answers: IndexMap<String, String>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    pending: Option<QuizSubmission>,
    result: Option<QuizResult>,
    submit_on_leave: bool,
}

impl QuizSession {
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            state: QuizState::NotStarted,
            current: 0,
            answers: IndexMap::new(),
            started_at: None,
            finished_at: None,
            pending: None,
            result: None,
            submit_on_leave: true,
        }
    }

    /// Whether leaving an in-progress attempt submits it (default) or abandons it.
    pub fn with_submit_on_leave(mut self, submit_on_leave: bool) -> Self {
        self.submit_on_leave = submit_on_leave;
        self
    }

    pub fn submits_on_leave(&self) -> bool {
        self.submit_on_leave
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn answers(&self) -> &IndexMap<String, String> {
        &self.answers
    }

    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    /// The submission awaiting a scoring response, while `Submitting`.
    pub fn pending_submission(&self) -> Option<&QuizSubmission> {
        self.pending.as_ref()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), QuizError> {
        self.expect_state(QuizState::NotStarted, "start")?;
        if self.quiz.quiz_questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        self.state = QuizState::InProgress;
        self.started_at = Some(now);
        self.finished_at = None;
        log::debug!("quiz {} started with {} questions", self.quiz.id, self.total());
        Ok(())
    }

    /// Record an answer. The latest selection for a question wins.
    pub fn select_answer(&mut self, question_id: &str, answer: impl Into<String>) -> Result<(), QuizError> {
        self.expect_state(QuizState::InProgress, "select an answer")?;
        let answer = answer.into();
        let question = self
            .quiz
            .question(question_id)
            .ok_or_else(|| QuizError::UnknownQuestion(question_id.to_string()))?;
        if !question.accepts(&answer) {
            return Err(QuizError::InvalidOption {
                question_id: question_id.to_string(),
                answer,
            });
        }
        self.answers.insert(question_id.to_string(), answer);
        Ok(())
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state {
            QuizState::InProgress => self.quiz.quiz_questions.get(self.current),
            _ => None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.quiz.quiz_questions.len()
    }

    /// `(position, total)` with a 1-based position, for "Question 2 of 5"
    pub fn progress(&self) -> (usize, usize) {
        let total = self.total();
        ((self.current + 1).min(total), total)
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= self.total()
    }

    /// Time spent on the attempt. Stops counting once the attempt is submitted.
    pub fn elapsed(&self, now: DateTime<Utc>) -> TimeDelta {
        match self.started_at {
            Some(started) => (self.finished_at.unwrap_or(now) - started).max(TimeDelta::zero()),
            None => TimeDelta::zero(),
        }
    }

    /// Move past the current question, submitting after the last one.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        self.advance_at(Utc::now())
    }

    pub fn advance_at(&mut self, now: DateTime<Utc>) -> Result<Advance, QuizError> {
        self.expect_state(QuizState::InProgress, "advance")?;
        let question_id = &self.quiz.quiz_questions[self.current].question_id;
        if !self.answers.contains_key(question_id) {
            return Err(QuizError::NoAnswerSelected {
                question_id: question_id.clone(),
            });
        }

        if self.is_last_question() {
            Ok(Advance::Submit(self.begin_submission(now)))
        } else {
            self.current += 1;
            Ok(Advance::Next(self.current))
        }
    }

    /// The student navigated away.
    ///
    /// While in progress this yields the one submission carrying the answers
    /// recorded so far. Any other state, or a repeated call, yields `None`.
    pub fn leave(&mut self) -> Option<QuizSubmission> {
        self.leave_at(Utc::now())
    }

    pub fn leave_at(&mut self, now: DateTime<Utc>) -> Option<QuizSubmission> {
        if self.state != QuizState::InProgress {
            return None;
        }
        if !self.submit_on_leave {
            log::debug!("quiz {} abandoned", self.quiz.id);
            self.reset_attempt();
            return None;
        }
        log::debug!(
            "quiz {} left in progress, submitting {} answers",
            self.quiz.id,
            self.answers.len()
        );
        Some(self.begin_submission(now))
    }

    /// Record the scoring response.
    pub fn complete(&mut self, result: QuizResult) -> Result<(), QuizError> {
        self.expect_state(QuizState::Submitting, "complete")?;
        log::debug!("quiz {} scored {} (passed: {})", self.quiz.id, result.score, result.passed);
        self.result = Some(result);
        self.pending = None;
        self.state = QuizState::Completed;
        Ok(())
    }

    /// The submission call failed; return to answering so it can be retried.
    pub fn fail_submission(&mut self) -> Result<(), QuizError> {
        self.expect_state(QuizState::Submitting, "fail a submission")?;
        self.pending = None;
        self.finished_at = None;
        self.state = QuizState::InProgress;
        Ok(())
    }

    /// Send the pending submission once and apply the outcome.
    pub fn drive_submission<S: QuizSubmitter + ?Sized>(&mut self, submitter: &mut S) -> Result<&QuizResult, QuizError> {
        self.expect_state(QuizState::Submitting, "submit")?;
        let Some(submission) = self.pending.clone() else {
            return Err(QuizError::InvalidTransition {
                action: "submit",
                state: self.state,
            });
        };

        match submitter.submit(&submission) {
            Ok(result) => {
                self.complete(result)?;
                self.result
                    .as_ref()
                    .ok_or(QuizError::InvalidTransition {
                        action: "read the result",
                        state: self.state,
                    })
            }
            Err(err) => {
                log::warn!("quiz {} submission failed: {err}", self.quiz.id);
                self.fail_submission()?;
                Err(err.into())
            }
        }
    }

    /// Start over from `NotStarted`, dropping answers and any result.
    pub fn reset(&mut self) -> Result<(), QuizError> {
        if self.state == QuizState::Submitting {
            return Err(QuizError::InvalidTransition {
                action: "reset",
                state: self.state,
            });
        }
        self.reset_attempt();
        Ok(())
    }

    fn reset_attempt(&mut self) {
        self.state = QuizState::NotStarted;
        self.current = 0;
        self.answers.clear();
        self.started_at = None;
        self.finished_at = None;
        self.pending = None;
        self.result = None;
    }

    fn begin_submission(&mut self, now: DateTime<Utc>) -> QuizSubmission {
        let submission = QuizSubmission {
            quiz_id: self.quiz.id.clone(),
            responses: self
                .answers
                .iter()
                .map(|(question_id, answer)| QuizResponse {
                    question_id: question_id.clone(),
                    student_answer: answer.clone(),
                })
                .collect(),
        };
        self.state = QuizState::Submitting;
        self.finished_at = Some(now);
        self.pending = Some(submission.clone());
        submission
    }

    fn expect_state(&self, expected: QuizState, action: &'static str) -> Result<(), QuizError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(QuizError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }
}
