//! Handler for the `quiz` command: take a quiz in the terminal.
//!
//! Prompts go to stderr and the submission JSON to stdout (or `--submission-out`),
//! so the output can be piped straight to the scoring API. End of input plays
//! the part of leaving the quiz page.

use anyhow::Context;
use chrono::{TimeDelta, Utc};
use colored::*;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use lessonmark_lib::exit_codes::exit;
use lessonmark_lib::quiz::{Advance, QuizSession};
use lessonmark_lib::types::{Quiz, QuizSubmission};

use crate::QuizArgs;
use crate::cli_utils::{load_config_with_cli_error_handling, write_output};

pub fn handle_quiz(args: &QuizArgs, config_path: Option<&str>, isolated: bool) {
    let config = load_config_with_cli_error_handling(config_path, isolated);
    let submit_on_leave = config.quiz.submit_on_leave && !args.no_submit_on_leave;

    let quiz = match load_quiz(Path::new(&args.quiz)) {
        Ok(quiz) => quiz,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            exit::tool_error();
        }
    };

    let mut session = QuizSession::new(quiz).with_submit_on_leave(submit_on_leave);
    let stdin = io::stdin();
    let mut prompts = io::stderr();

    let submission = match run_quiz(&mut session, stdin.lock(), &mut prompts) {
        Ok(submission) => submission,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            exit::tool_error();
        }
    };

    let Some(submission) = submission else {
        eprintln!("Quiz ended without a submission");
        exit::quiz_not_submitted();
    };

    let json = match serde_json::to_string_pretty(&submission) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    };
    if let Err(e) = write_output(args.submission_out.as_deref(), &json) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        exit::tool_error();
    }

    eprintln!(
        "{} {} of {} answers in {}",
        "Submitted".green().bold(),
        submission.responses.len(),
        session.total(),
        format_elapsed(session.elapsed(Utc::now()))
    );
}

fn load_quiz(path: &Path) -> anyhow::Result<Quiz> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read quiz file {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid quiz JSON in {}", path.display()))
}

/// Drive one attempt from `input`, writing prompts to `out`.
///
/// Answers are option numbers, or free text for questions without options.
/// `q` or end of input leaves the quiz. Returns the submission, if one was made.
pub fn run_quiz<R: BufRead, W: Write>(
    session: &mut QuizSession,
    mut input: R,
    out: &mut W,
) -> anyhow::Result<Option<QuizSubmission>> {
    let title = match session.quiz().lesson_title.as_str() {
        "" => session.quiz().id.clone(),
        title => title.to_string(),
    };
    writeln!(out, "Quiz: {title} ({} questions)", session.total())?;
    writeln!(
        out,
        "Note: if you leave once started, {}.",
        if session.submits_on_leave() {
            "your answers so far will be submitted"
        } else {
            "the attempt is discarded"
        }
    )?;
    write!(out, "Press Enter to start: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(session.leave());
    }
    session.start(Utc::now())?;

    while let Some(question) = session.current_question().cloned() {
        let (position, total) = session.progress();
        writeln!(out)?;
        writeln!(out, "Question {position} of {total}: {}", question.question_text)?;
        for (i, option) in question.options.iter().enumerate() {
            writeln!(out, "  {}) {option}", i + 1)?;
        }
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(session.leave());
        }
        let choice = line.trim();
        if choice.is_empty() {
            writeln!(out, "Select an answer first.")?;
            continue;
        }
        if choice.eq_ignore_ascii_case("q") {
            return Ok(session.leave());
        }

        let answer = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| question.options.get(i))
            .cloned()
            .unwrap_or_else(|| choice.to_string());

        if let Err(e) = session.select_answer(&question.question_id, answer) {
            writeln!(out, "{e}")?;
            continue;
        }
        if let Advance::Submit(submission) = session.advance()? {
            return Ok(Some(submission));
        }
    }

    Ok(None)
}

fn format_elapsed(elapsed: TimeDelta) -> String {
    let seconds = elapsed.num_seconds().max(0);
    if seconds >= 60 {
        format!("{}m {:02}s", seconds / 60, seconds % 60)
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lessonmark_lib::quiz::QuizState;
    use lessonmark_lib::types::QuizQuestion;

    fn quiz() -> Quiz {
        Quiz {
            id: "quiz-7".to_string(),
            lesson: "l7".to_string(),
            lesson_title: "Planets".to_string(),
            version: 1,
            quiz_questions: vec![
                QuizQuestion {
                    question_id: "q1".to_string(),
                    question_text: "Largest planet?".to_string(),
                    options: vec!["Mars".to_string(), "Jupiter".to_string()],
                },
                QuizQuestion {
                    question_id: "q2".to_string(),
                    question_text: "Name a moon.".to_string(),
                    options: vec![],
                },
            ],
            ai_generated: true,
            created_at: None,
        }
    }

    fn run(input: &str, submit_on_leave: bool) -> (QuizSession, Option<QuizSubmission>, String) {
        let mut session = QuizSession::new(quiz()).with_submit_on_leave(submit_on_leave);
        let mut out = Vec::new();
        let submission = run_quiz(&mut session, input.as_bytes(), &mut out).unwrap();
        (session, submission, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_full_attempt_submits() {
        let (session, submission, out) = run("\n2\nEuropa\n", true);
        let submission = submission.unwrap();
        assert_eq!(submission.quiz_id, "quiz-7");
        assert_eq!(submission.responses[0].student_answer, "Jupiter");
        assert_eq!(submission.responses[1].student_answer, "Europa");
        assert_eq!(session.state(), QuizState::Submitting);
        assert!(out.contains("Question 1 of 2: Largest planet?"));
        assert!(out.contains("  2) Jupiter"));
    }

    #[test]
    fn test_end_of_input_submits_recorded_answers() {
        let (_, submission, _) = run("\n1\n", true);
        let submission = submission.unwrap();
        assert_eq!(submission.responses.len(), 1);
        assert_eq!(submission.responses[0].student_answer, "Mars");
    }

    #[test]
    fn test_end_of_input_before_start() {
        let (session, submission, _) = run("", true);
        assert!(submission.is_none());
        assert_eq!(session.state(), QuizState::NotStarted);
    }

    #[test]
    fn test_leave_without_auto_submit() {
        let (session, submission, out) = run("\n1\n", false);
        assert!(submission.is_none());
        assert_eq!(session.state(), QuizState::NotStarted);
        assert!(out.contains("discarded"));
    }

    #[test]
    fn test_invalid_option_reprompts() {
        let (_, submission, out) = run("\nPluto\n\n2\nq\n", true);
        assert!(out.contains("'Pluto' is not an option"));
        assert!(out.contains("Select an answer first."));
        let submission = submission.unwrap();
        assert_eq!(submission.responses.len(), 1);
        assert_eq!(submission.responses[0].student_answer, "Jupiter");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(TimeDelta::seconds(9)), "9s");
        assert_eq!(format_elapsed(TimeDelta::seconds(65)), "1m 05s");
    }
}
