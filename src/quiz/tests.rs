use super::*;
use crate::types::QuizQuestion;
use chrono::TimeZone;

fn question(id: &str, options: &[&str]) -> QuizQuestion {
    QuizQuestion {
        question_id: id.to_string(),
        question_text: format!("Question {id}?"),
        options: options.iter().map(|o| o.to_string()).collect(),
    }
}

fn sample_quiz() -> Quiz {
    Quiz {
        id: "quiz-1".to_string(),
        lesson: "lesson-1".to_string(),
        lesson_title: "Fractions".to_string(),
        version: 1,
        quiz_questions: vec![
            question("q1", &["1/2", "1/3"]),
            question("q2", &["yes", "no"]),
            question("q3", &[]),
        ],
        ai_generated: false,
        created_at: None,
    }
}

fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_760_000_000 + seconds, 0).unwrap()
}

fn started() -> QuizSession {
    let mut session = QuizSession::new(sample_quiz());
    session.start(at(0)).unwrap();
    session
}

#[test]
fn test_start_moves_to_in_progress() {
    let mut session = QuizSession::new(sample_quiz());
    assert_eq!(session.state(), QuizState::NotStarted);
    assert!(session.current_question().is_none());

    session.start(at(0)).unwrap();
    assert_eq!(session.state(), QuizState::InProgress);
    assert_eq!(session.current_question().unwrap().question_id, "q1");
    assert_eq!(session.progress(), (1, 3));
    assert_eq!(session.started_at(), Some(at(0)));
}

#[test]
fn test_start_twice_is_rejected() {
    let mut session = started();
    assert_eq!(
        session.start(at(5)),
        Err(QuizError::InvalidTransition {
            action: "start",
            state: QuizState::InProgress,
        })
    );
}

#[test]
fn test_empty_quiz_cannot_start() {
    let mut quiz = sample_quiz();
    quiz.quiz_questions.clear();
    let mut session = QuizSession::new(quiz);
    assert_eq!(session.start(at(0)), Err(QuizError::NoQuestions));
    assert_eq!(session.state(), QuizState::NotStarted);
}

#[test]
fn test_last_answer_wins() {
    let mut session = started();
    session.select_answer("q1", "1/2").unwrap();
    session.select_answer("q1", "1/3").unwrap();
    assert_eq!(session.answers().len(), 1);
    assert_eq!(session.answer("q1"), Some("1/3"));
}

#[test]
fn test_answers_keep_first_selection_order() {
    let mut session = started();
    session.select_answer("q2", "no").unwrap();
    session.select_answer("q1", "1/2").unwrap();
    session.select_answer("q2", "yes").unwrap();
    let keys: Vec<&str> = session.answers().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["q2", "q1"]);
}

#[test]
fn test_answer_validation() {
    let mut session = started();
    assert_eq!(
        session.select_answer("q9", "x"),
        Err(QuizError::UnknownQuestion("q9".to_string()))
    );
    assert_eq!(
        session.select_answer("q1", "2/3"),
        Err(QuizError::InvalidOption {
            question_id: "q1".to_string(),
            answer: "2/3".to_string(),
        })
    );
    // Open questions take any text
    session.select_answer("q3", "because").unwrap();
}

#[test]
fn test_answer_before_start_is_rejected() {
    let mut session = QuizSession::new(sample_quiz());
    assert!(matches!(
        session.select_answer("q1", "1/2"),
        Err(QuizError::InvalidTransition { .. })
    ));
}

#[test]
fn test_advance_requires_answer() {
    let mut session = started();
    assert_eq!(
        session.advance_at(at(1)),
        Err(QuizError::NoAnswerSelected {
            question_id: "q1".to_string(),
        })
    );
    assert_eq!(session.current_index(), 0);
}

#[test]
fn test_advance_through_to_submission() {
    let mut session = started();
    session.select_answer("q1", "1/2").unwrap();
    assert_eq!(session.advance_at(at(10)).unwrap(), Advance::Next(1));
    session.select_answer("q2", "yes").unwrap();
    assert_eq!(session.advance_at(at(20)).unwrap(), Advance::Next(2));
    assert!(session.is_last_question());
    assert_eq!(session.progress(), (3, 3));

    session.select_answer("q3", "a fraction").unwrap();
    let Advance::Submit(submission) = session.advance_at(at(30)).unwrap() else {
        panic!("expected a submission on the last question");
    };
    assert_eq!(session.state(), QuizState::Submitting);
    assert_eq!(submission.quiz_id, "quiz-1");
    assert_eq!(submission.responses.len(), 3);
    assert_eq!(session.pending_submission(), Some(&submission));
}

#[test]
fn test_leave_submits_exactly_once() {
    let mut session = started();
    session.select_answer("q1", "1/3").unwrap();

    let submission = session.leave_at(at(15)).expect("leaving in progress submits");
    assert_eq!(
        submission.responses,
        vec![QuizResponse {
            question_id: "q1".to_string(),
            student_answer: "1/3".to_string(),
        }]
    );
    assert_eq!(session.state(), QuizState::Submitting);
    assert!(session.leave_at(at(16)).is_none());
}

#[test]
fn test_leave_before_start_does_nothing() {
    let mut session = QuizSession::new(sample_quiz());
    assert!(session.leave().is_none());
    assert_eq!(session.state(), QuizState::NotStarted);
}

#[test]
fn test_leave_without_auto_submit_abandons() {
    let mut session = QuizSession::new(sample_quiz()).with_submit_on_leave(false);
    session.start(at(0)).unwrap();
    session.select_answer("q1", "1/2").unwrap();
    assert!(session.leave_at(at(3)).is_none());
    assert_eq!(session.state(), QuizState::NotStarted);
    assert!(session.answers().is_empty());
}

#[test]
fn test_elapsed_stops_at_submission() {
    let mut session = QuizSession::new(sample_quiz());
    assert_eq!(session.elapsed(at(100)), TimeDelta::zero());
    session.start(at(0)).unwrap();
    assert_eq!(session.elapsed(at(42)), TimeDelta::seconds(42));
    session.leave_at(at(60));
    assert_eq!(session.elapsed(at(500)), TimeDelta::seconds(60));
}

#[test]
fn test_complete_records_server_result() {
    let mut session = started();
    session.select_answer("q1", "1/2").unwrap();
    session.leave_at(at(5)).unwrap();

    let result = QuizResult {
        score: 33.3,
        passed: false,
        attempt_id: Some("att-1".to_string()),
    };
    session.complete(result.clone()).unwrap();
    assert_eq!(session.state(), QuizState::Completed);
    assert_eq!(session.result(), Some(&result));
    assert!(session.pending_submission().is_none());
}

#[test]
fn test_complete_requires_submitting() {
    let mut session = started();
    let result = QuizResult {
        score: 100.0,
        passed: true,
        attempt_id: None,
    };
    assert!(matches!(session.complete(result), Err(QuizError::InvalidTransition { .. })));
}

#[test]
fn test_drive_submission_success() {
    let mut session = started();
    session.select_answer("q1", "1/2").unwrap();
    session.leave_at(at(5)).unwrap();

    let mut calls = 0;
    let mut submitter = |submission: &QuizSubmission| -> Result<QuizResult, SubmitError> {
        calls += 1;
        assert_eq!(submission.responses.len(), 1);
        Ok(QuizResult {
            score: 80.0,
            passed: true,
            attempt_id: None,
        })
    };
    let result = session.drive_submission(&mut submitter).unwrap();
    assert!(result.passed);
    assert_eq!(calls, 1);
    assert_eq!(session.state(), QuizState::Completed);
}

#[test]
fn test_drive_submission_failure_allows_retry() {
    let mut session = started();
    session.select_answer("q1", "1/2").unwrap();
    session.advance_at(at(1)).unwrap();
    session.select_answer("q2", "no").unwrap();
    session.advance_at(at(2)).unwrap();
    session.select_answer("q3", "x").unwrap();
    session.advance_at(at(3)).unwrap();

    let mut failing =
        |_: &QuizSubmission| -> Result<QuizResult, SubmitError> { Err(SubmitError::Transport("timeout".to_string())) };
    let err = session.drive_submission(&mut failing).unwrap_err();
    assert_eq!(err, QuizError::Submission(SubmitError::Transport("timeout".to_string())));
    assert_eq!(session.state(), QuizState::InProgress);
    assert_eq!(session.answers().len(), 3);

    // Answers survive, so the final advance submits again
    assert!(matches!(session.advance_at(at(4)).unwrap(), Advance::Submit(_)));
}

#[test]
fn test_reset_after_completion() {
    let mut session = started();
    session.select_answer("q1", "1/2").unwrap();
    session.leave_at(at(1)).unwrap();
    assert!(session.reset().is_err());

    session
        .complete(QuizResult {
            score: 50.0,
            passed: false,
            attempt_id: None,
        })
        .unwrap();
    session.reset().unwrap();
    assert_eq!(session.state(), QuizState::NotStarted);
    assert!(session.answers().is_empty());
    assert!(session.result().is_none());
    assert_eq!(session.current_index(), 0);
}

#[test]
fn test_state_display() {
    assert_eq!(QuizState::NotStarted.to_string(), "not_started");
    assert_eq!(QuizState::Submitting.to_string(), "submitting");
    assert_eq!(
        QuizError::InvalidTransition {
            action: "advance",
            state: QuizState::Completed
        }
        .to_string(),
        "cannot advance while the quiz is completed"
    );
}
