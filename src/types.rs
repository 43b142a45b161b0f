//! Records exchanged with the learning platform API.
//!
//! Field names follow the API's JSON exactly. Timestamps arrive as RFC 3339
//! strings and are parsed into `chrono` values.

use crate::render::Renderer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Display picture URL
    #[serde(default)]
    pub dp: Option<String>,
}

impl User {
    /// "First Last", falling back to the username when both are empty.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Token pair returned by the login and refresh endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub current_grade: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub total_lessons: u32,
    #[serde(default)]
    pub completed_lessons: u32,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub grade_level: u32,
    #[serde(default)]
    pub language: String,
}

/// Review status of a lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LessonStatus {
    #[serde(rename = "VE")]
    Verified,
    #[serde(rename = "DR")]
    Draft,
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LessonStatus::Verified => write!(f, "verified"),
            LessonStatus::Draft => write!(f, "draft"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub instructor: String,
    pub subject: String,
    pub title: String,
    /// Markdown source
    #[serde(default)]
    pub content: Option<String>,
    pub status: LessonStatus,
    #[serde(default)]
    pub progress: Option<f64>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub verified_at: Option<DateTime<Utc>>,
}

impl Lesson {
    /// Lesson body as HTML. Missing content renders as an empty string.
    pub fn content_html(&self, renderer: &Renderer) -> String {
        renderer.render_optional(self.content.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "EA")]
    Easy,
    #[serde(rename = "ME")]
    Medium,
    #[serde(rename = "HA")]
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeTask {
    pub id: String,
    pub lesson: String,
    #[serde(default)]
    pub lesson_title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub ai_generated: bool,
    pub created_at: DateTime<Utc>,
}

impl PracticeTask {
    /// Task body as HTML. Missing content renders as an empty string.
    pub fn content_html(&self, renderer: &Renderer) -> String {
        renderer.render_optional(self.content.as_deref())
    }
}

/// One multiple-choice question as served to a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(alias = "id")]
    pub question_id: String,
    pub question_text: String,
    /// Offered answers. Questions without options accept any answer.
    #[serde(default)]
    pub options: Vec<String>,
}

impl QuizQuestion {
    pub fn accepts(&self, answer: &str) -> bool {
        self.options.is_empty() || self.options.iter().any(|option| option == answer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    #[serde(default)]
    pub lesson: String,
    #[serde(default)]
    pub lesson_title: String,
    #[serde(default)]
    pub version: u32,
    #[serde(alias = "questions", default)]
    pub quiz_questions: Vec<QuizQuestion>,
    #[serde(default)]
    pub ai_generated: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn question(&self, question_id: &str) -> Option<&QuizQuestion> {
        self.quiz_questions.iter().find(|q| q.question_id == question_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResponse {
    pub question_id: String,
    #[serde(alias = "answer")]
    pub student_answer: String,
}

/// Payload sent to the scoring endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSubmission {
    pub quiz_id: String,
    pub responses: Vec<QuizResponse>,
}

/// Scoring outcome returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: f64,
    pub passed: bool,
    #[serde(default)]
    pub attempt_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: String,
    pub student: String,
    pub subject: Subject,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub id: String,
    pub student: User,
    pub quiz: Quiz,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    pub score: f64,
    pub passed: bool,
    #[serde(default)]
    pub cheating_detected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDashboard {
    pub student: StudentProfile,
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
    #[serde(default)]
    pub recent_attempts: Vec<QuizAttempt>,
    #[serde(default)]
    pub practice_tasks: Vec<PracticeTask>,
}
