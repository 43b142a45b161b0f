//! Lesson content rendering and quiz sessions for a tutoring platform.
//!
//! - [`render`] turns lesson and practice-task markdown into an HTML fragment.
//! - [`quiz`] tracks a student's quiz attempt from start to scored result.
//! - [`session`] holds the signed-in session and persists it between runs.
//! - [`types`] mirrors the records served by the learning API.

pub mod config;
pub mod exit_codes;
pub mod quiz;
pub mod render;
pub mod session;
pub mod types;
pub mod utils;

// WASM module
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod wasm;

pub use crate::config::{Config, Theme};
pub use crate::quiz::{Advance, QuizError, QuizSession, QuizState, QuizSubmitter, SubmitError};
pub use crate::render::{RenderOptions, Renderer, render, render_optional};
pub use crate::session::{PersistedSession, SessionState, SessionStore};
