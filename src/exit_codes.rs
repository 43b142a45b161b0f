//! Process exit codes for the `lessonmark` binary.

/// Command completed
pub const SUCCESS: i32 = 0;

/// A quiz run ended without a submission (abandoned, or no answers given)
pub const QUIZ_NOT_SUBMITTED: i32 = 1;

/// Bad input, unreadable files, invalid configuration
pub const TOOL_ERROR: i32 = 2;

/// Helpers that terminate the process with one of the codes above
pub mod exit {
    use super::*;

    pub fn quiz_not_submitted() -> ! {
        std::process::exit(QUIZ_NOT_SUBMITTED);
    }

    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}
