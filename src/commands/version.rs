//! Handler for the `version` command.

pub fn handle_version() {
    println!("lessonmark {}", env!("CARGO_PKG_VERSION"));
}
