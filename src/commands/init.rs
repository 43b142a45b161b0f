//! Handler for the `init` command.

use colored::*;

use lessonmark_lib::config as lessonmark_config;
use lessonmark_lib::exit_codes::exit;

/// Handle the init command: create a new configuration file.
pub fn handle_init(output: Option<String>) {
    let output_path = output.as_deref().unwrap_or(".lessonmark.toml");

    match lessonmark_config::create_default_config(output_path) {
        Ok(()) => {
            println!("Created default configuration file: {output_path}");
        }
        Err(e) => {
            eprintln!("{}: Failed to create config file: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}
