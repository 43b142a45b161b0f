//! Shared CLI utility functions used across command handlers.

use colored::*;
use core::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use lessonmark_lib::config::{self as lessonmark_config, Config};
use lessonmark_lib::exit_codes::exit;

use crate::RenderArgs;

/// Apply CLI argument overrides to the render section of a config.
pub fn apply_render_overrides(config: &mut Config, args: &RenderArgs) {
    if let Some(theme) = args.theme {
        config.render.theme = theme.into();
    }
    if args.no_code_language {
        config.render.show_code_language = false;
    }
}

/// Read a file, or stdin when `path` is `-`.
pub fn read_input(path: &str) -> Result<String, Box<dyn Error>> {
    if path == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| format!("Failed to read stdin: {e}"))?;
        return Ok(content);
    }
    read_file_efficiently(Path::new(path))
}

pub fn read_file_efficiently(path: &Path) -> Result<String, Box<dyn Error>> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read file {}: {}", path.display(), e).into())
}

/// Write to a file, or stdout when no path is given.
pub fn write_output(path: Option<&str>, content: &str) -> Result<(), Box<dyn Error>> {
    match path {
        Some(path) => {
            fs::write(path, content).map_err(|e| format!("Failed to write file {path}: {e}"))?;
            log::debug!("wrote {} bytes to {path}", content.len());
        }
        None => println!("{content}"),
    }
    Ok(())
}

/// Load configuration with standard CLI error handling.
///
/// Warnings about unknown keys are printed; load failures exit with a tool error.
pub fn load_config_with_cli_error_handling(config_path: Option<&str>, isolated: bool) -> Config {
    match lessonmark_config::load_with_discovery(config_path, isolated) {
        Ok(loaded) => {
            for warning in &loaded.warnings {
                let location = loaded
                    .path
                    .as_ref()
                    .map(|p| format!(" ({})", p.display()))
                    .unwrap_or_default();
                eprintln!("{}: {}{}", "Config warning".yellow().bold(), warning, location);
            }
            loaded.config
        }
        Err(e) => {
            eprintln!("{}: {}", "Config error".red().bold(), e);
            exit::tool_error();
        }
    }
}
