//! Handler for the `config` command.

use colored::*;

use lessonmark_lib::config::{self as lessonmark_config, Config};
use lessonmark_lib::exit_codes::exit;

use crate::ConfigSubcommand;

/// Print the effective configuration, the defaults, or the loaded file path.
pub fn handle_config(subcmd: Option<ConfigSubcommand>, defaults: bool, config_path: Option<&str>, isolated: bool) {
    if defaults {
        print_config(&Config::default());
        return;
    }

    let loaded = match lessonmark_config::load_with_discovery(config_path, isolated) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}: {}", "Config error".red().bold(), e);
            exit::tool_error();
        }
    };

    match subcmd {
        Some(ConfigSubcommand::File) => match &loaded.path {
            Some(path) => {
                let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.clone());
                println!("{}", absolute.display());
            }
            None => println!("No configuration file found; using built-in defaults"),
        },
        None => {
            for warning in &loaded.warnings {
                eprintln!("{}: {}", "Config warning".yellow().bold(), warning);
            }
            if let Some(path) = &loaded.path {
                println!("# Loaded from {}", path.display());
            }
            print_config(&loaded.config);
        }
    }
}

fn print_config(config: &Config) {
    match config.to_toml() {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}
