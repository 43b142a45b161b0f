//! Handler for the `completions` command.

use clap::CommandFactory;
use clap::ValueEnum;
use clap_complete::shells::Shell;
use colored::*;
use std::io;

use lessonmark_lib::exit_codes::exit;

use crate::Cli;

/// Print a completion script for `shell`, or for the shell named by `$SHELL`.
pub fn handle_completions(shell: Option<Shell>, list: bool) {
    if list {
        for shell in Shell::value_variants() {
            println!("{shell}");
        }
        return;
    }

    let Some(shell) = shell.or_else(Shell::from_env) else {
        eprintln!(
            "{}: Could not detect shell from $SHELL; pass one explicitly (see --list)",
            "Error".red().bold()
        );
        exit::tool_error();
    };

    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "lessonmark", &mut io::stdout());
}
