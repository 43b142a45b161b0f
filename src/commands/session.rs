//! Handler for the `session` command.

use colored::*;
use std::path::PathBuf;

use lessonmark_lib::exit_codes::exit;
use lessonmark_lib::session::SessionStore;

use crate::SessionArgs;
use crate::cli_utils::load_config_with_cli_error_handling;

/// Show who is signed in, or log out with `--clear`.
pub fn handle_session(args: &SessionArgs, config_path: Option<&str>, isolated: bool) {
    let path: PathBuf = match &args.file {
        Some(file) => file.into(),
        None => load_config_with_cli_error_handling(config_path, isolated)
            .session
            .storage_path(),
    };
    let store = SessionStore::new(path);

    if args.clear {
        if let Err(e) = store.remove() {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
        println!("Signed out ({} removed)", store.path().display());
        return;
    }

    let state = match store.load() {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    };

    match (&state.user, state.is_authenticated) {
        (Some(user), true) => {
            println!("Signed in as {} <{}>", user.display_name().bold(), user.email);
            if let Some(profile) = &state.profile {
                println!("Language: {}  Grade: {}", profile.language, profile.current_grade);
            }
        }
        _ => println!("Not signed in"),
    }
}
