//! Handler for the `render` command.

use colored::*;

use lessonmark_lib::exit_codes::exit;
use lessonmark_lib::render::Renderer;

use crate::RenderArgs;
use crate::cli_utils::{apply_render_overrides, load_config_with_cli_error_handling, read_input, write_output};

/// Render one markdown document to an HTML fragment.
pub fn handle_render(args: &RenderArgs, config_path: Option<&str>, isolated: bool) {
    let mut config = load_config_with_cli_error_handling(config_path, isolated);
    apply_render_overrides(&mut config, args);

    let markdown = match read_input(&args.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    };

    let html = Renderer::new(config.render).render(&markdown);

    if let Err(e) = write_output(args.output.as_deref(), &html) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        exit::tool_error();
    }
}
