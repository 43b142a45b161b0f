// Use jemalloc for better memory allocation performance on Unix-like systems
#[cfg(all(not(target_env = "msvc"), not(target_arch = "wasm32")))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

// Use mimalloc on Windows for better performance
#[cfg(all(target_env = "msvc", not(target_arch = "wasm32")))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod cli_types;
pub use cli_types::{QuizArgs, RenderArgs, SessionArgs};

mod cli_utils;

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::shells::Shell;
use core::error::Error;

use lessonmark_lib::exit_codes::exit;

#[derive(Parser)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control colored output
    #[arg(long, global = true, default_value_t, value_enum)]
    color: Color,

    /// Path to configuration file
    #[arg(long, global = true, help = "Path to configuration file", conflicts_with = "no_config")]
    config: Option<String>,

    /// Ignore all configuration files and use built-in defaults
    #[arg(long, global = true, help = "Ignore all configuration files and use built-in defaults")]
    no_config: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render lesson markdown to an HTML fragment
    Render(RenderArgs),
    /// Take a quiz in the terminal and emit the submission JSON
    Quiz(QuizArgs),
    /// Show or clear the saved sign-in session
    Session(SessionArgs),
    /// Initialize a new configuration file
    Init {
        /// Output file path (default: .lessonmark.toml)
        #[arg(long, short = 'o')]
        output: Option<String>,
    },
    /// Show the effective configuration
    Config {
        #[command(subcommand)]
        subcmd: Option<ConfigSubcommand>,
        /// Show only the default configuration values
        #[arg(long, help = "Show only the default configuration values")]
        defaults: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (detected from $SHELL if omitted)
        shell: Option<Shell>,
        /// List available shells
        #[arg(long, short = 'l')]
        list: bool,
    },
    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Show the absolute path of the configuration file that was loaded
    File,
}

#[derive(Clone, Default, ValueEnum)]
enum Color {
    #[default]
    Auto,
    Always,
    Never,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Reset SIGPIPE to default behavior on Unix so piping to `head` etc. works correctly.
    // Without this, Rust ignores SIGPIPE and `println!` panics on broken pipe.
    #[cfg(unix)]
    {
        // SAFETY: Setting SIGPIPE to SIG_DFL is standard practice for CLI tools
        // that produce output meant to be piped.
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    // Initialize logging from RUST_LOG environment variable
    // e.g. RUST_LOG=debug lessonmark render lesson.md
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();

    match cli.color {
        Color::Always => colored::control::set_override(true),
        Color::Never => colored::control::set_override(false),
        Color::Auto => colored::control::unset_override(),
    }

    let config_path = if cli.no_config { None } else { cli.config.as_deref() };

    // Catch panics and print a message, exit 2
    let result = std::panic::catch_unwind(|| match &cli.command {
        Commands::Render(args) => {
            commands::render::handle_render(args, config_path, cli.no_config);
        }
        Commands::Quiz(args) => {
            commands::quiz::handle_quiz(args, config_path, cli.no_config);
        }
        Commands::Session(args) => {
            commands::session::handle_session(args, config_path, cli.no_config);
        }
        Commands::Init { output } => {
            commands::init::handle_init(output.clone());
        }
        Commands::Config { subcmd, defaults } => {
            commands::config::handle_config(subcmd.clone(), *defaults, config_path, cli.no_config);
        }
        Commands::Completions { shell, list } => {
            commands::completions::handle_completions(*shell, *list);
        }
        Commands::Version => {
            commands::version::handle_version();
        }
    });
    if let Err(e) = result {
        eprintln!("[lessonmark panic handler] Uncaught panic: {e:?}");
        exit::tool_error();
    } else {
        Ok(())
    }
}
