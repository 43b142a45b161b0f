use clap::{Args, ValueEnum};
use lessonmark_lib::config::Theme;

/// HTML class palette, as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    /// Tailwind utility classes
    Tailwind,
    /// No class attributes
    Plain,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Tailwind => Theme::Tailwind,
            ThemeArg::Plain => Theme::Plain,
        }
    }
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Markdown file to render (use '-' for stdin)
    #[arg(default_value = "-")]
    pub input: String,

    /// Write HTML to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Class palette for generated HTML (overrides config)
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,

    /// Do not show the language label on fenced code blocks
    #[arg(long)]
    pub no_code_language: bool,
}

#[derive(Args, Debug)]
pub struct QuizArgs {
    /// Quiz JSON as served by the learning API
    pub quiz: String,

    /// Write the submission JSON to this file instead of stdout
    #[arg(short = 'o', long)]
    pub submission_out: Option<String>,

    /// Abandon instead of submitting when input ends before the last question
    #[arg(long)]
    pub no_submit_on_leave: bool,
}

#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Session file (overrides [session] storage-path)
    #[arg(long)]
    pub file: Option<String>,

    /// Delete the saved session (log out)
    #[arg(long)]
    pub clear: bool,
}
