//! Configuration loading for lessonmark.
//!
//! Settings live in `.lessonmark.toml` (or `lessonmark.toml`), discovered by
//! walking up from the working directory. Every setting has a built-in default,
//! so a missing file is never an error.

mod theme;
mod types;
mod validation;


pub use theme::Theme;
pub use types::{
    CONFIG_FILES, Config, ConfigError, LoadedConfig, QuizConfig, SessionConfig, create_default_config,
    discover_config_file, generate_default_config, load_with_discovery,
};
pub use validation::{ConfigValidationWarning, suggest_similar_key, validate_config_toml};
