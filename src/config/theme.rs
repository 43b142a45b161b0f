use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Class palette used when emitting HTML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Tailwind utility classes matching the lesson viewer
    #[serde(rename = "tailwind", alias = "default")]
    #[default]
    Tailwind,
    /// Bare elements without any `class` attributes
    #[serde(rename = "plain", alias = "none", alias = "bare")]
    Plain,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Tailwind => write!(f, "tailwind"),
            Theme::Plain => write!(f, "plain"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tailwind" | "default" | "" => Ok(Theme::Tailwind),
            "plain" | "none" | "bare" => Ok(Theme::Plain),
            _ => Err(format!("Unknown theme: {s}")),
        }
    }
}

impl Theme {
    /// All selectable themes, in the order they are listed to users
    pub const ALL: [Theme; 2] = [Theme::Tailwind, Theme::Plain];
}
