//! Lesson markdown to HTML.
//!
//! Rendering happens in three stages: [`block::parse_blocks`] classifies lines
//! into typed blocks (inline spans are tokenized per line as blocks are built),
//! [`html::cleanup`] removes empty artifacts, and [`html::HtmlWriter`] emits one
//! element per block. Escaped markup characters are hidden behind tokens for the
//! whole scan (see [`escape`]), so rendering never reinterprets them.
//!
//! The renderer has no failure path. Unrecognised or malformed syntax is emitted
//! as literal text.

pub mod block;
pub mod escape;
pub mod html;
pub mod inline;


pub use block::{Block, ItemMarker, List, ListItem, ListKind, Table, parse_blocks};
pub use html::{ClassNames, HtmlWriter};
pub use inline::{Inline, parse_inline};

use crate::config::Theme;
use serde::{Deserialize, Serialize};

/// Options controlling HTML output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RenderOptions {
    #[serde(default)]
    pub theme: Theme,
    /// Show the language tag above fenced code blocks
    #[serde(default = "default_true", alias = "show_code_language")]
    pub show_code_language: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            show_code_language: true,
        }
    }
}

/// A configured markdown renderer.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render markdown to an HTML fragment.
    pub fn render(&self, markdown: &str) -> String {
        let blocks = html::cleanup(parse_blocks(markdown));
        log::debug!(
            "rendering {} blocks with {} theme",
            blocks.len(),
            self.options.theme
        );
        HtmlWriter::new(ClassNames::for_theme(self.options.theme), self.options.show_code_language).write(&blocks)
    }

    /// Render possibly-absent content; `None` renders as an empty string.
    pub fn render_optional(&self, markdown: Option<&str>) -> String {
        markdown.map(|m| self.render(m)).unwrap_or_default()
    }
}

/// Render with default options.
pub fn render(markdown: &str) -> String {
    Renderer::default().render(markdown)
}

/// Render possibly-absent content with default options.
pub fn render_optional(markdown: Option<&str>) -> String {
    Renderer::default().render_optional(markdown)
}
