//! WASM bindings for rendering lesson content in the browser.
//!
//! Exposes the renderer to JavaScript via wasm-bindgen. Absent content
//! (`undefined` or `null` on the JS side) renders as an empty string.

use wasm_bindgen::prelude::*;

use crate::config::Theme;
use crate::render::{RenderOptions, Renderer};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Render markdown with the Tailwind class palette used by the lesson viewer.
#[wasm_bindgen(js_name = renderMarkdown)]
pub fn render_markdown(content: Option<String>) -> String {
    crate::render::render_optional(content.as_deref())
}

/// Render markdown to bare HTML elements without class attributes.
#[wasm_bindgen(js_name = renderMarkdownPlain)]
pub fn render_markdown_plain(content: Option<String>, show_code_language: bool) -> String {
    Renderer::new(RenderOptions {
        theme: Theme::Plain,
        show_code_language,
    })
    .render_optional(content.as_deref())
}
