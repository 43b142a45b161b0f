//!
//! Cached Regex Patterns for Lesson Markdown
//!
//! This module provides the pre-compiled, cached regex patterns used by the block
//! scanner and the inline tokenizer (headings, fences, list markers, blockquotes,
//! rules, link targets, autolinks).
//!
//! # Performance
//!
//! All regexes are compiled once on first use via `LazyLock`, avoiding repeated
//! compilation when many lessons are rendered in one process. Use these shared
//! patterns instead of compiling new regexes inside the renderer.

use regex::Regex;
use std::sync::LazyLock;

// =============================================================================
// BLOCK PATTERNS
// =============================================================================
//
// Block patterns are matched against a single line (no trailing newline).
// Precedence between them is decided by the scanner, not by the patterns.

/// ATX heading: 1-6 leading `#`, optional whitespace, heading text.
/// A run longer than six leaves the extra `#` characters in the text group.
pub static HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s*(.*?)\s*$").unwrap());

/// Opening fence, matched against the trimmed line: three backticks and an optional word tag.
pub static FENCE_OPEN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^```(\w+)?\s*$").unwrap());

/// Task list item: bullet marker followed by `[ ]`, `[x]` or `[X]`. The text may be empty.
pub static TASK_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)[-*+][ \t]+\[([ xX])\](?:[ \t]+(.*))?$").unwrap());

/// Ordered list item: `N.` or `N)` marker.
pub static ORDERED_ITEM_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([ \t]*)\d+[.)][ \t]+(.*)$").unwrap());

/// Bullet list item: `*`, `-` or `+` marker followed by whitespace.
pub static BULLET_ITEM_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([ \t]*)[-*+][ \t]+(.*)$").unwrap());

/// Horizontal rule, matched against the trimmed line.
pub static HR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:---|\*\*\*|___)$").unwrap());

/// Blockquote line: `>` at column zero, the quoted text in group 1.
pub static BLOCKQUOTE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^>\s*(.*)$").unwrap());

// =============================================================================
// INLINE PATTERNS
// =============================================================================

/// Link or image target with a double-quoted title: `url "title"`.
pub static LINK_TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^(.+?)\s+"([^"]+)"$"#).unwrap());

/// Email autolink at the start of the haystack: `<user@example.com>`.
pub static AUTOLINK_EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<([^<>\s]+@[^<>\s]+)>").unwrap());

/// URL autolink at the start of the haystack: `<https://example.com>`.
pub static AUTOLINK_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<(https?://[^<>\s]+)>").unwrap());
