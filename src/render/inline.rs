//! Inline span tokenizer.
//!
//! Turns a single line of (escape-protected) text into a flat-or-nested list of
//! [`Inline`] nodes. At each position the recognisers are tried in precedence
//! order: code span, image, link, autolink, strikethrough, then emphasis runs
//! from the longest marker down. Anything that does not match is literal text.

use super::escape;
use crate::utils::regex_cache::{AUTOLINK_EMAIL_REGEX, AUTOLINK_URL_REGEX, LINK_TITLE_REGEX};

/// An inline node produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Literal text, emitted as-is
    Text(String),
    /// Inline code, emitted HTML-escaped
    Code(String),
    /// `~~text~~`
    Strikethrough(Vec<Inline>),
    /// `***text***` or `___text___`
    StrongEmphasis(Vec<Inline>),
    /// `**text**` or `__text__`
    Strong(Vec<Inline>),
    /// `*text*` or `_text_`
    Emphasis(Vec<Inline>),
    Link {
        text: Vec<Inline>,
        url: String,
        title: Option<String>,
    },
    Image {
        alt: String,
        url: String,
        title: Option<String>,
    },
    /// `<https://...>` or `<user@host>`; `url` already carries `mailto:` for emails
    Autolink { url: String, label: String },
    /// Boundary between two source lines of the same block
    LineBreak,
}

impl Inline {
    /// True for nodes that render to nothing visible.
    pub fn is_blank(&self) -> bool {
        match self {
            Inline::LineBreak => true,
            Inline::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

/// Parse one line of raw markdown into inline nodes.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    parse_spans(&escape::protect(&escape::normalize(text)))
}

/// Parse text whose escapes have already been replaced by tokens.
pub(crate) fn parse_spans(src: &str) -> Vec<Inline> {
    let bytes = src.as_bytes();
    let mut nodes = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if let Some((node, end)) = match_span(src, pos) {
            push_text(&mut nodes, &src[text_start..pos]);
            nodes.push(node);
            pos = end;
            text_start = end;
        } else {
            pos += utf8_width(bytes[pos]);
        }
    }
    push_text(&mut nodes, &src[text_start..]);
    nodes
}

fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}

fn push_text(nodes: &mut Vec<Inline>, raw: &str) {
    if raw.is_empty() {
        return;
    }
    let text = escape::restore(raw);
    if let Some(Inline::Text(previous)) = nodes.last_mut() {
        previous.push_str(&text);
    } else {
        nodes.push(Inline::Text(text));
    }
}

fn match_span(src: &str, pos: usize) -> Option<(Inline, usize)> {
    match src.as_bytes()[pos] {
        b'`' => code_span(src, pos),
        b'!' => image(src, pos),
        b'[' => link(src, pos),
        b'<' => autolink(src, pos),
        b'~' => strikethrough(src, pos),
        b'*' | b'_' => emphasis(src, pos),
        _ => None,
    }
}

/// Find `delim` after `from`, requiring non-empty, single-line content.
fn find_closing(src: &str, from: usize, delim: &str) -> Option<usize> {
    let offset = src.get(from..)?.find(delim)?;
    let content = &src[from..from + offset];
    if offset == 0 || content.contains('\n') {
        return None;
    }
    Some(from + offset)
}

fn code_span(src: &str, pos: usize) -> Option<(Inline, usize)> {
    let close = find_closing(src, pos + 1, "`")?;
    let code = escape::restore_verbatim(&src[pos + 1..close]);
    Some((Inline::Code(code), close + 1))
}

fn strikethrough(src: &str, pos: usize) -> Option<(Inline, usize)> {
    if !src[pos..].starts_with("~~") {
        return None;
    }
    let close = find_closing(src, pos + 2, "~~")?;
    let inner = parse_spans(&src[pos + 2..close]);
    Some((Inline::Strikethrough(inner), close + 2))
}

/// Split `[label](target)` starting at `open` (the `[`), returning label, target and end.
fn bracket_target(src: &str, open: usize) -> Option<(&str, &str, usize)> {
    let label_start = open + 1;
    let label_len = src[label_start..].find(']')?;
    let label_end = label_start + label_len;
    let rest = &src[label_end + 1..];
    if !rest.starts_with('(') {
        return None;
    }
    let target_start = label_end + 2;
    let target_len = src[target_start..].find(')')?;
    let target = &src[target_start..target_start + target_len];
    if target.trim().is_empty() || target.contains('\n') || src[label_start..label_end].contains('\n') {
        return None;
    }
    Some((&src[label_start..label_end], target, target_start + target_len + 1))
}

fn split_target(target: &str) -> (String, Option<String>) {
    let target = target.trim();
    match LINK_TITLE_REGEX.captures(target) {
        Some(caps) => (escape::restore(&caps[1]), Some(escape::restore(&caps[2]))),
        None => (escape::restore(target), None),
    }
}

fn image(src: &str, pos: usize) -> Option<(Inline, usize)> {
    if !src[pos..].starts_with("![") {
        return None;
    }
    let (alt, target, end) = bracket_target(src, pos + 1)?;
    let (url, title) = split_target(target);
    Some((
        Inline::Image {
            alt: escape::restore(alt),
            url,
            title,
        },
        end,
    ))
}

fn link(src: &str, pos: usize) -> Option<(Inline, usize)> {
    let (label, target, end) = bracket_target(src, pos)?;
    if label.is_empty() {
        return None;
    }
    let (url, title) = split_target(target);
    Some((
        Inline::Link {
            text: parse_spans(label),
            url,
            title,
        },
        end,
    ))
}

fn autolink(src: &str, pos: usize) -> Option<(Inline, usize)> {
    let rest = &src[pos..];
    if let Some(caps) = AUTOLINK_URL_REGEX.captures(rest) {
        let label = escape::restore(&caps[1]);
        return Some((
            Inline::Autolink {
                url: label.clone(),
                label,
            },
            pos + caps[0].len(),
        ));
    }
    if let Some(caps) = AUTOLINK_EMAIL_REGEX.captures(rest) {
        let label = escape::restore(&caps[1]);
        return Some((
            Inline::Autolink {
                url: format!("mailto:{label}"),
                label,
            },
            pos + caps[0].len(),
        ));
    }
    None
}

fn is_word_char(c: Option<char>) -> bool {
    c.is_some_and(|c| c.is_alphanumeric())
}

fn emphasis(src: &str, pos: usize) -> Option<(Inline, usize)> {
    let marker = src.as_bytes()[pos];
    let underscore = marker == b'_';
    // Underscores inside words (snake_case) are never delimiters
    if underscore && is_word_char(src[..pos].chars().next_back()) {
        return None;
    }

    let triple = if underscore { "___" } else { "***" };
    let double = &triple[..2];

    if src[pos..].starts_with(triple)
        && let Some(close) = find_closing(src, pos + 3, triple)
        && !(underscore && (src[pos + 3..close].contains('_') || is_word_char(src[close + 3..].chars().next())))
    {
        let inner = parse_spans(&src[pos + 3..close]);
        return Some((Inline::StrongEmphasis(inner), close + 3));
    }

    if src[pos..].starts_with(double)
        && let Some(close) = find_closing(src, pos + 2, double)
        && !(underscore && is_word_char(src[close + 2..].chars().next()))
    {
        let inner = parse_spans(&src[pos + 2..close]);
        return Some((Inline::Strong(inner), close + 2));
    }

    let close = if underscore {
        single_underscore_close(src, pos)?
    } else {
        single_star_close(src, pos)?
    };
    let inner = parse_spans(&src[pos + 1..close]);
    Some((Inline::Emphasis(inner), close + 1))
}

/// Closing `*` for a single-star span. Balanced `**` pairs inside are skipped so
/// `*a **b** c*` keeps its strong span nested in the emphasis.
fn single_star_close(src: &str, pos: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut j = pos + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\n' => return None,
            b'*' => {
                if bytes.get(j + 1) == Some(&b'*')
                    && let Some(close) = find_closing(src, j + 2, "**")
                {
                    j = close + 2;
                    continue;
                }
                return (j > pos + 1).then_some(j);
            }
            _ => j += 1,
        }
    }
    None
}

fn single_underscore_close(src: &str, pos: usize) -> Option<usize> {
    let close = find_closing(src, pos + 1, "_")?;
    if is_word_char(src[close + 1..].chars().next()) {
        return None;
    }
    Some(close)
}
