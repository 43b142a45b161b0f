//! Line scanner that classifies a document into typed blocks.
//!
//! Each line is tested against the block recognisers in a fixed order
//! (fenced code, heading, rule, table, list item, blockquote) and the first
//! match decides what the line starts. Runs of compatible lines are then
//! collected into one block. Everything else accumulates into paragraphs.

use super::escape;
use super::inline::{Inline, parse_spans};
use crate::utils::regex_cache::{
    BLOCKQUOTE_REGEX, BULLET_ITEM_REGEX, FENCE_OPEN_REGEX, HEADING_REGEX, HR_REGEX, ORDERED_ITEM_REGEX,
    TASK_ITEM_REGEX,
};

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    /// Fenced code; `code` is verbatim source text
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    List(List),
    /// Adjacent `>` lines, separated by [`Inline::LineBreak`]
    Blockquote(Vec<Inline>),
    Rule,
    Table(Table),
    /// Consecutive text lines, separated by [`Inline::LineBreak`]
    Paragraph(Vec<Inline>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
    /// Unordered list containing at least one checkbox item
    Task,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub kind: ListKind,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemMarker {
    Bullet,
    Ordered,
    Task { checked: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub marker: ItemMarker,
    /// Visual nesting depth derived from leading indentation (0, 1 or 2)
    pub indent: u8,
    pub content: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<Vec<Inline>>,
    pub rows: Vec<Vec<Vec<Inline>>>,
}

/// Scan a raw markdown document into blocks.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let source = escape::protect(&escape::normalize(markdown));
    let lines: Vec<&str> = source.split('\n').collect();
    let blocks = BlockScanner::new(&lines).scan();
    log::trace!("scanned {} lines into {} blocks", lines.len(), blocks.len());
    blocks
}

struct BlockScanner<'a> {
    lines: &'a [&'a str],
    pos: usize,
    blocks: Vec<Block>,
}

impl<'a> BlockScanner<'a> {
    fn new(lines: &'a [&'a str]) -> Self {
        Self {
            lines,
            pos: 0,
            blocks: Vec::new(),
        }
    }

    fn scan(mut self) -> Vec<Block> {
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos];
            if line.trim().is_empty() {
                self.pos += 1;
                continue;
            }

            if let Some(close) = self.fence_close(self.pos) {
                self.code_block(close);
            } else if let Some(block) = heading(line) {
                self.blocks.push(block);
                self.pos += 1;
            } else if is_rule(line) {
                self.blocks.push(Block::Rule);
                self.pos += 1;
            } else if self.is_table_start(self.pos) {
                self.table();
            } else if let Some(item) = list_item(line) {
                self.list(item);
            } else if BLOCKQUOTE_REGEX.is_match(line) {
                self.blockquote();
            } else {
                self.paragraph();
            }
        }
        self.blocks
    }

    /// Index of the closing fence for an opening fence at `start`, if both exist.
    fn fence_close(&self, start: usize) -> Option<usize> {
        if !FENCE_OPEN_REGEX.is_match(self.lines[start].trim()) {
            return None;
        }
        (start + 1..self.lines.len()).find(|&i| self.lines[i].trim_start().starts_with("```"))
    }

    fn code_block(&mut self, close: usize) {
        let open = self.lines[self.pos].trim();
        let language = FENCE_OPEN_REGEX
            .captures(open)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        let body = self.lines[self.pos + 1..close].join("\n");
        let code = escape::restore_verbatim(body.trim_start_matches('\n').trim_end());

        self.blocks.push(Block::CodeBlock { language, code });
        self.pos = close + 1;
    }

    fn is_table_start(&self, i: usize) -> bool {
        self.lines[i].contains('|') && self.lines.get(i + 1).is_some_and(|next| is_table_separator(next))
    }

    fn table(&mut self) {
        let header = split_cells(self.lines[self.pos]);
        let mut rows = Vec::new();
        self.pos += 2;
        while let Some(line) = self.lines.get(self.pos) {
            if line.trim().is_empty() || !line.contains('|') {
                break;
            }
            rows.push(split_cells(line));
            self.pos += 1;
        }
        self.blocks.push(Block::Table(Table { header, rows }));
    }

    fn list(&mut self, first: ListItem) {
        let ordered = first.marker == ItemMarker::Ordered;
        let mut items = vec![first];
        self.pos += 1;

        while let Some(line) = self.lines.get(self.pos) {
            match list_item(line) {
                Some(item) if (item.marker == ItemMarker::Ordered) == ordered => {
                    items.push(item);
                    self.pos += 1;
                }
                _ => break,
            }
        }

        let kind = if ordered {
            ListKind::Ordered
        } else if items.iter().any(|item| matches!(item.marker, ItemMarker::Task { .. })) {
            ListKind::Task
        } else {
            ListKind::Unordered
        };
        self.blocks.push(Block::List(List { kind, items }));
    }

    fn blockquote(&mut self) {
        let mut content = Vec::new();
        while let Some(caps) = self.lines.get(self.pos).and_then(|line| BLOCKQUOTE_REGEX.captures(line)) {
            if !content.is_empty() {
                content.push(Inline::LineBreak);
            }
            content.extend(parse_spans(caps[1].trim_end()));
            self.pos += 1;
        }
        self.blocks.push(Block::Blockquote(content));
    }

    fn paragraph(&mut self) {
        let mut content = Vec::new();
        while let Some(line) = self.lines.get(self.pos) {
            if line.trim().is_empty() || (!content.is_empty() && self.starts_block(self.pos)) {
                break;
            }
            if !content.is_empty() {
                content.push(Inline::LineBreak);
            }
            content.extend(parse_spans(line.trim()));
            self.pos += 1;
        }
        self.blocks.push(Block::Paragraph(content));
    }

    /// Whether the line at `i` would open a non-paragraph block.
    fn starts_block(&self, i: usize) -> bool {
        let line = self.lines[i];
        self.fence_close(i).is_some()
            || HEADING_REGEX.is_match(line)
            || is_rule(line)
            || self.is_table_start(i)
            || list_item(line).is_some()
            || BLOCKQUOTE_REGEX.is_match(line)
    }
}

fn heading(line: &str) -> Option<Block> {
    let caps = HEADING_REGEX.captures(line)?;
    Some(Block::Heading {
        level: caps[1].len() as u8,
        content: parse_spans(&caps[2]),
    })
}

fn is_rule(line: &str) -> bool {
    HR_REGEX.is_match(line.trim())
}

/// Indentation width with tabs counted as four columns.
fn indent_width(indent: &str) -> usize {
    indent.chars().map(|c| if c == '\t' { 4 } else { 1 }).sum()
}

fn indent_level(indent: &str) -> u8 {
    match indent_width(indent) {
        0..=3 => 0,
        4..=7 => 1,
        _ => 2,
    }
}

/// Classify a line as a list item. Checkbox items win over plain bullets.
fn list_item(line: &str) -> Option<ListItem> {
    if let Some(caps) = TASK_ITEM_REGEX.captures(line) {
        return Some(ListItem {
            marker: ItemMarker::Task {
                checked: &caps[2] != " ",
            },
            indent: indent_level(&caps[1]),
            content: parse_spans(caps.get(3).map_or("", |m| m.as_str()).trim_end()),
        });
    }

    let (marker, caps) = if let Some(caps) = ORDERED_ITEM_REGEX.captures(line) {
        (ItemMarker::Ordered, caps)
    } else {
        (ItemMarker::Bullet, BULLET_ITEM_REGEX.captures(line)?)
    };
    Some(ListItem {
        marker,
        indent: indent_level(&caps[1]),
        content: parse_spans(caps[2].trim_end()),
    })
}

/// A separator row holds only `-`, `:`, `|` and whitespace, with at least one `-` and one `|`.
fn is_table_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('|')
        && trimmed.contains('-')
        && trimmed.chars().all(|c| matches!(c, '-' | ':' | '|') || c.is_whitespace())
}

/// Split a row into cells, dropping the empty segments produced by outer pipes.
fn split_cells(line: &str) -> Vec<Vec<Inline>> {
    let mut segments: Vec<&str> = line.trim().split('|').collect();
    if segments.first().is_some_and(|s| s.trim().is_empty()) {
        segments.remove(0);
    }
    if segments.last().is_some_and(|s| s.trim().is_empty()) {
        segments.pop();
    }
    segments.into_iter().map(|cell| parse_spans(cell.trim())).collect()
}
