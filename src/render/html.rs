//! HTML emission for scanned blocks.
//!
//! [`cleanup`] runs first and removes the artifacts a line scanner can leave
//! behind (dangling line breaks, empty paragraphs and blockquotes). [`HtmlWriter`] then walks
//! the blocks and writes one element per block, joined by newlines.

use super::block::{Block, ItemMarker, List, ListItem, ListKind, Table};
use super::inline::Inline;
use crate::config::Theme;
use itertools::Itertools;

/// Class attribute values for every element the writer emits.
///
/// An empty string means "no class attribute", and for purely decorative
/// wrappers it means the wrapper is not emitted at all.
#[derive(Debug)]
pub struct ClassNames {
    pub headings: [&'static str; 6],
    pub paragraph: &'static str,
    pub code_container: &'static str,
    pub code_accent: &'static str,
    pub code_label: &'static str,
    pub code_pre: &'static str,
    pub inline_code: &'static str,
    pub unordered_list: &'static str,
    pub ordered_list: &'static str,
    pub task_list: &'static str,
    pub list_item: &'static str,
    pub task_item: &'static str,
    pub list_indent: [&'static str; 3],
    pub checkbox_checked: &'static str,
    pub checkbox_unchecked: &'static str,
    pub strikethrough: &'static str,
    pub strong_emphasis: &'static str,
    pub strong: &'static str,
    pub emphasis: &'static str,
    pub link: &'static str,
    pub autolink: &'static str,
    pub image: &'static str,
    pub blockquote: &'static str,
    pub rule: &'static str,
    pub table_wrapper: &'static str,
    pub table: &'static str,
    pub table_row: &'static str,
    pub header_cell: &'static str,
    pub cell: &'static str,
}

pub static TAILWIND_CLASSES: ClassNames = ClassNames {
    headings: [
        "text-3xl font-bold mb-6 mt-4 bg-gradient-to-r from-purple-600 to-blue-600 bg-clip-text text-transparent",
        "text-2xl font-bold mb-4 mt-8 bg-gradient-to-r from-purple-600 to-blue-600 bg-clip-text text-transparent",
        "text-xl font-bold mb-3 mt-6 bg-gradient-to-r from-purple-600 to-blue-600 bg-clip-text text-transparent",
        "text-lg font-bold mb-3 mt-5 bg-gradient-to-r from-purple-600 to-blue-600 bg-clip-text text-transparent",
        "text-base font-bold mb-2 mt-4 bg-gradient-to-r from-purple-600 to-blue-600 bg-clip-text text-transparent",
        "text-sm font-bold mb-2 mt-4 bg-gradient-to-r from-purple-600 to-blue-600 bg-clip-text text-transparent",
    ],
    paragraph: "mb-4 text-gray-700 dark:text-gray-300 leading-relaxed",
    code_container: "relative bg-gray-900 rounded-lg p-4 my-4 overflow-x-auto border border-gray-700",
    code_accent: "absolute top-0 left-0 right-0 h-1 bg-gradient-to-r from-purple-500 to-blue-500",
    code_label: "text-xs text-gray-400 mb-2 font-mono",
    code_pre: "text-green-400 font-mono text-sm leading-relaxed",
    inline_code: "bg-gray-100 dark:bg-gray-800 text-purple-600 dark:text-purple-400 px-2 py-1 rounded text-sm font-mono border",
    unordered_list: "list-disc list-inside space-y-1 mb-4 ml-4 marker:text-purple-500",
    ordered_list: "list-decimal list-inside space-y-1 mb-4 ml-4 marker:text-purple-500 marker:font-bold",
    task_list: "list-none space-y-2 mb-4 ml-0",
    list_item: "mb-2 text-gray-700 dark:text-gray-300 leading-relaxed",
    task_item: "flex items-center",
    list_indent: ["", "ml-4", "ml-8"],
    checkbox_checked: "mr-2 text-purple-500",
    checkbox_unchecked: "mr-2",
    strikethrough: "text-gray-500 line-through",
    strong_emphasis: "font-bold italic text-blue-700 dark:text-blue-300",
    strong: "font-bold text-blue-700 dark:text-blue-300",
    emphasis: "italic text-purple-600 dark:text-purple-400",
    link: "text-blue-600 hover:text-blue-800 dark:text-blue-400 dark:hover:text-blue-300 underline hover:no-underline transition-all duration-200 font-medium",
    autolink: "text-blue-600 hover:text-blue-800 dark:text-blue-400 dark:hover:text-blue-300 underline",
    image: "max-w-full h-auto rounded-lg shadow-md my-4 border",
    blockquote: "border-l-4 border-purple-500 bg-purple-50 dark:bg-purple-900/20 pl-4 py-2 my-4 italic text-gray-700 dark:text-gray-300 rounded-r-lg",
    rule: "my-8 border-0 h-px bg-gradient-to-r from-transparent via-purple-500 to-transparent",
    table_wrapper: "overflow-x-auto my-6",
    table: "min-w-full bg-white dark:bg-gray-800 rounded-lg shadow-sm border border-gray-200 dark:border-gray-700",
    table_row: "hover:bg-gray-50 dark:hover:bg-gray-800 transition-colors",
    header_cell: "px-4 py-2 border-b border-gray-200 dark:border-gray-700 text-left text-sm font-semibold",
    cell: "px-4 py-2 border-b border-gray-200 dark:border-gray-700 text-sm",
};

pub static PLAIN_CLASSES: ClassNames = ClassNames {
    headings: [""; 6],
    paragraph: "",
    code_container: "",
    code_accent: "",
    code_label: "",
    code_pre: "",
    inline_code: "",
    unordered_list: "",
    ordered_list: "",
    task_list: "",
    list_item: "",
    task_item: "",
    list_indent: [""; 3],
    checkbox_checked: "",
    checkbox_unchecked: "",
    strikethrough: "",
    strong_emphasis: "",
    strong: "",
    emphasis: "",
    link: "",
    autolink: "",
    image: "",
    blockquote: "",
    rule: "",
    table_wrapper: "",
    table: "",
    table_row: "",
    header_cell: "",
    cell: "",
};

impl ClassNames {
    pub fn for_theme(theme: Theme) -> &'static ClassNames {
        match theme {
            Theme::Tailwind => &TAILWIND_CLASSES,
            Theme::Plain => &PLAIN_CLASSES,
        }
    }
}

/// Escape text for element content (`&`, `<`, `>`).
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape text for a double-quoted attribute value (`&`, `"`).
pub fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

fn class_attr(class: &str) -> String {
    if class.is_empty() {
        String::new()
    } else {
        format!(" class=\"{class}\"")
    }
}

fn combined_class(parts: &[&str]) -> String {
    class_attr(&parts.iter().filter(|p| !p.is_empty()).join(" "))
}

/// Remove dangling line breaks and drop blocks that would render empty.
pub fn cleanup(blocks: Vec<Block>) -> Vec<Block> {
    blocks
        .into_iter()
        .filter_map(|block| match block {
            Block::Paragraph(content) => {
                let content = trim_breaks(content);
                (!content.iter().all(Inline::is_blank)).then_some(Block::Paragraph(content))
            }
            Block::Blockquote(content) => {
                let content = trim_breaks(content);
                (!content.iter().all(Inline::is_blank)).then_some(Block::Blockquote(content))
            }
            other => Some(other),
        })
        .collect()
}

fn trim_breaks(mut content: Vec<Inline>) -> Vec<Inline> {
    while content.last() == Some(&Inline::LineBreak) {
        content.pop();
    }
    let leading = content.iter().take_while(|node| **node == Inline::LineBreak).count();
    content.drain(..leading);
    content
}

/// Writes blocks as HTML using one class palette.
pub struct HtmlWriter<'a> {
    classes: &'a ClassNames,
    show_code_language: bool,
}

impl<'a> HtmlWriter<'a> {
    pub fn new(classes: &'a ClassNames, show_code_language: bool) -> Self {
        Self {
            classes,
            show_code_language,
        }
    }

    /// Render every block, one per line.
    pub fn write(&self, blocks: &[Block]) -> String {
        blocks.iter().map(|block| self.block(block)).join("\n")
    }

    fn block(&self, block: &Block) -> String {
        let c = self.classes;
        match block {
            Block::Heading { level, content } => {
                let level = (*level).clamp(1, 6);
                format!(
                    "<h{level}{}>{}</h{level}>",
                    class_attr(c.headings[usize::from(level) - 1]),
                    self.inlines(content)
                )
            }
            Block::CodeBlock { language, code } => self.code_block(language.as_deref(), code),
            Block::List(list) => self.list(list),
            Block::Blockquote(content) => {
                format!("<blockquote{}>{}</blockquote>", class_attr(c.blockquote), self.inlines(content))
            }
            Block::Rule => format!("<hr{}>", class_attr(c.rule)),
            Block::Table(table) => self.table(table),
            Block::Paragraph(content) => format!("<p{}>{}</p>", class_attr(c.paragraph), self.inlines(content)),
        }
    }

    fn code_block(&self, language: Option<&str>, code: &str) -> String {
        let c = self.classes;
        let mut html = String::new();
        if !c.code_container.is_empty() {
            html.push_str(&format!("<div{}>", class_attr(c.code_container)));
        }
        if !c.code_accent.is_empty() {
            html.push_str(&format!("<div{}></div>", class_attr(c.code_accent)));
        }
        if let Some(language) = language.filter(|_| self.show_code_language) {
            html.push_str(&format!("<div{}>{}</div>", class_attr(c.code_label), escape_html(language)));
        }
        html.push_str(&format!("<pre{}><code>{}</code></pre>", class_attr(c.code_pre), escape_html(code)));
        if !c.code_container.is_empty() {
            html.push_str("</div>");
        }
        html
    }

    fn list(&self, list: &List) -> String {
        let c = self.classes;
        let (tag, class) = match list.kind {
            ListKind::Ordered => ("ol", c.ordered_list),
            ListKind::Unordered => ("ul", c.unordered_list),
            ListKind::Task => ("ul", c.task_list),
        };
        let items = list.items.iter().map(|item| self.list_item(item)).join("");
        format!("<{tag}{}>{items}</{tag}>", class_attr(class))
    }

    fn list_item(&self, item: &ListItem) -> String {
        let c = self.classes;
        let indent = c.list_indent[usize::from(item.indent.min(2))];
        let content = self.inlines(&item.content);
        match item.marker {
            ItemMarker::Task { checked } => {
                let (state, checkbox_class) = if checked {
                    (" checked", c.checkbox_checked)
                } else {
                    ("", c.checkbox_unchecked)
                };
                format!(
                    "<li{}><input type=\"checkbox\"{state} disabled{}> {content}</li>",
                    combined_class(&[c.list_item, indent, c.task_item]),
                    class_attr(checkbox_class)
                )
            }
            ItemMarker::Bullet | ItemMarker::Ordered => {
                format!("<li{}>{content}</li>", combined_class(&[c.list_item, indent]))
            }
        }
    }

    fn table(&self, table: &Table) -> String {
        let c = self.classes;
        let header = table
            .header
            .iter()
            .map(|cell| format!("<th{}>{}</th>", class_attr(c.header_cell), self.inlines(cell)))
            .join("");
        let rows = table
            .rows
            .iter()
            .map(|row| {
                let cells = row
                    .iter()
                    .map(|cell| format!("<td{}>{}</td>", class_attr(c.cell), self.inlines(cell)))
                    .join("");
                format!("<tr{}>{cells}</tr>", class_attr(c.table_row))
            })
            .join("");

        let table_html = format!(
            "<table{}><thead><tr{}>{header}</tr></thead><tbody>{rows}</tbody></table>",
            class_attr(c.table),
            class_attr(c.table_row)
        );
        if c.table_wrapper.is_empty() {
            table_html
        } else {
            format!("<div{}>{table_html}</div>", class_attr(c.table_wrapper))
        }
    }

    fn inlines(&self, nodes: &[Inline]) -> String {
        nodes.iter().map(|node| self.inline(node)).collect()
    }

    fn inline(&self, node: &Inline) -> String {
        let c = self.classes;
        match node {
            Inline::Text(text) => text.clone(),
            Inline::Code(code) => format!("<code{}>{}</code>", class_attr(c.inline_code), escape_html(code)),
            Inline::Strikethrough(inner) => format!("<del{}>{}</del>", class_attr(c.strikethrough), self.inlines(inner)),
            Inline::StrongEmphasis(inner) => format!(
                "<strong><em{}>{}</em></strong>",
                class_attr(c.strong_emphasis),
                self.inlines(inner)
            ),
            Inline::Strong(inner) => format!("<strong{}>{}</strong>", class_attr(c.strong), self.inlines(inner)),
            Inline::Emphasis(inner) => format!("<em{}>{}</em>", class_attr(c.emphasis), self.inlines(inner)),
            Inline::Link { text, url, title } => format!(
                "<a href=\"{}\"{}{}>{}</a>",
                escape_attr(url),
                title_attr(title.as_deref()),
                class_attr(c.link),
                self.inlines(text)
            ),
            Inline::Image { alt, url, title } => format!(
                "<img src=\"{}\" alt=\"{}\"{}{}>",
                escape_attr(url),
                escape_attr(alt),
                title_attr(title.as_deref()),
                class_attr(c.image)
            ),
            Inline::Autolink { url, label } => format!(
                "<a href=\"{}\"{}>{}</a>",
                escape_attr(url),
                class_attr(c.autolink),
                escape_html(label)
            ),
            Inline::LineBreak => "<br>".to_string(),
        }
    }
}

fn title_attr(title: Option<&str>) -> String {
    title.map(|t| format!(" title=\"{}\"", escape_attr(t))).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::block::parse_blocks;

    fn plain(markdown: &str) -> String {
        HtmlWriter::new(&PLAIN_CLASSES, true).write(&cleanup(parse_blocks(markdown)))
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_html("\"quoted\""), "\"quoted\"");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"a"b&c"#), "a&quot;b&amp;c");
    }

    #[test]
    fn test_plain_theme_has_no_classes() {
        let html = plain("# T\n\n*e* **s** `c`\n\n- a\n\n> q\n\n---");
        assert!(!html.contains("class="), "unexpected class in {html}");
    }

    const HEADING_ACCENT: &str = "bg-gradient-to-r from-purple-600 to-blue-600 bg-clip-text text-transparent";

    #[test]
    fn test_heading_accent_on_every_level() {
        for class in TAILWIND_CLASSES.headings {
            assert!(class.ends_with(HEADING_ACCENT));
        }
    }

    #[test]
    fn test_cleanup_trims_breaks() {
        let blocks = vec![
            Block::Paragraph(vec![Inline::LineBreak, Inline::Text("x".into()), Inline::LineBreak]),
            Block::Paragraph(vec![Inline::LineBreak, Inline::Text("  ".into())]),
        ];
        assert_eq!(cleanup(blocks), vec![Block::Paragraph(vec![Inline::Text("x".into())])]);
    }

    #[test]
    fn test_cleanup_drops_empty_blockquotes() {
        assert_eq!(plain(">"), "");
        assert_eq!(plain(">\n> \n>"), "");
        assert_eq!(plain("> \n> kept"), "<blockquote>kept</blockquote>");
    }

    #[test]
    fn test_code_block_plain() {
        assert_eq!(
            plain("```rust\nif a < b { }\n```"),
            "<div>rust</div><pre><code>if a &lt; b { }</code></pre>"
        );
    }

    #[test]
    fn test_code_language_hidden() {
        let html = HtmlWriter::new(&PLAIN_CLASSES, false).write(&parse_blocks("```rust\nx\n```"));
        assert_eq!(html, "<pre><code>x</code></pre>");
    }

    #[test]
    fn test_code_block_tailwind_wrapper() {
        let html = HtmlWriter::new(&TAILWIND_CLASSES, true).write(&parse_blocks("```\nx\n```"));
        assert!(html.starts_with(&format!("<div class=\"{}\">", TAILWIND_CLASSES.code_container)));
        assert!(html.ends_with("</code></pre></div>"));
        assert!(!html.contains(TAILWIND_CLASSES.code_label));
    }

    #[test]
    fn test_task_list_plain() {
        assert_eq!(
            plain("- [x] done\n- [ ] todo"),
            "<ul><li><input type=\"checkbox\" checked disabled> done</li><li><input type=\"checkbox\" disabled> todo</li></ul>"
        );
    }

    #[test]
    fn test_task_item_without_text() {
        assert_eq!(
            plain("- [x]\n- [ ] later"),
            "<ul><li><input type=\"checkbox\" checked disabled> </li><li><input type=\"checkbox\" disabled> later</li></ul>"
        );
    }

    #[test]
    fn test_indent_classes() {
        let html = HtmlWriter::new(&TAILWIND_CLASSES, true).write(&parse_blocks("- a\n    - b\n        - c"));
        assert!(html.contains(&format!("<li class=\"{} ml-4\">b</li>", TAILWIND_CLASSES.list_item)));
        assert!(html.contains(&format!("<li class=\"{} ml-8\">c</li>", TAILWIND_CLASSES.list_item)));
    }

    #[test]
    fn test_table_plain() {
        assert_eq!(
            plain("| A | B |\n|---|---|\n| 1 | 2 |"),
            "<table><thead><tr><th>A</th><th>B</th></tr></thead><tbody><tr><td>1</td><td>2</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_link_attributes_escaped() {
        assert_eq!(
            plain(r#"[x](/q?a=1&b=2 "Docs & more")"#),
            r#"<p><a href="/q?a=1&amp;b=2" title="Docs &amp; more">x</a></p>"#
        );
    }

    #[test]
    fn test_image_and_autolinks() {
        assert_eq!(
            plain("![a \"b\"](/i.png) <me@example.com> <https://example.com>"),
            "<p><img src=\"/i.png\" alt=\"a &quot;b&quot;\"> <a href=\"mailto:me@example.com\">me@example.com</a> <a href=\"https://example.com\">https://example.com</a></p>"
        );
    }

    #[test]
    fn test_blocks_join_with_newline() {
        assert_eq!(plain("# A\n\ntext\n\n---"), "<h1>A</h1>\n<p>text</p>\n<hr>");
    }
}
