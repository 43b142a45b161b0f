use lessonmark_lib::config::Theme;
use lessonmark_lib::render::{Block, RenderOptions, Renderer, parse_blocks, render, render_optional};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn plain() -> Renderer {
    Renderer::new(RenderOptions {
        theme: Theme::Plain,
        show_code_language: true,
    })
}

#[test]
fn test_empty_and_absent_content() {
    assert_eq!(render(""), "");
    assert_eq!(render_optional(None), "");
}

#[test]
fn test_heading_levels_never_shortened() {
    let renderer = plain();
    for level in 1..=6 {
        let html = renderer.render(&format!("{} x", "#".repeat(level)));
        assert_eq!(html, format!("<h{level}>x</h{level}>"));
    }
}

#[test]
fn test_escapes_survive_every_block() {
    let renderer = plain();
    assert_eq!(renderer.render(r"# \*stars\*"), "<h1>*stars*</h1>");
    assert_eq!(renderer.render(r"- \_under\_"), "<ul><li>_under_</li></ul>");
    assert_eq!(renderer.render(r"> \[not a link\](x)"), "<blockquote>[not a link](x)</blockquote>");
    assert_eq!(renderer.render(r"\~\~keep\~\~"), "<p>~~keep~~</p>");
}

#[test]
fn test_mixed_list_kinds() {
    let html = plain().render("- [ ] read\n- [x] practice\n1. first\n2. second");
    assert_eq!(
        html,
        "<ul><li><input type=\"checkbox\" disabled> read</li><li><input type=\"checkbox\" checked disabled> practice</li></ul>\n<ol><li>first</li><li>second</li></ol>"
    );
}

#[test]
fn test_list_followed_by_paragraph_has_no_stray_break() {
    let html = plain().render("- a\n- b\nafter");
    assert_eq!(html, "<ul><li>a</li><li>b</li></ul>\n<p>after</p>");
}

#[test]
fn test_practice_task_sample() {
    let task = "## Task\n\nCompute `3 * 4` and **explain** why.\n\n---\n\n*Hint:* see <https://example.com/times>";
    let html = plain().render(task);
    assert_eq!(
        html,
        [
            "<h2>Task</h2>",
            "<p>Compute <code>3 * 4</code> and <strong>explain</strong> why.</p>",
            "<hr>",
            "<p><em>Hint:</em> see <a href=\"https://example.com/times\">https://example.com/times</a></p>",
        ]
        .join("\n")
    );
}

#[test]
fn test_blocks_are_exposed() {
    let blocks = parse_blocks("# T\n\n```\ncode\n```");
    assert!(matches!(blocks[0], Block::Heading { level: 1, .. }));
    assert!(matches!(blocks[1], Block::CodeBlock { .. }));
}

proptest! {
    #[test]
    fn render_never_panics(input in "\\PC*") {
        let _ = render(&input);
    }

    #[test]
    fn render_never_panics_on_markup_soup(input in "[-*_`~|\\\\\\[\\]()!<>#: a\n]{0,64}") {
        let _ = render(&input);
    }

    #[test]
    fn plain_text_is_one_paragraph(text in "[A-Za-z0-9][A-Za-z0-9 ,?]{0,40}") {
        let html = plain().render(&text);
        prop_assert_eq!(html, format!("<p>{}</p>", text.trim()));
    }

    #[test]
    fn whitespace_renders_nothing(input in "[ \t\r\n]{0,20}") {
        prop_assert_eq!(render(&input), "");
    }

    #[test]
    fn escape_tokens_never_leak(input in "[*_`a \\\\]{0,32}") {
        let html = render(&input);
        prop_assert!(!html.chars().any(|c| ('\u{FDD0}'..='\u{FDEF}').contains(&c)), "html contains a noncharacter in U+FDD0..=U+FDEF");
    }
}
