//! Markdown line flattening for the preview pane
//!
//! The document is line-oriented, so each markdown line renders
//! independently: the event stream from `pulldown-cmark` is flattened to
//! plain display text (markers stripped, bullets and quotes kept as
//! prefixes) and then wrapped to the pane width. Styling is the terminal
//! layer's job; this stays plain strings.

use pulldown_cmark::{Event, Parser, Tag};

use crate::model::LineResult;
use crate::primitives::line_wrapping::wrap_line;
use crate::render::{calc, PreviewRenderer};

/// Preview renderer backed by `pulldown-cmark`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownPreview;

impl PreviewRenderer for MarkdownPreview {
    fn render_calc_line(&self, result: &LineResult, _width: usize) -> String {
        calc::format_calc_line(result)
    }

    fn render_markdown(&self, text: &str, width: usize) -> Vec<String> {
        render_markdown_line(text, width)
    }
}

/// Flatten one markdown line and wrap it to `width` display lines.
pub fn render_markdown_line(text: &str, width: usize) -> Vec<String> {
    let mut flat = String::new();

    for event in Parser::new(text) {
        match event {
            Event::Start(Tag::Item) => flat.push_str("• "),
            Event::Start(Tag::BlockQuote(_)) => flat.push_str("> "),
            Event::Text(t) => flat.push_str(&t),
            Event::Code(t) => {
                flat.push('`');
                flat.push_str(&t);
                flat.push('`');
            }
            Event::SoftBreak | Event::HardBreak => flat.push(' '),
            Event::Rule => {
                let rule_width = if width == 0 { 3 } else { width };
                flat.push_str(&"─".repeat(rule_width));
            }
            _ => {}
        }
    }

    wrap_line(&flat, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_markers_stripped() {
        assert_eq!(render_markdown_line("# Header", 40), vec!["Header".to_string()]);
    }

    #[test]
    fn test_emphasis_markers_stripped() {
        assert_eq!(
            render_markdown_line("some *emphasized* and **bold** text", 80),
            vec!["some emphasized and bold text".to_string()]
        );
    }

    #[test]
    fn test_code_span_keeps_backticks() {
        assert_eq!(
            render_markdown_line("run `cargo doc` now", 80),
            vec!["run `cargo doc` now".to_string()]
        );
    }

    #[test]
    fn test_list_item_gets_bullet() {
        assert_eq!(
            render_markdown_line("- first thing", 80),
            vec!["• first thing".to_string()]
        );
    }

    #[test]
    fn test_blockquote_prefix() {
        assert_eq!(
            render_markdown_line("> quoted", 80),
            vec!["> quoted".to_string()]
        );
    }

    #[test]
    fn test_long_line_wraps_to_width() {
        let lines = render_markdown_line("a paragraph that is far too long for ten columns", 10);
        assert!(lines.len() > 2);
        for line in &lines {
            assert!(crate::primitives::display_width::str_width(line) <= 10);
        }
    }

    #[test]
    fn test_empty_line_renders_one_blank_row() {
        assert_eq!(render_markdown_line("", 40), vec![String::new()]);
    }

    #[test]
    fn test_rule_fills_width() {
        let lines = render_markdown_line("---", 10);
        assert_eq!(lines, vec!["─".repeat(10)]);
    }
}
