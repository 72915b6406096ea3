//! Preview rendering callbacks
//!
//! The layout engine never decides what a line's preview looks like; it asks
//! a [`PreviewRenderer`]. The trait is the seam to the real markdown and
//! calculation formatters, and [`PlainPreview`] is the dependency-free
//! fallback the tests use.

pub mod calc;
pub mod markdown;

use crate::model::LineResult;
use crate::primitives::line_wrapping::wrap_line;

pub use markdown::MarkdownPreview;

/// Renders document lines for the preview pane.
pub trait PreviewRenderer {
    /// Render a calculation line to one display string. The builder wraps
    /// the result itself, so implementations may ignore `width`.
    fn render_calc_line(&self, result: &LineResult, width: usize) -> String;

    /// Render a markdown line to already-wrapped display lines. An empty
    /// return is treated as one blank line by the builder.
    fn render_markdown(&self, text: &str, width: usize) -> Vec<String>;
}

/// Fallback renderer: calc lines via the standard formatter, markdown shown
/// as wrapped raw text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainPreview;

impl PreviewRenderer for PlainPreview {
    fn render_calc_line(&self, result: &LineResult, _width: usize) -> String {
        calc::format_calc_line(result)
    }

    fn render_markdown(&self, text: &str, width: usize) -> Vec<String> {
        wrap_line(text, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_preview_wraps_markdown_as_text() {
        let lines = PlainPreview.render_markdown("# a header that wraps", 10);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "# a header that wraps");
    }

    #[test]
    fn test_plain_preview_formats_calc() {
        let result = LineResult::calculation(0, "x = 10", Some("x"), Some("10"));
        assert_eq!(PlainPreview.render_calc_line(&result, 40), "x = 10");
    }
}
