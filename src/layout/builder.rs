//! Alignment Builder: document snapshot -> aligned dual-pane rows
//!
//! Pure function of its inputs. The builder walks the document once, wraps
//! each line independently for both panes, and pads the shorter-wrapped side
//! per line so the two panes come out the same length. Padding per line (not
//! per document) is what keeps row `i` of both panes on the same document
//! line no matter how differently the panes wrap.

use crate::layout::{AlignmentModel, RowKind, VisualRow};
use crate::model::{BlockId, LineResult};
use crate::primitives::line_wrapping::wrap_line;
use crate::render::PreviewRenderer;

/// How the preview pane renders non-calculation lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PreviewMode {
    /// Markdown lines go through the markdown renderer
    #[default]
    Rendered,
    /// Markdown lines are shown as wrapped raw text
    Plain,
}

/// Everything the builder reads. One consistent snapshot, captured at call
/// time; the builder must not observe the document mid-mutation.
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams<'a> {
    /// Document lines, in order
    pub lines: &'a [String],

    /// Evaluation results indexed by line; entries beyond `lines.len()` are
    /// skipped, missing entries are treated as plain text
    pub results: &'a [LineResult],

    /// Content width of the source pane in columns (0 disables wrapping)
    pub source_width: usize,

    /// Content width of the preview pane in columns (0 disables wrapping)
    pub preview_width: usize,

    /// Line the cursor is on; out-of-range values mark nothing
    pub cursor_line: usize,

    /// Preview rendering mode
    pub preview_mode: PreviewMode,
}

/// Build the alignment model for one document snapshot.
///
/// Never fails: invalid inputs are absorbed by clamping and skipping, and an
/// empty document yields an empty, vacuously valid model.
pub fn build_alignment(params: &LayoutParams, renderer: &dyn PreviewRenderer) -> AlignmentModel {
    let mut model = AlignmentModel {
        total_source_lines: params.lines.len(),
        ..AlignmentModel::default()
    };

    for (line_idx, text) in params.lines.iter().enumerate() {
        // Results past the end of the document are skipped by construction
        // of this loop; a line without a result renders as plain text.
        let result = params.results.get(line_idx).filter(|r| r.line == line_idx);
        let block = result.map(|r| r.block).unwrap_or_default();
        let is_calc = result.map(|r| r.is_calculation).unwrap_or(false);

        let source_segments = wrap_line(text, params.source_width);
        let preview_segments = preview_segments(params, renderer, text, result);

        let row_count = source_segments.len().max(preview_segments.len());
        let on_cursor_line = line_idx == params.cursor_line;

        model.line_to_row.push(model.source_rows.len());

        for row_idx in 0..row_count {
            model.source_rows.push(pane_row(
                &source_segments,
                row_idx,
                line_idx,
                block,
                is_calc,
                on_cursor_line,
            ));
            // Cursor highlighting is a source-pane concept; the preview side
            // only mirrors the row structure.
            model.preview_rows.push(pane_row(
                &preview_segments,
                row_idx,
                line_idx,
                block,
                is_calc,
                false,
            ));
            model.row_to_line.push(line_idx);
        }
    }

    model.total_visual_lines = model.source_rows.len();
    tracing::trace!(
        "build_alignment: {} lines -> {} visual rows (source {}x, preview {}x)",
        model.total_source_lines,
        model.total_visual_lines,
        params.source_width,
        params.preview_width,
    );
    debug_assert!(model.validate().is_ok());
    model
}

/// Wrapped preview content for one line.
fn preview_segments(
    params: &LayoutParams,
    renderer: &dyn PreviewRenderer,
    text: &str,
    result: Option<&LineResult>,
) -> Vec<String> {
    if let Some(result) = result.filter(|r| r.is_calculation) {
        // Calc lines render to one styled string which wraps like any text.
        let rendered = renderer.render_calc_line(result, params.preview_width);
        return wrap_line(&rendered, params.preview_width);
    }
    match params.preview_mode {
        PreviewMode::Rendered => {
            // The markdown renderer wraps internally and returns final lines.
            let lines = renderer.render_markdown(text, params.preview_width);
            if lines.is_empty() {
                vec![String::new()]
            } else {
                lines
            }
        }
        PreviewMode::Plain => wrap_line(text, params.preview_width),
    }
}

/// One pane's row at `row_idx` within a line: a wrapped segment while they
/// last, padding after.
fn pane_row(
    segments: &[String],
    row_idx: usize,
    line_idx: usize,
    block: BlockId,
    is_calc: bool,
    on_cursor_line: bool,
) -> VisualRow {
    match segments.get(row_idx) {
        Some(segment) => VisualRow {
            content: segment.clone(),
            source_line: line_idx,
            line_number: (row_idx == 0).then(|| line_idx + 1),
            kind: match (row_idx == 0, on_cursor_line) {
                (true, false) => RowKind::Normal,
                (false, false) => RowKind::Continuation,
                (true, true) => RowKind::Cursor,
                (false, true) => RowKind::CursorContinuation,
            },
            block,
            is_calculation: is_calc,
        },
        None => VisualRow::padding(line_idx, block, is_calc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PlainPreview;

    fn lines(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    fn build(lines: &[String], results: &[LineResult], cursor: usize) -> AlignmentModel {
        let params = LayoutParams {
            lines,
            results,
            source_width: 40,
            preview_width: 40,
            cursor_line: cursor,
            preview_mode: PreviewMode::Plain,
        };
        build_alignment(&params, &PlainPreview)
    }

    #[test]
    fn test_one_row_per_short_line() {
        let doc = lines(&["# Header", "x = 10", "y = 20"]);
        let model = build(&doc, &[], 1);
        model.validate().unwrap();
        assert_eq!(model.total_visual_lines, 3);
        assert_eq!(model.line_to_row, vec![0, 1, 2]);
        assert_eq!(model.source_rows[1].kind, RowKind::Cursor);
        assert_eq!(model.source_rows[0].kind, RowKind::Normal);
    }

    #[test]
    fn test_wrapped_cursor_line_kinds() {
        let doc = vec!["a".repeat(45)];
        let params = LayoutParams {
            lines: &doc,
            results: &[],
            source_width: 20,
            preview_width: 20,
            cursor_line: 0,
            preview_mode: PreviewMode::Plain,
        };
        let model = build_alignment(&params, &PlainPreview);
        assert!(model.total_visual_lines > 2);
        assert_eq!(model.source_rows[0].kind, RowKind::Cursor);
        assert_eq!(model.source_rows[0].line_number, Some(1));
        for row in &model.source_rows[1..] {
            assert_eq!(row.kind, RowKind::CursorContinuation);
            assert_eq!(row.line_number, None);
        }
    }

    #[test]
    fn test_narrow_preview_pads_source_side() {
        let doc = lines(&["x = 1"]);
        // Renders as "x = 1.000", which must wrap at width 5
        let results = vec![LineResult::calculation(0, "x = 1", Some("x"), Some("1.000"))];
        let params = LayoutParams {
            lines: &doc,
            results: &results,
            source_width: 40,
            preview_width: 5,
            cursor_line: usize::MAX,
            preview_mode: PreviewMode::Plain,
        };
        let model = build_alignment(&params, &PlainPreview);
        model.validate().unwrap();
        assert_eq!(model.source_rows.len(), model.preview_rows.len());
        assert!(model.preview_rows.len() > 1, "preview should wrap at width 5");
        for row in &model.source_rows[1..] {
            assert_eq!(row.kind, RowKind::Padding);
            assert!(row.content.is_empty());
        }
    }

    #[test]
    fn test_empty_document() {
        let model = build(&[], &[], 0);
        model.validate().unwrap();
        assert_eq!(model.total_source_lines, 0);
        assert_eq!(model.total_visual_lines, 0);
    }

    #[test]
    fn test_out_of_range_cursor_marks_nothing() {
        let doc = lines(&["one", "two"]);
        let model = build(&doc, &[], 99);
        for row in &model.source_rows {
            assert!(!row.kind.is_cursor());
        }
    }

    #[test]
    fn test_stale_result_for_wrong_line_is_ignored() {
        let doc = lines(&["plain text"]);
        // Result claims line 5 but sits at index 0: treated as missing.
        let mut result = LineResult::calculation(5, "x = 1", Some("x"), Some("1"));
        result.block = BlockId(7);
        let model = build(&doc, &[result], 0);
        assert!(!model.source_rows[0].is_calculation);
        assert_eq!(model.source_rows[0].block, BlockId::default());
    }

    #[test]
    fn test_results_beyond_line_count_skipped() {
        let doc = lines(&["only line"]);
        let results = vec![
            LineResult::text(0, "only line"),
            LineResult::calculation(1, "ghost", None, Some("42")),
        ];
        let model = build(&doc, &results, 0);
        model.validate().unwrap();
        assert_eq!(model.total_source_lines, 1);
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let doc = lines(&["# Title", "a = 1 + 2", "some prose that wraps around the pane"]);
        let results = vec![
            LineResult::text(0, "# Title"),
            LineResult::calculation(1, "a = 1 + 2", Some("a"), Some("3")),
            LineResult::text(2, "some prose that wraps around the pane"),
        ];
        let first = build(&doc, &results, 1);
        let second = build(&doc, &results, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_error_result_renders_in_preview() {
        let doc = lines(&["x = oops"]);
        let results = vec![LineResult::failed(0, "x = oops", "unknown variable")];
        let model = build(&doc, &results, usize::MAX);
        assert!(model.preview_rows[0].content.contains("unknown variable"));
    }
}
