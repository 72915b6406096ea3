//! Edit-mode overlay: live buffer substitution for one line
//!
//! While a line is being typed, the committed model still holds that line's
//! last evaluated state. Rendering from it would show stale text under the
//! user's fingers, so the overlay re-wraps the live edit buffer and splices
//! the result over the target line's rows in both panes:
//!
//! - the source pane gets the freshly wrapped buffer rows plus the inline
//!   cursor's wrapped (row, column) position;
//! - the preview pane keeps as many of its precomputed rows for that line as
//!   the buffer now occupies, blank-padded or truncated to the same count.
//!
//! Both panes change by the same delta, so the overlaid output is itself a
//! valid alignment model and the shared scroll offset keeps working.

use crate::layout::{AlignmentModel, RowKind, VisualRow};
use crate::primitives::line_wrapping::{position_in_segments, wrap_line};

/// Live editing state targeting one document line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditOverlay {
    /// Document line being edited
    pub line: usize,

    /// Current contents of the edit buffer
    pub buffer: String,

    /// Byte offset of the edit cursor within `buffer`
    pub cursor: usize,
}

impl EditOverlay {
    /// Start editing `line` with `buffer` seeded from the committed text,
    /// cursor at the end.
    pub fn new(line: usize, buffer: impl Into<String>) -> Self {
        let buffer = buffer.into();
        let cursor = buffer.len();
        Self { line, buffer, cursor }
    }
}

/// Splice the live buffer over the target line's rows.
///
/// Returns the overlaid model and the edit cursor's `(visual row, display
/// column)`, or the model unchanged (and no cursor) when the target line is
/// not in the model.
pub fn apply_edit_overlay(
    model: &AlignmentModel,
    overlay: &EditOverlay,
    source_width: usize,
) -> (AlignmentModel, Option<(usize, usize)>) {
    let Some(span) = model.row_span_of_line(overlay.line) else {
        return (model.clone(), None);
    };

    // Block/calc styling carries over from the committed rows.
    let template = &model.source_rows[span.start];
    let block = template.block;
    let is_calc = template.is_calculation;

    let segments = wrap_line(&overlay.buffer, source_width);
    let new_count = segments.len();
    let old_count = span.len();

    let total_rows = model.source_rows.len() - old_count + new_count;
    let mut source_rows = Vec::with_capacity(total_rows);
    let mut preview_rows = Vec::with_capacity(total_rows);

    source_rows.extend_from_slice(&model.source_rows[..span.start]);
    preview_rows.extend_from_slice(&model.preview_rows[..span.start]);

    for (row_idx, segment) in segments.iter().enumerate() {
        source_rows.push(VisualRow {
            content: segment.clone(),
            source_line: overlay.line,
            line_number: (row_idx == 0).then(|| overlay.line + 1),
            kind: if row_idx == 0 {
                RowKind::Cursor
            } else {
                RowKind::CursorContinuation
            },
            block,
            is_calculation: is_calc,
        });
        // Reuse the committed preview rows while they last; the buffer's
        // extra rows get blank padding, and extra preview rows are dropped.
        match model.preview_rows.get(span.start + row_idx) {
            Some(existing) if span.start + row_idx < span.end => {
                preview_rows.push(existing.clone())
            }
            _ => preview_rows.push(VisualRow::padding(overlay.line, block, is_calc)),
        }
    }

    source_rows.extend_from_slice(&model.source_rows[span.end..]);
    preview_rows.extend_from_slice(&model.preview_rows[span.end..]);

    // Shift every later line's first-row index by the row-count delta.
    let mut line_to_row = model.line_to_row.clone();
    for first_row in line_to_row.iter_mut().skip(overlay.line + 1) {
        *first_row = *first_row + new_count - old_count;
    }

    let mut row_to_line = Vec::with_capacity(source_rows.len());
    row_to_line.extend_from_slice(&model.row_to_line[..span.start]);
    row_to_line.extend(std::iter::repeat(overlay.line).take(new_count));
    row_to_line.extend_from_slice(&model.row_to_line[span.end..]);

    let overlaid = AlignmentModel {
        total_visual_lines: source_rows.len(),
        total_source_lines: model.total_source_lines,
        source_rows,
        preview_rows,
        line_to_row,
        row_to_line,
    };
    debug_assert!(overlaid.validate().is_ok());

    let (cursor_segment, cursor_col) = position_in_segments(&segments, overlay.cursor);
    tracing::trace!(
        "edit overlay on line {}: {} -> {} rows, cursor at row {} col {}",
        overlay.line,
        old_count,
        new_count,
        span.start + cursor_segment,
        cursor_col
    );
    (overlaid, Some((span.start + cursor_segment, cursor_col)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::builder::{build_alignment, LayoutParams, PreviewMode};
    use crate::model::LineResult;
    use crate::render::PlainPreview;

    fn base_model(lines: &[String], results: &[LineResult]) -> AlignmentModel {
        let params = LayoutParams {
            lines,
            results,
            source_width: 10,
            preview_width: 10,
            cursor_line: 1,
            preview_mode: PreviewMode::Plain,
        };
        build_alignment(&params, &PlainPreview)
    }

    fn doc(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_same_row_count_replaces_in_place() {
        let lines = doc(&["aaa", "bbb", "ccc"]);
        let model = base_model(&lines, &[]);
        let overlay = EditOverlay::new(1, "bbX");
        let (overlaid, cursor) = apply_edit_overlay(&model, &overlay, 10);

        overlaid.validate().unwrap();
        assert_eq!(overlaid.total_visual_lines, model.total_visual_lines);
        assert_eq!(overlaid.source_rows[1].content, "bbX");
        assert_eq!(overlaid.source_rows[1].kind, RowKind::Cursor);
        assert_eq!(cursor, Some((1, 3)));
    }

    #[test]
    fn test_buffer_growth_adds_rows_to_both_panes() {
        let lines = doc(&["aaa", "bbb", "ccc"]);
        let model = base_model(&lines, &[]);
        // Wraps to 3 rows at width 10
        let overlay = EditOverlay::new(1, "bbbbbbbbbb_bbbbbbbbbb_bbbb");
        let (overlaid, _) = apply_edit_overlay(&model, &overlay, 10);

        overlaid.validate().unwrap();
        assert_eq!(overlaid.total_visual_lines, model.total_visual_lines + 2);
        assert_eq!(overlaid.source_rows.len(), overlaid.preview_rows.len());
        // The two extra preview rows are blank padding
        assert_eq!(overlaid.preview_rows[2].kind, RowKind::Padding);
        assert_eq!(overlaid.preview_rows[3].kind, RowKind::Padding);
        // Following line shifted by 2 in the forward map
        assert_eq!(
            overlaid.first_row_of_line(2),
            model.first_row_of_line(2).map(|r| r + 2)
        );
    }

    #[test]
    fn test_buffer_shrink_discards_extra_preview_rows() {
        // Line 0 wraps to 3 rows at width 10; buffer shrinks it to 1
        let lines = doc(&["aaaaaaaaaa_aaaaaaaaaa_aaaa", "next"]);
        let model = base_model(&lines, &[]);
        assert_eq!(model.row_span_of_line(0), Some(0..3));

        let overlay = EditOverlay::new(0, "short");
        let (overlaid, cursor) = apply_edit_overlay(&model, &overlay, 10);

        overlaid.validate().unwrap();
        assert_eq!(overlaid.row_span_of_line(0), Some(0..1));
        assert_eq!(overlaid.total_visual_lines, model.total_visual_lines - 2);
        assert_eq!(cursor, Some((0, 5)));
    }

    #[test]
    fn test_cursor_lands_on_wrapped_row() {
        let lines = doc(&["aaa"]);
        let model = base_model(&lines, &[]);
        let mut overlay = EditOverlay::new(0, "aaaaaaaaaabb");
        overlay.cursor = 11; // second 'b', on the wrapped row
        let (_, cursor) = apply_edit_overlay(&model, &overlay, 10);
        assert_eq!(cursor, Some((1, 1)));
    }

    #[test]
    fn test_out_of_range_line_returns_model_unchanged() {
        let lines = doc(&["aaa"]);
        let model = base_model(&lines, &[]);
        let overlay = EditOverlay::new(9, "zzz");
        let (overlaid, cursor) = apply_edit_overlay(&model, &overlay, 10);
        assert_eq!(overlaid, model);
        assert_eq!(cursor, None);
    }

    #[test]
    fn test_preview_rows_reused_while_they_last() {
        let lines = doc(&["x = 1", "after"]);
        let results = vec![LineResult::calculation(0, "x = 1", Some("x"), Some("1"))];
        let model = base_model(&lines, &results);
        let preview_before = model.preview_rows[0].content.clone();

        let overlay = EditOverlay::new(0, "x = 12");
        let (overlaid, _) = apply_edit_overlay(&model, &overlay, 10);
        // Still one row; the stale preview stays visible until re-evaluation
        assert_eq!(overlaid.preview_rows[0].content, preview_before);
    }

    #[test]
    fn test_empty_buffer_keeps_one_row() {
        let lines = doc(&["hello", "world"]);
        let model = base_model(&lines, &[]);
        let overlay = EditOverlay {
            line: 0,
            buffer: String::new(),
            cursor: 0,
        };
        let (overlaid, cursor) = apply_edit_overlay(&model, &overlay, 10);
        overlaid.validate().unwrap();
        assert_eq!(overlaid.row_span_of_line(0), Some(0..1));
        assert_eq!(overlaid.source_rows[0].content, "");
        assert_eq!(cursor, Some((0, 0)));
    }
}
