//! Viewport arithmetic in visual-row space
//!
//! The persisted scroll offset is always a visual row index, never a source
//! line index. Both panes render from the same offset, so the pane with more
//! wrapped rows in the window can never desynchronize the other.

use std::ops::Range;

use crate::layout::AlignmentModel;

/// Adjust `scroll_top` so the cursor's visual row stays inside
/// `[scroll_top, scroll_top + height)`.
///
/// The cursor line is translated through the forward map; a line missing
/// from the model (out of range, empty document) leaves the offset alone.
pub fn ensure_cursor_visible(
    model: &AlignmentModel,
    cursor_line: usize,
    scroll_top: usize,
    height: usize,
) -> usize {
    let Some(cursor_row) = model.first_row_of_line(cursor_line) else {
        return scroll_top;
    };
    if height == 0 {
        return scroll_top;
    }

    if cursor_row < scroll_top {
        // Cursor above the window: bring the window up to it.
        tracing::trace!(
            "scroll up: cursor row {} above window top {}",
            cursor_row,
            scroll_top
        );
        cursor_row
    } else if cursor_row >= scroll_top + height {
        // Cursor below the window: place it on the last visible row.
        let new_top = cursor_row + 1 - height;
        tracing::trace!(
            "scroll down: cursor row {} below window [{}, {})",
            cursor_row,
            scroll_top,
            scroll_top + height
        );
        new_top
    } else {
        scroll_top
    }
}

/// Visible `[start, end)` slice of the row sequences, clamped to
/// `[0, total)`.
pub fn visible_range(scroll_top: usize, height: usize, total: usize) -> Range<usize> {
    let start = scroll_top.min(total);
    let end = start.saturating_add(height).min(total);
    start..end
}
