//! The dual-pane alignment model
//!
//! The split view shows the editable source text on the left and the
//! computed preview on the right. Each pane wraps its own content at its own
//! width, so one document line may occupy a different number of terminal
//! rows in each pane. The alignment model reconciles the two: both panes are
//! laid out as equal-length sequences of [`VisualRow`]s, padded per line so
//! that row `i` of the source pane and row `i` of the preview pane always
//! belong to the same document line.
//!
//! A model is a throwaway snapshot: it is built fresh (or served from the
//! single-slot cache) on each render request and discarded as soon as any
//! input changes. It is never mutated in place.

pub mod builder;
pub mod cache;
pub mod overlay;
pub mod scroll;

use anyhow::{bail, Result};

use crate::model::BlockId;

pub use builder::{build_alignment, LayoutParams, PreviewMode};
pub use cache::{LayoutCache, LayoutKey};
pub use overlay::{apply_edit_overlay, EditOverlay};
pub use scroll::{ensure_cursor_visible, visible_range};

/// What a visual row represents within its document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// First wrapped row of a line
    Normal,
    /// Second and subsequent wrapped rows of a line
    Continuation,
    /// Empty filler emitted when the other pane wrapped to more rows
    Padding,
    /// First wrapped row of the cursor line (source pane only)
    Cursor,
    /// Continuation row of the cursor line (source pane only)
    CursorContinuation,
}

impl RowKind {
    /// Whether this row belongs to the cursor line's highlight.
    pub fn is_cursor(self) -> bool {
        matches!(self, Self::Cursor | Self::CursorContinuation)
    }
}

/// One terminal row in either pane.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualRow {
    /// Text to draw for this row (already wrapped to the pane width)
    pub content: String,

    /// Document line this row belongs to
    pub source_line: usize,

    /// Line number shown in the gutter; `None` on continuation and padding
    /// rows so wrapped lines display a single number
    pub line_number: Option<usize>,

    /// Row classification used for cursor highlighting and styling
    pub kind: RowKind,

    /// Block the owning line belongs to (styling only)
    pub block: BlockId,

    /// Whether the owning line is a calculation (styling only)
    pub is_calculation: bool,
}

impl VisualRow {
    /// An empty padding row back-referencing `source_line`.
    pub fn padding(source_line: usize, block: BlockId, is_calculation: bool) -> Self {
        Self {
            content: String::new(),
            source_line,
            line_number: None,
            kind: RowKind::Padding,
            block,
            is_calculation,
        }
    }
}

/// The aligned layout of both panes for one document snapshot.
///
/// Invariants (see [`AlignmentModel::validate`]):
/// - `source_rows.len() == preview_rows.len() == total_visual_lines`
/// - `line_to_row` has an entry for every source line (forward coverage)
/// - `row_to_line` has an entry for every visual row (reverse coverage)
/// - `line_to_row` is strictly increasing (monotonicity)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignmentModel {
    /// Rows of the source (editable) pane
    pub source_rows: Vec<VisualRow>,

    /// Rows of the preview (computed) pane; index-aligned with `source_rows`
    pub preview_rows: Vec<VisualRow>,

    /// Forward map: source line index -> index of its first visual row
    pub line_to_row: Vec<usize>,

    /// Reverse map: visual row index -> source line index
    pub row_to_line: Vec<usize>,

    /// Number of document lines covered by this model
    pub total_source_lines: usize,

    /// Number of visual rows in each pane
    pub total_visual_lines: usize,
}

impl AlignmentModel {
    /// First visual row of a source line, if the line exists in this model.
    #[inline]
    pub fn first_row_of_line(&self, line: usize) -> Option<usize> {
        self.line_to_row.get(line).copied()
    }

    /// Source line owning a visual row, if the row exists in this model.
    #[inline]
    pub fn line_of_row(&self, row: usize) -> Option<usize> {
        self.row_to_line.get(row).copied()
    }

    /// Row span `[start, end)` occupied by a source line.
    pub fn row_span_of_line(&self, line: usize) -> Option<std::ops::Range<usize>> {
        let start = self.first_row_of_line(line)?;
        let end = self
            .line_to_row
            .get(line + 1)
            .copied()
            .unwrap_or(self.total_visual_lines);
        Some(start..end)
    }

    /// Check the named invariant set. Cheap enough for `debug_assert!` after
    /// every build; tests call it after every mutation.
    pub fn validate(&self) -> Result<()> {
        if self.source_rows.len() != self.preview_rows.len() {
            bail!(
                "length-match violated: {} source rows vs {} preview rows",
                self.source_rows.len(),
                self.preview_rows.len()
            );
        }
        if self.source_rows.len() != self.total_visual_lines {
            bail!(
                "total_visual_lines {} does not match row count {}",
                self.total_visual_lines,
                self.source_rows.len()
            );
        }
        if self.line_to_row.len() != self.total_source_lines {
            bail!(
                "forward coverage violated: {} entries for {} source lines",
                self.line_to_row.len(),
                self.total_source_lines
            );
        }
        if self.row_to_line.len() != self.total_visual_lines {
            bail!(
                "reverse coverage violated: {} entries for {} visual rows",
                self.row_to_line.len(),
                self.total_visual_lines
            );
        }
        for window in self.line_to_row.windows(2) {
            if window[0] >= window[1] {
                bail!(
                    "monotonicity violated: first-row indices {} then {}",
                    window[0],
                    window[1]
                );
            }
        }
        for (row, &line) in self.row_to_line.iter().enumerate() {
            if line >= self.total_source_lines {
                bail!("row {} references nonexistent line {}", row, line);
            }
        }
        Ok(())
    }
}
