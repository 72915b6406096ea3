//! Editor session: document, cursor, mode, and the layout entry points
//!
//! One `Session` owns everything the alignment engine reads: the document
//! lines, the latest evaluation results, the cursor, the edit-mode state
//! machine, the revision counter, the single-slot layout cache, and the
//! visual-row scroll offset. Sessions are plain owned values, so tests and
//! multi-document setups stay isolated; there is no process-wide editor
//! state.
//!
//! The engine itself is pure; every mutation here just updates the snapshot
//! and bumps the revision so the next render rebuilds. All operations are
//! synchronous and run on the caller's thread.

use std::ops::Range;

use crate::layout::{
    apply_edit_overlay, ensure_cursor_visible, visible_range, AlignmentModel, EditOverlay,
    LayoutCache, LayoutKey, LayoutParams, PreviewMode, VisualRow,
};
use crate::model::LineResult;
use crate::render::PreviewRenderer;

/// Input mode of the session.
///
/// The command/key dispatcher of the surrounding editor reduces to this
/// two-state machine as far as layout is concerned: all it ever feeds the
/// engine is the cursor line and the live edit buffer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Mode {
    /// Navigating; the committed document is what renders
    #[default]
    Normal,
    /// One line is being typed; its live buffer overlays the committed rows
    Editing(EditOverlay),
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Aligned rows for both panes, with the edit overlay already applied
    pub model: AlignmentModel,

    /// Scroll offset in visual-row space, shared by both panes
    pub scroll_top: usize,

    /// Visible `[start, end)` slice of both row sequences
    pub visible: Range<usize>,

    /// Inline edit cursor as `(visual row, display column)`, when editing
    pub edit_cursor: Option<(usize, usize)>,
}

impl Frame {
    /// Source-pane rows inside the visible window.
    pub fn visible_source_rows(&self) -> &[VisualRow] {
        &self.model.source_rows[self.visible.clone()]
    }

    /// Preview-pane rows inside the visible window.
    pub fn visible_preview_rows(&self) -> &[VisualRow] {
        &self.model.preview_rows[self.visible.clone()]
    }
}

/// One open document plus all per-view state.
#[derive(Debug, Default)]
pub struct Session {
    lines: Vec<String>,
    results: Vec<LineResult>,
    cursor_line: usize,
    mode: Mode,
    preview_mode: PreviewMode,
    /// Bumped on every document mutation; part of the layout cache key
    revision: u64,
    /// Set between a mutation and the next `apply_results` call; the
    /// evaluator debounces outside this crate (~50ms) and the engine keeps
    /// rendering the stale results meanwhile
    results_stale: bool,
    cache: LayoutCache,
    /// Persisted scroll offset, always in visual-row space
    scroll_top: usize,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from document text, split on newlines.
    pub fn from_text(text: &str) -> Self {
        let lines = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n').map(str::to_string).collect()
        };
        tracing::debug!("session opened with {} lines", lines.len());
        Self {
            lines,
            ..Self::default()
        }
    }

    // --- document ---

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Current document revision (bumped on every mutation).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the stored results predate the latest mutation.
    pub fn results_stale(&self) -> bool {
        self.results_stale
    }

    /// Replace the whole text of one line. Out-of-range indices are ignored.
    /// Overwriting the line being edited exits edit mode: the live buffer no
    /// longer corresponds to the committed text under it.
    pub fn set_line(&mut self, index: usize, text: impl Into<String>) {
        if let Some(line) = self.lines.get_mut(index) {
            *line = text.into();
            if matches!(&self.mode, Mode::Editing(overlay) if overlay.line == index) {
                tracing::debug!("set_line {} while editing it, leaving edit mode", index);
                self.mode = Mode::Normal;
            }
            self.document_changed();
        }
    }

    /// Insert a new line at `index` (clamped to the end).
    pub fn insert_line(&mut self, index: usize, text: impl Into<String>) {
        let index = index.min(self.lines.len());
        self.lines.insert(index, text.into());
        if index <= self.cursor_line && self.lines.len() > 1 {
            // Keep the cursor on the same logical line when inserting above it
            self.cursor_line += 1;
        }
        if let Mode::Editing(overlay) = &mut self.mode {
            if index <= overlay.line {
                // The edit target shifted down; commit must not land the
                // buffer on the inserted line.
                overlay.line += 1;
            }
        }
        self.document_changed();
    }

    /// Delete the line at `index`. Out-of-range indices are ignored.
    pub fn delete_line(&mut self, index: usize) {
        if index >= self.lines.len() {
            return;
        }
        self.lines.remove(index);
        if index < self.cursor_line {
            self.cursor_line -= 1;
        }
        self.cursor_line = self.cursor_line.min(self.lines.len().saturating_sub(1));
        if matches!(self.mode, Mode::Editing(_)) {
            // The edit target may have shifted or vanished; bail out of
            // editing rather than overlay the wrong line.
            tracing::debug!("delete_line {} while editing, leaving edit mode", index);
            self.mode = Mode::Normal;
        }
        self.document_changed();
    }

    /// Install fresh evaluation results from the evaluator.
    pub fn apply_results(&mut self, results: Vec<LineResult>) {
        self.results = results;
        self.results_stale = false;
        // Results change what the preview shows, so the model must rebuild.
        self.revision += 1;
        self.cache.invalidate();
    }

    // --- cursor and mode ---

    pub fn cursor_line(&self) -> usize {
        self.cursor_line
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn preview_mode(&self) -> PreviewMode {
        self.preview_mode
    }

    pub fn set_preview_mode(&mut self, mode: PreviewMode) {
        self.preview_mode = mode;
        self.cache.invalidate();
    }

    /// Move the cursor to `line` (clamped). While editing, the live buffer
    /// is committed first and the overlay re-targets the new line.
    pub fn set_cursor_line(&mut self, line: usize) {
        let target = line.min(self.lines.len().saturating_sub(1));
        if matches!(self.mode, Mode::Editing(_)) {
            self.commit_edit();
            self.cursor_line = target;
            self.enter_edit();
        } else {
            self.cursor_line = target;
        }
        self.cache.invalidate();
    }

    pub fn move_cursor_up(&mut self) {
        self.set_cursor_line(self.cursor_line.saturating_sub(1));
    }

    pub fn move_cursor_down(&mut self) {
        self.set_cursor_line(self.cursor_line + 1);
    }

    /// Enter edit mode on the cursor line, seeding the buffer from the
    /// committed text. An empty document grows one empty line to edit.
    pub fn enter_edit(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
            self.cursor_line = 0;
            self.document_changed();
        }
        let text = self.lines[self.cursor_line].clone();
        tracing::debug!("enter edit on line {}", self.cursor_line);
        self.mode = Mode::Editing(EditOverlay::new(self.cursor_line, text));
        self.cache.invalidate();
    }

    /// Write the live buffer back to the document and return to normal mode.
    /// No-op outside edit mode.
    pub fn commit_edit(&mut self) {
        let Mode::Editing(overlay) = std::mem::take(&mut self.mode) else {
            return;
        };
        if let Some(line) = self.lines.get_mut(overlay.line) {
            *line = overlay.buffer;
        }
        self.document_changed();
    }

    /// Discard the live buffer and return to normal mode.
    pub fn cancel_edit(&mut self) {
        if matches!(self.mode, Mode::Editing(_)) {
            self.mode = Mode::Normal;
            self.cache.invalidate();
        }
    }

    // --- edit-buffer keystrokes ---

    /// Insert a character at the edit cursor. No-op outside edit mode.
    pub fn edit_insert_char(&mut self, ch: char) {
        if let Mode::Editing(overlay) = &mut self.mode {
            overlay.buffer.insert(overlay.cursor, ch);
            overlay.cursor += ch.len_utf8();
            self.keystroke();
        }
    }

    /// Delete the character before the edit cursor.
    pub fn edit_backspace(&mut self) {
        if let Mode::Editing(overlay) = &mut self.mode {
            if let Some(prev) = prev_char_boundary(&overlay.buffer, overlay.cursor) {
                overlay.buffer.remove(prev);
                overlay.cursor = prev;
                self.keystroke();
            }
        }
    }

    /// Delete the character at the edit cursor.
    pub fn edit_delete(&mut self) {
        if let Mode::Editing(overlay) = &mut self.mode {
            if overlay.cursor < overlay.buffer.len() {
                overlay.buffer.remove(overlay.cursor);
                self.keystroke();
            }
        }
    }

    pub fn edit_move_left(&mut self) {
        if let Mode::Editing(overlay) = &mut self.mode {
            if let Some(prev) = prev_char_boundary(&overlay.buffer, overlay.cursor) {
                overlay.cursor = prev;
                self.cache.invalidate();
            }
        }
    }

    pub fn edit_move_right(&mut self) {
        if let Mode::Editing(overlay) = &mut self.mode {
            if overlay.cursor < overlay.buffer.len() {
                let mut next = overlay.cursor + 1;
                while next < overlay.buffer.len() && !overlay.buffer.is_char_boundary(next) {
                    next += 1;
                }
                overlay.cursor = next;
                self.cache.invalidate();
            }
        }
    }

    pub fn edit_move_home(&mut self) {
        if let Mode::Editing(overlay) = &mut self.mode {
            overlay.cursor = 0;
            self.cache.invalidate();
        }
    }

    pub fn edit_move_end(&mut self) {
        if let Mode::Editing(overlay) = &mut self.mode {
            overlay.cursor = overlay.buffer.len();
            self.cache.invalidate();
        }
    }

    // --- layout ---

    /// The one entry point to the alignment model; the renderer and every
    /// other caller come through the cache here, so a cache hit on one path
    /// can never coexist with a stale recompute on another.
    pub fn layout(
        &mut self,
        source_width: usize,
        preview_width: usize,
        renderer: &dyn PreviewRenderer,
    ) -> &AlignmentModel {
        let params = LayoutParams {
            lines: &self.lines,
            results: &self.results,
            source_width,
            preview_width,
            cursor_line: self.cursor_line,
            preview_mode: self.preview_mode,
        };
        let key = LayoutKey::for_params(self.revision, &params);
        self.cache.get_or_build(key, &params, renderer)
    }

    /// Compose layout, edit overlay, and scrolling into one frame.
    ///
    /// The scroll offset is adjusted (in visual-row space) to keep the
    /// cursor's first row inside the window, then persisted for the next
    /// frame. Both panes share the returned offset.
    pub fn render_frame(
        &mut self,
        source_width: usize,
        preview_width: usize,
        height: usize,
        renderer: &dyn PreviewRenderer,
    ) -> Frame {
        let params = LayoutParams {
            lines: &self.lines,
            results: &self.results,
            source_width,
            preview_width,
            cursor_line: self.cursor_line,
            preview_mode: self.preview_mode,
        };
        let key = LayoutKey::for_params(self.revision, &params);
        let model = self.cache.get_or_build(key, &params, renderer);

        let (model, edit_cursor) = match &self.mode {
            Mode::Editing(overlay) => apply_edit_overlay(model, overlay, source_width),
            Mode::Normal => (model.clone(), None),
        };

        self.scroll_top = ensure_cursor_visible(&model, self.cursor_line, self.scroll_top, height);
        let visible = visible_range(self.scroll_top, height, model.total_visual_lines);

        Frame {
            model,
            scroll_top: self.scroll_top,
            visible,
            edit_cursor,
        }
    }

    /// Current scroll offset in visual-row space.
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    // --- internals ---

    fn document_changed(&mut self) {
        self.revision += 1;
        self.results_stale = true;
        self.cache.invalidate();
    }

    fn keystroke(&mut self) {
        // Edit-buffer keystrokes do not touch the committed document, but
        // the frame must refresh and the pending re-evaluation is now stale.
        self.revision += 1;
        self.results_stale = true;
        self.cache.invalidate();
    }
}

/// Byte index of the char boundary before `offset`, if any.
fn prev_char_boundary(s: &str, offset: usize) -> Option<usize> {
    if offset == 0 || offset > s.len() {
        return None;
    }
    let mut prev = offset - 1;
    while prev > 0 && !s.is_char_boundary(prev) {
        prev -= 1;
    }
    Some(prev)
}
