//! Word wrapping for a single document line
//!
//! Wraps one logical line into display segments that each fit a maximum
//! column width. Widths are unicode-aware (CJK and emoji count as two
//! columns) and the scan works on grapheme clusters so multi-codepoint
//! glyphs are never split.
//!
//! Breaking rules:
//! - Prefer to break after the last space seen in the current segment; the
//!   space stays on the earlier segment.
//! - With no space available, hard-break mid-token at the overflowing glyph.
//! - A single glyph wider than the limit is emitted alone on its own segment.
//! - A width of 0 disables wrapping entirely.
//!
//! Concatenating the returned segments always reconstructs the input text
//! exactly; nothing is dropped or inserted.

use unicode_segmentation::UnicodeSegmentation;

use crate::primitives::display_width::str_width;

/// Wrap `text` to segments of at most `max_width` display columns.
///
/// Always returns at least one segment: empty text yields one empty segment,
/// and `max_width == 0` yields the text unchanged as a single segment.
pub fn wrap_line(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }
    if text.is_empty() {
        return vec![String::new()];
    }

    let glyphs: Vec<&str> = text.graphemes(true).collect();
    let mut segments = Vec::new();

    // All indices below are glyph indices, not bytes.
    let mut start = 0;
    let mut width = 0;
    let mut last_space: Option<usize> = None;

    let mut i = 0;
    while i < glyphs.len() {
        let glyph = glyphs[i];
        let glyph_width = str_width(glyph);

        // Break before adding this glyph would overflow the limit. A glyph
        // at the segment start is always consumed, even if it is wider than
        // the limit on its own, so the loop cannot stall.
        if width + glyph_width > max_width && i > start {
            if let Some(space) = last_space {
                // Soft break: the space stays on the earlier segment.
                segments.push(glyphs[start..=space].concat());
                start = space + 1;
                // last_space was the last space seen, so the carried-over
                // glyphs in start..i contain none.
                width = glyphs[start..i].iter().map(|g| str_width(g)).sum();
                last_space = None;
                // The carried-over glyphs may already leave no room for this
                // glyph; re-check before consuming it.
                continue;
            }
            segments.push(glyphs[start..i].concat());
            start = i;
            width = 0;
            last_space = None;
        }

        if glyph == " " {
            last_space = Some(i);
        }
        width += glyph_width;
        i += 1;
    }

    // The final segment is non-empty: every break leaves at least the
    // overflowing glyph in the new segment.
    segments.push(glyphs[start..].concat());
    segments
}

/// Number of display rows `text` occupies at `max_width`.
#[inline]
pub fn wrapped_row_count(text: &str, max_width: usize) -> usize {
    wrap_line(text, max_width).len()
}

/// Locate a byte offset within wrapped segments.
///
/// Returns `(segment index, display column within that segment)` for the
/// glyph boundary at `byte_offset`. Offsets past the end of the text clamp to
/// the end of the last segment. Used to place the inline edit cursor on the
/// correct wrapped row.
pub fn position_in_segments(segments: &[String], byte_offset: usize) -> (usize, usize) {
    let mut remaining = byte_offset;
    for (idx, segment) in segments.iter().enumerate() {
        let is_last = idx == segments.len() - 1;
        if remaining < segment.len() || (is_last && remaining <= segment.len()) {
            let boundary = clamp_to_char_boundary(segment, remaining);
            return (idx, str_width(&segment[..boundary]));
        }
        remaining -= segment.len();
    }
    // Offset past the end of the text: clamp to the end of the last segment.
    match segments.last() {
        Some(last) => (segments.len() - 1, str_width(last)),
        None => (0, 0),
    }
}

fn clamp_to_char_boundary(s: &str, mut offset: usize) -> usize {
    offset = offset.min(s.len());
    while offset > 0 && !s.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
