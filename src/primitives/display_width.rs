//! Display width helpers for terminal rendering
//!
//! All layout math in this crate works in terminal columns, not bytes or
//! chars. Double-width glyphs (CJK, most emoji) occupy two columns; combining
//! marks occupy zero.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a single character in terminal columns.
///
/// Control characters report zero width; the wrapper never emits them on
/// their own row, so this keeps the accumulators honest.
#[inline]
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Display width of a string in terminal columns.
#[inline]
pub fn str_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}
