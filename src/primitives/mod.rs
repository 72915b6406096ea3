//! Low-level text measurement and wrapping primitives

pub mod display_width;
pub mod line_wrapping;
