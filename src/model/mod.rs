//! Input data model shared with the surrounding editor

pub mod line_result;

pub use line_result::{BlockId, LineResult};
