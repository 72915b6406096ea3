//! Per-line evaluation results consumed by the layout engine
//!
//! The calculation evaluator lives outside this crate. After each document
//! mutation it hands the session an ordered snapshot of `LineResult`s, one
//! per line; the alignment builder treats them as immutable input for the
//! duration of a render.

use serde::{Deserialize, Serialize};

/// Identifies a maximal run of consecutive lines sharing one identity
/// (calculation vs. text). Assigned by the evaluator, carried here only for
/// styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockId(pub u32);

/// Evaluation snapshot for one document line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineResult {
    /// Index of the document line this result belongs to
    pub line: usize,

    /// Raw source text of the line at evaluation time
    pub source: String,

    /// Whether the evaluator classified this line as a calculation
    pub is_calculation: bool,

    /// Variable name bound by the line, if any (`x = 10` binds `x`)
    pub variable: Option<String>,

    /// Formatted value of the calculation, if it evaluated successfully
    pub value: Option<String>,

    /// Evaluation error text, if the line failed to evaluate
    pub error: Option<String>,

    /// Block this line belongs to
    pub block: BlockId,

    /// Set when this line was re-evaluated in the most recent pass
    /// (used by styling to flash fresh results; ignored by layout)
    pub just_recomputed: bool,
}

impl LineResult {
    /// A plain (non-calculation) text line result.
    pub fn text(line: usize, source: impl Into<String>) -> Self {
        Self {
            line,
            source: source.into(),
            ..Self::default()
        }
    }

    /// A calculation line result with an optional binding and value.
    pub fn calculation(
        line: usize,
        source: impl Into<String>,
        variable: Option<&str>,
        value: Option<&str>,
    ) -> Self {
        Self {
            line,
            source: source.into(),
            is_calculation: true,
            variable: variable.map(str::to_string),
            value: value.map(str::to_string),
            ..Self::default()
        }
    }

    /// A calculation line result that failed to evaluate.
    pub fn failed(line: usize, source: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            line,
            source: source.into(),
            is_calculation: true,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}
