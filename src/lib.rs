//! calcdown — dual-pane visual alignment engine
//!
//! Layout core for a calculation-markdown hybrid editor: a left source pane
//! holds editable text, a right preview pane shows computed results and
//! rendered markdown, and the two stay vertically synchronized row-for-row
//! even though each wraps independently at its own width.
//!
//! The crate is a pure, synchronous layout library. It consumes document
//! lines and per-line evaluation results (the calculation evaluator is an
//! external collaborator), and produces two equal-length, index-mapped
//! sequences of terminal rows plus scroll and edit-cursor positions. It
//! performs no terminal I/O and never parses or evaluates expressions.
//!
//! Entry points:
//! - [`session::Session`] owns a document and drives everything:
//!   `render_frame` is what a render loop calls each frame.
//! - [`layout::build_alignment`] is the underlying pure builder for callers
//!   managing their own state.
//! - [`render::PreviewRenderer`] is the seam to the markdown and
//!   calculation formatters.

pub mod config;
pub mod layout;
pub mod model;
pub mod primitives;
pub mod render;
pub mod session;

pub use config::Config;
pub use layout::{AlignmentModel, PreviewMode, RowKind, VisualRow};
pub use model::{BlockId, LineResult};
pub use session::{Frame, Mode, Session};
