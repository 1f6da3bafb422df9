//! Common types shared by every tsd crate.
//!
//! - Byte spans and the position-or-range selector used by refactor queries
//! - Line/column positions and the `LineMap` used for host-facing locations
//! - Format settings (indent size) supplied by the host

// Byte offsets and selections
pub mod span;
pub use span::{PositionOrRange, TextRange, TextSpan};

// Line/column conversion
pub mod position;
pub use position::{LineMap, Position, Range, line_start_of};

// Host formatting preferences
pub mod format;
pub use format::{DEFAULT_INDENT_SIZE, FormatCodeSettings};
