//! Printing for tsd refactors.
//!
//! Refactors never edit the source tree. They build fresh `SynthNode` trees,
//! which may point back at existing source nodes, and hand them to the
//! `Printer`, which renders them at a given base indentation.

pub mod synth;
pub use synth::{DeclarationKind, SynthNode};

pub mod printer;
pub use printer::{IndentationOptions, Printer};
