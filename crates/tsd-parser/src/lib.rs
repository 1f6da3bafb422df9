//! Parser for the TypeScript subset the tsd refactors reason about.
//!
//! The output is an arena of nodes addressed by `NodeIndex`, with parent
//! links, token spans that exclude leading trivia, and kind-specific data.
//! Unsupported syntax is skipped with a `ParseDiagnostic`; parsing always
//! completes.

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod syntax_kind;
pub use syntax_kind::SyntaxKind;

pub mod scanner;

pub mod node;
pub use node::{Node, NodeArena, NodeData, NodeFlags};

pub mod parser;
pub use parser::{ParseDiagnostic, ParserState};

pub mod source_file;
pub use source_file::SourceFile;
