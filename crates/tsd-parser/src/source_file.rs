//! Parsed source files.

use crate::base::NodeIndex;
use crate::node::NodeArena;
use crate::parser::{ParseDiagnostic, ParserState};
use std::sync::Arc;
use tracing::debug;

/// An immutable parsed file: text, node arena and parse diagnostics.
#[derive(Debug, Clone)]
pub struct SourceFile {
    file_name: String,
    text: Arc<str>,
    arena: NodeArena,
    root: NodeIndex,
    parse_diagnostics: Vec<ParseDiagnostic>,
}

impl SourceFile {
    pub fn parse(file_name: impl Into<String>, text: impl Into<Arc<str>>) -> SourceFile {
        let file_name = file_name.into();
        let text: Arc<str> = text.into();
        let mut parser = ParserState::new(&text);
        let root = parser.parse_source_file();
        let (arena, parse_diagnostics) = parser.into_parts();
        debug!(
            file = %file_name,
            nodes = arena.len(),
            diagnostics = parse_diagnostics.len(),
            "parsed source file"
        );
        SourceFile {
            file_name,
            text,
            arena,
            root,
            parse_diagnostics,
        }
    }

    #[inline]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    #[inline]
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn parse_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    /// Source text covered by a node; empty for an invalid index.
    pub fn node_text(&self, index: NodeIndex) -> &str {
        self.arena
            .get(index)
            .and_then(|node| self.text.get(node.pos as usize..node.end as usize))
            .unwrap_or("")
    }
}
