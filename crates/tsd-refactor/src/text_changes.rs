//! Printed trees turned into text edits.
//!
//! Every edit is computed against the current file text. Indentation is
//! taken from the line holding the anchor node, so inserted code lines up
//! with its neighbours.

use serde::{Deserialize, Serialize};
use tsd_common::{FormatCodeSettings, PositionOrRange, TextRange, TextSpan};
use tsd_emitter::{IndentationOptions, Printer, SynthNode};
use tsd_parser::{NodeIndex, SourceFile};

use crate::synthesis::FunctionBodyUpdate;
use crate::utils::get_line_indentation;

/// A single text change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextChange {
    /// The byte span to replace.
    pub span: TextSpan,
    /// The new text.
    pub new_text: String,
}

impl TextChange {
    pub fn new(span: TextSpan, new_text: impl Into<String>) -> Self {
        Self {
            span,
            new_text: new_text.into(),
        }
    }
}

/// Changes to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTextChanges {
    pub file_name: String,
    pub text_changes: Vec<TextChange>,
}

/// Result of applying a refactor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactorEditInfo {
    pub edits: Vec<FileTextChanges>,
}

impl RefactorEditInfo {
    /// Combine two results, keeping one entry per file.
    pub fn merge(mut self, other: RefactorEditInfo) -> RefactorEditInfo {
        for file_changes in other.edits {
            match self
                .edits
                .iter_mut()
                .find(|existing| existing.file_name == file_changes.file_name)
            {
                Some(existing) => existing.text_changes.extend(file_changes.text_changes),
                None => self.edits.push(file_changes),
            }
        }
        self
    }

    /// Changes for `file_name`, if any.
    pub fn changes_for(&self, file_name: &str) -> &[TextChange] {
        self.edits
            .iter()
            .find(|file_changes| file_changes.file_name == file_name)
            .map_or(&[], |file_changes| file_changes.text_changes.as_slice())
    }
}

/// One file change with one text change. A bare position becomes an
/// insertion point.
pub fn create_text_edit(
    file_name: &str,
    position_or_range: PositionOrRange,
    new_text: impl Into<String>,
) -> RefactorEditInfo {
    RefactorEditInfo {
        edits: vec![FileTextChanges {
            file_name: file_name.to_string(),
            text_changes: vec![TextChange::new(position_or_range.to_span(), new_text)],
        }],
    }
}

/// Apply non-overlapping changes to `text`. `None` when a span falls
/// outside the text or splits a character.
pub fn apply_text_changes(text: &str, changes: &[TextChange]) -> Option<String> {
    let mut ordered: Vec<&TextChange> = changes.iter().collect();
    ordered.sort_by(|a, b| {
        b.span
            .start
            .cmp(&a.span.start)
            .then(b.span.length.cmp(&a.span.length))
    });

    let mut result = text.to_string();
    for change in ordered {
        let start = change.span.start as usize;
        let end = change.span.end() as usize;
        if end > result.len() || !result.is_char_boundary(start) || !result.is_char_boundary(end) {
            return None;
        }
        result.replace_range(start..end, &change.new_text);
    }
    Some(result)
}

/// Edits that print synthesized trees in place of, or next to, source nodes.
pub struct TextChanger<'a> {
    file: &'a SourceFile,
    printer: Printer<'a>,
}

impl<'a> TextChanger<'a> {
    pub fn new(file: &'a SourceFile, format_options: &FormatCodeSettings) -> Self {
        TextChanger {
            file,
            printer: Printer::new(file, format_options),
        }
    }

    /// Replace `node` with `replacement`.
    pub fn replace_node(&self, node: NodeIndex, replacement: &SynthNode) -> Option<RefactorEditInfo> {
        let (pos, end) = self.bounds(node)?;
        let printed = self.printer.print_node_with_indentation(
            replacement,
            IndentationOptions::new(self.node_indentation(pos), false),
        );
        Some(self.edit(PositionOrRange::Range(TextRange::new(pos, end)), printed))
    }

    /// Replace a whole statement, keeping it on its line.
    pub fn replace_statement(
        &self,
        statement: NodeIndex,
        replacement: &SynthNode,
    ) -> Option<RefactorEditInfo> {
        self.replace_node(statement, replacement)
    }

    /// Insert `node` on a new line after `anchor`, at the anchor's
    /// indentation.
    pub fn insert_node_after(&self, anchor: NodeIndex, node: &SynthNode) -> Option<RefactorEditInfo> {
        let (pos, end) = self.bounds(anchor)?;
        let printed = self.printer.print_node_with_indentation(
            node,
            IndentationOptions::new(self.node_indentation(pos), true),
        );
        Some(self.edit(PositionOrRange::Position(end), format!("\n{printed}")))
    }

    /// Insert `node` on its own line before `anchor`, at the anchor's
    /// indentation.
    pub fn insert_node_before(&self, anchor: NodeIndex, node: &SynthNode) -> Option<RefactorEditInfo> {
        let (pos, _) = self.bounds(anchor)?;
        let indentation = self.node_indentation(pos);
        let printed = self
            .printer
            .print_node_with_indentation(node, IndentationOptions::new(indentation, false));
        Some(self.edit(
            PositionOrRange::Position(pos),
            format!("{printed}\n{}", Printer::indentation_string(indentation)),
        ))
    }

    /// Insert `node` as the first statement of `block`, right after its `{`.
    pub fn insert_at_block_start(&self, block: NodeIndex, node: &SynthNode) -> Option<RefactorEditInfo> {
        let (pos, _) = self.bounds(block)?;
        let base = self.node_indentation(pos) + self.printer.indent_size();
        let printed = self
            .printer
            .print_node_with_indentation(node, IndentationOptions::new(base, true));
        Some(self.edit(PositionOrRange::Position(pos + 1), format!("\n{printed}")))
    }

    pub fn update_function_body(&self, update: &FunctionBodyUpdate) -> Option<RefactorEditInfo> {
        match update {
            FunctionBodyUpdate::ReplaceBody { body, block } => self.replace_node(*body, block),
            FunctionBodyUpdate::InsertAtBodyStart { body, statement } => {
                self.insert_at_block_start(*body, statement)
            }
            FunctionBodyUpdate::ReplaceFunction {
                function,
                function_node,
            } => self.replace_node(*function, function_node),
        }
    }

    fn bounds(&self, node: NodeIndex) -> Option<(u32, u32)> {
        self.file.arena().get(node).map(|node| (node.pos, node.end))
    }

    fn node_indentation(&self, pos: u32) -> u32 {
        get_line_indentation(self.file.text(), pos)
    }

    fn edit(&self, position_or_range: PositionOrRange, new_text: String) -> RefactorEditInfo {
        create_text_edit(self.file.file_name(), position_or_range, new_text)
    }
}

#[cfg(test)]
mod text_changes_tests {
    use super::*;

    #[test]
    fn position_becomes_an_insertion_point() {
        let edit = create_text_edit("a.ts", PositionOrRange::Position(3), "x");
        assert_eq!(edit.edits.len(), 1);
        assert_eq!(edit.changes_for("a.ts"), [TextChange::new(TextSpan::new(3, 0), "x")]);
    }

    #[test]
    fn range_becomes_a_replacement_span() {
        let edit = create_text_edit("a.ts", PositionOrRange::Range(TextRange::new(2, 7)), "x");
        assert_eq!(edit.changes_for("a.ts")[0].span, TextSpan::new(2, 5));
    }

    #[test]
    fn merge_groups_by_file() {
        let merged = create_text_edit("a.ts", PositionOrRange::Position(0), "a")
            .merge(create_text_edit("b.ts", PositionOrRange::Position(0), "b"))
            .merge(create_text_edit("a.ts", PositionOrRange::Position(5), "c"));
        assert_eq!(merged.edits.len(), 2);
        assert_eq!(merged.changes_for("a.ts").len(), 2);
        assert!(merged.changes_for("c.ts").is_empty());
    }

    #[test]
    fn changes_apply_back_to_front() {
        let changes = [
            TextChange::new(TextSpan::new(0, 1), "first"),
            TextChange::new(TextSpan::new(4, 1), "second"),
        ];
        assert_eq!(apply_text_changes("a = b;", &changes).as_deref(), Some("first = second;"));
        assert_eq!(apply_text_changes("ab", &[TextChange::new(TextSpan::new(1, 5), "")]), None);
    }

    #[test]
    fn serializes_camel_case() {
        let edit = create_text_edit("a.ts", PositionOrRange::Position(1), "x");
        let json = serde_json::to_string(&edit).unwrap();
        assert_eq!(
            json,
            r#"{"edits":[{"fileName":"a.ts","textChanges":[{"span":{"start":1,"length":0},"newText":"x"}]}]}"#
        );
    }
}
