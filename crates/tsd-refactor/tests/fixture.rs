//! Marked source fixtures.
//!
//! A single `#` marks a caret; two `#` mark a selection running from the
//! first marker to the second. Markers are removed from the parsed text.

#![allow(dead_code)]

use tsd_common::{FormatCodeSettings, PositionOrRange, TextRange};
use tsd_parser::{NodeIndex, SourceFile};
use tsd_refactor::text_changes::apply_text_changes;
use tsd_refactor::utils::find_child_containing_position;
use tsd_refactor::{
    Project, RefactorCatalog, RefactorContext, RefactorEditInfo, RefactorKind, SourceModelProvider,
};

pub const FILE_NAME: &str = "test.ts";

const MARKER: char = '#';

pub struct Fixture {
    pub project: Project,
    pub selection: PositionOrRange,
}

impl Fixture {
    /// Parse `marked`, dedented and trimmed, into a one-file project.
    pub fn new(marked: &str) -> Fixture {
        let marked = without_indent(marked);
        let first = marked.find(MARKER).expect("fixture has no marker");
        let last = marked.rfind(MARKER).expect("fixture has no marker");
        let selection = if first == last {
            PositionOrRange::Position(first as u32)
        } else {
            PositionOrRange::Range(TextRange::new(first as u32, last as u32 - 1))
        };
        let text = marked.replace(MARKER, "");

        let mut project = Project::new();
        project.set_file(FILE_NAME, text);
        Fixture { project, selection }
    }

    pub fn file(&self) -> &SourceFile {
        self.project.file(FILE_NAME).expect("fixture file")
    }

    pub fn text(&self) -> &str {
        self.file().text()
    }

    pub fn node(&self) -> Option<NodeIndex> {
        let file = self.file();
        find_child_containing_position(file.arena(), file.root(), self.selection.start())
    }

    pub fn can_apply(&self, kind: RefactorKind) -> bool {
        let catalog = RefactorCatalog::new();
        let refactor = catalog.get(kind).expect("registered refactor");
        let ctx = RefactorContext::new(&self.project);
        self.node()
            .is_some_and(|node| refactor.can_be_applied(&ctx, node, self.file(), self.selection))
    }

    /// Edits computed with an indent size of 2.
    pub fn edits(&self, kind: RefactorKind) -> Option<RefactorEditInfo> {
        let catalog = RefactorCatalog::new();
        let refactor = catalog.get(kind).expect("registered refactor");
        let ctx = RefactorContext::new(&self.project);
        refactor.apply(
            &ctx,
            self.file(),
            &FormatCodeSettings::with_indent_size(2),
            self.selection,
        )
    }

    /// The fixture text after applying `kind`; unchanged when it does not
    /// apply.
    pub fn apply(&self, kind: RefactorKind) -> String {
        match self.edits(kind) {
            Some(edits) => apply_edits(self.text(), &edits),
            None => self.text().to_string(),
        }
    }

    pub fn host(&self) -> &dyn SourceModelProvider {
        &self.project
    }
}

pub fn apply_edits(text: &str, edits: &RefactorEditInfo) -> String {
    apply_text_changes(text, edits.changes_for(FILE_NAME)).expect("edits within the text")
}

/// Strip the common leading indentation and surrounding blank space.
pub fn without_indent(text: &str) -> String {
    let base = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    text.lines()
        .map(|line| line.get(base..).unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
