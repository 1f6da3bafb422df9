//! In-memory source model.
//!
//! Refactors reach source trees and types only through
//! `SourceModelProvider`. `Project` implements it over parsed files and the
//! reference checker, which is enough to drive the refactors end to end.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::debug;
use tsd_checker::{CheckedType, Checker, HostType};
use tsd_common::FormatCodeSettings;
use tsd_parser::{NodeIndex, SourceFile};

/// The host boundary: parsed files, types of their nodes and formatting
/// preferences.
pub trait SourceModelProvider {
    fn source_file(&self, file_name: &str) -> Option<&SourceFile>;

    /// Type of `node` in `file_name`; `None` when the host has no semantic
    /// model for the file or cannot type the node.
    fn type_at_node(&self, file_name: &str, node: NodeIndex) -> Option<Box<dyn HostType + '_>>;

    fn formatting_preferences(&self) -> FormatCodeSettings;
}

/// Parsed files keyed by name, plus the session's format settings.
#[derive(Default)]
pub struct Project {
    files: FxHashMap<String, SourceFile>,
    format_settings: FormatCodeSettings,
}

impl Project {
    /// Create a new empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file, parsing its text.
    pub fn set_file(&mut self, file_name: impl Into<String>, source_text: impl Into<String>) {
        let file_name = file_name.into();
        let file = SourceFile::parse(file_name.clone(), source_text.into());
        debug!(
            file = %file_name,
            diagnostics = file.parse_diagnostics().len(),
            "file set"
        );
        self.files.insert(file_name, file);
    }

    /// Remove a file from the project.
    pub fn remove_file(&mut self, file_name: &str) -> Option<SourceFile> {
        self.files.remove(file_name)
    }

    /// Fetch a file by name.
    pub fn file(&self, file_name: &str) -> Option<&SourceFile> {
        self.files.get(file_name)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn format_settings(&self) -> FormatCodeSettings {
        self.format_settings
    }

    pub fn set_format_settings(&mut self, settings: FormatCodeSettings) {
        self.format_settings = settings;
    }
}

impl SourceModelProvider for Project {
    fn source_file(&self, file_name: &str) -> Option<&SourceFile> {
        self.file(file_name)
    }

    fn type_at_node(&self, file_name: &str, node: NodeIndex) -> Option<Box<dyn HostType + '_>> {
        let file = self.files.get(file_name)?;
        let checker = Rc::new(Checker::new(file));
        let type_id = checker.type_at_node(node)?;
        Some(Box::new(CheckedType::new(checker, type_id)))
    }

    fn formatting_preferences(&self) -> FormatCodeSettings {
        self.format_settings
    }
}

#[cfg(test)]
mod project_tests {
    use super::*;

    #[test]
    fn files_can_be_replaced_and_removed() {
        let mut project = Project::new();
        project.set_file("a.ts", "const a = 1;\n");
        project.set_file("a.ts", "const b = 2;\n");
        assert_eq!(project.file("a.ts").map(SourceFile::text), Some("const b = 2;\n"));
        assert!(project.remove_file("a.ts").is_some());
        assert!(project.source_file("a.ts").is_none());
    }

    #[test]
    fn unknown_file_has_no_types() {
        let project = Project::new();
        assert!(project.type_at_node("missing.ts", NodeIndex(0)).is_none());
    }

    #[test]
    fn format_settings_are_reported() {
        let mut project = Project::new();
        assert_eq!(project.formatting_preferences().indent_size(), 4);
        project.set_format_settings(FormatCodeSettings::with_indent_size(2));
        assert_eq!(project.formatting_preferences().indent_size(), 2);
    }
}
