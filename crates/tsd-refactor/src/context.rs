//! Request context shared by every refactor.

use tsd_common::FormatCodeSettings;
use tsd_parser::{NodeIndex, SourceFile};

use crate::project::SourceModelProvider;
use crate::type_oracle::{TypeDescriptor, TypeOracle};

/// Read-only access to the host for the duration of one request.
#[derive(Clone, Copy)]
pub struct RefactorContext<'a> {
    host: &'a dyn SourceModelProvider,
}

impl<'a> RefactorContext<'a> {
    pub fn new(host: &'a dyn SourceModelProvider) -> Self {
        RefactorContext { host }
    }

    pub fn host(&self) -> &'a dyn SourceModelProvider {
        self.host
    }

    pub fn source_file(&self, file_name: &str) -> Option<&'a SourceFile> {
        self.host.source_file(file_name)
    }

    pub fn type_oracle(&self) -> TypeOracle<'a> {
        TypeOracle::new(self.host)
    }

    /// Type of `node` in `file`.
    pub fn type_of(&self, file: &SourceFile, node: NodeIndex) -> Option<TypeDescriptor> {
        self.type_oracle().type_of(file.file_name(), node)
    }

    /// Host preferences with the request's settings applied on top.
    pub fn format_settings(&self, overrides: &FormatCodeSettings) -> FormatCodeSettings {
        self.host.formatting_preferences().merged_with(overrides)
    }
}
