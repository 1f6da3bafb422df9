//! Destructuring refactors for TypeScript editor tooling.
//!
//! - `utils`: node lookup by offset and by selected range
//! - `type_oracle`: host types flattened into `TypeDescriptor`s
//! - `destructurability`: whether an identifier can be destructured
//! - `synthesis`: fresh binding patterns and declarations built from types
//! - `text_changes`: printed trees turned into text edits
//! - `refactors`: the refactor catalog
//! - `service`: the host-facing entry points
//! - `project`: an in-memory source model backed by `tsd-checker`

pub mod utils;

pub mod project;
pub use project::{Project, SourceModelProvider};

pub mod type_oracle;
pub use type_oracle::{TypeDescriptor, TypeKind, TypeOracle};

pub mod context;
pub use context::RefactorContext;

pub mod destructurability;
pub use destructurability::can_be_destructured;

pub mod synthesis;

pub mod text_changes;
pub use text_changes::{
    FileTextChanges, RefactorEditInfo, TextChange, TextChanger, create_text_edit,
};

pub mod refactors;
pub use refactors::{Refactor, RefactorActionInfo, RefactorCatalog, RefactorKind};

pub mod service;
pub use service::{ApplicableRefactorInfo, RefactorService};
