//! Structural type resolution for the tsd refactors.
//!
//! `Checker` computes interned structural types for nodes of one parsed
//! `SourceFile`. `CheckedType` wraps a checker result behind the `HostType`
//! trait, which is all a refactor ever sees of a type.

pub mod types;
pub use types::{IntrinsicKind, LiteralValue, ObjectShape, PropertyInfo, TypeId, TypeKey};

pub mod intern;
pub use intern::TypeInterner;

pub mod binder;

pub mod checker;
pub use checker::Checker;

pub mod host_type;
pub use host_type::{CheckedType, HostType, TypeFlags};
