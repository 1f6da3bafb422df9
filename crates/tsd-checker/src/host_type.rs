//! The host-facing view of a type.
//!
//! Refactors never see `TypeId`s. They see a `HostType`: structural flags, the
//! names of the type's properties and, for unions and intersections, the
//! member types. Reference types resolve lazily, so `flags()` on an
//! unresolved interface or alias reference is empty until `property_names()`
//! has been called once.

use crate::checker::Checker;
use crate::types::TypeId;
use bitflags::bitflags;
use once_cell::unsync::OnceCell;
use std::rc::Rc;

bitflags! {
    /// Structural classification of a type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u32 {
        const ANY = 1 << 0;
        const UNKNOWN = 1 << 1;
        const STRING = 1 << 2;
        const NUMBER = 1 << 3;
        const BOOLEAN = 1 << 4;
        const BIGINT = 1 << 5;
        const SYMBOL = 1 << 6;
        const NULL = 1 << 7;
        const UNDEFINED = 1 << 8;
        const VOID = 1 << 9;
        const NEVER = 1 << 10;
        /// The `object` keyword type
        const NON_PRIMITIVE = 1 << 11;
        const LITERAL = 1 << 12;
        /// Anonymous object types, interfaces and class instances
        const OBJECT = 1 << 13;
        const UNION = 1 << 14;
        const INTERSECTION = 1 << 15;
        const ARRAY = 1 << 16;
        const FUNCTION = 1 << 17;

        const PRIMITIVE = Self::STRING.bits()
            | Self::NUMBER.bits()
            | Self::BOOLEAN.bits()
            | Self::BIGINT.bits()
            | Self::SYMBOL.bits()
            | Self::NULL.bits()
            | Self::UNDEFINED.bits()
            | Self::VOID.bits();
    }
}

/// A type as seen by a semantic host.
pub trait HostType {
    fn flags(&self) -> TypeFlags;

    /// Property names in declaration order. Union members' properties are
    /// concatenated, not deduplicated.
    fn property_names(&self) -> Vec<String>;

    /// Member types of a union or intersection; empty otherwise.
    fn constituents(&self) -> Vec<Box<dyn HostType + '_>>;

    /// Printable form, for logs.
    fn type_to_string(&self) -> String;
}

/// `HostType` backed by the reference checker.
pub struct CheckedType<'a> {
    checker: Rc<Checker<'a>>,
    type_id: TypeId,
    property_names: OnceCell<Vec<String>>,
}

impl<'a> CheckedType<'a> {
    pub fn new(checker: Rc<Checker<'a>>, type_id: TypeId) -> Self {
        CheckedType {
            checker,
            type_id,
            property_names: OnceCell::new(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl HostType for CheckedType<'_> {
    fn flags(&self) -> TypeFlags {
        self.checker.type_flags(self.type_id)
    }

    fn property_names(&self) -> Vec<String> {
        self.property_names
            .get_or_init(|| {
                self.checker
                    .properties_of(self.type_id)
                    .into_iter()
                    .map(|property| property.name)
                    .collect()
            })
            .clone()
    }

    fn constituents(&self) -> Vec<Box<dyn HostType + '_>> {
        self.checker
            .constituents(self.type_id)
            .into_iter()
            .map(|member| {
                Box::new(CheckedType::new(Rc::clone(&self.checker), member))
                    as Box<dyn HostType + '_>
            })
            .collect()
    }

    fn type_to_string(&self) -> String {
        self.checker.type_to_string(self.type_id)
    }
}

impl std::fmt::Debug for CheckedType<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckedType")
            .field("type_id", &self.type_id)
            .field("type", &self.checker.type_to_string(self.type_id))
            .finish()
    }
}
