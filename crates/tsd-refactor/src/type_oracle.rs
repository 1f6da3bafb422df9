//! Host types flattened into plain descriptors.
//!
//! A `TypeDescriptor` is computed per query and owns everything a refactor
//! needs to know about a type. Properties are always enumerated before flags
//! are read: hosts may only populate object flags once a type's properties
//! have been requested.

use tracing::trace;
use tsd_checker::{HostType, TypeFlags};
use tsd_parser::NodeIndex;

use crate::project::SourceModelProvider;

/// Nesting limit when flattening union and intersection members.
const MAX_CONSTITUENT_DEPTH: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Object,
    Union,
    Intersection,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub kind: TypeKind,
    /// Property names in declaration order, getters and methods included.
    pub property_names: Vec<String>,
    /// Members of a union or intersection.
    pub constituents: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    pub fn from_host_type(host_type: &dyn HostType) -> TypeDescriptor {
        Self::describe(host_type, 0)
    }

    fn describe(host_type: &dyn HostType, depth: u32) -> TypeDescriptor {
        let property_names = host_type.property_names();
        let flags = host_type.flags();
        let kind = if flags.contains(TypeFlags::UNION) {
            TypeKind::Union
        } else if flags.contains(TypeFlags::INTERSECTION) {
            TypeKind::Intersection
        } else if flags.contains(TypeFlags::OBJECT) {
            TypeKind::Object
        } else {
            TypeKind::Other
        };
        let constituents = match kind {
            TypeKind::Union | TypeKind::Intersection if depth < MAX_CONSTITUENT_DEPTH => host_type
                .constituents()
                .iter()
                .map(|member| Self::describe(member.as_ref(), depth + 1))
                .collect(),
            _ => Vec::new(),
        };
        TypeDescriptor {
            kind,
            property_names,
            constituents,
        }
    }

    /// Whether a value of this type can be taken apart with an object
    /// binding pattern. Unions never can; intersections can when every
    /// member can.
    pub fn is_object_like(&self) -> bool {
        match self.kind {
            TypeKind::Object => true,
            TypeKind::Intersection => {
                !self.constituents.is_empty()
                    && self.constituents.iter().all(TypeDescriptor::is_object_like)
            }
            TypeKind::Union | TypeKind::Other => false,
        }
    }
}

/// Node types through the host's semantic model.
pub struct TypeOracle<'a> {
    host: &'a dyn SourceModelProvider,
}

impl<'a> TypeOracle<'a> {
    pub fn new(host: &'a dyn SourceModelProvider) -> Self {
        TypeOracle { host }
    }

    /// Type of `node`, or `None` when the host cannot type it.
    pub fn type_of(&self, file_name: &str, node: NodeIndex) -> Option<TypeDescriptor> {
        let host_type = self.host.type_at_node(file_name, node)?;
        let descriptor = TypeDescriptor::from_host_type(host_type.as_ref());
        trace!(
            file = file_name,
            node = node.0,
            ty = %host_type.type_to_string(),
            kind = ?descriptor.kind,
            "type descriptor"
        );
        Some(descriptor)
    }
}

#[cfg(test)]
mod type_oracle_tests {
    use super::*;
    use std::cell::Cell;

    /// Reports object flags only after its properties were enumerated.
    struct LazyObject {
        enumerated: Cell<bool>,
    }

    impl HostType for LazyObject {
        fn flags(&self) -> TypeFlags {
            if self.enumerated.get() {
                TypeFlags::OBJECT
            } else {
                TypeFlags::empty()
            }
        }

        fn property_names(&self) -> Vec<String> {
            self.enumerated.set(true);
            vec!["a".to_string(), "b".to_string()]
        }

        fn constituents(&self) -> Vec<Box<dyn HostType + '_>> {
            Vec::new()
        }

        fn type_to_string(&self) -> String {
            "Lazy".to_string()
        }
    }

    struct Composite {
        flags: TypeFlags,
        members: Vec<TypeFlags>,
    }

    struct Leaf(TypeFlags);

    impl HostType for Leaf {
        fn flags(&self) -> TypeFlags {
            self.0
        }
        fn property_names(&self) -> Vec<String> {
            Vec::new()
        }
        fn constituents(&self) -> Vec<Box<dyn HostType + '_>> {
            Vec::new()
        }
        fn type_to_string(&self) -> String {
            format!("{:?}", self.0)
        }
    }

    impl HostType for Composite {
        fn flags(&self) -> TypeFlags {
            self.flags
        }
        fn property_names(&self) -> Vec<String> {
            Vec::new()
        }
        fn constituents(&self) -> Vec<Box<dyn HostType + '_>> {
            self.members
                .iter()
                .map(|&flags| Box::new(Leaf(flags)) as Box<dyn HostType + '_>)
                .collect()
        }
        fn type_to_string(&self) -> String {
            "Composite".to_string()
        }
    }

    #[test]
    fn properties_are_enumerated_before_flags() {
        let lazy = LazyObject {
            enumerated: Cell::new(false),
        };
        let descriptor = TypeDescriptor::from_host_type(&lazy);
        assert_eq!(descriptor.kind, TypeKind::Object);
        assert_eq!(descriptor.property_names, ["a", "b"]);
        assert!(descriptor.is_object_like());
    }

    #[test]
    fn unions_are_never_object_like() {
        let union = Composite {
            flags: TypeFlags::UNION,
            members: vec![TypeFlags::OBJECT, TypeFlags::OBJECT],
        };
        let descriptor = TypeDescriptor::from_host_type(&union);
        assert_eq!(descriptor.kind, TypeKind::Union);
        assert_eq!(descriptor.constituents.len(), 2);
        assert!(!descriptor.is_object_like());
    }

    #[test]
    fn intersections_need_object_members() {
        let objects = Composite {
            flags: TypeFlags::INTERSECTION,
            members: vec![TypeFlags::OBJECT, TypeFlags::OBJECT],
        };
        assert!(TypeDescriptor::from_host_type(&objects).is_object_like());

        let mixed = Composite {
            flags: TypeFlags::INTERSECTION,
            members: vec![TypeFlags::OBJECT, TypeFlags::STRING],
        };
        assert!(!TypeDescriptor::from_host_type(&mixed).is_object_like());
    }

    #[test]
    fn arrays_and_functions_are_not_object_like() {
        assert!(!TypeDescriptor::from_host_type(&Leaf(TypeFlags::ARRAY)).is_object_like());
        assert!(!TypeDescriptor::from_host_type(&Leaf(TypeFlags::FUNCTION)).is_object_like());
        assert!(
            TypeDescriptor::from_host_type(&Leaf(TypeFlags::OBJECT | TypeFlags::FUNCTION))
                .is_object_like()
        );
    }
}
