//! Type representation.
//!
//! Types are interned: structurally equal types share one `TypeId`, and the
//! well-known intrinsics have fixed ids.

use smallvec::SmallVec;
use tsd_parser::NodeIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const ANY: TypeId = TypeId(0);
    pub const UNKNOWN: TypeId = TypeId(1);
    pub const NEVER: TypeId = TypeId(2);
    pub const VOID: TypeId = TypeId(3);
    pub const UNDEFINED: TypeId = TypeId(4);
    pub const NULL: TypeId = TypeId(5);
    pub const BOOLEAN: TypeId = TypeId(6);
    pub const NUMBER: TypeId = TypeId(7);
    pub const STRING: TypeId = TypeId(8);
    pub const BIGINT: TypeId = TypeId(9);
    pub const SYMBOL: TypeId = TypeId(10);
    /// The `object` keyword type
    pub const NON_PRIMITIVE: TypeId = TypeId(11);

    /// Number of ids reserved for intrinsics.
    pub(crate) const FIRST_USER: u32 = 12;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    Any,
    Unknown,
    Never,
    Void,
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    BigInt,
    Symbol,
    NonPrimitive,
}

impl IntrinsicKind {
    pub(crate) const ALL: [IntrinsicKind; 12] = [
        IntrinsicKind::Any,
        IntrinsicKind::Unknown,
        IntrinsicKind::Never,
        IntrinsicKind::Void,
        IntrinsicKind::Undefined,
        IntrinsicKind::Null,
        IntrinsicKind::Boolean,
        IntrinsicKind::Number,
        IntrinsicKind::String,
        IntrinsicKind::BigInt,
        IntrinsicKind::Symbol,
        IntrinsicKind::NonPrimitive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IntrinsicKind::Any => "any",
            IntrinsicKind::Unknown => "unknown",
            IntrinsicKind::Never => "never",
            IntrinsicKind::Void => "void",
            IntrinsicKind::Undefined => "undefined",
            IntrinsicKind::Null => "null",
            IntrinsicKind::Boolean => "boolean",
            IntrinsicKind::Number => "number",
            IntrinsicKind::String => "string",
            IntrinsicKind::BigInt => "bigint",
            IntrinsicKind::Symbol => "symbol",
            IntrinsicKind::NonPrimitive => "object",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    String(String),
    /// Numbers are kept as written so the key stays hashable
    Number(String),
    Boolean(bool),
}

impl LiteralValue {
    /// The primitive a literal widens to.
    pub fn widened(&self) -> TypeId {
        match self {
            LiteralValue::String(_) => TypeId::STRING,
            LiteralValue::Number(_) => TypeId::NUMBER,
            LiteralValue::Boolean(_) => TypeId::BOOLEAN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyInfo {
    pub name: String,
    pub type_id: TypeId,
    pub optional: bool,
}

impl PropertyInfo {
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
        PropertyInfo {
            name: name.into(),
            type_id,
            optional: false,
        }
    }
}

/// Properties in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ObjectShape {
    pub properties: Vec<PropertyInfo>,
}

impl ObjectShape {
    /// Add a property; a later property with the same name replaces the type
    /// of the earlier one but keeps its position.
    pub fn upsert(&mut self, property: PropertyInfo) {
        match self
            .properties
            .iter_mut()
            .find(|existing| existing.name == property.name)
        {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|property| property.name == name)
    }
}

pub type TypeList = SmallVec<[TypeId; 4]>;

/// Structural key of an interned type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Intrinsic(IntrinsicKind),
    Literal(LiteralValue),
    Object(ObjectShape),
    Array(TypeId),
    Tuple(TypeList),
    /// Callable type; only the return type is tracked
    Function { return_type: TypeId },
    /// `typeof C` for a class declaration: `prototype` plus static members
    Constructor(NodeIndex),
    Union(TypeList),
    Intersection(TypeList),
    /// Reference to an interface, type alias or class declaration, resolved
    /// on demand
    Lazy(NodeIndex),
}
