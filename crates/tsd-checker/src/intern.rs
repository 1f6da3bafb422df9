//! Type interner.

use crate::types::{IntrinsicKind, TypeId, TypeKey};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub struct TypeInterner {
    keys: Vec<TypeKey>,
    ids: FxHashMap<TypeKey, TypeId>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        TypeInterner::new()
    }
}

impl TypeInterner {
    pub fn new() -> Self {
        let mut interner = TypeInterner {
            keys: Vec::with_capacity(64),
            ids: FxHashMap::default(),
        };
        for kind in IntrinsicKind::ALL {
            interner.intern(TypeKey::Intrinsic(kind));
        }
        debug_assert_eq!(interner.keys.len() as u32, TypeId::FIRST_USER);
        interner
    }

    pub fn intern(&mut self, key: TypeKey) -> TypeId {
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = TypeId(self.keys.len() as u32);
        self.keys.push(key.clone());
        self.ids.insert(key, id);
        id
    }

    pub fn lookup(&self, id: TypeId) -> Option<&TypeKey> {
        self.keys.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod intern_tests {
    use super::*;
    use crate::types::{LiteralValue, ObjectShape, PropertyInfo};

    #[test]
    fn intrinsics_have_fixed_ids() {
        let interner = TypeInterner::new();
        assert_eq!(
            interner.lookup(TypeId::NUMBER),
            Some(&TypeKey::Intrinsic(IntrinsicKind::Number))
        );
        assert_eq!(
            interner.lookup(TypeId::NON_PRIMITIVE),
            Some(&TypeKey::Intrinsic(IntrinsicKind::NonPrimitive))
        );
    }

    #[test]
    fn structurally_equal_types_share_an_id() {
        let mut interner = TypeInterner::new();
        let shape = || ObjectShape {
            properties: vec![PropertyInfo::new("a", TypeId::NUMBER)],
        };
        let first = interner.intern(TypeKey::Object(shape()));
        let second = interner.intern(TypeKey::Object(shape()));
        assert_eq!(first, second);

        let literal = interner.intern(TypeKey::Literal(LiteralValue::Number("1".into())));
        assert_ne!(literal, first);
        assert_eq!(interner.len(), TypeId::FIRST_USER as usize + 2);
    }
}
