//! Structural type resolution over one source file.
//!
//! The checker answers "what is the type of this node" for the constructs
//! the destructuring refactors care about: declarations, binding patterns,
//! object literals, property access, calls and type annotations. It is not a
//! type checker: there is no assignability, no generics instantiation and no
//! control-flow narrowing. Anything it cannot type is `any`.
//!
//! Interface, class and alias references are interned as `TypeKey::Lazy` and
//! resolved the first time their properties are needed. Until then their
//! flags are empty.

use crate::binder::{Meaning, resolve_name};
use crate::host_type::TypeFlags;
use crate::intern::TypeInterner;
use crate::types::{
    IntrinsicKind, LiteralValue, ObjectShape, PropertyInfo, TypeId, TypeKey, TypeList,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::RefCell;
use tracing::{debug, trace};
use tsd_parser::node::FunctionData;
use tsd_parser::{NodeArena, NodeIndex, NodeList, SourceFile, SyntaxKind};

/// Nesting limit for structural walks over self-referential types.
const MAX_TYPE_DEPTH: u32 = 32;

pub struct Checker<'a> {
    file: &'a SourceFile,
    interner: RefCell<TypeInterner>,
    node_types: RefCell<FxHashMap<NodeIndex, TypeId>>,
    declared_types: RefCell<FxHashMap<NodeIndex, TypeId>>,
    resolved_references: RefCell<FxHashMap<NodeIndex, TypeId>>,
    resolving_declarations: RefCell<FxHashSet<NodeIndex>>,
    resolving_references: RefCell<FxHashSet<NodeIndex>>,
}

impl<'a> Checker<'a> {
    pub fn new(file: &'a SourceFile) -> Self {
        Checker {
            file,
            interner: RefCell::new(TypeInterner::new()),
            node_types: RefCell::default(),
            declared_types: RefCell::default(),
            resolved_references: RefCell::default(),
            resolving_declarations: RefCell::default(),
            resolving_references: RefCell::default(),
        }
    }

    pub fn file(&self) -> &'a SourceFile {
        self.file
    }

    #[inline]
    fn arena(&self) -> &'a NodeArena {
        self.file.arena()
    }

    // =========================================================================
    // Interning
    // =========================================================================

    pub fn intern(&self, key: TypeKey) -> TypeId {
        self.interner.borrow_mut().intern(key)
    }

    /// Structural key of a type; unknown ids read as `any`.
    pub fn lookup(&self, id: TypeId) -> TypeKey {
        self.interner
            .borrow()
            .lookup(id)
            .cloned()
            .unwrap_or(TypeKey::Intrinsic(IntrinsicKind::Any))
    }

    pub fn object(&self, shape: ObjectShape) -> TypeId {
        self.intern(TypeKey::Object(shape))
    }

    fn literal(&self, value: LiteralValue) -> TypeId {
        self.intern(TypeKey::Literal(value))
    }

    fn array(&self, element: TypeId) -> TypeId {
        self.intern(TypeKey::Array(element))
    }

    fn function(&self, return_type: TypeId) -> TypeId {
        self.intern(TypeKey::Function { return_type })
    }

    fn reference(&self, declaration: NodeIndex) -> TypeId {
        self.intern(TypeKey::Lazy(declaration))
    }

    /// Flattened, deduplicated union. `any` absorbs everything and `never`
    /// disappears.
    pub fn union(&self, types: impl IntoIterator<Item = TypeId>) -> TypeId {
        let mut members = TypeList::new();
        for id in types {
            match self.lookup(id) {
                TypeKey::Union(inner) => {
                    for member in inner {
                        push_unique(&mut members, member);
                    }
                }
                _ => push_unique(&mut members, id),
            }
        }
        members.retain(|member| *member != TypeId::NEVER);
        if members.contains(&TypeId::ANY) {
            return TypeId::ANY;
        }
        match members.as_slice() {
            [] => TypeId::NEVER,
            [single] => *single,
            _ => self.intern(TypeKey::Union(members)),
        }
    }

    pub fn intersection(&self, types: impl IntoIterator<Item = TypeId>) -> TypeId {
        let mut members = TypeList::new();
        for id in types {
            match self.lookup(id) {
                TypeKey::Intersection(inner) => {
                    for member in inner {
                        push_unique(&mut members, member);
                    }
                }
                _ => push_unique(&mut members, id),
            }
        }
        if members.contains(&TypeId::NEVER) {
            return TypeId::NEVER;
        }
        if members.contains(&TypeId::ANY) {
            return TypeId::ANY;
        }
        match members.as_slice() {
            [] => TypeId::UNKNOWN,
            [single] => *single,
            _ => self.intern(TypeKey::Intersection(members)),
        }
    }

    /// Literal types widen to their primitive, member-wise for unions.
    pub fn widen(&self, id: TypeId) -> TypeId {
        match self.lookup(id) {
            TypeKey::Literal(value) => value.widened(),
            TypeKey::Union(members) => self.union(members.into_iter().map(|m| self.widen(m))),
            _ => id,
        }
    }

    // =========================================================================
    // Entry point
    // =========================================================================

    /// Type of an identifier, expression, declaration or type node; `None`
    /// for nodes that have no type (statements, tokens, lists).
    pub fn type_at_node(&self, node: NodeIndex) -> Option<TypeId> {
        let kind = self.arena().kind(node)?;
        let type_id = match kind {
            SyntaxKind::Identifier => self.type_of_identifier(node),
            SyntaxKind::Parameter
            | SyntaxKind::VariableDeclaration
            | SyntaxKind::BindingElement
            | SyntaxKind::PropertyDeclaration
            | SyntaxKind::PropertySignature => self.type_of_declaration(node),
            _ if kind.is_expression() => self.type_of_expression(node),
            _ if kind.is_type_node() => self.type_from_type_node(node),
            _ => return None,
        };
        trace!(
            node = node.0,
            ?kind,
            ty = %self.type_to_string(type_id),
            "type at node"
        );
        Some(type_id)
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    fn type_of_identifier(&self, node: NodeIndex) -> TypeId {
        let arena = self.arena();
        let parent = arena.parent(node);
        let Some(parent_node) = arena.get(parent) else {
            return TypeId::ANY;
        };

        if declaration_name(arena, parent) == node {
            return self.type_of_declaration(parent);
        }

        match parent_node.kind {
            SyntaxKind::BindingElement => {
                // `{ key: name }`: the key denotes the source property
                let Some(data) = arena.get_binding_element(parent_node) else {
                    return TypeId::ANY;
                };
                if data.property_name == node {
                    return self.type_of_declaration(parent);
                }
                TypeId::ANY
            }
            SyntaxKind::PropertyAccessExpression => {
                let Some(data) = arena.get_access_expr(parent_node) else {
                    return TypeId::ANY;
                };
                if data.name_or_argument == node {
                    self.type_of_expression(parent)
                } else {
                    self.type_of_value_reference(node)
                }
            }
            SyntaxKind::TypeReference => self.type_from_type_node(parent),
            SyntaxKind::QualifiedName => TypeId::ANY,
            SyntaxKind::ExpressionWithTypeArguments => self.type_of_type_name(node),
            SyntaxKind::TypeQuery => self.type_of_value_reference(node),
            _ => self.type_of_value_reference(node),
        }
    }

    fn type_of_value_reference(&self, node: NodeIndex) -> TypeId {
        let arena = self.arena();
        let Some(name) = arena.identifier_text(node) else {
            return TypeId::ANY;
        };
        if name == "undefined" {
            return TypeId::UNDEFINED;
        }
        match resolve_name(arena, node, name, Meaning::Value) {
            Some(declaration) => self.type_of_declaration(declaration),
            None => {
                trace!(name, "unresolved value reference");
                TypeId::ANY
            }
        }
    }

    /// Type denoted by an identifier in type position.
    fn type_of_type_name(&self, node: NodeIndex) -> TypeId {
        let arena = self.arena();
        let Some(name) = arena.identifier_text(node) else {
            return TypeId::ANY;
        };
        match resolve_name(arena, node, name, Meaning::Type) {
            Some(declaration) => self.type_of_type_declaration(declaration),
            None => TypeId::ANY,
        }
    }

    fn type_of_type_declaration(&self, declaration: NodeIndex) -> TypeId {
        match self.arena().kind(declaration) {
            Some(
                SyntaxKind::InterfaceDeclaration
                | SyntaxKind::TypeAliasDeclaration
                | SyntaxKind::ClassDeclaration,
            ) => self.reference(declaration),
            Some(SyntaxKind::TypeParameter) => self.type_of_declaration(declaration),
            _ => TypeId::ANY,
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Declared or inferred type of a declaration node.
    pub fn type_of_declaration(&self, declaration: NodeIndex) -> TypeId {
        let cached = self.declared_types.borrow().get(&declaration).copied();
        if let Some(cached) = cached {
            return cached;
        }
        if !self.resolving_declarations.borrow_mut().insert(declaration) {
            trace!(node = declaration.0, "circular declaration type");
            return TypeId::ANY;
        }
        let type_id = self.compute_declared_type(declaration);
        self.resolving_declarations.borrow_mut().remove(&declaration);
        self.declared_types.borrow_mut().insert(declaration, type_id);
        type_id
    }

    fn compute_declared_type(&self, declaration: NodeIndex) -> TypeId {
        let arena = self.arena();
        let Some(node) = arena.get(declaration) else {
            return TypeId::ANY;
        };
        match node.kind {
            SyntaxKind::VariableDeclaration => {
                let Some(data) = arena.get_variable_declaration(node) else {
                    return TypeId::ANY;
                };
                if data.type_annotation.is_some() {
                    return self.type_from_type_node(data.type_annotation);
                }
                if let Some(loop_type) = self.loop_variable_type(declaration) {
                    return loop_type;
                }
                if data.initializer.is_some() {
                    return self.widen(self.type_of_expression(data.initializer));
                }
                TypeId::ANY
            }
            SyntaxKind::Parameter => {
                let Some(data) = arena.get_parameter(node) else {
                    return TypeId::ANY;
                };
                if data.type_annotation.is_some() {
                    return self.type_from_type_node(data.type_annotation);
                }
                if data.initializer.is_some() {
                    return self.widen(self.type_of_expression(data.initializer));
                }
                if data.dot_dot_dot_token {
                    return self.array(TypeId::ANY);
                }
                TypeId::ANY
            }
            SyntaxKind::BindingElement => self.type_of_binding_element(declaration),
            SyntaxKind::FunctionDeclaration
            | SyntaxKind::FunctionExpression
            | SyntaxKind::ArrowFunction
            | SyntaxKind::MethodDeclaration => match arena.get_function(node) {
                Some(data) => self.function(self.return_type_of(data)),
                None => TypeId::ANY,
            },
            SyntaxKind::Constructor => {
                let class = arena.parent(declaration);
                self.function(self.reference(class))
            }
            SyntaxKind::GetAccessor => match arena.get_function(node) {
                Some(data) => self.return_type_of(data),
                None => TypeId::ANY,
            },
            SyntaxKind::SetAccessor => arena
                .get_function(node)
                .and_then(|data| data.parameters.first())
                .map_or(TypeId::ANY, |parameter| self.type_of_declaration(parameter)),
            SyntaxKind::MethodSignature => match arena.get_signature(node) {
                Some(data) if data.type_annotation.is_some() => {
                    self.function(self.type_from_type_node(data.type_annotation))
                }
                _ => self.function(TypeId::ANY),
            },
            SyntaxKind::ClassDeclaration => self.intern(TypeKey::Constructor(declaration)),
            SyntaxKind::InterfaceDeclaration | SyntaxKind::TypeAliasDeclaration => {
                self.reference(declaration)
            }
            SyntaxKind::TypeParameter => match arena.get_type_parameter(node) {
                Some(data) if data.constraint.is_some() => {
                    self.type_from_type_node(data.constraint)
                }
                _ => TypeId::UNKNOWN,
            },
            SyntaxKind::PropertyDeclaration => {
                let Some(data) = arena.get_property_decl(node) else {
                    return TypeId::ANY;
                };
                if data.type_annotation.is_some() {
                    self.type_from_type_node(data.type_annotation)
                } else if data.initializer.is_some() {
                    self.widen(self.type_of_expression(data.initializer))
                } else {
                    TypeId::ANY
                }
            }
            SyntaxKind::PropertySignature => match arena.get_signature(node) {
                Some(data) if data.type_annotation.is_some() => {
                    self.type_from_type_node(data.type_annotation)
                }
                _ => TypeId::ANY,
            },
            SyntaxKind::PropertyAssignment => match arena.get_property_assignment(node) {
                Some(data) => self.widen(self.type_of_expression(data.initializer)),
                None => TypeId::ANY,
            },
            SyntaxKind::ShorthandPropertyAssignment => match arena.get_shorthand_property(node) {
                Some(data) => self.type_of_value_reference(data.name),
                None => TypeId::ANY,
            },
            _ => TypeId::ANY,
        }
    }

    /// `for (const x of xs)` and `for (const k in o)` variables.
    fn loop_variable_type(&self, declaration: NodeIndex) -> Option<TypeId> {
        let arena = self.arena();
        let list = arena.parent(declaration);
        let statement = arena.parent(list);
        let statement_node = arena.get(statement)?;
        let data = arena.get_for_in_of(statement_node)?;
        if data.initializer != list {
            return None;
        }
        match statement_node.kind {
            SyntaxKind::ForOfStatement => {
                let iterated = self.type_of_expression(data.expression);
                Some(self.element_type(iterated))
            }
            SyntaxKind::ForInStatement => Some(TypeId::STRING),
            _ => None,
        }
    }

    fn return_type_of(&self, data: &FunctionData) -> TypeId {
        if data.type_annotation.is_some() {
            return self.type_from_type_node(data.type_annotation);
        }
        if data.is_async || data.asterisk_token || data.body.is_none() {
            return TypeId::ANY;
        }
        if self.arena().kind(data.body) != Some(SyntaxKind::Block) {
            return self.widen(self.type_of_expression(data.body));
        }
        let mut returned = Vec::new();
        self.collect_return_expressions(data.body, &mut returned);
        if returned.is_empty() {
            return TypeId::VOID;
        }
        self.union(
            returned
                .into_iter()
                .map(|expression| self.widen(self.type_of_expression(expression))),
        )
    }

    fn collect_return_expressions(&self, node: NodeIndex, out: &mut Vec<NodeIndex>) {
        let arena = self.arena();
        for child in arena.children(node) {
            let Some(child_node) = arena.get(child) else {
                continue;
            };
            if child_node.kind.is_function_like() || child_node.kind == SyntaxKind::ClassDeclaration
            {
                continue;
            }
            if child_node.kind == SyntaxKind::ReturnStatement {
                if let Some(data) = arena.get_expr_statement(child_node) {
                    if data.expression.is_some() {
                        out.push(data.expression);
                    }
                }
                continue;
            }
            self.collect_return_expressions(child, out);
        }
    }

    // =========================================================================
    // Binding patterns
    // =========================================================================

    fn type_of_binding_element(&self, element: NodeIndex) -> TypeId {
        let arena = self.arena();
        let Some(data) = arena.get(element).and_then(|node| arena.get_binding_element(node))
        else {
            return TypeId::ANY;
        };
        let pattern = arena.parent(element);
        let Some(pattern_node) = arena.get(pattern) else {
            return TypeId::ANY;
        };
        let Some(pattern_data) = arena.get_binding_pattern(pattern_node) else {
            return TypeId::ANY;
        };
        let source = self.binding_source_type(pattern);

        let declared = match pattern_node.kind {
            SyntaxKind::ObjectBindingPattern if data.dot_dot_dot_token => {
                Some(self.object_rest_type(source, &pattern_data.elements, element))
            }
            SyntaxKind::ObjectBindingPattern => self
                .binding_element_key(element)
                .and_then(|key| self.property_type(source, &key)),
            SyntaxKind::ArrayBindingPattern => {
                let index = pattern_data
                    .elements
                    .iter()
                    .position(|candidate| candidate == element)
                    .unwrap_or_default();
                if data.dot_dot_dot_token {
                    Some(self.array_rest_type(source, index))
                } else {
                    self.indexed_element_type(source, index)
                }
            }
            _ => None,
        };

        match declared {
            Some(type_id) => type_id,
            None if data.initializer.is_some() => {
                self.widen(self.type_of_expression(data.initializer))
            }
            None => TypeId::ANY,
        }
    }

    /// Type being destructured by a binding pattern.
    fn binding_source_type(&self, pattern: NodeIndex) -> TypeId {
        let arena = self.arena();
        let owner = arena.parent(pattern);
        match arena.kind(owner) {
            Some(
                SyntaxKind::VariableDeclaration
                | SyntaxKind::Parameter
                | SyntaxKind::BindingElement,
            ) => self.type_of_declaration(owner),
            _ => TypeId::ANY,
        }
    }

    /// Source property a binding element reads: its explicit key, or its name.
    pub fn binding_element_key(&self, element: NodeIndex) -> Option<String> {
        let arena = self.arena();
        let data = arena.get_binding_element(arena.get(element)?)?;
        if data.property_name.is_some() {
            return self.property_key(data.property_name);
        }
        arena.identifier_text(data.name).map(str::to_string)
    }

    /// Remaining properties after the named elements of a pattern are taken.
    fn object_rest_type(&self, source: TypeId, elements: &NodeList, rest: NodeIndex) -> TypeId {
        if self.type_flags(source).contains(TypeFlags::ANY) {
            return TypeId::ANY;
        }
        let taken: Vec<String> = elements
            .iter()
            .filter(|&element| element != rest)
            .filter_map(|element| self.binding_element_key(element))
            .collect();
        let mut shape = ObjectShape::default();
        for property in self.properties_of(source) {
            if !taken.contains(&property.name) && shape.get(&property.name).is_none() {
                shape.properties.push(property);
            }
        }
        self.object(shape)
    }

    fn array_rest_type(&self, source: TypeId, index: usize) -> TypeId {
        match self.lookup(self.resolve(source)) {
            TypeKey::Array(_) => source,
            TypeKey::Tuple(members) => {
                self.intern(TypeKey::Tuple(members.iter().skip(index).copied().collect()))
            }
            _ => self.array(TypeId::ANY),
        }
    }

    fn indexed_element_type(&self, source: TypeId, index: usize) -> Option<TypeId> {
        match self.lookup(self.resolve(source)) {
            TypeKey::Array(element) => Some(element),
            TypeKey::Tuple(members) => Some(members.get(index).copied().unwrap_or(TypeId::UNDEFINED)),
            TypeKey::Intrinsic(IntrinsicKind::Any) => Some(TypeId::ANY),
            TypeKey::Intrinsic(IntrinsicKind::String) => Some(TypeId::STRING),
            _ => None,
        }
    }

    /// Element type produced by iterating a value of type `iterated`.
    fn element_type(&self, iterated: TypeId) -> TypeId {
        match self.lookup(self.resolve(iterated)) {
            TypeKey::Array(element) => element,
            TypeKey::Tuple(members) => self.union(members),
            TypeKey::Union(members) => {
                self.union(members.into_iter().map(|member| self.element_type(member)))
            }
            TypeKey::Intrinsic(IntrinsicKind::String) => TypeId::STRING,
            _ => TypeId::ANY,
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn type_of_expression(&self, expression: NodeIndex) -> TypeId {
        let cached = self.node_types.borrow().get(&expression).copied();
        if let Some(cached) = cached {
            return cached;
        }
        let type_id = self.compute_expression_type(expression);
        self.node_types.borrow_mut().insert(expression, type_id);
        type_id
    }

    fn compute_expression_type(&self, expression: NodeIndex) -> TypeId {
        let arena = self.arena();
        let Some(node) = arena.get(expression) else {
            return TypeId::ANY;
        };
        match node.kind {
            SyntaxKind::Identifier => self.type_of_identifier(expression),
            SyntaxKind::NumericLiteral => match arena.get_literal(node) {
                Some(data) => self.literal(LiteralValue::Number(data.value.clone())),
                None => TypeId::NUMBER,
            },
            SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral => {
                match arena.get_literal(node) {
                    Some(data) => self.literal(LiteralValue::String(data.value.clone())),
                    None => TypeId::STRING,
                }
            }
            SyntaxKind::TrueKeyword => self.literal(LiteralValue::Boolean(true)),
            SyntaxKind::FalseKeyword => self.literal(LiteralValue::Boolean(false)),
            SyntaxKind::NullKeyword => TypeId::NULL,
            SyntaxKind::ThisKeyword => self.this_type(expression),
            SyntaxKind::ObjectLiteralExpression => self.type_of_object_literal(expression),
            SyntaxKind::ArrayLiteralExpression => {
                let Some(data) = arena.get_literal_expr(node) else {
                    return self.array(TypeId::ANY);
                };
                if data.elements.is_empty() {
                    return self.array(TypeId::ANY);
                }
                let element = self.union(data.elements.iter().map(|element| {
                    match arena.get(element) {
                        Some(element_node) if element_node.kind == SyntaxKind::SpreadElement => {
                            let spread = arena
                                .get_wrapped_expr(element_node)
                                .map_or(TypeId::ANY, |d| self.type_of_expression(d.expression));
                            self.element_type(spread)
                        }
                        Some(element_node) if element_node.kind == SyntaxKind::OmittedExpression => {
                            TypeId::UNDEFINED
                        }
                        _ => self.widen(self.type_of_expression(element)),
                    }
                }));
                self.array(element)
            }
            SyntaxKind::ParenthesizedExpression
            | SyntaxKind::NonNullExpression
            | SyntaxKind::AwaitExpression
            | SyntaxKind::SpreadElement => match arena.get_wrapped_expr(node) {
                Some(data) => self.type_of_expression(data.expression),
                None => TypeId::ANY,
            },
            SyntaxKind::TypeOfExpression => TypeId::STRING,
            SyntaxKind::VoidExpression => TypeId::UNDEFINED,
            SyntaxKind::PrefixUnaryExpression => match arena.get_unary_expr(node) {
                Some(data) if data.operator == SyntaxKind::ExclamationToken => TypeId::BOOLEAN,
                Some(data) if data.operator == SyntaxKind::DeleteKeyword => TypeId::BOOLEAN,
                _ => TypeId::NUMBER,
            },
            SyntaxKind::PostfixUnaryExpression => TypeId::NUMBER,
            SyntaxKind::AsExpression => {
                let Some(data) = arena.get_as_expr(node) else {
                    return TypeId::ANY;
                };
                let keeps_expression_type = data.keyword == SyntaxKind::SatisfiesKeyword
                    || self.is_const_assertion(data.type_node);
                if keeps_expression_type {
                    self.type_of_expression(data.expression)
                } else {
                    self.type_from_type_node(data.type_node)
                }
            }
            SyntaxKind::PropertyAccessExpression => {
                let Some(data) = arena.get_access_expr(node) else {
                    return TypeId::ANY;
                };
                let Some(name) = arena.identifier_text(data.name_or_argument) else {
                    return TypeId::ANY;
                };
                let object = self.type_of_expression(data.expression);
                self.property_type(object, name).unwrap_or(TypeId::ANY)
            }
            SyntaxKind::ElementAccessExpression => {
                let Some(data) = arena.get_access_expr(node) else {
                    return TypeId::ANY;
                };
                let object = self.type_of_expression(data.expression);
                let Some(argument) = arena.get(data.name_or_argument) else {
                    return TypeId::ANY;
                };
                let Some(literal) = arena.get_literal(argument) else {
                    return TypeId::ANY;
                };
                if argument.kind == SyntaxKind::NumericLiteral {
                    if let Ok(index) = literal.value.parse::<usize>() {
                        if let Some(element) = self.indexed_element_type(object, index) {
                            return element;
                        }
                    }
                }
                self.property_type(object, &literal.value)
                    .unwrap_or(TypeId::ANY)
            }
            SyntaxKind::CallExpression | SyntaxKind::NewExpression => {
                let Some(data) = arena.get_call_expr(node) else {
                    return TypeId::ANY;
                };
                let callee = self.type_of_expression(data.expression);
                match self.lookup(callee) {
                    TypeKey::Function { return_type } => return_type,
                    TypeKey::Constructor(class) => self.reference(class),
                    _ => TypeId::ANY,
                }
            }
            SyntaxKind::FunctionExpression
            | SyntaxKind::ArrowFunction
            | SyntaxKind::ClassDeclaration => self.type_of_declaration(expression),
            SyntaxKind::BinaryExpression => self.type_of_binary_expression(expression),
            SyntaxKind::ConditionalExpression => match arena.get_conditional_expr(node) {
                Some(data) => self.union([
                    self.type_of_expression(data.when_true),
                    self.type_of_expression(data.when_false),
                ]),
                None => TypeId::ANY,
            },
            _ => TypeId::ANY,
        }
    }

    fn type_of_binary_expression(&self, expression: NodeIndex) -> TypeId {
        let arena = self.arena();
        let Some(data) = arena.get(expression).and_then(|node| arena.get_binary_expr(node))
        else {
            return TypeId::ANY;
        };
        match data.operator_token {
            SyntaxKind::EqualsToken | SyntaxKind::CommaToken | SyntaxKind::AmpersandAmpersandToken => {
                self.type_of_expression(data.right)
            }
            SyntaxKind::BarBarToken | SyntaxKind::QuestionQuestionToken => self.union([
                self.type_of_expression(data.left),
                self.type_of_expression(data.right),
            ]),
            SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::EqualsEqualsEqualsToken
            | SyntaxKind::ExclamationEqualsEqualsToken
            | SyntaxKind::InKeyword
            | SyntaxKind::InstanceOfKeyword => TypeId::BOOLEAN,
            SyntaxKind::PlusToken | SyntaxKind::PlusEqualsToken => {
                let is_string = |side: NodeIndex| {
                    self.type_flags(self.widen(self.type_of_expression(side)))
                        .contains(TypeFlags::STRING)
                };
                if is_string(data.left) || is_string(data.right) {
                    TypeId::STRING
                } else {
                    TypeId::NUMBER
                }
            }
            _ => TypeId::NUMBER,
        }
    }

    fn type_of_object_literal(&self, literal: NodeIndex) -> TypeId {
        let arena = self.arena();
        let Some(data) = arena.get(literal).and_then(|node| arena.get_literal_expr(node)) else {
            return TypeId::ANY;
        };
        let mut shape = ObjectShape::default();
        for element in data.elements.iter() {
            let Some(element_node) = arena.get(element) else {
                continue;
            };
            match element_node.kind {
                SyntaxKind::PropertyAssignment => {
                    let Some(property) = arena.get_property_assignment(element_node) else {
                        continue;
                    };
                    if let Some(name) = self.property_key(property.name) {
                        let type_id = self.type_of_declaration(element);
                        shape.upsert(PropertyInfo::new(name, type_id));
                    }
                }
                SyntaxKind::ShorthandPropertyAssignment => {
                    let Some(property) = arena.get_shorthand_property(element_node) else {
                        continue;
                    };
                    if let Some(name) = arena.identifier_text(property.name) {
                        let type_id = self.type_of_declaration(element);
                        shape.upsert(PropertyInfo::new(name, type_id));
                    }
                }
                SyntaxKind::SpreadAssignment => {
                    let Some(spread) = arena.get_wrapped_expr(element_node) else {
                        continue;
                    };
                    let spread_type = self.type_of_expression(spread.expression);
                    for property in self.properties_of(spread_type) {
                        shape.upsert(property);
                    }
                }
                SyntaxKind::MethodDeclaration | SyntaxKind::GetAccessor => {
                    let name = arena
                        .get_function(element_node)
                        .and_then(|function| self.property_key(function.name));
                    if let Some(name) = name {
                        shape.upsert(PropertyInfo::new(name, self.type_of_declaration(element)));
                    }
                }
                SyntaxKind::SetAccessor => {
                    let name = arena
                        .get_function(element_node)
                        .and_then(|function| self.property_key(function.name));
                    if let Some(name) = name {
                        if shape.get(&name).is_none() {
                            shape
                                .properties
                                .push(PropertyInfo::new(name, self.type_of_declaration(element)));
                        }
                    }
                }
                _ => {}
            }
        }
        self.object(shape)
    }

    /// Instance type of the nearest enclosing class, or `any`.
    fn this_type(&self, node: NodeIndex) -> TypeId {
        let arena = self.arena();
        let mut current = arena.parent(node);
        while let Some(current_node) = arena.get(current) {
            match current_node.kind {
                SyntaxKind::ClassDeclaration => return self.reference(current),
                SyntaxKind::FunctionDeclaration | SyntaxKind::FunctionExpression => {
                    return TypeId::ANY;
                }
                _ => current = current_node.parent,
            }
        }
        TypeId::ANY
    }

    fn is_const_assertion(&self, type_node: NodeIndex) -> bool {
        let arena = self.arena();
        arena
            .get(type_node)
            .and_then(|node| arena.get_type_ref(node))
            .and_then(|data| arena.identifier_text(data.type_name))
            == Some("const")
    }

    /// Text of a property name, including string/number computed keys.
    fn property_key(&self, name: NodeIndex) -> Option<String> {
        let arena = self.arena();
        let node = arena.get(name)?;
        if node.kind == SyntaxKind::ComputedPropertyName {
            let expression = arena.get_computed_property_name(node)?.expression;
            let expression_node = arena.get(expression)?;
            return match expression_node.kind {
                SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => {
                    arena.get_literal(expression_node).map(|data| data.value.clone())
                }
                _ => None,
            };
        }
        let text = arena.property_name_text(name)?;
        // Private names are not destructurable properties
        if text.is_empty() || text.starts_with('#') {
            return None;
        }
        Some(text.to_string())
    }

    // =========================================================================
    // Type nodes
    // =========================================================================

    pub fn type_from_type_node(&self, type_node: NodeIndex) -> TypeId {
        let cached = self.node_types.borrow().get(&type_node).copied();
        if let Some(cached) = cached {
            return cached;
        }
        let type_id = self.compute_type_from_type_node(type_node);
        self.node_types.borrow_mut().insert(type_node, type_id);
        type_id
    }

    fn compute_type_from_type_node(&self, type_node: NodeIndex) -> TypeId {
        let arena = self.arena();
        let Some(node) = arena.get(type_node) else {
            return TypeId::ANY;
        };
        match node.kind {
            SyntaxKind::AnyKeyword => TypeId::ANY,
            SyntaxKind::UnknownKeyword => TypeId::UNKNOWN,
            SyntaxKind::NeverKeyword => TypeId::NEVER,
            SyntaxKind::VoidKeyword => TypeId::VOID,
            SyntaxKind::UndefinedKeyword => TypeId::UNDEFINED,
            SyntaxKind::NullKeyword => TypeId::NULL,
            SyntaxKind::BooleanKeyword => TypeId::BOOLEAN,
            SyntaxKind::NumberKeyword => TypeId::NUMBER,
            SyntaxKind::StringKeyword => TypeId::STRING,
            SyntaxKind::BigIntKeyword => TypeId::BIGINT,
            SyntaxKind::SymbolKeyword => TypeId::SYMBOL,
            SyntaxKind::ObjectKeyword => TypeId::NON_PRIMITIVE,
            SyntaxKind::LiteralType => {
                let Some(data) = arena.get_literal_type(node) else {
                    return TypeId::ANY;
                };
                let Some(literal) = arena.get(data.literal) else {
                    return TypeId::ANY;
                };
                match literal.kind {
                    SyntaxKind::TrueKeyword => self.literal(LiteralValue::Boolean(true)),
                    SyntaxKind::FalseKeyword => self.literal(LiteralValue::Boolean(false)),
                    SyntaxKind::NumericLiteral => match arena.get_literal(literal) {
                        Some(value) => self.literal(LiteralValue::Number(value.value.clone())),
                        None => TypeId::NUMBER,
                    },
                    _ => match arena.get_literal(literal) {
                        Some(value) => self.literal(LiteralValue::String(value.value.clone())),
                        None => TypeId::STRING,
                    },
                }
            }
            SyntaxKind::TypeReference => self.type_from_type_reference(type_node),
            SyntaxKind::TypeLiteral => match arena.get_type_list(node) {
                Some(data) => self.object(self.members_shape(&data.members)),
                None => TypeId::ANY,
            },
            SyntaxKind::ArrayType => match arena.get_array_type(node) {
                Some(data) => self.array(self.type_from_type_node(data.element_type)),
                None => TypeId::ANY,
            },
            SyntaxKind::TupleType => match arena.get_type_list(node) {
                Some(data) => {
                    let members = data
                        .members
                        .iter()
                        .map(|member| self.type_from_type_node(member))
                        .collect();
                    self.intern(TypeKey::Tuple(members))
                }
                None => TypeId::ANY,
            },
            SyntaxKind::UnionType => match arena.get_composite_type(node) {
                Some(data) => self.union(
                    data.types
                        .iter()
                        .map(|member| self.type_from_type_node(member))
                        .collect::<Vec<_>>(),
                ),
                None => TypeId::ANY,
            },
            SyntaxKind::IntersectionType => match arena.get_composite_type(node) {
                Some(data) => self.intersection(
                    data.types
                        .iter()
                        .map(|member| self.type_from_type_node(member))
                        .collect::<Vec<_>>(),
                ),
                None => TypeId::ANY,
            },
            SyntaxKind::IndexedAccessType => {
                let Some(data) = arena.get_composite_type(node) else {
                    return TypeId::ANY;
                };
                let (Some(object), Some(index)) = (data.types.first(), data.types.nodes.get(1))
                else {
                    return TypeId::ANY;
                };
                let object = self.type_from_type_node(object);
                match self.lookup(self.type_from_type_node(*index)) {
                    TypeKey::Literal(LiteralValue::String(name)) => {
                        self.property_type(object, &name).unwrap_or(TypeId::ANY)
                    }
                    TypeKey::Intrinsic(IntrinsicKind::Number) => self.element_type(object),
                    _ => TypeId::ANY,
                }
            }
            SyntaxKind::ParenthesizedType => match arena.get_wrapped_type(node) {
                Some(data) => self.type_from_type_node(data.type_node),
                None => TypeId::ANY,
            },
            SyntaxKind::TypeOperator => match arena.get_wrapped_type(node) {
                Some(data) => match data.operator {
                    SyntaxKind::ReadonlyKeyword => self.type_from_type_node(data.type_node),
                    SyntaxKind::KeyOfKeyword => TypeId::STRING,
                    SyntaxKind::SymbolKeyword => TypeId::SYMBOL,
                    _ => TypeId::ANY,
                },
                None => TypeId::ANY,
            },
            SyntaxKind::FunctionType => match arena.get_function_type(node) {
                Some(data) if data.type_annotation.is_some() => {
                    self.function(self.type_from_type_node(data.type_annotation))
                }
                _ => self.function(TypeId::ANY),
            },
            SyntaxKind::TypeQuery => match arena.get_type_query(node) {
                Some(data) if arena.is_kind(data.expr_name, SyntaxKind::Identifier) => {
                    self.widen(self.type_of_value_reference(data.expr_name))
                }
                _ => TypeId::ANY,
            },
            _ => TypeId::ANY,
        }
    }

    fn type_from_type_reference(&self, reference: NodeIndex) -> TypeId {
        let arena = self.arena();
        let Some(data) = arena.get(reference).and_then(|node| arena.get_type_ref(node)) else {
            return TypeId::ANY;
        };
        let Some(name) = arena.identifier_text(data.type_name) else {
            return TypeId::ANY;
        };
        if name == "this" {
            return self.this_type(reference);
        }
        if let Some(declaration) = resolve_name(arena, reference, name, Meaning::Type) {
            return self.type_of_type_declaration(declaration);
        }
        let first_argument = data
            .type_arguments
            .as_ref()
            .and_then(NodeList::first)
            .map(|argument| self.type_from_type_node(argument));
        match name {
            "Array" | "ReadonlyArray" => self.array(first_argument.unwrap_or(TypeId::ANY)),
            "Function" => self.function(TypeId::ANY),
            _ => {
                trace!(name, "unresolved type reference");
                TypeId::ANY
            }
        }
    }

    /// Properties of an interface body or type literal.
    fn members_shape(&self, members: &NodeList) -> ObjectShape {
        let arena = self.arena();
        let mut shape = ObjectShape::default();
        for member in members.iter() {
            let Some(member_node) = arena.get(member) else {
                continue;
            };
            if !matches!(
                member_node.kind,
                SyntaxKind::PropertySignature | SyntaxKind::MethodSignature
            ) {
                continue;
            }
            let Some(data) = arena.get_signature(member_node) else {
                continue;
            };
            // Call and construct signatures have no name
            let Some(name) = self.property_key(data.name) else {
                continue;
            };
            shape.upsert(PropertyInfo {
                name,
                type_id: self.type_of_declaration(member),
                optional: data.question_token,
            });
        }
        shape
    }

    // =========================================================================
    // Reference resolution
    // =========================================================================

    /// Follow a lazy reference to its structural type. Non-references are
    /// returned unchanged; circular references resolve to `any`.
    pub fn resolve(&self, id: TypeId) -> TypeId {
        match self.lookup(id) {
            TypeKey::Lazy(declaration) => self.resolve_declaration(declaration),
            _ => id,
        }
    }

    fn resolve_declaration(&self, declaration: NodeIndex) -> TypeId {
        let cached = self.resolved_references.borrow().get(&declaration).copied();
        if let Some(cached) = cached {
            return cached;
        }
        if !self.resolving_references.borrow_mut().insert(declaration) {
            trace!(node = declaration.0, "circular type reference");
            return TypeId::ANY;
        }
        let arena = self.arena();
        let resolved = match arena.kind(declaration) {
            Some(SyntaxKind::InterfaceDeclaration) => self.interface_type(declaration),
            Some(SyntaxKind::ClassDeclaration) => self.class_instance_type(declaration),
            Some(SyntaxKind::TypeAliasDeclaration) => {
                match arena.get(declaration).and_then(|node| arena.get_type_alias(node)) {
                    Some(data) => {
                        let aliased = self.type_from_type_node(data.type_node);
                        self.resolve(aliased)
                    }
                    None => TypeId::ANY,
                }
            }
            _ => TypeId::ANY,
        };
        self.resolving_references.borrow_mut().remove(&declaration);
        self.resolved_references
            .borrow_mut()
            .insert(declaration, resolved);
        debug!(
            node = declaration.0,
            name = self.declaration_display_name(declaration),
            ty = %self.type_to_string(resolved),
            "resolved type reference"
        );
        resolved
    }

    fn interface_type(&self, declaration: NodeIndex) -> TypeId {
        let arena = self.arena();
        let Some(data) = arena.get(declaration).and_then(|node| arena.get_class_like(node)) else {
            return TypeId::ANY;
        };
        let mut shape = self.members_shape(&data.members);
        self.inherit_base_properties(&mut shape, data.heritage_clauses.as_ref());
        self.object(shape)
    }

    fn class_instance_type(&self, declaration: NodeIndex) -> TypeId {
        let arena = self.arena();
        let Some(data) = arena.get(declaration).and_then(|node| arena.get_class_like(node)) else {
            return TypeId::ANY;
        };
        let mut shape = self.class_members_shape(&data.members, false);
        self.inherit_base_properties(&mut shape, data.heritage_clauses.as_ref());
        self.object(shape)
    }

    /// Properties of `typeof C`: `prototype`, then the static members.
    fn class_static_properties(&self, declaration: NodeIndex) -> Vec<PropertyInfo> {
        let arena = self.arena();
        let Some(data) = arena.get(declaration).and_then(|node| arena.get_class_like(node)) else {
            return Vec::new();
        };
        let mut shape = ObjectShape::default();
        shape.upsert(PropertyInfo::new("prototype", self.reference(declaration)));
        for property in self.class_members_shape(&data.members, true).properties {
            shape.upsert(property);
        }
        shape.properties
    }

    /// Instance or static members of a class body, in member order.
    fn class_members_shape(&self, members: &NodeList, is_static: bool) -> ObjectShape {
        let arena = self.arena();
        let mut shape = ObjectShape::default();
        for member in members.iter() {
            let Some(member_node) = arena.get(member) else {
                continue;
            };
            if arena.has_modifier(member, SyntaxKind::StaticKeyword) != is_static {
                continue;
            }
            match member_node.kind {
                SyntaxKind::Constructor => {
                    let Some(constructor) = arena.get_function(member_node) else {
                        continue;
                    };
                    for parameter in constructor.parameters.iter() {
                        if !is_parameter_property(arena, parameter) {
                            continue;
                        }
                        let name = arena
                            .get(parameter)
                            .and_then(|node| arena.get_parameter(node))
                            .and_then(|data| arena.identifier_text(data.name));
                        if let Some(name) = name {
                            shape.upsert(PropertyInfo::new(
                                name,
                                self.type_of_declaration(parameter),
                            ));
                        }
                    }
                }
                SyntaxKind::PropertyDeclaration => {
                    let Some(property) = arena.get_property_decl(member_node) else {
                        continue;
                    };
                    if let Some(name) = self.property_key(property.name) {
                        shape.upsert(PropertyInfo {
                            name,
                            type_id: self.type_of_declaration(member),
                            optional: property.question_token,
                        });
                    }
                }
                SyntaxKind::MethodDeclaration | SyntaxKind::GetAccessor => {
                    let name = arena
                        .get_function(member_node)
                        .and_then(|function| self.property_key(function.name));
                    if let Some(name) = name {
                        shape.upsert(PropertyInfo::new(name, self.type_of_declaration(member)));
                    }
                }
                SyntaxKind::SetAccessor => {
                    let name = arena
                        .get_function(member_node)
                        .and_then(|function| self.property_key(function.name));
                    if let Some(name) = name {
                        if shape.get(&name).is_none() {
                            shape
                                .properties
                                .push(PropertyInfo::new(name, self.type_of_declaration(member)));
                        }
                    }
                }
                _ => {}
            }
        }
        shape
    }

    /// Append properties of `extends` bases that the type does not redeclare.
    fn inherit_base_properties(&self, shape: &mut ObjectShape, heritage: Option<&NodeList>) {
        let Some(heritage) = heritage else {
            return;
        };
        let arena = self.arena();
        for clause in heritage.iter() {
            let Some(clause_data) = arena.get(clause).and_then(|node| arena.get_heritage_clause(node))
            else {
                continue;
            };
            if clause_data.token != SyntaxKind::ExtendsKeyword {
                continue;
            }
            for base in clause_data.types.iter() {
                let Some(expression) = arena
                    .get(base)
                    .and_then(|node| arena.get_expr_with_type_args(node))
                    .map(|data| data.expression)
                else {
                    continue;
                };
                let base_type = self.type_of_type_name(expression);
                for property in self.properties_of(base_type) {
                    if shape.get(&property.name).is_none() {
                        shape.properties.push(property);
                    }
                }
            }
        }
    }

    // =========================================================================
    // Structural queries
    // =========================================================================

    /// Properties in declaration order. Forces lazy references.
    pub fn properties_of(&self, id: TypeId) -> Vec<PropertyInfo> {
        self.properties_at_depth(id, 0)
    }

    fn properties_at_depth(&self, id: TypeId, depth: u32) -> Vec<PropertyInfo> {
        if depth > MAX_TYPE_DEPTH {
            return Vec::new();
        }
        match self.lookup(id) {
            TypeKey::Object(shape) => shape.properties,
            TypeKey::Constructor(class) => self.class_static_properties(class),
            TypeKey::Lazy(declaration) => {
                let resolved = self.resolve_declaration(declaration);
                if resolved == id {
                    Vec::new()
                } else {
                    self.properties_at_depth(resolved, depth + 1)
                }
            }
            TypeKey::Union(members) => members
                .iter()
                .flat_map(|&member| self.properties_at_depth(member, depth + 1))
                .collect(),
            TypeKey::Intersection(members) => {
                let mut shape = ObjectShape::default();
                for member in members {
                    for property in self.properties_at_depth(member, depth + 1) {
                        if shape.get(&property.name).is_none() {
                            shape.properties.push(property);
                        }
                    }
                }
                shape.properties
            }
            _ => Vec::new(),
        }
    }

    /// Type of a named property; `Some(any)` on `any`, `None` when absent.
    pub fn property_type(&self, id: TypeId, name: &str) -> Option<TypeId> {
        self.property_type_at_depth(id, name, 0)
    }

    fn property_type_at_depth(&self, id: TypeId, name: &str, depth: u32) -> Option<TypeId> {
        if depth > MAX_TYPE_DEPTH {
            return None;
        }
        match self.lookup(id) {
            TypeKey::Intrinsic(IntrinsicKind::Any) => Some(TypeId::ANY),
            TypeKey::Object(shape) => shape.get(name).map(|property| property.type_id),
            TypeKey::Constructor(class) => self
                .class_static_properties(class)
                .into_iter()
                .find(|property| property.name == name)
                .map(|property| property.type_id),
            TypeKey::Lazy(declaration) => {
                let resolved = self.resolve_declaration(declaration);
                if resolved == id {
                    return None;
                }
                self.property_type_at_depth(resolved, name, depth + 1)
            }
            TypeKey::Union(members) => {
                let found: Vec<TypeId> = members
                    .iter()
                    .filter_map(|&member| self.property_type_at_depth(member, name, depth + 1))
                    .collect();
                if found.is_empty() {
                    None
                } else {
                    Some(self.union(found))
                }
            }
            TypeKey::Intersection(members) => members
                .iter()
                .find_map(|&member| self.property_type_at_depth(member, name, depth + 1)),
            TypeKey::Array(_) | TypeKey::Tuple(_) if name == "length" => Some(TypeId::NUMBER),
            TypeKey::Intrinsic(IntrinsicKind::String) if name == "length" => Some(TypeId::NUMBER),
            _ => None,
        }
    }

    /// Structural flags. A lazy reference reports its resolved type's flags
    /// once it has been resolved, and no flags before that.
    pub fn type_flags(&self, id: TypeId) -> TypeFlags {
        match self.lookup(id) {
            TypeKey::Intrinsic(kind) => intrinsic_flags(kind),
            TypeKey::Literal(value) => {
                TypeFlags::LITERAL
                    | match value {
                        LiteralValue::String(_) => TypeFlags::STRING,
                        LiteralValue::Number(_) => TypeFlags::NUMBER,
                        LiteralValue::Boolean(_) => TypeFlags::BOOLEAN,
                    }
            }
            TypeKey::Object(_) => TypeFlags::OBJECT,
            TypeKey::Array(_) | TypeKey::Tuple(_) => TypeFlags::ARRAY,
            TypeKey::Function { .. } => TypeFlags::FUNCTION,
            TypeKey::Constructor(_) => TypeFlags::OBJECT | TypeFlags::FUNCTION,
            TypeKey::Union(_) => TypeFlags::UNION,
            TypeKey::Intersection(_) => TypeFlags::INTERSECTION,
            TypeKey::Lazy(declaration) => {
                let resolved = self.resolved_references.borrow().get(&declaration).copied();
                match resolved {
                    Some(resolved) if resolved != id => self.type_flags(resolved),
                    _ => TypeFlags::empty(),
                }
            }
        }
    }

    /// Members of a union or intersection, looking through resolved
    /// references.
    pub fn constituents(&self, id: TypeId) -> TypeList {
        let key = match self.lookup(id) {
            TypeKey::Lazy(declaration) => {
                let resolved = self.resolved_references.borrow().get(&declaration).copied();
                match resolved {
                    Some(resolved) => self.lookup(resolved),
                    None => return TypeList::new(),
                }
            }
            key => key,
        };
        match key {
            TypeKey::Union(members) | TypeKey::Intersection(members) => members,
            _ => TypeList::new(),
        }
    }

    // =========================================================================
    // Display
    // =========================================================================

    pub fn type_to_string(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, id, 0);
        out
    }

    fn write_type(&self, out: &mut String, id: TypeId, depth: u32) {
        if depth > MAX_TYPE_DEPTH {
            out.push_str("...");
            return;
        }
        match self.lookup(id) {
            TypeKey::Intrinsic(kind) => out.push_str(kind.name()),
            TypeKey::Literal(LiteralValue::String(value)) => {
                out.push('"');
                out.push_str(&value);
                out.push('"');
            }
            TypeKey::Literal(LiteralValue::Number(value)) => out.push_str(&value),
            TypeKey::Literal(LiteralValue::Boolean(value)) => {
                out.push_str(if value { "true" } else { "false" });
            }
            TypeKey::Object(shape) => {
                if shape.properties.is_empty() {
                    out.push_str("{}");
                    return;
                }
                out.push_str("{ ");
                for property in &shape.properties {
                    out.push_str(&property.name);
                    if property.optional {
                        out.push('?');
                    }
                    out.push_str(": ");
                    self.write_type(out, property.type_id, depth + 1);
                    out.push_str("; ");
                }
                out.push('}');
            }
            TypeKey::Array(element) => {
                let needs_parens = matches!(
                    self.lookup(element),
                    TypeKey::Union(_) | TypeKey::Intersection(_) | TypeKey::Function { .. }
                );
                if needs_parens {
                    out.push('(');
                }
                self.write_type(out, element, depth + 1);
                if needs_parens {
                    out.push(')');
                }
                out.push_str("[]");
            }
            TypeKey::Tuple(members) => {
                out.push('[');
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_type(out, *member, depth + 1);
                }
                out.push(']');
            }
            TypeKey::Function { return_type } => {
                out.push_str("(...) => ");
                self.write_type(out, return_type, depth + 1);
            }
            TypeKey::Constructor(class) => {
                out.push_str("typeof ");
                out.push_str(self.declaration_display_name(class));
            }
            TypeKey::Union(members) => self.write_members(out, &members, " | ", depth),
            TypeKey::Intersection(members) => self.write_members(out, &members, " & ", depth),
            TypeKey::Lazy(declaration) => {
                out.push_str(self.declaration_display_name(declaration));
            }
        }
    }

    fn write_members(&self, out: &mut String, members: &[TypeId], separator: &str, depth: u32) {
        for (i, member) in members.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            self.write_type(out, *member, depth + 1);
        }
    }

    fn declaration_display_name(&self, declaration: NodeIndex) -> &'a str {
        let arena = self.arena();
        arena
            .identifier_text(declaration_name(arena, declaration))
            .unwrap_or("(anonymous)")
    }
}

fn push_unique(members: &mut TypeList, id: TypeId) {
    if !members.contains(&id) {
        members.push(id);
    }
}

fn intrinsic_flags(kind: IntrinsicKind) -> TypeFlags {
    match kind {
        IntrinsicKind::Any => TypeFlags::ANY,
        IntrinsicKind::Unknown => TypeFlags::UNKNOWN,
        IntrinsicKind::Never => TypeFlags::NEVER,
        IntrinsicKind::Void => TypeFlags::VOID,
        IntrinsicKind::Undefined => TypeFlags::UNDEFINED,
        IntrinsicKind::Null => TypeFlags::NULL,
        IntrinsicKind::Boolean => TypeFlags::BOOLEAN,
        IntrinsicKind::Number => TypeFlags::NUMBER,
        IntrinsicKind::String => TypeFlags::STRING,
        IntrinsicKind::BigInt => TypeFlags::BIGINT,
        IntrinsicKind::Symbol => TypeFlags::SYMBOL,
        IntrinsicKind::NonPrimitive => TypeFlags::NON_PRIMITIVE,
    }
}

/// Name node of a declaration, or `NONE` for nodes that declare nothing.
pub fn declaration_name(arena: &NodeArena, declaration: NodeIndex) -> NodeIndex {
    let Some(node) = arena.get(declaration) else {
        return NodeIndex::NONE;
    };
    match node.kind {
        SyntaxKind::VariableDeclaration => arena
            .get_variable_declaration(node)
            .map_or(NodeIndex::NONE, |data| data.name),
        SyntaxKind::Parameter => arena
            .get_parameter(node)
            .map_or(NodeIndex::NONE, |data| data.name),
        SyntaxKind::BindingElement => arena
            .get_binding_element(node)
            .map_or(NodeIndex::NONE, |data| data.name),
        SyntaxKind::FunctionDeclaration
        | SyntaxKind::FunctionExpression
        | SyntaxKind::MethodDeclaration
        | SyntaxKind::GetAccessor
        | SyntaxKind::SetAccessor => arena
            .get_function(node)
            .map_or(NodeIndex::NONE, |data| data.name),
        SyntaxKind::ClassDeclaration | SyntaxKind::InterfaceDeclaration => arena
            .get_class_like(node)
            .map_or(NodeIndex::NONE, |data| data.name),
        SyntaxKind::TypeAliasDeclaration => arena
            .get_type_alias(node)
            .map_or(NodeIndex::NONE, |data| data.name),
        SyntaxKind::TypeParameter => arena
            .get_type_parameter(node)
            .map_or(NodeIndex::NONE, |data| data.name),
        SyntaxKind::PropertyDeclaration => arena
            .get_property_decl(node)
            .map_or(NodeIndex::NONE, |data| data.name),
        SyntaxKind::PropertySignature | SyntaxKind::MethodSignature => arena
            .get_signature(node)
            .map_or(NodeIndex::NONE, |data| data.name),
        SyntaxKind::PropertyAssignment => arena
            .get_property_assignment(node)
            .map_or(NodeIndex::NONE, |data| data.name),
        SyntaxKind::ShorthandPropertyAssignment => arena
            .get_shorthand_property(node)
            .map_or(NodeIndex::NONE, |data| data.name),
        _ => NodeIndex::NONE,
    }
}

/// Constructor parameter declared with an accessibility or `readonly`
/// modifier.
fn is_parameter_property(arena: &NodeArena, parameter: NodeIndex) -> bool {
    arena.modifier_kinds(parameter).iter().any(|kind| {
        matches!(
            kind,
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::OverrideKeyword
        )
    })
}
