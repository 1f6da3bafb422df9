//! Node arena: typed node storage with parent links.
//!
//! Every node carries its kind, its token span (leading trivia excluded), a
//! parent index and kind-specific data. Children are always allocated before
//! their parent; `add_node` wires the parent links as the parent is added.

use crate::base::{NodeIndex, NodeList};
use crate::syntax_kind::SyntaxKind;
use bitflags::bitflags;
use smallvec::SmallVec;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u16 {
        /// `let` declaration list
        const LET = 1 << 0;
        /// `const` declaration list
        const CONST = 1 << 1;
        /// `?.` property access, element access or call
        const OPTIONAL_CHAIN = 1 << 2;
        /// Produced during error recovery
        const HAS_ERROR = 1 << 3;
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: SyntaxKind,
    pub flags: NodeFlags,
    pub pos: u32,
    pub end: u32,
    pub parent: NodeIndex,
    pub data: NodeData,
}

impl Node {
    #[inline]
    pub fn width(&self) -> u32 {
        self.end.saturating_sub(self.pos)
    }

    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        self.pos <= offset && offset < self.end
    }
}

// =============================================================================
// Node data
// =============================================================================

#[derive(Debug, Clone)]
pub struct IdentifierData {
    pub escaped_text: String,
}

#[derive(Debug, Clone)]
pub struct LiteralData {
    /// Raw token text, quotes included
    pub text: String,
    /// Cooked value: string contents without quotes, numbers as written
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct QualifiedNameData {
    pub left: NodeIndex,
    pub right: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct ComputedPropertyNameData {
    pub expression: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct TypeParameterData {
    pub name: NodeIndex,
    pub constraint: NodeIndex,
    pub default: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct ParameterData {
    pub modifiers: Option<NodeList>,
    pub dot_dot_dot_token: bool,
    pub name: NodeIndex,
    pub question_token: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

/// Property, method and index signatures in interfaces and type literals.
#[derive(Debug, Clone)]
pub struct SignatureData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub question_token: bool,
    pub type_parameters: Option<NodeList>,
    pub parameters: Option<NodeList>,
    pub type_annotation: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct PropertyDeclData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub question_token: bool,
    pub exclamation_token: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

/// Shared by every function-like kind: declarations, expressions, arrows,
/// methods, constructors and accessors.
#[derive(Debug, Clone)]
pub struct FunctionData {
    pub modifiers: Option<NodeList>,
    pub is_async: bool,
    pub asterisk_token: bool,
    pub name: NodeIndex,
    pub question_token: bool,
    pub type_parameters: Option<NodeList>,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
    pub body: NodeIndex,
}

/// Class and interface declarations.
#[derive(Debug, Clone)]
pub struct ClassLikeData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub heritage_clauses: Option<NodeList>,
    pub members: NodeList,
}

#[derive(Debug, Clone)]
pub struct TypeAliasData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub type_node: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct HeritageClauseData {
    /// `ExtendsKeyword` or the `implements` identifier kind
    pub token: SyntaxKind,
    pub types: NodeList,
}

#[derive(Debug, Clone)]
pub struct ExprWithTypeArgsData {
    pub expression: NodeIndex,
    pub type_arguments: Option<NodeList>,
}

#[derive(Debug, Clone)]
pub struct TypeRefData {
    pub type_name: NodeIndex,
    pub type_arguments: Option<NodeList>,
}

#[derive(Debug, Clone)]
pub struct FunctionTypeData {
    pub type_parameters: Option<NodeList>,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct TypeQueryData {
    pub expr_name: NodeIndex,
}

/// Type literals and tuple types.
#[derive(Debug, Clone)]
pub struct TypeListData {
    pub members: NodeList,
}

#[derive(Debug, Clone)]
pub struct ArrayTypeData {
    pub element_type: NodeIndex,
}

/// Union and intersection types.
#[derive(Debug, Clone)]
pub struct CompositeTypeData {
    pub types: NodeList,
}

/// Parenthesized types and `keyof`/`readonly` type operators.
#[derive(Debug, Clone)]
pub struct WrappedTypeData {
    pub operator: SyntaxKind,
    pub type_node: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct LiteralTypeData {
    pub literal: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct BindingPatternData {
    pub elements: NodeList,
}

#[derive(Debug, Clone)]
pub struct BindingElementData {
    pub dot_dot_dot_token: bool,
    pub property_name: NodeIndex,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Array and object literal expressions.
#[derive(Debug, Clone)]
pub struct LiteralExprData {
    pub elements: NodeList,
    pub multi_line: bool,
}

/// Property and element access.
#[derive(Debug, Clone)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
}

/// Call and `new` expressions.
#[derive(Debug, Clone)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub type_arguments: Option<NodeList>,
    pub arguments: Option<NodeList>,
}

/// Parenthesized, spread, non-null and `typeof`/`void` expressions.
#[derive(Debug, Clone)]
pub struct WrappedExprData {
    pub expression: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct UnaryExprData {
    pub operator: SyntaxKind,
    pub operand: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: SyntaxKind,
    pub right: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

/// `as` and `satisfies` expressions.
#[derive(Debug, Clone)]
pub struct AsExprData {
    pub expression: NodeIndex,
    pub keyword: SyntaxKind,
    pub type_node: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct ShorthandPropertyData {
    pub name: NodeIndex,
    pub object_assignment_initializer: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct BlockData {
    pub statements: NodeList,
    pub multi_line: bool,
}

#[derive(Debug, Clone)]
pub struct VariableStatementData {
    pub modifiers: Option<NodeList>,
    pub declaration_list: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct VariableDeclarationListData {
    pub declarations: NodeList,
}

#[derive(Debug, Clone)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub exclamation_token: bool,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct IfStatementData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

/// `while` and classic `for` loops.
#[derive(Debug, Clone)]
pub struct LoopData {
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub incrementor: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct ForInOfData {
    pub initializer: NodeIndex,
    pub expression: NodeIndex,
    pub statement: NodeIndex,
}

/// `return` and `throw` statements, and expression statements.
#[derive(Debug, Clone)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct SourceFileData {
    pub statements: NodeList,
}

/// Kind-specific payload of a node.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Tokens, keyword types and other nodes without children
    None,
    Identifier(IdentifierData),
    Literal(LiteralData),
    QualifiedName(QualifiedNameData),
    ComputedPropertyName(ComputedPropertyNameData),
    TypeParameter(TypeParameterData),
    Parameter(ParameterData),
    Signature(SignatureData),
    PropertyDecl(PropertyDeclData),
    Function(FunctionData),
    ClassLike(ClassLikeData),
    TypeAlias(TypeAliasData),
    HeritageClause(HeritageClauseData),
    ExprWithTypeArgs(ExprWithTypeArgsData),
    TypeRef(TypeRefData),
    FunctionType(FunctionTypeData),
    TypeQuery(TypeQueryData),
    TypeList(TypeListData),
    ArrayType(ArrayTypeData),
    CompositeType(CompositeTypeData),
    WrappedType(WrappedTypeData),
    LiteralType(LiteralTypeData),
    BindingPattern(BindingPatternData),
    BindingElement(BindingElementData),
    LiteralExpr(LiteralExprData),
    AccessExpr(AccessExprData),
    CallExpr(CallExprData),
    WrappedExpr(WrappedExprData),
    UnaryExpr(UnaryExprData),
    BinaryExpr(BinaryExprData),
    ConditionalExpr(ConditionalExprData),
    AsExpr(AsExprData),
    PropertyAssignment(PropertyAssignmentData),
    ShorthandProperty(ShorthandPropertyData),
    Block(BlockData),
    VariableStatement(VariableStatementData),
    VariableDeclarationList(VariableDeclarationListData),
    VariableDeclaration(VariableDeclarationData),
    IfStatement(IfStatementData),
    Loop(LoopData),
    ForInOf(ForInOfData),
    ExprStatement(ExprStatementData),
    SourceFile(SourceFileData),
}

// =============================================================================
// Arena
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

pub type Children = SmallVec<[NodeIndex; 8]>;

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node and point its children's parent links at it.
    pub fn add_node(&mut self, kind: SyntaxKind, pos: u32, end: u32, data: NodeData) -> NodeIndex {
        self.add_node_with_flags(kind, NodeFlags::empty(), pos, end, data)
    }

    pub fn add_node_with_flags(
        &mut self,
        kind: SyntaxKind,
        flags: NodeFlags,
        pos: u32,
        end: u32,
        data: NodeData,
    ) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        let children = children_of_data(&data);
        self.nodes.push(Node {
            kind,
            flags,
            pos,
            end,
            parent: NodeIndex::NONE,
            data,
        });
        for child in children {
            if let Some(node) = self.nodes.get_mut(child.0 as usize) {
                node.parent = index;
            }
        }
        index
    }

    /// Add a childless token node (keywords, modifiers, keyword types).
    pub fn add_token(&mut self, kind: SyntaxKind, pos: u32, end: u32) -> NodeIndex {
        self.add_node(kind, pos, end, NodeData::None)
    }

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<SyntaxKind> {
        self.get(index).map(|node| node.kind)
    }

    #[inline]
    pub fn is_kind(&self, index: NodeIndex, kind: SyntaxKind) -> bool {
        self.kind(index) == Some(kind)
    }

    /// Parent of a node; `NodeIndex::NONE` for the root or an invalid index.
    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |node| node.parent)
    }

    /// Direct children in source order.
    pub fn children(&self, index: NodeIndex) -> Children {
        self.get(index)
            .map(|node| children_of_data(&node.data))
            .unwrap_or_default()
    }

    /// Text of an identifier node.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node).map(|data| data.escaped_text.as_str())
    }

    /// Text of a property name: identifiers, string and numeric literals.
    pub fn property_name_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        match &node.data {
            NodeData::Identifier(data) => Some(data.escaped_text.as_str()),
            NodeData::Literal(data) => Some(data.value.as_str()),
            _ => None,
        }
    }

    /// Modifier keyword kinds of a declaration, if any.
    pub fn modifier_kinds(&self, index: NodeIndex) -> SmallVec<[SyntaxKind; 4]> {
        let Some(node) = self.get(index) else {
            return SmallVec::new();
        };
        let modifiers = match &node.data {
            NodeData::Parameter(data) => data.modifiers.as_ref(),
            NodeData::Signature(data) => data.modifiers.as_ref(),
            NodeData::PropertyDecl(data) => data.modifiers.as_ref(),
            NodeData::Function(data) => data.modifiers.as_ref(),
            NodeData::ClassLike(data) => data.modifiers.as_ref(),
            NodeData::TypeAlias(data) => data.modifiers.as_ref(),
            NodeData::VariableStatement(data) => data.modifiers.as_ref(),
            _ => None,
        };
        modifiers
            .map(|list| list.iter().filter_map(|m| self.kind(m)).collect())
            .unwrap_or_default()
    }

    pub fn has_modifier(&self, index: NodeIndex, kind: SyntaxKind) -> bool {
        self.modifier_kinds(index).contains(&kind)
    }
}

macro_rules! data_accessors {
    ($($fn_name:ident => $variant:ident($ty:ty)),+ $(,)?) => {
        impl NodeArena {
            $(
                #[inline]
                pub fn $fn_name<'n>(&self, node: &'n Node) -> Option<&'n $ty> {
                    match &node.data {
                        NodeData::$variant(data) => Some(data),
                        _ => None,
                    }
                }
            )+
        }
    };
}

data_accessors!(
    get_identifier => Identifier(IdentifierData),
    get_literal => Literal(LiteralData),
    get_qualified_name => QualifiedName(QualifiedNameData),
    get_computed_property_name => ComputedPropertyName(ComputedPropertyNameData),
    get_type_parameter => TypeParameter(TypeParameterData),
    get_parameter => Parameter(ParameterData),
    get_signature => Signature(SignatureData),
    get_property_decl => PropertyDecl(PropertyDeclData),
    get_function => Function(FunctionData),
    get_class_like => ClassLike(ClassLikeData),
    get_type_alias => TypeAlias(TypeAliasData),
    get_heritage_clause => HeritageClause(HeritageClauseData),
    get_expr_with_type_args => ExprWithTypeArgs(ExprWithTypeArgsData),
    get_type_ref => TypeRef(TypeRefData),
    get_function_type => FunctionType(FunctionTypeData),
    get_type_query => TypeQuery(TypeQueryData),
    get_type_list => TypeList(TypeListData),
    get_array_type => ArrayType(ArrayTypeData),
    get_composite_type => CompositeType(CompositeTypeData),
    get_wrapped_type => WrappedType(WrappedTypeData),
    get_literal_type => LiteralType(LiteralTypeData),
    get_binding_pattern => BindingPattern(BindingPatternData),
    get_binding_element => BindingElement(BindingElementData),
    get_literal_expr => LiteralExpr(LiteralExprData),
    get_access_expr => AccessExpr(AccessExprData),
    get_call_expr => CallExpr(CallExprData),
    get_wrapped_expr => WrappedExpr(WrappedExprData),
    get_unary_expr => UnaryExpr(UnaryExprData),
    get_binary_expr => BinaryExpr(BinaryExprData),
    get_conditional_expr => ConditionalExpr(ConditionalExprData),
    get_as_expr => AsExpr(AsExprData),
    get_property_assignment => PropertyAssignment(PropertyAssignmentData),
    get_shorthand_property => ShorthandProperty(ShorthandPropertyData),
    get_block => Block(BlockData),
    get_variable_statement => VariableStatement(VariableStatementData),
    get_variable_declaration_list => VariableDeclarationList(VariableDeclarationListData),
    get_variable_declaration => VariableDeclaration(VariableDeclarationData),
    get_if_statement => IfStatement(IfStatementData),
    get_loop => Loop(LoopData),
    get_for_in_of => ForInOf(ForInOfData),
    get_expr_statement => ExprStatement(ExprStatementData),
    get_source_file => SourceFile(SourceFileData),
);

// =============================================================================
// Child enumeration
// =============================================================================

#[derive(Default)]
struct ChildCollector(Children);

impl ChildCollector {
    fn node(&mut self, index: NodeIndex) {
        if index.is_some() {
            self.0.push(index);
        }
    }

    fn list(&mut self, list: &NodeList) {
        self.0.extend(list.iter().filter(|index| index.is_some()));
    }

    fn opt(&mut self, list: &Option<NodeList>) {
        if let Some(list) = list {
            self.list(list);
        }
    }
}

fn children_of_data(data: &NodeData) -> Children {
    let mut c = ChildCollector::default();
    match data {
        NodeData::None | NodeData::Identifier(_) | NodeData::Literal(_) => {}
        NodeData::QualifiedName(d) => {
            c.node(d.left);
            c.node(d.right);
        }
        NodeData::ComputedPropertyName(d) => c.node(d.expression),
        NodeData::TypeParameter(d) => {
            c.node(d.name);
            c.node(d.constraint);
            c.node(d.default);
        }
        NodeData::Parameter(d) => {
            c.opt(&d.modifiers);
            c.node(d.name);
            c.node(d.type_annotation);
            c.node(d.initializer);
        }
        NodeData::Signature(d) => {
            c.opt(&d.modifiers);
            c.node(d.name);
            c.opt(&d.type_parameters);
            c.opt(&d.parameters);
            c.node(d.type_annotation);
        }
        NodeData::PropertyDecl(d) => {
            c.opt(&d.modifiers);
            c.node(d.name);
            c.node(d.type_annotation);
            c.node(d.initializer);
        }
        NodeData::Function(d) => {
            c.opt(&d.modifiers);
            c.node(d.name);
            c.opt(&d.type_parameters);
            c.list(&d.parameters);
            c.node(d.type_annotation);
            c.node(d.body);
        }
        NodeData::ClassLike(d) => {
            c.opt(&d.modifiers);
            c.node(d.name);
            c.opt(&d.type_parameters);
            c.opt(&d.heritage_clauses);
            c.list(&d.members);
        }
        NodeData::TypeAlias(d) => {
            c.opt(&d.modifiers);
            c.node(d.name);
            c.opt(&d.type_parameters);
            c.node(d.type_node);
        }
        NodeData::HeritageClause(d) => c.list(&d.types),
        NodeData::ExprWithTypeArgs(d) => {
            c.node(d.expression);
            c.opt(&d.type_arguments);
        }
        NodeData::TypeRef(d) => {
            c.node(d.type_name);
            c.opt(&d.type_arguments);
        }
        NodeData::FunctionType(d) => {
            c.opt(&d.type_parameters);
            c.list(&d.parameters);
            c.node(d.type_annotation);
        }
        NodeData::TypeQuery(d) => c.node(d.expr_name),
        NodeData::TypeList(d) => c.list(&d.members),
        NodeData::ArrayType(d) => c.node(d.element_type),
        NodeData::CompositeType(d) => c.list(&d.types),
        NodeData::WrappedType(d) => c.node(d.type_node),
        NodeData::LiteralType(d) => c.node(d.literal),
        NodeData::BindingPattern(d) => c.list(&d.elements),
        NodeData::BindingElement(d) => {
            c.node(d.property_name);
            c.node(d.name);
            c.node(d.initializer);
        }
        NodeData::LiteralExpr(d) => c.list(&d.elements),
        NodeData::AccessExpr(d) => {
            c.node(d.expression);
            c.node(d.name_or_argument);
        }
        NodeData::CallExpr(d) => {
            c.node(d.expression);
            c.opt(&d.type_arguments);
            c.opt(&d.arguments);
        }
        NodeData::WrappedExpr(d) => c.node(d.expression),
        NodeData::UnaryExpr(d) => c.node(d.operand),
        NodeData::BinaryExpr(d) => {
            c.node(d.left);
            c.node(d.right);
        }
        NodeData::ConditionalExpr(d) => {
            c.node(d.condition);
            c.node(d.when_true);
            c.node(d.when_false);
        }
        NodeData::AsExpr(d) => {
            c.node(d.expression);
            c.node(d.type_node);
        }
        NodeData::PropertyAssignment(d) => {
            c.node(d.name);
            c.node(d.initializer);
        }
        NodeData::ShorthandProperty(d) => {
            c.node(d.name);
            c.node(d.object_assignment_initializer);
        }
        NodeData::Block(d) => c.list(&d.statements),
        NodeData::VariableStatement(d) => {
            c.opt(&d.modifiers);
            c.node(d.declaration_list);
        }
        NodeData::VariableDeclarationList(d) => c.list(&d.declarations),
        NodeData::VariableDeclaration(d) => {
            c.node(d.name);
            c.node(d.type_annotation);
            c.node(d.initializer);
        }
        NodeData::IfStatement(d) => {
            c.node(d.expression);
            c.node(d.then_statement);
            c.node(d.else_statement);
        }
        NodeData::Loop(d) => {
            c.node(d.initializer);
            c.node(d.condition);
            c.node(d.incrementor);
            c.node(d.statement);
        }
        NodeData::ForInOf(d) => {
            c.node(d.initializer);
            c.node(d.expression);
            c.node(d.statement);
        }
        NodeData::ExprStatement(d) => c.node(d.expression),
        NodeData::SourceFile(d) => c.list(&d.statements),
    }
    c.0
}
