//! Parser state - type annotations, type members and type parameters.

use super::ParserState;
use crate::base::{NodeIndex, NodeList};
use crate::node::{
    ArrayTypeData, CompositeTypeData, FunctionTypeData, LiteralData, LiteralTypeData, NodeData,
    QualifiedNameData, SignatureData, TypeListData, TypeParameterData, TypeQueryData,
    TypeRefData, WrappedTypeData,
};
use crate::syntax_kind::SyntaxKind;

impl<'a> ParserState<'a> {
    /// `: Type`, or `NONE` when there is no annotation.
    pub(crate) fn parse_type_annotation(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        }
    }

    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let ty = if self.is_start_of_function_type() {
            self.parse_function_type()
        } else {
            self.parse_union_type()
        };
        self.exit_recursion();
        ty
    }

    fn is_start_of_function_type(&self) -> bool {
        if self.is_token(SyntaxKind::LessThanToken) {
            return true;
        }
        if self.is_token(SyntaxKind::NewKeyword) {
            return true;
        }
        if !self.is_token(SyntaxKind::OpenParenToken) {
            return false;
        }
        let next = self.look_ahead(1).kind;
        match next {
            SyntaxKind::CloseParenToken | SyntaxKind::DotDotDotToken => true,
            SyntaxKind::Identifier | SyntaxKind::ThisKeyword => matches!(
                self.look_ahead(2).kind,
                SyntaxKind::ColonToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::QuestionToken
                    | SyntaxKind::EqualsToken
            ) || (self.look_ahead(2).kind == SyntaxKind::CloseParenToken
                && self.look_ahead(3).kind == SyntaxKind::EqualsGreaterThanToken),
            SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken => {
                // Destructured parameter vs. parenthesized type literal/tuple
                self.parenthesized_is_followed_by(SyntaxKind::EqualsGreaterThanToken)
            }
            _ => false,
        }
    }

    /// True if the `(` at the cursor is closed by a `)` followed by `kind`.
    fn parenthesized_is_followed_by(&self, kind: SyntaxKind) -> bool {
        let mut depth = 0i32;
        let mut n = 0;
        loop {
            let token = self.look_ahead(n);
            match token.kind {
                SyntaxKind::EndOfFileToken => return false,
                SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseBracketToken => {
                    depth -= 1;
                    if depth == 0 {
                        return self.look_ahead(n + 1).kind == kind;
                    }
                }
                _ => {}
            }
            n += 1;
        }
    }

    fn parse_function_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_optional(SyntaxKind::NewKeyword);
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameter_list();
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken, "=>");
        let type_annotation = self.parse_type();
        self.arena.add_node(
            SyntaxKind::FunctionType,
            pos,
            self.prev_end(),
            NodeData::FunctionType(FunctionTypeData {
                type_parameters,
                parameters,
                type_annotation,
            }),
        )
    }

    fn parse_union_type(&mut self) -> NodeIndex {
        self.parse_composite_type(SyntaxKind::UnionType, SyntaxKind::BarToken, |p| {
            p.parse_intersection_type()
        })
    }

    fn parse_intersection_type(&mut self) -> NodeIndex {
        self.parse_composite_type(SyntaxKind::IntersectionType, SyntaxKind::AmpersandToken, |p| {
            p.parse_type_operator()
        })
    }

    fn parse_composite_type(
        &mut self,
        kind: SyntaxKind,
        separator: SyntaxKind,
        mut parse_constituent: impl FnMut(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        let pos = self.token_pos();
        let leading = self.parse_optional(separator);
        let first = parse_constituent(self);
        if !self.is_token(separator) {
            if leading {
                let types = NodeList::new(vec![first], pos, self.prev_end());
                return self.arena.add_node(
                    kind,
                    pos,
                    self.prev_end(),
                    NodeData::CompositeType(CompositeTypeData { types }),
                );
            }
            return first;
        }
        let mut nodes = vec![first];
        while self.parse_optional(separator) {
            nodes.push(parse_constituent(self));
        }
        let types = NodeList::new(nodes, pos, self.prev_end());
        self.arena.add_node(
            kind,
            pos,
            self.prev_end(),
            NodeData::CompositeType(CompositeTypeData { types }),
        )
    }

    fn parse_type_operator(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let operator = if self.is_contextual(SyntaxKind::KeyOfKeyword) {
            Some(SyntaxKind::KeyOfKeyword)
        } else if self.is_contextual(SyntaxKind::ReadonlyKeyword) {
            Some(SyntaxKind::ReadonlyKeyword)
        } else if self.token_text() == "unique" && self.look_ahead_text(1) == "symbol" {
            Some(SyntaxKind::SymbolKeyword)
        } else {
            None
        };
        match operator {
            Some(operator) => {
                self.next_token();
                let type_node = self.parse_type_operator();
                self.arena.add_node(
                    SyntaxKind::TypeOperator,
                    pos,
                    self.prev_end(),
                    NodeData::WrappedType(WrappedTypeData {
                        operator,
                        type_node,
                    }),
                )
            }
            None => self.parse_postfix_type(),
        }
    }

    /// `T[]` and `T[K]` suffixes.
    fn parse_postfix_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut ty = self.parse_primary_type();
        while self.is_token(SyntaxKind::OpenBracketToken) && !self.has_preceding_line_break() {
            self.next_token();
            if self.parse_optional(SyntaxKind::CloseBracketToken) {
                ty = self.arena.add_node(
                    SyntaxKind::ArrayType,
                    pos,
                    self.prev_end(),
                    NodeData::ArrayType(ArrayTypeData { element_type: ty }),
                );
            } else {
                let index = self.parse_type();
                self.parse_expected(SyntaxKind::CloseBracketToken, "]");
                let types = NodeList::new(vec![ty, index], pos, self.prev_end());
                ty = self.arena.add_node(
                    SyntaxKind::IndexedAccessType,
                    pos,
                    self.prev_end(),
                    NodeData::CompositeType(CompositeTypeData { types }),
                );
            }
        }
        ty
    }

    fn parse_primary_type(&mut self) -> NodeIndex {
        let token = self.token();
        match token.kind {
            SyntaxKind::VoidKeyword | SyntaxKind::NullKeyword => {
                self.next_token();
                self.arena.add_token(token.kind, token.pos, token.end)
            }
            // `as const` is a reference to the type named `const`
            SyntaxKind::ThisKeyword | SyntaxKind::ConstKeyword => {
                let type_name = self.parse_identifier_name();
                self.add_type_reference(token.pos, type_name, None)
            }
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                self.next_token();
                let literal = self.arena.add_token(token.kind, token.pos, token.end);
                self.add_literal_type(token.pos, literal)
            }
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral => {
                let literal = self.parse_literal_node();
                self.add_literal_type(token.pos, literal)
            }
            SyntaxKind::MinusToken if self.look_ahead(1).kind == SyntaxKind::NumericLiteral => {
                self.next_token();
                let literal = self.parse_literal_node();
                if let Some(value) = self
                    .arena
                    .get(literal)
                    .and_then(|node| self.arena.get_literal(node))
                    .map(|data| format!("-{}", data.value))
                {
                    return self.add_negative_literal_type(token.pos, value);
                }
                self.add_literal_type(token.pos, literal)
            }
            SyntaxKind::TypeOfKeyword => {
                self.next_token();
                let expr_name = self.parse_entity_name();
                self.arena.add_node(
                    SyntaxKind::TypeQuery,
                    token.pos,
                    self.prev_end(),
                    NodeData::TypeQuery(TypeQueryData { expr_name }),
                )
            }
            SyntaxKind::OpenBraceToken => {
                if self.look_ahead_is_mapped_type() {
                    self.skip_mapped_type()
                } else {
                    let members = self.parse_type_members();
                    self.arena.add_node(
                        SyntaxKind::TypeLiteral,
                        token.pos,
                        self.prev_end(),
                        NodeData::TypeList(TypeListData { members }),
                    )
                }
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let type_node = self.parse_type();
                self.parse_expected(SyntaxKind::CloseParenToken, ")");
                self.arena.add_node(
                    SyntaxKind::ParenthesizedType,
                    token.pos,
                    self.prev_end(),
                    NodeData::WrappedType(WrappedTypeData {
                        operator: SyntaxKind::OpenParenToken,
                        type_node,
                    }),
                )
            }
            SyntaxKind::Identifier => {
                let keyword = SyntaxKind::contextual_keyword(self.token_text())
                    .filter(|kind| kind.is_keyword_type())
                    .filter(|_| self.look_ahead(1).kind != SyntaxKind::DotToken);
                if let Some(keyword) = keyword {
                    self.next_token();
                    return self.arena.add_token(keyword, token.pos, token.end);
                }
                let type_name = self.parse_entity_name();
                let type_arguments = if self.is_token(SyntaxKind::LessThanToken)
                    && !self.has_preceding_line_break()
                {
                    self.parse_type_arguments()
                } else {
                    None
                };
                self.add_type_reference(token.pos, type_name, type_arguments)
            }
            _ => {
                self.parse_error_at_current("Type expected.");
                let name = self.create_missing_identifier();
                self.add_type_reference(token.pos, name, None)
            }
        }
    }

    fn add_type_reference(
        &mut self,
        pos: u32,
        type_name: NodeIndex,
        type_arguments: Option<NodeList>,
    ) -> NodeIndex {
        self.arena.add_node(
            SyntaxKind::TypeReference,
            pos,
            self.prev_end(),
            NodeData::TypeRef(TypeRefData {
                type_name,
                type_arguments,
            }),
        )
    }

    fn add_literal_type(&mut self, pos: u32, literal: NodeIndex) -> NodeIndex {
        self.arena.add_node(
            SyntaxKind::LiteralType,
            pos,
            self.prev_end(),
            NodeData::LiteralType(LiteralTypeData { literal }),
        )
    }

    fn add_negative_literal_type(&mut self, pos: u32, value: String) -> NodeIndex {
        let literal = self.arena.add_node(
            SyntaxKind::NumericLiteral,
            pos,
            self.prev_end(),
            NodeData::Literal(LiteralData {
                text: value.clone(),
                value,
            }),
        );
        self.add_literal_type(pos, literal)
    }

    fn look_ahead_is_mapped_type(&self) -> bool {
        let mut n = 1;
        if matches!(self.look_ahead(n).kind, SyntaxKind::PlusToken | SyntaxKind::MinusToken) {
            n += 1;
        }
        if self.is_contextual_at(n, SyntaxKind::ReadonlyKeyword) {
            n += 1;
        }
        self.look_ahead(n).kind == SyntaxKind::OpenBracketToken
            && self.look_ahead(n + 1).kind == SyntaxKind::Identifier
            && self.look_ahead(n + 2).kind == SyntaxKind::InKeyword
    }

    /// Mapped types are kept as opaque nodes.
    fn skip_mapped_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut depth = 0u32;
        loop {
            match self.token_kind() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseBraceToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.next_token();
                        break;
                    }
                }
                _ => {}
            }
            self.next_token();
        }
        self.arena
            .add_token(SyntaxKind::MappedType, pos, self.prev_end())
    }

    fn parse_tuple_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let members = self.parse_delimited_list(SyntaxKind::CloseBracketToken, "]", |p| {
            p.parse_optional(SyntaxKind::DotDotDotToken);
            // Named member `name: T` or `name?: T`; the label is dropped
            let labelled = p.is_identifier()
                && (p.look_ahead(1).kind == SyntaxKind::ColonToken
                    || (p.look_ahead(1).kind == SyntaxKind::QuestionToken
                        && p.look_ahead(2).kind == SyntaxKind::ColonToken));
            if labelled {
                p.next_token();
                p.parse_optional(SyntaxKind::QuestionToken);
                p.next_token();
            }
            let element = p.parse_type();
            p.parse_optional(SyntaxKind::QuestionToken);
            element.into_option()
        });
        self.parse_expected(SyntaxKind::CloseBracketToken, "]");
        self.arena.add_node(
            SyntaxKind::TupleType,
            pos,
            self.prev_end(),
            NodeData::TypeList(TypeListData { members }),
        )
    }

    /// `A` or `A.B.C`.
    pub(crate) fn parse_entity_name(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut entity = self.parse_identifier();
        while self.is_token(SyntaxKind::DotToken) {
            self.next_token();
            let right = if self.is_identifier_or_keyword() {
                self.parse_identifier_name()
            } else {
                self.parse_error_at_current("Identifier expected.");
                self.create_missing_identifier()
            };
            entity = self.arena.add_node(
                SyntaxKind::QualifiedName,
                pos,
                self.prev_end(),
                NodeData::QualifiedName(QualifiedNameData {
                    left: entity,
                    right,
                }),
            );
        }
        entity
    }

    // =========================================================================
    // Type arguments and parameters
    // =========================================================================

    /// `<T, U>`; `None` when the cursor is not at `<`.
    pub(crate) fn parse_type_arguments(&mut self) -> Option<NodeList> {
        if !self.parse_optional(SyntaxKind::LessThanToken) {
            return None;
        }
        let pos = self.token_pos();
        let mut nodes = vec![self.parse_type()];
        while self.parse_optional(SyntaxKind::CommaToken) {
            nodes.push(self.parse_type());
        }
        let end = self.prev_end();
        self.parse_expected_greater_than();
        Some(NodeList::new(nodes, pos, end))
    }

    pub(crate) fn parse_type_parameters(&mut self) -> Option<NodeList> {
        if !self.is_token(SyntaxKind::LessThanToken) {
            return None;
        }
        self.next_token();
        let pos = self.token_pos();
        let mut nodes = Vec::new();
        while !self.is_token(SyntaxKind::GreaterThanToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let param_pos = self.token_pos();
            // `const T` and variance annotations
            while (self.is_token(SyntaxKind::ConstKeyword)
                || self.is_token(SyntaxKind::InKeyword)
                || self.token_text() == "out")
                && self.look_ahead(1).kind == SyntaxKind::Identifier
            {
                self.next_token();
            }
            let name = self.parse_identifier();
            let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            let default = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            nodes.push(self.arena.add_node(
                SyntaxKind::TypeParameter,
                param_pos,
                self.prev_end(),
                NodeData::TypeParameter(TypeParameterData {
                    name,
                    constraint,
                    default,
                }),
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        let end = self.prev_end();
        self.parse_expected_greater_than();
        Some(NodeList::new(nodes, pos, end))
    }

    // =========================================================================
    // Type members
    // =========================================================================

    /// `{ member; member }` of an interface or type literal.
    pub(crate) fn parse_type_members(&mut self) -> NodeList {
        self.parse_expected(SyntaxKind::OpenBraceToken, "{");
        let pos = self.token_pos();
        let mut nodes = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.current;
            if let Some(member) = self.parse_type_member() {
                nodes.push(member);
            }
            if self.current == before {
                self.parse_error_at_current("Property or signature expected.");
                self.next_token();
            }
        }
        let members = NodeList::new(nodes, pos, self.token_pos());
        self.parse_expected(SyntaxKind::CloseBraceToken, "}");
        members
    }

    fn parse_type_member(&mut self) -> Option<NodeIndex> {
        let pos = self.token_pos();

        // Call and construct signatures carry no name
        if self.is_token(SyntaxKind::OpenParenToken)
            || self.is_token(SyntaxKind::LessThanToken)
            || (self.is_token(SyntaxKind::NewKeyword)
                && self.look_ahead(1).kind == SyntaxKind::OpenParenToken)
        {
            self.parse_optional(SyntaxKind::NewKeyword);
            return Some(self.parse_method_signature_rest(pos, None, NodeIndex::NONE, false));
        }

        let modifiers = if self.is_contextual(SyntaxKind::ReadonlyKeyword) {
            self.parse_modifiers()
        } else {
            None
        };

        if self.is_token(SyntaxKind::OpenBracketToken) && self.look_ahead_is_index_signature() {
            return Some(self.parse_index_signature(pos, modifiers));
        }

        if (self.is_contextual(SyntaxKind::GetKeyword) || self.is_contextual(SyntaxKind::SetKeyword))
            && self.look_ahead_is_property_name(1)
            && !self.look_ahead(1).preceded_by_line_break
        {
            self.next_token();
        }

        if !self.is_property_name() {
            return None;
        }
        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);

        if self.is_token(SyntaxKind::OpenParenToken) || self.is_token(SyntaxKind::LessThanToken) {
            return Some(self.parse_method_signature_rest(pos, modifiers, name, question_token));
        }

        let type_annotation = self.parse_type_annotation();
        self.parse_type_member_separator();
        Some(self.arena.add_node(
            SyntaxKind::PropertySignature,
            pos,
            self.prev_end(),
            NodeData::Signature(SignatureData {
                modifiers,
                name,
                question_token,
                type_parameters: None,
                parameters: None,
                type_annotation,
            }),
        ))
    }

    fn parse_method_signature_rest(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
        name: NodeIndex,
        question_token: bool,
    ) -> NodeIndex {
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameter_list();
        let type_annotation = self.parse_type_annotation();
        self.parse_type_member_separator();
        self.arena.add_node(
            SyntaxKind::MethodSignature,
            pos,
            self.prev_end(),
            NodeData::Signature(SignatureData {
                modifiers,
                name,
                question_token,
                type_parameters,
                parameters: Some(parameters),
                type_annotation,
            }),
        )
    }

    /// `;` or `,` between members; a line break or `}` also ends a member.
    pub(crate) fn parse_type_member_separator(&mut self) {
        if self.parse_optional(SyntaxKind::SemicolonToken)
            || self.parse_optional(SyntaxKind::CommaToken)
        {
            return;
        }
        if !self.can_parse_semicolon() {
            self.parse_error_at_current("';' expected.");
        }
    }
}
