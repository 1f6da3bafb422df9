//! Parser state - statements and declarations.

use super::ParserState;
use crate::base::{NodeIndex, NodeList};
use crate::node::{
    BindingElementData, BindingPatternData, BlockData, ClassLikeData, ExprStatementData,
    ExprWithTypeArgsData, ForInOfData, FunctionData, HeritageClauseData, IfStatementData,
    LoopData, NodeData, NodeFlags, ParameterData, PropertyDeclData, SignatureData,
    SourceFileData, TypeAliasData, VariableDeclarationData, VariableDeclarationListData,
    VariableStatementData,
};
use crate::syntax_kind::SyntaxKind;

impl<'a> ParserState<'a> {
    // =========================================================================
    // Source file and statement lists
    // =========================================================================

    /// Parse the whole text into a `SourceFile` node and return its index.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        let statements = self.parse_statement_list(SyntaxKind::EndOfFileToken);
        let end = self.text.len() as u32;
        self.arena.add_node(
            SyntaxKind::SourceFile,
            0,
            end,
            NodeData::SourceFile(SourceFileData { statements }),
        )
    }

    fn parse_statement_list(&mut self, terminator: SyntaxKind) -> NodeList {
        let pos = self.token_pos();
        let mut nodes = Vec::new();
        while !self.is_token(terminator) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.current;
            let statement = self.parse_statement();
            if statement.is_some() {
                nodes.push(statement);
            }
            if self.current == before {
                // Stray token: report it and move on
                self.parse_error_at_current("Declaration or statement expected.");
                self.next_token();
            }
        }
        let end = self.prev_end().max(pos);
        NodeList::new(nodes, pos, end)
    }

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let statement = self.parse_statement_worker();
        self.exit_recursion();
        statement
    }

    fn parse_statement_worker(&mut self) -> NodeIndex {
        match self.token_kind() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                let pos = self.token_pos();
                self.next_token();
                self.arena
                    .add_token(SyntaxKind::EmptyStatement, pos, self.prev_end())
            }
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword | SyntaxKind::LetKeyword => {
                self.parse_variable_statement(self.token_pos(), None)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(self.token_pos(), None),
            SyntaxKind::ClassKeyword => self.parse_class_declaration(self.token_pos(), None),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_or_throw(SyntaxKind::ReturnStatement),
            SyntaxKind::ThrowKeyword => self.parse_return_or_throw(SyntaxKind::ThrowStatement),
            SyntaxKind::BreakKeyword | SyntaxKind::ContinueKeyword => {
                self.parse_unsupported_statement(false)
            }
            SyntaxKind::ExportKeyword => self.parse_declaration_with_modifiers(),
            SyntaxKind::ImportKeyword
                if !matches!(
                    self.look_ahead(1).kind,
                    SyntaxKind::OpenParenToken | SyntaxKind::DotToken
                ) =>
            {
                self.parse_unsupported_statement(true)
            }
            SyntaxKind::DoKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::DefaultKeyword
            | SyntaxKind::CaseKeyword => self.parse_unsupported_statement(true),
            SyntaxKind::Identifier => self.parse_identifier_led_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// Statements that start with an identifier: contextual declarations,
    /// modifiers, or a plain expression statement.
    fn parse_identifier_led_statement(&mut self) -> NodeIndex {
        let next = self.look_ahead(1);
        if self.is_contextual(SyntaxKind::InterfaceKeyword)
            && next.kind == SyntaxKind::Identifier
            && !next.preceded_by_line_break
        {
            return self.parse_interface_declaration(self.token_pos(), None);
        }
        if self.is_contextual(SyntaxKind::TypeKeyword)
            && next.kind == SyntaxKind::Identifier
            && !next.preceded_by_line_break
        {
            return self.parse_type_alias_declaration(self.token_pos(), None);
        }
        if matches!(self.token_text(), "namespace" | "module")
            && next.kind == SyntaxKind::Identifier
            && !next.preceded_by_line_break
            && self.look_ahead(2).kind != SyntaxKind::EqualsToken
        {
            return self.parse_unsupported_statement(true);
        }
        let modifier_led = SyntaxKind::contextual_keyword(self.token_text())
            .is_some_and(|kind| kind.is_modifier())
            && !next.preceded_by_line_break
            && (next.kind.is_reserved_word() || next.kind == SyntaxKind::Identifier);
        if modifier_led {
            return self.parse_declaration_with_modifiers();
        }
        self.parse_expression_statement()
    }

    fn parse_declaration_with_modifiers(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let modifiers = self.parse_modifiers();
        match self.token_kind() {
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword | SyntaxKind::LetKeyword => {
                self.parse_variable_statement(pos, modifiers)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, modifiers),
            SyntaxKind::ClassKeyword => self.parse_class_declaration(pos, modifiers),
            SyntaxKind::Identifier if self.is_contextual(SyntaxKind::InterfaceKeyword) => {
                self.parse_interface_declaration(pos, modifiers)
            }
            SyntaxKind::Identifier if self.is_contextual(SyntaxKind::TypeKeyword) => {
                self.parse_type_alias_declaration(pos, modifiers)
            }
            _ if modifiers.is_none() => self.parse_expression_statement(),
            _ => self.parse_unsupported_statement(true),
        }
    }

    /// Skip a statement the parser does not model, keeping brackets balanced.
    fn parse_unsupported_statement(&mut self, report: bool) -> NodeIndex {
        let pos = self.token_pos();
        if report {
            self.parse_error_at_current("Statement is not supported and was skipped.");
        }
        let mut depth = 0u32;
        let mut first = true;
        loop {
            let token = self.token();
            if token.kind == SyntaxKind::EndOfFileToken {
                break;
            }
            if depth == 0 && !first && token.preceded_by_line_break {
                break;
            }
            first = false;
            match token.kind {
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                SyntaxKind::SemicolonToken if depth == 0 => {
                    self.next_token();
                    break;
                }
                _ => {}
            }
            self.next_token();
        }
        let end = self.prev_end().max(pos);
        self.arena
            .add_token(SyntaxKind::UnsupportedStatement, pos, end)
    }

    // =========================================================================
    // Blocks and simple statements
    // =========================================================================

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken, "{");
        let statements = self.parse_statement_list(SyntaxKind::CloseBraceToken);
        self.parse_expected(SyntaxKind::CloseBraceToken, "}");
        let end = self.prev_end();
        let multi_line = self
            .text
            .get(pos as usize..end as usize)
            .is_some_and(|text| text.contains('\n'));
        self.arena.add_node(
            SyntaxKind::Block,
            pos,
            end,
            NodeData::Block(BlockData {
                statements,
                multi_line,
            }),
        )
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let expression = self.parse_expression();
        self.parse_semicolon();
        self.arena.add_node(
            SyntaxKind::ExpressionStatement,
            pos,
            self.prev_end(),
            NodeData::ExprStatement(ExprStatementData { expression }),
        )
    }

    fn parse_return_or_throw(&mut self, kind: SyntaxKind) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        self.arena.add_node(
            kind,
            pos,
            self.prev_end(),
            NodeData::ExprStatement(ExprStatementData { expression }),
        )
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken, "(");
        let expression = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken, ")");
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_node(
            SyntaxKind::IfStatement,
            pos,
            self.prev_end(),
            NodeData::IfStatement(IfStatementData {
                expression,
                then_statement,
                else_statement,
            }),
        )
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken, "(");
        let condition = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken, ")");
        let statement = self.parse_statement();
        self.arena.add_node(
            SyntaxKind::WhileStatement,
            pos,
            self.prev_end(),
            NodeData::Loop(LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            }),
        )
    }

    fn parse_for_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken, "(");

        let saved_disallow_in = self.disallow_in;
        self.disallow_in = true;
        let initializer = match self.token_kind() {
            SyntaxKind::SemicolonToken => NodeIndex::NONE,
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword | SyntaxKind::LetKeyword => {
                self.parse_variable_declaration_list()
            }
            _ => self.parse_expression(),
        };
        self.disallow_in = saved_disallow_in;

        let in_of_kind = if self.is_contextual(SyntaxKind::OfKeyword) {
            Some(SyntaxKind::ForOfStatement)
        } else if self.is_token(SyntaxKind::InKeyword) {
            Some(SyntaxKind::ForInStatement)
        } else {
            None
        };

        if let Some(kind) = in_of_kind {
            self.next_token();
            let expression = self.parse_assignment_expression();
            self.parse_expected(SyntaxKind::CloseParenToken, ")");
            let statement = self.parse_statement();
            return self.arena.add_node(
                kind,
                pos,
                self.prev_end(),
                NodeData::ForInOf(ForInOfData {
                    initializer,
                    expression,
                    statement,
                }),
            );
        }

        self.parse_expected(SyntaxKind::SemicolonToken, ";");
        let condition = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::SemicolonToken, ";");
        let incrementor = if self.is_token(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::CloseParenToken, ")");
        let statement = self.parse_statement();
        self.arena.add_node(
            SyntaxKind::ForStatement,
            pos,
            self.prev_end(),
            NodeData::Loop(LoopData {
                initializer,
                condition,
                incrementor,
                statement,
            }),
        )
    }

    // =========================================================================
    // Variables and binding patterns
    // =========================================================================

    fn parse_variable_statement(&mut self, pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        let declaration_list = self.parse_variable_declaration_list();
        self.parse_semicolon();
        self.arena.add_node(
            SyntaxKind::VariableStatement,
            pos,
            self.prev_end(),
            NodeData::VariableStatement(VariableStatementData {
                modifiers,
                declaration_list,
            }),
        )
    }

    pub(crate) fn parse_variable_declaration_list(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let flags = match self.token_kind() {
            SyntaxKind::ConstKeyword => NodeFlags::CONST,
            SyntaxKind::LetKeyword => NodeFlags::LET,
            _ => NodeFlags::empty(),
        };
        self.next_token();

        let list_pos = self.token_pos();
        let mut nodes = vec![self.parse_variable_declaration()];
        while self.parse_optional(SyntaxKind::CommaToken) {
            nodes.push(self.parse_variable_declaration());
        }
        let declarations = NodeList::new(nodes, list_pos, self.prev_end());
        self.arena.add_node_with_flags(
            SyntaxKind::VariableDeclarationList,
            flags,
            pos,
            self.prev_end(),
            NodeData::VariableDeclarationList(VariableDeclarationListData { declarations }),
        )
    }

    fn parse_variable_declaration(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let name = self.parse_binding_name();
        let exclamation_token =
            !self.has_preceding_line_break() && self.parse_optional(SyntaxKind::ExclamationToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        self.arena.add_node(
            SyntaxKind::VariableDeclaration,
            pos,
            self.prev_end(),
            NodeData::VariableDeclaration(VariableDeclarationData {
                name,
                exclamation_token,
                type_annotation,
                initializer,
            }),
        )
    }

    /// `= expression`, or `NONE` when there is no initializer.
    pub(crate) fn parse_initializer(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        }
    }

    /// Identifier or binding pattern.
    pub(crate) fn parse_binding_name(&mut self) -> NodeIndex {
        match self.token_kind() {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            _ => self.parse_identifier(),
        }
    }

    fn parse_object_binding_pattern(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let elements = self.parse_delimited_list(SyntaxKind::CloseBraceToken, "}", |p| {
            p.parse_object_binding_element()
        });
        self.parse_expected(SyntaxKind::CloseBraceToken, "}");
        self.arena.add_node(
            SyntaxKind::ObjectBindingPattern,
            pos,
            self.prev_end(),
            NodeData::BindingPattern(BindingPatternData { elements }),
        )
    }

    fn parse_object_binding_element(&mut self) -> Option<NodeIndex> {
        let pos = self.token_pos();
        let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
        let mut property_name = NodeIndex::NONE;
        let name;
        if dot_dot_dot_token {
            name = self.parse_binding_name();
        } else {
            if !self.is_property_name() {
                return None;
            }
            let key = self.parse_property_name();
            if self.parse_optional(SyntaxKind::ColonToken) {
                property_name = key;
                name = self.parse_binding_name();
            } else {
                name = key;
            }
        }
        let initializer = self.parse_initializer();
        Some(self.arena.add_node(
            SyntaxKind::BindingElement,
            pos,
            self.prev_end(),
            NodeData::BindingElement(BindingElementData {
                dot_dot_dot_token,
                property_name,
                name,
                initializer,
            }),
        ))
    }

    fn parse_array_binding_pattern(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let elements = self.parse_delimited_list(SyntaxKind::CloseBracketToken, "]", |p| {
            if p.is_token(SyntaxKind::CommaToken) {
                let hole = p.token_pos();
                return Some(p.arena.add_token(SyntaxKind::OmittedExpression, hole, hole));
            }
            let element_pos = p.token_pos();
            let dot_dot_dot_token = p.parse_optional(SyntaxKind::DotDotDotToken);
            if !dot_dot_dot_token
                && !p.is_identifier()
                && !p.is_token(SyntaxKind::OpenBraceToken)
                && !p.is_token(SyntaxKind::OpenBracketToken)
            {
                return None;
            }
            let name = p.parse_binding_name();
            let initializer = p.parse_initializer();
            Some(p.arena.add_node(
                SyntaxKind::BindingElement,
                element_pos,
                p.prev_end(),
                NodeData::BindingElement(BindingElementData {
                    dot_dot_dot_token,
                    property_name: NodeIndex::NONE,
                    name,
                    initializer,
                }),
            ))
        });
        self.parse_expected(SyntaxKind::CloseBracketToken, "]");
        self.arena.add_node(
            SyntaxKind::ArrayBindingPattern,
            pos,
            self.prev_end(),
            NodeData::BindingPattern(BindingPatternData { elements }),
        )
    }

    // =========================================================================
    // Functions and parameters
    // =========================================================================

    fn parse_function_declaration(&mut self, pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        self.parse_function_like(SyntaxKind::FunctionDeclaration, pos, modifiers, true)
    }

    /// `function [*] [name] <signature> [body]`, for declarations and
    /// expressions.
    pub(crate) fn parse_function_like(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        modifiers: Option<NodeList>,
        allow_missing_body: bool,
    ) -> NodeIndex {
        let is_async = modifiers_contain_async(&self.arena, modifiers.as_ref());
        self.parse_expected(SyntaxKind::FunctionKeyword, "function");
        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameter_list();
        let type_annotation = self.parse_type_annotation();
        let body = self.parse_function_body(allow_missing_body);
        self.arena.add_node(
            kind,
            pos,
            self.prev_end(),
            NodeData::Function(FunctionData {
                modifiers,
                is_async,
                asterisk_token,
                name,
                question_token: false,
                type_parameters,
                parameters,
                type_annotation,
                body,
            }),
        )
    }

    /// A block body, or `NONE` for an overload signature ending in `;`.
    pub(crate) fn parse_function_body(&mut self, allow_missing_body: bool) -> NodeIndex {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            return self.parse_block();
        }
        if allow_missing_body {
            self.parse_semicolon();
        } else {
            self.parse_expected(SyntaxKind::OpenBraceToken, "{");
        }
        NodeIndex::NONE
    }

    pub(crate) fn parse_parameter_list(&mut self) -> NodeList {
        if !self.parse_expected(SyntaxKind::OpenParenToken, "(") {
            let pos = self.token_pos();
            return NodeList::new(Vec::new(), pos, pos);
        }
        let list = self.parse_delimited_list(SyntaxKind::CloseParenToken, ")", |p| {
            p.parse_parameter()
        });
        self.parse_expected(SyntaxKind::CloseParenToken, ")");
        list
    }

    pub(crate) fn parse_parameter(&mut self) -> Option<NodeIndex> {
        let pos = self.token_pos();
        let modifiers = self.parse_modifiers();
        let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
        if !self.is_identifier()
            && !self.is_token(SyntaxKind::ThisKeyword)
            && !self.is_token(SyntaxKind::OpenBraceToken)
            && !self.is_token(SyntaxKind::OpenBracketToken)
        {
            if modifiers.is_none() && !dot_dot_dot_token {
                return None;
            }
            self.parse_error_at_current("Parameter declaration expected.");
        }
        let name = self.parse_binding_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        Some(self.arena.add_node(
            SyntaxKind::Parameter,
            pos,
            self.prev_end(),
            NodeData::Parameter(ParameterData {
                modifiers,
                dot_dot_dot_token,
                name,
                question_token,
                type_annotation,
                initializer,
            }),
        ))
    }

    // =========================================================================
    // Classes, interfaces and type aliases
    // =========================================================================

    pub(crate) fn parse_class_declaration(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::ClassKeyword, "class");
        let name = if self.is_identifier() && !self.is_heritage_keyword() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        self.parse_expected(SyntaxKind::OpenBraceToken, "{");
        let members_pos = self.token_pos();
        let mut nodes = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let before = self.current;
            if let Some(member) = self.parse_class_member() {
                nodes.push(member);
            }
            if self.current == before {
                self.parse_error_at_current("Unexpected token. A class member was expected.");
                self.next_token();
            }
        }
        let members = NodeList::new(nodes, members_pos, self.token_pos());
        self.parse_expected(SyntaxKind::CloseBraceToken, "}");
        self.arena.add_node(
            SyntaxKind::ClassDeclaration,
            pos,
            self.prev_end(),
            NodeData::ClassLike(ClassLikeData {
                modifiers,
                name,
                type_parameters,
                heritage_clauses,
                members,
            }),
        )
    }

    fn is_heritage_keyword(&self) -> bool {
        self.is_token(SyntaxKind::ExtendsKeyword) || self.token_text() == "implements"
    }

    fn parse_heritage_clauses(&mut self) -> Option<NodeList> {
        let pos = self.token_pos();
        let mut nodes = Vec::new();
        while self.is_heritage_keyword() {
            let clause_pos = self.token_pos();
            let token = if self.is_token(SyntaxKind::ExtendsKeyword) {
                SyntaxKind::ExtendsKeyword
            } else {
                SyntaxKind::Identifier
            };
            self.next_token();
            let types_pos = self.token_pos();
            let mut types = Vec::new();
            loop {
                let expr_pos = self.token_pos();
                let expression = self.parse_entity_name();
                let type_arguments = self.parse_type_arguments();
                types.push(self.arena.add_node(
                    SyntaxKind::ExpressionWithTypeArguments,
                    expr_pos,
                    self.prev_end(),
                    NodeData::ExprWithTypeArgs(ExprWithTypeArgsData {
                        expression,
                        type_arguments,
                    }),
                ));
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            let types = NodeList::new(types, types_pos, self.prev_end());
            nodes.push(self.arena.add_node(
                SyntaxKind::HeritageClause,
                clause_pos,
                self.prev_end(),
                NodeData::HeritageClause(HeritageClauseData { token, types }),
            ));
        }
        if nodes.is_empty() {
            None
        } else {
            Some(NodeList::new(nodes, pos, self.prev_end()))
        }
    }

    fn parse_class_member(&mut self) -> Option<NodeIndex> {
        let pos = self.token_pos();
        let modifiers = self.parse_modifiers();

        if self.token_text() == "constructor"
            && self.look_ahead(1).kind == SyntaxKind::OpenParenToken
        {
            self.next_token();
            return Some(self.parse_method_rest(
                SyntaxKind::Constructor,
                pos,
                modifiers,
                NodeIndex::NONE,
                false,
            ));
        }

        if (self.is_contextual(SyntaxKind::GetKeyword) || self.is_contextual(SyntaxKind::SetKeyword))
            && !self.look_ahead(1).preceded_by_line_break
            && self.look_ahead_is_property_name(1)
        {
            let kind = if self.is_contextual(SyntaxKind::GetKeyword) {
                SyntaxKind::GetAccessor
            } else {
                SyntaxKind::SetAccessor
            };
            self.next_token();
            let name = self.parse_property_name();
            return Some(self.parse_method_rest(kind, pos, modifiers, name, false));
        }

        if self.is_token(SyntaxKind::OpenBracketToken) && self.look_ahead_is_index_signature() {
            return Some(self.parse_index_signature(pos, modifiers));
        }

        let asterisk = self.parse_optional(SyntaxKind::AsteriskToken);
        if !self.is_property_name() {
            return None;
        }
        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);

        if asterisk
            || self.is_token(SyntaxKind::OpenParenToken)
            || self.is_token(SyntaxKind::LessThanToken)
        {
            return Some(self.parse_method_rest(
                SyntaxKind::MethodDeclaration,
                pos,
                modifiers,
                name,
                question_token,
            ));
        }

        let exclamation_token = self.parse_optional(SyntaxKind::ExclamationToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        self.parse_semicolon();
        Some(self.arena.add_node(
            SyntaxKind::PropertyDeclaration,
            pos,
            self.prev_end(),
            NodeData::PropertyDecl(PropertyDeclData {
                modifiers,
                name,
                question_token,
                exclamation_token,
                type_annotation,
                initializer,
            }),
        ))
    }

    /// Signature and body of a method, accessor or constructor.
    pub(crate) fn parse_method_rest(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        modifiers: Option<NodeList>,
        name: NodeIndex,
        question_token: bool,
    ) -> NodeIndex {
        let is_async = modifiers_contain_async(&self.arena, modifiers.as_ref());
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameter_list();
        let type_annotation = self.parse_type_annotation();
        let body = self.parse_function_body(true);
        self.arena.add_node(
            kind,
            pos,
            self.prev_end(),
            NodeData::Function(FunctionData {
                modifiers,
                is_async,
                asterisk_token: false,
                name,
                question_token,
                type_parameters,
                parameters,
                type_annotation,
                body,
            }),
        )
    }

    pub(crate) fn look_ahead_is_property_name(&self, n: usize) -> bool {
        let kind = self.look_ahead(n).kind;
        kind == SyntaxKind::Identifier
            || kind.is_reserved_word()
            || matches!(
                kind,
                SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::OpenBracketToken
            )
    }

    /// `[name: T]` as opposed to a computed property name.
    pub(crate) fn look_ahead_is_index_signature(&self) -> bool {
        self.look_ahead(1).kind == SyntaxKind::Identifier
            && self.look_ahead(2).kind == SyntaxKind::ColonToken
    }

    pub(crate) fn parse_index_signature(
        &mut self,
        pos: u32,
        modifiers: Option<NodeList>,
    ) -> NodeIndex {
        self.next_token();
        let params_pos = self.token_pos();
        let parameter = self.parse_parameter();
        self.parse_expected(SyntaxKind::CloseBracketToken, "]");
        let parameters = parameter
            .map(|param| NodeList::new(vec![param], params_pos, self.prev_end()));
        let type_annotation = self.parse_type_annotation();
        self.parse_type_member_separator();
        self.arena.add_node(
            SyntaxKind::IndexSignature,
            pos,
            self.prev_end(),
            NodeData::Signature(SignatureData {
                modifiers,
                name: NodeIndex::NONE,
                question_token: false,
                type_parameters: None,
                parameters,
                type_annotation,
            }),
        )
    }

    fn parse_interface_declaration(&mut self, pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        self.next_token();
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = self.parse_type_members();
        self.arena.add_node(
            SyntaxKind::InterfaceDeclaration,
            pos,
            self.prev_end(),
            NodeData::ClassLike(ClassLikeData {
                modifiers,
                name,
                type_parameters,
                heritage_clauses,
                members,
            }),
        )
    }

    fn parse_type_alias_declaration(&mut self, pos: u32, modifiers: Option<NodeList>) -> NodeIndex {
        self.next_token();
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        self.parse_expected(SyntaxKind::EqualsToken, "=");
        let type_node = self.parse_type();
        self.parse_semicolon();
        self.arena.add_node(
            SyntaxKind::TypeAliasDeclaration,
            pos,
            self.prev_end(),
            NodeData::TypeAlias(TypeAliasData {
                modifiers,
                name,
                type_parameters,
                type_node,
            }),
        )
    }
}

fn modifiers_contain_async(arena: &crate::node::NodeArena, modifiers: Option<&NodeList>) -> bool {
    modifiers.is_some_and(|list| {
        list.iter()
            .any(|modifier| arena.is_kind(modifier, SyntaxKind::AsyncKeyword))
    })
}
