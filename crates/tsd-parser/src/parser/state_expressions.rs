//! Parser state - expressions.

use super::ParserState;
use crate::base::{NodeIndex, NodeList};
use crate::node::{
    AccessExprData, AsExprData, BinaryExprData, CallExprData, ComputedPropertyNameData,
    ConditionalExprData, FunctionData, LiteralData, LiteralExprData, NodeData, NodeFlags,
    ParameterData, PropertyAssignmentData, ShorthandPropertyData, UnaryExprData,
    WrappedExprData,
};
use crate::syntax_kind::SyntaxKind;

/// Precedence of `as`/`satisfies`, which bind like relational operators.
const RELATIONAL_PRECEDENCE: u8 = 7;

fn binary_precedence(kind: SyntaxKind) -> u8 {
    use SyntaxKind::*;
    match kind {
        BarBarToken | QuestionQuestionToken => 1,
        AmpersandAmpersandToken => 2,
        BarToken => 3,
        CaretToken => 4,
        AmpersandToken => 5,
        EqualsEqualsToken
        | ExclamationEqualsToken
        | EqualsEqualsEqualsToken
        | ExclamationEqualsEqualsToken => 6,
        LessThanToken
        | GreaterThanToken
        | LessThanEqualsToken
        | GreaterThanEqualsToken
        | InstanceOfKeyword
        | InKeyword => RELATIONAL_PRECEDENCE,
        LessThanLessThanToken
        | GreaterThanGreaterThanToken
        | GreaterThanGreaterThanGreaterThanToken => 8,
        PlusToken | MinusToken => 9,
        AsteriskToken | SlashToken | PercentToken => 10,
        AsteriskAsteriskToken => 11,
        _ => 0,
    }
}

/// Strip quotes and resolve simple escapes of a string literal.
fn cook_string(raw: &str) -> String {
    let inner = raw
        .get(1..raw.len().saturating_sub(1).max(1))
        .unwrap_or("");
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

impl<'a> ParserState<'a> {
    // =========================================================================
    // Expression entry points
    // =========================================================================

    /// Parse a comma-separated expression.
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut expr = self.parse_assignment_expression();
        while self.is_token(SyntaxKind::CommaToken) {
            self.next_token();
            let right = self.parse_assignment_expression();
            expr = self.arena.add_node(
                SyntaxKind::BinaryExpression,
                pos,
                self.prev_end(),
                NodeData::BinaryExpr(BinaryExprData {
                    left: expr,
                    operator_token: SyntaxKind::CommaToken,
                    right,
                }),
            );
        }
        expr
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.create_missing_identifier();
        }
        let expr = self.parse_assignment_expression_worker();
        self.exit_recursion();
        expr
    }

    fn parse_assignment_expression_worker(&mut self) -> NodeIndex {
        if let Some(arrow) = self.try_parse_arrow_function() {
            return arrow;
        }

        let pos = self.token_pos();
        let expr = self.parse_binary_expression(1);

        if self.is_token(SyntaxKind::QuestionToken) {
            self.next_token();
            let saved_disallow_in = self.disallow_in;
            self.disallow_in = false;
            let when_true = self.parse_assignment_expression();
            self.disallow_in = saved_disallow_in;
            self.parse_expected(SyntaxKind::ColonToken, ":");
            let when_false = self.parse_assignment_expression();
            return self.arena.add_node(
                SyntaxKind::ConditionalExpression,
                pos,
                self.prev_end(),
                NodeData::ConditionalExpr(ConditionalExprData {
                    condition: expr,
                    when_true,
                    when_false,
                }),
            );
        }

        let operator = self.token_kind();
        if operator.is_assignment_operator() {
            self.next_token();
            let right = self.parse_assignment_expression();
            return self.arena.add_node(
                SyntaxKind::BinaryExpression,
                pos,
                self.prev_end(),
                NodeData::BinaryExpr(BinaryExprData {
                    left: expr,
                    operator_token: operator,
                    right,
                }),
            );
        }
        expr
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    fn try_parse_arrow_function(&mut self) -> Option<NodeIndex> {
        let pos = self.token_pos();
        let is_async = self.is_contextual(SyntaxKind::AsyncKeyword)
            && !self.look_ahead(1).preceded_by_line_break
            && matches!(
                self.look_ahead(1).kind,
                SyntaxKind::Identifier | SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            );
        let offset = usize::from(is_async);
        let head = self.look_ahead(offset);
        let after_head = self.look_ahead(offset + 1);

        match head.kind {
            SyntaxKind::Identifier
                if after_head.kind == SyntaxKind::EqualsGreaterThanToken
                    && !after_head.preceded_by_line_break =>
            {
                if is_async {
                    self.next_token();
                }
                let param_pos = self.token_pos();
                let name = self.parse_identifier();
                let parameter = self.arena.add_node(
                    SyntaxKind::Parameter,
                    param_pos,
                    self.prev_end(),
                    NodeData::Parameter(ParameterData {
                        modifiers: None,
                        dot_dot_dot_token: false,
                        name,
                        question_token: false,
                        type_annotation: NodeIndex::NONE,
                        initializer: NodeIndex::NONE,
                    }),
                );
                let parameters = NodeList::new(vec![parameter], param_pos, self.prev_end());
                Some(self.finish_arrow_function(pos, is_async, None, parameters, NodeIndex::NONE))
            }
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => {
                if head.kind == SyntaxKind::OpenParenToken
                    && !matches!(
                        after_head.kind,
                        SyntaxKind::CloseParenToken
                            | SyntaxKind::DotDotDotToken
                            | SyntaxKind::Identifier
                            | SyntaxKind::ThisKeyword
                            | SyntaxKind::OpenBraceToken
                            | SyntaxKind::OpenBracketToken
                    )
                {
                    return None;
                }
                let (type_parameters, parameters, type_annotation) = self.try_parse(|p| {
                    if is_async {
                        p.next_token();
                    }
                    let type_parameters = p.parse_type_parameters();
                    if !p.is_token(SyntaxKind::OpenParenToken) {
                        return None;
                    }
                    let parameters = p.parse_parameter_list();
                    let type_annotation = p.parse_type_annotation();
                    let arrow = p.token();
                    (arrow.kind == SyntaxKind::EqualsGreaterThanToken
                        && !arrow.preceded_by_line_break)
                        .then_some((type_parameters, parameters, type_annotation))
                })?;
                Some(self.finish_arrow_function(
                    pos,
                    is_async,
                    type_parameters,
                    parameters,
                    type_annotation,
                ))
            }
            _ => None,
        }
    }

    fn finish_arrow_function(
        &mut self,
        pos: u32,
        is_async: bool,
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        type_annotation: NodeIndex,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken, "=>");
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            self.parse_assignment_expression()
        };
        self.arena.add_node(
            SyntaxKind::ArrowFunction,
            pos,
            self.prev_end(),
            NodeData::Function(FunctionData {
                modifiers: None,
                is_async,
                asterisk_token: false,
                name: NodeIndex::NONE,
                question_token: false,
                type_parameters,
                parameters,
                type_annotation,
                body,
            }),
        )
    }

    // =========================================================================
    // Binary and unary expressions
    // =========================================================================

    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let pos = self.token_pos();
        let mut left = self.parse_unary_expression();
        loop {
            let keyword = if self.is_contextual(SyntaxKind::AsKeyword) {
                Some(SyntaxKind::AsKeyword)
            } else if self.is_contextual(SyntaxKind::SatisfiesKeyword) {
                Some(SyntaxKind::SatisfiesKeyword)
            } else {
                None
            };
            if let Some(keyword) = keyword {
                if self.has_preceding_line_break() || RELATIONAL_PRECEDENCE < min_precedence {
                    break;
                }
                self.next_token();
                let type_node = self.parse_type();
                left = self.arena.add_node(
                    SyntaxKind::AsExpression,
                    pos,
                    self.prev_end(),
                    NodeData::AsExpr(AsExprData {
                        expression: left,
                        keyword,
                        type_node,
                    }),
                );
                continue;
            }

            let operator = self.token_kind();
            let precedence = binary_precedence(operator);
            if precedence == 0 || precedence < min_precedence {
                break;
            }
            if operator == SyntaxKind::InKeyword && self.disallow_in {
                break;
            }
            self.next_token();
            // `**` is right-associative
            let next_min = if operator == SyntaxKind::AsteriskAsteriskToken {
                precedence
            } else {
                precedence + 1
            };
            let right = self.parse_binary_expression(next_min);
            left = self.arena.add_node(
                SyntaxKind::BinaryExpression,
                pos,
                self.prev_end(),
                NodeData::BinaryExpr(BinaryExprData {
                    left,
                    operator_token: operator,
                    right,
                }),
            );
        }
        left
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let operator = self.token_kind();
        match operator {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::DeleteKeyword => {
                self.next_token();
                let operand = self.parse_unary_expression();
                self.arena.add_node(
                    SyntaxKind::PrefixUnaryExpression,
                    pos,
                    self.prev_end(),
                    NodeData::UnaryExpr(UnaryExprData { operator, operand }),
                )
            }
            SyntaxKind::TypeOfKeyword | SyntaxKind::VoidKeyword => {
                self.next_token();
                let expression = self.parse_unary_expression();
                let kind = if operator == SyntaxKind::TypeOfKeyword {
                    SyntaxKind::TypeOfExpression
                } else {
                    SyntaxKind::VoidExpression
                };
                self.arena.add_node(
                    kind,
                    pos,
                    self.prev_end(),
                    NodeData::WrappedExpr(WrappedExprData { expression }),
                )
            }
            SyntaxKind::Identifier if self.token_text() == "await" && self.is_await_operator() => {
                self.next_token();
                let expression = self.parse_unary_expression();
                self.arena.add_node(
                    SyntaxKind::AwaitExpression,
                    pos,
                    self.prev_end(),
                    NodeData::WrappedExpr(WrappedExprData { expression }),
                )
            }
            SyntaxKind::LessThanToken => {
                // `<T>expr` type assertion
                self.next_token();
                let type_node = self.parse_type();
                self.parse_expected_greater_than();
                let expression = self.parse_unary_expression();
                self.arena.add_node(
                    SyntaxKind::AsExpression,
                    pos,
                    self.prev_end(),
                    NodeData::AsExpr(AsExprData {
                        expression,
                        keyword: SyntaxKind::LessThanToken,
                        type_node,
                    }),
                )
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn is_await_operator(&self) -> bool {
        let next = self.look_ahead(1);
        !next.preceded_by_line_break
            && !matches!(
                next.kind,
                SyntaxKind::CloseParenToken
                    | SyntaxKind::CloseBracketToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::EqualsToken
                    | SyntaxKind::DotToken
                    | SyntaxKind::ColonToken
                    | SyntaxKind::EqualsGreaterThanToken
                    | SyntaxKind::EndOfFileToken
            )
    }

    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let operand = self.parse_left_hand_side_expression();
        let operator = self.token_kind();
        if matches!(operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
            && !self.has_preceding_line_break()
        {
            self.next_token();
            return self.arena.add_node(
                SyntaxKind::PostfixUnaryExpression,
                pos,
                self.prev_end(),
                NodeData::UnaryExpr(UnaryExprData { operator, operand }),
            );
        }
        operand
    }

    // =========================================================================
    // Member, call and new expressions
    // =========================================================================

    fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let expr = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        self.parse_member_expression_rest(pos, expr, true)
    }

    fn parse_new_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let callee_pos = self.token_pos();
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        let expression = self.parse_member_expression_rest(callee_pos, callee, false);
        let type_arguments = if self.is_token(SyntaxKind::LessThanToken) {
            self.try_parse(|p| p.parse_type_arguments())
        } else {
            None
        };
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            Some(self.parse_argument_list())
        } else {
            None
        };
        self.arena.add_node(
            SyntaxKind::NewExpression,
            pos,
            self.prev_end(),
            NodeData::CallExpr(CallExprData {
                expression,
                type_arguments,
                arguments,
            }),
        )
    }

    fn parse_member_expression_rest(
        &mut self,
        pos: u32,
        mut expr: NodeIndex,
        allow_call: bool,
    ) -> NodeIndex {
        loop {
            match self.token_kind() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_member_name();
                    expr = self.add_access(SyntaxKind::PropertyAccessExpression, pos, expr, name, false);
                }
                SyntaxKind::QuestionDotToken => {
                    self.next_token();
                    if self.is_token(SyntaxKind::OpenBracketToken) {
                        let argument = self.parse_element_access_argument();
                        expr = self.add_access(SyntaxKind::ElementAccessExpression, pos, expr, argument, true);
                    } else if self.is_token(SyntaxKind::OpenParenToken) {
                        let arguments = self.parse_argument_list();
                        expr = self.add_call(pos, expr, None, arguments, true);
                    } else {
                        let name = self.parse_member_name();
                        expr = self.add_access(SyntaxKind::PropertyAccessExpression, pos, expr, name, true);
                    }
                }
                SyntaxKind::OpenBracketToken => {
                    let argument = self.parse_element_access_argument();
                    expr = self.add_access(SyntaxKind::ElementAccessExpression, pos, expr, argument, false);
                }
                SyntaxKind::OpenParenToken if allow_call => {
                    let arguments = self.parse_argument_list();
                    expr = self.add_call(pos, expr, None, arguments, false);
                }
                SyntaxKind::LessThanToken if allow_call => {
                    let Some(type_arguments) = self.try_parse(|p| {
                        let type_arguments = p.parse_type_arguments();
                        if p.is_token(SyntaxKind::OpenParenToken) {
                            type_arguments
                        } else {
                            None
                        }
                    }) else {
                        break;
                    };
                    let arguments = self.parse_argument_list();
                    expr = self.add_call(pos, expr, Some(type_arguments), arguments, false);
                }
                SyntaxKind::ExclamationToken if !self.has_preceding_line_break() => {
                    self.next_token();
                    expr = self.arena.add_node(
                        SyntaxKind::NonNullExpression,
                        pos,
                        self.prev_end(),
                        NodeData::WrappedExpr(WrappedExprData { expression: expr }),
                    );
                }
                SyntaxKind::NoSubstitutionTemplateLiteral if allow_call => {
                    // Tagged template: modelled as a call without arguments
                    self.next_token();
                    expr = self.arena.add_node(
                        SyntaxKind::CallExpression,
                        pos,
                        self.prev_end(),
                        NodeData::CallExpr(CallExprData {
                            expression: expr,
                            type_arguments: None,
                            arguments: None,
                        }),
                    );
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_member_name(&mut self) -> NodeIndex {
        if self.is_identifier_or_keyword() {
            self.parse_identifier_name()
        } else {
            self.parse_error_at_current("Identifier expected.");
            self.create_missing_identifier()
        }
    }

    fn parse_element_access_argument(&mut self) -> NodeIndex {
        self.next_token();
        let saved_disallow_in = self.disallow_in;
        self.disallow_in = false;
        let argument = self.parse_expression();
        self.disallow_in = saved_disallow_in;
        self.parse_expected(SyntaxKind::CloseBracketToken, "]");
        argument
    }

    fn add_access(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        expression: NodeIndex,
        name_or_argument: NodeIndex,
        optional: bool,
    ) -> NodeIndex {
        let flags = if optional {
            NodeFlags::OPTIONAL_CHAIN
        } else {
            NodeFlags::empty()
        };
        self.arena.add_node_with_flags(
            kind,
            flags,
            pos,
            self.prev_end(),
            NodeData::AccessExpr(AccessExprData {
                expression,
                name_or_argument,
            }),
        )
    }

    fn add_call(
        &mut self,
        pos: u32,
        expression: NodeIndex,
        type_arguments: Option<NodeList>,
        arguments: NodeList,
        optional: bool,
    ) -> NodeIndex {
        let flags = if optional {
            NodeFlags::OPTIONAL_CHAIN
        } else {
            NodeFlags::empty()
        };
        self.arena.add_node_with_flags(
            SyntaxKind::CallExpression,
            flags,
            pos,
            self.prev_end(),
            NodeData::CallExpr(CallExprData {
                expression,
                type_arguments,
                arguments: Some(arguments),
            }),
        )
    }

    fn parse_argument_list(&mut self) -> NodeList {
        self.next_token();
        let saved_disallow_in = self.disallow_in;
        self.disallow_in = false;
        let list = self.parse_delimited_list(SyntaxKind::CloseParenToken, ")", |p| {
            if p.is_token(SyntaxKind::DotDotDotToken) {
                Some(p.parse_spread_element())
            } else if p.is_start_of_expression() {
                Some(p.parse_assignment_expression())
            } else {
                None
            }
        });
        self.disallow_in = saved_disallow_in;
        self.parse_expected(SyntaxKind::CloseParenToken, ")");
        list
    }

    fn parse_spread_element(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let expression = self.parse_assignment_expression();
        self.arena.add_node(
            SyntaxKind::SpreadElement,
            pos,
            self.prev_end(),
            NodeData::WrappedExpr(WrappedExprData { expression }),
        )
    }

    pub(crate) fn is_start_of_expression(&self) -> bool {
        !matches!(
            self.token_kind(),
            SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CommaToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::ColonToken
                | SyntaxKind::EqualsGreaterThanToken
                | SyntaxKind::EndOfFileToken
        )
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let token = self.token();
        match token.kind {
            SyntaxKind::Identifier => {
                if self.is_contextual(SyntaxKind::AsyncKeyword)
                    && self.look_ahead(1).kind == SyntaxKind::FunctionKeyword
                    && !self.look_ahead(1).preceded_by_line_break
                {
                    let modifiers = self.parse_modifiers();
                    return self.parse_function_like(
                        SyntaxKind::FunctionExpression,
                        token.pos,
                        modifiers,
                        false,
                    );
                }
                self.parse_identifier_name()
            }
            SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword => {
                self.next_token();
                self.arena.add_token(token.kind, token.pos, token.end)
            }
            SyntaxKind::ImportKeyword => self.parse_identifier_name(),
            SyntaxKind::NumericLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::RegularExpressionLiteral => self.parse_literal_node(),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => {
                self.parse_function_like(SyntaxKind::FunctionExpression, token.pos, None, false)
            }
            SyntaxKind::ClassKeyword => self.parse_class_declaration(token.pos, None),
            _ => {
                self.parse_error_at_current("Expression expected.");
                self.create_missing_identifier()
            }
        }
    }

    pub(crate) fn parse_literal_node(&mut self) -> NodeIndex {
        let token = self.token();
        let text = self.token_text().to_string();
        let value = match token.kind {
            SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral => {
                cook_string(&text)
            }
            _ => text.clone(),
        };
        self.next_token();
        self.arena.add_node(
            token.kind,
            token.pos,
            token.end,
            NodeData::Literal(LiteralData { text, value }),
        )
    }

    fn parse_parenthesized_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let saved_disallow_in = self.disallow_in;
        self.disallow_in = false;
        let expression = self.parse_expression();
        self.disallow_in = saved_disallow_in;
        self.parse_expected(SyntaxKind::CloseParenToken, ")");
        self.arena.add_node(
            SyntaxKind::ParenthesizedExpression,
            pos,
            self.prev_end(),
            NodeData::WrappedExpr(WrappedExprData { expression }),
        )
    }

    fn parse_array_literal(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let saved_disallow_in = self.disallow_in;
        self.disallow_in = false;
        let elements = self.parse_delimited_list(SyntaxKind::CloseBracketToken, "]", |p| {
            if p.is_token(SyntaxKind::CommaToken) {
                let hole = p.token_pos();
                Some(p.arena.add_token(SyntaxKind::OmittedExpression, hole, hole))
            } else if p.is_token(SyntaxKind::DotDotDotToken) {
                Some(p.parse_spread_element())
            } else if p.is_start_of_expression() {
                Some(p.parse_assignment_expression())
            } else {
                None
            }
        });
        self.disallow_in = saved_disallow_in;
        self.parse_expected(SyntaxKind::CloseBracketToken, "]");
        let end = self.prev_end();
        let multi_line = self.spans_lines(pos, end);
        self.arena.add_node(
            SyntaxKind::ArrayLiteralExpression,
            pos,
            end,
            NodeData::LiteralExpr(LiteralExprData {
                elements,
                multi_line,
            }),
        )
    }

    fn parse_object_literal(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let saved_disallow_in = self.disallow_in;
        self.disallow_in = false;
        let elements = self.parse_delimited_list(SyntaxKind::CloseBraceToken, "}", |p| {
            p.parse_object_literal_element()
        });
        self.disallow_in = saved_disallow_in;
        self.parse_expected(SyntaxKind::CloseBraceToken, "}");
        let end = self.prev_end();
        let multi_line = self.spans_lines(pos, end);
        self.arena.add_node(
            SyntaxKind::ObjectLiteralExpression,
            pos,
            end,
            NodeData::LiteralExpr(LiteralExprData {
                elements,
                multi_line,
            }),
        )
    }

    fn spans_lines(&self, pos: u32, end: u32) -> bool {
        self.text
            .get(pos as usize..end as usize)
            .is_some_and(|text| text.contains('\n'))
    }

    fn parse_object_literal_element(&mut self) -> Option<NodeIndex> {
        let pos = self.token_pos();
        if self.is_token(SyntaxKind::DotDotDotToken) {
            self.next_token();
            let expression = self.parse_assignment_expression();
            return Some(self.arena.add_node(
                SyntaxKind::SpreadAssignment,
                pos,
                self.prev_end(),
                NodeData::WrappedExpr(WrappedExprData { expression }),
            ));
        }

        let modifiers = if self.is_contextual(SyntaxKind::AsyncKeyword)
            && self.look_ahead_is_property_name(1)
            && !self.look_ahead(1).preceded_by_line_break
        {
            self.parse_modifiers()
        } else {
            None
        };

        if (self.is_contextual(SyntaxKind::GetKeyword) || self.is_contextual(SyntaxKind::SetKeyword))
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

        let asterisk = self.parse_optional(SyntaxKind::AsteriskToken);
        if !self.is_property_name() {
            return None;
        }
        let is_shorthand_candidate = self.is_identifier();
        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);

        if asterisk
            || modifiers.is_some()
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

        if self.parse_optional(SyntaxKind::ColonToken) {
            let initializer = self.parse_assignment_expression();
            return Some(self.arena.add_node(
                SyntaxKind::PropertyAssignment,
                pos,
                self.prev_end(),
                NodeData::PropertyAssignment(PropertyAssignmentData { name, initializer }),
            ));
        }

        if !is_shorthand_candidate {
            self.parse_expected(SyntaxKind::ColonToken, ":");
        }
        let object_assignment_initializer = self.parse_initializer();
        Some(self.arena.add_node(
            SyntaxKind::ShorthandPropertyAssignment,
            pos,
            self.prev_end(),
            NodeData::ShorthandProperty(ShorthandPropertyData {
                name,
                object_assignment_initializer,
            }),
        ))
    }

    /// Identifier, keyword, string, number or `[computed]` property name.
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        match self.token_kind() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => self.parse_literal_node(),
            SyntaxKind::OpenBracketToken => {
                let pos = self.token_pos();
                self.next_token();
                let expression = self.parse_assignment_expression();
                self.parse_expected(SyntaxKind::CloseBracketToken, "]");
                self.arena.add_node(
                    SyntaxKind::ComputedPropertyName,
                    pos,
                    self.prev_end(),
                    NodeData::ComputedPropertyName(ComputedPropertyNameData { expression }),
                )
            }
            _ if self.is_identifier_or_keyword() => self.parse_identifier_name(),
            _ => {
                self.parse_error_at_current("Property name expected.");
                self.create_missing_identifier()
            }
        }
    }
}

#[cfg(test)]
mod expression_tests {
    use super::cook_string;

    #[test]
    fn cooks_string_literals() {
        assert_eq!(cook_string("'abc'"), "abc");
        assert_eq!(cook_string(r#""a\"b""#), "a\"b");
        assert_eq!(cook_string(r"'a\nb'"), "a\nb");
        assert_eq!(cook_string("``"), "");
    }
}
