//! Recursive-descent parser producing a `NodeArena`.
//!
//! The parser works over the scanner's pre-computed token vector, which makes
//! lookahead and speculative parsing (arrow functions, function types) a
//! matter of saving and restoring the token cursor.

mod state_expressions;
mod state_statements;
mod state_types;

use crate::base::{NodeIndex, NodeList};
use crate::node::{IdentifierData, NodeArena, NodeData, NodeFlags};
use crate::scanner::{Scanner, Token};
use crate::syntax_kind::SyntaxKind;
use tracing::trace;

/// A problem found while parsing. Parsing always runs to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
}

/// Guards against stack exhaustion on pathological nesting.
const MAX_RECURSION_DEPTH: u32 = 512;

pub struct ParserState<'a> {
    pub(crate) text: &'a str,
    tokens: Vec<Token>,
    current: usize,
    pub(crate) arena: NodeArena,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    recursion_depth: u32,
    /// Original tokens overwritten by `>>` splitting, for rewinding.
    token_splits: Vec<(usize, Token)>,
    /// Set while parsing a `for (... in ...)` head.
    pub(crate) disallow_in: bool,
}

impl<'a> ParserState<'a> {
    pub fn new(text: &'a str) -> Self {
        let (tokens, scanner_diagnostics) = Scanner::new(text).scan_all();
        let parse_diagnostics = scanner_diagnostics
            .into_iter()
            .map(|diag| ParseDiagnostic {
                start: diag.pos,
                length: diag.length,
                message: diag.message,
            })
            .collect();
        ParserState {
            text,
            arena: NodeArena::with_capacity(tokens.len()),
            tokens,
            current: 0,
            parse_diagnostics,
            recursion_depth: 0,
            token_splits: Vec::new(),
            disallow_in: false,
        }
    }

    /// Consume the parser, returning the arena and diagnostics sorted by position.
    pub fn into_parts(mut self) -> (NodeArena, Vec<ParseDiagnostic>) {
        self.parse_diagnostics.sort_by_key(|diag| diag.start);
        (self.arena, self.parse_diagnostics)
    }

    // =========================================================================
    // Token access
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> Token {
        self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    #[inline]
    pub(crate) fn token_kind(&self) -> SyntaxKind {
        self.token().kind
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.token_kind() == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.token().pos
    }

    /// End of the most recently consumed token: the end of the node being built.
    #[inline]
    pub(crate) fn prev_end(&self) -> u32 {
        if self.current == 0 {
            0
        } else {
            self.tokens[(self.current - 1).min(self.tokens.len() - 1)].end
        }
    }

    pub(crate) fn token_text(&self) -> &'a str {
        let token = self.token();
        self.text
            .get(token.pos as usize..token.end as usize)
            .unwrap_or("")
    }

    /// Token `n` positions ahead of the current one (0 is current).
    pub(crate) fn look_ahead(&self, n: usize) -> Token {
        self.tokens[(self.current + n).min(self.tokens.len() - 1)]
    }

    pub(crate) fn look_ahead_text(&self, n: usize) -> &'a str {
        let token = self.look_ahead(n);
        self.text
            .get(token.pos as usize..token.end as usize)
            .unwrap_or("")
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.token().preceded_by_line_break
    }

    pub(crate) fn next_token(&mut self) {
        if !self.is_token(SyntaxKind::EndOfFileToken) {
            self.current += 1;
        }
    }

    /// Contextual keyword check: an identifier token spelled as `kind`.
    pub(crate) fn is_contextual(&self, kind: SyntaxKind) -> bool {
        self.is_token(SyntaxKind::Identifier)
            && SyntaxKind::contextual_keyword(self.token_text()) == Some(kind)
    }

    pub(crate) fn is_contextual_at(&self, n: usize, kind: SyntaxKind) -> bool {
        self.look_ahead(n).kind == SyntaxKind::Identifier
            && SyntaxKind::contextual_keyword(self.look_ahead_text(n)) == Some(kind)
    }

    /// Identifier usable as a binding or reference name.
    pub(crate) fn is_identifier(&self) -> bool {
        self.is_token(SyntaxKind::Identifier)
    }

    /// Any word token: identifiers, contextual and reserved keywords.
    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        self.is_token(SyntaxKind::Identifier) || self.token_kind().is_reserved_word()
    }

    pub(crate) fn is_property_name(&self) -> bool {
        self.is_identifier_or_keyword()
            || matches!(
                self.token_kind(),
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::OpenBracketToken
            )
    }

    // =========================================================================
    // Expectation helpers
    // =========================================================================

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report `'<text>' expected.` without consuming.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind, text: &str) -> bool {
        if self.parse_optional(kind) {
            true
        } else {
            self.parse_error_at_current(&format!("'{text}' expected."));
            false
        }
    }

    /// Consume a `>` closing a type argument list, splitting `>>` and `>>>`.
    pub(crate) fn parse_expected_greater_than(&mut self) -> bool {
        let token = self.token();
        match token.kind {
            SyntaxKind::GreaterThanToken => {
                self.next_token();
                true
            }
            SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanEqualsToken => {
                let rest = match token.kind {
                    SyntaxKind::GreaterThanGreaterThanToken => SyntaxKind::GreaterThanToken,
                    SyntaxKind::GreaterThanGreaterThanGreaterThanToken => {
                        SyntaxKind::GreaterThanGreaterThanToken
                    }
                    _ => SyntaxKind::EqualsToken,
                };
                self.token_splits.push((self.current, token));
                self.tokens[self.current] = Token {
                    kind: rest,
                    pos: token.pos + 1,
                    end: token.end,
                    preceded_by_line_break: false,
                };
                true
            }
            _ => {
                self.parse_error_at_current("'>' expected.");
                false
            }
        }
    }

    pub(crate) fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.token_kind(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    /// Consume a statement terminator, honouring automatic semicolon insertion.
    pub(crate) fn parse_semicolon(&mut self) {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return;
        }
        if !self.can_parse_semicolon() {
            self.parse_error_at_current("';' expected.");
        }
    }

    pub(crate) fn parse_error_at_current(&mut self, message: &str) {
        let token = self.token();
        self.parse_error_at(token.pos, token.end.saturating_sub(token.pos), message);
    }

    pub(crate) fn parse_error_at(&mut self, start: u32, length: u32, message: &str) {
        // One diagnostic per position keeps cascades readable
        if self
            .parse_diagnostics
            .last()
            .is_some_and(|last| last.start == start)
        {
            return;
        }
        trace!(start, length, message, "parse error");
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: message.to_string(),
        });
    }

    // =========================================================================
    // Speculation and recursion
    // =========================================================================

    /// Run `f` speculatively; on `None` or any new diagnostic, rewind.
    ///
    /// Nodes allocated by a failed attempt stay in the arena unreachable from
    /// the root.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let saved_current = self.current;
        let saved_splits = self.token_splits.len();
        let saved_diagnostics = self.parse_diagnostics.len();
        let result = f(self);
        if result.is_some() && self.parse_diagnostics.len() == saved_diagnostics {
            return result;
        }
        self.current = saved_current;
        while self.token_splits.len() > saved_splits {
            if let Some((index, token)) = self.token_splits.pop() {
                self.tokens[index] = token;
            }
        }
        self.parse_diagnostics.truncate(saved_diagnostics);
        None
    }

    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            self.parse_error_at_current("Maximum nesting depth exceeded.");
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Shared node builders
    // =========================================================================

    /// Parse an identifier, or report and synthesize an empty one.
    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if self.is_identifier() || self.is_token(SyntaxKind::ThisKeyword) {
            return self.parse_identifier_name();
        }
        self.parse_error_at_current("Identifier expected.");
        self.create_missing_identifier()
    }

    /// Parse any word (keywords allowed) as an identifier node.
    pub(crate) fn parse_identifier_name(&mut self) -> NodeIndex {
        let token = self.token();
        let text = self.token_text().to_string();
        self.next_token();
        self.arena.add_node(
            SyntaxKind::Identifier,
            token.pos,
            token.end,
            NodeData::Identifier(IdentifierData { escaped_text: text }),
        )
    }

    pub(crate) fn create_missing_identifier(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.arena.add_node_with_flags(
            SyntaxKind::Identifier,
            NodeFlags::HAS_ERROR,
            pos,
            pos,
            NodeData::Identifier(IdentifierData {
                escaped_text: String::new(),
            }),
        )
    }

    /// Parse `open element (, element)* close` into a `NodeList`.
    pub(crate) fn parse_delimited_list(
        &mut self,
        close: SyntaxKind,
        close_text: &str,
        mut parse_element: impl FnMut(&mut Self) -> Option<NodeIndex>,
    ) -> NodeList {
        let pos = self.token_pos();
        let mut nodes = Vec::new();
        let mut has_trailing_comma = false;
        while !self.is_token(close) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.current;
            if let Some(element) = parse_element(self) {
                nodes.push(element);
            }
            if self.current == before {
                self.parse_error_at_current(&format!("'{close_text}' expected."));
                break;
            }
            if self.parse_optional(SyntaxKind::CommaToken) {
                has_trailing_comma = true;
                continue;
            }
            has_trailing_comma = false;
            if !self.is_token(close) {
                self.parse_error_at_current("',' expected.");
            }
        }
        let end = self.token_pos();
        NodeList {
            nodes,
            pos,
            end,
            has_trailing_comma,
        }
    }

    pub(crate) fn parse_modifiers(&mut self) -> Option<NodeList> {
        let pos = self.token_pos();
        let mut nodes = Vec::new();
        while let Some(kind) = self.modifier_kind_here() {
            let token = self.token();
            self.next_token();
            nodes.push(self.arena.add_token(kind, token.pos, token.end));
        }
        if nodes.is_empty() {
            None
        } else {
            let end = self.prev_end();
            Some(NodeList::new(nodes, pos, end))
        }
    }

    /// The modifier at the cursor, if the next token continues a declaration.
    fn modifier_kind_here(&self) -> Option<SyntaxKind> {
        let kind = match self.token_kind() {
            SyntaxKind::ExportKeyword => SyntaxKind::ExportKeyword,
            SyntaxKind::DefaultKeyword if self.look_ahead(1).kind != SyntaxKind::ColonToken => {
                SyntaxKind::DefaultKeyword
            }
            SyntaxKind::Identifier => {
                let kind = SyntaxKind::contextual_keyword(self.token_text())?;
                if !kind.is_modifier() {
                    return None;
                }
                kind
            }
            _ => return None,
        };
        // A modifier must be followed, on the same line, by something that
        // can continue the declaration; otherwise it is a name.
        let next = self.look_ahead(1);
        if next.preceded_by_line_break && kind != SyntaxKind::ExportKeyword {
            return None;
        }
        let continues = matches!(
            next.kind,
            SyntaxKind::Identifier
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::AsteriskToken
                | SyntaxKind::DotDotDotToken
                | SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
        ) || next.kind.is_reserved_word();
        continues.then_some(kind)
    }
}
