//! Scanner: turns source text into a flat token stream.
//!
//! Trivia (whitespace and comments) is skipped; each token records whether a
//! line break preceded it, which the parser needs for ASI and for the
//! `x => ...` / postfix `!` restrictions.

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    /// Start of the token text (trivia excluded)
    pub pos: u32,
    /// End of the token text (exclusive)
    pub end: u32,
    pub preceded_by_line_break: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: u32,
    pub length: u32,
    pub message: String,
}

pub struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Scanner {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Scan the whole text. The last token is always `EndOfFileToken`.
    pub fn scan_all(mut self) -> (Vec<Token>, Vec<ScannerDiagnostic>) {
        if self.bytes.starts_with(b"#!") {
            self.skip_line();
        }
        loop {
            let line_break = self.skip_trivia();
            let start = self.pos;
            let kind = if self.pos >= self.bytes.len() {
                SyntaxKind::EndOfFileToken
            } else {
                self.scan_token()
            };
            self.tokens.push(Token {
                kind,
                pos: start as u32,
                end: self.pos as u32,
                preceded_by_line_break: line_break,
            });
            if kind == SyntaxKind::EndOfFileToken {
                break;
            }
        }
        (self.tokens, self.diagnostics)
    }

    fn error(&mut self, pos: usize, length: usize, message: &str) {
        self.diagnostics.push(ScannerDiagnostic {
            pos: pos as u32,
            length: length as u32,
            message: message.to_string(),
        });
    }

    #[inline]
    fn peek(&self, offset: usize) -> u8 {
        self.bytes.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn skip_line(&mut self) {
        while self.pos < self.bytes.len() && !matches!(self.bytes[self.pos], b'\n' | b'\r') {
            self.pos += 1;
        }
    }

    /// Skip whitespace and comments; returns true if a line break was seen.
    fn skip_trivia(&mut self) -> bool {
        let mut line_break = false;
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\n' | b'\r' => {
                    line_break = true;
                    self.pos += 1;
                }
                b' ' | b'\t' | 0x0b | 0x0c => self.pos += 1,
                b'/' if self.peek(1) == b'/' => self.skip_line(),
                b'/' if self.peek(1) == b'*' => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        if self.pos >= self.bytes.len() {
                            self.error(start, 2, "'*/' expected.");
                            break;
                        }
                        if self.bytes[self.pos] == b'*' && self.peek(1) == b'/' {
                            self.pos += 2;
                            break;
                        }
                        if matches!(self.bytes[self.pos], b'\n' | b'\r') {
                            line_break = true;
                        }
                        self.pos += 1;
                    }
                }
                byte if byte >= 0x80 => {
                    let ch = self.current_char();
                    if ch.is_whitespace() {
                        if matches!(ch, '\u{2028}' | '\u{2029}') {
                            line_break = true;
                        }
                        self.pos += ch.len_utf8();
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        line_break
    }

    fn current_char(&self) -> char {
        self.text[self.pos..].chars().next().unwrap_or('\0')
    }

    fn scan_token(&mut self) -> SyntaxKind {
        use SyntaxKind::*;
        let start = self.pos;
        let byte = self.bytes[start];
        match byte {
            b'"' | b'\'' => self.scan_string(byte),
            b'`' => self.scan_template(),
            b'0'..=b'9' => self.scan_number(),
            b'.' if self.peek(1).is_ascii_digit() => self.scan_number(),
            b'#' if is_identifier_start(self.peek(1) as char) => {
                self.pos += 1;
                self.scan_identifier_rest();
                Identifier
            }
            b'/' if self.regex_allowed() => self.scan_regex(),
            _ if is_identifier_start_byte(byte) || byte >= 0x80 => {
                let ch = self.current_char();
                if is_identifier_start(ch) {
                    self.scan_identifier_rest();
                    let word = &self.text[start..self.pos];
                    SyntaxKind::reserved_word(word).unwrap_or(Identifier)
                } else {
                    self.unknown_char()
                }
            }
            _ => self.scan_punctuation().unwrap_or_else(|| self.unknown_char()),
        }
    }

    fn unknown_char(&mut self) -> SyntaxKind {
        let start = self.pos;
        let len = self.current_char().len_utf8().max(1);
        self.pos += len;
        self.error(start, len, "Invalid character.");
        SyntaxKind::Unknown
    }

    fn scan_identifier_rest(&mut self) {
        while self.pos < self.bytes.len() {
            let byte = self.bytes[self.pos];
            if byte < 0x80 {
                if is_identifier_part_byte(byte) {
                    self.pos += 1;
                } else {
                    break;
                }
            } else {
                let ch = self.current_char();
                if ch.is_alphanumeric() {
                    self.pos += ch.len_utf8();
                } else {
                    break;
                }
            }
        }
    }

    fn scan_string(&mut self, quote: u8) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        loop {
            if self.pos >= self.bytes.len() || matches!(self.bytes[self.pos], b'\n' | b'\r') {
                self.error(start, self.pos - start, "Unterminated string literal.");
                break;
            }
            let byte = self.bytes[self.pos];
            self.pos += 1;
            if byte == b'\\' {
                self.pos = (self.pos + 1).min(self.bytes.len());
            } else if byte == quote {
                break;
            }
        }
        SyntaxKind::StringLiteral
    }

    /// Template literals are scanned as one token, substitutions included.
    fn scan_template(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut depth = 0u32;
        loop {
            if self.pos >= self.bytes.len() {
                self.error(start, self.pos - start, "Unterminated template literal.");
                break;
            }
            let byte = self.bytes[self.pos];
            self.pos += 1;
            match byte {
                b'\\' => self.pos = (self.pos + 1).min(self.bytes.len()),
                b'$' if depth == 0 && self.peek(0) == b'{' => {
                    self.pos += 1;
                    depth = 1;
                }
                b'{' if depth > 0 => depth += 1,
                b'}' if depth > 0 => depth -= 1,
                b'\'' | b'"' if depth > 0 => {
                    self.pos -= 1;
                    self.scan_string(byte);
                }
                b'`' if depth == 0 => break,
                _ => {}
            }
        }
        SyntaxKind::NoSubstitutionTemplateLiteral
    }

    fn scan_number(&mut self) -> SyntaxKind {
        if self.bytes[self.pos] == b'0' && matches!(self.peek(1), b'x' | b'X' | b'o' | b'O' | b'b' | b'B')
        {
            self.pos += 2;
            while self.peek(0).is_ascii_hexdigit() || self.peek(0) == b'_' {
                self.pos += 1;
            }
        } else {
            while self.peek(0).is_ascii_digit() || self.peek(0) == b'_' {
                self.pos += 1;
            }
            if self.peek(0) == b'.' {
                self.pos += 1;
                while self.peek(0).is_ascii_digit() || self.peek(0) == b'_' {
                    self.pos += 1;
                }
            }
            if matches!(self.peek(0), b'e' | b'E') {
                let sign = usize::from(matches!(self.peek(1), b'+' | b'-'));
                if self.peek(1 + sign).is_ascii_digit() {
                    self.pos += 1 + sign;
                    while self.peek(0).is_ascii_digit() {
                        self.pos += 1;
                    }
                }
            }
        }
        if self.peek(0) == b'n' {
            self.pos += 1;
        }
        SyntaxKind::NumericLiteral
    }

    /// A `/` starts a regex unless the previous token can end an expression.
    fn regex_allowed(&self) -> bool {
        use SyntaxKind::*;
        match self.tokens.last() {
            None => true,
            Some(token) => !matches!(
                token.kind,
                Identifier
                    | NumericLiteral
                    | StringLiteral
                    | NoSubstitutionTemplateLiteral
                    | RegularExpressionLiteral
                    | CloseParenToken
                    | CloseBracketToken
                    | CloseBraceToken
                    | ThisKeyword
                    | TrueKeyword
                    | FalseKeyword
                    | NullKeyword
                    | SuperKeyword
                    | PlusPlusToken
                    | MinusMinusToken
            ),
        }
    }

    fn scan_regex(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut in_class = false;
        loop {
            if self.pos >= self.bytes.len() || matches!(self.bytes[self.pos], b'\n' | b'\r') {
                self.error(start, self.pos - start, "Unterminated regular expression literal.");
                return SyntaxKind::RegularExpressionLiteral;
            }
            let byte = self.bytes[self.pos];
            self.pos += 1;
            match byte {
                b'\\' => self.pos = (self.pos + 1).min(self.bytes.len()),
                b'[' => in_class = true,
                b']' => in_class = false,
                b'/' if !in_class => break,
                _ => {}
            }
        }
        while self.peek(0).is_ascii_alphabetic() {
            self.pos += 1;
        }
        SyntaxKind::RegularExpressionLiteral
    }

    fn scan_punctuation(&mut self) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        // Longest match first
        const TABLE: &[(&str, SyntaxKind)] = &[
            (">>>", GreaterThanGreaterThanGreaterThanToken),
            ("...", DotDotDotToken),
            ("===", EqualsEqualsEqualsToken),
            ("!==", ExclamationEqualsEqualsToken),
            ("**", AsteriskAsteriskToken),
            ("||=", BarBarEqualsToken),
            ("&&=", AmpersandAmpersandEqualsToken),
            ("??=", QuestionQuestionEqualsToken),
            ("=>", EqualsGreaterThanToken),
            ("==", EqualsEqualsToken),
            ("!=", ExclamationEqualsToken),
            ("<=", LessThanEqualsToken),
            (">=", GreaterThanEqualsToken),
            ("<<", LessThanLessThanToken),
            (">>", GreaterThanGreaterThanToken),
            ("++", PlusPlusToken),
            ("--", MinusMinusToken),
            ("&&", AmpersandAmpersandToken),
            ("||", BarBarToken),
            ("??", QuestionQuestionToken),
            ("+=", PlusEqualsToken),
            ("-=", MinusEqualsToken),
            ("*=", AsteriskEqualsToken),
            ("/=", SlashEqualsToken),
            ("%=", PercentEqualsToken),
            ("&=", AmpersandEqualsToken),
            ("|=", BarEqualsToken),
            ("^=", CaretEqualsToken),
            ("{", OpenBraceToken),
            ("}", CloseBraceToken),
            ("(", OpenParenToken),
            (")", CloseParenToken),
            ("[", OpenBracketToken),
            ("]", CloseBracketToken),
            (".", DotToken),
            (";", SemicolonToken),
            (",", CommaToken),
            ("<", LessThanToken),
            (">", GreaterThanToken),
            ("+", PlusToken),
            ("-", MinusToken),
            ("*", AsteriskToken),
            ("/", SlashToken),
            ("%", PercentToken),
            ("&", AmpersandToken),
            ("|", BarToken),
            ("^", CaretToken),
            ("!", ExclamationToken),
            ("~", TildeToken),
            ("?", QuestionToken),
            (":", ColonToken),
            ("@", AtToken),
            ("=", EqualsToken),
        ];

        let rest = &self.bytes[self.pos..];
        // `?.` followed by a digit is a conditional, not optional chaining
        if rest.starts_with(b"?.") && !rest.get(2).is_some_and(u8::is_ascii_digit) {
            self.pos += 2;
            return Some(QuestionDotToken);
        }
        for (text, kind) in TABLE {
            if rest.starts_with(text.as_bytes()) {
                self.pos += text.len();
                return Some(*kind);
            }
        }
        None
    }
}

#[inline]
fn is_identifier_start_byte(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte == b'$'
}

#[inline]
fn is_identifier_part_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$' || (!ch.is_ascii() && ch.is_alphabetic())
}

#[cfg(test)]
mod scanner_tests {
    use super::*;

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        Scanner::new(text)
            .scan_all()
            .0
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn scans_binding_pattern_tokens() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("const { a, ...rest } = obj;"),
            vec![
                ConstKeyword,
                OpenBraceToken,
                Identifier,
                CommaToken,
                DotDotDotToken,
                Identifier,
                CloseBraceToken,
                EqualsToken,
                Identifier,
                SemicolonToken,
                EndOfFileToken,
            ]
        );
    }

    #[test]
    fn skips_comments_and_tracks_line_breaks() {
        let (tokens, diagnostics) = Scanner::new("a // one\n/* two\n */ b").scan_all();
        assert!(diagnostics.is_empty());
        assert_eq!(tokens.len(), 3);
        assert!(!tokens[0].preceded_by_line_break);
        assert!(tokens[1].preceded_by_line_break);
        assert_eq!(tokens[1].pos, 20);
    }

    #[test]
    fn distinguishes_regex_from_division() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("a / b"),
            vec![Identifier, SlashToken, Identifier, EndOfFileToken]
        );
        assert_eq!(
            kinds("x = /a[/]b/g"),
            vec![Identifier, EqualsToken, RegularExpressionLiteral, EndOfFileToken]
        );
    }

    #[test]
    fn template_literal_is_one_token() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("`a ${ {b: `c`}.b } d` + 1"),
            vec![NoSubstitutionTemplateLiteral, PlusToken, NumericLiteral, EndOfFileToken]
        );
    }

    #[test]
    fn reports_unterminated_string() {
        let (_, diagnostics) = Scanner::new("'abc\n").scan_all();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].pos, 0);
    }

    #[test]
    fn reserved_words_become_keywords() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("function interface"),
            vec![FunctionKeyword, Identifier, EndOfFileToken]
        );
    }
}
