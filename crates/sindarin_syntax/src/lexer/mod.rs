//! Lexer for the Sindarin programming language.
//!
//! Handles tokenization including:
//! - Keywords and identifiers (lowercase) vs type identifiers (capitalized)
//! - Numeric literals (float, long, hex, binary, integer, tried in that order)
//! - Strings, char literals, and interpolated strings (`$"..."`) whose `{...}`
//!   holes re-enter normal expression lexing
//! - `#pragma` vs `#` hash comments, `//` and `/* */` comments
//! - Angle-bracket paths (`<stdio.h>`), recognized only in pragma/`@include`
//!   position
//!
//! ## Notes
//! - The lexer never fails: every byte of input lands in some token (trivia
//!   and `Error` tokens included), so concatenating all token texts always
//!   reproduces the input. Problems are reported as [`Diagnostic`]s alongside.
//!
//! ## Module Structure
//! - `tokens` - token types ([`TokenKind`], [`Token`], [`NumberKind`])

pub mod tokens;

pub use tokens::{keyword_id, NumberKind, Token, TokenKind};

use crate::diagnostics::Diagnostic;
use crate::tree::Span;
use sindarin_core::lang::operators::OperatorId;
use sindarin_core::lang::punctuation::PunctuationId;

/// Escape characters valid after a backslash in string/char literals.
const ESCAPE_CHARS: &[char] = &['n', 'r', 't', '\\', '"', '\'', '0'];

/// Pragma kinds the lexer must distinguish from hash comments.
const PRAGMA_KINDS: &[&str] = &["include", "link", "source", "pack"];

/// The result of tokenizing a source buffer.
///
/// The token stream always ends with an `Eof` token; `diagnostics` holds any
/// lexical errors encountered along the way.
#[derive(Debug)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

// ============================================================================
// LEXER STATE
// ============================================================================

/// Lexer for Sindarin source code.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line: u32,
    column: u32,
    /// Start position of the token currently being scanned.
    token_line: u32,
    token_column: u32,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            column: 1,
            token_line: 1,
            token_column: 1,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    pub fn tokenize(mut self) -> Lexed {
        while !self.is_at_end() {
            self.scan_token();
        }
        let end = Span::new(self.current_pos, self.current_pos);
        self.tokens.push(Token::new(TokenKind::Eof, end, self.line, self.column));
        Lexed {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    /// Byte at `offset` past the current position (ASCII lookahead only).
    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.current_pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Record the start of a new token and return its byte offset.
    fn begin_token(&mut self) -> usize {
        self.token_line = self.line;
        self.token_column = self.column;
        self.current_pos
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(
            kind,
            Span::new(start, self.current_pos),
            self.token_line,
            self.token_column,
        ));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add_token(TokenKind::Operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    fn error_token(&mut self, message: impl Into<String>, start: usize) {
        self.diagnostics
            .push(Diagnostic::lexical(message, Span::new(start, self.current_pos)));
        self.add_token(TokenKind::Error, start);
    }

    fn token_text(&self, token: &Token) -> &'a str {
        &self.source[token.span.start..token.span.end]
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.begin_token();

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            // Whitespace runs are trivia tokens so round-trip stays exact
            ' ' | '\t' | '\r' | '\n' => {
                while matches!(self.peek(), Some(' ' | '\t' | '\r' | '\n')) {
                    self.advance();
                }
                self.add_token(TokenKind::Whitespace, start);
            }

            // Comments and slash operators
            '/' => self.scan_slash(start),

            // `#pragma` vs hash comment
            '#' => self.scan_hash(start),

            // Operators and punctuation (maximal munch)
            '+' => self.operator(start, OperatorId::Plus, &[('+', OperatorId::PlusPlus), ('=', OperatorId::PlusEq)]),
            '-' => self.operator(
                start,
                OperatorId::Minus,
                &[('-', OperatorId::MinusMinus), ('=', OperatorId::MinusEq)],
            ),
            '*' => self.operator(start, OperatorId::Star, &[('=', OperatorId::StarEq)]),
            '%' => self.operator(start, OperatorId::Percent, &[('=', OperatorId::PercentEq)]),
            '!' => self.operator(start, OperatorId::Bang, &[('=', OperatorId::NotEq)]),
            '>' => self.operator(start, OperatorId::Gt, &[('=', OperatorId::GtEq)]),
            '&' => self.operator(start, OperatorId::Amp, &[('&', OperatorId::AndAnd)]),
            '<' => {
                if !self.try_angle_string(start) {
                    self.operator(start, OperatorId::Lt, &[('=', OperatorId::LtEq)]);
                }
            }
            '=' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::EqEq, start);
                } else if self.match_char('>') {
                    self.add_punct(PunctuationId::FatArrow, start);
                } else {
                    self.add_op(OperatorId::Eq, start);
                }
            }
            '.' => {
                if self.match_char('.') {
                    if self.match_char('.') {
                        self.add_punct(PunctuationId::Ellipsis, start);
                    } else {
                        self.add_op(OperatorId::DotDot, start);
                    }
                } else {
                    self.add_punct(PunctuationId::Dot, start);
                }
            }
            '|' => {
                if self.match_char('|') {
                    self.add_op(OperatorId::OrOr, start);
                } else {
                    self.error_token("unexpected character '|'", start);
                }
            }
            '(' => self.add_punct(PunctuationId::LParen, start),
            ')' => self.add_punct(PunctuationId::RParen, start),
            '[' => self.add_punct(PunctuationId::LBracket, start),
            ']' => self.add_punct(PunctuationId::RBracket, start),
            '{' => self.add_punct(PunctuationId::LBrace, start),
            '}' => self.add_punct(PunctuationId::RBrace, start),
            ',' => self.add_punct(PunctuationId::Comma, start),
            ':' => self.add_punct(PunctuationId::Colon, start),
            ';' => self.add_punct(PunctuationId::Semicolon, start),
            '@' => self.add_punct(PunctuationId::At, start),

            // Literals
            '"' => self.scan_string(start),
            '\'' => self.scan_char(start),
            '$' => {
                if self.match_char('"') {
                    self.scan_interpolated_string(start);
                } else {
                    self.error_token("unexpected character '$'", start);
                }
            }
            '0'..='9' => self.scan_number(start, c),

            // Identifiers and keywords
            c if c.is_ascii_lowercase() || c == '_' => self.scan_identifier(start),
            c if c.is_ascii_uppercase() => self.scan_type_identifier(start),

            c => self.error_token(format!("unexpected character '{}'", c), start),
        }
    }

    /// Try to match a compound operator, falling back to the simple one.
    fn operator(&mut self, start: usize, simple: OperatorId, compounds: &[(char, OperatorId)]) {
        for (c, id) in compounds {
            if self.match_char(*c) {
                self.add_op(*id, start);
                return;
            }
        }
        self.add_op(simple, start);
    }

    // ========================================================================
    // Comments and pragmas
    // ========================================================================

    /// Scan `/`-introduced tokens: `//...`, `/*...*/`, `/=`, `/`.
    fn scan_slash(&mut self, start: usize) {
        if self.match_char('/') {
            while let Some(c) = self.peek() {
                if c == '\n' {
                    break;
                }
                self.advance();
            }
            self.add_token(TokenKind::LineComment, start);
        } else if self.match_char('*') {
            // Non-greedy: stop at the first `*/`
            loop {
                match self.advance() {
                    None => {
                        self.diagnostics.push(Diagnostic::lexical(
                            "unterminated block comment",
                            Span::new(start, self.current_pos),
                        ));
                        break;
                    }
                    Some('*') if self.peek() == Some('/') => {
                        self.advance();
                        break;
                    }
                    Some(_) => {}
                }
            }
            self.add_token(TokenKind::BlockComment, start);
        } else if self.match_char('=') {
            self.add_op(OperatorId::SlashEq, start);
        } else {
            self.add_op(OperatorId::Slash, start);
        }
    }

    /// Distinguish `#pragma <kind>` from a hash comment.
    ///
    /// `#pragma` followed by whitespace and a known pragma kind lexes as a
    /// `PragmaHash` token covering just `#pragma`; every other `#` line is a
    /// comment.
    fn scan_hash(&mut self, start: usize) {
        if self.pragma_follows() {
            for _ in 0.."pragma".len() {
                self.advance();
            }
            self.add_token(TokenKind::PragmaHash, start);
            return;
        }
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        self.add_token(TokenKind::HashComment, start);
    }

    fn pragma_follows(&self) -> bool {
        let Some(rest) = self.source[self.current_pos..].strip_prefix("pragma") else {
            return false;
        };
        let trimmed = rest.trim_start_matches([' ', '\t']);
        if trimmed.len() == rest.len() {
            return false;
        }
        let word_len = trimmed
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .count();
        PRAGMA_KINDS.contains(&&trimmed[..word_len])
    }

    // ========================================================================
    // Angle-bracket paths
    // ========================================================================

    /// Lex `<...>` as a single path token in pragma/`@include` position.
    ///
    /// Falls back to the `<` operator when out of context or when no `>`
    /// appears before the end of the line.
    fn try_angle_string(&mut self, start: usize) -> bool {
        if !self.in_angle_context() {
            return false;
        }
        let rest = &self.source[self.current_pos..];
        let Some(i) = rest.find(['>', '\n']) else {
            return false;
        };
        if i == 0 || !rest[i..].starts_with('>') {
            return false;
        }
        loop {
            match self.advance() {
                Some('>') | None => break,
                Some(_) => {}
            }
        }
        self.add_token(TokenKind::AngleString, start);
        true
    }

    fn in_angle_context(&self) -> bool {
        let mut significant = self.tokens.iter().rev().filter(|t| !t.kind.is_trivia());
        let (Some(prev), Some(prev2)) = (significant.next(), significant.next()) else {
            return false;
        };
        match (prev2.kind, prev.kind) {
            (TokenKind::PragmaHash, TokenKind::Ident) => true,
            (TokenKind::Punctuation(PunctuationId::At), TokenKind::Ident) => self.token_text(prev) == "include",
            _ => false,
        }
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn scan_string(&mut self, start: usize) {
        loop {
            match self.advance() {
                None => {
                    self.error_token("unterminated string literal", start);
                    return;
                }
                Some('"') => {
                    self.add_token(TokenKind::String, start);
                    return;
                }
                Some('\\') => match self.advance() {
                    Some(c) if ESCAPE_CHARS.contains(&c) => {}
                    Some(c) => self.diagnostics.push(Diagnostic::lexical(
                        format!("invalid escape sequence '\\{}'", c),
                        Span::new(self.current_pos - c.len_utf8() - 1, self.current_pos),
                    )),
                    None => {
                        self.error_token("unterminated string literal", start);
                        return;
                    }
                },
                Some(_) => {}
            }
        }
    }

    fn scan_char(&mut self, start: usize) {
        match self.peek() {
            None => {
                self.error_token("unterminated char literal", start);
                return;
            }
            Some('\'') => {
                self.advance();
                self.error_token("empty char literal", start);
                return;
            }
            Some('\\') => {
                self.advance();
                match self.advance() {
                    Some(c) if ESCAPE_CHARS.contains(&c) => {}
                    Some(c) => self.diagnostics.push(Diagnostic::lexical(
                        format!("invalid escape sequence '\\{}'", c),
                        Span::new(self.current_pos - c.len_utf8() - 1, self.current_pos),
                    )),
                    None => {
                        self.error_token("unterminated char literal", start);
                        return;
                    }
                }
            }
            Some(_) => {
                self.advance();
            }
        }
        if self.match_char('\'') {
            self.add_token(TokenKind::CharLiteral, start);
        } else {
            self.error_token("unterminated char literal", start);
        }
    }

    /// Scan an interpolated string after its `$"` introducer.
    ///
    /// Emits a flat token sequence: `InterpolatedStringStart`, then literal
    /// content, escapes, and `{...}` interpolation holes (which re-enter
    /// normal expression lexing), then `InterpolatedStringEnd`.
    fn scan_interpolated_string(&mut self, start: usize) {
        self.add_token(TokenKind::InterpolatedStringStart, start);
        loop {
            match self.peek() {
                None => {
                    self.diagnostics.push(Diagnostic::lexical(
                        "unterminated interpolated string",
                        Span::new(start, self.current_pos),
                    ));
                    return;
                }
                Some('"') => {
                    let s = self.begin_token();
                    self.advance();
                    self.add_token(TokenKind::InterpolatedStringEnd, s);
                    return;
                }
                Some('\\') => {
                    let s = self.begin_token();
                    self.advance();
                    match self.advance() {
                        Some(c) if ESCAPE_CHARS.contains(&c) => {}
                        Some(c) => self.diagnostics.push(Diagnostic::lexical(
                            format!("invalid escape sequence '\\{}'", c),
                            Span::new(s, self.current_pos),
                        )),
                        None => {}
                    }
                    self.add_token(TokenKind::EscapeSequence, s);
                }
                Some('{') => {
                    let s = self.begin_token();
                    self.advance();
                    self.add_punct(PunctuationId::LBrace, s);
                    self.scan_interpolation();
                }
                Some(_) => {
                    let s = self.begin_token();
                    while !matches!(self.peek(), None | Some('"' | '\\' | '{')) {
                        self.advance();
                    }
                    self.add_token(TokenKind::StringContent, s);
                }
            }
        }
    }

    /// Lex the inside of a `{expr[:format]}` interpolation hole.
    ///
    /// Expression tokens are produced by the ordinary dispatch; a `:` at
    /// brace depth zero starts the format specifier, and the matching `}`
    /// returns control to string scanning.
    fn scan_interpolation(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => {
                    self.diagnostics.push(Diagnostic::lexical(
                        "unterminated interpolation",
                        Span::new(self.current_pos, self.current_pos),
                    ));
                    return;
                }
                Some('}') if depth == 0 => {
                    let s = self.begin_token();
                    self.advance();
                    self.add_punct(PunctuationId::RBrace, s);
                    return;
                }
                Some(':') if depth == 0 => {
                    let s = self.begin_token();
                    self.advance();
                    while !matches!(self.peek(), None | Some('}')) {
                        self.advance();
                    }
                    self.add_token(TokenKind::FormatSpecifier, s);
                }
                Some('{') => {
                    depth += 1;
                    self.scan_token();
                }
                Some('}') => {
                    depth -= 1;
                    self.scan_token();
                }
                Some(_) => self.scan_token(),
            }
        }
    }

    /// Scan a numeric literal, trying float, long, hex, binary, then integer.
    fn scan_number(&mut self, start: usize, first: char) {
        if first == '0' && matches!(self.peek(), Some('x' | 'X')) {
            self.advance();
            let digits_start = self.current_pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
                self.advance();
            }
            if self.current_pos == digits_start {
                self.error_token("invalid numeric literal: expected digits after '0x'", start);
            } else {
                self.add_token(TokenKind::Number(NumberKind::Hex), start);
            }
            return;
        }
        if first == '0' && matches!(self.peek(), Some('b' | 'B')) {
            self.advance();
            let digits_start = self.current_pos;
            while matches!(self.peek(), Some('0' | '1')) {
                self.advance();
            }
            if self.current_pos == digits_start {
                self.error_token("invalid numeric literal: expected digits after '0b'", start);
            } else {
                self.add_token(TokenKind::Number(NumberKind::Binary), start);
            }
            return;
        }

        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }

        // Float requires a digit after the dot, so `1..2` stays integer-range-integer
        if self.peek() == Some('.') && matches!(self.peek_byte(1), Some(b) if b.is_ascii_digit()) {
            self.advance();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
            // Exponent only counts when digits follow it
            if matches!(self.peek(), Some('e' | 'E')) {
                let mut sign_len = 1;
                if matches!(self.peek_byte(1), Some(b'+' | b'-')) {
                    sign_len = 2;
                }
                if matches!(self.peek_byte(sign_len), Some(b) if b.is_ascii_digit()) {
                    for _ in 0..sign_len {
                        self.advance();
                    }
                    while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                        self.advance();
                    }
                }
            }
            self.add_token(TokenKind::Number(NumberKind::Float), start);
            return;
        }

        if matches!(self.peek(), Some('l' | 'L')) {
            self.advance();
            self.add_token(TokenKind::Number(NumberKind::Long), start);
            return;
        }

        self.add_token(TokenKind::Number(NumberKind::Int), start);
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }
        let spelling = &self.source[start..self.current_pos];
        // Reserved-word lookup goes through the registry (no allocation)
        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Ident, start);
        }
    }

    fn scan_type_identifier(&mut self, start: usize) {
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }
        self.add_token(TokenKind::TypeIdent, start);
    }
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Lexed {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sindarin_core::lang::keywords::{self, KeywordId};
    use sindarin_core::lang::operators::{self, OperatorId};
    use sindarin_core::lang::punctuation;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source)
            .tokens
            .into_iter()
            .filter(|t| !t.kind.is_trivia() && t.kind != TokenKind::Eof)
            .map(|t| t.kind)
            .collect()
    }

    fn round_trip(source: &str) -> String {
        lex(source)
            .tokens
            .iter()
            .map(|t| &source[t.span.start..t.span.end])
            .collect()
    }

    #[test]
    fn test_keyword_registry_parity() {
        for k in keywords::KEYWORDS {
            let lexed = lex(k.canonical);
            assert!(lexed.diagnostics.is_empty(), "lex({:?}) reported errors", k.canonical);
            assert_eq!(lexed.tokens.len(), 2, "expected keyword + EOF for {:?}", k.canonical);
            assert!(lexed.tokens[0].kind.is_keyword(k.id));
        }
    }

    #[test]
    fn test_operator_registry_parity() {
        for o in operators::OPERATORS {
            if o.is_keyword_spelling {
                // Word operators lex as keywords; precedence metadata only.
                continue;
            }
            let lexed = lex(o.spelling);
            assert!(lexed.diagnostics.is_empty(), "lex({:?}) reported errors", o.spelling);
            assert_eq!(lexed.tokens.len(), 2, "expected operator + EOF for {:?}", o.spelling);
            assert!(lexed.tokens[0].kind.is_operator(o.id));
        }
    }

    #[test]
    fn test_punctuation_registry_parity() {
        for p in punctuation::PUNCTUATION {
            let lexed = lex(p.canonical);
            assert!(lexed.diagnostics.is_empty(), "lex({:?}) reported errors", p.canonical);
            assert_eq!(lexed.tokens.len(), 2, "expected punctuation + EOF for {:?}", p.canonical);
            assert!(lexed.tokens[0].kind.is_punctuation(p.id));
        }
    }

    #[test]
    fn test_identifier_classes() {
        let tokens = kinds("point Point _tmp T42");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Ident,
                TokenKind::TypeIdent,
                TokenKind::Ident,
                TokenKind::TypeIdent
            ]
        );
    }

    #[test]
    fn test_keywords_are_reserved() {
        let tokens = kinds("struct structure");
        assert_eq!(
            tokens,
            vec![TokenKind::Keyword(KeywordId::Struct), TokenKind::Ident]
        );
    }

    #[test]
    fn test_number_forms() {
        let tokens = kinds("1.5 1.5e-3 42l 0xFF 0b101 7");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Number(NumberKind::Float),
                TokenKind::Number(NumberKind::Float),
                TokenKind::Number(NumberKind::Long),
                TokenKind::Number(NumberKind::Hex),
                TokenKind::Number(NumberKind::Binary),
                TokenKind::Number(NumberKind::Int),
            ]
        );
    }

    #[test]
    fn test_range_is_not_a_float() {
        let tokens = kinds("1..2");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Number(NumberKind::Int),
                TokenKind::Operator(OperatorId::DotDot),
                TokenKind::Number(NumberKind::Int),
            ]
        );
    }

    #[test]
    fn test_exponent_needs_digits() {
        // `1.5e` is a float followed by an identifier, not a malformed float
        let tokens = kinds("1.5e");
        assert_eq!(tokens, vec![TokenKind::Number(NumberKind::Float), TokenKind::Ident]);
    }

    #[test]
    fn test_invalid_hex_literal() {
        let lexed = lex("0x");
        assert_eq!(lexed.diagnostics.len(), 1);
        assert_eq!(lexed.tokens[0].kind, TokenKind::Error);
    }

    #[test]
    fn test_maximal_munch() {
        let tokens = kinds("a<=b ++c e!=f");
        assert!(tokens.contains(&TokenKind::Operator(OperatorId::LtEq)));
        assert!(tokens.contains(&TokenKind::Operator(OperatorId::PlusPlus)));
        assert!(tokens.contains(&TokenKind::Operator(OperatorId::NotEq)));
    }

    #[test]
    fn test_comment_forms_are_trivia() {
        let lexed = lex("// line\n/* block */\n# hash\nx");
        let significant: Vec<_> = lexed
            .tokens
            .iter()
            .filter(|t| !t.kind.is_trivia() && t.kind != TokenKind::Eof)
            .collect();
        assert_eq!(significant.len(), 1);
        assert_eq!(significant[0].kind, TokenKind::Ident);
        assert!(lexed.tokens.iter().any(|t| t.kind == TokenKind::LineComment));
        assert!(lexed.tokens.iter().any(|t| t.kind == TokenKind::BlockComment));
        assert!(lexed.tokens.iter().any(|t| t.kind == TokenKind::HashComment));
    }

    #[test]
    fn test_block_comment_is_non_greedy() {
        let lexed = lex("/* a */ x /* b */");
        let comments: Vec<_> = lexed
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::BlockComment)
            .collect();
        assert_eq!(comments.len(), 2);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let lexed = lex("/* never closed");
        assert_eq!(lexed.diagnostics.len(), 1);
        assert!(lexed.diagnostics[0].message.contains("unterminated block comment"));
    }

    #[test]
    fn test_pragma_vs_hash_comment() {
        let tokens = kinds("#pragma include <stdio.h>");
        assert_eq!(
            tokens,
            vec![TokenKind::PragmaHash, TokenKind::Ident, TokenKind::AngleString]
        );

        // Unknown pragma kinds and bare hash lines are comments
        assert!(kinds("#pragma frobnicate").is_empty());
        assert!(kinds("# plain comment").is_empty());
        assert!(kinds("#pragmatic").is_empty());
    }

    #[test]
    fn test_angle_string_only_in_context() {
        // Out of pragma position, `<` is an operator
        let tokens = kinds("a < b");
        assert!(tokens.contains(&TokenKind::Operator(OperatorId::Lt)));

        let tokens = kinds("@include <math.h>");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Punctuation(punctuation::PunctuationId::At),
                TokenKind::Ident,
                TokenKind::AngleString
            ]
        );
    }

    #[test]
    fn test_angle_string_requires_close_on_line() {
        let tokens = kinds("#pragma include <stdio\nx");
        // No `>` before the newline: falls back to the `<` operator
        assert!(tokens.contains(&TokenKind::Operator(OperatorId::Lt)));
    }

    #[test]
    fn test_strings_and_chars() {
        let tokens = kinds(r#""hello\n" 'c' '\0'"#);
        assert_eq!(
            tokens,
            vec![TokenKind::String, TokenKind::CharLiteral, TokenKind::CharLiteral]
        );
    }

    #[test]
    fn test_invalid_escape_reports_but_keeps_token() {
        let lexed = lex(r#""bad\qescape""#);
        assert_eq!(lexed.diagnostics.len(), 1);
        assert!(lexed.diagnostics[0].message.contains("invalid escape"));
        assert_eq!(lexed.tokens[0].kind, TokenKind::String);
    }

    #[test]
    fn test_unterminated_string() {
        let lexed = lex("\"no close");
        assert_eq!(lexed.diagnostics.len(), 1);
        assert_eq!(lexed.tokens[0].kind, TokenKind::Error);
    }

    #[test]
    fn test_interpolated_string_pieces() {
        let tokens = kinds(r#"$"Hello {name:s}!""#);
        assert_eq!(
            tokens,
            vec![
                TokenKind::InterpolatedStringStart,
                TokenKind::StringContent,
                TokenKind::Punctuation(punctuation::PunctuationId::LBrace),
                TokenKind::Ident,
                TokenKind::FormatSpecifier,
                TokenKind::Punctuation(punctuation::PunctuationId::RBrace),
                TokenKind::StringContent,
                TokenKind::InterpolatedStringEnd,
            ]
        );
    }

    #[test]
    fn test_interpolation_reenters_expression_lexing() {
        let tokens = kinds(r#"$"{a + b(1)}""#);
        assert!(tokens.contains(&TokenKind::Operator(OperatorId::Plus)));
        assert!(tokens.contains(&TokenKind::Punctuation(punctuation::PunctuationId::LParen)));
        assert!(tokens.contains(&TokenKind::Number(NumberKind::Int)));
    }

    #[test]
    fn test_interpolation_nested_braces() {
        // A struct literal inside the hole keeps its own braces balanced
        let tokens = kinds(r#"$"{Point{x: 1}}""#);
        assert_eq!(tokens.last(), Some(&TokenKind::InterpolatedStringEnd));
        let braces = tokens
            .iter()
            .filter(|k| {
                matches!(
                    k,
                    TokenKind::Punctuation(punctuation::PunctuationId::LBrace)
                        | TokenKind::Punctuation(punctuation::PunctuationId::RBrace)
                )
            })
            .count();
        assert_eq!(braces, 4);
    }

    #[test]
    fn test_round_trip_exact() {
        let sources = [
            "fn add(a: int, b: int): int => return a + b",
            "#pragma include <stdio.h>\nimport \"vec.sn\" as vec\n",
            "/* block */ var x: int = 0xFF // done\n",
            r#"$"Hello {name:s}!" 'c' "str""#,
            "struct Point => x: int y: int",
        ];
        for source in sources {
            assert_eq!(round_trip(source), source, "round trip failed for {:?}", source);
        }
    }

    #[test]
    fn test_round_trip_with_errors() {
        // Every byte is covered even when the input is garbage
        let sources = ["~ ?? |", "\"unterminated", "0x 0b 'x", "€ déjà"];
        for source in sources {
            assert_eq!(round_trip(source), source, "round trip failed for {:?}", source);
        }
    }

    #[test]
    fn test_line_and_column_tracking() {
        let lexed = lex("a\n  bb");
        assert_eq!((lexed.tokens[0].line, lexed.tokens[0].column), (1, 1));
        let bb = lexed
            .tokens
            .iter()
            .find(|t| t.kind == TokenKind::Ident && t.span.start > 0)
            .unwrap();
        assert_eq!((bb.line, bb.column), (2, 3));
    }
}
