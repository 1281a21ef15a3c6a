//! Token types for the Sindarin lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words (including primitive type names)
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! ## Notes
//! - Tokens carry no text payload: the text of any token is
//!   `&source[token.span]`. Spans share the source buffer by reference.
//! - Trivia kinds (whitespace and the three comment forms) stay in the token
//!   stream but are never attached to syntax-tree nodes; they exist so the
//!   concatenation of all token texts reproduces the input exactly.

use crate::tree::Span;
use sindarin_core::lang::keywords::{self, KeywordId};
use sindarin_core::lang::operators::OperatorId;
use sindarin_core::lang::punctuation::PunctuationId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Numeric literal forms, in the order the lexer tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// `\d+\.\d+([eE][+-]?\d+)?`
    Float,
    /// `\d+[lL]`
    Long,
    /// `0[xX][0-9a-fA-F]+`
    Hex,
    /// `0[bB][01]+`
    Binary,
    /// `\d+`
    Int,
}

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and literals ==========
    /// `[a-z_][a-zA-Z0-9_]*`, minus reserved words.
    Ident,
    /// `[A-Z][a-zA-Z0-9_]*`
    TypeIdent,
    Number(NumberKind),
    /// A complete plain string literal, quotes and escapes included.
    String,
    CharLiteral,
    /// `<...>` path, recognized only after `#pragma <kind>` or `@include`.
    AngleString,
    /// The `#pragma` introducer.
    PragmaHash,

    // ========== Interpolated string pieces ==========
    /// `$"`
    InterpolatedStringStart,
    /// A literal text run inside an interpolated string.
    StringContent,
    /// `\x` escape inside a string.
    EscapeSequence,
    /// `:spec` between an interpolated expression and its closing `}`.
    FormatSpecifier,
    /// The closing `"` of an interpolated string.
    InterpolatedStringEnd,

    // ========== Trivia ==========
    Whitespace,
    /// `// ...`
    LineComment,
    /// `/* ... */`
    BlockComment,
    /// `# ...` (any hash line that is not a `#pragma`)
    HashComment,

    // ========== Special ==========
    /// Unrecognized or malformed input region.
    Error,
    Eof,
}

impl TokenKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return `true` if this token is trivia (never attached to tree nodes).
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment | TokenKind::HashComment
        )
    }

    /// Return `true` if this keyword token names a primitive type.
    pub fn is_primitive_type(&self) -> bool {
        matches!(self, TokenKind::Keyword(k) if keywords::is_primitive_type(*k))
    }
}

/// A token with its kind, source span, and 1-based start position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span, line: u32, column: u32) -> Self {
        Self { kind, span, line, column }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
