//! Punctuation vocabulary.
//!
//! This module defines the canonical set of non-operator punctuation tokens
//! used by the lexer/parser: delimiters, separators, and structural markers.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - This module is vocabulary only (spellings + metadata). It does not
//!   tokenize source text.
//!
//! ## Examples
//! ```rust
//! use sindarin_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("=>"), Some(PunctuationId::FatArrow));
//! assert_eq!(punctuation::as_str(PunctuationId::Ellipsis), "...");
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// Separators like `,` and `;`.
    Separator,
    /// Access/path markers like `.`.
    Access,
    /// Structural markers like `=>`, `@`, `...`.
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    // Separators
    Comma,
    Colon,
    Semicolon,

    // Access
    Dot,

    // Structural markers
    FatArrow,
    At,
    Ellipsis,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
}

const fn punct(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo { id, canonical, category }
}

/// Registry of all punctuation.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    punct(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    punct(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    punct(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    punct(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
    punct(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    punct(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter),
    punct(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    punct(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    punct(PunctuationId::Semicolon, ";", PunctuationCategory::Separator),
    punct(PunctuationId::Dot, ".", PunctuationCategory::Access),
    punct(PunctuationId::FatArrow, "=>", PunctuationCategory::Marker),
    punct(PunctuationId::At, "@", PunctuationCategory::Marker),
    punct(PunctuationId::Ellipsis, "...", PunctuationCategory::Marker),
];

/// Resolve a spelling to a punctuation id.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

/// Return the metadata entry for a punctuation id.
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("INVARIANT: every PunctuationId has a PUNCTUATION entry")
}

/// Return the canonical spelling of a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_round_trip() {
        for p in PUNCTUATION {
            assert_eq!(from_str(p.canonical), Some(p.id), "spelling {:?}", p.canonical);
            assert_eq!(as_str(p.id), p.canonical);
        }
    }

    #[test]
    fn test_no_duplicate_spellings() {
        for (i, a) in PUNCTUATION.iter().enumerate() {
            for b in &PUNCTUATION[i + 1..] {
                assert_ne!(a.canonical, b.canonical, "duplicate punctuation spelling");
            }
        }
    }
}
