//! Operator vocabulary.
//!
//! This module defines the canonical operator set (symbol operators like `+`
//! and word operators like `is`) along with precedence, associativity, and
//! fixity metadata. Higher precedence binds tighter; the scale matches the
//! expression ladder in `sindarin_syntax::parser`.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Word operators (`is`, `as`) are lexed as keywords; those entries have
//!   [`OperatorInfo::is_keyword_spelling`] set to `true` and exist here for
//!   precedence metadata only.
//! - `!` is listed with prefix fixity (logical not); the same spelling also
//!   acts as the postfix sync marker, which the parser handles at the postfix
//!   precedence level.
//! - `&` is the prefix spawn marker and binds looser than any binary operator.
//!
//! ## Examples
//! ```rust
//! use sindarin_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("&&"), Some(OperatorId::AndAnd));
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Define whether an operator is infix (binary), prefix, or postfix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    Postfix,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    AndAnd,
    OrOr,
    Bang,

    // Increment / decrement
    PlusPlus,
    MinusMinus,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,

    // Range
    DotDot,

    // Concurrency markers
    Amp,

    // Word operators
    Is,
    As,
}

/// Metadata for an operator.
///
/// ## Notes
/// - `precedence` is a relative ordering where higher binds tighter; the
///   absolute scale must stay consistent with the parser's expression ladder.
/// - Assignment operators carry precedence 0: they are statement-level and
///   never participate in expression climbing.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub is_keyword_spelling: bool,
}

const fn op(
    id: OperatorId,
    spelling: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixity,
        is_keyword_spelling: false,
    }
}

const fn word_op(
    id: OperatorId,
    spelling: &'static str,
    precedence: u8,
    associativity: Associativity,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixity: Fixity::Infix,
        is_keyword_spelling: true,
    }
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Logical
    op(OperatorId::OrOr, "||", 1, Associativity::Left, Fixity::Infix),
    op(OperatorId::AndAnd, "&&", 2, Associativity::Left, Fixity::Infix),
    // Comparison / range (level 3, left-associative)
    op(OperatorId::EqEq, "==", 3, Associativity::Left, Fixity::Infix),
    op(OperatorId::NotEq, "!=", 3, Associativity::Left, Fixity::Infix),
    op(OperatorId::Lt, "<", 3, Associativity::Left, Fixity::Infix),
    op(OperatorId::LtEq, "<=", 3, Associativity::Left, Fixity::Infix),
    op(OperatorId::Gt, ">", 3, Associativity::Left, Fixity::Infix),
    op(OperatorId::GtEq, ">=", 3, Associativity::Left, Fixity::Infix),
    op(OperatorId::DotDot, "..", 3, Associativity::Left, Fixity::Infix),
    word_op(OperatorId::Is, "is", 3, Associativity::Left),
    // Additive / multiplicative
    op(OperatorId::Plus, "+", 4, Associativity::Left, Fixity::Infix),
    op(OperatorId::Minus, "-", 4, Associativity::Left, Fixity::Infix),
    op(OperatorId::Star, "*", 5, Associativity::Left, Fixity::Infix),
    op(OperatorId::Slash, "/", 5, Associativity::Left, Fixity::Infix),
    op(OperatorId::Percent, "%", 5, Associativity::Left, Fixity::Infix),
    // Cast
    word_op(OperatorId::As, "as", 6, Associativity::Left),
    // Unary prefix
    op(OperatorId::Bang, "!", 7, Associativity::Right, Fixity::Prefix),
    op(OperatorId::PlusPlus, "++", 7, Associativity::Right, Fixity::Prefix),
    op(OperatorId::MinusMinus, "--", 7, Associativity::Right, Fixity::Prefix),
    // Spawn (binds looser than any binary operator)
    op(OperatorId::Amp, "&", 0, Associativity::Right, Fixity::Prefix),
    // Assignment (statement-level only)
    op(OperatorId::Eq, "=", 0, Associativity::None, Fixity::Infix),
    op(OperatorId::PlusEq, "+=", 0, Associativity::None, Fixity::Infix),
    op(OperatorId::MinusEq, "-=", 0, Associativity::None, Fixity::Infix),
    op(OperatorId::StarEq, "*=", 0, Associativity::None, Fixity::Infix),
    op(OperatorId::SlashEq, "/=", 0, Associativity::None, Fixity::Infix),
    op(OperatorId::PercentEq, "%=", 0, Associativity::None, Fixity::Infix),
];

/// Resolve a spelling to an operator id.
pub fn from_str(s: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == s).map(|o| o.id)
}

/// Return the metadata entry for an operator id.
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS
        .iter()
        .find(|o| o.id == id)
        .expect("INVARIANT: every OperatorId has an OPERATORS entry")
}

/// Return the canonical spelling of an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Return `true` if this operator compounds an assignment (`+=` and friends).
pub fn is_compound_assignment(id: OperatorId) -> bool {
    matches!(
        id,
        OperatorId::PlusEq | OperatorId::MinusEq | OperatorId::StarEq | OperatorId::SlashEq | OperatorId::PercentEq
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_round_trip() {
        for o in OPERATORS {
            if o.is_keyword_spelling {
                // Word operators resolve through the keyword registry.
                continue;
            }
            assert_eq!(from_str(o.spelling), Some(o.id), "spelling {:?}", o.spelling);
            assert_eq!(as_str(o.id), o.spelling);
        }
    }

    #[test]
    fn test_precedence_ladder() {
        let prec = |id| info_for(id).precedence;
        assert!(prec(OperatorId::OrOr) < prec(OperatorId::AndAnd));
        assert!(prec(OperatorId::AndAnd) < prec(OperatorId::EqEq));
        assert_eq!(prec(OperatorId::EqEq), prec(OperatorId::DotDot));
        assert_eq!(prec(OperatorId::EqEq), prec(OperatorId::Is));
        assert!(prec(OperatorId::EqEq) < prec(OperatorId::Plus));
        assert!(prec(OperatorId::Plus) < prec(OperatorId::Star));
        assert!(prec(OperatorId::Star) < prec(OperatorId::As));
        assert!(prec(OperatorId::As) < prec(OperatorId::Bang));
    }

    #[test]
    fn test_compound_assignment_set() {
        assert!(is_compound_assignment(OperatorId::PlusEq));
        assert!(is_compound_assignment(OperatorId::PercentEq));
        assert!(!is_compound_assignment(OperatorId::Eq));
        assert!(!is_compound_assignment(OperatorId::Plus));
    }
}
