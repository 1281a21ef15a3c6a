//! Parser for the Sindarin programming language.
//!
//! Converts source text into a [`Tree`] of tagged nodes with named fields,
//! following the Sindarin grammar: `=>`-introduced blocks, `#pragma` interop
//! directives, struct-based declarations, and the spawn/sync concurrency
//! markers.
//!
//! The parser is a hand-written recursive-descent/precedence-climbing
//! analyzer with three documented disambiguation rules:
//! 1. `is`/`as` always parse their right operand as a type, never a value.
//! 2. A type identifier immediately followed by `{` is a struct literal.
//! 3. Top-level declaration keywords are tried before the bare-statement
//!    fallback.
//!
//! Backtracking is scoped to the single genuine conflict point (a statement
//! inside `match` arms that re-parses as the next arm's `pattern =>`), so
//! parse time stays linear in practice.
//!
//! ## Examples
//!
//! ```rust
//! use sindarin_syntax::parser;
//!
//! let tree = parser::parse("fn main() => return 0");
//! assert!(tree.diagnostics().is_empty());
//! ```

use crate::diagnostics::{Diagnostic, StrictError};
use crate::lexer::{self, Token, TokenKind};
use crate::tree::{Child, Element, Field, NodeId, NodeKind, Span, TokenId, Tree, TreeBuilder};
use sindarin_core::lang::keywords::KeywordId;
use sindarin_core::lang::operators::{self, OperatorId};
use sindarin_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep
// all parser methods in the same Rust module (preserving privacy + call
// patterns) while avoiding a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
