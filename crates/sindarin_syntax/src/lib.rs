//! Syntax frontend for the Sindarin language: lexer, parser, syntax tree, diagnostics.
//!
//! This crate turns source text into a [`tree::Tree`] of tagged nodes with
//! named fields, preserving every input byte (including comments and
//! whitespace) in the token stream for exact-source reconstruction. It is
//! intentionally "syntax-only": no name resolution, no type checking, and no
//! evaluation; downstream tools consume the tree.
//!
//! ## Notes
//! - Parsing is error-tolerant by default: [`parse`] always returns a tree,
//!   with malformed regions covered by error nodes and reported in
//!   [`tree::Tree::diagnostics`]. [`parse_strict`] turns any diagnostic into
//!   a hard failure for compiler front ends.
//! - Vocabulary identity (keywords/operators/punctuation) comes from
//!   `sindarin_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! let tree = sindarin_syntax::parse("fn main() => return 0");
//! assert!(tree.diagnostics().is_empty());
//! ```

pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod tree;

pub use parser::{parse, parse_strict};
pub use tree::Tree;
