//! Provide the canonical language vocabulary for the Sindarin toolchain.
//!
//! This crate is intentionally small and dependency-free. It contains the
//! registry-first vocabularies (keywords, operators, punctuation) shared by
//! the syntax frontend and any downstream tooling (type checker, native
//! binder, editors).
//!
//! ## Notes
//!
//! - This is vocabulary only: **no IO**, no global state, and no syntax-tree
//!   types. Tokenization and parsing live in `sindarin_syntax`.

pub mod lang;
