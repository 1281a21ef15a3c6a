#![forbid(unsafe_code)]
//! Sindarin syntax toolchain.
//!
//! This crate ties the workspace together: it re-exports the syntax frontend
//! (`sindarin_syntax`) and provides the `sindarin` command-line driver for
//! inspecting lexer output, parse trees, and diagnostics.
//!
//! The frontend itself is deliberately small in scope: it recognizes
//! structure and reports it, well-formed or not. Semantic analysis, native
//! interop binding, and code generation are separate consumers of the tree
//! this crate produces.

pub mod cli;

pub use sindarin_syntax::{parse, parse_strict, Tree};
