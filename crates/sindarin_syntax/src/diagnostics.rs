//! Diagnostics for the Sindarin syntax frontend.
//!
//! Parsing is error-tolerant: the lexer and parser record [`Diagnostic`]s and
//! keep going, so a tree always comes back. Strict consumers (compiler front
//! ends) use [`crate::parse_strict`], which converts the collected list into
//! a single [`StrictError`] rendered with source context via `miette`.

use crate::tree::Span;
use miette::{NamedSource, SourceSpan};
use std::fmt;
use thiserror::Error;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// The syntactic layer a diagnostic originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Unterminated literal/comment, invalid escape, malformed number.
    Lexical,
    /// Unexpected token, missing sub-production, unterminated block.
    Syntax,
    /// Reserved for input the disambiguation policy cannot resolve.
    ///
    /// The policy is total over the grammar, so seeing this kind indicates a
    /// bug in the parser rather than a user error.
    Ambiguity,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lexical => write!(f, "lexical error"),
            DiagnosticKind::Syntax => write!(f, "syntax error"),
            DiagnosticKind::Ambiguity => write!(f, "ambiguity error"),
        }
    }
}

/// A single lexical or syntax error with location information.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: DiagnosticKind::Lexical,
            severity: Severity::Error,
            message: message.into(),
            span,
        }
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: DiagnosticKind::Syntax,
            severity: Severity::Error,
            message: message.into(),
            span,
        }
    }

    /// Attach a named source so the diagnostic renders with context.
    pub fn rendered(&self, file_name: &str, source: &str) -> RenderedDiagnostic {
        RenderedDiagnostic {
            message: self.to_string(),
            src: NamedSource::new(file_name, source.to_string()),
            span: SourceSpan::new(self.span.start.into(), self.span.len()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// A [`Diagnostic`] bound to its source text, ready for terminal rendering.
#[derive(Debug, Error, miette::Diagnostic)]
#[error("{message}")]
pub struct RenderedDiagnostic {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label]
    span: SourceSpan,
}

/// Strict-mode failure: the full diagnostics list of a rejected parse.
#[derive(Debug, Error, miette::Diagnostic)]
#[error("{file_name}: found {count} syntax error(s)")]
pub struct StrictError {
    file_name: String,
    count: usize,
    #[related]
    related: Vec<RenderedDiagnostic>,
}

impl StrictError {
    pub(crate) fn new(file_name: &str, source: &str, diagnostics: &[Diagnostic]) -> Self {
        Self {
            file_name: file_name.to_string(),
            count: diagnostics.len(),
            related: diagnostics.iter().map(|d| d.rendered(file_name, source)).collect(),
        }
    }

    /// Number of diagnostics that caused the failure.
    pub fn count(&self) -> usize {
        self.count
    }
}
