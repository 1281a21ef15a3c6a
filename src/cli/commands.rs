//! Command implementations for the `sindarin` CLI.

use std::fs;
use std::path::Path;

use crate::cli::{CliError, CliResult};

fn read_source(file: &Path) -> CliResult<String> {
    fs::read_to_string(file).map_err(|e| CliError::failure(format!("cannot read {}: {}", file.display(), e)))
}

fn file_name(file: &Path) -> String {
    file.display().to_string()
}

/// Dump the token stream, trivia included, one token per line.
pub fn lex(file: &Path) -> CliResult<()> {
    let source = read_source(file)?;
    let lexed = sindarin_syntax::lexer::lex(&source);
    for token in &lexed.tokens {
        println!(
            "{:>4}:{:<4} {:?} {:?}",
            token.line,
            token.column,
            token.kind,
            &source[token.span.start..token.span.end]
        );
    }
    for diagnostic in &lexed.diagnostics {
        eprintln!("{}: {}", file_name(file), diagnostic);
    }
    Ok(())
}

/// Dump the syntax tree; error-tolerant, so this succeeds even on bad input.
pub fn parse(file: &Path) -> CliResult<()> {
    let source = read_source(file)?;
    let tree = sindarin_syntax::parse(&source);
    print!("{}", tree.dump());
    for diagnostic in tree.diagnostics() {
        let (line, column) = tree.line_col(diagnostic.span.start);
        eprintln!("{}:{}:{}: {}", file_name(file), line, column, diagnostic);
    }
    Ok(())
}

/// Strict parse: render diagnostics with source context and fail on any error.
pub fn check(file: &Path) -> CliResult<()> {
    let source = read_source(file)?;
    match sindarin_syntax::parse_strict(&source, &file_name(file)) {
        Ok(tree) => {
            tracing::debug!(declarations = tree.children(tree.root()).len(), "parse ok");
            println!("{}: ok", file_name(file));
            Ok(())
        }
        Err(error) => {
            let count = error.count();
            eprintln!("{:?}", miette::Report::new(error));
            Err(CliError::failure(format!(
                "{}: {} syntax error(s)",
                file_name(file),
                count
            )))
        }
    }
}
