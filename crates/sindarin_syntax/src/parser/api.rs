/// Parse Sindarin source text into a syntax [`Tree`].
///
/// This is the main public entrypoint. It is error-tolerant: the returned
/// tree always covers the whole input, with malformed regions represented by
/// `Error` nodes and every problem recorded in [`Tree::diagnostics`].
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse(source: &str) -> Tree<'_> {
    Parser::new(source).parse()
}

/// Parse in strict mode: any diagnostic is a hard failure.
///
/// Thin wrapper over [`parse`] for front ends that require a fully valid
/// parse. `file_name` is used when rendering the diagnostics.
///
/// ## Errors
/// Returns a [`StrictError`] carrying the full diagnostics list if the
/// source contains any lexical or syntax error.
pub fn parse_strict<'src>(source: &'src str, file_name: &str) -> Result<Tree<'src>, StrictError> {
    let tree = parse(source);
    if tree.diagnostics().is_empty() {
        Ok(tree)
    } else {
        Err(StrictError::new(file_name, source, tree.diagnostics()))
    }
}
