/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()`
/// entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser
///   methods in a single module while avoiding a single “god file”.
/// - The parser is single-pass and error-tolerant: failures at statement or
///   declaration level are recovered by wrapping the offending region in an
///   `Error` node and resuming at the next boundary.
type ParseResult<T> = Result<T, Diagnostic>;

/// Parser state.
///
/// ## Notes
/// - `pos` indexes the full token stream; navigation helpers skip trivia so
///   comments and whitespace never reach the tree.
/// - `in_match_arms` marks that enclosing blocks must yield to a
///   `pattern =>` sequence (the one scoped-backtracking conflict point).
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    builder: TreeBuilder,
    diagnostics: Vec<Diagnostic>,
    in_match_arms: bool,
}

impl<'src> Parser<'src> {
    /// Create a parser for a source buffer; lexes it up front.
    pub fn new(source: &'src str) -> Self {
        let lexed = lexer::lex(source);
        Self {
            source,
            tokens: lexed.tokens,
            pos: 0,
            builder: TreeBuilder::new(),
            diagnostics: lexed.diagnostics,
            in_match_arms: false,
        }
    }

    /// Parse the entire token stream into a [`Tree`].
    ///
    /// Never fails: malformed regions become `Error` nodes and every problem
    /// is recorded in the tree's diagnostics list.
    pub fn parse(mut self) -> Tree<'src> {
        let mut items = Vec::new();
        while !self.is_at_end() {
            self.top_level_item(&mut items);
        }
        let span = Span::new(0, self.source.len());
        let root = self.builder.alloc(NodeKind::SourceFile, span, items);
        self.builder.finish(self.source, self.tokens, root, self.diagnostics)
    }
}
