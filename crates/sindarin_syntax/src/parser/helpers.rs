/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming significant tokens (trivia is skipped transparently)
/// - Matching / expecting keywords, operators, and punctuation
/// - Start-set predicates for expressions, statements, and declarations
/// - Panic-mode recovery (`recover`) that wraps a bad region in an `Error`
///   node and resumes at the next statement/declaration boundary
impl<'src> Parser<'src> {
    // ========================================================================
    // Navigation
    // ========================================================================

    /// Index of the next significant (non-trivia) token.
    fn peek_idx(&self) -> usize {
        let mut i = self.pos.min(self.tokens.len() - 1);
        while i < self.tokens.len() - 1 && self.tokens[i].kind.is_trivia() {
            i += 1;
        }
        i
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.peek_idx()]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Kind of the significant token after the current one.
    fn peek_next_kind(&self) -> TokenKind {
        let mut i = self.peek_idx() + 1;
        while i < self.tokens.len() - 1 && self.tokens[i].kind.is_trivia() {
            i += 1;
        }
        self.tokens[i.min(self.tokens.len() - 1)].kind
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Consume the current token without attaching it anywhere.
    fn bump_raw(&mut self) -> TokenId {
        let idx = self.peek_idx();
        self.pos = idx + 1;
        TokenId::new(idx)
    }

    /// Consume the current token and attach it as a child.
    fn bump(&mut self, children: &mut Vec<Child>, field: Option<Field>) -> TokenId {
        let id = self.bump_raw();
        children.push(Child {
            field,
            element: Element::Token(id),
        });
        id
    }

    // ========================================================================
    // Matching and expecting
    // ========================================================================

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek_kind().is_keyword(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek_kind().is_operator(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek_kind().is_punctuation(id)
    }

    fn match_keyword(&mut self, children: &mut Vec<Child>, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.bump(children, None);
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, children: &mut Vec<Child>, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.bump(children, None);
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, children: &mut Vec<Child>, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.bump(children, None);
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, children: &mut Vec<Child>, id: KeywordId, msg: &str) -> ParseResult<TokenId> {
        if self.check_keyword(id) {
            Ok(self.bump(children, None))
        } else {
            Err(self.error_here(msg))
        }
    }

    fn expect_op(&mut self, children: &mut Vec<Child>, id: OperatorId, msg: &str) -> ParseResult<TokenId> {
        if self.check_op(id) {
            Ok(self.bump(children, None))
        } else {
            Err(self.error_here(msg))
        }
    }

    fn expect_punct(&mut self, children: &mut Vec<Child>, id: PunctuationId, msg: &str) -> ParseResult<TokenId> {
        if self.check_punct(id) {
            Ok(self.bump(children, None))
        } else {
            Err(self.error_here(msg))
        }
    }

    fn error_here(&self, msg: &str) -> Diagnostic {
        Diagnostic::syntax(format!("{}, found {}", msg, self.describe_current()), self.current_span())
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    fn element_span(&self, element: Element) -> Span {
        match element {
            Element::Node(id) => self.builder.span(id),
            Element::Token(id) => self.tokens[id.index()].span,
        }
    }

    /// Allocate a node whose span covers its children.
    fn alloc_node(&mut self, kind: NodeKind, children: Vec<Child>) -> NodeId {
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => Span::new(
                self.element_span(first.element).start,
                self.element_span(last.element).end,
            ),
            _ => self.current_span(),
        };
        self.builder.alloc(kind, span, children)
    }

    fn node_child(node: NodeId, field: Option<Field>) -> Child {
        Child {
            field,
            element: Element::Node(node),
        }
    }

    // ========================================================================
    // Start sets
    // ========================================================================

    /// Check if the current token can start an expression.
    fn at_expression_start(&self) -> bool {
        match self.peek_kind() {
            TokenKind::Ident
            | TokenKind::TypeIdent
            | TokenKind::Number(_)
            | TokenKind::String
            | TokenKind::InterpolatedStringStart
            | TokenKind::CharLiteral => true,
            TokenKind::Keyword(
                KeywordId::True | KeywordId::False | KeywordId::Nil | KeywordId::SelfKw | KeywordId::Arena,
            ) => true,
            TokenKind::Punctuation(PunctuationId::LParen | PunctuationId::LBrace) => true,
            TokenKind::Operator(
                OperatorId::Minus | OperatorId::Bang | OperatorId::PlusPlus | OperatorId::MinusMinus | OperatorId::Amp,
            ) => true,
            _ => false,
        }
    }

    /// Check if the current token can start a statement.
    fn at_statement_start(&self) -> bool {
        self.at_expression_start()
            || matches!(
                self.peek_kind(),
                TokenKind::Keyword(
                    KeywordId::Var
                        | KeywordId::If
                        | KeywordId::For
                        | KeywordId::While
                        | KeywordId::Match
                        | KeywordId::Return
                        | KeywordId::Break
                        | KeywordId::Continue
                )
            )
    }

    /// Check if the current token can only start a top-level declaration.
    fn at_declaration_start(&self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::PragmaHash
                | TokenKind::Punctuation(PunctuationId::At)
                | TokenKind::Keyword(
                    KeywordId::Import
                        | KeywordId::Fn
                        | KeywordId::Native
                        | KeywordId::Struct
                        | KeywordId::Type
                        | KeywordId::Static
                        | KeywordId::Shared
                        | KeywordId::Private
                )
        )
    }

    // ========================================================================
    // Error recovery
    // ========================================================================

    /// Panic-mode recovery for a failed statement or declaration.
    ///
    /// Rewinds to where the attempt started, discards any nodes it allocated,
    /// then consumes at least one token (and the rest of that source line up
    /// to the next declaration keyword) into an `Error` node.
    fn recover(&mut self, children: &mut Vec<Child>, start_pos: usize, checkpoint: usize, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
        self.builder.truncate(checkpoint);
        self.pos = start_pos;

        let mut skipped = Vec::new();
        let line = self.peek().line;
        self.bump(&mut skipped, None);
        while !self.is_at_end()
            && self.peek().line == line
            && !self.at_declaration_start()
            && !self.check_keyword(KeywordId::Else)
        {
            self.bump(&mut skipped, None);
        }
        let node = self.alloc_node(NodeKind::Error, skipped);
        children.push(Self::node_child(node, None));
    }
}
