/// Statement parsing methods.
///
/// This chunk parses statement forms (`var`, `if`, `for`, `while`, `match`,
/// `return`, assignments, bare expressions) and the undelimited blocks that
/// `=>` introduces.
///
/// ## Notes
/// - A block is one or more statements; there is no syntax for an explicitly
///   empty body. A construct whose body may be absent simply has no `body`
///   field. `if`/`else` are the exception: an absent consequence is a syntax
///   error, recorded without aborting the parse.
/// - Inside `match` arms a statement that re-parses as `pattern =>` belongs
///   to the next arm; `block_opt` detects this with scoped backtracking.
impl<'src> Parser<'src> {
    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self) -> ParseResult<NodeId> {
        match self.peek_kind() {
            TokenKind::Keyword(KeywordId::Var) => self.variable_declaration(),
            TokenKind::Keyword(KeywordId::If) => self.if_statement(),
            TokenKind::Keyword(KeywordId::For) => self.for_statement(),
            TokenKind::Keyword(KeywordId::While) => self.while_statement(),
            TokenKind::Keyword(KeywordId::Match) => self.match_statement(),
            TokenKind::Keyword(KeywordId::Return) => self.return_statement(),
            TokenKind::Keyword(KeywordId::Break) => {
                let mut children = Vec::new();
                self.bump(&mut children, None);
                Ok(self.alloc_node(NodeKind::BreakStatement, children))
            }
            TokenKind::Keyword(KeywordId::Continue) => {
                let mut children = Vec::new();
                self.bump(&mut children, None);
                Ok(self.alloc_node(NodeKind::ContinueStatement, children))
            }
            _ if self.at_expression_start() => self.expression_or_assignment_statement(),
            _ => Err(self.error_here("Expected statement")),
        }
    }

    // ========================================================================
    // Blocks
    // ========================================================================

    /// Parse a block if at least one statement is present.
    ///
    /// The block ends at the first token that cannot start a statement
    /// (declaration keywords, `else`, end of input). Statement-level errors
    /// are recovered here, so one bad statement never loses the rest of the
    /// body.
    fn block_opt(&mut self) -> Option<NodeId> {
        let mut statements = Vec::new();
        loop {
            if !self.at_statement_start() {
                break;
            }
            let start_pos = self.pos;
            let checkpoint = self.builder.checkpoint();
            match self.statement() {
                Ok(node) => {
                    if self.in_match_arms
                        && self.builder.kind(node) == NodeKind::ExpressionStatement
                        && self.check_punct(PunctuationId::FatArrow)
                    {
                        // That expression is the next arm's pattern; rewind.
                        self.pos = start_pos;
                        self.builder.truncate(checkpoint);
                        break;
                    }
                    statements.push(Self::node_child(node, None));
                }
                Err(diagnostic) => self.recover(&mut statements, start_pos, checkpoint, diagnostic),
            }
        }
        if statements.is_empty() {
            None
        } else {
            Some(self.alloc_node(NodeKind::Block, statements))
        }
    }

    /// Attach a block under `field`, or report a syntax error if it is empty.
    ///
    /// Used for `if`/`else`, where an empty body must not silently succeed.
    fn required_block(&mut self, children: &mut Vec<Child>, field: Option<Field>, construct: &str) {
        match self.block_opt() {
            Some(body) => children.push(Self::node_child(body, field)),
            None => self.diagnostics.push(Diagnostic::syntax(
                format!("Expected at least one statement in {} body", construct),
                self.current_span(),
            )),
        }
    }

    // ========================================================================
    // Declarations usable as statements
    // ========================================================================

    /// `var name: Type (= value)?`; the type annotation is mandatory.
    fn variable_declaration(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_keyword(&mut children, KeywordId::Var, "Expected 'var'")?;
        self.expect_ident(&mut children, Some(Field::Name), "Expected variable name")?;
        self.expect_punct(&mut children, PunctuationId::Colon, "Expected ':' after variable name")?;
        let ty = self.type_expr()?;
        children.push(Self::node_child(ty, Some(Field::Type)));
        if self.match_op(&mut children, OperatorId::Eq) {
            let value = self.expression()?;
            children.push(Child {
                field: Some(Field::Value),
                element: value,
            });
        }
        Ok(self.alloc_node(NodeKind::VariableDeclaration, children))
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    fn if_statement(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_keyword(&mut children, KeywordId::If, "Expected 'if'")?;
        let condition = self.expression()?;
        children.push(Child {
            field: Some(Field::Condition),
            element: condition,
        });
        self.expect_punct(&mut children, PunctuationId::FatArrow, "Expected '=>' after if condition")?;
        self.required_block(&mut children, Some(Field::Consequence), "'if'");
        if self.check_keyword(KeywordId::Else) {
            let alternative = self.else_clause()?;
            children.push(Self::node_child(alternative, Some(Field::Alternative)));
        }
        Ok(self.alloc_node(NodeKind::IfStatement, children))
    }

    /// `else => block`, binding to the nearest preceding `if`.
    fn else_clause(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_keyword(&mut children, KeywordId::Else, "Expected 'else'")?;
        self.expect_punct(&mut children, PunctuationId::FatArrow, "Expected '=>' after 'else'")?;
        self.required_block(&mut children, None, "'else'");
        Ok(self.alloc_node(NodeKind::ElseClause, children))
    }

    /// Dispatch between C-style `for (init; cond; update)` and `for x in it`.
    ///
    /// The C-style form always begins its init with `var`, which settles the
    /// choice with one token of lookahead.
    fn for_statement(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_keyword(&mut children, KeywordId::For, "Expected 'for'")?;

        if self.check_keyword(KeywordId::Var) {
            let init = self.variable_declaration()?;
            children.push(Self::node_child(init, Some(Field::Init)));
            self.expect_punct(&mut children, PunctuationId::Semicolon, "Expected ';' after for initializer")?;
            let condition = self.expression()?;
            children.push(Child {
                field: Some(Field::Condition),
                element: condition,
            });
            self.expect_punct(&mut children, PunctuationId::Semicolon, "Expected ';' after for condition")?;
            let update = self.expression()?;
            children.push(Child {
                field: Some(Field::Update),
                element: update,
            });
            self.expect_punct(&mut children, PunctuationId::FatArrow, "Expected '=>' after for header")?;
            if let Some(body) = self.block_opt() {
                children.push(Self::node_child(body, Some(Field::Body)));
            }
            Ok(self.alloc_node(NodeKind::ForStatement, children))
        } else {
            self.expect_ident(&mut children, Some(Field::Variable), "Expected loop variable after 'for'")?;
            self.expect_keyword(&mut children, KeywordId::In, "Expected 'in' after loop variable")?;
            let iterable = self.expression()?;
            children.push(Child {
                field: Some(Field::Iterable),
                element: iterable,
            });
            self.expect_punct(&mut children, PunctuationId::FatArrow, "Expected '=>' after for header")?;
            if let Some(body) = self.block_opt() {
                children.push(Self::node_child(body, Some(Field::Body)));
            }
            Ok(self.alloc_node(NodeKind::ForInStatement, children))
        }
    }

    fn while_statement(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_keyword(&mut children, KeywordId::While, "Expected 'while'")?;
        let condition = self.expression()?;
        children.push(Child {
            field: Some(Field::Condition),
            element: condition,
        });
        self.expect_punct(&mut children, PunctuationId::FatArrow, "Expected '=>' after while condition")?;
        if let Some(body) = self.block_opt() {
            children.push(Self::node_child(body, Some(Field::Body)));
        }
        Ok(self.alloc_node(NodeKind::WhileStatement, children))
    }

    /// `match value => (pattern => block?)*`
    ///
    /// Arms are collected greedily: an expression followed by `=>` starts a
    /// new arm, anything else ends the match. A bodiless arm is syntactically
    /// valid; its meaning is deferred to semantic analysis.
    fn match_statement(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_keyword(&mut children, KeywordId::Match, "Expected 'match'")?;
        let value = self.expression()?;
        children.push(Child {
            field: Some(Field::Value),
            element: value,
        });
        self.expect_punct(&mut children, PunctuationId::FatArrow, "Expected '=>' after match value")?;

        let saved = self.in_match_arms;
        self.in_match_arms = true;
        loop {
            if !self.at_expression_start() {
                break;
            }
            let start_pos = self.pos;
            let checkpoint = self.builder.checkpoint();
            let Ok(pattern) = self.expression() else {
                // Not a parseable pattern; leave the tokens to the caller.
                self.pos = start_pos;
                self.builder.truncate(checkpoint);
                break;
            };
            if !self.check_punct(PunctuationId::FatArrow) {
                // An expression without `=>` is the enclosing block's.
                self.pos = start_pos;
                self.builder.truncate(checkpoint);
                break;
            }
            let mut arm = vec![Child {
                field: Some(Field::Pattern),
                element: pattern,
            }];
            self.bump(&mut arm, None); // =>
            if let Some(body) = self.block_opt() {
                arm.push(Self::node_child(body, Some(Field::Body)));
            }
            let node = self.alloc_node(NodeKind::MatchArm, arm);
            children.push(Self::node_child(node, None));
        }
        self.in_match_arms = saved;
        Ok(self.alloc_node(NodeKind::MatchStatement, children))
    }

    fn return_statement(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_keyword(&mut children, KeywordId::Return, "Expected 'return'")?;
        if self.at_expression_start() {
            let start_pos = self.pos;
            let checkpoint = self.builder.checkpoint();
            let value = self.expression()?;
            if self.in_match_arms && self.check_punct(PunctuationId::FatArrow) {
                // The value re-parses as the next arm's pattern: this was a
                // bare `return` ending the arm.
                self.pos = start_pos;
                self.builder.truncate(checkpoint);
            } else {
                children.push(Child {
                    field: Some(Field::Value),
                    element: value,
                });
            }
        }
        Ok(self.alloc_node(NodeKind::ReturnStatement, children))
    }

    // ========================================================================
    // Assignment and expression statements
    // ========================================================================

    /// `left (=|+=|-=|*=|/=|%=) right`, or a bare expression statement.
    fn expression_or_assignment_statement(&mut self) -> ParseResult<NodeId> {
        let expr = self.expression()?;
        let is_assignment_op = match self.peek_kind() {
            TokenKind::Operator(OperatorId::Eq) => true,
            TokenKind::Operator(op) => operators::is_compound_assignment(op),
            _ => false,
        };
        if is_assignment_op {
            let mut children = vec![Child {
                field: Some(Field::Left),
                element: expr,
            }];
            self.bump(&mut children, Some(Field::Operator));
            let right = self.expression()?;
            children.push(Child {
                field: Some(Field::Right),
                element: right,
            });
            return Ok(self.alloc_node(NodeKind::AssignmentStatement, children));
        }
        let children = vec![Child {
            field: None,
            element: expr,
        }];
        Ok(self.alloc_node(NodeKind::ExpressionStatement, children))
    }
}
