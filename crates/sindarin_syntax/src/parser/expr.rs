/// Expression parsing methods.
///
/// This chunk implements the expression grammar as a precedence ladder
/// (low→high): spawn `&` → `||` → `&&` → comparison/`is`/`..` → additive →
/// multiplicative → cast `as` → unary prefix → postfix (call/member/index/
/// sync `!`) → primary.
///
/// ## Notes
/// - `is` and `as` parse their right operand as a **type**, never as a value
///   expression, resolving the identifier-as-type ambiguity.
/// - A type identifier immediately followed by `{` is always a struct
///   literal; a bare `{` opens an array literal. Sindarin blocks are
///   introduced only by `=>`, so neither form collides with block syntax.
/// - Expressions are returned as [`Element`]s: literal and identifier
///   primaries stay bare tokens, compound forms become nodes.
impl<'src> Parser<'src> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> ParseResult<Element> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> ParseResult<Element> {
        let mut left = self.and_expr()?;
        while self.check_op(OperatorId::OrOr) {
            let mut children = vec![Child {
                field: Some(Field::Left),
                element: left,
            }];
            self.bump(&mut children, None);
            let right = self.and_expr()?;
            children.push(Child {
                field: Some(Field::Right),
                element: right,
            });
            left = Element::Node(self.alloc_node(NodeKind::BinaryExpression, children));
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> ParseResult<Element> {
        let mut left = self.comparison()?;
        while self.check_op(OperatorId::AndAnd) {
            let mut children = vec![Child {
                field: Some(Field::Left),
                element: left,
            }];
            self.bump(&mut children, None);
            let right = self.comparison()?;
            children.push(Child {
                field: Some(Field::Right),
                element: right,
            });
            left = Element::Node(self.alloc_node(NodeKind::BinaryExpression, children));
        }
        Ok(left)
    }

    /// Comparisons, the range operator, and `is` share one left-associative
    /// level. The grammar permits syntactic chaining; flagging chained
    /// comparisons is a semantic concern.
    fn comparison(&mut self) -> ParseResult<Element> {
        let mut left = self.additive()?;
        loop {
            let is_comparison_op = matches!(
                self.peek_kind(),
                TokenKind::Operator(
                    OperatorId::EqEq
                        | OperatorId::NotEq
                        | OperatorId::Lt
                        | OperatorId::LtEq
                        | OperatorId::Gt
                        | OperatorId::GtEq
                        | OperatorId::DotDot,
                )
            );
            if is_comparison_op {
                let mut children = vec![Child {
                    field: Some(Field::Left),
                    element: left,
                }];
                self.bump(&mut children, None);
                let right = self.additive()?;
                children.push(Child {
                    field: Some(Field::Right),
                    element: right,
                });
                left = Element::Node(self.alloc_node(NodeKind::BinaryExpression, children));
            } else if self.check_keyword(KeywordId::Is) {
                // The right operand of `is` is a type, never a value
                let mut children = vec![Child {
                    field: Some(Field::Left),
                    element: left,
                }];
                self.bump(&mut children, None);
                let ty = self.type_expr()?;
                children.push(Self::node_child(ty, Some(Field::Right)));
                left = Element::Node(self.alloc_node(NodeKind::BinaryExpression, children));
            } else {
                break;
            }
        }
        Ok(left)
    }

    fn additive(&mut self) -> ParseResult<Element> {
        let mut left = self.multiplicative()?;
        while matches!(
            self.peek_kind(),
            TokenKind::Operator(OperatorId::Plus | OperatorId::Minus)
        ) {
            let mut children = vec![Child {
                field: Some(Field::Left),
                element: left,
            }];
            self.bump(&mut children, None);
            let right = self.multiplicative()?;
            children.push(Child {
                field: Some(Field::Right),
                element: right,
            });
            left = Element::Node(self.alloc_node(NodeKind::BinaryExpression, children));
        }
        Ok(left)
    }

    fn multiplicative(&mut self) -> ParseResult<Element> {
        let mut left = self.cast()?;
        while matches!(
            self.peek_kind(),
            TokenKind::Operator(OperatorId::Star | OperatorId::Slash | OperatorId::Percent)
        ) {
            let mut children = vec![Child {
                field: Some(Field::Left),
                element: left,
            }];
            self.bump(&mut children, None);
            let right = self.cast()?;
            children.push(Child {
                field: Some(Field::Right),
                element: right,
            });
            left = Element::Node(self.alloc_node(NodeKind::BinaryExpression, children));
        }
        Ok(left)
    }

    /// `value as Type`, left-associative; the target is parsed as a type (or the
    /// bare coercion markers `val`/`ref`).
    fn cast(&mut self) -> ParseResult<Element> {
        let mut value = self.unary()?;
        while self.check_keyword(KeywordId::As) {
            let mut children = vec![Child {
                field: Some(Field::Value),
                element: value,
            }];
            self.bump(&mut children, None);
            self.cast_target(&mut children)?;
            value = Element::Node(self.alloc_node(NodeKind::CastExpression, children));
        }
        Ok(value)
    }

    fn unary(&mut self) -> ParseResult<Element> {
        // Spawn binds looser than any binary operator, so its operand re-enters
        // the ladder from the top: `&a + b` and `x && &a + b` both spawn `a + b`
        if self.check_op(OperatorId::Amp) {
            let mut children = Vec::new();
            self.bump(&mut children, None);
            let inner = self.expression()?;
            children.push(Child {
                field: Some(Field::Expression),
                element: inner,
            });
            return Ok(Element::Node(self.alloc_node(NodeKind::SpawnExpression, children)));
        }
        if matches!(
            self.peek_kind(),
            TokenKind::Operator(OperatorId::Minus | OperatorId::Bang | OperatorId::PlusPlus | OperatorId::MinusMinus)
        ) {
            let mut children = Vec::new();
            self.bump(&mut children, None);
            let operand = self.unary()?;
            children.push(Child {
                field: None,
                element: operand,
            });
            return Ok(Element::Node(self.alloc_node(NodeKind::UnaryExpression, children)));
        }
        self.postfix()
    }

    /// Postfix call/member/index and the sync marker `expr!`, all left-assoc.
    fn postfix(&mut self) -> ParseResult<Element> {
        let mut expr = self.primary()?;
        loop {
            match self.peek_kind() {
                TokenKind::Punctuation(PunctuationId::LParen) => {
                    let mut children = vec![Child {
                        field: Some(Field::Function),
                        element: expr,
                    }];
                    self.call_arguments(&mut children)?;
                    expr = Element::Node(self.alloc_node(NodeKind::CallExpression, children));
                }
                TokenKind::Punctuation(PunctuationId::Dot) => {
                    let mut children = vec![Child {
                        field: Some(Field::Object),
                        element: expr,
                    }];
                    self.bump(&mut children, None);
                    self.expect_ident(&mut children, Some(Field::Property), "Expected property name after '.'")?;
                    expr = Element::Node(self.alloc_node(NodeKind::MemberExpression, children));
                }
                TokenKind::Punctuation(PunctuationId::LBracket) => {
                    let mut children = vec![Child {
                        field: Some(Field::Object),
                        element: expr,
                    }];
                    self.bump(&mut children, None);
                    let index = self.expression()?;
                    children.push(Child {
                        field: Some(Field::Index),
                        element: index,
                    });
                    self.expect_punct(&mut children, PunctuationId::RBracket, "Expected ']' after index")?;
                    expr = Element::Node(self.alloc_node(NodeKind::IndexExpression, children));
                }
                TokenKind::Operator(OperatorId::Bang) => {
                    let mut children = vec![Child {
                        field: Some(Field::Expression),
                        element: expr,
                    }];
                    self.bump(&mut children, None);
                    expr = Element::Node(self.alloc_node(NodeKind::SyncExpression, children));
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn call_arguments(&mut self, children: &mut Vec<Child>) -> ParseResult<()> {
        self.expect_punct(children, PunctuationId::LParen, "Expected '('")?;
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                if self.check_punct(PunctuationId::RParen) {
                    break; // trailing comma
                }
                let arg = self.expression()?;
                children.push(Child {
                    field: None,
                    element: arg,
                });
                if !self.match_punct(children, PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(children, PunctuationId::RParen, "Expected ')' after arguments")?;
        Ok(())
    }

    // ========================================================================
    // Primaries
    // ========================================================================

    fn primary(&mut self) -> ParseResult<Element> {
        match self.peek_kind() {
            TokenKind::Ident
            | TokenKind::Number(_)
            | TokenKind::String
            | TokenKind::CharLiteral
            | TokenKind::Keyword(
                KeywordId::True | KeywordId::False | KeywordId::Nil | KeywordId::SelfKw | KeywordId::Arena,
            ) => Ok(Element::Token(self.bump_raw())),
            TokenKind::TypeIdent => {
                // A type identifier immediately followed by `{` is always a
                // struct literal; otherwise it is a plain type-name value.
                if matches!(self.peek_next_kind(), TokenKind::Punctuation(PunctuationId::LBrace)) {
                    Ok(Element::Node(self.struct_literal()?))
                } else {
                    Ok(Element::Token(self.bump_raw()))
                }
            }
            TokenKind::InterpolatedStringStart => Ok(Element::Node(self.interpolated_string()?)),
            TokenKind::Punctuation(PunctuationId::LParen) => {
                let mut children = Vec::new();
                self.bump(&mut children, None);
                let inner = self.expression()?;
                children.push(Child {
                    field: None,
                    element: inner,
                });
                self.expect_punct(&mut children, PunctuationId::RParen, "Expected ')' after expression")?;
                Ok(Element::Node(self.alloc_node(NodeKind::ParenthesizedExpression, children)))
            }
            TokenKind::Punctuation(PunctuationId::LBrace) => Ok(Element::Node(self.array_literal()?)),
            _ => Err(self.error_here("Expected expression")),
        }
    }

    /// `TypeId { name: value, ... }`
    fn struct_literal(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.bump(&mut children, Some(Field::Type)); // type identifier
        self.expect_punct(&mut children, PunctuationId::LBrace, "Expected '{' in struct literal")?;
        if !self.check_punct(PunctuationId::RBrace) {
            loop {
                if self.check_punct(PunctuationId::RBrace) {
                    break; // trailing comma
                }
                let init = self.field_initializer()?;
                children.push(Self::node_child(init, None));
                if !self.match_punct(&mut children, PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(&mut children, PunctuationId::RBrace, "Expected '}' after struct literal")?;
        Ok(self.alloc_node(NodeKind::StructLiteral, children))
    }

    fn field_initializer(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_ident(&mut children, Some(Field::Name), "Expected field name in struct literal")?;
        self.expect_punct(&mut children, PunctuationId::Colon, "Expected ':' after field name")?;
        let value = self.expression()?;
        children.push(Child {
            field: Some(Field::Value),
            element: value,
        });
        Ok(self.alloc_node(NodeKind::FieldInitializer, children))
    }

    /// `{ expr, ... }`: array literal (no preceding type identifier).
    fn array_literal(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_punct(&mut children, PunctuationId::LBrace, "Expected '{'")?;
        if !self.check_punct(PunctuationId::RBrace) {
            loop {
                if self.check_punct(PunctuationId::RBrace) {
                    break; // trailing comma
                }
                let element = self.expression()?;
                children.push(Child {
                    field: None,
                    element,
                });
                if !self.match_punct(&mut children, PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(&mut children, PunctuationId::RBrace, "Expected '}' after array literal")?;
        Ok(self.alloc_node(NodeKind::ArrayLiteral, children))
    }

    // ========================================================================
    // Interpolated strings
    // ========================================================================

    /// `$"..."`: literal segments, escapes, and `{expr[:format]}` holes.
    fn interpolated_string(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.bump(&mut children, None); // $"
        loop {
            match self.peek_kind() {
                TokenKind::StringContent | TokenKind::EscapeSequence => {
                    self.bump(&mut children, None);
                }
                TokenKind::Punctuation(PunctuationId::LBrace) => {
                    let hole = self.interpolation()?;
                    children.push(Self::node_child(hole, None));
                }
                TokenKind::InterpolatedStringEnd => {
                    self.bump(&mut children, None);
                    break;
                }
                // Unterminated: the lexer already reported it
                _ => break,
            }
        }
        Ok(self.alloc_node(NodeKind::InterpolatedString, children))
    }

    /// `{ expression (:format)? }`
    fn interpolation(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.bump(&mut children, None); // {
        let expression = self.expression()?;
        children.push(Child {
            field: Some(Field::Expression),
            element: expression,
        });
        if matches!(self.peek_kind(), TokenKind::FormatSpecifier) {
            self.bump(&mut children, Some(Field::Format));
        }
        self.expect_punct(&mut children, PunctuationId::RBrace, "Expected '}' after interpolation")?;
        Ok(self.alloc_node(NodeKind::Interpolation, children))
    }
}
