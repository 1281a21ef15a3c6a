/// Type-expression parsing methods.
///
/// This chunk parses syntactic type expressions used in declarations, casts,
/// and parameters:
/// - Primitive keyword types (`int`, `str`, `void`, ...)
/// - Named types (`Point`) and namespaced types (`vec.Vector`)
/// - Array types (`int[]`, `byte[16]`, `int[][]`; left-associative)
/// - Function types (`fn(int, int): int`)
///
/// ## Notes
/// - Type parsing is purely syntactic; semantic meaning is handled by later
///   toolchain phases.
impl<'src> Parser<'src> {
    // ========================================================================
    // Types
    // ========================================================================

    fn type_expr(&mut self) -> ParseResult<NodeId> {
        let mut node = self.primary_type()?;
        // Array suffixes nest outer-then-inner: `int[][]` is array of `int[]`
        while self.check_punct(PunctuationId::LBracket) {
            let mut children = vec![Self::node_child(node, None)];
            self.bump(&mut children, None); // [
            if matches!(self.peek_kind(), TokenKind::Number(_)) {
                self.bump(&mut children, None);
            }
            self.expect_punct(&mut children, PunctuationId::RBracket, "Expected ']' in array type")?;
            node = self.alloc_node(NodeKind::ArrayType, children);
        }
        Ok(node)
    }

    fn primary_type(&mut self) -> ParseResult<NodeId> {
        match self.peek_kind() {
            kind if kind.is_primitive_type() => {
                let mut children = Vec::new();
                self.bump(&mut children, None);
                Ok(self.alloc_node(NodeKind::PrimitiveType, children))
            }
            TokenKind::TypeIdent => {
                let mut children = Vec::new();
                self.bump(&mut children, None);
                Ok(self.alloc_node(NodeKind::NamedType, children))
            }
            TokenKind::Keyword(KeywordId::Fn) => self.function_type(),
            TokenKind::Ident => {
                // Namespaced type: `module.Type`
                let mut children = Vec::new();
                self.bump(&mut children, None);
                self.expect_punct(&mut children, PunctuationId::Dot, "Expected '.' in namespaced type")?;
                self.expect_type_ident(&mut children, None, "Expected type name after '.'")?;
                Ok(self.alloc_node(NodeKind::NamespacedType, children))
            }
            _ => Err(self.error_here("Expected type")),
        }
    }

    /// `fn(T, T, ...): T`
    fn function_type(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_keyword(&mut children, KeywordId::Fn, "Expected 'fn'")?;
        self.expect_punct(&mut children, PunctuationId::LParen, "Expected '(' in function type")?;
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                if self.check_punct(PunctuationId::RParen) {
                    break; // trailing comma
                }
                let ty = self.type_expr()?;
                children.push(Self::node_child(ty, None));
                if !self.match_punct(&mut children, PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(&mut children, PunctuationId::RParen, "Expected ')' in function type")?;
        self.expect_punct(&mut children, PunctuationId::Colon, "Expected ':' before function type return")?;
        let ret = self.type_expr()?;
        children.push(Self::node_child(ret, None));
        Ok(self.alloc_node(NodeKind::FunctionType, children))
    }

    /// Cast target: a type, or the bare reference-mode markers `val`/`ref`.
    fn cast_target(&mut self, children: &mut Vec<Child>) -> ParseResult<()> {
        if matches!(self.peek_kind(), TokenKind::Keyword(KeywordId::Val | KeywordId::Ref)) {
            self.bump(children, Some(Field::Type));
        } else {
            let ty = self.type_expr()?;
            children.push(Self::node_child(ty, Some(Field::Type)));
        }
        Ok(())
    }
}
