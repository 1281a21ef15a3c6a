/// Declaration parsing methods.
///
/// This chunk is responsible for parsing top-level items: pragmas, imports,
/// type/struct declarations, function declarations (plain, static, native),
/// and the decorators that prefix native functions.
///
/// ## Notes
/// - Declaration-starting keywords are tried **before** the bare-statement
///   fallback, per the top-level disambiguation rule.
/// - Error recovery is handled by `Parser::recover()` (in `helpers.rs`).
impl<'src> Parser<'src> {
    // ========================================================================
    // Top level
    // ========================================================================

    fn top_level_item(&mut self, items: &mut Vec<Child>) {
        let start_pos = self.pos;
        let checkpoint = self.builder.checkpoint();
        match self.top_level_item_inner() {
            Ok(node) => items.push(Self::node_child(node, None)),
            Err(diagnostic) => self.recover(items, start_pos, checkpoint, diagnostic),
        }
    }

    fn top_level_item_inner(&mut self) -> ParseResult<NodeId> {
        match self.peek_kind() {
            TokenKind::PragmaHash => self.pragma(),
            TokenKind::Punctuation(PunctuationId::At) => self.native_function_declaration(),
            TokenKind::Keyword(KeywordId::Import) => self.import_statement(),
            TokenKind::Keyword(KeywordId::Native) => match self.peek_next_kind() {
                TokenKind::Keyword(KeywordId::Struct) => self.struct_declaration(),
                _ => self.native_function_declaration(),
            },
            TokenKind::Keyword(KeywordId::Struct) => self.struct_declaration(),
            TokenKind::Keyword(KeywordId::Type) => self.type_declaration(),
            TokenKind::Keyword(KeywordId::Fn | KeywordId::Shared | KeywordId::Private) => self.function_declaration(),
            _ if self.at_statement_start() => self.statement(),
            _ => Err(self.error_here("Expected declaration or statement")),
        }
    }

    // ========================================================================
    // Pragmas
    // ========================================================================

    fn pragma(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.bump(&mut children, None); // #pragma
        // The lexer only emits PragmaHash when a known kind follows
        if matches!(self.peek_kind(), TokenKind::Ident) {
            self.bump(&mut children, Some(Field::Kind));
        } else {
            return Err(self.error_here("Expected pragma kind (include, link, source, pack)"));
        }

        match self.peek_kind() {
            TokenKind::AngleString | TokenKind::String | TokenKind::Ident => {
                self.bump(&mut children, Some(Field::Value));
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                let value = self.pragma_pack_value()?;
                children.push(Self::node_child(value, Some(Field::Value)));
            }
            _ => {} // value is optional
        }
        Ok(self.alloc_node(NodeKind::Pragma, children))
    }

    /// `( number )`: pack alignment value.
    fn pragma_pack_value(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_punct(&mut children, PunctuationId::LParen, "Expected '('")?;
        if matches!(self.peek_kind(), TokenKind::Number(_)) {
            self.bump(&mut children, None);
        } else {
            return Err(self.error_here("Expected alignment number in '#pragma pack'"));
        }
        self.expect_punct(&mut children, PunctuationId::RParen, "Expected ')' after pack alignment")?;
        Ok(self.alloc_node(NodeKind::PragmaPackValue, children))
    }

    // ========================================================================
    // Imports
    // ========================================================================

    fn import_statement(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_keyword(&mut children, KeywordId::Import, "Expected 'import'")?;
        self.expect_string(&mut children, Some(Field::Path), "Expected import path string")?;
        if self.match_keyword(&mut children, KeywordId::As) {
            self.expect_ident(&mut children, Some(Field::Alias), "Expected alias after 'as'")?;
        }
        Ok(self.alloc_node(NodeKind::ImportStatement, children))
    }

    // ========================================================================
    // Type declarations
    // ========================================================================

    /// `type Name = opaque | native fn | Type`, three exclusive forms.
    fn type_declaration(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_keyword(&mut children, KeywordId::Type, "Expected 'type'")?;
        self.expect_type_ident(&mut children, Some(Field::Name), "Expected type name")?;
        self.expect_op(&mut children, OperatorId::Eq, "Expected '=' in type declaration")?;

        match self.peek_kind() {
            TokenKind::Keyword(KeywordId::Opaque) => {
                self.bump(&mut children, Some(Field::Value));
            }
            TokenKind::Keyword(KeywordId::Native) => {
                let mut native = Vec::new();
                self.bump(&mut native, None); // native
                self.expect_keyword(&mut native, KeywordId::Fn, "Expected 'fn' after 'native' in type alias")?;
                let node = self.alloc_node(NodeKind::NativeFunctionType, native);
                children.push(Self::node_child(node, Some(Field::Value)));
            }
            _ => {
                let ty = self.type_expr()?;
                children.push(Self::node_child(ty, Some(Field::Value)));
            }
        }
        Ok(self.alloc_node(NodeKind::TypeDeclaration, children))
    }

    // ========================================================================
    // Struct declarations
    // ========================================================================

    fn struct_declaration(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.match_keyword(&mut children, KeywordId::Native);
        self.expect_keyword(&mut children, KeywordId::Struct, "Expected 'struct'")?;
        self.expect_type_ident(&mut children, Some(Field::Name), "Expected struct name")?;
        if self.match_keyword(&mut children, KeywordId::As) {
            self.expect_keyword(&mut children, KeywordId::Ref, "Expected 'ref' after 'as' in struct declaration")?;
        }
        self.expect_punct(&mut children, PunctuationId::FatArrow, "Expected '=>' after struct header")?;
        if let Some(body) = self.struct_body_opt() {
            children.push(Self::node_child(body, Some(Field::Body)));
        }
        Ok(self.alloc_node(NodeKind::StructDeclaration, children))
    }

    /// Struct body: fields, functions, and static functions, in source order.
    ///
    /// The body is undelimited; it ends at the first token that cannot start
    /// a member. An identifier is a field exactly when `:` follows it.
    fn struct_body_opt(&mut self) -> Option<NodeId> {
        let mut members = Vec::new();
        loop {
            let start_pos = self.pos;
            let checkpoint = self.builder.checkpoint();
            let result = match self.peek_kind() {
                TokenKind::Keyword(KeywordId::Static) => self.static_function_declaration(),
                TokenKind::Keyword(KeywordId::Fn | KeywordId::Shared | KeywordId::Private) => {
                    self.function_declaration()
                }
                TokenKind::Ident
                    if matches!(self.peek_next_kind(), TokenKind::Punctuation(PunctuationId::Colon)) =>
                {
                    self.field_declaration()
                }
                _ => break,
            };
            match result {
                Ok(node) => members.push(Self::node_child(node, None)),
                Err(diagnostic) => self.recover(&mut members, start_pos, checkpoint, diagnostic),
            }
        }
        if members.is_empty() {
            None
        } else {
            Some(self.alloc_node(NodeKind::StructBody, members))
        }
    }

    fn field_declaration(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_ident(&mut children, Some(Field::Name), "Expected field name")?;
        self.expect_punct(&mut children, PunctuationId::Colon, "Expected ':' after field name")?;
        let ty = self.type_expr()?;
        children.push(Self::node_child(ty, Some(Field::Type)));
        Ok(self.alloc_node(NodeKind::FieldDeclaration, children))
    }

    // ========================================================================
    // Function declarations
    // ========================================================================

    fn function_declaration(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        if matches!(
            self.peek_kind(),
            TokenKind::Keyword(KeywordId::Shared | KeywordId::Private)
        ) {
            let mut modifier = Vec::new();
            self.bump(&mut modifier, None);
            let node = self.alloc_node(NodeKind::VisibilityModifier, modifier);
            children.push(Self::node_child(node, Some(Field::Modifier)));
        }
        self.expect_keyword(&mut children, KeywordId::Fn, "Expected 'fn'")?;
        self.function_signature(&mut children)?;
        self.expect_punct(&mut children, PunctuationId::FatArrow, "Expected '=>' after function signature")?;
        if let Some(body) = self.block_opt() {
            children.push(Self::node_child(body, Some(Field::Body)));
        }
        Ok(self.alloc_node(NodeKind::FunctionDeclaration, children))
    }

    fn static_function_declaration(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_keyword(&mut children, KeywordId::Static, "Expected 'static'")?;
        self.expect_keyword(&mut children, KeywordId::Fn, "Expected 'fn' after 'static'")?;
        self.function_signature(&mut children)?;
        self.expect_punct(&mut children, PunctuationId::FatArrow, "Expected '=>' after function signature")?;
        if let Some(body) = self.block_opt() {
            children.push(Self::node_child(body, Some(Field::Body)));
        }
        Ok(self.alloc_node(NodeKind::StaticFunctionDeclaration, children))
    }

    /// Decorated, bodiless function bound to an external C definition.
    fn native_function_declaration(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        while self.check_punct(PunctuationId::At) {
            let decorator = self.decorator()?;
            children.push(Self::node_child(decorator, None));
        }
        self.expect_keyword(&mut children, KeywordId::Native, "Expected 'native'")?;
        self.expect_keyword(&mut children, KeywordId::Fn, "Expected 'fn' after 'native'")?;
        self.function_signature(&mut children)?;
        Ok(self.alloc_node(NodeKind::NativeFunctionDeclaration, children))
    }

    /// Shared tail of every function form: name, parameters, return type.
    fn function_signature(&mut self, children: &mut Vec<Child>) -> ParseResult<()> {
        self.expect_ident(children, Some(Field::Name), "Expected function name")?;
        let params = self.parameter_list()?;
        children.push(Self::node_child(params, Some(Field::Parameters)));
        if self.match_punct(children, PunctuationId::Colon) {
            let ty = self.type_expr()?;
            children.push(Self::node_child(ty, Some(Field::ReturnType)));
        }
        Ok(())
    }

    fn parameter_list(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_punct(&mut children, PunctuationId::LParen, "Expected '(' to start parameter list")?;
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                if self.check_punct(PunctuationId::RParen) {
                    break; // trailing comma
                }
                let param = self.parameter()?;
                children.push(Self::node_child(param, None));
                if !self.match_punct(&mut children, PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(&mut children, PunctuationId::RParen, "Expected ')' after parameters")?;
        Ok(self.alloc_node(NodeKind::ParameterList, children))
    }

    /// `...? name: Type (as val|ref)? (= default)?`
    ///
    /// The parser accepts `...` on any parameter; restricting it to the
    /// trailing position is left to semantic analysis.
    fn parameter(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.match_punct(&mut children, PunctuationId::Ellipsis);
        self.expect_ident(&mut children, Some(Field::Name), "Expected parameter name")?;
        self.expect_punct(&mut children, PunctuationId::Colon, "Expected ':' after parameter name")?;
        let ty = self.type_expr()?;
        children.push(Self::node_child(ty, Some(Field::Type)));
        if self.match_keyword(&mut children, KeywordId::As) {
            if matches!(self.peek_kind(), TokenKind::Keyword(KeywordId::Val | KeywordId::Ref)) {
                self.bump(&mut children, None);
            } else {
                return Err(self.error_here("Expected 'val' or 'ref' after 'as' in parameter"));
            }
        }
        if self.match_op(&mut children, OperatorId::Eq) {
            let default = self.expression()?;
            children.push(Child {
                field: Some(Field::Default),
                element: default,
            });
        }
        Ok(self.alloc_node(NodeKind::Parameter, children))
    }

    // ========================================================================
    // Decorators
    // ========================================================================

    /// `@source "p"`, `@alias "n"`, `@include <p>|"p"`, `@link ident`.
    fn decorator(&mut self) -> ParseResult<NodeId> {
        let mut children = Vec::new();
        self.expect_punct(&mut children, PunctuationId::At, "Expected '@'")?;
        if !matches!(self.peek_kind(), TokenKind::Ident) {
            return Err(self.error_here("Expected decorator name after '@'"));
        }
        let name_span = self.current_span();
        let name = self.token_text_at(self.peek_idx()).to_string();
        self.bump(&mut children, None);
        match name.as_str() {
            "source" => {
                self.expect_string(&mut children, Some(Field::Path), "Expected source path string after '@source'")?;
            }
            "alias" => {
                self.expect_string(&mut children, Some(Field::Name), "Expected alias string after '@alias'")?;
            }
            "include" => match self.peek_kind() {
                TokenKind::AngleString | TokenKind::String => {
                    self.bump(&mut children, Some(Field::Path));
                }
                _ => return Err(self.error_here("Expected include path after '@include'")),
            },
            "link" => {
                self.expect_ident(&mut children, Some(Field::Library), "Expected library name after '@link'")?;
            }
            _ => {
                return Err(Diagnostic::syntax(format!("Unknown decorator '@{}'", name), name_span));
            }
        }
        Ok(self.alloc_node(NodeKind::Decorator, children))
    }
}
