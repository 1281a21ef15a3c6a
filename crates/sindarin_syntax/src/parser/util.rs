/// Miscellaneous parser utilities.
///
/// This chunk contains small shared helpers that don’t cleanly fit into
/// “decl”, “stmt”, “expr”, or “types”: token-text access and the typed
/// expect-helpers for identifier/string tokens.
impl<'src> Parser<'src> {
    // ========================================================================
    // Utilities
    // ========================================================================

    fn token_text_at(&self, index: usize) -> &'src str {
        let span = self.tokens[index].span;
        &self.source[span.start..span.end]
    }

    fn expect_ident(&mut self, children: &mut Vec<Child>, field: Option<Field>, msg: &str) -> ParseResult<TokenId> {
        if matches!(self.peek_kind(), TokenKind::Ident) {
            Ok(self.bump(children, field))
        } else {
            Err(self.error_here(msg))
        }
    }

    fn expect_type_ident(
        &mut self,
        children: &mut Vec<Child>,
        field: Option<Field>,
        msg: &str,
    ) -> ParseResult<TokenId> {
        if matches!(self.peek_kind(), TokenKind::TypeIdent) {
            Ok(self.bump(children, field))
        } else {
            Err(self.error_here(msg))
        }
    }

    fn expect_string(&mut self, children: &mut Vec<Child>, field: Option<Field>, msg: &str) -> ParseResult<TokenId> {
        if matches!(self.peek_kind(), TokenKind::String) {
            Ok(self.bump(children, field))
        } else {
            Err(self.error_here(msg))
        }
    }

    /// Human-readable description of the current token for diagnostics.
    fn describe_current(&self) -> String {
        let token = self.peek();
        match token.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Ident | TokenKind::TypeIdent | TokenKind::Number(_) => {
                format!("'{}'", self.token_text_at(self.peek_idx()))
            }
            TokenKind::Keyword(id) => format!("'{}'", sindarin_core::lang::keywords::as_str(id)),
            TokenKind::Operator(id) => format!("'{}'", operators::as_str(id)),
            TokenKind::Punctuation(id) => format!("'{}'", sindarin_core::lang::punctuation::as_str(id)),
            TokenKind::String => "string literal".to_string(),
            TokenKind::CharLiteral => "char literal".to_string(),
            TokenKind::AngleString => "angle-bracket path".to_string(),
            TokenKind::PragmaHash => "'#pragma'".to_string(),
            TokenKind::InterpolatedStringStart
            | TokenKind::StringContent
            | TokenKind::EscapeSequence
            | TokenKind::FormatSpecifier
            | TokenKind::InterpolatedStringEnd => "interpolated string".to_string(),
            TokenKind::Error => "unrecognized input".to_string(),
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment | TokenKind::HashComment => {
                "trivia".to_string()
            }
        }
    }
}
