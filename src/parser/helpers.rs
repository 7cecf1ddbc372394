/// Token-stream helpers and error recovery.
///
/// Low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Layout handling (`skip_newlines`, `skip_layout`)
/// - Error recovery (`synchronize`, `synchronize_stmt`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_next(&self) -> &Token {
        if self.pos + 1 < self.tokens.len() {
            &self.tokens[self.pos + 1]
        } else {
            &self.tokens[self.tokens.len() - 1]
        }
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos - 1]
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, msg: &str) -> Result<&Token, Diagnostic> {
        if self.check_keyword(id) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(msg))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> Result<&Token, Diagnostic> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(msg))
        }
    }

    fn unexpected(&self, msg: &str) -> Diagnostic {
        Diagnostic::parse(
            format!("{}, found {:?}", msg, self.peek().kind),
            self.file,
            self.current_span(),
        )
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek().kind, TokenKind::Newline) {
            self.advance();
        }
    }

    /// Skip layout tokens between top-level declarations. Stray closing braces here mean
    /// a block was closed twice (once by dedent, once by `}`); report and move on.
    fn skip_layout(&mut self) {
        loop {
            match &self.peek().kind {
                TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent => {
                    self.advance();
                }
                TokenKind::Punctuation(PunctuationId::RBrace) => {
                    let d = Diagnostic::scope(
                        "unexpected `}` outside any brace-scoped block",
                        self.file,
                        self.current_span(),
                    )
                    .with_hint("a block uses either braces or indentation, not both");
                    self.diagnostics.push(d);
                    self.advance();
                }
                _ => break,
            }
        }
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn previous_span(&self) -> Span {
        if self.pos == 0 {
            self.current_span()
        } else {
            self.tokens[self.pos - 1].span
        }
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Top-level recovery: skip to the next declaration keyword at the current nesting
    /// level. Indented regions are skipped whole so we never resynchronize inside the
    /// body of the declaration that just failed.
    fn synchronize(&mut self) {
        self.advance();
        let mut depth = 0usize;
        while !self.is_at_end() {
            match &self.peek().kind {
                TokenKind::Indent => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::Dedent => {
                    depth = depth.saturating_sub(1);
                    self.advance();
                }
                TokenKind::Keyword(k) if depth == 0 && is_decl_start(*k) => return,
                TokenKind::Punctuation(PunctuationId::At) if depth == 0 => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Statement-level recovery: skip to the end of the current line, leaving block
    /// closers (`Dedent`, `}`) for the enclosing block to consume.
    fn synchronize_stmt(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match &self.peek().kind {
                TokenKind::Newline if depth == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::Dedent if depth == 0 => return,
                TokenKind::Punctuation(PunctuationId::RBrace) if depth == 0 => return,
                TokenKind::Indent => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::Dedent => {
                    depth -= 1;
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }
    }
}

/// Keywords that can begin a top-level declaration; used as resynchronization anchors.
fn is_decl_start(k: KeywordId) -> bool {
    matches!(
        k,
        KeywordId::Import
            | KeywordId::Type
            | KeywordId::Class
            | KeywordId::Struct
            | KeywordId::Data
            | KeywordId::Object
            | KeywordId::Enum
            | KeywordId::Func
            | KeywordId::Async
            | KeywordId::View
    )
}
