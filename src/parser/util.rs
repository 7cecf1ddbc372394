/// Miscellaneous parser utilities: identifier and literal consumption.
impl<'a> Parser<'a> {
    fn identifier(&mut self) -> Result<Ident, Diagnostic> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("expected identifier")),
        }
    }

    /// Identifier, or a reserved word used as a name (annotation names may shadow
    /// keywords; the canonical spelling is used then).
    fn identifier_like(&mut self, msg: &str) -> Result<Ident, Diagnostic> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            TokenKind::Keyword(id) => {
                let name = weft_core::lang::keywords::as_str(*id).to_string();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(msg)),
        }
    }

    /// A literal token, with an optional leading minus for numbers.
    fn literal(&mut self) -> Result<Literal, Diagnostic> {
        if self.match_op(OperatorId::Minus) {
            return match self.peek().kind.clone() {
                TokenKind::Int(v) => {
                    self.advance();
                    Ok(Literal::Int(-v))
                }
                TokenKind::Float(v) => {
                    self.advance();
                    Ok(Literal::Float(-v))
                }
                _ => Err(self.unexpected("expected a numeric literal after `-`")),
            };
        }
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Int(v) => {
                self.advance();
                Ok(Literal::Int(v))
            }
            TokenKind::Float(v) => {
                self.advance();
                Ok(Literal::Float(v))
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(Literal::Str(s))
            }
            TokenKind::NullLit => {
                self.advance();
                Ok(Literal::Null)
            }
            TokenKind::Keyword(KeywordId::True) => {
                self.advance();
                Ok(Literal::Bool(true))
            }
            TokenKind::Keyword(KeywordId::False) => {
                self.advance();
                Ok(Literal::Bool(false))
            }
            _ => Err(self.unexpected("expected a literal")),
        }
    }
}
