/// Expression parsing.
///
/// Precedence climbing driven by the operator registry: the parser never hard-codes
/// binding strength, it asks `weft_core::lang::operators`. Word and symbolic operator
/// spellings were already collapsed by the lexer, so one code path covers both dialects.
impl<'a> Parser<'a> {
    fn expression(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        // Assignment operators are statement-level; binary expressions start above them.
        self.binary_expr(MIN_EXPR_PRECEDENCE)
    }

    fn binary_expr(&mut self, min_prec: u8) -> Result<Spanned<Expr>, Diagnostic> {
        let mut lhs = self.unary_expr()?;

        loop {
            let op = match &self.peek().kind {
                TokenKind::Operator(id) => *id,
                _ => break,
            };
            let info = operators::info_for(op);
            if info.fixity != operators::Fixity::Infix || info.precedence < min_prec {
                break;
            }
            self.advance();

            let next_min = match info.associativity {
                operators::Associativity::Left => info.precedence + 1,
                operators::Associativity::Right => info.precedence,
            };
            let rhs = self.binary_expr(next_min)?;
            let span = lhs.span.merge(rhs.span);
            lhs = Spanned::new(Expr::Binary(Box::new(lhs), op, Box::new(rhs)), span);
        }

        Ok(lhs)
    }

    fn unary_expr(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        let start = self.current_span();
        if self.match_op(OperatorId::Not) {
            let operand = self.unary_expr()?;
            let span = start.merge(operand.span);
            return Ok(Spanned::new(Expr::Unary(OperatorId::Not, Box::new(operand)), span));
        }
        if self.match_op(OperatorId::Minus) {
            let operand = self.unary_expr()?;
            let span = start.merge(operand.span);
            return Ok(Spanned::new(Expr::Unary(OperatorId::Minus, Box::new(operand)), span));
        }
        if self.match_keyword(KeywordId::Await) {
            let operand = self.unary_expr()?;
            let span = start.merge(operand.span);
            return Ok(Spanned::new(Expr::Await(Box::new(operand)), span));
        }
        self.postfix_expr()
    }

    fn postfix_expr(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        let mut expr = self.primary_expr()?;

        loop {
            if self.match_punct(PunctuationId::Dot) {
                let member = self.identifier()?;
                let span = expr.span.merge(self.previous_span());
                expr = Spanned::new(Expr::Member(Box::new(expr), member), span);
            } else if self.match_punct(PunctuationId::LParen) {
                let args = self.call_args()?;
                let span = expr.span.merge(self.previous_span());
                expr = Spanned::new(Expr::Call(Box::new(expr), args), span);
            } else if self.match_punct(PunctuationId::LBracket) {
                let index = self.expression()?;
                self.expect_punct(PunctuationId::RBracket, "expected `]` after index")?;
                let span = expr.span.merge(self.previous_span());
                expr = Spanned::new(Expr::Index(Box::new(expr), Box::new(index)), span);
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn call_args(&mut self) -> Result<Vec<CallArg>, Diagnostic> {
        let mut args = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            args.push(self.call_arg()?);
            while self.match_punct(PunctuationId::Comma) {
                args.push(self.call_arg()?);
            }
        }
        self.expect_punct(PunctuationId::RParen, "expected `)` after arguments")?;
        Ok(args)
    }

    /// `name: value` is a named argument; anything else is positional.
    fn call_arg(&mut self) -> Result<CallArg, Diagnostic> {
        if matches!(self.peek().kind, TokenKind::Ident(_))
            && self.peek_next().kind.is_punctuation(PunctuationId::Colon)
        {
            let name = self.identifier()?;
            self.advance(); // `:`
            let value = self.expression()?;
            return Ok(CallArg::Named(name, value));
        }
        Ok(CallArg::Positional(self.expression()?))
    }

    fn primary_expr(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        let start = self.current_span();
        let token = self.peek().clone();

        let node = match token.kind {
            TokenKind::Int(v) => {
                self.advance();
                Expr::Literal(Literal::Int(v))
            }
            TokenKind::Float(v) => {
                self.advance();
                Expr::Literal(Literal::Float(v))
            }
            TokenKind::Str(s) => {
                self.advance();
                Expr::Literal(Literal::Str(s))
            }
            TokenKind::NullLit => {
                self.advance();
                Expr::Literal(Literal::Null)
            }
            TokenKind::Keyword(KeywordId::True) => {
                self.advance();
                Expr::Literal(Literal::Bool(true))
            }
            TokenKind::Keyword(KeywordId::False) => {
                self.advance();
                Expr::Literal(Literal::Bool(false))
            }
            TokenKind::Ident(name) => {
                self.advance();
                Expr::Ident(name)
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let inner = self.expression()?;
                self.expect_punct(PunctuationId::RParen, "expected `)`")?;
                Expr::Paren(Box::new(inner))
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                self.advance();
                return self.collection_literal(start);
            }
            _ => return Err(self.unexpected("expected an expression")),
        };

        Ok(Spanned::new(node, start.merge(self.previous_span())))
    }

    /// `[a, b]` array literal or `[k: v, ...]` map literal; `[]` is an empty array and
    /// `[:]` an empty map.
    fn collection_literal(&mut self, start: Span) -> Result<Spanned<Expr>, Diagnostic> {
        if self.match_punct(PunctuationId::RBracket) {
            return Ok(Spanned::new(Expr::Array(Vec::new()), start.merge(self.previous_span())));
        }
        if self.match_punct(PunctuationId::Colon) {
            self.expect_punct(PunctuationId::RBracket, "expected `]` after `[:`")?;
            return Ok(Spanned::new(Expr::MapLit(Vec::new()), start.merge(self.previous_span())));
        }

        let first = self.expression()?;
        if self.match_punct(PunctuationId::Colon) {
            let value = self.expression()?;
            let mut entries = vec![(first, value)];
            while self.match_punct(PunctuationId::Comma) {
                let k = self.expression()?;
                self.expect_punct(PunctuationId::Colon, "expected `:` in map entry")?;
                let v = self.expression()?;
                entries.push((k, v));
            }
            self.expect_punct(PunctuationId::RBracket, "expected `]` to close map literal")?;
            return Ok(Spanned::new(Expr::MapLit(entries), start.merge(self.previous_span())));
        }

        let mut items = vec![first];
        while self.match_punct(PunctuationId::Comma) {
            items.push(self.expression()?);
        }
        self.expect_punct(PunctuationId::RBracket, "expected `]` to close array literal")?;
        Ok(Spanned::new(Expr::Array(items), start.merge(self.previous_span())))
    }
}

/// Lowest precedence an expression-level operator can have; assignment sits below this
/// and is handled at statement level.
const MIN_EXPR_PRECEDENCE: u8 = 20;
