/// Statement parsing.
///
/// Statements live inside function, view, and hook bodies. Every construct with a body
/// goes through the scope reader, so each nested block independently picks braces or
/// indentation. `switch`/`match` and `elif`/`else if` each collapse to one canonical
/// shape.
impl<'a> Parser<'a> {
    fn statement(&mut self) -> Result<Spanned<Stmt>, Diagnostic> {
        let start = self.current_span();
        let stmt = self.statement_inner()?;
        Ok(Spanned::new(stmt, start.merge(self.previous_span())))
    }

    fn statement_inner(&mut self) -> Result<Stmt, Diagnostic> {
        if self.check_keyword(KeywordId::Mut) || self.check_keyword(KeywordId::Immut) {
            return self.binding_stmt().map(Stmt::Binding);
        }
        if self.match_keyword(KeywordId::If) {
            return self.if_stmt().map(Stmt::If);
        }
        if self.match_keyword(KeywordId::While) {
            let cond = self.expression()?;
            let body = self.block("while body")?;
            return Ok(Stmt::While(WhileStmt { cond, body }));
        }
        if self.match_keyword(KeywordId::For) {
            let var = self.identifier()?;
            self.expect_keyword(KeywordId::In, "expected `in` after loop variable")?;
            let iter = self.expression()?;
            let body = self.block("for body")?;
            return Ok(Stmt::For(ForStmt { var, iter, body }));
        }
        if self.match_keyword(KeywordId::Match) {
            return self.match_stmt().map(Stmt::Match);
        }
        if self.match_keyword(KeywordId::Return) {
            let value = if self.at_line_end() {
                None
            } else {
                Some(self.expression()?)
            };
            return Ok(Stmt::Return(value));
        }
        if self.match_keyword(KeywordId::Break) {
            return Ok(Stmt::Break);
        }
        if self.match_keyword(KeywordId::Continue) {
            return Ok(Stmt::Continue);
        }

        self.expr_statement()
    }

    fn at_line_end(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof
        ) || self.check_punct(PunctuationId::RBrace)
    }

    /// `var`/`let` binding (keyword already checked, not consumed).
    fn binding_stmt(&mut self) -> Result<BindingDecl, Diagnostic> {
        let mutable = self.match_keyword(KeywordId::Mut);
        if !mutable {
            self.expect_keyword(KeywordId::Immut, "expected a binding keyword")?;
        }
        let name = self.identifier()?;
        let ty = if self.match_punct(PunctuationId::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let init = if self.match_op(OperatorId::Eq) {
            Some(self.expression()?)
        } else {
            None
        };
        Ok(BindingDecl {
            mutable,
            name,
            ty,
            init,
            annotations: Vec::new(),
        })
    }

    /// `if` with any chain of `elif` / `else if` branches; both spellings build the same
    /// branch list.
    fn if_stmt(&mut self) -> Result<IfStmt, Diagnostic> {
        let cond = self.expression()?;
        let then_body = self.block("if body")?;

        let mut elif_branches = Vec::new();
        let mut else_body = None;

        loop {
            // After an indentation block the chain keyword starts the next line.
            if self.match_keyword(KeywordId::Elif) {
                let cond = self.expression()?;
                let body = self.block("elif body")?;
                elif_branches.push((cond, body));
                continue;
            }
            if self.match_keyword(KeywordId::Else) {
                if self.match_keyword(KeywordId::If) {
                    let cond = self.expression()?;
                    let body = self.block("else-if body")?;
                    elif_branches.push((cond, body));
                    continue;
                }
                else_body = Some(self.block("else body")?);
            }
            break;
        }

        Ok(IfStmt {
            cond,
            then_body,
            elif_branches,
            else_body,
        })
    }

    /// `match`/`switch` with `case`/`default` arms. Arm bodies accept `:` blocks or a
    /// single `=>` statement; both shapes produce the same arm.
    fn match_stmt(&mut self) -> Result<MatchStmt, Diagnostic> {
        let scrutinee = self.expression()?;
        let mut style = self.open_block("match body")?;
        let mut arms = Vec::new();
        while self.block_continues(&mut style) {
            let start = self.current_span();
            match self.match_arm() {
                Ok(arm) => arms.push(Spanned::new(arm, start.merge(self.previous_span()))),
                Err(d) => {
                    self.diagnostics.push(d);
                    self.synchronize_stmt();
                }
            }
        }
        Ok(MatchStmt { scrutinee, arms })
    }

    fn match_arm(&mut self) -> Result<MatchArm, Diagnostic> {
        let pattern = if self.match_keyword(KeywordId::Default) {
            MatchPattern::Default
        } else {
            self.expect_keyword(KeywordId::Case, "expected `case` or `default`")?;
            if matches!(&self.peek().kind, TokenKind::Ident(name) if name == "_") {
                self.advance();
                MatchPattern::Default
            } else {
                MatchPattern::Case(self.expression()?)
            }
        };

        let body = if self.check_punct(PunctuationId::FatArrow) {
            self.advance();
            vec![self.statement()?]
        } else {
            self.block("case body")?
        };

        Ok(MatchArm { pattern, body })
    }

    /// Expression statement, assignment, or component call with children.
    fn expr_statement(&mut self) -> Result<Stmt, Diagnostic> {
        let expr = self.expression()?;

        // Assignment operators turn the expression into an assignment target.
        for op in [
            OperatorId::Eq,
            OperatorId::PlusEq,
            OperatorId::MinusEq,
            OperatorId::StarEq,
            OperatorId::SlashEq,
        ] {
            if self.match_op(op) {
                let value = self.expression()?;
                return Ok(Stmt::Assign { target: expr, op, value });
            }
        }

        // A call or bare name followed by a child block, in either scoping style, is a
        // component with children. `open_block` consumes the `{` or `:` opener.
        if self.check_punct(PunctuationId::LBrace) || self.check_punct(PunctuationId::Colon) {
            if let Some(component) = self.into_component(expr.node.clone())? {
                return Ok(Stmt::Component(component));
            }
        }

        Ok(Stmt::Expr(expr))
    }

    /// Rewrite `Name(...)` / `Name` into a component call when a child block follows.
    fn into_component(&mut self, expr: Expr) -> Result<Option<ComponentCall>, Diagnostic> {
        let (name, args) = match expr {
            Expr::Ident(name) => (name, Vec::new()),
            Expr::Call(callee, call_args) => match callee.node {
                Expr::Ident(name) => {
                    let args = call_args
                        .into_iter()
                        .map(|a| match a {
                            CallArg::Positional(value) => ComponentArg { name: None, value },
                            CallArg::Named(name, value) => ComponentArg { name: Some(name), value },
                        })
                        .collect();
                    (name, args)
                }
                _ => return Ok(None),
            },
            _ => return Ok(None),
        };
        let children = self.block("component children")?;
        Ok(Some(ComponentCall { name, args, children }))
    }
}
