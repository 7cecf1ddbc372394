/// Top-level declaration parsing: imports, type declarations in all five forms, enums,
/// functions, and views.
impl<'a> Parser<'a> {
    fn declaration(&mut self) -> Result<RawDecl, Diagnostic> {
        let trivia = self.leading_trivia()?;

        // Summary lines bind to functions only. Anywhere else they are dropped with a
        // diagnostic, and the declaration itself still parses.
        if !trivia.summary.is_empty()
            && !(self.check_keyword(KeywordId::Func) || self.check_keyword(KeywordId::Async))
        {
            self.diagnostics.push(
                Diagnostic::annotation(
                    "`=>` summary lines can only precede a function",
                    self.file,
                    self.previous_span(),
                )
                .with_hint("move the summary block directly above a `func` declaration"),
            );
        }

        if self.match_keyword(KeywordId::Import) {
            self.reject_unused_annotations(&trivia)?;
            return self.import_decl().map(RawDecl::Import);
        }

        for (kw, form) in [
            (KeywordId::Type, TypeForm::Type),
            (KeywordId::Class, TypeForm::Class),
            (KeywordId::Struct, TypeForm::Struct),
            (KeywordId::Data, TypeForm::Data),
            (KeywordId::Object, TypeForm::Object),
        ] {
            if self.match_keyword(kw) {
                return self.type_decl(form, trivia.annotations).map(RawDecl::Type);
            }
        }

        if self.match_keyword(KeywordId::Enum) {
            return self.enum_decl(trivia.annotations).map(RawDecl::Enum);
        }

        if self.check_keyword(KeywordId::Async) || self.check_keyword(KeywordId::Func) {
            return self.function_decl(trivia).map(RawDecl::Function);
        }

        if self.match_keyword(KeywordId::View) {
            return self.view_decl(trivia.annotations).map(RawDecl::View);
        }

        Err(self.unexpected("expected a declaration"))
    }

    /// Imports carry no annotations.
    fn reject_unused_annotations(&self, trivia: &LeadingTrivia) -> Result<(), Diagnostic> {
        if let Some(a) = trivia.annotations.first() {
            return Err(Diagnostic::annotation(
                format!("annotation `@{}` cannot precede an import", a.node.name),
                self.file,
                a.span,
            ));
        }
        Ok(())
    }

    /// `import name` / `import pkg.name`.
    fn import_decl(&mut self) -> Result<ImportDecl, Diagnostic> {
        let mut segments = vec![self.identifier()?];
        while self.match_punct(PunctuationId::Dot) {
            segments.push(self.identifier()?);
        }
        Ok(ImportDecl { segments })
    }

    /// Body of a `type`/`class`/`struct`/`data`/`object` declaration.
    fn type_decl(
        &mut self,
        form: TypeForm,
        annotations: Vec<Spanned<RawAnnotation>>,
    ) -> Result<RawTypeDecl, Diagnostic> {
        let name = self.identifier()?;
        let (fields, methods) = self.type_body("type body")?;
        Ok(RawTypeDecl {
            form,
            name,
            fields,
            methods,
            annotations,
        })
    }

    /// Fields and methods in either scoping style.
    fn type_body(&mut self, what: &str) -> Result<TypeBodyItems, Diagnostic> {
        let mut style = self.open_block(what)?;
        let mut fields = Vec::new();
        let mut methods = Vec::new();
        while self.block_continues(&mut style) {
            let start = self.current_span();
            match self.type_member() {
                Ok(TypeMember::Field(f)) => fields.push(Spanned::new(f, start.merge(self.previous_span()))),
                Ok(TypeMember::Method(m)) => methods.push(Spanned::new(m, start.merge(self.previous_span()))),
                Err(d) => {
                    self.diagnostics.push(d);
                    self.synchronize_stmt();
                }
            }
        }
        Ok((fields, methods))
    }

    fn type_member(&mut self) -> Result<TypeMember, Diagnostic> {
        let trivia = self.leading_trivia()?;

        if self.check_keyword(KeywordId::Async) || self.check_keyword(KeywordId::Func) {
            return self.function_decl(trivia).map(TypeMember::Method);
        }

        // Fields: `name: type [= init]`, optionally introduced by a binding keyword.
        let mutable = if self.match_keyword(KeywordId::Mut) {
            true
        } else {
            // Field default is immutable whether or not a keyword is written.
            self.match_keyword(KeywordId::Immut);
            false
        };

        if !trivia.summary.is_empty() {
            return Err(Diagnostic::annotation(
                "`=>` summary lines can only precede a function",
                self.file,
                self.current_span(),
            ));
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
        Ok(TypeMember::Field(BindingDecl {
            mutable,
            name,
            ty,
            init,
            annotations: trivia.annotations,
        }))
    }

    /// `enum Name [: backing]` with unit, associated-value, or raw-value cases.
    fn enum_decl(&mut self, annotations: Vec<Spanned<RawAnnotation>>) -> Result<RawEnumDecl, Diagnostic> {
        let name = self.identifier()?;

        // A backing type reads `enum Name: int {` — only when the colon is followed by a
        // type name rather than a layout token.
        let backing = if self.check_punct(PunctuationId::Colon)
            && matches!(self.peek_next().kind, TokenKind::Ident(_))
        {
            self.advance();
            Some(self.parse_type()?)
        } else {
            None
        };

        let mut style = self.open_block("enum body")?;
        let mut cases = Vec::new();
        while self.block_continues(&mut style) {
            let start = self.current_span();
            match self.enum_case() {
                Ok(case) => cases.push(Spanned::new(case, start.merge(self.previous_span()))),
                Err(d) => {
                    self.diagnostics.push(d);
                    self.synchronize_stmt();
                }
            }
        }
        Ok(RawEnumDecl {
            name,
            backing,
            cases,
            annotations,
        })
    }

    /// One enum case: `Name`, `Name(field: type, ...)`, or `Name = literal`.
    ///
    /// Both a payload and a raw value are accepted here so the assembler can report the
    /// mutual-exclusion violation as the fatal error it is.
    fn enum_case(&mut self) -> Result<RawEnumCase, Diagnostic> {
        // `case` is optional before each entry.
        self.match_keyword(KeywordId::Case);
        let name = self.identifier()?;

        let mut payload = Vec::new();
        if self.match_punct(PunctuationId::LParen) {
            if !self.check_punct(PunctuationId::RParen) {
                payload.push(self.enum_payload_field()?);
                while self.match_punct(PunctuationId::Comma) {
                    payload.push(self.enum_payload_field()?);
                }
            }
            self.expect_punct(PunctuationId::RParen, "expected `)` after case payload")?;
        }

        let raw_value = if self.match_op(OperatorId::Eq) {
            let start = self.current_span();
            let lit = self.literal()?;
            Some(Spanned::new(lit, start.merge(self.previous_span())))
        } else {
            None
        };

        // Trailing comma between cases is tolerated.
        self.match_punct(PunctuationId::Comma);

        Ok(RawEnumCase { name, payload, raw_value })
    }

    fn enum_payload_field(&mut self) -> Result<(Ident, Spanned<RawType>), Diagnostic> {
        let name = self.identifier()?;
        self.expect_punct(PunctuationId::Colon, "expected `:` after payload field name")?;
        let ty = self.parse_type()?;
        Ok((name, ty))
    }

    /// `[async] func name(params) [-> type]` with body.
    fn function_decl(&mut self, trivia: LeadingTrivia) -> Result<RawFunctionDecl, Diagnostic> {
        let is_async = self.match_keyword(KeywordId::Async);
        self.expect_keyword(KeywordId::Func, "expected a function declaration")?;
        let name = self.identifier()?;

        self.expect_punct(PunctuationId::LParen, "expected `(` after function name")?;
        let mut params = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            params.push(self.param()?);
            while self.match_punct(PunctuationId::Comma) {
                params.push(self.param()?);
            }
        }
        self.expect_punct(PunctuationId::RParen, "expected `)` after parameters")?;

        let return_type = if self.match_punct(PunctuationId::Arrow) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = self.block("function body")?;
        Ok(RawFunctionDecl {
            name,
            is_async,
            params,
            return_type,
            body,
            annotations: trivia.annotations,
            summary: trivia.summary,
        })
    }

    fn param(&mut self) -> Result<Spanned<RawParam>, Diagnostic> {
        let start = self.current_span();
        let name = self.identifier()?;
        self.expect_punct(PunctuationId::Colon, "expected `:` after parameter name")?;
        let ty = self.parse_type()?;
        let span = start.merge(self.previous_span());
        Ok(Spanned::new(RawParam { name, ty }, span))
    }

    /// `view Name` with state fields, lifecycle hooks, and a component body.
    fn view_decl(&mut self, annotations: Vec<Spanned<RawAnnotation>>) -> Result<RawViewDecl, Diagnostic> {
        let name = self.identifier()?;

        let mut style = self.open_block("view body")?;
        let mut fields = Vec::new();
        let mut hooks = Vec::new();
        let mut body = Vec::new();
        while self.block_continues(&mut style) {
            let start = self.current_span();
            match self.view_member(&mut fields, &mut hooks, &mut body, start) {
                Ok(()) => {}
                Err(d) => {
                    self.diagnostics.push(d);
                    self.synchronize_stmt();
                }
            }
        }
        Ok(RawViewDecl {
            name,
            fields,
            hooks,
            body,
            annotations,
        })
    }

    fn view_member(
        &mut self,
        fields: &mut Vec<Spanned<BindingDecl>>,
        hooks: &mut Vec<Spanned<RawHook>>,
        body: &mut Vec<Spanned<Stmt>>,
        start: Span,
    ) -> Result<(), Diagnostic> {
        // Lifecycle hooks: `onAppear { ... }`, `onDisappear:`, `onChange(field):`.
        if let Some(trigger) = self.peek_hook_trigger() {
            let hook = self.hook(trigger)?;
            hooks.push(Spanned::new(hook, start.merge(self.previous_span())));
            return Ok(());
        }

        // State fields keep their binding keyword and annotations.
        if self.check_punct(PunctuationId::At)
            || self.check_keyword(KeywordId::Mut)
            || self.check_keyword(KeywordId::Immut)
        {
            let trivia = self.leading_trivia()?;
            let mutable = self.match_keyword(KeywordId::Mut);
            if !mutable {
                self.match_keyword(KeywordId::Immut);
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
            fields.push(Spanned::new(
                BindingDecl {
                    mutable,
                    name,
                    ty,
                    init,
                    annotations: trivia.annotations,
                },
                start.merge(self.previous_span()),
            ));
            return Ok(());
        }

        // Bare `name: type [= init]` is also a (immutable) state field.
        if matches!(self.peek().kind, TokenKind::Ident(_))
            && self.peek_next().kind.is_punctuation(PunctuationId::Colon)
        {
            let name = self.identifier()?;
            self.advance(); // `:`
            let ty = Some(self.parse_type()?);
            let init = if self.match_op(OperatorId::Eq) {
                Some(self.expression()?)
            } else {
                None
            };
            fields.push(Spanned::new(
                BindingDecl {
                    mutable: false,
                    name,
                    ty,
                    init,
                    annotations: Vec::new(),
                },
                start.merge(self.previous_span()),
            ));
            return Ok(());
        }

        // Everything else is body content (component calls and ordinary statements).
        let stmt = self.statement()?;
        body.push(stmt);
        Ok(())
    }

    fn peek_hook_trigger(&self) -> Option<&'static str> {
        match &self.peek().kind {
            TokenKind::Ident(name) if name == "onAppear" || name == "onDisappear" || name == "onChange" => {
                Some(match name.as_str() {
                    "onAppear" => "onAppear",
                    "onDisappear" => "onDisappear",
                    _ => "onChange",
                })
            }
            _ => None,
        }
    }

    fn hook(&mut self, trigger: &'static str) -> Result<RawHook, Diagnostic> {
        self.advance();
        let trigger = match trigger {
            "onAppear" => HookTrigger::Appear,
            "onDisappear" => HookTrigger::Disappear,
            _ => {
                self.expect_punct(PunctuationId::LParen, "expected `(` after `onChange`")?;
                let field = self.identifier()?;
                self.expect_punct(PunctuationId::RParen, "expected `)` after onChange field")?;
                HookTrigger::Change(field)
            }
        };
        let body = self.block("hook body")?;
        Ok(RawHook { trigger, body })
    }
}

/// Fields and methods collected from a type body.
type TypeBodyItems = (Vec<Spanned<BindingDecl>>, Vec<Spanned<RawFunctionDecl>>);

/// One parsed member of a type body.
enum TypeMember {
    Field(BindingDecl),
    Method(RawFunctionDecl),
}
