/// Annotation extraction.
///
/// Annotations are `@Name` or `@Name(args)` lines preceding a declaration. A run of
/// leading annotations may also contain `=>` summary lines (conventionally introduced by
/// `@SumFunc`); both bind to the nearest following declaration. Name recognition is NOT
/// done here — the raw spelling is preserved and resolved during assembly, so unknown
/// annotations survive as structured data.
impl<'a> Parser<'a> {
    /// Collect annotations and summary lines preceding a declaration.
    fn leading_trivia(&mut self) -> Result<LeadingTrivia, Diagnostic> {
        let mut annotations = Vec::new();
        let mut summary = Vec::new();
        loop {
            self.skip_newlines();
            if self.check_punct(PunctuationId::At) {
                let start = self.current_span();
                self.advance();
                // Problems inside an annotation are annotation errors, not parse errors,
                // even though the low-level helpers report the latter.
                let annotation = self.annotation().map_err(|mut d| {
                    d.kind = DiagnosticKind::Annotation;
                    d
                })?;
                let span = start.merge(self.previous_span());
                annotations.push(Spanned::new(annotation, span));
            } else if let TokenKind::Summary(text) = &self.peek().kind {
                summary.push(text.clone());
                self.advance();
            } else {
                break;
            }
        }
        Ok(LeadingTrivia { annotations, summary })
    }

    /// Parse the body of an annotation; the `@` is already consumed.
    fn annotation(&mut self) -> Result<RawAnnotation, Diagnostic> {
        let name = self.identifier_like("expected annotation name after `@`")?;
        let mut args = Vec::new();
        if self.match_punct(PunctuationId::LParen) {
            if !self.check_punct(PunctuationId::RParen) {
                args.push(self.annotation_arg()?);
                while self.match_punct(PunctuationId::Comma) {
                    args.push(self.annotation_arg()?);
                }
            }
            self.expect_punct(PunctuationId::RParen, "expected `)` to close annotation arguments")?;
        }
        Ok(RawAnnotation { name, args })
    }

    fn annotation_arg(&mut self) -> Result<RawAnnotationArg, Diagnostic> {
        let arg = self.annotation_value()?;
        // `key: value` pairs.
        if let RawAnnotationArg::Ident(key) = &arg {
            if self.match_punct(PunctuationId::Colon) {
                let key = key.clone();
                let value = self.annotation_value()?;
                return Ok(RawAnnotationArg::Pair { key, value: Box::new(value) });
            }
        }
        Ok(arg)
    }

    fn annotation_value(&mut self) -> Result<RawAnnotationArg, Diagnostic> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(RawAnnotationArg::Ident(name))
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(RawAnnotationArg::Str(s))
            }
            TokenKind::Int(v) => {
                self.advance();
                Ok(RawAnnotationArg::Int(v))
            }
            TokenKind::Float(v) => {
                self.advance();
                Ok(RawAnnotationArg::Float(v))
            }
            TokenKind::Keyword(KeywordId::True) => {
                self.advance();
                Ok(RawAnnotationArg::Bool(true))
            }
            TokenKind::Keyword(KeywordId::False) => {
                self.advance();
                Ok(RawAnnotationArg::Bool(false))
            }
            _ => Err(self
                .unexpected("expected annotation argument")
                .with_note("annotation arguments are identifiers, literals, or `key: value` pairs")),
        }
    }
}
