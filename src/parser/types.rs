/// Type expression parsing.
///
/// All collection surface syntaxes parse here and keep their raw shape; normalization to
/// canonical type references happens in the resolver. Grammar:
///
/// ```text
/// type     := base postfix*
/// base     := '[' type ']'                  array sugar
///           | '[' type ':' type ']'         map sugar
///           | ident '<' type (',' type)* '>'  generic application
///           | ident
/// postfix  := '?'                           optional
/// ```
///
/// The `?` placement distinction matters: `[string]?` is an optional array, `[string?]`
/// an array of optionals.
impl<'a> Parser<'a> {
    fn parse_type(&mut self) -> Result<Spanned<RawType>, Diagnostic> {
        let start = self.current_span();
        let mut ty = self.base_type()?;
        while self.match_punct(PunctuationId::Question) {
            let span = start.merge(self.previous_span());
            ty = Spanned::new(RawType::Optional(Box::new(ty)), span);
        }
        Ok(ty)
    }

    fn base_type(&mut self) -> Result<Spanned<RawType>, Diagnostic> {
        let start = self.current_span();

        if self.match_punct(PunctuationId::LBracket) {
            let first = self.parse_type()?;
            let node = if self.match_punct(PunctuationId::Colon) {
                let value = self.parse_type()?;
                RawType::MapSugar(Box::new(first), Box::new(value))
            } else {
                RawType::ArraySugar(Box::new(first))
            };
            self.expect_punct(PunctuationId::RBracket, "expected `]` to close collection type")?;
            return Ok(Spanned::new(node, start.merge(self.previous_span())));
        }

        let name = self.identifier()?;

        if self.match_op(OperatorId::Lt) {
            let mut args = vec![self.parse_type()?];
            while self.match_punct(PunctuationId::Comma) {
                args.push(self.parse_type()?);
            }
            if !self.match_op(OperatorId::Gt) {
                return Err(self.unexpected("expected `>` to close type arguments"));
            }
            return Ok(Spanned::new(
                RawType::Generic(name, args),
                start.merge(self.previous_span()),
            ));
        }

        Ok(Spanned::new(RawType::Named(name), start.merge(self.previous_span())))
    }
}
