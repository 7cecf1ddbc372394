/// Scope reader: per-block brace/indentation decision.
///
/// Every block in Weft independently chooses braces or indentation:
///
/// ```text
/// func f() {          func f():
///     x = 1               x = 1
/// }
/// ```
///
/// `open_block` looks at the tokens after a block header and commits to one style;
/// `block_continues` then drives the item loop, consuming layout tokens and the block's
/// closer. Mixing styles inside one block is a scope error: the block is closed at the
/// point of the violation and parsing continues after it, so a single mixed block never
/// poisons the rest of the file.

/// What the scope reader sees at the head of the token stream.
#[derive(Clone, Copy)]
enum LayoutSig {
    Eof,
    Newline,
    Indent,
    Dedent,
    RBrace,
    Content,
}

/// Scoping style of one open block.
enum BlockStyle {
    /// `{ ... }`. `depth` tracks net indentation inside the braces; a dedent below the
    /// opening level means the block was closed by indentation instead of `}`.
    Brace { depth: usize },
    /// `:` NEWLINE INDENT ... DEDENT.
    Indent,
}

impl<'a> Parser<'a> {
    /// Consume a block opener and commit to a scoping style.
    ///
    /// Accepted forms: `{`, `: {`, and `:` newline indent.
    fn open_block(&mut self, what: &str) -> Result<BlockStyle, Diagnostic> {
        if self.match_punct(PunctuationId::LBrace) {
            self.skip_newlines();
            return Ok(BlockStyle::Brace { depth: 0 });
        }
        self.expect_punct(PunctuationId::Colon, &format!("expected `{{` or `:` to open {what}"))?;
        if self.match_punct(PunctuationId::LBrace) {
            self.skip_newlines();
            return Ok(BlockStyle::Brace { depth: 0 });
        }
        self.skip_newlines();
        self.expect_indent(what)?;
        Ok(BlockStyle::Indent)
    }

    fn expect_indent(&mut self, what: &str) -> Result<(), Diagnostic> {
        if matches!(self.peek().kind, TokenKind::Indent) {
            self.advance();
            Ok(())
        } else {
            Err(Diagnostic::parse(
                format!("expected an indented block for {what}"),
                self.file,
                self.current_span(),
            )
            .with_hint("indent the block body, or use `{ ... }`"))
        }
    }

    /// Advance over layout inside a block and report whether another item follows.
    ///
    /// Returns `false` once the block's closer has been consumed (or the block was
    /// force-closed by a scope violation or end of input).
    fn block_continues(&mut self, style: &mut BlockStyle) -> bool {
        loop {
            let sig = match &self.peek().kind {
                TokenKind::Eof => LayoutSig::Eof,
                TokenKind::Newline => LayoutSig::Newline,
                TokenKind::Indent => LayoutSig::Indent,
                TokenKind::Dedent => LayoutSig::Dedent,
                TokenKind::Punctuation(PunctuationId::RBrace) => LayoutSig::RBrace,
                _ => LayoutSig::Content,
            };
            match (sig, &mut *style) {
                (LayoutSig::Eof, BlockStyle::Brace { .. }) => {
                    self.diagnostics.push(
                        Diagnostic::scope(
                            "brace-scoped block is never closed",
                            self.file,
                            self.current_span(),
                        )
                        .with_hint("add the matching `}`"),
                    );
                    return false;
                }
                (LayoutSig::Eof, BlockStyle::Indent) => return false,

                (LayoutSig::Newline, _) => {
                    self.advance();
                }

                (LayoutSig::Indent, BlockStyle::Brace { depth }) => {
                    *depth += 1;
                    self.advance();
                }
                (LayoutSig::Indent, BlockStyle::Indent) => {
                    // A nested block should have consumed this. Tolerate and move on.
                    self.advance();
                }

                (LayoutSig::Dedent, BlockStyle::Brace { depth }) => {
                    if *depth == 0 {
                        // The text dedented below the brace block's opening level: the
                        // block was closed by indentation while still expecting `}`.
                        self.diagnostics.push(
                            Diagnostic::scope(
                                "brace-scoped block closed by dedent",
                                self.file,
                                self.current_span(),
                            )
                            .with_hint("a block uses either braces or indentation, not both"),
                        );
                        // Leave the dedent for the enclosing blocks; they close off it.
                        // A stray `}` later is reported where it turns up.
                        return false;
                    }
                    *depth -= 1;
                    self.advance();
                }
                (LayoutSig::Dedent, BlockStyle::Indent) => {
                    self.advance();
                    return false;
                }

                (LayoutSig::RBrace, BlockStyle::Brace { .. }) => {
                    self.advance();
                    return false;
                }
                (LayoutSig::RBrace, BlockStyle::Indent) => {
                    self.diagnostics.push(
                        Diagnostic::scope(
                            "unexpected `}` in an indentation-scoped block",
                            self.file,
                            self.current_span(),
                        )
                        .with_hint("a block uses either braces or indentation, not both"),
                    );
                    self.advance();
                }

                (LayoutSig::Content, _) => return true,
            }
        }
    }

    /// Parse a statement block in either scoping style.
    fn block(&mut self, what: &str) -> Result<Vec<Spanned<Stmt>>, Diagnostic> {
        let mut style = self.open_block(what)?;
        let mut stmts = Vec::new();
        while self.block_continues(&mut style) {
            match self.statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(d) => {
                    self.diagnostics.push(d);
                    self.synchronize_stmt();
                }
            }
        }
        Ok(stmts)
    }
}
