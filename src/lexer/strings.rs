//! String literal scanning.
//!
//! Two forms:
//! - Single-line strings with `"` or `'`, supporting the usual escapes.
//! - Triple-quoted `"""..."""` blocks, captured **verbatim** — no escape processing, and
//!   interior newlines never produce layout tokens because the whole literal is consumed
//!   as one atomic unit.

use super::{Lexer, TokenKind};
use crate::ast::Span;
use crate::diagnostics::Diagnostic;

impl<'a> Lexer<'a> {
    /// Scan a string literal; `quote` is the opening delimiter, already consumed.
    pub(super) fn scan_string(&mut self, start: usize, quote: char) {
        if quote == '"' && self.peek() == Some('"') && self.peek_next() == Some('"') {
            self.advance();
            self.advance();
            self.scan_triple_string(start);
            return;
        }

        let mut value = String::new();
        loop {
            match self.advance() {
                None | Some('\n') => {
                    self.diagnostics.push(
                        Diagnostic::lex(
                            "unterminated string literal",
                            self.file,
                            Span::new(start, self.current_pos),
                        )
                        .with_hint(format!("close the string with `{quote}`")),
                    );
                    return;
                }
                Some(c) if c == quote => break,
                Some('\\') => match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('\\') => value.push('\\'),
                    Some('0') => value.push('\0'),
                    Some(c) if c == quote => value.push(c),
                    Some(c) => {
                        self.diagnostics.push(Diagnostic::lex(
                            format!("unknown escape sequence '\\{c}'"),
                            self.file,
                            Span::new(self.current_pos - c.len_utf8() - 1, self.current_pos),
                        ));
                    }
                    None => {
                        self.diagnostics.push(Diagnostic::lex(
                            "unterminated string literal",
                            self.file,
                            Span::new(start, self.current_pos),
                        ));
                        return;
                    }
                },
                Some(c) => value.push(c),
            }
        }
        self.add_token(TokenKind::Str(value), start);
    }

    /// Scan the body of a `"""` block; the three opening quotes are already consumed.
    fn scan_triple_string(&mut self, start: usize) {
        let body_start = self.current_pos;
        loop {
            if self.source[self.current_pos..].starts_with("\"\"\"") {
                let value = self.source[body_start..self.current_pos].to_string();
                self.advance();
                self.advance();
                self.advance();
                self.add_token(TokenKind::Str(value), start);
                return;
            }
            if self.advance().is_none() {
                self.diagnostics.push(
                    Diagnostic::lex(
                        "unterminated triple-quoted string",
                        self.file,
                        Span::new(start, self.current_pos),
                    )
                    .with_hint("close the block with `\"\"\"`"),
                );
                return;
            }
        }
    }
}
