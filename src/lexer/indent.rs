//! INDENT/DEDENT handling.
//!
//! Indentation is measured at the start of every content line. Blank lines and
//! comment-only lines never change the indentation level. A dedent that lands between
//! two known levels is reported and snapped to the nearest enclosing level so lexing
//! can continue.

use super::{Lexer, Token, TokenKind};
use crate::ast::Span;
use crate::diagnostics::Diagnostic;

/// A tab counts as this many columns when measuring indentation.
const TAB_WIDTH: usize = 4;

impl<'a> Lexer<'a> {
    /// Measure the indentation of the line starting at the current position and emit
    /// `Indent`/`Dedent` tokens as needed.
    pub(super) fn handle_indentation(&mut self) {
        let start = self.current_pos;
        let mut width = 0usize;
        while let Some(c) = self.peek() {
            match c {
                ' ' => {
                    width += 1;
                    self.advance();
                }
                '\t' => {
                    width += TAB_WIDTH;
                    self.advance();
                }
                _ => break,
            }
        }

        // Blank and comment-only lines: consume through the newline and stay at line start.
        match self.peek() {
            None => {
                self.at_line_start = false;
                return;
            }
            Some('\n') | Some('\r') => {
                while let Some(c) = self.advance() {
                    if c == '\n' {
                        break;
                    }
                }
                return;
            }
            Some('#') => {
                self.skip_line_comment();
                return;
            }
            Some('/') if self.peek_next() == Some('/') => {
                self.skip_line_comment();
                return;
            }
            _ => {}
        }

        self.at_line_start = false;
        self.at_summary_pos = true;

        let current = self.indent_stack.last().copied().unwrap_or(0);
        if width > current {
            self.indent_stack.push(width);
            self.tokens.push(Token::new(TokenKind::Indent, Span::new(start, self.current_pos)));
        } else if width < current {
            while self.indent_stack.last().copied().unwrap_or(0) > width {
                self.indent_stack.pop();
                self.pending_dedents += 1;
            }
            if self.indent_stack.last().copied().unwrap_or(0) != width {
                self.diagnostics.push(
                    Diagnostic::lex(
                        "inconsistent indentation",
                        self.file,
                        Span::new(start, self.current_pos),
                    )
                    .with_hint("dedent to match an enclosing indentation level"),
                );
                // Snap to the nearest enclosing level so lexing can continue.
                self.indent_stack.push(width);
            }
        }
    }

    /// Consume a line comment and its terminating newline, staying at line start.
    fn skip_line_comment(&mut self) {
        while let Some(c) = self.advance() {
            if c == '\n' {
                break;
            }
        }
    }
}
