//! Numeric literal scanning.
//!
//! Integers and floats with optional `_` separators and exponents. A trailing `.` never
//! joins the number (`1..10` stays a range, `xs[0].len` stays a member access).

use super::{Lexer, TokenKind};
use crate::ast::Span;
use crate::diagnostics::Diagnostic;

impl<'a> Lexer<'a> {
    /// Scan a numeric literal; the first digit is already consumed.
    pub(super) fn scan_number(&mut self, start: usize, _first: char) {
        self.consume_digits();

        let mut is_float = false;

        // Fraction — only if the dot is followed by a digit.
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            self.consume_digits();
        }

        // Exponent.
        if matches!(self.peek(), Some('e') | Some('E')) {
            let after = self.peek_next();
            let signed = matches!(after, Some('+') | Some('-'));
            let has_digit = if signed {
                self.source[self.current_pos..]
                    .chars()
                    .nth(2)
                    .is_some_and(|c| c.is_ascii_digit())
            } else {
                after.is_some_and(|c| c.is_ascii_digit())
            };
            if has_digit {
                is_float = true;
                self.advance();
                if signed {
                    self.advance();
                }
                self.consume_digits();
            }
        }

        let raw: String = self.source[start..self.current_pos]
            .chars()
            .filter(|c| *c != '_')
            .collect();

        if is_float {
            match raw.parse::<f64>() {
                Ok(v) => self.add_token(TokenKind::Float(v), start),
                Err(_) => self.diagnostics.push(Diagnostic::lex(
                    format!("invalid float literal `{raw}`"),
                    self.file,
                    Span::new(start, self.current_pos),
                )),
            }
        } else {
            match raw.parse::<i64>() {
                Ok(v) => self.add_token(TokenKind::Int(v), start),
                Err(_) => self.diagnostics.push(Diagnostic::lex(
                    format!("integer literal `{raw}` is out of range"),
                    self.file,
                    Span::new(start, self.current_pos),
                )),
            }
        }
    }

    fn consume_digits(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
    }
}
