//! Lexer for the Weft notation.
//!
//! Handles tokenization including:
//! - Reserved words in every accepted spelling, collapsed via the vocabulary registries
//! - Identifiers and literals (int, float, string, triple-quoted string)
//! - Operators and punctuation (`&&`/`and` collapse to one operator token)
//! - Whole-line `=>` summary capture
//! - Indentation-based blocks (INDENT/DEDENT tokens)
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String and triple-quoted string scanning
//! - `numbers` - Numeric literal scanning
//! - `indent` - INDENT/DEDENT handling
//!
//! ## Notes
//! - Parentheses and square brackets suppress layout tokens (implicit continuation).
//!   Braces deliberately do **not**: a brace-scoped block can contain indentation-scoped
//!   statements, and the parser's scope reader needs the layout tokens inside braces to
//!   detect style mixing.

mod indent;
mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::Diagnostic;
use crate::ir::FileId;
use weft_core::lang::keywords::KeywordId;
use weft_core::lang::operators::OperatorId;
use weft_core::lang::punctuation::PunctuationId;

/// Lexer for one Weft source file.
pub struct Lexer<'a> {
    source: &'a str,
    file: FileId,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    indent_stack: Vec<usize>,
    pending_dedents: usize,
    at_line_start: bool,
    /// `true` when the next content token is the first on its line; summary lines are only
    /// recognized there.
    at_summary_pos: bool,
    /// Depth inside `(` and `[` for implicit line continuation. Braces are excluded.
    bracket_depth: usize,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    pub fn new(file: FileId, source: &'a str) -> Self {
        Self {
            source,
            file,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            indent_stack: vec![0],
            pending_dedents: 0,
            at_line_start: true,
            at_summary_pos: false,
            bracket_depth: 0,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// The token stream always ends with an `Eof` token. Any lex diagnostic makes the
    /// whole file fail; the caller records the diagnostics and produces no module for it.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<Diagnostic>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        // Remaining dedents at EOF.
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.tokens
                .push(Token::new(TokenKind::Dedent, Span::new(self.current_pos, self.current_pos)));
        }

        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(self.current_pos, self.current_pos)));

        if self.diagnostics.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.diagnostics)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].char_indices();
        iter.next();
        iter.next().map(|(_, c)| c)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        // Pending dedents first.
        if self.pending_dedents > 0 {
            self.pending_dedents -= 1;
            self.tokens
                .push(Token::new(TokenKind::Dedent, Span::new(self.current_pos, self.current_pos)));
            return;
        }

        if self.at_line_start {
            self.handle_indentation();
            return;
        }

        // Skip intra-line whitespace.
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' {
                self.advance();
            } else {
                break;
            }
        }

        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        let first_on_line = std::mem::take(&mut self.at_summary_pos);

        match c {
            // Comments: `#` and `//` both introduce a line comment.
            '#' => self.consume_to_line_end(),
            '/' if self.peek() == Some('/') => self.consume_to_line_end(),

            '\n' => {
                // Implicit continuation inside `(` / `[`.
                if self.bracket_depth > 0 {
                    return;
                }
                self.tokens
                    .push(Token::new(TokenKind::Newline, Span::new(start, self.current_pos)));
                self.at_line_start = true;
            }
            '\r' => {}

            // Operators and punctuation
            '+' => self.operator(start, OperatorId::Plus, &[('=', OperatorId::PlusEq)]),
            '-' => {
                if self.match_char('>') {
                    self.add_punct(PunctuationId::Arrow, start);
                } else if self.match_char('=') {
                    self.add_op(OperatorId::MinusEq, start);
                } else {
                    self.add_op(OperatorId::Minus, start);
                }
            }
            '*' => self.operator(start, OperatorId::Star, &[('=', OperatorId::StarEq)]),
            '/' => self.operator(start, OperatorId::Slash, &[('=', OperatorId::SlashEq)]),
            '%' => self.add_op(OperatorId::Percent, start),
            '?' => self.add_punct(PunctuationId::Question, start),
            '@' => self.add_punct(PunctuationId::At, start),
            ',' => self.add_punct(PunctuationId::Comma, start),
            ':' => self.add_punct(PunctuationId::Colon, start),
            '(' => self.open_bracket(PunctuationId::LParen, start),
            ')' => self.close_bracket(PunctuationId::RParen, start),
            '[' => self.open_bracket(PunctuationId::LBracket, start),
            ']' => self.close_bracket(PunctuationId::RBracket, start),
            // Braces are scope delimiters, not continuation brackets.
            '{' => self.add_punct(PunctuationId::LBrace, start),
            '}' => self.add_punct(PunctuationId::RBrace, start),
            '=' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::EqEq, start);
                } else if self.match_char('>') {
                    if first_on_line {
                        self.scan_summary(start);
                    } else {
                        self.add_punct(PunctuationId::FatArrow, start);
                    }
                } else {
                    self.add_op(OperatorId::Eq, start);
                }
            }
            '!' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::NotEq, start);
                } else {
                    self.add_op(OperatorId::Not, start);
                }
            }
            '<' => self.operator(start, OperatorId::Lt, &[('=', OperatorId::LtEq)]),
            '>' => self.operator(start, OperatorId::Gt, &[('=', OperatorId::GtEq)]),
            '&' => {
                if self.match_char('&') {
                    self.add_op(OperatorId::And, start);
                } else {
                    self.diagnostics.push(
                        Diagnostic::lex(
                            "unexpected character '&'",
                            self.file,
                            Span::new(start, self.current_pos),
                        )
                        .with_hint("boolean AND is spelled `&&` or `and`"),
                    );
                }
            }
            '|' => {
                if self.match_char('|') {
                    self.add_op(OperatorId::Or, start);
                } else {
                    self.diagnostics.push(
                        Diagnostic::lex(
                            "unexpected character '|'",
                            self.file,
                            Span::new(start, self.current_pos),
                        )
                        .with_hint("boolean OR is spelled `||` or `or`"),
                    );
                }
            }
            '.' => {
                if self.match_char('.') {
                    if self.match_char('=') {
                        self.add_op(OperatorId::DotDotEq, start);
                    } else {
                        self.add_op(OperatorId::DotDot, start);
                    }
                } else {
                    self.add_punct(PunctuationId::Dot, start);
                }
            }

            // Strings
            '"' => self.scan_string(start, '"'),
            '\'' => self.scan_string(start, '\''),

            // Numbers
            '0'..='9' => self.scan_number(start, c),

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => {
                self.diagnostics.push(Diagnostic::lex(
                    format!("unexpected character '{c}'"),
                    self.file,
                    Span::new(start, self.current_pos),
                ));
            }
        }
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add_token(TokenKind::Operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    /// Try compound operators, fall back to the simple one.
    fn operator(&mut self, start: usize, simple: OperatorId, compounds: &[(char, OperatorId)]) {
        for (c, id) in compounds {
            if self.match_char(*c) {
                self.add_op(*id, start);
                return;
            }
        }
        self.add_op(simple, start);
    }

    fn open_bracket(&mut self, kind: PunctuationId, start: usize) {
        self.bracket_depth += 1;
        self.add_punct(kind, start);
    }

    fn close_bracket(&mut self, kind: PunctuationId, start: usize) {
        if self.bracket_depth == 0 {
            self.diagnostics.push(Diagnostic::lex(
                "unmatched closing bracket",
                self.file,
                Span::new(start, self.current_pos),
            ));
        } else {
            self.bracket_depth -= 1;
        }
        self.add_punct(kind, start);
    }

    fn consume_to_line_end(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    // ========================================================================
    // Summary lines
    // ========================================================================

    /// Capture the rest of a `=>` line; the marker is already consumed. At most one
    /// separating space is trimmed with it, everything after is kept verbatim.
    fn scan_summary(&mut self, start: usize) {
        if matches!(self.peek(), Some(' ')) {
            self.advance();
        }
        let text_start = self.current_pos;
        self.consume_to_line_end();
        let text = self.source[text_start..self.current_pos].to_string();
        self.add_token(TokenKind::Summary(text), start);
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        // Reserved-word lookup collapses aliases; word operators and null spellings re-map
        // to their dedicated token kinds.
        match keyword_id(spelling) {
            Some(KeywordId::And) => self.add_op(OperatorId::And, start),
            Some(KeywordId::Or) => self.add_op(OperatorId::Or, start),
            Some(KeywordId::Not) => self.add_op(OperatorId::Not, start),
            Some(KeywordId::Null) => self.add_token(TokenKind::NullLit, start),
            Some(id) => self.add_token(TokenKind::Keyword(id), start),
            None => self.add_token(TokenKind::Ident(spelling.to_string()), start),
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex one source file.
#[tracing::instrument(skip_all, fields(file = file.0, source_len = source.len()))]
pub fn lex(file: FileId, source: &str) -> Result<Vec<Token>, Vec<Diagnostic>> {
    Lexer::new(file, source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::lang::keywords::KeywordId;

    fn lex_ok(source: &str) -> Vec<Token> {
        lex(FileId(0), source).unwrap_or_else(|errs| panic!("lex({source:?}) failed: {errs:?}"))
    }

    #[test]
    fn keyword_aliases_collapse_to_one_token() {
        for src in ["var", "mut", "mutable"] {
            let tokens = lex_ok(src);
            assert!(tokens[0].kind.is_keyword(KeywordId::Mut), "{src:?} -> {:?}", tokens[0].kind);
        }
        for src in ["func", "function", "fn", "def"] {
            let tokens = lex_ok(src);
            assert!(tokens[0].kind.is_keyword(KeywordId::Func), "{src:?} -> {:?}", tokens[0].kind);
        }
        for src in ["match", "switch"] {
            let tokens = lex_ok(src);
            assert!(tokens[0].kind.is_keyword(KeywordId::Match));
        }
    }

    #[test]
    fn word_and_symbol_operators_collapse() {
        for src in ["a && b", "a and b"] {
            let tokens = lex_ok(src);
            assert!(tokens[1].kind.is_operator(OperatorId::And), "{src:?} -> {:?}", tokens[1].kind);
        }
        for src in ["a || b", "a or b"] {
            let tokens = lex_ok(src);
            assert!(tokens[1].kind.is_operator(OperatorId::Or));
        }
        for src in ["!x", "not x"] {
            let tokens = lex_ok(src);
            assert!(tokens[0].kind.is_operator(OperatorId::Not), "{src:?} -> {:?}", tokens[0].kind);
        }
    }

    #[test]
    fn null_spellings_collapse() {
        for src in ["null", "nil", "none"] {
            let tokens = lex_ok(src);
            assert!(matches!(tokens[0].kind, TokenKind::NullLit), "{src:?} -> {:?}", tokens[0].kind);
        }
    }

    #[test]
    fn summary_line_captured_verbatim() {
        let tokens = lex_ok("=> validate the user's email address\nx = 1");
        match &tokens[0].kind {
            TokenKind::Summary(text) => assert_eq!(text, "validate the user's email address"),
            other => panic!("expected Summary, got {other:?}"),
        }
        // The line still terminates normally.
        assert!(matches!(tokens[1].kind, TokenKind::Newline));
    }

    #[test]
    fn summary_trims_marker_and_one_space_only() {
        let tokens = lex_ok("=>   indented   text\n");
        match &tokens[0].kind {
            TokenKind::Summary(text) => assert_eq!(text, "  indented   text"),
            other => panic!("expected Summary, got {other:?}"),
        }
    }

    #[test]
    fn fat_arrow_mid_line_is_punctuation() {
        let tokens = lex_ok("case 1 => x");
        assert!(tokens.iter().any(|t| t.kind.is_punctuation(PunctuationId::FatArrow)));
        assert!(!tokens.iter().any(|t| matches!(t.kind, TokenKind::Summary(_))));
    }

    #[test]
    fn triple_quoted_string_is_atomic_and_verbatim() {
        let src = "x = \"\"\"line one\n  line \\n two\n\"\"\"\ny = 2\n";
        let tokens = lex_ok(src);
        let s = tokens
            .iter()
            .find_map(|t| match &t.kind {
                TokenKind::Str(s) => Some(s.clone()),
                _ => None,
            })
            .unwrap();
        // No escape processing, newlines kept.
        assert_eq!(s, "line one\n  line \\n two\n");
        // Interior newlines produce no layout tokens before the literal closes.
        let newline_count = tokens.iter().filter(|t| matches!(t.kind, TokenKind::Newline)).count();
        assert_eq!(newline_count, 2, "one per content line, none inside the literal");
        let indent_count = tokens.iter().filter(|t| matches!(t.kind, TokenKind::Indent)).count();
        assert_eq!(indent_count, 0);
    }

    #[test]
    fn indentation_emits_indent_and_dedent() {
        let source = "func f():\n  x = 1\n  y = 2\nz = 3";
        let tokens = lex_ok(source);
        let indents = tokens.iter().filter(|t| matches!(t.kind, TokenKind::Indent)).count();
        let dedents = tokens.iter().filter(|t| matches!(t.kind, TokenKind::Dedent)).count();
        assert_eq!(indents, 1);
        assert_eq!(dedents, 1);
    }

    #[test]
    fn blank_and_comment_lines_do_not_change_indentation() {
        let source = "func f():\n  x = 1\n\n  # note\n  // note\n  y = 2\n";
        let tokens = lex_ok(source);
        let indents = tokens.iter().filter(|t| matches!(t.kind, TokenKind::Indent)).count();
        let dedents = tokens.iter().filter(|t| matches!(t.kind, TokenKind::Dedent)).count();
        assert_eq!(indents, 1);
        assert_eq!(dedents, 1);
    }

    #[test]
    fn newlines_suppressed_inside_parens_but_not_braces() {
        let tokens = lex_ok("f(\n  x,\n  y\n)");
        assert_eq!(tokens.iter().filter(|t| matches!(t.kind, TokenKind::Newline)).count(), 0);

        // Braces keep layout tokens so the parser can police scoping style.
        let tokens = lex_ok("type T {\n  x: int\n}");
        assert!(tokens.iter().filter(|t| matches!(t.kind, TokenKind::Newline)).count() > 0);
        assert!(tokens.iter().any(|t| matches!(t.kind, TokenKind::Indent)));
    }

    #[test]
    fn inconsistent_dedent_is_reported() {
        let source = "if x:\n    a = 1\n  b = 2\n";
        let errs = lex(FileId(0), source).unwrap_err();
        assert!(errs.iter().any(|e| e.message.contains("inconsistent indentation")));
    }

    #[test]
    fn unterminated_string_is_reported() {
        let errs = lex(FileId(0), "x = \"oops\n").unwrap_err();
        assert!(errs[0].message.contains("unterminated string"));

        let errs = lex(FileId(0), "x = \"\"\"oops").unwrap_err();
        assert!(errs[0].message.contains("unterminated triple-quoted"));
    }

    #[test]
    fn unmatched_closing_paren_is_reported() {
        let errs = lex(FileId(0), ")").unwrap_err();
        assert!(errs[0].message.contains("unmatched closing bracket"));
    }

    #[test]
    fn numbers_and_ranges() {
        let tokens = lex_ok("42 1_000 2.5 1e3 1..5 1..=5");
        assert!(matches!(tokens[0].kind, TokenKind::Int(42)));
        assert!(matches!(tokens[1].kind, TokenKind::Int(1000)));
        assert!(matches!(tokens[2].kind, TokenKind::Float(f) if (f - 2.5).abs() < 1e-9));
        assert!(matches!(tokens[3].kind, TokenKind::Float(f) if (f - 1000.0).abs() < 1e-9));
        assert!(matches!(tokens[4].kind, TokenKind::Int(1)));
        assert!(tokens[5].kind.is_operator(OperatorId::DotDot));
        assert!(matches!(tokens[6].kind, TokenKind::Int(5)));
        assert!(tokens[7].kind.is_operator(OperatorId::DotDotEq));
    }

    #[test]
    fn string_escapes() {
        let tokens = lex_ok(r#""a\nb" 'c\'d'"#);
        assert!(matches!(&tokens[0].kind, TokenKind::Str(s) if s == "a\nb"));
        assert!(matches!(&tokens[1].kind, TokenKind::Str(s) if s == "c'd"));
    }

    #[test]
    fn unicode_identifier_rejected() {
        let errs = lex(FileId(0), "π = 1").unwrap_err();
        assert!(errs[0].message.contains("unexpected character"));
    }
}
