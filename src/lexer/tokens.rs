//! Token types for the Weft lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words — alias collapsing happens here, so `var`,
//!   `mut` and `mutable` all arrive in the parser as the same token
//! - `Operator(OperatorId)` for symbolic operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! ## Notes
//! - Word operators (`and`, `or`, `not`) are reserved words but re-map to `Operator`
//!   tokens, and the null spellings (`null`, `nil`, `none`) re-map to `NullLit`, so the
//!   parser sees one token kind per concept.
//! - A `Summary` token is one whole `=>` line, captured verbatim minus the marker.

use crate::ast::Span;
use weft_core::lang::keywords::{self, KeywordId};
use weft_core::lang::operators::OperatorId;
use weft_core::lang::punctuation::PunctuationId;

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and literals ==========
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    /// Any null spelling (`null`, `nil`, `none`).
    NullLit,

    // ========== Intent lines ==========
    /// A whole `=>` line; the text is everything after the marker.
    Summary(String),

    // ========== Layout ==========
    Newline,
    Indent,
    Dedent,

    // ========== Special ==========
    Eof,
}

impl TokenKind {
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Layout tokens carry no content; the parser's scope reader consumes them directly.
    pub fn is_layout(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent)
    }
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
