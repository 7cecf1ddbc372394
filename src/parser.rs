//! Dialect-tolerant parser for the Weft notation.
//!
//! Converts a token stream into a raw syntax tree. The parser is tolerant by contract:
//! it always produces a module, recording problems as diagnostics and resynchronizing at
//! declaration/statement boundaries, so one malformed construct never hides the rest of
//! the file.
//!
//! Every block decides its scoping style independently (braces or indentation), and both
//! styles produce identical trees.
//!
//! ## Examples
//!
//! ```rust
//! use weft::ir::FileId;
//! use weft::{lexer, parser};
//!
//! let source = "func answer() -> int:\n    return 42\n";
//! let tokens = lexer::lex(FileId(0), source).unwrap();
//! let (module, diagnostics) = parser::parse(FileId(0), &tokens);
//! assert!(diagnostics.is_empty());
//! assert_eq!(module.decls.len(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::ir::FileId;
use crate::lexer::{Token, TokenKind};
use weft_core::lang::keywords::KeywordId;
use weft_core::lang::operators::{self, OperatorId};
use weft_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/scope.rs");
include!("parser/annotations.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
