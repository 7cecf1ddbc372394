//! Pseudocode front-end for the Weft language: lexer, scope reader, tolerant parser,
//! type resolver, and canonical IR assembly.
//!
//! Weft accepts several surface dialects of the same language (brace or indentation
//! scoping, keyword aliases, word or symbol operators) and canonicalizes all of them
//! into one deterministic [`ir::Program`]. Malformed input degrades into diagnostics,
//! not failure: the only fatal conditions are a duplicate `@Main` entry point and an
//! enum case carrying both a payload and a raw value.
//!
//! ## Notes
//! - Vocabulary identity (keywords/operators/punctuation/annotations) comes from the
//!   `weft_core::lang` registries.
//! - [`compile::compile`] is the top-level entry point; the per-stage modules are
//!   public for tooling that wants tokens or raw trees directly.
//!
//! ## Examples
//! ```rust
//! use weft::compile::{compile, SourceFile};
//!
//! let sources = [SourceFile::new("hello.weft", "func main():\n    print(\"hi\")\n")];
//! let outcome = compile(&sources, Vec::new());
//! let program = outcome.program.unwrap();
//! assert_eq!(program.modules[0].functions.len(), 1);
//! ```
//!
//! ## See also
//! - `weft_core::lang` for registry-backed language vocabulary.

pub mod assemble;
pub mod ast;
pub mod compile;
pub mod diagnostics;
pub mod ir;
pub mod lexer;
pub mod parser;
pub mod resolve;
