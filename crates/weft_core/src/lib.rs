//! Shared language vocabulary for the Weft front-end.
//!
//! Weft deliberately accepts many surface spellings for one concept (`var`/`mut`/`mutable`,
//! `func`/`function`/`fn`/`def`, `&&`/`and`, ...). This crate is the single source of truth
//! for that vocabulary: registry-first const tables mapping stable IDs to canonical spellings
//! and accepted aliases.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - The lexer collapses aliases once, at tokenization, by consulting these tables; the parser
//!   and everything downstream only ever see stable IDs.
//!
//! ## Examples
//! ```rust
//! use weft_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("func"), Some(KeywordId::Func));
//! assert_eq!(keywords::from_str("def"), Some(KeywordId::Func)); // alias
//! assert_eq!(keywords::as_str(KeywordId::Func), "func");
//! ```

pub mod lang;
