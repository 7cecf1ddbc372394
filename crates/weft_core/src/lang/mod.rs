//! Weft language vocabulary registries.
//!
//! The design goal is to avoid stringly-typed checks scattered across the front-end.
//! Callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`, `AnnotationId`) and look
//! up spellings/metadata via registry tables.
//!
//! ## Notes
//! - The lexer/parser enforce syntax; registries only provide spellings and metadata for
//!   shared use (alias collapsing, diagnostics, docs).
//! - Every registry exposes `from_str` (canonical-or-alias lookup) and `as_str` (canonical
//!   spelling for an id).

pub mod annotations;
pub mod keywords;
pub mod operators;
pub mod primitives;
pub mod punctuation;
pub mod registry;
