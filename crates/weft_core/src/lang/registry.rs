//! Shareable metadata for `weft_core::lang` registries.
//!
//! The `lang` module is a set of **registry-first** vocabularies: keywords, operators,
//! punctuation, annotations, primitive types. This submodule provides the small,
//! dependency-free metadata types reused across all of them.
//!
//! ## Notes
//! - These types are intentionally lightweight and `Copy`-friendly so registries can live
//!   in `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; the lexer/parser remain the source of
//!   truth for syntactic legality.

/// Describe the lifecycle status of a vocabulary item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Draft,
    Deprecated,
}

/// Shared metadata shape for registry items.
///
/// Many vocabularies share the same core fields: stable identity (`id`), accepted spellings
/// (`canonical` + `aliases`), and a short `description` for generated reference tables.
/// Registries that need extra per-item data (e.g. operator precedence) wrap this struct in
/// an extension info type.
#[derive(Debug, Clone, Copy)]
pub struct LangItemInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub stability: Stability,
}
