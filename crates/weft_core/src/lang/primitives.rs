//! Primitive type and collection-name vocabulary.
//!
//! Weft admits several spellings per primitive (`int`/`integer`/`Int`, `string`/`str`, ...)
//! and several surface syntaxes per collection (`[T]`/`Array<T>`/`List<T>`). This registry
//! maps every accepted spelling to a canonical [`PrimitiveKind`] or [`CollectionKind`] so the
//! type resolver never compares raw strings.
//!
//! ## Notes
//! - `any` is reserved and **never** a valid type; [`is_any`] lets the resolver reject it
//!   with a dedicated message instead of an unknown-type error.

use super::registry::Stability;

/// Canonical primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Int,
    Float,
    Bool,
    Str,
    Void,
}

/// Canonical collection shapes (surface syntax varies; the shape does not).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Array,
    Map,
    Set,
}

/// Metadata for a primitive type.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveInfo {
    pub kind: PrimitiveKind,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub stability: Stability,
}

/// Registry of primitive types and their accepted spellings.
pub const PRIMITIVES: &[PrimitiveInfo] = &[
    info(PrimitiveKind::Int, "int", &["integer", "Int", "Integer"]),
    info(PrimitiveKind::Float, "float", &["double", "Float", "Double"]),
    info(PrimitiveKind::Bool, "bool", &["boolean", "Bool", "Boolean"]),
    info(PrimitiveKind::Str, "string", &["str", "String"]),
    info(PrimitiveKind::Void, "void", &["Void", "unit", "Unit"]),
];

/// Spellings accepted for the array collection in generic position.
pub const ARRAY_NAMES: &[&str] = &["Array", "List"];

/// Spellings accepted for the map collection in generic position.
pub const MAP_NAMES: &[&str] = &["Map", "Dict"];

/// Spellings accepted for the set collection in generic position.
pub const SET_NAMES: &[&str] = &["Set"];

/// The reserved, always-invalid `any` spelling.
pub const ANY: &str = "any";

/// Return `true` if the spelling is the reserved `any` type (always an error to declare).
pub fn is_any(name: &str) -> bool {
    name == ANY || name == "Any"
}

/// Resolve a spelling (canonical or alias) to a primitive kind.
pub fn from_str(name: &str) -> Option<PrimitiveKind> {
    if let Some(p) = PRIMITIVES.iter().find(|p| p.canonical == name) {
        return Some(p.kind);
    }
    PRIMITIVES
        .iter()
        .find(|p| {
            let aliases: &[&str] = p.aliases;
            aliases.contains(&name)
        })
        .map(|p| p.kind)
}

/// Return the canonical spelling for a primitive kind.
pub fn as_str(kind: PrimitiveKind) -> &'static str {
    PRIMITIVES
        .iter()
        .find(|p| p.kind == kind)
        .expect("primitive info missing")
        .canonical
}

/// Resolve a generic-position collection name (`Array`, `List`, `Map`, `Dict`, `Set`).
pub fn collection_from_str(name: &str) -> Option<CollectionKind> {
    if ARRAY_NAMES.contains(&name) {
        Some(CollectionKind::Array)
    } else if MAP_NAMES.contains(&name) {
        Some(CollectionKind::Map)
    } else if SET_NAMES.contains(&name) {
        Some(CollectionKind::Set)
    } else {
        None
    }
}

/// Expected type-argument count for a collection kind.
pub fn collection_arity(kind: CollectionKind) -> usize {
    match kind {
        CollectionKind::Map => 2,
        CollectionKind::Array | CollectionKind::Set => 1,
    }
}

const fn info(kind: PrimitiveKind, canonical: &'static str, aliases: &'static [&'static str]) -> PrimitiveInfo {
    PrimitiveInfo {
        kind,
        canonical,
        aliases,
        stability: Stability::Stable,
    }
}
