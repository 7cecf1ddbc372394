//! Recognized annotation vocabulary.
//!
//! Annotations are `@Name(...)` markers attached to the nearest following declaration.
//! The recognized set is enumerated here; anything else is preserved by the front-end as a
//! structured unknown rather than rejected, so the IR stays forward-compatible with
//! annotations this registry has never heard of.
//!
//! ## Notes
//! - Several annotations have multiple accepted spellings (`@SumFunc`/`@Summary`,
//!   `@Schema`/`@Entity`/`@DatabaseModel`, ...); they collapse to one [`AnnotationId`].
//! - Lookup via [`from_str`] is **case-sensitive**.

use super::registry::{LangItemInfo, Stability};

/// Stable identifier for recognized annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationId {
    /// Free-form author instruction for the generation collaborator.
    Instruction,
    /// Introduces a run of `=>` intent lines attached to a function.
    Summary,
    /// Secondary index hint (also used as a database index marker on fields).
    Index,
    /// Serialize as JSON.
    Json,
    /// Marks a type as a persistent schema/entity.
    Schema,
    /// Primary key field.
    Id,
    /// Explicit persisted field.
    Field,
    /// Field excluded from persistence.
    Transient,
    /// Cross-entity reference field.
    ForeignKey,
    /// Field may be null in storage.
    Nullable,
    /// Field must be present.
    Required,
    /// Field value must be unique.
    Unique,
    /// View-local mutable state.
    State,
    /// Two-way bound state passed in by a parent view.
    Binding,
    /// Externally observed model object.
    Observed,
    /// Environment-provided value.
    Environment,
    /// Program entry point (at most one per program).
    Main,
}

/// Metadata entry for an annotation.
pub type AnnotationInfo = LangItemInfo<AnnotationId>;

/// Registry of recognized annotations.
pub const ANNOTATIONS: &[AnnotationInfo] = &[
    info(
        AnnotationId::Instruction,
        "Instruction",
        &[],
        "Free-form instruction text for the code generator.",
    ),
    info(
        AnnotationId::Summary,
        "SumFunc",
        &["Summary"],
        "Introduces a block of `=>` intent lines describing a function.",
    ),
    info(AnnotationId::Index, "Index", &[], "Index hint for lookups or storage."),
    info(AnnotationId::Json, "JSON", &[], "Serialize the declaration as JSON."),
    info(
        AnnotationId::Schema,
        "Schema",
        &["Entity", "DatabaseModel"],
        "Marks a type as a persistent schema.",
    ),
    info(AnnotationId::Id, "Id", &[], "Primary key field."),
    info(AnnotationId::Field, "Field", &[], "Explicit persisted field."),
    info(
        AnnotationId::Transient,
        "Transient",
        &["Exclude", "Ignore", "NotField"],
        "Field excluded from persistence.",
    ),
    info(
        AnnotationId::ForeignKey,
        "ForeignKey",
        &["Reference", "Relation"],
        "Cross-entity reference field.",
    ),
    info(
        AnnotationId::Nullable,
        "Nullable",
        &["Optional"],
        "Field may be null in storage.",
    ),
    info(AnnotationId::Required, "Required", &[], "Field must be present."),
    info(AnnotationId::Unique, "Unique", &[], "Field value must be unique."),
    info(AnnotationId::State, "State", &[], "View-local mutable state."),
    info(AnnotationId::Binding, "Binding", &[], "Two-way bound state from a parent view."),
    info(AnnotationId::Observed, "Observed", &[], "Externally observed model object."),
    info(AnnotationId::Environment, "Environment", &[], "Environment-provided value."),
    info(AnnotationId::Main, "Main", &[], "Program entry point."),
];

/// The view-state annotations; at most one of these may tag a single view field.
pub const STATE_ANNOTATIONS: &[AnnotationId] = &[
    AnnotationId::State,
    AnnotationId::Binding,
    AnnotationId::Observed,
    AnnotationId::Environment,
];

/// Resolve an annotation name (canonical or alias) to its stable id.
pub fn from_str(name: &str) -> Option<AnnotationId> {
    if let Some(a) = ANNOTATIONS.iter().find(|a| a.canonical == name) {
        return Some(a.id);
    }
    ANNOTATIONS
        .iter()
        .find(|a| {
            let aliases: &[&str] = a.aliases;
            aliases.contains(&name)
        })
        .map(|a| a.id)
}

/// Return the canonical spelling for an annotation.
pub fn as_str(id: AnnotationId) -> &'static str {
    info_for(id).canonical
}

/// Return the metadata entry for an annotation.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: AnnotationId) -> &'static AnnotationInfo {
    ANNOTATIONS.iter().find(|a| a.id == id).expect("annotation info missing")
}

const fn info(
    id: AnnotationId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
) -> AnnotationInfo {
    LangItemInfo {
        id,
        canonical,
        aliases,
        description,
        stability: Stability::Stable,
    }
}
