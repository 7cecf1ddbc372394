//! Reserved keyword vocabulary for Weft.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) recording the canonical
//! spelling and every accepted alias. The notation admits many spellings for one concept;
//! the alias table is how they all collapse to one token kind before the parser runs.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `else if` is two tokens (`Else`, `If`); only the single-word `elif` is an alias here.
//! - The word operators `and`/`or`/`not` and the null spellings `null`/`nil`/`none` are
//!   reserved words too, but the lexer re-maps them to operator / null-literal token kinds.
//!
//! ## Examples
//! ```rust
//! use weft_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("var"), Some(KeywordId::Mut));
//! assert_eq!(keywords::from_str("mutable"), Some(KeywordId::Mut)); // alias
//! assert_eq!(keywords::as_str(KeywordId::Mut), "var");
//! ```

use super::registry::Stability;

/// Stable identifier for every reserved keyword.
///
/// ## Notes
/// - The canonical spelling is accessible via [`as_str`]; aliases via [`aliases`].
/// - `Mut`/`Immut` each cover several mutability spellings; `Func` covers all four
///   function-introducer spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Bindings
    Mut,
    Immut,

    // Definitions / declarations
    Func,
    Async,
    Await,
    Enum,
    View,
    Import,

    // Declared-form keywords (all produce a type declaration; the form is recorded)
    Type,
    Class,
    Struct,
    Data,
    Object,

    // Control flow
    If,
    Else,
    Elif,
    Match,
    Case,
    Default,
    For,
    While,
    In,
    Return,
    Break,
    Continue,

    // Literals
    True,
    False,
    Null,

    // Word operators
    And,
    Or,
    Not,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Binding,
    Definition,
    ControlFlow,
    Literal,
    Operator,
}

/// Metadata for a keyword.
///
/// ## Notes
/// - `canonical` is the preferred spelling for docs and diagnostics.
/// - `aliases` are additional spellings accepted by the front-end; they collapse to the
///   same token kind at lexing.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub category: KeywordCategory,
    pub stability: Stability,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Bindings
    info(KeywordId::Mut, "var", &["mut", "mutable"], KeywordCategory::Binding),
    info(
        KeywordId::Immut,
        "let",
        &["const", "val", "final"],
        KeywordCategory::Binding,
    ),
    // Definitions
    info(
        KeywordId::Func,
        "func",
        &["function", "fn", "def"],
        KeywordCategory::Definition,
    ),
    info(KeywordId::Async, "async", &[], KeywordCategory::Definition),
    info(KeywordId::Await, "await", &[], KeywordCategory::Definition),
    info(KeywordId::Enum, "enum", &[], KeywordCategory::Definition),
    info(KeywordId::View, "view", &[], KeywordCategory::Definition),
    info(KeywordId::Import, "import", &[], KeywordCategory::Definition),
    // Declared-form keywords
    info(KeywordId::Type, "type", &[], KeywordCategory::Definition),
    info(KeywordId::Class, "class", &[], KeywordCategory::Definition),
    info(KeywordId::Struct, "struct", &[], KeywordCategory::Definition),
    info(KeywordId::Data, "data", &[], KeywordCategory::Definition),
    info(KeywordId::Object, "object", &[], KeywordCategory::Definition),
    // Control flow
    info(KeywordId::If, "if", &[], KeywordCategory::ControlFlow),
    info(KeywordId::Else, "else", &[], KeywordCategory::ControlFlow),
    info(KeywordId::Elif, "elif", &[], KeywordCategory::ControlFlow),
    info(KeywordId::Match, "match", &["switch"], KeywordCategory::ControlFlow),
    info(KeywordId::Case, "case", &[], KeywordCategory::ControlFlow),
    info(KeywordId::Default, "default", &[], KeywordCategory::ControlFlow),
    info(KeywordId::For, "for", &[], KeywordCategory::ControlFlow),
    info(KeywordId::While, "while", &[], KeywordCategory::ControlFlow),
    info(KeywordId::In, "in", &[], KeywordCategory::ControlFlow),
    info(KeywordId::Return, "return", &[], KeywordCategory::ControlFlow),
    info(KeywordId::Break, "break", &[], KeywordCategory::ControlFlow),
    info(KeywordId::Continue, "continue", &[], KeywordCategory::ControlFlow),
    // Literals
    info(KeywordId::True, "true", &[], KeywordCategory::Literal),
    info(KeywordId::False, "false", &[], KeywordCategory::Literal),
    info(KeywordId::Null, "null", &["nil", "none"], KeywordCategory::Literal),
    // Word operators
    info(KeywordId::And, "and", &[], KeywordCategory::Operator),
    info(KeywordId::Or, "or", &[], KeywordCategory::Operator),
    info(KeywordId::Not, "not", &[], KeywordCategory::Operator),
];

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Return the accepted alias spellings for a keyword.
pub fn aliases(id: KeywordId) -> &'static [&'static str] {
    info_for(id).aliases
}

/// Return the category for a keyword.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return the full metadata entry for a keyword.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Resolve a spelling (canonical or alias) to a keyword id.
///
/// ## Notes
/// - Matching is **case-sensitive**.
pub fn from_str(s: &str) -> Option<KeywordId> {
    if let Some(k) = KEYWORDS.iter().find(|k| k.canonical == s) {
        return Some(k.id);
    }
    KEYWORDS
        .iter()
        .find(|k| {
            let aliases: &[&str] = k.aliases;
            aliases.contains(&s)
        })
        .map(|k| k.id)
}

const fn info(
    id: KeywordId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    category: KeywordCategory,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        aliases,
        category,
        stability: Stability::Stable,
    }
}
