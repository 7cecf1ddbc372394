//! Operator vocabulary with precedence and fixity metadata.
//!
//! Weft accepts symbolic and word spellings for the boolean operators (`&&`/`and`,
//! `||`/`or`, `!`/`not`). Both spellings collapse to one [`OperatorId`] at lexing, so the
//! parser's precedence climbing never branches on spelling.
//!
//! ## Notes
//! - Word spellings are lexed as reserved words first and re-mapped to operator tokens;
//!   they are flagged here with `is_keyword_spelling`.
//! - Precedence values are relative only; higher binds tighter.

use super::registry::Stability;

/// Stable identifier for operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Boolean (symbolic + word spellings)
    And,
    Or,
    Not,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,

    // Ranges
    DotDot,
    DotDotEq,
}

/// Associativity for infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Fixity of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    /// All accepted spellings; the first is canonical.
    pub spellings: &'static [&'static str],
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
    /// `true` if at least one spelling is a reserved word rather than symbols.
    pub is_keyword_spelling: bool,
    pub stability: Stability,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Plus, &["+"], 60, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Minus, &["-"], 60, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Star, &["*"], 70, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Slash, &["/"], 70, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Percent, &["%"], 70, Associativity::Left, Fixity::Infix, false),
    // Comparison
    op(OperatorId::EqEq, &["=="], 40, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::NotEq, &["!="], 40, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Lt, &["<"], 40, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::LtEq, &["<="], 40, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Gt, &[">"], 40, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::GtEq, &[">="], 40, Associativity::Left, Fixity::Infix, false),
    // Boolean: symbolic and word spellings collapse to one id each
    op(OperatorId::And, &["&&", "and"], 30, Associativity::Left, Fixity::Infix, true),
    op(OperatorId::Or, &["||", "or"], 25, Associativity::Left, Fixity::Infix, true),
    op(OperatorId::Not, &["!", "not"], 50, Associativity::Left, Fixity::Prefix, true),
    // Assignment
    op(OperatorId::Eq, &["="], 10, Associativity::Right, Fixity::Infix, false),
    op(OperatorId::PlusEq, &["+="], 10, Associativity::Right, Fixity::Infix, false),
    op(OperatorId::MinusEq, &["-="], 10, Associativity::Right, Fixity::Infix, false),
    op(OperatorId::StarEq, &["*="], 10, Associativity::Right, Fixity::Infix, false),
    op(OperatorId::SlashEq, &["/="], 10, Associativity::Right, Fixity::Infix, false),
    // Ranges
    op(OperatorId::DotDot, &[".."], 35, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::DotDotEq, &["..="], 35, Associativity::Left, Fixity::Infix, false),
];

/// Return the canonical spelling for an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spellings[0]
}

/// Return the precedence for an operator (higher binds tighter).
pub fn precedence(id: OperatorId) -> u8 {
    info_for(id).precedence
}

/// Return the associativity for an operator.
pub fn associativity(id: OperatorId) -> Associativity {
    info_for(id).associativity
}

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Resolve a spelling (symbolic or word) to an operator id.
pub fn from_str(s: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| {
            let spellings: &[&str] = o.spellings;
            spellings.contains(&s)
        })
        .map(|o| o.id)
}

const fn op(
    id: OperatorId,
    spellings: &'static [&'static str],
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
    is_keyword_spelling: bool,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spellings,
        precedence,
        associativity,
        fixity,
        is_keyword_spelling,
        stability: Stability::Stable,
    }
}
