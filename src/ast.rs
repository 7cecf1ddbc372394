//! Raw syntax tree for Weft source.
//!
//! These are the per-construct nodes the parser produces *before* type and annotation
//! resolution. Every accepted surface dialect of a construct parses into the same raw shape;
//! nothing downstream can tell which spelling or scoping style the author used.

use std::fmt;

use weft_core::lang::operators::OperatorId;

/// Source location span (byte offsets into one file's text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A node with its source location.
///
/// ## Notes
/// - Equality compares the node only, never the span. Equivalent blocks written with brace
///   scoping and indentation scoping occupy different byte ranges but must compare equal as
///   trees, so spans are excluded from `PartialEq`.
#[derive(Debug, Clone)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

impl<T: PartialEq> PartialEq for Spanned<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<T: Eq> Eq for Spanned<T> {}

/// Identifier (plain string; interning is not worth it at this scale).
pub type Ident = String;

/// One parsed source file, prior to resolution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawModule {
    pub decls: Vec<Spanned<RawDecl>>,
}

/// Top-level declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDecl {
    Import(ImportDecl),
    Type(RawTypeDecl),
    Enum(RawEnumDecl),
    Function(RawFunctionDecl),
    View(RawViewDecl),
}

/// `import name` or `import pkg.name` — the last segment is the imported name.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub segments: Vec<Ident>,
}

impl ImportDecl {
    /// The name this import brings into scope.
    pub fn imported_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

// ============================================================================
// Annotations (raw)
// ============================================================================

/// `@Name` or `@Name(args)` as written, before name recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAnnotation {
    pub name: Ident,
    pub args: Vec<RawAnnotationArg>,
}

/// One annotation argument: bare identifier, string literal (single-line or triple-quoted),
/// numeric/bool literal, or a `key: value` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum RawAnnotationArg {
    Ident(Ident),
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Pair { key: Ident, value: Box<RawAnnotationArg> },
}

// ============================================================================
// Declarations
// ============================================================================

/// A variable/field binding in any of its surface spellings
/// (`var x: int = 0`, `let y = 1`, `mutable z: [string]`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct BindingDecl {
    pub mutable: bool,
    pub name: Ident,
    pub ty: Option<Spanned<RawType>>,
    pub init: Option<Spanned<Expr>>,
    pub annotations: Vec<Spanned<RawAnnotation>>,
}

/// Which declared-form keyword introduced a type declaration.
///
/// All five forms produce the same canonical type declaration; the tag records the author's
/// declared intent for the generation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeForm {
    Type,
    Class,
    Struct,
    Data,
    Object,
}

impl fmt::Display for TypeForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeForm::Type => "type",
            TypeForm::Class => "class",
            TypeForm::Struct => "struct",
            TypeForm::Data => "data",
            TypeForm::Object => "object",
        };
        write!(f, "{s}")
    }
}

/// `type|class|struct|data|object Name { fields; methods }`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTypeDecl {
    pub form: TypeForm,
    pub name: Ident,
    pub fields: Vec<Spanned<BindingDecl>>,
    pub methods: Vec<Spanned<RawFunctionDecl>>,
    pub annotations: Vec<Spanned<RawAnnotation>>,
}

/// `enum Name [: backing] { cases }`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEnumDecl {
    pub name: Ident,
    pub backing: Option<Spanned<RawType>>,
    pub cases: Vec<Spanned<RawEnumCase>>,
    pub annotations: Vec<Spanned<RawAnnotation>>,
}

/// One enum case. The parser accepts both a payload list and a raw literal value so the
/// assembler can report the mutual-exclusion violation with full context.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEnumCase {
    pub name: Ident,
    pub payload: Vec<(Ident, Spanned<RawType>)>,
    pub raw_value: Option<Spanned<Literal>>,
}

/// A function in any spelling (`func`/`function`/`fn`/`def`), with its leading annotations
/// and optional `=>` summary lines already attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFunctionDecl {
    pub name: Ident,
    pub is_async: bool,
    pub params: Vec<Spanned<RawParam>>,
    /// `None` means the return type was omitted and canonicalizes to `void`.
    pub return_type: Option<Spanned<RawType>>,
    pub body: Vec<Spanned<Stmt>>,
    pub annotations: Vec<Spanned<RawAnnotation>>,
    pub summary: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawParam {
    pub name: Ident,
    pub ty: Spanned<RawType>,
}

// ============================================================================
// Views
// ============================================================================

/// `view Name { state fields; lifecycle hooks; component body }`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawViewDecl {
    pub name: Ident,
    pub fields: Vec<Spanned<BindingDecl>>,
    pub hooks: Vec<Spanned<RawHook>>,
    pub body: Vec<Spanned<Stmt>>,
    pub annotations: Vec<Spanned<RawAnnotation>>,
}

/// A lifecycle hook block inside a view.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHook {
    pub trigger: HookTrigger,
    pub body: Vec<Spanned<Stmt>>,
}

/// What fires a lifecycle hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookTrigger {
    Appear,
    Disappear,
    /// `onChange(field)` — fires when the named state field changes.
    Change(Ident),
}

// ============================================================================
// Types (raw, pre-resolution)
// ============================================================================

/// A type expression as written. Collection syntax variants keep their surface shape here
/// and are normalized by the type resolver.
#[derive(Debug, Clone, PartialEq)]
pub enum RawType {
    /// `int`, `User`, ...
    Named(Ident),
    /// `Array<T>`, `Map<K, V>`, `Set<T>`, or any other generic application.
    Generic(Ident, Vec<Spanned<RawType>>),
    /// `[T]` array sugar.
    ArraySugar(Box<Spanned<RawType>>),
    /// `[K: V]` map sugar.
    MapSugar(Box<Spanned<RawType>>, Box<Spanned<RawType>>),
    /// Trailing `?` — on the element (`[string?]`) or the whole collection (`[string]?`).
    Optional(Box<Spanned<RawType>>),
}

// ============================================================================
// Statements
// ============================================================================

/// Statements inside function/view/hook bodies. Bodies are opaque to resolution but still
/// parse into canonical shapes so both scoping styles yield identical trees.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Binding(BindingDecl),
    Assign {
        target: Spanned<Expr>,
        op: OperatorId,
        value: Spanned<Expr>,
    },
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    /// Canonical conditional dispatch; both `switch` and `match` produce this.
    Match(MatchStmt),
    Return(Option<Spanned<Expr>>),
    Break,
    Continue,
    Expr(Spanned<Expr>),
    /// UI component call: open-vocabulary named parameters plus an optional child block.
    Component(ComponentCall),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub cond: Spanned<Expr>,
    pub then_body: Vec<Spanned<Stmt>>,
    pub elif_branches: Vec<(Spanned<Expr>, Vec<Spanned<Stmt>>)>,
    pub else_body: Option<Vec<Spanned<Stmt>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub cond: Spanned<Expr>,
    pub body: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub var: Ident,
    pub iter: Spanned<Expr>,
    pub body: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchStmt {
    pub scrutinee: Spanned<Expr>,
    pub arms: Vec<Spanned<MatchArm>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm {
    pub pattern: MatchPattern,
    pub body: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchPattern {
    /// `case <expr>:` — compared by the generation collaborator, not here.
    Case(Spanned<Expr>),
    /// `default:` (or `case _:`).
    Default,
}

/// `Name(key: value, ...) { children }` — parameter names are open-vocabulary by design and
/// not validated by the front-end.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentCall {
    pub name: Ident,
    pub args: Vec<ComponentArg>,
    pub children: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentArg {
    /// `None` for positional arguments.
    pub name: Option<Ident>,
    pub value: Spanned<Expr>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    Literal(Literal),
    Binary(Box<Spanned<Expr>>, OperatorId, Box<Spanned<Expr>>),
    Unary(OperatorId, Box<Spanned<Expr>>),
    Call(Box<Spanned<Expr>>, Vec<CallArg>),
    Member(Box<Spanned<Expr>>, Ident),
    Index(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    Await(Box<Spanned<Expr>>),
    Array(Vec<Spanned<Expr>>),
    MapLit(Vec<(Spanned<Expr>, Spanned<Expr>)>),
    Paren(Box<Spanned<Expr>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallArg {
    Positional(Spanned<Expr>),
    /// `name: value`.
    Named(Ident, Spanned<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{v}"),
            Literal::Str(s) => write!(f, "{s:?}"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Null => write!(f, "null"),
        }
    }
}
