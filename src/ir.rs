//! Canonical IR for a fully parsed and resolved Weft program.
//!
//! This is the contract handed to the code-generation collaborator: one deterministic,
//! fully-resolved tree, independent of which surface dialect each file was written in.
//! The [`Program`] is built once per run by the assembler and is immutable thereafter.
//!
//! Statement bodies stay in their canonical raw form ([`crate::ast::Stmt`]) — the front-end
//! canonicalizes their shape but does not lower them further.

use std::fmt;

use weft_core::lang::annotations::AnnotationId;
use weft_core::lang::primitives::PrimitiveKind;

use crate::ast::{HookTrigger, Literal, Spanned, Stmt, TypeForm};
use crate::diagnostics::Diagnostic;

/// Identifies one input file; index into the caller-supplied source list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FileId(pub u32);

impl FileId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Resolved source location attached to every IR node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceSpan {
    pub file: FileId,
    pub start: LineCol,
    pub end: LineCol,
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file {} {}..{}", self.file.0, self.start, self.end)
    }
}

// ============================================================================
// Types
// ============================================================================

/// A fully resolved type. Collection/optionality surface variants all normalize here:
/// `[string]?` is `Optional(Array(Primitive(Str)))` and `[string?]` is
/// `Array(Optional(Primitive(Str)))` — distinct shapes, never equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Primitive(PrimitiveKind),
    User(String),
    Array(Box<TypeRef>),
    Map(Box<TypeRef>, Box<TypeRef>),
    Set(Box<TypeRef>),
    Optional(Box<TypeRef>),
    /// Marker for a declaration whose type could not be resolved; the error is in the
    /// diagnostics list and processing continued.
    Error,
}

impl TypeRef {
    pub const VOID: TypeRef = TypeRef::Primitive(PrimitiveKind::Void);

    /// `true` if this type or any nested type is the error marker.
    pub fn has_error(&self) -> bool {
        match self {
            TypeRef::Error => true,
            TypeRef::Primitive(_) | TypeRef::User(_) => false,
            TypeRef::Array(t) | TypeRef::Set(t) | TypeRef::Optional(t) => t.has_error(),
            TypeRef::Map(k, v) => k.has_error() || v.has_error(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => write!(f, "{}", weft_core::lang::primitives::as_str(*p)),
            TypeRef::User(name) => write!(f, "{name}"),
            TypeRef::Array(t) => write!(f, "[{t}]"),
            TypeRef::Map(k, v) => write!(f, "[{k}: {v}]"),
            TypeRef::Set(t) => write!(f, "Set<{t}>"),
            TypeRef::Optional(t) => write!(f, "{t}?"),
            TypeRef::Error => write!(f, "<error>"),
        }
    }
}

// ============================================================================
// Annotations
// ============================================================================

/// Recognized annotation name or preserved unknown.
///
/// The vocabulary is open-ended by design: unrecognized annotations are carried through as
/// structured data so the IR stays forward-compatible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationName {
    Known(AnnotationId),
    Unknown(String),
}

/// One resolved annotation argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Ident(String),
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Pair { key: String, value: Box<AnnotationValue> },
}

/// An `@Name(...)` marker attached to exactly one declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: AnnotationName,
    pub args: Vec<AnnotationValue>,
    pub span: SourceSpan,
}

impl Annotation {
    pub fn is(&self, id: AnnotationId) -> bool {
        self.name == AnnotationName::Known(id)
    }
}

/// Ordered `=>` intent lines attached to exactly one function, verbatim minus the marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummaryBlock {
    pub lines: Vec<String>,
}

// ============================================================================
// Declarations
// ============================================================================

/// A canonical field/variable declaration: every source mutability spelling collapses to
/// the `mutable` flag, and the type is always resolved (possibly to the error marker).
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub ty: TypeRef,
    pub mutable: bool,
    pub init: Option<Spanned<crate::ast::Expr>>,
    pub annotations: Vec<Annotation>,
    pub span: SourceSpan,
}

/// Payload shape of one enum case; exactly one form per case.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCaseForm {
    Unit,
    Associated(Vec<(String, TypeRef)>),
    Raw(Literal),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumCase {
    pub name: String,
    pub form: EnumCaseForm,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub backing: Option<TypeRef>,
    pub cases: Vec<EnumCase>,
    pub annotations: Vec<Annotation>,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub is_async: bool,
    pub params: Vec<Param>,
    /// `void` when the source omitted a return type.
    pub return_type: TypeRef,
    /// Canonical but otherwise opaque statement block; not lowered by the front-end.
    pub body: Vec<Spanned<Stmt>>,
    pub annotations: Vec<Annotation>,
    pub summary: Option<SummaryBlock>,
    pub span: SourceSpan,
}

impl FunctionDecl {
    /// `true` if this function carries `@Main`.
    pub fn is_entry_point(&self) -> bool {
        self.annotations.iter().any(|a| a.is(AnnotationId::Main))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub form: TypeForm,
    pub fields: Vec<Declaration>,
    pub methods: Vec<FunctionDecl>,
    pub annotations: Vec<Annotation>,
    pub span: SourceSpan,
}

// ============================================================================
// Views
// ============================================================================

/// State-management intent declared on a view field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    State,
    Binding,
    Observed,
    Environment,
}

/// One view field with its (optional) state tag.
#[derive(Debug, Clone, PartialEq)]
pub struct StateField {
    pub decl: Declaration,
    pub state: Option<StateKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleHook {
    pub trigger: HookTrigger,
    pub body: Vec<Spanned<Stmt>>,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewDecl {
    pub name: String,
    pub fields: Vec<StateField>,
    pub hooks: Vec<LifecycleHook>,
    /// Component calls and ordinary statements forming the view body.
    pub body: Vec<Spanned<Stmt>>,
    pub annotations: Vec<Annotation>,
    pub span: SourceSpan,
}

// ============================================================================
// Program
// ============================================================================

/// File-scoped container of declarations plus the names it imports.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub file: FileId,
    /// The caller-supplied file identifier (path or logical name).
    pub name: String,
    pub imports: Vec<String>,
    pub types: Vec<TypeDecl>,
    pub enums: Vec<EnumDecl>,
    pub functions: Vec<FunctionDecl>,
    pub views: Vec<ViewDecl>,
}

/// Free-form directory context document, carried through untouched for the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDoc {
    pub directory: String,
    pub text: String,
}

/// The resolved `@Main` function, if the program declares one.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPoint {
    pub module: FileId,
    pub function: String,
    pub span: SourceSpan,
}

/// IR root: ordered modules, the global (non-fatal) diagnostics list, and the entry point.
///
/// Built once per parse run; downstream consumers never mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub modules: Vec<Module>,
    pub entry_point: Option<EntryPoint>,
    pub index_docs: Vec<IndexDoc>,
    pub diagnostics: Vec<Diagnostic>,
}
