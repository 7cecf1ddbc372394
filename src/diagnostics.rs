//! Diagnostics for the Weft front-end.
//!
//! The front-end is tolerant: almost every problem becomes a [`Diagnostic`] in the global
//! list while processing continues. Only the two conditions in [`FatalError`] abort a run
//! without producing a program.
//!
//! [`LineIndex`] converts byte offsets into 1-based line/column positions once per file;
//! [`render_report`] turns a diagnostic into a `miette` report with a labeled source snippet.

use std::fmt;

use miette::NamedSource;
use thiserror::Error;

use crate::ast::Span;
use crate::ir::{FileId, LineCol, SourceSpan};

/// Category of a recoverable diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Unterminated string, stray character, inconsistent indentation.
    Lex,
    /// Construct the parser could not recognize; recovery resynchronized past it.
    Parse,
    /// Scoping-style violation inside a block (mixed brace and indentation scoping).
    Scope,
    /// Malformed annotation or conflicting annotation set.
    Annotation,
    /// Unknown or invalid type reference.
    TypeResolution,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticKind::Lex => "lex error",
            DiagnosticKind::Parse => "parse error",
            DiagnosticKind::Scope => "scope error",
            DiagnosticKind::Annotation => "annotation error",
            DiagnosticKind::TypeResolution => "type error",
        };
        write!(f, "{s}")
    }
}

/// One recoverable problem, tied to a file and byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub file: FileId,
    pub span: Span,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, file: FileId, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            file,
            span,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn lex(message: impl Into<String>, file: FileId, span: Span) -> Self {
        Self::new(DiagnosticKind::Lex, message, file, span)
    }

    pub fn parse(message: impl Into<String>, file: FileId, span: Span) -> Self {
        Self::new(DiagnosticKind::Parse, message, file, span)
    }

    pub fn scope(message: impl Into<String>, file: FileId, span: Span) -> Self {
        Self::new(DiagnosticKind::Scope, message, file, span)
    }

    pub fn annotation(message: impl Into<String>, file: FileId, span: Span) -> Self {
        Self::new(DiagnosticKind::Annotation, message, file, span)
    }

    pub fn type_resolution(message: impl Into<String>, file: FileId, span: Span) -> Self {
        Self::new(DiagnosticKind::TypeResolution, message, file, span)
    }

    /// Attach an explanatory note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Attach a suggestion.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Conditions that abort a run entirely; no [`crate::ir::Program`] is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FatalError {
    #[error("duplicate @Main entry point: `{second_name}` at {second} conflicts with `{first_name}` at {first}")]
    DuplicateEntryPoint {
        first_name: String,
        first: SourceSpan,
        second_name: String,
        second: SourceSpan,
    },

    #[error("invalid case `{case}` in enum `{enum_name}`: {reason}")]
    InvalidEnumCase {
        enum_name: String,
        case: String,
        reason: String,
        span: SourceSpan,
    },
}

// ============================================================================
// Line index
// ============================================================================

/// Byte-offset to line/column lookup for one source file.
///
/// Built once per file; lookups binary-search the newline table.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the start of each line; `line_starts[0] == 0` always.
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// 1-based line/column for a byte offset. Offsets past the end clamp to the last line.
    pub fn line_col(&self, offset: usize) -> LineCol {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        LineCol {
            line: line as u32 + 1,
            col: (offset - self.line_starts[line]) as u32 + 1,
        }
    }

    /// Resolve a byte span into a line/column source span.
    pub fn source_span(&self, file: FileId, span: Span) -> SourceSpan {
        SourceSpan {
            file,
            start: self.line_col(span.start),
            end: self.line_col(span.end),
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// A diagnostic packaged with its source text for terminal rendering.
#[derive(Debug, Error, miette::Diagnostic)]
#[error("{message}")]
pub struct Report {
    message: String,

    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    at: miette::SourceSpan,
    label: String,

    #[help]
    help: Option<String>,
}

/// Package a diagnostic into a [`Report`] against the file it points into.
pub fn render_report(diag: &Diagnostic, file_name: &str, source: &str) -> Report {
    let len = diag.span.end.saturating_sub(diag.span.start).max(1);
    let mut help = diag.hints.clone();
    help.extend(diag.notes.iter().cloned());
    Report {
        message: diag.message.clone(),
        src: NamedSource::new(file_name, source.to_owned()),
        at: miette::SourceSpan::new(diag.span.start.into(), len),
        label: diag.kind.to_string(),
        help: if help.is_empty() { None } else { Some(help.join("\n")) },
    }
}
