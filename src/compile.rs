//! Two-pass compilation pipeline.
//!
//! Pass 1 (scatter): every source file is lexed and parsed independently, in parallel.
//! Pass 2 (gather): the export table is built from all raw modules, then each module is
//! resolved and assembled in input order, single-threaded, so the output is
//! deterministic regardless of how pass 1 was scheduled.
//!
//! A lex failure in any file aborts the run at the barrier: no program is produced,
//! though the full diagnostics list (including every other file's) is still returned.
//! Parse-level problems never remove a file: the tolerant parser always yields a module.
//!
//! Cancellation is cooperative: the flag is checked between files, a cancelled run
//! returns whatever diagnostics were gathered and no program.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::assemble::{Assembler, find_entry_point};
use crate::ast::RawModule;
use crate::diagnostics::{Diagnostic, FatalError, LineIndex};
use crate::ir::{FileId, IndexDoc, Program};
use crate::lexer;
use crate::parser;
use crate::resolve::ExportTable;

/// One input file: a logical name (usually the path) and its text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Shared cancellation flag; cloneable across threads.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of one compilation run.
///
/// `program` is `Some` unless the run was cancelled or hit a fatal error. The
/// diagnostics list is always complete for the work that was done, and is carried
/// inside the program too when one exists.
#[derive(Debug)]
pub struct CompileOutcome {
    pub program: Option<Program>,
    pub fatal: Option<FatalError>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutcome {
    fn without_program(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            program: None,
            fatal: None,
            diagnostics,
        }
    }

    fn fatal(error: FatalError, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            program: None,
            fatal: Some(error),
            diagnostics,
        }
    }
}

/// Per-file result of the parallel pass.
struct ParsedFile {
    file: FileId,
    name: String,
    line_index: LineIndex,
    /// `None` when lexing failed; the file contributes no module.
    module: Option<RawModule>,
    diagnostics: Vec<Diagnostic>,
}

/// Compile a set of source files into one canonical program.
pub fn compile(sources: &[SourceFile], index_docs: Vec<IndexDoc>) -> CompileOutcome {
    compile_with_cancel(sources, index_docs, &CancelFlag::new())
}

/// [`compile`] with a cooperative cancellation flag.
#[tracing::instrument(skip_all, fields(files = sources.len()))]
pub fn compile_with_cancel(
    sources: &[SourceFile],
    index_docs: Vec<IndexDoc>,
    cancel: &CancelFlag,
) -> CompileOutcome {
    // Pass 1: lex + parse every file independently.
    let mut parsed: Vec<ParsedFile> = sources
        .par_iter()
        .enumerate()
        .map(|(i, source)| {
            if cancel.is_cancelled() {
                return ParsedFile {
                    file: FileId(i as u32),
                    name: source.name.clone(),
                    line_index: LineIndex::new(""),
                    module: None,
                    diagnostics: Vec::new(),
                };
            }
            parse_file(FileId(i as u32), source)
        })
        .collect();

    if cancel.is_cancelled() {
        info!("compilation cancelled during parse pass");
        return CompileOutcome::without_program(drain_diagnostics(&mut parsed));
    }

    // A lex failure anywhere makes the run program-less; assembly is all-or-nothing.
    if parsed.iter().any(|p| p.module.is_none()) {
        info!("aborting at the barrier: at least one file failed to tokenize");
        return CompileOutcome::without_program(drain_diagnostics(&mut parsed));
    }

    // Pass 2: program-wide name table, then deterministic per-file assembly.
    let raw_modules: Vec<(FileId, RawModule)> = parsed
        .iter()
        .filter_map(|p| p.module.as_ref().map(|m| (p.file, m.clone())))
        .collect();
    let exports = ExportTable::build(&raw_modules);

    let mut diagnostics = drain_diagnostics(&mut parsed);
    let mut modules = Vec::new();

    for p in &parsed {
        if cancel.is_cancelled() {
            info!("compilation cancelled during assembly pass");
            return CompileOutcome::without_program(diagnostics);
        }
        let Some(raw) = &p.module else {
            continue;
        };
        let mut assembler = Assembler::new(p.file, &p.line_index, &exports, &mut diagnostics);
        match assembler.assemble(&p.name, raw) {
            Ok(module) => modules.push(module),
            Err(fatal) => return CompileOutcome::fatal(fatal, diagnostics),
        }
    }

    let entry_point = match find_entry_point(&modules) {
        Ok(ep) => ep,
        Err(fatal) => return CompileOutcome::fatal(fatal, diagnostics),
    };

    info!(
        modules = modules.len(),
        diagnostics = diagnostics.len(),
        "assembled program"
    );

    CompileOutcome {
        program: Some(Program {
            modules,
            entry_point,
            index_docs,
            diagnostics: diagnostics.clone(),
        }),
        fatal: None,
        diagnostics,
    }
}

fn parse_file(file: FileId, source: &SourceFile) -> ParsedFile {
    let line_index = LineIndex::new(&source.text);
    match lexer::lex(file, &source.text) {
        Ok(tokens) => {
            let (module, diagnostics) = parser::parse(file, &tokens);
            ParsedFile {
                file,
                name: source.name.clone(),
                line_index,
                module: Some(module),
                diagnostics,
            }
        }
        Err(diagnostics) => {
            debug!(file = %source.name, errors = diagnostics.len(), "lexing failed");
            ParsedFile {
                file,
                name: source.name.clone(),
                line_index,
                module: None,
                diagnostics,
            }
        }
    }
}

/// Collect per-file diagnostics into one list, in file order.
fn drain_diagnostics(parsed: &mut [ParsedFile]) -> Vec<Diagnostic> {
    let mut all = Vec::new();
    for p in parsed.iter_mut() {
        all.append(&mut p.diagnostics);
    }
    all
}
