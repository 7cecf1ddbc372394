//! IR assembly: raw trees in, canonical program out.
//!
//! The assembler runs single-threaded over all parsed files. It resolves types through
//! the [`ExportTable`], recognizes annotation names, classifies view state fields, and
//! converts byte spans into line/column source spans.
//!
//! Two conditions are fatal and abort the whole run:
//! - more than one `@Main` function in the program
//! - an invalid enum case (duplicate name, or an associated payload combined with a
//!   raw value)

use crate::ast::{
    BindingDecl, RawAnnotation, RawAnnotationArg, RawDecl, RawEnumDecl, RawFunctionDecl, RawModule,
    RawTypeDecl, RawViewDecl, Spanned,
};
use crate::diagnostics::{Diagnostic, FatalError, LineIndex};
use crate::ir::{
    Annotation, AnnotationName, AnnotationValue, Declaration, EntryPoint, EnumCase, EnumCaseForm,
    EnumDecl, FileId, FunctionDecl, LifecycleHook, Module, Param, SourceSpan, StateField, StateKind,
    SummaryBlock, TypeDecl, TypeRef, ViewDecl,
};
use crate::resolve::{ExportTable, Resolver};
use weft_core::lang::annotations::{self, AnnotationId, STATE_ANNOTATIONS};

/// Per-file assembler.
pub struct Assembler<'a> {
    file: FileId,
    line_index: &'a LineIndex,
    exports: &'a ExportTable,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> Assembler<'a> {
    pub fn new(
        file: FileId,
        line_index: &'a LineIndex,
        exports: &'a ExportTable,
        diagnostics: &'a mut Vec<Diagnostic>,
    ) -> Self {
        Self {
            file,
            line_index,
            exports,
            diagnostics,
        }
    }

    /// Assemble one raw module into its canonical form.
    pub fn assemble(&mut self, name: &str, raw: &RawModule) -> Result<Module, FatalError> {
        let mut module = Module {
            file: self.file,
            name: name.to_string(),
            imports: Vec::new(),
            types: Vec::new(),
            enums: Vec::new(),
            functions: Vec::new(),
            views: Vec::new(),
        };

        for decl in &raw.decls {
            match &decl.node {
                RawDecl::Import(i) => module.imports.push(i.segments.join(".")),
                RawDecl::Type(t) => {
                    let assembled = self.type_decl(t, decl.span);
                    module.types.push(assembled);
                }
                RawDecl::Enum(e) => {
                    let assembled = self.enum_decl(e, decl.span)?;
                    module.enums.push(assembled);
                }
                RawDecl::Function(f) => {
                    let assembled = self.function_decl(f, decl.span);
                    module.functions.push(assembled);
                }
                RawDecl::View(v) => {
                    let assembled = self.view_decl(v, decl.span);
                    module.views.push(assembled);
                }
            }
        }

        Ok(module)
    }

    fn span(&self, span: crate::ast::Span) -> SourceSpan {
        self.line_index.source_span(self.file, span)
    }

    fn resolver(&mut self) -> Resolver<'_> {
        Resolver::new(self.file, self.exports, self.diagnostics)
    }

    // ========================================================================
    // Annotations
    // ========================================================================

    /// Recognize annotation names; unknown spellings are preserved, never dropped.
    fn annotations(&mut self, raw: &[Spanned<RawAnnotation>]) -> Vec<Annotation> {
        raw.iter()
            .map(|a| Annotation {
                name: match annotations::from_str(&a.node.name) {
                    Some(id) => AnnotationName::Known(id),
                    None => AnnotationName::Unknown(a.node.name.clone()),
                },
                args: a.node.args.iter().map(annotation_value).collect(),
                span: self.span(a.span),
            })
            .collect()
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn declaration(&mut self, binding: &Spanned<BindingDecl>) -> Declaration {
        let annotations = self.annotations(&binding.node.annotations);
        let ty = self.resolver().resolve_declared(
            binding.node.ty.as_ref(),
            binding.node.init.as_ref(),
            &binding.node.name,
            binding.span,
        );
        Declaration {
            name: binding.node.name.clone(),
            ty,
            mutable: binding.node.mutable,
            init: binding.node.init.clone(),
            annotations,
            span: self.span(binding.span),
        }
    }

    fn type_decl(&mut self, raw: &RawTypeDecl, span: crate::ast::Span) -> TypeDecl {
        let annotations = self.annotations(&raw.annotations);
        let fields = raw.fields.iter().map(|f| self.declaration(f)).collect();
        let methods = raw
            .methods
            .iter()
            .map(|m| self.function_decl(&m.node, m.span))
            .collect();
        TypeDecl {
            name: raw.name.clone(),
            form: raw.form,
            fields,
            methods,
            annotations,
            span: self.span(span),
        }
    }

    fn enum_decl(&mut self, raw: &RawEnumDecl, span: crate::ast::Span) -> Result<EnumDecl, FatalError> {
        let annotations = self.annotations(&raw.annotations);
        let backing = raw.backing.as_ref().map(|b| self.resolver().resolve_type(b));

        let mut cases: Vec<EnumCase> = Vec::new();
        for case in &raw.cases {
            if cases.iter().any(|c| c.name == case.node.name) {
                return Err(FatalError::InvalidEnumCase {
                    enum_name: raw.name.clone(),
                    case: case.node.name.clone(),
                    reason: "case names must be unique within the enum".to_string(),
                    span: self.span(case.span),
                });
            }
            if !case.node.payload.is_empty() && case.node.raw_value.is_some() {
                return Err(FatalError::InvalidEnumCase {
                    enum_name: raw.name.clone(),
                    case: case.node.name.clone(),
                    reason: "a case cannot carry both an associated payload and a raw value"
                        .to_string(),
                    span: self.span(case.span),
                });
            }
            let form = if let Some(value) = &case.node.raw_value {
                EnumCaseForm::Raw(value.node.clone())
            } else if case.node.payload.is_empty() {
                EnumCaseForm::Unit
            } else {
                let fields = case
                    .node
                    .payload
                    .iter()
                    .map(|(name, ty)| (name.clone(), self.resolver().resolve_type(ty)))
                    .collect();
                EnumCaseForm::Associated(fields)
            };
            cases.push(EnumCase {
                name: case.node.name.clone(),
                form,
                span: self.span(case.span),
            });
        }

        Ok(EnumDecl {
            name: raw.name.clone(),
            backing,
            cases,
            annotations,
            span: self.span(span),
        })
    }

    fn function_decl(&mut self, raw: &RawFunctionDecl, span: crate::ast::Span) -> FunctionDecl {
        let annotations = self.annotations(&raw.annotations);
        let params = raw
            .params
            .iter()
            .map(|p| Param {
                name: p.node.name.clone(),
                ty: self.resolver().resolve_type(&p.node.ty),
            })
            .collect();
        let return_type = match &raw.return_type {
            Some(ty) => self.resolver().resolve_type(ty),
            None => TypeRef::VOID,
        };
        let summary = if raw.summary.is_empty() {
            None
        } else {
            Some(SummaryBlock {
                lines: raw.summary.clone(),
            })
        };
        FunctionDecl {
            name: raw.name.clone(),
            is_async: raw.is_async,
            params,
            return_type,
            body: raw.body.clone(),
            annotations,
            summary,
            span: self.span(span),
        }
    }

    // ========================================================================
    // Views
    // ========================================================================

    fn view_decl(&mut self, raw: &RawViewDecl, span: crate::ast::Span) -> ViewDecl {
        let annotations = self.annotations(&raw.annotations);
        let fields = raw.fields.iter().map(|f| self.state_field(f)).collect();
        let hooks = raw
            .hooks
            .iter()
            .map(|h| LifecycleHook {
                trigger: h.node.trigger.clone(),
                body: h.node.body.clone(),
                span: self.span(h.span),
            })
            .collect();
        ViewDecl {
            name: raw.name.clone(),
            fields,
            hooks,
            body: raw.body.clone(),
            annotations,
            span: self.span(span),
        }
    }

    /// Classify a view field's state annotation. At most one of the state annotations
    /// may appear; extra ones are reported and the first wins.
    fn state_field(&mut self, binding: &Spanned<BindingDecl>) -> StateField {
        let decl = self.declaration(binding);
        let mut state = None;
        for annotation in &decl.annotations {
            let AnnotationName::Known(id) = annotation.name else {
                continue;
            };
            if !STATE_ANNOTATIONS.contains(&id) {
                continue;
            }
            let kind = state_kind(id);
            if state.is_some() {
                self.diagnostics.push(
                    Diagnostic::annotation(
                        format!(
                            "field `{}` has more than one state annotation",
                            decl.name
                        ),
                        self.file,
                        binding.span,
                    )
                    .with_hint("keep exactly one of @State, @Binding, @Observed, @Environment"),
                );
            } else {
                state = Some(kind);
            }
        }
        StateField { decl, state }
    }
}

fn state_kind(id: AnnotationId) -> StateKind {
    match id {
        AnnotationId::State => StateKind::State,
        AnnotationId::Binding => StateKind::Binding,
        AnnotationId::Observed => StateKind::Observed,
        AnnotationId::Environment => StateKind::Environment,
        // STATE_ANNOTATIONS contains exactly the four ids above.
        _ => unreachable!("not a state annotation: {id:?}"),
    }
}

fn annotation_value(arg: &RawAnnotationArg) -> AnnotationValue {
    match arg {
        RawAnnotationArg::Ident(name) => AnnotationValue::Ident(name.clone()),
        RawAnnotationArg::Str(s) => AnnotationValue::Str(s.clone()),
        RawAnnotationArg::Int(v) => AnnotationValue::Int(*v),
        RawAnnotationArg::Float(v) => AnnotationValue::Float(*v),
        RawAnnotationArg::Bool(b) => AnnotationValue::Bool(*b),
        RawAnnotationArg::Pair { key, value } => AnnotationValue::Pair {
            key: key.clone(),
            value: Box::new(annotation_value(value)),
        },
    }
}

// ============================================================================
// Program-level checks
// ============================================================================

/// Find the program's entry point: the single function annotated `@Main`.
///
/// Zero entry points is allowed (libraries); two is fatal.
pub fn find_entry_point(modules: &[Module]) -> Result<Option<EntryPoint>, FatalError> {
    let mut found: Option<(FileId, &FunctionDecl)> = None;
    for module in modules {
        let module_functions = module
            .functions
            .iter()
            .chain(module.types.iter().flat_map(|t| t.methods.iter()));
        for function in module_functions {
            if !function.is_entry_point() {
                continue;
            }
            if let Some((_, first)) = found {
                return Err(FatalError::DuplicateEntryPoint {
                    first_name: first.name.clone(),
                    first: first.span,
                    second_name: function.name.clone(),
                    second: function.span,
                });
            }
            found = Some((module.file, function));
        }
    }
    Ok(found.map(|(file, function)| EntryPoint {
        module: file,
        function: function.name.clone(),
        span: function.span,
    }))
}
