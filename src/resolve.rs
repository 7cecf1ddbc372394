//! Type resolution.
//!
//! Normalizes every surface type spelling to a canonical [`TypeRef`] and checks that
//! user-defined names exist somewhere in the program. Resolution is tolerant: an unknown
//! or invalid type becomes [`TypeRef::Error`] plus a diagnostic, and processing
//! continues.
//!
//! Name lookup is program-wide via the [`ExportTable`], built from every file's
//! declarations before any single file is resolved — declaration order across files
//! never matters.

use std::collections::HashMap;

use crate::ast::{Expr, Literal, RawDecl, RawModule, RawType, Spanned};
use crate::diagnostics::Diagnostic;
use crate::ir::{FileId, TypeRef};
use weft_core::lang::primitives::{self, CollectionKind};

/// Program-wide table of declared type names (types, enums, and views of every file).
#[derive(Debug, Default)]
pub struct ExportTable {
    names: HashMap<String, FileId>,
}

impl ExportTable {
    /// Collect every declared type-like name across all parsed modules.
    pub fn build(modules: &[(FileId, RawModule)]) -> Self {
        let mut names = HashMap::new();
        for (file, module) in modules {
            for decl in &module.decls {
                let name = match &decl.node {
                    RawDecl::Type(t) => Some(&t.name),
                    RawDecl::Enum(e) => Some(&e.name),
                    RawDecl::View(v) => Some(&v.name),
                    RawDecl::Import(_) | RawDecl::Function(_) => None,
                };
                if let Some(name) = name {
                    // First declaration wins; duplicates surface during assembly.
                    names.entry(name.clone()).or_insert(*file);
                }
            }
        }
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn defining_file(&self, name: &str) -> Option<FileId> {
        self.names.get(name).copied()
    }
}

/// Per-file type resolver. Appends to the shared diagnostics list.
pub struct Resolver<'a> {
    file: FileId,
    exports: &'a ExportTable,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> Resolver<'a> {
    pub fn new(file: FileId, exports: &'a ExportTable, diagnostics: &'a mut Vec<Diagnostic>) -> Self {
        Self {
            file,
            exports,
            diagnostics,
        }
    }

    /// Resolve a surface type to its canonical form.
    pub fn resolve_type(&mut self, ty: &Spanned<RawType>) -> TypeRef {
        match &ty.node {
            RawType::Named(name) => self.resolve_named(name, ty),
            RawType::Generic(name, args) => self.resolve_generic(name, args, ty),
            RawType::ArraySugar(elem) => TypeRef::Array(Box::new(self.resolve_type(elem))),
            RawType::MapSugar(key, value) => TypeRef::Map(
                Box::new(self.resolve_type(key)),
                Box::new(self.resolve_type(value)),
            ),
            RawType::Optional(inner) => TypeRef::Optional(Box::new(self.resolve_type(inner))),
        }
    }

    fn resolve_named(&mut self, name: &str, ty: &Spanned<RawType>) -> TypeRef {
        if primitives::is_any(name) {
            self.diagnostics.push(
                Diagnostic::type_resolution(
                    "`any` is not a valid type",
                    self.file,
                    ty.span,
                )
                .with_hint("declare a concrete type; the generation target needs one"),
            );
            return TypeRef::Error;
        }
        if let Some(kind) = primitives::from_str(name) {
            return TypeRef::Primitive(kind);
        }
        if self.exports.contains(name) {
            return TypeRef::User(name.to_string());
        }
        // Collection names without arguments are a distinct mistake worth naming.
        if primitives::collection_from_str(name).is_some() {
            self.diagnostics.push(
                Diagnostic::type_resolution(
                    format!("collection type `{name}` needs element types"),
                    self.file,
                    ty.span,
                )
                .with_hint(format!("write `{name}<...>` or use `[...]` sugar")),
            );
            return TypeRef::Error;
        }
        self.diagnostics.push(
            Diagnostic::type_resolution(
                format!("unknown type `{name}`"),
                self.file,
                ty.span,
            )
            .with_note("types must be declared in this file or another file of the program"),
        );
        TypeRef::Error
    }

    fn resolve_generic(&mut self, name: &str, args: &[Spanned<RawType>], ty: &Spanned<RawType>) -> TypeRef {
        let Some(kind) = primitives::collection_from_str(name) else {
            self.diagnostics.push(
                Diagnostic::type_resolution(
                    format!("`{name}` does not take type arguments"),
                    self.file,
                    ty.span,
                )
                .with_note("only Array/List, Map/Dict, and Set are generic"),
            );
            return TypeRef::Error;
        };
        let arity = primitives::collection_arity(kind);
        if args.len() != arity {
            self.diagnostics.push(Diagnostic::type_resolution(
                format!(
                    "`{name}` takes {arity} type argument{}, found {}",
                    if arity == 1 { "" } else { "s" },
                    args.len()
                ),
                self.file,
                ty.span,
            ));
            return TypeRef::Error;
        }
        let mut resolved = args.iter().map(|a| self.resolve_type(a));
        match kind {
            CollectionKind::Array => TypeRef::Array(Box::new(resolved.next().unwrap_or(TypeRef::Error))),
            CollectionKind::Set => TypeRef::Set(Box::new(resolved.next().unwrap_or(TypeRef::Error))),
            CollectionKind::Map => {
                let key = resolved.next().unwrap_or(TypeRef::Error);
                let value = resolved.next().unwrap_or(TypeRef::Error);
                TypeRef::Map(Box::new(key), Box::new(value))
            }
        }
    }

    /// Resolve a declaration's type: the written type wins; otherwise infer from the
    /// initializer literal; otherwise report and mark.
    pub fn resolve_declared(
        &mut self,
        written: Option<&Spanned<RawType>>,
        init: Option<&Spanned<Expr>>,
        name: &str,
        span: crate::ast::Span,
    ) -> TypeRef {
        if let Some(ty) = written {
            return self.resolve_type(ty);
        }
        if let Some(ty) = init.and_then(|e| infer_from_literal(&e.node)) {
            return ty;
        }
        self.diagnostics.push(
            Diagnostic::type_resolution(
                format!("cannot determine the type of `{name}`"),
                self.file,
                span,
            )
            .with_hint("write an explicit type, or initialize with a literal"),
        );
        TypeRef::Error
    }
}

/// Infer a canonical type from a literal initializer, when the shape is unambiguous.
fn infer_from_literal(expr: &Expr) -> Option<TypeRef> {
    use weft_core::lang::primitives::PrimitiveKind;
    match expr {
        Expr::Literal(Literal::Int(_)) => Some(TypeRef::Primitive(PrimitiveKind::Int)),
        Expr::Literal(Literal::Float(_)) => Some(TypeRef::Primitive(PrimitiveKind::Float)),
        Expr::Literal(Literal::Str(_)) => Some(TypeRef::Primitive(PrimitiveKind::Str)),
        Expr::Literal(Literal::Bool(_)) => Some(TypeRef::Primitive(PrimitiveKind::Bool)),
        // `null` alone says nothing about the element type.
        Expr::Literal(Literal::Null) => None,
        Expr::Paren(inner) => infer_from_literal(&inner.node),
        Expr::Unary(_, operand) => infer_from_literal(&operand.node),
        Expr::Array(items) => {
            let elem = infer_from_literal(&items.first()?.node)?;
            Some(TypeRef::Array(Box::new(elem)))
        }
        Expr::MapLit(entries) => {
            let (k, v) = entries.first()?;
            let key = infer_from_literal(&k.node)?;
            let value = infer_from_literal(&v.node)?;
            Some(TypeRef::Map(Box::new(key), Box::new(value)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;
    use crate::lexer;
    use crate::parser;
    use weft_core::lang::primitives::PrimitiveKind;

    fn module_of(source: &str) -> RawModule {
        let tokens = lexer::lex(FileId(0), source).expect("lex");
        let (module, diagnostics) = parser::parse(FileId(0), &tokens);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        module
    }

    fn resolve_one(source_ty: &str) -> (TypeRef, Vec<Diagnostic>) {
        let source = format!("type Holder:\n    x: {source_ty}\ntype User:\n    id: int\n");
        let module = module_of(&source);
        let exports = ExportTable::build(std::slice::from_ref(&(FileId(0), module.clone())));
        let mut diagnostics = Vec::new();
        let mut resolver = Resolver::new(FileId(0), &exports, &mut diagnostics);
        let RawDecl::Type(holder) = &module.decls[0].node else {
            panic!("expected type");
        };
        let ty = resolver.resolve_type(holder.fields[0].node.ty.as_ref().expect("written type"));
        (ty, diagnostics)
    }

    #[test]
    fn primitives_resolve_through_aliases() {
        for (spelling, kind) in [
            ("int", PrimitiveKind::Int),
            ("Integer", PrimitiveKind::Int),
            ("double", PrimitiveKind::Float),
            ("str", PrimitiveKind::Str),
            ("Boolean", PrimitiveKind::Bool),
        ] {
            let (ty, diags) = resolve_one(spelling);
            assert!(diags.is_empty());
            assert_eq!(ty, TypeRef::Primitive(kind), "spelling {spelling:?}");
        }
    }

    #[test]
    fn collection_surfaces_normalize_to_one_shape() {
        let (sugar, _) = resolve_one("[int]");
        let (generic, _) = resolve_one("Array<int>");
        let (list, _) = resolve_one("List<int>");
        assert_eq!(sugar, generic);
        assert_eq!(sugar, list);

        let (map_sugar, _) = resolve_one("[string: int]");
        let (map_generic, _) = resolve_one("Map<string, int>");
        let (dict, _) = resolve_one("Dict<string, int>");
        assert_eq!(map_sugar, map_generic);
        assert_eq!(map_sugar, dict);
    }

    #[test]
    fn optional_placement_is_preserved() {
        let (outer, _) = resolve_one("[string]?");
        let (inner, _) = resolve_one("[string?]");
        assert_ne!(outer, inner);
        assert!(matches!(outer, TypeRef::Optional(_)));
        assert!(matches!(inner, TypeRef::Array(ref e) if matches!(**e, TypeRef::Optional(_))));
    }

    #[test]
    fn any_is_rejected_everywhere() {
        for spelling in ["any", "Any", "[any]", "Map<string, any>", "any?"] {
            let (ty, diags) = resolve_one(spelling);
            assert!(
                diags.iter().any(|d| d.message.contains("`any`")),
                "no `any` diagnostic for {spelling:?}"
            );
            assert!(ty.has_error(), "{spelling:?} resolved to {ty:?}");
        }
    }

    #[test]
    fn unknown_type_is_error_marker_not_abort() {
        let (ty, diags) = resolve_one("Missing");
        assert_eq!(ty, TypeRef::Error);
        assert!(diags[0].message.contains("unknown type `Missing`"));
    }

    #[test]
    fn user_types_resolve_across_files() {
        let a = module_of("type Account:\n    id: int\n");
        let b = module_of("type Ledger:\n    owner: Account\n");
        let modules = vec![(FileId(0), a), (FileId(1), b.clone())];
        let exports = ExportTable::build(&modules);
        assert_eq!(exports.defining_file("Account"), Some(FileId(0)));

        let mut diagnostics = Vec::new();
        let mut resolver = Resolver::new(FileId(1), &exports, &mut diagnostics);
        let RawDecl::Type(ledger) = &b.decls[0].node else {
            panic!("expected type");
        };
        let ty = resolver.resolve_type(ledger.fields[0].node.ty.as_ref().expect("written type"));
        assert_eq!(ty, TypeRef::User("Account".to_string()));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn wrong_collection_arity_is_reported() {
        let (ty, diags) = resolve_one("Map<int>");
        assert_eq!(ty, TypeRef::Error);
        assert!(diags[0].message.contains("takes 2 type arguments"));
    }

    #[test]
    fn literal_inference_covers_scalars_and_collections() {
        assert_eq!(
            infer_from_literal(&Expr::Literal(Literal::Int(3))),
            Some(TypeRef::Primitive(PrimitiveKind::Int))
        );
        let arr = Expr::Array(vec![Spanned::new(
            Expr::Literal(Literal::Str("a".into())),
            Span::default(),
        )]);
        assert_eq!(
            infer_from_literal(&arr),
            Some(TypeRef::Array(Box::new(TypeRef::Primitive(PrimitiveKind::Str))))
        );
        assert_eq!(infer_from_literal(&Expr::Literal(Literal::Null)), None);
    }
}
