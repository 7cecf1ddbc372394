//! Property-based tests for dialect tolerance.
//!
//! The core promise of the front-end is that every accepted spelling of a construct
//! produces the same canonical tree. Hand-written tests cover the interesting corners;
//! these properties check the promise across many generated inputs.

use proptest::prelude::*;
use weft::ast::{Spanned, Stmt};
use weft::compile::{SourceFile, compile};
use weft::ir::TypeRef;
use weft_core::lang::keywords;

/// Compile one source and project its functions span-free.
fn function_shapes(source: &str) -> Vec<(String, Vec<TypeRef>, TypeRef, Vec<Spanned<Stmt>>)> {
    let outcome = compile(&[SourceFile::new("gen.weft", source)], Vec::new());
    let program = outcome.program.unwrap_or_else(|| panic!("fatal for {source:?}"));
    assert!(
        program.diagnostics.is_empty(),
        "diagnostics for {source:?}: {:?}",
        program.diagnostics
    );
    program.modules[0]
        .functions
        .iter()
        .map(|f| {
            (
                f.name.clone(),
                f.params.iter().map(|p| p.ty.clone()).collect(),
                f.return_type.clone(),
                f.body.clone(),
            )
        })
        .collect()
}

/// Identifiers that collide with no reserved word, checked against the vocabulary
/// registry rather than a hand-kept list.
fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}".prop_filter("not a reserved word", |s| keywords::from_str(s).is_none())
}

proptest! {
    /// Brace and indentation scoping of the same function yield the same tree.
    #[test]
    fn scoping_styles_are_equivalent(
        name in ident_strategy(),
        param in ident_strategy(),
        offset in -1000i64..1000,
    ) {
        prop_assume!(name != param);
        let braces = format!(
            "func {name}({param}: int) -> int {{\n    return {param} + {offset}\n}}\n"
        );
        let indent = format!(
            "func {name}({param}: int) -> int:\n    return {param} + {offset}\n"
        );
        prop_assert_eq!(function_shapes(&braces), function_shapes(&indent));
    }

    /// Every spelling of the function keyword parses to the same declaration.
    #[test]
    fn function_keyword_aliases_are_equivalent(
        name in ident_strategy(),
        spelling in prop_oneof![
            Just("func"),
            Just("function"),
            Just("fn"),
            Just("def"),
        ],
    ) {
        let canonical = format!("func {name}():\n    return\n");
        let aliased = format!("{spelling} {name}():\n    return\n");
        prop_assert_eq!(function_shapes(&canonical), function_shapes(&aliased));
    }

    /// Word and symbol boolean operators compile to the same expression tree.
    #[test]
    fn word_and_symbol_operators_are_equivalent(
        a in -100i64..100,
        b in -100i64..100,
    ) {
        let words = format!(
            "func f(x: int) -> bool:\n    return x > {a} and x < {b} or not (x == 0)\n"
        );
        let symbols = format!(
            "func f(x: int) -> bool:\n    return x > {a} && x < {b} || !(x == 0)\n"
        );
        prop_assert_eq!(function_shapes(&words), function_shapes(&symbols));
    }

    /// Every mutability spelling collapses to the same canonical binding.
    #[test]
    fn mutability_spellings_are_equivalent(
        name in ident_strategy(),
        value in -1000i64..1000,
        mutable_kw in prop_oneof![Just("var"), Just("mut"), Just("mutable")],
        immutable_kw in prop_oneof![Just("let"), Just("const"), Just("val"), Just("final")],
    ) {
        let canonical_mut = format!("func f():\n    var {name} = {value}\n");
        let aliased_mut = format!("func f():\n    {mutable_kw} {name} = {value}\n");
        prop_assert_eq!(function_shapes(&canonical_mut), function_shapes(&aliased_mut));

        let canonical_immut = format!("func f():\n    let {name} = {value}\n");
        let aliased_immut = format!("func f():\n    {immutable_kw} {name} = {value}\n");
        prop_assert_eq!(function_shapes(&canonical_immut), function_shapes(&aliased_immut));

        // The two families stay distinct.
        prop_assert_ne!(function_shapes(&canonical_mut), function_shapes(&canonical_immut));
    }

    /// All null spellings produce one literal.
    #[test]
    fn null_spellings_are_equivalent(
        name in ident_strategy(),
        spelling in prop_oneof![Just("null"), Just("nil"), Just("none")],
    ) {
        let canonical = format!("func f():\n    {name} = null\n");
        let aliased = format!("func f():\n    {name} = {spelling}\n");
        prop_assert_eq!(function_shapes(&canonical), function_shapes(&aliased));
    }

    /// Compilation of a well-formed generated module is total: some program always
    /// comes out, whatever the mix of declarations.
    #[test]
    fn wellformed_modules_always_compile(
        type_name in "[A-Z][a-z]{1,6}".prop_filter("not a builtin type name", |s| {
            use weft_core::lang::primitives;
            !primitives::is_any(s)
                && primitives::from_str(s).is_none()
                && primitives::collection_from_str(s).is_none()
        }),
        field in ident_strategy(),
        fn_name in ident_strategy(),
    ) {
        let source = format!(
            "type {type_name}:\n    {field}: int\nfunc {fn_name}(v: {type_name}) -> int:\n    return v.{field}\n"
        );
        let shapes = function_shapes(&source);
        prop_assert_eq!(shapes.len(), 1);
        prop_assert_eq!(&shapes[0].1[0], &TypeRef::User(type_name));
    }
}
