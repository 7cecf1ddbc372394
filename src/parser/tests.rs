// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::lexer;

    fn parse_src(source: &str) -> (RawModule, Vec<Diagnostic>) {
        let tokens = lexer::lex(FileId(0), source)
            .unwrap_or_else(|errs| panic!("lex failed: {errs:?}\nsource:\n{source}"));
        parse(FileId(0), &tokens)
    }

    fn parse_clean(source: &str) -> RawModule {
        let (module, diagnostics) = parse_src(source);
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}\nsource:\n{source}");
        module
    }

    // ------------------------------------------------------------------------
    // Canonicalization: scoping styles
    // ------------------------------------------------------------------------

    #[test]
    fn brace_and_indent_functions_produce_identical_trees() {
        let braced = parse_clean("func add(a: int, b: int) -> int {\n    return a + b\n}\n");
        let indented = parse_clean("func add(a: int, b: int) -> int:\n    return a + b\n");
        assert_eq!(braced, indented);
    }

    #[test]
    fn nested_blocks_choose_styles_independently() {
        let mixed = parse_clean(
            "func f(x: int) {\n    if x > 0:\n        return x\n    else {\n        return 0\n    }\n}\n",
        );
        let uniform = parse_clean("func f(x: int):\n    if x > 0:\n        return x\n    else:\n        return 0\n");
        assert_eq!(mixed, uniform);
    }

    #[test]
    fn brace_and_indent_type_bodies_match() {
        let braced = parse_clean("type User {\n    name: string\n    age: int\n}\n");
        let indented = parse_clean("type User:\n    name: string\n    age: int\n");
        assert_eq!(braced, indented);
    }

    // ------------------------------------------------------------------------
    // Canonicalization: keyword and operator spellings
    // ------------------------------------------------------------------------

    #[test]
    fn binding_spellings_produce_identical_trees() {
        let a = parse_clean("func f():\n    var x: int = 1\n    let y = 2\n");
        let b = parse_clean("func f():\n    mutable x: int = 1\n    const y = 2\n");
        let c = parse_clean("func f():\n    mut x: int = 1\n    val y = 2\n");
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn function_spellings_produce_identical_trees() {
        let expected = parse_clean("func go():\n    return\n");
        for kw in ["function", "fn", "def"] {
            let module = parse_clean(&format!("{kw} go():\n    return\n"));
            assert_eq!(module, expected, "spelling {kw:?}");
        }
    }

    #[test]
    fn operator_spellings_produce_identical_trees() {
        let sym = parse_clean("func f(a: bool, b: bool) -> bool:\n    return !a && b || a\n");
        let word = parse_clean("func f(a: bool, b: bool) -> bool:\n    return not a and b or a\n");
        assert_eq!(sym, word);
    }

    #[test]
    fn switch_and_match_produce_identical_trees() {
        let m = parse_clean("func f(x: int):\n    match x:\n        case 1:\n            return\n        default:\n            return\n");
        let s = parse_clean("func f(x: int):\n    switch x:\n        case 1:\n            return\n        default:\n            return\n");
        assert_eq!(m, s);
    }

    #[test]
    fn elif_and_else_if_produce_identical_trees() {
        let elif = parse_clean("func f(x: int):\n    if x > 1:\n        return\n    elif x > 0:\n        return\n");
        let else_if = parse_clean("func f(x: int):\n    if x > 1:\n        return\n    else if x > 0:\n        return\n");
        assert_eq!(elif, else_if);
    }

    #[test]
    fn null_spellings_produce_identical_trees() {
        let a = parse_clean("func f():\n    return null\n");
        let b = parse_clean("func f():\n    return nil\n");
        let c = parse_clean("func f():\n    return none\n");
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    // ------------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------------

    #[test]
    fn type_forms_are_recorded() {
        let module = parse_clean(
            "type A:\n    x: int\nclass B:\n    x: int\nstruct C:\n    x: int\ndata D:\n    x: int\nobject E:\n    x: int\n",
        );
        let forms: Vec<TypeForm> = module
            .decls
            .iter()
            .map(|d| match &d.node {
                RawDecl::Type(t) => t.form,
                other => panic!("expected type decl, got {other:?}"),
            })
            .collect();
        assert_eq!(
            forms,
            vec![TypeForm::Type, TypeForm::Class, TypeForm::Struct, TypeForm::Data, TypeForm::Object]
        );
    }

    #[test]
    fn imports_record_segments() {
        let module = parse_clean("import models.user\nimport helpers\n");
        match &module.decls[0].node {
            RawDecl::Import(i) => {
                assert_eq!(i.segments, vec!["models".to_string(), "user".to_string()]);
                assert_eq!(i.imported_name(), Some("user"));
            }
            other => panic!("expected import, got {other:?}"),
        }
    }

    #[test]
    fn type_with_fields_and_methods() {
        let module = parse_clean(
            "class Account {\n    var balance: float = 0.0\n    owner: string\n\n    func deposit(amount: float) {\n        balance += amount\n    }\n}\n",
        );
        match &module.decls[0].node {
            RawDecl::Type(t) => {
                assert_eq!(t.fields.len(), 2);
                assert!(t.fields[0].node.mutable);
                assert!(!t.fields[1].node.mutable);
                assert_eq!(t.methods.len(), 1);
                assert_eq!(t.methods[0].node.name, "deposit");
            }
            other => panic!("expected type, got {other:?}"),
        }
    }

    #[test]
    fn enum_cases_unit_associated_and_raw() {
        let module = parse_clean(
            "enum Status: int {\n    Active = 1\n    Suspended = 2\n}\nenum Shape {\n    Circle(radius: float)\n    Point\n}\n",
        );
        match &module.decls[0].node {
            RawDecl::Enum(e) => {
                assert!(e.backing.is_some());
                assert_eq!(e.cases.len(), 2);
                assert_eq!(e.cases[0].node.raw_value.as_ref().map(|v| v.node.clone()), Some(Literal::Int(1)));
                assert!(e.cases[0].node.payload.is_empty());
            }
            other => panic!("expected enum, got {other:?}"),
        }
        match &module.decls[1].node {
            RawDecl::Enum(e) => {
                assert!(e.backing.is_none());
                assert_eq!(e.cases[0].node.payload.len(), 1);
                assert!(e.cases[0].node.raw_value.is_none());
                assert!(e.cases[1].node.payload.is_empty());
            }
            other => panic!("expected enum, got {other:?}"),
        }
    }

    #[test]
    fn enum_case_with_payload_and_raw_value_parses_for_later_rejection() {
        // Mutual exclusion is enforced during assembly, not here.
        let module = parse_clean("enum Bad {\n    Weird(x: int) = 1\n}\n");
        match &module.decls[0].node {
            RawDecl::Enum(e) => {
                assert_eq!(e.cases[0].node.payload.len(), 1);
                assert!(e.cases[0].node.raw_value.is_some());
            }
            other => panic!("expected enum, got {other:?}"),
        }
    }

    // ------------------------------------------------------------------------
    // Annotations and summaries
    // ------------------------------------------------------------------------

    #[test]
    fn annotations_attach_to_following_declaration() {
        let module = parse_clean(
            "@Schema\n@Index(name, unique: true)\ntype User {\n    @Id\n    id: int\n    name: string\n}\n",
        );
        match &module.decls[0].node {
            RawDecl::Type(t) => {
                assert_eq!(t.annotations.len(), 2);
                assert_eq!(t.annotations[0].node.name, "Schema");
                assert_eq!(t.annotations[1].node.name, "Index");
                assert_eq!(t.annotations[1].node.args.len(), 2);
                assert!(matches!(
                    &t.annotations[1].node.args[1],
                    RawAnnotationArg::Pair { key, value } if key == "unique" && **value == RawAnnotationArg::Bool(true)
                ));
                assert_eq!(t.fields[0].node.annotations.len(), 1);
            }
            other => panic!("expected type, got {other:?}"),
        }
    }

    #[test]
    fn unknown_annotation_spelling_is_preserved() {
        let module = parse_clean("@Memoize(limit: 10)\nfunc f():\n    return\n");
        match &module.decls[0].node {
            RawDecl::Function(f) => {
                assert_eq!(f.annotations[0].node.name, "Memoize");
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn summary_lines_attach_to_function_in_order() {
        let module = parse_clean(
            "@SumFunc\n=> look up the user by id\n=> return null when missing\nfunc find(id: int) -> User?:\n    return null\n",
        );
        match &module.decls[0].node {
            RawDecl::Function(f) => {
                assert_eq!(
                    f.summary,
                    vec!["look up the user by id".to_string(), "return null when missing".to_string()]
                );
                assert_eq!(f.annotations.len(), 1);
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn malformed_annotation_arguments_report_annotation_kind() {
        let (module, diagnostics) = parse_src("@Index(, )\nfunc f():\n    return\n");
        assert!(diagnostics.iter().any(|d| d.kind == DiagnosticKind::Annotation));
        assert!(!diagnostics.iter().any(|d| d.kind == DiagnosticKind::Parse));
        // Recovery is declaration-granular: the function itself survives.
        assert!(module.decls.iter().any(|d| matches!(
            &d.node,
            RawDecl::Function(f) if f.name == "f"
        )));
    }

    #[test]
    fn summary_on_type_is_reported_but_type_still_parses() {
        let (module, diagnostics) = parse_src("=> this is misplaced\ntype T:\n    x: int\n");
        assert_eq!(module.decls.len(), 1);
        assert!(diagnostics.iter().any(|d| d.kind == DiagnosticKind::Annotation));
    }

    // ------------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------------

    #[test]
    fn optional_placement_distinguishes_array_shapes() {
        let module = parse_clean("func f(a: [string]?, b: [string?]):\n    return\n");
        match &module.decls[0].node {
            RawDecl::Function(f) => {
                assert!(matches!(f.params[0].node.ty.node, RawType::Optional(_)));
                assert!(matches!(f.params[1].node.ty.node, RawType::ArraySugar(_)));
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn generic_and_sugar_collection_syntax_both_parse() {
        let module = parse_clean(
            "func f(a: [int], b: Array<int>, c: [string: int], d: Map<string, int>, e: Set<int>):\n    return\n",
        );
        match &module.decls[0].node {
            RawDecl::Function(f) => {
                assert!(matches!(f.params[0].node.ty.node, RawType::ArraySugar(_)));
                assert!(matches!(f.params[1].node.ty.node, RawType::Generic(_, _)));
                assert!(matches!(f.params[2].node.ty.node, RawType::MapSugar(_, _)));
                assert!(matches!(f.params[3].node.ty.node, RawType::Generic(_, _)));
                assert!(matches!(f.params[4].node.ty.node, RawType::Generic(_, _)));
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    // ------------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------------

    #[test]
    fn view_with_state_fields_hooks_and_components() {
        let module = parse_clean(
            "view Counter {\n    @State\n    var count: int = 0\n\n    onAppear {\n        count = 0\n    }\n\n    VStack(spacing: 8) {\n        Text(\"count\")\n        Button(label: \"add\")\n    }\n}\n",
        );
        match &module.decls[0].node {
            RawDecl::View(v) => {
                assert_eq!(v.name, "Counter");
                assert_eq!(v.fields.len(), 1);
                assert!(v.fields[0].node.mutable);
                assert_eq!(v.fields[0].node.annotations[0].node.name, "State");
                assert_eq!(v.hooks.len(), 1);
                assert_eq!(v.hooks[0].node.trigger, HookTrigger::Appear);
                assert_eq!(v.body.len(), 1);
                match &v.body[0].node {
                    Stmt::Component(c) => {
                        assert_eq!(c.name, "VStack");
                        assert_eq!(c.args.len(), 1);
                        assert_eq!(c.children.len(), 2);
                    }
                    other => panic!("expected component, got {other:?}"),
                }
            }
            other => panic!("expected view, got {other:?}"),
        }
    }

    #[test]
    fn component_children_accept_either_scoping_style() {
        let braced = parse_clean(
            "view W {\n    VStack(spacing: 8) {\n        Text(\"x\")\n    }\n}\n",
        );
        let indented = parse_clean("view W:\n    VStack(spacing: 8):\n        Text(\"x\")\n");
        let mixed = parse_clean("view W:\n    VStack(spacing: 8) {\n        Text(\"x\")\n    }\n");
        assert_eq!(braced, indented);
        assert_eq!(braced, mixed);
        match &braced.decls[0].node {
            RawDecl::View(v) => {
                assert!(matches!(&v.body[0].node, Stmt::Component(c) if c.children.len() == 1));
            }
            other => panic!("expected view, got {other:?}"),
        }
    }

    #[test]
    fn on_change_hook_records_field() {
        let module = parse_clean("view W {\n    onChange(query) {\n        refresh()\n    }\n}\n");
        match &module.decls[0].node {
            RawDecl::View(v) => {
                assert_eq!(v.hooks[0].node.trigger, HookTrigger::Change("query".to_string()));
            }
            other => panic!("expected view, got {other:?}"),
        }
    }

    // ------------------------------------------------------------------------
    // Error recovery
    // ------------------------------------------------------------------------

    #[test]
    fn parser_resynchronizes_after_malformed_declaration() {
        let (module, diagnostics) = parse_src("func broken(:\n    return\nfunc ok():\n    return\n");
        assert!(!diagnostics.is_empty());
        assert!(module.decls.iter().any(|d| matches!(
            &d.node,
            RawDecl::Function(f) if f.name == "ok"
        )));
    }

    #[test]
    fn statement_error_does_not_abort_the_block() {
        let (module, diagnostics) =
            parse_src("func f():\n    let x = @\n    return 1\n");
        assert!(!diagnostics.is_empty());
        match &module.decls[0].node {
            RawDecl::Function(f) => {
                // The return after the bad line survives.
                assert!(f.body.iter().any(|s| matches!(s.node, Stmt::Return(Some(_)))));
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn mixed_scoping_styles_are_a_scope_error() {
        let (module, diagnostics) = parse_src("func f():\n    return\n}\nfunc g():\n    return\n");
        assert!(diagnostics.iter().any(|d| d.kind == DiagnosticKind::Scope));
        assert_eq!(module.decls.len(), 2);
    }

    #[test]
    fn unclosed_brace_block_is_a_scope_error() {
        let (module, diagnostics) = parse_src("func f() {\n    return\n");
        assert!(diagnostics.iter().any(|d| d.kind == DiagnosticKind::Scope));
        assert_eq!(module.decls.len(), 1);
    }

    #[test]
    fn stray_close_brace_in_indent_block_is_a_scope_error() {
        let (_, diagnostics) = parse_src("func f():\n    if x {\n        y()\n    }\n    }\n    return\n");
        assert!(diagnostics.iter().any(|d| d.kind == DiagnosticKind::Scope));
    }

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------

    #[test]
    fn precedence_comes_from_the_registry() {
        let module = parse_clean("func f(a: int, b: int) -> bool:\n    return a + b * 2 == 10 && a > 0\n");
        match &module.decls[0].node {
            RawDecl::Function(f) => match &f.body[0].node {
                Stmt::Return(Some(e)) => match &e.node {
                    // `&&` binds loosest.
                    Expr::Binary(_, OperatorId::And, _) => {}
                    other => panic!("expected `&&` at the root, got {other:?}"),
                },
                other => panic!("expected return, got {other:?}"),
            },
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn member_call_index_chain() {
        let module = parse_clean("func f():\n    users[0].name.trim()\n");
        match &module.decls[0].node {
            RawDecl::Function(f) => {
                assert!(matches!(&f.body[0].node, Stmt::Expr(e) if matches!(e.node, Expr::Call(_, _))));
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn map_and_array_literals() {
        let module = parse_clean("func f():\n    let xs = [1, 2, 3]\n    let m = [\"a\": 1, \"b\": 2]\n    let e = []\n");
        match &module.decls[0].node {
            RawDecl::Function(f) => {
                let inits: Vec<&Expr> = f
                    .body
                    .iter()
                    .map(|s| match &s.node {
                        Stmt::Binding(b) => &b.init.as_ref().unwrap().node,
                        other => panic!("expected binding, got {other:?}"),
                    })
                    .collect();
                assert!(matches!(inits[0], Expr::Array(items) if items.len() == 3));
                assert!(matches!(inits[1], Expr::MapLit(entries) if entries.len() == 2));
                assert!(matches!(inits[2], Expr::Array(items) if items.is_empty()));
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn await_requires_no_parens() {
        let module = parse_clean("async func f():\n    let r = await fetch()\n");
        match &module.decls[0].node {
            RawDecl::Function(f) => {
                assert!(f.is_async);
                match &f.body[0].node {
                    Stmt::Binding(b) => assert!(matches!(b.init.as_ref().unwrap().node, Expr::Await(_))),
                    other => panic!("expected binding, got {other:?}"),
                }
            }
            other => panic!("expected function, got {other:?}"),
        }
    }
}
