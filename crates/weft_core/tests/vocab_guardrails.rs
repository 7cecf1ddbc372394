//! Guardrail tests for the vocabulary registries.
//!
//! These tests protect the registry invariants the lexer and resolver rely on: every
//! spelling maps to exactly one id, and `from_str`/`as_str` stay in sync with the tables.

use weft_core::lang::{annotations, keywords, operators, primitives, punctuation};

#[test]
fn keyword_spellings_are_unique() {
    let mut seen: Vec<&str> = Vec::new();
    for k in keywords::KEYWORDS {
        assert!(!seen.contains(&k.canonical), "duplicate keyword spelling {:?}", k.canonical);
        seen.push(k.canonical);
        for alias in k.aliases {
            assert!(!seen.contains(alias), "duplicate keyword spelling {:?}", alias);
            seen.push(alias);
        }
    }
}

#[test]
fn keyword_roundtrip() {
    for k in keywords::KEYWORDS {
        assert_eq!(keywords::from_str(k.canonical), Some(k.id));
        assert_eq!(keywords::as_str(k.id), k.canonical);
        for alias in k.aliases {
            assert_eq!(keywords::from_str(alias), Some(k.id), "alias {:?} must collapse", alias);
        }
    }
}

#[test]
fn mutability_spellings_collapse() {
    use keywords::KeywordId;
    for s in ["var", "mut", "mutable"] {
        assert_eq!(keywords::from_str(s), Some(KeywordId::Mut));
    }
    for s in ["const", "let", "val", "final"] {
        assert_eq!(keywords::from_str(s), Some(KeywordId::Immut));
    }
}

#[test]
fn function_spellings_collapse() {
    use keywords::KeywordId;
    for s in ["func", "function", "fn", "def"] {
        assert_eq!(keywords::from_str(s), Some(KeywordId::Func));
    }
}

#[test]
fn null_spellings_collapse() {
    use keywords::KeywordId;
    for s in ["null", "nil", "none"] {
        assert_eq!(keywords::from_str(s), Some(KeywordId::Null));
    }
}

#[test]
fn operator_spellings_are_unique_and_roundtrip() {
    let mut seen: Vec<&str> = Vec::new();
    for o in operators::OPERATORS {
        assert!(!o.spellings.is_empty(), "operator {:?} has no spellings", o.id);
        for sp in o.spellings {
            assert!(!seen.contains(sp), "duplicate operator spelling {:?}", sp);
            seen.push(sp);
            assert_eq!(operators::from_str(sp), Some(o.id));
        }
        assert_eq!(operators::as_str(o.id), o.spellings[0]);
    }
}

#[test]
fn word_operators_match_keyword_registry() {
    // `and`/`or`/`not` are reserved words and operator spellings; both registries must agree.
    for (word, op) in [
        ("and", operators::OperatorId::And),
        ("or", operators::OperatorId::Or),
        ("not", operators::OperatorId::Not),
    ] {
        assert!(keywords::from_str(word).is_some(), "{word} must be reserved");
        assert_eq!(operators::from_str(word), Some(op));
        assert!(operators::info_for(op).is_keyword_spelling);
    }
}

#[test]
fn punctuation_roundtrip() {
    for p in punctuation::PUNCTUATION {
        assert_eq!(punctuation::from_str(p.canonical), Some(p.id));
        assert_eq!(punctuation::as_str(p.id), p.canonical);
    }
}

#[test]
fn annotation_spellings_are_unique_and_roundtrip() {
    let mut seen: Vec<&str> = Vec::new();
    for a in annotations::ANNOTATIONS {
        assert!(!seen.contains(&a.canonical), "duplicate annotation spelling {:?}", a.canonical);
        seen.push(a.canonical);
        assert_eq!(annotations::from_str(a.canonical), Some(a.id));
        for alias in a.aliases {
            assert!(!seen.contains(alias), "duplicate annotation spelling {:?}", alias);
            seen.push(alias);
            assert_eq!(annotations::from_str(alias), Some(a.id));
        }
    }
}

#[test]
fn summary_aliases_collapse() {
    assert_eq!(
        annotations::from_str("SumFunc"),
        annotations::from_str("Summary"),
    );
    assert_eq!(annotations::from_str("Entity"), Some(annotations::AnnotationId::Schema));
    assert_eq!(annotations::from_str("DatabaseModel"), Some(annotations::AnnotationId::Schema));
}

#[test]
fn unrecognized_annotation_is_none() {
    assert_eq!(annotations::from_str("TotallyNewAnnotation"), None);
}

#[test]
fn primitive_aliases_collapse() {
    use primitives::PrimitiveKind;
    for s in ["int", "integer", "Int", "Integer"] {
        assert_eq!(primitives::from_str(s), Some(PrimitiveKind::Int));
    }
    for s in ["string", "str", "String"] {
        assert_eq!(primitives::from_str(s), Some(PrimitiveKind::Str));
    }
    assert_eq!(primitives::from_str("NotAType"), None);
}

#[test]
fn any_is_never_a_primitive() {
    assert!(primitives::is_any("any"));
    assert!(primitives::is_any("Any"));
    assert_eq!(primitives::from_str("any"), None);
}

#[test]
fn collection_names_resolve() {
    use primitives::CollectionKind;
    assert_eq!(primitives::collection_from_str("Array"), Some(CollectionKind::Array));
    assert_eq!(primitives::collection_from_str("List"), Some(CollectionKind::Array));
    assert_eq!(primitives::collection_from_str("Map"), Some(CollectionKind::Map));
    assert_eq!(primitives::collection_from_str("Dict"), Some(CollectionKind::Map));
    assert_eq!(primitives::collection_from_str("Set"), Some(CollectionKind::Set));
    assert_eq!(primitives::collection_from_str("Vector"), None);
    assert_eq!(primitives::collection_arity(CollectionKind::Map), 2);
}
