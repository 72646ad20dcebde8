use super::*;
use crate::types::ClassId;

fn names(store: &ClassStore, exprs: &[TypeExpr]) -> Vec<String> {
    exprs.iter().map(|e| store.display(e)).collect()
}

fn resolve(store: &ClassStore, text: &str) -> Vec<String> {
    let expr = store.parse(text).expect("parses");
    names(store, &resolve_closure(store, &expr).expect("resolves"))
}

fn diamond() -> ClassStore {
    let store = ClassStore::new();
    store.declare_type_vars(&["T"]).expect("type vars");
    store.declare("int", &[]).expect("int");
    store.declare("Base", &["Generic[T]"]).expect("Base");
    store.declare("L", &["Base[int]"]).expect("L");
    store.declare("R", &["Base[int]"]).expect("R");
    store.declare("D", &["L", "R"]).expect("D");
    store
}

#[test]
fn test_plain_class_uses_linearization() {
    let store = ClassStore::new();
    store.declare("A", &[]).expect("A");
    store.declare("B", &["A"]).expect("B");
    store.declare("C", &["A"]).expect("C");
    store.declare("D", &["B", "C"]).expect("D");

    assert_eq!(resolve(&store, "D"), vec!["D", "B", "C", "A"]);
    assert_eq!(resolve(&store, "A"), vec!["A"]);
}

#[test]
fn test_parameterized_input_is_specialized_first() {
    let store = ClassStore::new();
    store.declare_type_vars(&["T"]).expect("type vars");
    store.declare("str", &[]).expect("str");
    store.declare("A1", &["Generic[T]"]).expect("A1");
    store.declare("A2", &["A1[T]"]).expect("A2");

    assert_eq!(resolve(&store, "A2[str]"), vec!["A2[str]", "A1[str]"]);
    assert_eq!(resolve(&store, "A1[str]"), vec!["A1[str]"]);
}

#[test]
fn test_unspecialized_generic_keeps_placeholders() {
    let store = ClassStore::new();
    store.declare_type_vars(&["T"]).expect("type vars");
    store.declare("A1", &["Generic[T]"]).expect("A1");
    store.declare("A2", &["A1[T]"]).expect("A2");

    assert_eq!(resolve(&store, "A2"), vec!["A2", "A1[T]"]);
}

#[test]
fn test_plain_subclass_of_generic_walks_bases() {
    let store = ClassStore::new();
    store.declare_type_vars(&["T"]).expect("type vars");
    store.declare("str", &[]).expect("str");
    store.declare("A1", &["Generic[T]"]).expect("A1");
    store.declare("A2", &["A1[str]"]).expect("A2");
    store.declare("X", &["A2"]).expect("X");

    assert_eq!(resolve(&store, "X"), vec!["X", "A2", "A1[str]"]);
}

#[test]
fn test_duplicates_merged_by_default() {
    let store = diamond();
    assert_eq!(resolve(&store, "D"), vec!["D", "L", "Base[int]", "R"]);
}

#[test]
fn test_keep_duplicates_policy() {
    let store = diamond();
    let d = store.parse("D").expect("parses");
    let raw = resolve_closure_with(&store, &d, &ClosureConfig::keep_duplicates()).expect("resolves");
    assert_eq!(
        names(&store, &raw),
        vec!["D", "L", "Base[int]", "R", "Base[int]"]
    );
}

#[test]
fn test_ignored_and_non_class_inputs() {
    let store = ClassStore::new();
    store.declare("int", &[]).expect("int");

    let object = TypeExpr::Class(ClassId::OBJECT);
    assert_eq!(
        resolve_closure(&store, &object),
        Err(HierarchyError::IgnoredRoot {
            name: "object".into()
        })
    );

    let generic = store.parse("Generic[int]").expect("parses");
    assert!(matches!(
        resolve_closure(&store, &generic),
        Err(HierarchyError::IgnoredRoot { ref name }) if name == "Generic[int]"
    ));

    let placeholder = TypeExpr::Param(store.intern("T"));
    assert_eq!(
        resolve_closure(&store, &placeholder),
        Err(HierarchyError::NotAClass { name: "T".into() })
    );

    assert_eq!(
        resolve_closure(&store, &TypeExpr::Class(ClassId(999))),
        Err(HierarchyError::UnknownClass { id: 999 })
    );
}

#[test]
fn test_with_parents_marker() {
    let store = ClassStore::new();
    store.declare_type_vars(&["T"]).expect("type vars");
    store.declare("str", &[]).expect("str");
    let lone = store.declare("Lone", &[]).expect("Lone");
    store.declare("A1", &["Generic[T]"]).expect("A1");
    store.declare("A2", &["A1[str]"]).expect("A2");

    let lone = TypeExpr::Class(lone);
    let single = with_parents(&store, &lone).expect("resolves");
    assert_eq!(single, Provides::Single(lone.clone()));
    assert!(!single.is_multiple());
    assert_eq!(single.types(), std::slice::from_ref(&lone));

    let a2 = store.parse("A2").expect("parses");
    let multiple = with_parents(&store, &a2).expect("resolves");
    assert!(multiple.is_multiple());
    assert_eq!(names(&store, multiple.types()), vec!["A2", "A1[str]"]);
}

#[test]
fn test_with_parents_propagates_errors() {
    let store = ClassStore::new();
    let object = TypeExpr::Class(ClassId::OBJECT);
    assert!(matches!(
        with_parents(&store, &object),
        Err(HierarchyError::IgnoredRoot { .. })
    ));
}

#[test]
fn test_config_depth_limit() {
    let store = ClassStore::new();
    store.declare_type_vars(&["T"]).expect("type vars");
    store.declare("G1", &["Generic[T]"]).expect("G1");
    store.declare("G2", &["G1[T]"]).expect("G2");
    store.declare("G3", &["G2[T]"]).expect("G3");

    let g3 = store.parse("G3").expect("parses");
    let config = ClosureConfig {
        max_depth: 0,
        ..ClosureConfig::default()
    };
    assert_eq!(
        resolve_closure_with(&store, &g3, &config),
        Err(HierarchyError::HierarchyTooDeep { depth: 0 })
    );
    assert_eq!(ClosureConfig::default().duplicates, DuplicatePolicy::Merge);
}

#[test]
fn test_resolve_with_trace_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let store = diamond();
        assert_eq!(resolve(&store, "D"), vec!["D", "L", "Base[int]", "R"]);
        assert_eq!(resolve(&store, "Base[int]"), vec!["Base[int]"]);
    });
}
