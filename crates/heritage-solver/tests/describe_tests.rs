use super::*;
use crate::error::{RegisterError, SyntaxError};

const SAMPLE: &str = r#"{
    "classes": [
        { "name": "int" },
        { "name": "str" },
        { "name": "A1", "params": ["T", "*Ts"], "bases": ["Generic[T, *Ts]"] },
        { "name": "A2", "bases": ["A1[str, int]"] }
    ]
}"#;

#[test]
fn test_from_json_and_build() {
    let description = HierarchyDescription::from_json(SAMPLE).expect("valid json");
    assert_eq!(description.classes.len(), 4);
    assert_eq!(description.classes[0].params, None);
    assert!(description.classes[0].bases.is_empty());

    let store = description.build().expect("builds");
    let a1 = store.lookup("A1").expect("A1");
    let a2 = store.lookup("A2").expect("A2");

    let params = store.type_params(a1).expect("A1 is generic");
    assert_eq!(params.len(), 2);
    assert!(!params[0].is_variadic());
    assert!(params[1].is_variadic());
    assert_eq!(store.display(&store.get(a2).expect("A2").bases[0]), "A1[str, int]");
}

#[test]
fn test_load_into_returns_ids_in_order() {
    let description = HierarchyDescription::from_json(SAMPLE).expect("valid json");
    let store = ClassStore::new();
    let ids = description.load_into(&store).expect("loads");
    let names: Vec<_> = ids.iter().map(|id| store.name_of(*id).to_string()).collect();
    assert_eq!(names, vec!["int", "str", "A1", "A2"]);
}

#[test]
fn test_forward_reference_is_rejected() {
    let text = r#"{ "classes": [ { "name": "B", "bases": ["A"] }, { "name": "A" } ] }"#;
    let description = HierarchyDescription::from_json(text).expect("valid json");
    let Err(err) = description.build() else {
        panic!("A is not known yet");
    };
    assert!(matches!(
        err,
        DescribeError::Syntax { ref class, source: SyntaxError::UnknownName { ref name, .. } }
            if class == "B" && name == "A"
    ));
}

#[test]
fn test_forward_reference_in_argument_is_rejected() {
    let text = r#"{
        "type_vars": ["T"],
        "classes": [
            { "name": "Box", "bases": ["Generic[T]"] },
            { "name": "B", "bases": ["Box[A]"] },
            { "name": "A" }
        ]
    }"#;
    let description = HierarchyDescription::from_json(text).expect("valid json");
    let store = ClassStore::new();
    let Err(err) = description.load_into(&store) else {
        panic!("A is not known yet");
    };
    assert!(matches!(
        err,
        DescribeError::Syntax { ref class, source: SyntaxError::UnknownName { ref name, offset: 4 } }
            if class == "B" && name == "A"
    ));
    // `A` did not turn into a placeholder of `B`.
    assert!(store.lookup("B").is_none());
    assert!(store.lookup("Box").is_some());
}

#[test]
fn test_misspelled_argument_is_rejected() {
    let store = ClassStore::new();
    store.declare_type_vars(&["T"]).expect("type vars");
    store.declare("str", &[]).expect("str");
    store.declare("A1", &["Generic[T]"]).expect("A1");

    let Err(err) = store.declare("A2", &["A1[strr]"]) else {
        panic!("strr is not a class");
    };
    assert!(matches!(
        err,
        DescribeError::Syntax { ref class, source: SyntaxError::UnknownName { ref name, offset: 3 } }
            if class == "A2" && name == "strr"
    ));
    assert!(store.lookup("A2").is_none());
}

#[test]
fn test_type_vars_loaded_before_classes() {
    let text = r#"{
        "type_vars": ["K", "*Vs"],
        "classes": [
            { "name": "int" },
            { "name": "Row", "bases": ["Generic[K, *Vs]"] },
            { "name": "IntRow", "bases": ["Row[int, int, int]"] }
        ]
    }"#;
    let store = HierarchyDescription::from_json(text)
        .expect("valid json")
        .build()
        .expect("builds");

    assert_eq!(store.lookup_type_var("K"), Some(TypeParam::Fixed(store.intern("K"))));
    assert!(store.lookup_type_var("Vs").is_some_and(TypeParam::is_variadic));
    let row = store.lookup("Row").expect("Row");
    assert_eq!(store.type_params(row).expect("generic").len(), 2);
    let int_row = store.lookup("IntRow").expect("IntRow");
    assert_eq!(
        store.display(&store.get(int_row).expect("IntRow").bases[0]),
        "Row[int, int, int]"
    );
}

#[test]
fn test_invalid_type_vars() {
    let store = ClassStore::new();
    store.declare("int", &[]).expect("int");

    for bad in ["1T", "", "*", "int"] {
        assert!(
            matches!(
                store.declare_type_vars(&[bad]),
                Err(DescribeError::InvalidTypeVar { ref name }) if name == bad
            ),
            "{bad:?} should be rejected"
        );
    }
    store.declare_type_vars(&["T"]).expect("T");
    assert!(matches!(
        store.declare_type_vars(&["*T"]),
        Err(DescribeError::Register(RegisterError::NameConflict { .. }))
    ));
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        HierarchyDescription::from_json("{ \"classes\": [ }"),
        Err(DescribeError::Json(_))
    ));
}

#[test]
fn test_declared_params_restrict_placeholders() {
    let store = ClassStore::new();
    let description = ClassDescription {
        name: "Pair".into(),
        params: Some(vec!["K".into(), "V".into()]),
        bases: vec!["Generic[K, W]".into()],
    };
    assert!(matches!(
        description.register(&store),
        Err(DescribeError::Syntax { source: SyntaxError::UnknownName { ref name, .. }, .. })
            if name == "W"
    ));
}

#[test]
fn test_invalid_param_names() {
    let store = ClassStore::new();
    store.declare("int", &[]).expect("int");

    for bad in ["1T", "T-x", "", "*", "int"] {
        let description = ClassDescription {
            name: "Bad".into(),
            params: Some(vec![bad.into()]),
            bases: vec![],
        };
        assert!(
            matches!(description.register(&store), Err(DescribeError::InvalidParam { .. })),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_register_errors_pass_through() {
    let store = ClassStore::new();
    store.declare("A", &[]).expect("A");
    assert!(matches!(
        store.declare("A", &[]),
        Err(DescribeError::Register(RegisterError::DuplicateClass { .. }))
    ));
}

#[test]
fn test_declare_infers_params() {
    let store = ClassStore::new();
    store.declare_type_vars(&["K", "V"]).expect("type vars");
    let pair = store.declare("Pair", &["Generic[K, V]"]).expect("Pair");
    let params = store.type_params(pair).expect("generic");
    let names: Vec<_> = params
        .iter()
        .map(|p| store.resolve(p.name()).to_string())
        .collect();
    assert_eq!(names, vec!["K", "V"]);
}

#[test]
fn test_parse_rejects_placeholders() {
    let store = ClassStore::new();
    store.type_var("T").expect("T");
    store.declare("Box", &["Generic[T]"]).expect("Box");
    assert!(store.parse("Box[object]").is_ok());
    assert!(matches!(
        store.parse("Box[T]"),
        Err(SyntaxError::UnknownName { .. })
    ));
}

#[test]
fn test_description_serializes_without_empty_params() {
    let description = HierarchyDescription {
        type_vars: vec![],
        classes: vec![ClassDescription {
            name: "int".into(),
            params: None,
            bases: vec![],
        }],
    };
    let json = serde_json::to_string(&description).expect("serializes");
    assert_eq!(json, r#"{"classes":[{"name":"int","bases":[]}]}"#);
}
