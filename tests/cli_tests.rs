//! Integration tests for the `heritage` command runner.

use clap::Parser;
use heritage::cli::args::CliArgs;
use heritage::cli::run;
use std::io::Write;
use tempfile::NamedTempFile;

const HIERARCHY: &str = r#"{
    "type_vars": ["T"],
    "classes": [
        { "name": "int" },
        { "name": "str" },
        { "name": "float" },
        { "name": "A1", "bases": ["Generic[T]", "float"] },
        { "name": "A2", "bases": ["A1[T]", "Generic[T]"] },
        { "name": "B1" },
        { "name": "B2", "bases": ["B1"] },
        { "name": "B3", "bases": ["B2"] },
        { "name": "C1", "params": ["T"], "bases": ["Generic[T]", "B3"] },
        { "name": "D1", "bases": ["A2[int]", "C1[str]"] },
        { "name": "Base", "bases": ["Generic[T]"] },
        { "name": "L", "bases": ["Base[int]"] },
        { "name": "R", "bases": ["Base[int]"] },
        { "name": "Diamond", "bases": ["L", "R"] }
    ]
}"#;

fn hierarchy_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write hierarchy");
    file
}

fn run_cli(args: &[&str]) -> anyhow::Result<String> {
    let args = CliArgs::try_parse_from(std::iter::once("heritage").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    run(&args, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn path_of(file: &NamedTempFile) -> &str {
    file.path().to_str().expect("utf-8 temp path")
}

#[test]
fn test_resolve_prints_closure() {
    let file = hierarchy_file(HIERARCHY);
    let output = run_cli(&["resolve", "--hierarchy", path_of(&file), "D1"]).expect("resolves");
    assert_eq!(
        output.lines().collect::<Vec<_>>(),
        vec!["D1", "A2[int]", "A1[int]", "float", "C1[str]", "B3", "B2", "B1"]
    );
}

#[test]
fn test_resolve_parameterized_json() {
    let file = hierarchy_file(HIERARCHY);
    let output = run_cli(&[
        "resolve",
        "--hierarchy",
        path_of(&file),
        "A2[str]",
        "--json",
    ])
    .expect("resolves");
    let parsed: Vec<String> = serde_json::from_str(&output).expect("json array");
    assert_eq!(parsed, vec!["A2[str]", "A1[str]", "float"]);
}

#[test]
fn test_resolve_keep_duplicates() {
    let file = hierarchy_file(HIERARCHY);
    let merged = run_cli(&["resolve", "--hierarchy", path_of(&file), "Diamond"]).expect("merged");
    assert_eq!(merged.lines().count(), 4);

    let raw = run_cli(&[
        "resolve",
        "--hierarchy",
        path_of(&file),
        "Diamond",
        "--keep-duplicates",
    ])
    .expect("raw");
    assert_eq!(
        raw.lines().collect::<Vec<_>>(),
        vec!["Diamond", "L", "Base[int]", "R", "Base[int]"]
    );
}

#[test]
fn test_resolve_root_marker_fails() {
    let file = hierarchy_file(HIERARCHY);
    let err = run_cli(&["resolve", "--hierarchy", path_of(&file), "object"])
        .expect_err("object is ignored");
    let chain = format!("{err:#}");
    assert!(chain.contains("cannot resolve `object`"), "{chain}");
    assert!(chain.contains("ignored types"), "{chain}");
}

#[test]
fn test_resolve_max_depth() {
    let file = hierarchy_file(HIERARCHY);
    let err = run_cli(&[
        "resolve",
        "--hierarchy",
        path_of(&file),
        "D1",
        "--max-depth",
        "0",
    ])
    .expect_err("too deep");
    assert!(format!("{err:#}").contains("cannot resolve `D1`"));
}

#[test]
fn test_mro() {
    let file = hierarchy_file(HIERARCHY);
    let output = run_cli(&["mro", "--hierarchy", path_of(&file), "Diamond"]).expect("mro");
    assert_eq!(
        output.lines().collect::<Vec<_>>(),
        vec!["Diamond", "L", "R", "Base", "Generic", "object"]
    );
}

#[test]
fn test_unknown_type_and_class() {
    let file = hierarchy_file(HIERARCHY);
    let err = run_cli(&["resolve", "--hierarchy", path_of(&file), "Nope[int]"])
        .expect_err("unknown");
    assert!(format!("{err:#}").contains("invalid type expression `Nope[int]`"));

    let err = run_cli(&["mro", "--hierarchy", path_of(&file), "Nope"]).expect_err("unknown");
    assert!(format!("{err:#}").contains("unknown class `Nope`"));
}

#[test]
fn test_bad_hierarchy_files() {
    let missing = run_cli(&["resolve", "--hierarchy", "/nonexistent/h.json", "int"])
        .expect_err("missing file");
    assert!(format!("{missing:#}").contains("failed to read hierarchy"));

    let malformed = hierarchy_file("{ not json");
    let err = run_cli(&["resolve", "--hierarchy", path_of(&malformed), "int"])
        .expect_err("malformed");
    assert!(format!("{err:#}").contains("invalid hierarchy"));

    let duplicate = hierarchy_file(r#"{ "classes": [ { "name": "A" }, { "name": "A" } ] }"#);
    let err = run_cli(&["resolve", "--hierarchy", path_of(&duplicate), "A"])
        .expect_err("duplicate class");
    assert!(format!("{err:#}").contains("failed to register hierarchy"));
}

#[test]
fn test_misspelled_base_argument_fails_to_load() {
    let typo = hierarchy_file(
        r#"{
            "type_vars": ["T"],
            "classes": [
                { "name": "str" },
                { "name": "A1", "bases": ["Generic[T]"] },
                { "name": "A2", "bases": ["A1[strr]"] }
            ]
        }"#,
    );
    let err = run_cli(&["resolve", "--hierarchy", path_of(&typo), "A2"])
        .expect_err("strr is not a class");
    let chain = format!("{err:#}");
    assert!(chain.contains("failed to register hierarchy"), "{chain}");
    assert!(chain.contains("`strr`"), "{chain}");
}
