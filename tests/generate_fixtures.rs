use std::path::PathBuf;

use babel_flow_decls::{generate, write_declarations, Config, LintWarning, Metadata};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn load_subset() -> Metadata {
    Metadata::from_path(fixture("babel_subset.json")).expect("fixture parses")
}

#[test]
fn babel_subset_matches_golden_output() {
    let expected = std::fs::read_to_string(fixture("babel_subset.expected.js")).unwrap();
    let actual = generate(&load_subset(), &Config::default()).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn one_class_per_node_type_and_builders_except_reserved() {
    let metadata = load_subset();
    let out = generate(&metadata, &Config::default()).unwrap();

    for node_type in metadata.node_fields.keys() {
        let class = format!("declare class BabelNode{node_type} extends BabelNode {{");
        assert_eq!(out.matches(&class).count(), 1, "class for {node_type}");

        let mut builder = node_type.clone();
        builder[..1].make_ascii_lowercase();
        let builder = format!("declare function {builder}(");
        let expected = if node_type == "Super" || node_type == "Import" { 0 } else { 1 };
        assert_eq!(out.matches(&builder).count(), expected, "builder for {node_type}");
    }
}

#[test]
fn one_predicate_per_type_name() {
    let metadata = load_subset();
    let out = generate(&metadata, &Config::default()).unwrap();

    for name in &metadata.types {
        let line = out
            .lines()
            .filter(|l| l.starts_with(&format!("  declare function is{name}(")))
            .collect::<Vec<_>>();
        assert_eq!(line.len(), 1, "predicate for {name}");
        assert_eq!(line[0].contains("%checks"), metadata.is_node_type(name), "refinement for {name}");
    }
}

#[test]
fn written_file_matches_generated_text() {
    let metadata = load_subset();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("types.js");
    write_declarations(&path, &metadata, &Config::default()).unwrap();
    write_declarations(&path, &metadata, &Config::default()).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        generate(&metadata, &Config::default()).unwrap()
    );
}

#[test]
fn babel_subset_lint_flags_chain_validator() {
    assert_eq!(
        load_subset().lint(),
        vec![LintWarning::UnrecognizedValidator {
            node_type: "ArrayExpression".into(),
            field: "elements".into(),
        }]
    );
}
