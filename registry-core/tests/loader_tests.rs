//! Loader integration tests: ordering, type preservation, error reporting.

use assert_fs::prelude::*;
use predicates::prelude::predicate;
use registry_core::{
    load_entries, read_registry,
    registry::load_document,
    types::{slugify, InstitutionId},
    RegistryError,
};
use rstest::rstest;
use serde_json::Value;

const ZURICH: &str = "\
id: https://ror.org/05a28rw58
institution: ETH Zürich
repositories:
  - name: Research Collection
    url: https://www.research-collection.ethz.ch
    status: active
    last_verified: 2024-01-01
    code:
      - type: connector
        repo: https://github.com/example/connector
        description: Harvests <b>things</b>
        language: Java
        license: BSD-3-Clause
";

const BASEL: &str = "\
id: https://ror.org/02s6k3f65
institution: University of Basel
repositories: []
";

// ---------------------------------------------------------------------------
// 1. Ordering
// ---------------------------------------------------------------------------

#[test]
fn entries_load_in_file_name_order() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("zurich.yaml").write_str(ZURICH).expect("write");
    dir.child("basel.yaml").write_str(BASEL).expect("write");

    let entries = load_entries(dir.path()).expect("load");
    let names: Vec<_> = entries.iter().map(|e| e.institution.as_str()).collect();
    assert_eq!(names, vec!["University of Basel", "ETH Zürich"]);
}

#[test]
fn reader_yields_one_document_per_file() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("a.yaml").write_str(BASEL).expect("write");
    dir.child("b.yaml").write_str(ZURICH).expect("write");

    let docs: Vec<_> = read_registry(dir.path())
        .expect("reader")
        .collect::<Result<_, _>>()
        .expect("all parse");
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].file_name(), "a.yaml");
    assert_eq!(docs[1].file_name(), "b.yaml");
}

// ---------------------------------------------------------------------------
// 2. Type preservation
// ---------------------------------------------------------------------------

#[rstest]
#[case("2024-01-01")]
#[case("2024-01-01T10:00:00Z")]
#[case("2001-12-14 21:59:43.10 -5")]
fn timestamp_like_values_load_as_strings(#[case] date: &str) {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let yaml = format!(
        "id: x\ninstitution: X\nrepositories:\n  - name: R\n    status: active\n    last_verified: {date}\n"
    );
    dir.child("x.yaml").write_str(&yaml).expect("write");

    let doc = load_document(&dir.path().join("x.yaml")).expect("load");
    assert_eq!(
        doc.raw["repositories"][0]["last_verified"],
        Value::String(date.to_string())
    );
    let entry = doc.entry().expect("decode");
    assert_eq!(entry.repositories[0].last_verified.as_deref(), Some(date));
}

#[rstest]
#[case("no")]
#[case("on")]
#[case("Yes")]
#[case("off")]
fn yaml_1_1_booleans_load_as_strings(#[case] word: &str) {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let yaml = format!(
        "id: x\ninstitution: X\nrepositories:\n  - name: R\n    status: active\n    contact: {word}\n    software: {word}\n"
    );
    dir.child("x.yaml").write_str(&yaml).expect("write");

    let doc = load_document(&dir.path().join("x.yaml")).expect("load");
    let platform = &doc.raw["repositories"][0];
    assert_eq!(platform["contact"], Value::String(word.to_string()));
    assert_eq!(platform["software"], Value::String(word.to_string()));
}

#[test]
fn yaml_1_2_booleans_stay_booleans() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("x.yaml")
        .write_str("id: x\ninstitution: X\nrepositories:\n  - name: R\n    status: active\n    contact: true\n")
        .expect("write");

    let doc = load_document(&dir.path().join("x.yaml")).expect("load");
    assert_eq!(doc.raw["repositories"][0]["contact"], Value::Bool(true));
    assert!(matches!(doc.entry(), Err(RegistryError::Decode { .. })));
}

#[test]
fn typed_entry_keeps_all_fields() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("zurich.yaml").write_str(ZURICH).expect("write");

    let entries = load_entries(dir.path()).expect("load");
    let entry = &entries[0];
    assert_eq!(entry.id, InstitutionId::from("https://ror.org/05a28rw58"));
    let platform = &entry.repositories[0];
    assert_eq!(platform.status, "active");
    assert!(platform.api_rest.is_none());
    let code = &platform.code()[0];
    assert_eq!(code.kind.as_deref(), Some("connector"));
    assert_eq!(code.description.as_deref(), Some("Harvests <b>things</b>"));
}

// ---------------------------------------------------------------------------
// 3. Errors
// ---------------------------------------------------------------------------

#[test]
fn corrupt_yaml_returns_parse_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("broken.yaml")
        .write_str(": : corrupt : yaml : !!!\n  - broken: [unclosed")
        .expect("write");

    let err = load_entries(dir.path()).unwrap_err();
    assert!(matches!(err, RegistryError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("broken.yaml"), "must contain file path, got: {err}");
}

#[test]
fn wrong_shape_returns_decode_error() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("list.yaml")
        .write_str("- this is a list, not a mapping\n")
        .expect("write");

    let err = load_entries(dir.path()).unwrap_err();
    assert!(matches!(err, RegistryError::Decode { .. }), "got: {err}");
}

#[test]
fn loader_does_not_touch_registry_files() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("zurich.yaml");
    file.write_str(ZURICH).expect("write");

    load_entries(dir.path()).expect("load");
    file.assert(predicate::str::diff(ZURICH));
}

// ---------------------------------------------------------------------------
// 4. Slugs
// ---------------------------------------------------------------------------

#[rstest]
#[case("https://ror.org/05a28rw58", "https-ror-org-05a28rw58")]
#[case("  Leading and trailing  ", "leading-and-trailing")]
#[case("École Polytechnique Fédérale", "ecole-polytechnique-federale")]
#[case("Universität---Zürich", "universitat-zurich")]
#[case("a__b..c", "a-b-c")]
#[case("", "")]
fn slugify_cases(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(slugify(input), expected);
}
