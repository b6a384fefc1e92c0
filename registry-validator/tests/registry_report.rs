//! Validation of on-disk registry files with the workspace schema.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use registry_core::read_registry;
use registry_validator::{Probe, RegistryValidator, SchemaValidator, ValidateError, ValidationSummary};
use rstest::rstest;
use tempfile::TempDir;

const BERN: &str = "\
id: https://ror.org/02k7v4d05
institution: University of Bern
repositories:
  - name: BORIS
    url: https://boris.unibe.ch
    status: active
    last_verified: 2024-01-01
    code:
      - type: theme
        repo: https://github.com/unibe/boris-theme
";

/// Probe answering from a fixed list of dead URLs, recording every call.
struct ListProbe {
    dead: Vec<&'static str>,
    calls: RefCell<Vec<String>>,
}

impl ListProbe {
    fn new(dead: &[&'static str]) -> Self {
        ListProbe {
            dead: dead.to_vec(),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Probe for ListProbe {
    fn is_live(&self, url: &str) -> bool {
        self.calls.borrow_mut().push(url.to_string());
        !self.dead.iter().any(|dead| *dead == url)
    }
}

fn schema() -> SchemaValidator {
    let path: PathBuf = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("schema")
        .join("registry.schema.json");
    SchemaValidator::from_file(&path).expect("schema compiles")
}

fn registry(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    for (name, content) in files {
        fs::write(dir.path().join(name), content).expect("write");
    }
    dir
}

fn run(dir: &Path, probe: Option<&dyn Probe>) -> (Result<ValidationSummary, ValidateError>, String) {
    let schema = schema();
    let mut validator = RegistryValidator::new(&schema);
    if let Some(probe) = probe {
        validator = validator.with_probe(probe);
    }
    let mut out = Vec::new();
    let result = validator.run(read_registry(dir).expect("reader"), &mut out);
    (result, String::from_utf8(out).expect("utf-8 report"))
}

#[test]
fn sample_document_passes_with_live_links() {
    let dir = registry(&[("bern.yaml", BERN)]);
    let probe = ListProbe::new(&[]);
    let (summary, report) = run(dir.path(), Some(&probe));
    let summary = summary.expect("run");

    assert!(summary.is_success(), "report:\n{report}");
    assert_eq!(summary.checked_links, 2);
    assert_eq!(
        report,
        "[OK] bern.yaml matches the schema\n\
         \x20   url: https://boris.unibe.ch -> OK\n\
         \x20   Repo: https://github.com/unibe/boris-theme -> OK\n"
    );
    assert_eq!(
        *probe.calls.borrow(),
        vec!["https://boris.unibe.ch", "https://github.com/unibe/boris-theme"]
    );
}

#[test]
fn dead_repo_link_counts_as_error() {
    let dir = registry(&[("bern.yaml", BERN)]);
    let probe = ListProbe::new(&["https://github.com/unibe/boris-theme"]);
    let (summary, report) = run(dir.path(), Some(&probe));
    let summary = summary.expect("run");

    assert_eq!(summary.error_count(), 1);
    assert!(report.contains("    Repo: https://github.com/unibe/boris-theme -> FAIL\n"));
    assert_eq!(summary.summary_line(), "Validation finished with 1 error(s).");
}

#[rstest]
#[case::bad_status("status: active", "status: archived", "repositories/0/status")]
#[case::bad_ror("https://ror.org/02k7v4d05", "https://example.org/bern", "id")]
#[case::unknown_field("institution: University of Bern", "institution: University of Bern\nfounded: 1834", "<root>")]
#[case::bad_date("last_verified: 2024-01-01", "last_verified: yesterday", "repositories/0/last_verified")]
#[case::code_without_repo("        repo: https://github.com/unibe/boris-theme\n", "", "repositories/0/code/0")]
fn single_violation_cases(#[case] from: &str, #[case] to: &str, #[case] location: &str) {
    let doc = BERN.replace(from, to);
    let dir = registry(&[("bern.yaml", doc.as_str())]);
    let (summary, report) = run(dir.path(), None);
    let summary = summary.expect("run");

    assert_eq!(summary.invalid_documents, 1, "report:\n{report}");
    assert!(report.starts_with("[ERROR] bern.yaml is invalid:\n"), "report:\n{report}");
    let lines: Vec<&str> = report.lines().filter(|l| l.starts_with("  - ")).collect();
    assert_eq!(lines.len(), 1, "report:\n{report}");
    assert!(lines[0].starts_with(&format!("  - {location}: ")), "report:\n{report}");
}

#[test]
fn documents_are_reported_in_file_order() {
    let other = BERN
        .replace("02k7v4d05", "02s376052")
        .replace("University of Bern", "University of Geneva");
    let dir = registry(&[("z.yaml", BERN), ("a.yaml", other.as_str())]);
    let (summary, report) = run(dir.path(), None);

    assert!(summary.expect("run").is_success());
    let a = report.find("[OK] a.yaml").expect("a reported");
    let z = report.find("[OK] z.yaml").expect("z reported");
    assert!(a < z);
}

#[test]
fn copied_file_is_reported_as_duplicate_id() {
    let dir = registry(&[("bern.yaml", BERN), ("bern-copy.yaml", BERN)]);
    let (summary, report) = run(dir.path(), None);
    let summary = summary.expect("run");

    assert_eq!(summary.collisions, 1);
    assert!(
        report.contains("[ERROR] duplicate id https://ror.org/02k7v4d05 in bern-copy.yaml, bern.yaml"),
        "report:\n{report}"
    );
}

#[test]
fn corrupt_file_aborts_after_earlier_lines() {
    let dir = registry(&[("a.yaml", BERN), ("b.yaml", "id: [unclosed\n")]);
    let (result, report) = run(dir.path(), None);

    assert!(matches!(result, Err(ValidateError::Registry(_))));
    assert_eq!(report, "[OK] a.yaml matches the schema\n");
}
