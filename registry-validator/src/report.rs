//! Streaming validation report.
//!
//! Line format:
//!
//! ```text
//! [OK] eth-zurich.yaml matches the schema
//!     url: https://www.research-collection.ethz.ch -> OK
//!     Repo: https://github.com/example/ingest -> FAIL
//! [ERROR] broken.yaml is invalid:
//!   - <root>: "id" is a required property
//!   - repositories/0/status: "unknown" is not one of [...]
//! [ERROR] duplicate id https://ror.org/05a28rw58 in a.yaml, b.yaml
//! ```
//!
//! Each line is written as soon as it is known. The error count is one per
//! invalid document, one per dead link and one per registry-wide collision.

use std::collections::BTreeMap;
use std::io::Write;

use registry_core::{types::slugify, RegistryDocument, RegistryError};

use crate::error::ValidateError;
use crate::links::{link_targets, Probe};
use crate::schema::SchemaValidator;

/// Tally of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub documents: usize,
    pub invalid_documents: usize,
    pub checked_links: usize,
    pub failed_links: usize,
    pub collisions: usize,
}

impl ValidationSummary {
    pub fn error_count(&self) -> usize {
        self.invalid_documents + self.failed_links + self.collisions
    }

    pub fn is_success(&self) -> bool {
        self.error_count() == 0
    }

    /// Final line printed after the per-document report.
    pub fn summary_line(&self) -> String {
        if self.is_success() {
            "Validation successful.".to_string()
        } else {
            format!("Validation finished with {} error(s).", self.error_count())
        }
    }
}

/// Runs schema and link checks over a sequence of documents.
pub struct RegistryValidator<'a> {
    schema: &'a SchemaValidator,
    probe: Option<&'a dyn Probe>,
}

impl<'a> RegistryValidator<'a> {
    /// Schema checks only.
    pub fn new(schema: &'a SchemaValidator) -> Self {
        RegistryValidator { schema, probe: None }
    }

    /// Also probe every URL with `probe`.
    pub fn with_probe(mut self, probe: &'a dyn Probe) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Validate every document, writing the report to `out`.
    ///
    /// A document that fails to load aborts the run: the error is returned
    /// after the lines already written.
    pub fn run<I, W>(&self, documents: I, out: &mut W) -> Result<ValidationSummary, ValidateError>
    where
        I: IntoIterator<Item = Result<RegistryDocument, RegistryError>>,
        W: Write,
    {
        let mut summary = ValidationSummary::default();
        let mut ids = IdIndex::default();

        for document in documents {
            let document = document?;
            summary.documents += 1;
            self.check_schema(&document, &mut summary, out)?;
            if let Some(probe) = self.probe {
                check_links(probe, &document, &mut summary, out)?;
            }
            ids.record(&document);
            out.flush()?;
        }

        summary.collisions = ids.report(out)?;
        out.flush()?;
        Ok(summary)
    }

    fn check_schema<W: Write>(
        &self,
        document: &RegistryDocument,
        summary: &mut ValidationSummary,
        out: &mut W,
    ) -> Result<(), ValidateError> {
        let name = document.file_name();
        let violations = self.schema.violations(&document.raw);
        if violations.is_empty() {
            writeln!(out, "[OK] {name} matches the schema")?;
            return Ok(());
        }
        tracing::debug!(file = %name, count = violations.len(), "schema violations");
        writeln!(out, "[ERROR] {name} is invalid:")?;
        for violation in &violations {
            writeln!(out, "  - {violation}")?;
        }
        summary.invalid_documents += 1;
        Ok(())
    }
}

fn check_links<W: Write>(
    probe: &dyn Probe,
    document: &RegistryDocument,
    summary: &mut ValidationSummary,
    out: &mut W,
) -> Result<(), ValidateError> {
    for target in link_targets(&document.raw) {
        let live = probe.is_live(&target.url);
        let verdict = if live { "OK" } else { "FAIL" };
        writeln!(out, "    {}: {} -> {verdict}", target.field.label(), target.url)?;
        out.flush()?;
        summary.checked_links += 1;
        if !live {
            summary.failed_links += 1;
        }
    }
    Ok(())
}

/// Registry-wide index of ids and slugs, in first-seen order.
#[derive(Debug, Default)]
struct IdIndex {
    files_by_id: BTreeMap<String, Vec<String>>,
    ids_by_slug: BTreeMap<String, Vec<String>>,
}

impl IdIndex {
    fn record(&mut self, document: &RegistryDocument) {
        let Some(id) = document.raw.get("id").and_then(|v| v.as_str()) else {
            return;
        };
        let files = self.files_by_id.entry(id.to_string()).or_default();
        files.push(document.file_name());
        if files.len() == 1 {
            self.ids_by_slug.entry(slugify(id)).or_default().push(id.to_string());
        }
    }

    /// Write one line per collision; returns how many there were.
    fn report<W: Write>(&self, out: &mut W) -> Result<usize, ValidateError> {
        let mut collisions = 0;
        for (id, files) in &self.files_by_id {
            if files.len() > 1 {
                writeln!(out, "[ERROR] duplicate id {id} in {}", files.join(", "))?;
                collisions += 1;
            }
        }
        for (slug, ids) in &self.ids_by_slug {
            if ids.len() > 1 {
                writeln!(out, "[ERROR] slug {slug} produced by {}", ids.join(", "))?;
                collisions += 1;
            }
        }
        Ok(collisions)
    }
}
