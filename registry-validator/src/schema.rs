//! # Schema validation
//!
//! Validation of registry documents against the fixed JSON Schema
//! (Draft 2020-12). The schema is compiled once and reused for every
//! document of a run.
//!
//! Every violation of a document is collected, not only the first one, and
//! the list is sorted by the violating location so that reports are stable
//! across runs.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::Validator;
use serde_json::Value;

use crate::error::ValidateError;

/// Placeholder printed for violations located at the document root.
pub const ROOT_LOCATION: &str = "<root>";

/// One step of a location inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PartialOrd for PathSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathSegment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (PathSegment::Index(a), PathSegment::Index(b)) => a.cmp(b),
            (PathSegment::Key(a), PathSegment::Key(b)) => a.cmp(b),
            (PathSegment::Index(_), PathSegment::Key(_)) => Ordering::Less,
            (PathSegment::Key(_), PathSegment::Index(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(i) => write!(f, "{i}"),
        }
    }
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Location of the violating value; empty for the document root.
    pub path: Vec<PathSegment>,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    /// Slash-joined location, or [`ROOT_LOCATION`].
    pub fn location(&self) -> String {
        if self.path.is_empty() {
            return ROOT_LOCATION.to_string();
        }
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location(), self.message)
    }
}

/// Compiled registry schema.
pub struct SchemaValidator {
    path: PathBuf,
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator").field("path", &self.path).finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Read and compile the schema at `path`.
    ///
    /// # Errors
    ///
    /// `ValidateError::SchemaLoad` if the file is unreadable or not JSON,
    /// `ValidateError::SchemaBuild` if it is not a valid schema.
    pub fn from_file(path: &Path) -> Result<Self, ValidateError> {
        let content = std::fs::read_to_string(path).map_err(|e| ValidateError::SchemaLoad {
            path: path.to_path_buf(),
            reason: format!("cannot read file: {e}"),
        })?;
        let schema: Value = serde_json::from_str(&content).map_err(|e| ValidateError::SchemaLoad {
            path: path.to_path_buf(),
            reason: format!("invalid JSON: {e}"),
        })?;
        Self::from_value(path, &schema)
    }

    /// Compile an in-memory schema; `origin` is only used in error messages.
    pub fn from_value(origin: &Path, schema: &Value) -> Result<Self, ValidateError> {
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .build(schema)
            .map_err(|e| ValidateError::SchemaBuild {
                path: origin.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            path: origin.to_path_buf(),
            validator,
        })
    }

    /// All violations of `instance`, sorted by location.
    pub fn violations(&self, instance: &Value) -> Vec<Violation> {
        let mut violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                path: parse_pointer(&e.instance_path.to_string()),
                message: e.to_string(),
            })
            .collect();
        violations.sort_by(|a, b| a.path.cmp(&b.path));
        violations
    }

    /// `true` when `instance` satisfies the schema.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }
}

/// Split a JSON Pointer (`/repositories/0/status`) into segments.
fn parse_pointer(pointer: &str) -> Vec<PathSegment> {
    pointer
        .split('/')
        .skip(1)
        .map(|raw| {
            let token = raw.replace("~1", "/").replace("~0", "~");
            match token.parse::<usize>() {
                Ok(i) => PathSegment::Index(i),
                Err(_) => PathSegment::Key(token),
            }
        })
        .collect()
}
