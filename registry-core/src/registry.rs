//! Registry loader: one YAML document per institution.
//!
//! # Storage layout
//!
//! ```text
//! <root>/registry/
//!   <anything>.yaml     (one institution entry per file)
//! ```
//!
//! Files are processed in lexicographic file-name order so that every run,
//! and therefore the generated catalog, sees the same sequence.
//!
//! Documents are parsed with `serde_yaml`, which resolves only the YAML 1.2
//! core schema: timestamp-looking scalars such as `2024-01-01` stay strings.
//! The raw tree is exposed as a `serde_json::Value` so that schema
//! validation sees exactly what was written, and can be decoded into a typed
//! [`InstitutionEntry`] once validation is assumed.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{io_err, RegistryError};
use crate::types::InstitutionEntry;

// ---------------------------------------------------------------------------
// 1. Discovery
// ---------------------------------------------------------------------------

/// All `*.yaml` files directly inside `dir`, sorted by file name.
///
/// Returns `RegistryError::RegistryNotFound` if `dir` does not exist.
pub fn list_registry_files(dir: &Path) -> Result<Vec<PathBuf>, RegistryError> {
    if !dir.is_dir() {
        return Err(RegistryError::RegistryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let path = entry.map_err(|e| io_err(dir, e))?.path();
        // `is_file` follows symlinks, so linked entries are listed too.
        if path.extension().is_some_and(|ext| ext == "yaml") && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

// ---------------------------------------------------------------------------
// 2. Documents
// ---------------------------------------------------------------------------

/// One parsed registry file.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryDocument {
    pub path: PathBuf,
    /// The document tree, converted from YAML.
    pub raw: Value,
}

impl RegistryDocument {
    /// File name used in reports (`eth-zurich.yaml`).
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Decode into a typed entry. Assumes the document already passed the schema.
    pub fn entry(&self) -> Result<InstitutionEntry, RegistryError> {
        InstitutionEntry::deserialize(&self.raw).map_err(|source| RegistryError::Decode {
            path: self.path.clone(),
            source,
        })
    }
}

/// Parse a single registry file.
///
/// Returns `RegistryError::Parse` (with path + line context) if malformed YAML.
pub fn load_document(path: &Path) -> Result<RegistryDocument, RegistryError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(&contents).map_err(|source| RegistryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let raw = yaml_to_json(&yaml).map_err(|reason| RegistryError::Unsupported {
        path: path.to_path_buf(),
        reason,
    })?;
    Ok(RegistryDocument {
        path: path.to_path_buf(),
        raw,
    })
}

// ---------------------------------------------------------------------------
// 3. Lazy reader
// ---------------------------------------------------------------------------

/// Iterator over the registry, parsing one file per `next()`.
#[derive(Debug)]
pub struct RegistryReader {
    files: std::vec::IntoIter<PathBuf>,
}

impl Iterator for RegistryReader {
    type Item = Result<RegistryDocument, RegistryError>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.files.next()?;
        tracing::debug!(path = %path.display(), "loading registry file");
        Some(load_document(&path))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.files.size_hint()
    }
}

/// Lazily read every registry file in `dir`, in file-name order.
pub fn read_registry(dir: &Path) -> Result<RegistryReader, RegistryError> {
    let files = list_registry_files(dir)?;
    Ok(RegistryReader {
        files: files.into_iter(),
    })
}

/// Load and decode every entry in `dir`. Stops at the first failing file.
pub fn load_entries(dir: &Path) -> Result<Vec<InstitutionEntry>, RegistryError> {
    read_registry(dir)?
        .map(|doc| doc.and_then(|d| d.entry()))
        .collect()
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Convert a `serde_yaml::Value` into the equivalent `serde_json::Value`.
fn yaml_to_json(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent number {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported mapping key: {other:?}")),
                };
                object.insert(key, yaml_to_json(v)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
