//! Error types for registry-validator.

use std::path::PathBuf;

use thiserror::Error;

use registry_core::RegistryError;

/// Errors that abort a validation run.
///
/// Schema violations and dead links are not errors here: they are counted in
/// the [`crate::ValidationSummary`] and the run continues.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// A registry file could not be read or parsed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// The schema file could not be read or is not JSON.
    #[error("schema load error for {path}: {reason}")]
    SchemaLoad { path: PathBuf, reason: String },

    /// The schema is JSON but not a valid Draft 2020-12 schema.
    #[error("schema build error for {path}: {reason}")]
    SchemaBuild { path: PathBuf, reason: String },

    /// Writing the report failed (closed stdout, ...).
    #[error("report output error: {0}")]
    Output(#[from] std::io::Error),
}
