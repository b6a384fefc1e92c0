//! Error types for registry-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from loading the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// I/O failure with the path that caused it.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load; includes file path and line context from serde_yaml.
    #[error("failed to parse registry file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed but does not have the shape of an institution entry.
    #[error("failed to decode institution entry in {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// YAML construct with no JSON equivalent (complex keys, NaN, ...).
    #[error("unsupported YAML in {path}: {reason}")]
    Unsupported { path: PathBuf, reason: String },

    /// The registry directory did not exist.
    #[error("registry directory not found at {path}")]
    RegistryNotFound { path: PathBuf },

    /// No ancestor of the tool's location looked like a project root.
    #[error("cannot locate project root (no {marker} found above {start})")]
    RootNotFound { marker: String, start: PathBuf },
}

/// Convenience constructor for [`RegistryError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RegistryError {
    RegistryError::Io {
        path: path.into(),
        source,
    }
}
