//! Error types for registry-site.

use std::path::PathBuf;

use thiserror::Error;

use registry_core::{InstitutionId, RegistryError};
use registry_renderer::RenderError;

/// All errors that can arise while generating the site.
#[derive(Debug, Error)]
pub enum SiteError {
    /// An error from the registry loader.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// An error from the page renderer.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Two institutions would be written to the same page.
    #[error("institutions {first} and {second} both map to page slug {slug:?}")]
    DuplicateSlug {
        slug: String,
        first: InstitutionId,
        second: InstitutionId,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SiteError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SiteError {
    SiteError::Io {
        path: path.into(),
        source,
    }
}
