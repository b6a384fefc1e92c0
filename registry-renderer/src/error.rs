//! Error types for registry-renderer.

use thiserror::Error;

use registry_core::InstitutionId;

/// All errors that can arise while rendering pages.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The identifier has no letters or digits, so it cannot name a page.
    #[error("institution id {id:?} does not produce a usable page name")]
    EmptySlug { id: InstitutionId },
}
