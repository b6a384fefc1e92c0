//! Registry core library: domain types, registry loading, project paths, errors.
//!
//! Public API surface:
//! - [`types`]: institution entry, repository platform, linked code, slugs
//! - [`registry`]: list / read / load registry files
//! - [`paths`]: [`ProjectPaths`] discovery
//! - [`error`]: [`RegistryError`]

pub mod error;
pub mod paths;
pub mod registry;
pub mod types;

pub use error::RegistryError;
pub use paths::ProjectPaths;
pub use registry::{load_entries, read_registry, RegistryDocument, RegistryReader};
pub use types::{InstitutionEntry, InstitutionId, LinkedCode, RepositoryPlatform};
