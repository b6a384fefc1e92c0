//! Project layout resolved once at start-up.
//!
//! # Layout
//!
//! ```text
//! <root>/
//!   schema/registry.schema.json   (marker used for discovery)
//!   registry/*.yaml               (one institution per file)
//!   docs/institutions.md          (generated catalog)
//!   docs/institutions/<slug>.md   (generated pages)
//! ```
//!
//! The root is located from the tool's own location (the running executable,
//! then the directory this crate was built from), never from the caller's
//! working directory.

use std::path::{Path, PathBuf};

use crate::error::RegistryError;

/// Path of the schema file relative to the project root; also the discovery marker.
pub const SCHEMA_RELATIVE_PATH: &str = "schema/registry.schema.json";

/// Registry sub-directory relative to the project root.
pub const REGISTRY_DIR: &str = "registry";

/// Generated-site sub-directory relative to the project root.
pub const DOCS_DIR: &str = "docs";

/// Immutable set of project paths shared by both tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub registry_dir: PathBuf,
    pub schema_path: PathBuf,
    pub docs_dir: PathBuf,
}

impl ProjectPaths {
    /// Paths under an explicit root. Does no I/O.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        ProjectPaths {
            registry_dir: root.join(REGISTRY_DIR),
            schema_path: root.join(SCHEMA_RELATIVE_PATH),
            docs_dir: root.join(DOCS_DIR),
            root,
        }
    }

    /// Locate the project root from the executable, falling back to the
    /// crate's build location.
    pub fn discover() -> Result<Self, RegistryError> {
        let mut starts = Vec::new();
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            starts.push(exe_dir);
        }
        starts.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")));

        for start in &starts {
            if let Some(root) = find_root_from(start) {
                tracing::debug!(root = %root.display(), "project root discovered");
                return Ok(Self::at(root));
            }
        }
        Err(RegistryError::RootNotFound {
            marker: SCHEMA_RELATIVE_PATH.to_string(),
            start: starts.swap_remove(0),
        })
    }

    /// `docs/institutions.md`
    pub fn catalog_path(&self) -> PathBuf {
        self.docs_dir.join("institutions.md")
    }

    /// `docs/institutions/<slug>.md`
    pub fn institution_page_path(&self, slug: &str) -> PathBuf {
        self.docs_dir.join(institution_page_link(slug))
    }
}

/// Link to an institution page relative to the catalog page.
pub fn institution_page_link(slug: &str) -> String {
    format!("institutions/{slug}.md")
}

/// First ancestor of `start` (inclusive) containing [`SCHEMA_RELATIVE_PATH`].
pub fn find_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(SCHEMA_RELATIVE_PATH).is_file())
        .map(Path::to_path_buf)
}
