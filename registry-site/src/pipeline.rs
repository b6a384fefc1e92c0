//! Site generation: load the registry, render every page, write the tree.

use std::collections::BTreeMap;

use registry_core::{load_entries, InstitutionEntry, InstitutionId, ProjectPaths};
use registry_renderer::{page_slug, render_catalog, render_institution_page};

use crate::error::SiteError;
use crate::writer::{atomic_write, WriteResult};

/// Files touched by one generation run.
#[derive(Debug)]
pub struct SiteResult {
    /// One result per institution page, in registry order.
    pub pages: Vec<WriteResult>,
    pub catalog: WriteResult,
}

impl SiteResult {
    /// Results in write order: pages first, then the catalog.
    pub fn writes(&self) -> impl Iterator<Item = &WriteResult> {
        self.pages.iter().chain(std::iter::once(&self.catalog))
    }

    /// Number of files written or, in a dry run, that would be written.
    pub fn changed(&self) -> usize {
        self.writes()
            .filter(|w| !matches!(w, WriteResult::Unchanged { .. }))
            .count()
    }
}

/// Render the registry under `paths` into `docs/`.
///
/// Every page slug is checked before anything is written, so a collision
/// leaves the output tree untouched.
pub fn generate_site(paths: &ProjectPaths, dry_run: bool) -> Result<SiteResult, SiteError> {
    let entries = load_entries(&paths.registry_dir)?;
    tracing::debug!(count = entries.len(), "registry entries loaded");

    let slugs = assign_slugs(&entries)?;

    let mut pages = Vec::with_capacity(entries.len());
    for (entry, slug) in entries.iter().zip(&slugs) {
        let path = paths.institution_page_path(slug);
        pages.push(atomic_write(&path, &render_institution_page(entry), dry_run)?);
    }

    let catalog = atomic_write(&paths.catalog_path(), &render_catalog(&entries)?, dry_run)?;
    Ok(SiteResult { pages, catalog })
}

fn assign_slugs(entries: &[InstitutionEntry]) -> Result<Vec<String>, SiteError> {
    let mut seen: BTreeMap<String, &InstitutionId> = BTreeMap::new();
    let mut slugs = Vec::with_capacity(entries.len());
    for entry in entries {
        let slug = page_slug(entry)?;
        if let Some(first) = seen.insert(slug.clone(), &entry.id) {
            return Err(SiteError::DuplicateSlug {
                slug,
                first: first.clone(),
                second: entry.id.clone(),
            });
        }
        slugs.push(slug);
    }
    Ok(slugs)
}
