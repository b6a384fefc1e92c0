//! Catalog page: one markdown table row per institution.

use registry_core::paths::institution_page_link;
use registry_core::InstitutionEntry;

use crate::error::RenderError;
use crate::page::page_slug;

const CATALOG_HEAD: &str = "# Institutions List\n\n| Institution | ROR | Repositories |\n|---|---|---|\n";

/// Catalog row linking to the institution's page.
pub fn catalog_row(entry: &InstitutionEntry) -> Result<String, RenderError> {
    let link = institution_page_link(&page_slug(entry)?);
    let names = entry
        .repositories
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!(
        "| [{}]({link}) | `{}` | {names} |",
        entry.institution, entry.id
    ))
}

/// Catalog of all entries, in the given order.
pub fn render_catalog(entries: &[InstitutionEntry]) -> Result<String, RenderError> {
    let mut out = String::from(CATALOG_HEAD);
    for entry in entries {
        out.push_str(&catalog_row(entry)?);
        out.push('\n');
    }
    Ok(out)
}
