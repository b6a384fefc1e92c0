//! Institution page rendering.
//!
//! A page is assembled from small fragments, each ending with a newline:
//!
//! ```text
//! # <institution> 🇨🇭
//!
//! - **ROR**: `<id>`
//!
//! ## Repositories
//! ### <platform>        (one block per platform)
//! - URL: [..](..)
//! - Status: `active`
//!
//! ## Linked code repositories
//! <table> or placeholder
//! ```
//!
//! Markdown text is written as-is; only the HTML table is escaped.

use registry_core::types::present;
use registry_core::{InstitutionEntry, RepositoryPlatform};

use crate::error::RenderError;
use crate::escape::html_escape;

/// Shown instead of the table when an institution links no code.
pub const NO_LINKED_CODE: &str = "_No linked code repositories shared._";

/// Column headers of the linked code table.
pub const TABLE_HEADERS: [&str; 6] = [
    "Repository",
    "Type",
    "Source code",
    "Description",
    "Language",
    "License",
];

const TITLE_FLAG: &str = "🇨🇭";

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// Slug naming the page of `entry`.
///
/// # Errors
///
/// [`RenderError::EmptySlug`] when the id has no letters or digits.
pub fn page_slug(entry: &InstitutionEntry) -> Result<String, RenderError> {
    let slug = entry.id.slug();
    if slug.is_empty() {
        return Err(RenderError::EmptySlug {
            id: entry.id.clone(),
        });
    }
    Ok(slug)
}

/// Full markdown page for one institution.
pub fn render_institution_page(entry: &InstitutionEntry) -> String {
    let mut page = header(entry);
    page.push_str(&repositories_section(entry));
    page.push_str(&linked_code_section(entry));
    page
}

/// Title and identifier lines.
pub fn header(entry: &InstitutionEntry) -> String {
    format!(
        "# {} {TITLE_FLAG}\n\n- **ROR**: `{}`\n\n",
        entry.institution, entry.id
    )
}

/// `## Repositories` followed by one block per platform.
pub fn repositories_section(entry: &InstitutionEntry) -> String {
    let mut out = String::from("## Repositories\n");
    for platform in &entry.repositories {
        out.push_str(&platform_block(platform));
    }
    out
}

/// `### <name>`, the platform's field lines and a closing blank line.
pub fn platform_block(platform: &RepositoryPlatform) -> String {
    let mut out = format!("### {}\n", platform.name);
    for line in platform_lines(platform) {
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Field lines of a platform in display order.
///
/// Absent and empty fields are skipped; `Status` is always shown.
pub fn platform_lines(platform: &RepositoryPlatform) -> Vec<String> {
    let link = |label: &str, field: &Option<String>| {
        present(field).map(|url| format!("- {label}: [{url}]({url})"))
    };
    let code = |label: &str, field: &Option<String>| {
        present(field).map(|value| format!("- {label}: `{value}`"))
    };

    [
        link("URL", &platform.url),
        link("REST API", &platform.api_rest),
        link("OAI-PMH", &platform.oai_pmh),
        code("Software", &platform.software),
        code("DSpace version", &platform.dspace_version),
        Some(format!("- Status: `{}`", platform.status)),
        code("Contact", &platform.contact),
        code("Last verified", &platform.last_verified),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// `## Linked code repositories` with the table or the placeholder.
pub fn linked_code_section(entry: &InstitutionEntry) -> String {
    format!("## Linked code repositories\n{}\n", code_table(entry))
}

// ---------------------------------------------------------------------------
// Linked code table
// ---------------------------------------------------------------------------

/// HTML table of every linked code record, or [`NO_LINKED_CODE`].
///
/// Rows follow platform order, then record order within a platform. The
/// result has no trailing newline.
pub fn code_table(entry: &InstitutionEntry) -> String {
    let mut rows = entry.linked_code().peekable();
    if rows.peek().is_none() {
        return NO_LINKED_CODE.to_string();
    }

    let mut lines = vec![
        r#"<table class="datatable">"#.to_string(),
        "<thead><tr>".to_string(),
    ];
    lines.extend(TABLE_HEADERS.iter().map(|h| format!("<th>{}</th>", html_escape(h))));
    lines.push("</tr></thead>".to_string());
    lines.push("<tbody>".to_string());

    for (platform, code) in rows {
        let repo = present(&code.repo)
            .map(|url| {
                let url = html_escape(url);
                format!(r#"<a href="{url}" target="_blank" rel="noopener">{url}</a>"#)
            })
            .unwrap_or_default();
        let cells = [
            html_escape(&platform.name),
            tag(&code.kind, "tag type-tag"),
            repo,
            html_escape(present(&code.description).unwrap_or_default()),
            tag(&code.language, "tag lang-tag"),
            tag(&code.license, "tag license-tag"),
        ];
        lines.push("<tr>".to_string());
        lines.extend(cells.iter().map(|cell| format!("<td>{cell}</td>")));
        lines.push("</tr>".to_string());
    }

    lines.push("</tbody></table>".to_string());
    lines.join("\n")
}

fn tag(value: &Option<String>, class: &str) -> String {
    present(value)
        .map(|v| format!(r#"<span class="{class}">{}</span>"#, html_escape(v)))
        .unwrap_or_default()
}
