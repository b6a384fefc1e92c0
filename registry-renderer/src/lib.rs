//! # registry-renderer
//!
//! Pure functions turning typed registry entries into markdown pages: one
//! page per institution and a catalog linking to them. Nothing here touches
//! the filesystem.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use registry_core::load_entries;
//! use registry_renderer::{page_slug, render_catalog, render_institution_page};
//!
//! fn preview(dir: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
//!     let entries = load_entries(dir)?;
//!     for entry in &entries {
//!         println!("{}.md: {} bytes", page_slug(entry)?, render_institution_page(entry).len());
//!     }
//!     println!("{}", render_catalog(&entries)?);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod escape;
pub mod page;

pub use catalog::{catalog_row, render_catalog};
pub use error::RenderError;
pub use escape::html_escape;
pub use page::{code_table, page_slug, platform_block, render_institution_page};
