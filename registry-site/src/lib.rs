//! # registry-site
//!
//! Writes the rendered registry to disk.
//!
//! Call [`generate_site`] to load every registry file, render the institution
//! pages and the catalog, and write them below the project's `docs/`
//! directory. [`write_markdown`] is the single-file primitive it uses.

pub mod error;
pub mod pipeline;
pub mod writer;

pub use error::SiteError;
pub use pipeline::{generate_site, SiteResult};
pub use writer::{write_markdown, WriteResult};
