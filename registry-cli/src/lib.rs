//! Shared start-up for the `validate-registry` and `generate-site` binaries.

use std::path::PathBuf;

use anyhow::{Context, Result};
use registry_core::ProjectPaths;

/// Install the stderr log subscriber; `RUST_LOG` overrides the `warn` default.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Project layout under `root`, or discovered from the binary's location.
pub fn project_paths(root: Option<PathBuf>) -> Result<ProjectPaths> {
    let paths = match root {
        Some(root) => ProjectPaths::at(root),
        None => ProjectPaths::discover().context("locating the registry project")?,
    };
    tracing::debug!(root = %paths.root.display(), "using project root");
    Ok(paths)
}
