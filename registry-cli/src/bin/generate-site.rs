//! generate-site: render the registry into `docs/`.
//!
//! # Usage
//!
//! ```text
//! generate-site [--root <dir>] [--dry-run]
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use registry_site::{generate_site, WriteResult};

#[derive(Parser, Debug)]
#[command(
    name = "generate-site",
    version,
    about = "Render the institution catalog and pages from the registry",
    long_about = None,
)]
struct Args {
    /// Project root; discovered from the binary's location when omitted.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Report the files that would change without writing them.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    registry_cli::init_tracing();

    let paths = registry_cli::project_paths(args.root)?;
    let result = generate_site(&paths, args.dry_run).context("generating site")?;

    if args.dry_run {
        for write in result.writes() {
            if let WriteResult::WouldWrite { path } = write {
                println!("would write: {}", path.display());
            }
        }
    }
    tracing::info!(pages = result.pages.len(), changed = result.changed(), "site generated");
    Ok(())
}
