//! validate-registry: check every registry file against the schema and
//! probe the URLs it references.
//!
//! # Usage
//!
//! ```text
//! validate-registry [--root <dir>] [--skip-links] [--timeout-secs <n>]
//! ```
//!
//! Exits 1 when any document is invalid, any link is dead or two entries
//! share an id or page slug.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use registry_core::read_registry;
use registry_validator::{HttpProbe, ProbeConfig, RegistryValidator, SchemaValidator};

#[derive(Parser, Debug)]
#[command(
    name = "validate-registry",
    version,
    about = "Validate registry files against the schema and check their links",
    long_about = None,
)]
struct Args {
    /// Project root; discovered from the binary's location when omitted.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Skip URL liveness checks.
    #[arg(long)]
    skip_links: bool,

    /// Per-request timeout for link checks, in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    registry_cli::init_tracing();

    let paths = registry_cli::project_paths(args.root)?;
    let schema = SchemaValidator::from_file(&paths.schema_path).context("loading registry schema")?;
    let probe = HttpProbe::new(&ProbeConfig {
        timeout: Duration::from_secs(args.timeout_secs),
        ..ProbeConfig::default()
    });

    let mut validator = RegistryValidator::new(&schema);
    if !args.skip_links {
        validator = validator.with_probe(&probe);
    }

    let documents = read_registry(&paths.registry_dir).context("reading registry directory")?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = validator
        .run(documents, &mut out)
        .context("validating registry")?;
    tracing::debug!(?summary, "validation finished");

    if summary.is_success() {
        writeln!(out, "\n{}", summary.summary_line())?;
        return Ok(());
    }
    out.flush()?;
    eprintln!("\n{}", summary.summary_line());
    std::process::exit(1);
}
