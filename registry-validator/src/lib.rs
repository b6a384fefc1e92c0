//! # registry-validator
//!
//! Batch audit of the institution registry: every document is checked
//! against the JSON Schema and, optionally, every URL it references is
//! probed for liveness. Problems are reported and counted, never fatal;
//! only an unreadable document or schema aborts the run.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use registry_core::{read_registry, ProjectPaths};
//! use registry_validator::{HttpProbe, RegistryValidator, SchemaValidator};
//!
//! fn audit(paths: &ProjectPaths) -> Result<bool, Box<dyn std::error::Error>> {
//!     let schema = SchemaValidator::from_file(&paths.schema_path)?;
//!     let probe = HttpProbe::default();
//!     let summary = RegistryValidator::new(&schema)
//!         .with_probe(&probe)
//!         .run(read_registry(&paths.registry_dir)?, &mut std::io::stdout())?;
//!     Ok(summary.is_success())
//! }
//! ```

pub mod error;
pub mod links;
pub mod report;
pub mod schema;

pub use error::ValidateError;
pub use links::{HttpProbe, LinkField, LinkTarget, Probe, ProbeConfig};
pub use report::{RegistryValidator, ValidationSummary};
pub use schema::{SchemaValidator, Violation};
