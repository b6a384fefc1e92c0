//! Markdown file writer.
//!
//! Content is normalised to LF, compared with what is already on disk and,
//! when different, written to `<path>.registry.tmp` then renamed over the
//! target. Parent directories are created as needed.

use std::path::{Path, PathBuf};

use crate::error::{io_err, SiteError};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File on disk already holds exactly this content.
    Unchanged { path: PathBuf },
    /// Dry run: the file would have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// write_markdown
// ---------------------------------------------------------------------------

/// Write `content` to `path`, replacing any previous file.
pub fn write_markdown(path: &Path, content: &str) -> Result<WriteResult, SiteError> {
    atomic_write(path, content, false)
}

pub(crate) fn atomic_write(path: &Path, content: &str, dry_run: bool) -> Result<WriteResult, SiteError> {
    let tmp = PathBuf::from(format!("{}.registry.tmp", path.display()));
    atomic_write_with_tmp(path, content, dry_run, &tmp)
}

fn atomic_write_with_tmp(
    path: &Path,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, SiteError> {
    let normalized = content.replace("\r\n", "\n");
    let content = normalized.as_str();

    if matches!(std::fs::read(path), Ok(existing) if existing == content.as_bytes()) {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
