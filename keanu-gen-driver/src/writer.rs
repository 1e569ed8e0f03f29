//! Atomic output writer.
//!
//! ## `write_output` protocol
//!
//! 1. Render content (already done by caller).
//! 2. In dry-run mode, report and stop.
//! 3. Write to `<path>.keanu-gen.tmp`.
//! 4. Rename to the final path (atomic on POSIX), replacing any existing file.

use std::path::{Path, PathBuf};

use crate::error::{io_err, GenerateError};

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written.
    Written { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

/// Atomically write `content` to `path`, overwriting whatever is there.
pub fn write_output(
    path: &Path,
    content: &str,
    dry_run: bool,
) -> Result<WriteResult, GenerateError> {
    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    let tmp = PathBuf::from(format!("{}.keanu-gen.tmp", path.display()));
    std::fs::write(&tmp, content).map_err(|e| io_err(&tmp, e))?;

    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
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
