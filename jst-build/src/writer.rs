//! Hash-gated atomic writer for destination files.
//!
//! 1. Hash the assembled content (SHA-256).
//! 2. Hash the current destination, if any → skip if identical.
//! 3. Write to `<dest>.jst.tmp`.
//! 4. Rename onto the destination (atomic on POSIX).
//!
//! A destination is therefore either left untouched or replaced whole.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{io_err, BuildError};

// ---------------------------------------------------------------------------
// Write outcome
// ---------------------------------------------------------------------------

/// What happened to a destination file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WriteOutcome {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped; its content already matches.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
    /// Nothing compiled; the destination was not written.
    Empty { path: PathBuf },
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Written { path }
            | WriteOutcome::Unchanged { path }
            | WriteOutcome::WouldWrite { path }
            | WriteOutcome::Empty { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

/// Atomically write `content` to `path` unless it is already there.
pub fn atomic_write(path: &Path, content: &str, dry_run: bool) -> Result<WriteOutcome, BuildError> {
    let tmp = tmp_path(path);
    atomic_write_with_tmp(path, content, dry_run, &tmp)
}

/// Sibling temp file used while writing `path`.
pub fn tmp_path(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.jst.tmp", path.display()))
}

fn atomic_write_with_tmp(
    path: &Path,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteOutcome, BuildError> {
    if let Some(existing) = existing_digest(path)? {
        if existing == digest(content.as_bytes()) {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteOutcome::Unchanged {
                path: path.to_path_buf(),
            });
        }
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteOutcome::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("File {} created.", path.display());
    Ok(WriteOutcome::Written {
        path: path.to_path_buf(),
    })
}

fn existing_digest(path: &Path) -> Result<Option<String>, BuildError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(digest(&bytes))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_err(path, e)),
    }
}

fn digest(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
