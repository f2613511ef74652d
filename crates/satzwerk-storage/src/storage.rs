// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filesystem storage — uploads/ and results/ under one root directory.
//
// Every write goes to a temporary file in the destination directory and is
// renamed into place, so a reader polling `result_exists` never sees a
// half-written file.

use std::io::Write;
use std::path::{Path, PathBuf};

use satzwerk_core::error::{Result, SatzwerkError};
use tracing::{debug, info, instrument};

use crate::integrity::{hash_bytes, verify_file};

/// Write `data` to `path` atomically: temp file in the same directory, fsync,
/// then rename over the destination.
#[instrument(skip(data), fields(path = %path.display(), bytes_len = data.len()))]
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".satzwerk-")
        .suffix(".part")
        .tempfile_in(dir)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| SatzwerkError::Io(e.error))?;

    debug!("file published");
    Ok(())
}

/// Storage collaborator backed by two directories.
#[derive(Debug, Clone)]
pub struct FileStorage {
    uploads: PathBuf,
    results: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) `root/uploads` and `root/results`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let uploads = root.join("uploads");
        let results = root.join("results");
        std::fs::create_dir_all(&uploads)?;
        std::fs::create_dir_all(&results)?;
        info!(root = %root.display(), "storage opened");
        Ok(Self { uploads, results })
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads
    }

    pub fn results_dir(&self) -> &Path {
        &self.results
    }

    /// Store uploaded bytes under `name` and return the stored path.
    ///
    /// The stored copy is read back and must hash to the same digest as
    /// `data`; otherwise the call fails with `IntegrityMismatch`.
    pub fn save_upload(&self, data: &[u8], name: &str) -> Result<PathBuf> {
        let path = self.uploads.join(sanitize_name(name)?);
        let digest = hash_bytes(data);
        write_atomic(&path, data)?;
        verify_file(&path, &digest)?;
        info!(path = %path.display(), bytes_len = data.len(), sha256 = %digest, "upload saved");
        Ok(path)
    }

    /// Path a result named `name` lives at (whether or not it exists yet).
    pub fn result_path(&self, name: &str) -> Result<PathBuf> {
        Ok(self.results.join(sanitize_name(name)?))
    }

    /// Read a finished result.
    pub fn read_result(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.result_path(name)?;
        std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                SatzwerkError::Storage(format!("result '{name}' not found"))
            }
            _ => SatzwerkError::Io(e),
        })
    }

    /// Whether a finished result named `name` exists.
    pub fn result_exists(&self, name: &str) -> bool {
        self.result_path(name)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }
}

/// Reduce a caller-supplied name to its final path component.
fn sanitize_name(name: &str) -> Result<&str> {
    let file_name = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty());
    file_name.ok_or_else(|| SatzwerkError::Storage(format!("invalid file name '{name}'")))
}
