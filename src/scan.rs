//! Sorted directory walks and scoped file reads shared by the catalog
//! builders.
//!
//! Filesystem enumeration order differs across platforms, so every walk
//! sorts its paths before the builders merge results; last-wins overwrite
//! precedence is therefore deterministic. A walk only fails as a whole
//! when the root itself cannot be entered.

use crate::error::WizardError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One file that could not contribute to a catalog. The rest of the walk
/// is unaffected.
#[derive(Debug)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub error: WizardError,
}

/// A catalog assembled from a directory walk, together with the per-file
/// failures encountered along the way. Partial catalogs are preferred
/// over total failure.
#[derive(Debug)]
pub struct CatalogScan<T> {
    pub catalog: T,
    pub failures: Vec<ScanFailure>,
}

impl<T> CatalogScan<T> {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Collect every file under `root` with the given extension, sorted by
/// path. Unreadable entries below the root are logged and skipped.
pub fn find_files(root: &Path, ext: &str) -> Result<Vec<PathBuf>, WizardError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        match entry {
            Ok(e) => {
                if e.file_type().is_file()
                    && e.path().extension().and_then(|s| s.to_str()) == Some(ext)
                {
                    files.push(e.into_path());
                }
            }
            Err(e) => {
                if e.depth() == 0 {
                    return Err(WizardError::FileRead {
                        path: root.to_path_buf(),
                        source: e
                            .into_io_error()
                            .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
                    });
                }
                log::warn!("skipping unreadable entry under {}: {}", root.display(), e);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Read a file fully and release the handle. No caching: headers are
/// re-read on every scan.
pub fn read_file(path: &Path) -> Result<String, WizardError> {
    fs::read_to_string(path).map_err(|source| WizardError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}
