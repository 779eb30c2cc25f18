//! Source-tree identification.
//!
//! A usable shared source tree carries a `VERSION` file at its root; the
//! wizard layer uses these probes to validate the directory the user
//! picked before any catalog scan runs.

use crate::error::WizardError;
use std::path::Path;

/// Whether `dir` looks like a shared source tree.
pub fn is_source_tree(dir: &Path) -> bool {
    dir.join("VERSION").is_file()
}

/// First line of the tree's `VERSION` file, trimmed.
pub fn source_tree_version(dir: &Path) -> Result<String, WizardError> {
    let path = dir.join("VERSION");
    let text = std::fs::read_to_string(&path)
        .map_err(|source| WizardError::FileRead { path, source })?;
    Ok(text.lines().next().unwrap_or("").trim().to_string())
}
