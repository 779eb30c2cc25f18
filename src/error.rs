//! Error taxonomy for catalog loading and header parsing.
//!
//! Directory-level loaders never abort wholesale on a single file: per-file
//! failures are surfaced through [`crate::scan::ScanFailure`] and the walk
//! continues. A partial catalog is always preferred over no catalog.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WizardError {
    /// A `#define` fragment whose name token could not be isolated.
    /// The offending block is skipped and recorded as a warning.
    #[error("malformed definition: {fragment:?}")]
    MalformedDefinition { fragment: String },

    /// A structured annotation payload failed to evaluate. Fatal for the
    /// contribution of the file it was found in.
    #[error("annotation evaluation failed in {}: {detail}", path.display())]
    AnnotationEvaluation { path: PathBuf, detail: String },

    /// A CPU definition file is missing or its script did not evaluate.
    #[error("cannot load definition {}: {reason}", path.display())]
    DefinitionLoad { path: PathBuf, reason: String },

    /// Local I/O failure while reading a header or walking a tree.
    #[error("cannot read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WizardError {
    /// The path the error was raised for, when it carries one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            WizardError::MalformedDefinition { .. } => None,
            WizardError::AnnotationEvaluation { path, .. }
            | WizardError::DefinitionLoad { path, .. }
            | WizardError::FileRead { path, .. } => Some(path),
        }
    }
}

/// A malformed block that was skipped while building a configuration
/// catalog. Kept alongside the catalog so callers can report it.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ParseWarning {
    pub path: PathBuf,
    pub fragment: String,
    pub reason: String,
}
