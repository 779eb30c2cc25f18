//! Module catalog: enable-able firmware units declared by `$WIZARD_MODULE`
//! annotations in their headers.

use crate::annotation::{AnnotationKind, find_payload};
use crate::comment::doc_comments;
use crate::error::WizardError;
use crate::scan::{CatalogScan, ScanFailure, find_files, read_file};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// One firmware module: its dependencies, the configuration header that
/// tunes it, and the enable flag the wizard UI flips. `enabled` always
/// starts false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRecord {
    pub depends: Vec<String>,
    pub configuration: String,
    pub description: String,
    pub enabled: bool,
}

/// Modules aggregated across a source tree, keyed by module name.
pub type ModuleCatalog = BTreeMap<String, ModuleRecord>;

/// Scan every `*.h` under `root` for module annotations and merge them
/// into one catalog. Paths are walked in sorted order; a module name
/// declared by two files keeps the later file's record. Files that fail
/// to read or evaluate are recorded and skipped.
pub fn load_module_catalog(root: &Path) -> Result<CatalogScan<ModuleCatalog>, WizardError> {
    let mut catalog = ModuleCatalog::new();
    let mut failures = Vec::new();
    for path in find_files(root, "h")? {
        let outcome = read_file(&path).and_then(|text| module_record(&path, &text));
        match outcome {
            Ok(Some((name, record))) => {
                log::debug!("{}: module `{name}`", path.display());
                catalog.insert(name, record);
            }
            Ok(None) => {}
            Err(error) => {
                log::warn!("{error}");
                failures.push(ScanFailure { path, error });
            }
        }
    }
    Ok(CatalogScan { catalog, failures })
}

/// Extract the module declaration from one header, if it has one.
///
/// Only block-doc comments are scanned, and the first annotated comment
/// wins: a file declares at most one module, and scanning stops there.
pub(crate) fn module_record(
    path: &Path,
    text: &str,
) -> Result<Option<(String, ModuleRecord)>, WizardError> {
    for comment in doc_comments(text) {
        let Some(parsed) = find_payload(&comment, AnnotationKind::Module) else {
            continue;
        };
        let (description, payload) = parsed.map_err(|e| WizardError::AnnotationEvaluation {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        let name = required_str(path, &payload, "name")?;
        let configuration = required_str(path, &payload, "configuration")?;
        let depends = required_str_list(path, &payload, "depends")?;
        return Ok(Some((
            name,
            ModuleRecord {
                depends,
                configuration,
                description,
                enabled: false,
            },
        )));
    }
    Ok(None)
}

fn required_str(path: &Path, payload: &Map<String, Value>, key: &str) -> Result<String, WizardError> {
    match payload.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(annotation_err(path, key)),
    }
}

fn required_str_list(
    path: &Path,
    payload: &Map<String, Value>,
    key: &str,
) -> Result<Vec<String>, WizardError> {
    let Some(Value::Array(items)) = payload.get(key) else {
        return Err(annotation_err(path, key));
    };
    items
        .iter()
        .map(|v| match v {
            Value::String(s) => Ok(s.clone()),
            _ => Err(annotation_err(path, key)),
        })
        .collect()
}

fn annotation_err(path: &Path, key: &str) -> WizardError {
    WizardError::AnnotationEvaluation {
        path: path.to_path_buf(),
        detail: format!("module payload key `{key}` missing or mistyped"),
    }
}
