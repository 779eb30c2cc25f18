//! Enum-list catalog: named choice sets for `type = enum` parameters,
//! declared by `$WIZARD_LIST` annotations.

use crate::annotation::{AnnotationKind, find_payload};
use crate::comment::doc_comments;
use crate::error::WizardError;
use crate::scan::{CatalogScan, ScanFailure, find_files, read_file};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Named value lists aggregated across a source tree. Values keep their
/// declaration order; entries are not deduplicated.
pub type EnumCatalog = BTreeMap<String, Vec<String>>;

/// Scan every `*.h` under `root` for `$WIZARD_LIST` annotations and merge
/// all declared lists into one catalog, last-wins on duplicate list names
/// over the sorted walk.
pub fn load_enum_catalog(root: &Path) -> Result<CatalogScan<EnumCatalog>, WizardError> {
    let mut catalog = EnumCatalog::new();
    let mut failures = Vec::new();
    for path in find_files(root, "h")? {
        let outcome = read_file(&path).and_then(|text| enum_lists(&path, &text));
        match outcome {
            Ok(lists) => catalog.extend(lists),
            Err(error) => {
                log::warn!("{error}");
                failures.push(ScanFailure { path, error });
            }
        }
    }
    Ok(CatalogScan { catalog, failures })
}

/// Collect every list declared in one header. Unlike modules, scanning
/// does not stop at the first annotated comment: a header may declare
/// lists in several places.
pub(crate) fn enum_lists(path: &Path, text: &str) -> Result<EnumCatalog, WizardError> {
    let mut lists = EnumCatalog::new();
    for comment in doc_comments(text) {
        let Some(parsed) = find_payload(&comment, AnnotationKind::List) else {
            continue;
        };
        let (_, payload) = parsed.map_err(|e| WizardError::AnnotationEvaluation {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        for (name, value) in payload {
            lists.insert(name, string_list(path, value)?);
        }
    }
    Ok(lists)
}

fn string_list(path: &Path, value: Value) -> Result<Vec<String>, WizardError> {
    let mistyped = || WizardError::AnnotationEvaluation {
        path: path.to_path_buf(),
        detail: "list payload values must be sequences of strings".to_string(),
    };
    let Value::Array(items) = value else {
        return Err(mistyped());
    };
    items
        .into_iter()
        .map(|v| match v {
            Value::String(s) => Ok(s),
            _ => Err(mistyped()),
        })
        .collect()
}
