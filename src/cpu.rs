//! CPU definition loading.
//!
//! A `.cdef` file is a restricted line-oriented script: blank lines and
//! `#` comments are ignored, every other line is either `KEY = <literal>`
//! or `include("other.cdef")`. Includes evaluate into the same namespace,
//! which is how a chip-specific definition layers on top of a CPU-family
//! template. Nothing in a definition file is ever executed.

use crate::error::WizardError;
use crate::literal::{Statement, parse_statement};
use crate::scan::{CatalogScan, ScanFailure, find_files};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Includes deeper than this indicate a template cycle.
const MAX_INCLUDE_DEPTH: usize = 16;

/// One discovered CPU: the attribute namespace after template layering,
/// plus the identity fields derived from the definition file itself.
#[derive(Debug, Clone, Serialize)]
pub struct CpuDefinition {
    /// Filename-derived identifier (substring before the first `.`).
    pub name: String,
    /// Path of the definition file this CPU was loaded from.
    pub definition_path: PathBuf,
    pub attrs: BTreeMap<String, Value>,
}

impl CpuDefinition {
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }
}

/// Attribute template every definition starts from. A definition file
/// only needs to assign what differs from these defaults.
fn default_attrs() -> BTreeMap<String, Value> {
    BTreeMap::from([
        ("TOOLCHAIN".to_string(), json!("")),
        ("CPU_DESC".to_string(), json!([])),
        ("CPU_TAGS".to_string(), json!([])),
    ])
}

/// Discover and load every `*.cdef` under `root`, sorted by path.
/// A definition that fails to load is recorded and skipped.
pub fn load_cpu_definitions(root: &Path) -> Result<CatalogScan<Vec<CpuDefinition>>, WizardError> {
    let mut cpus = Vec::new();
    let mut failures = Vec::new();
    for path in find_files(root, "cdef")? {
        match load_definition(&path) {
            Ok(cpu) => {
                log::debug!("{}: cpu `{}`", path.display(), cpu.name);
                cpus.push(cpu);
            }
            Err(error) => {
                log::warn!("{error}");
                failures.push(ScanFailure { path, error });
            }
        }
    }
    Ok(CatalogScan {
        catalog: cpus,
        failures,
    })
}

/// Load one definition file on top of the default template.
pub fn load_definition(path: &Path) -> Result<CpuDefinition, WizardError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut attrs = default_attrs();
    evaluate(path, dir, &mut attrs, 0)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| definition_err(path, "definition path has no file name"))?;
    let name = file_name
        .split('.')
        .next()
        .unwrap_or(&file_name)
        .to_string();
    Ok(CpuDefinition {
        name,
        definition_path: path.to_path_buf(),
        attrs,
    })
}

/// Evaluate one file's statements into `attrs`. Include targets resolve
/// relative to the root definition's directory, matching how family
/// templates are laid out next to the chips that use them.
fn evaluate(
    path: &Path,
    dir: &Path,
    attrs: &mut BTreeMap<String, Value>,
    depth: usize,
) -> Result<(), WizardError> {
    if depth > MAX_INCLUDE_DEPTH {
        return Err(definition_err(path, "include depth exceeded, template cycle?"));
    }
    let text = fs::read_to_string(path).map_err(|e| definition_err(path, &e.to_string()))?;
    for (lineno, line) in text.lines().enumerate() {
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }
        let statement = parse_statement(stripped)
            .map_err(|e| definition_err(path, &format!("line {}: {e}", lineno + 1)))?;
        match statement {
            Statement::Assign(key, value) => {
                attrs.insert(key, value);
            }
            Statement::Include(target) => {
                evaluate(&dir.join(target), dir, attrs, depth + 1)?;
            }
        }
    }
    Ok(())
}

fn definition_err(path: &Path, reason: &str) -> WizardError {
    WizardError::DefinitionLoad {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
