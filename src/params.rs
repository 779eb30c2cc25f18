//! Configuration catalog: user-tunable `#define` parameters of one
//! configuration header.
//!
//! This is the most failure-sensitive builder. A block whose define cannot
//! be split is skipped with a recorded warning; a `$WIZARD` payload that
//! fails to evaluate aborts the whole file's contribution, because a
//! half-parsed annotation could misdescribe a parameter to the wizard UI.

use crate::annotation::split_informations;
use crate::comment::definition_blocks;
use crate::define::split_define;
use crate::error::{ParseWarning, WizardError};
use crate::scan::read_file;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Declared widget type of a parameter, from the `type` information key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParamType {
    Int,
    Boolean,
    Enum,
}

/// One tunable `#define` with its description and structured metadata.
/// `informations` is stored verbatim; the typed accessors cover the keys
/// the wizard layer renders.
#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
    pub description: String,
    pub informations: Map<String, Value>,
}

impl Parameter {
    pub fn param_type(&self) -> Option<ParamType> {
        match self.informations.get("type")?.as_str()? {
            "int" => Some(ParamType::Int),
            "boolean" => Some(ParamType::Boolean),
            "enum" => Some(ParamType::Enum),
            _ => None,
        }
    }

    pub fn min(&self) -> Option<i64> {
        int_info(self.informations.get("min")?)
    }

    pub fn max(&self) -> Option<i64> {
        int_info(self.informations.get("max")?)
    }

    /// Whether the value carries an `L` suffix in the generated header.
    pub fn is_long(&self) -> bool {
        self.informations
            .get("long")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Name of the enum list holding this parameter's choices.
    pub fn value_list(&self) -> Option<&str> {
        self.informations.get("value_list")?.as_str()
    }
}

fn int_info(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// All parameters of one configuration header, keyed by name, plus the
/// warnings for blocks that were skipped.
#[derive(Debug, Default, Serialize)]
pub struct ConfigurationCatalog {
    pub params: BTreeMap<String, Parameter>,
    pub warnings: Vec<ParseWarning>,
}

impl ConfigurationCatalog {
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.get(name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Parse one configuration header into a fresh catalog.
///
/// Duplicate parameter names keep the last block seen in the concatenated
/// three-style scan.
pub fn load_configuration_catalog(path: &Path) -> Result<ConfigurationCatalog, WizardError> {
    let text = read_file(path)?;
    parse_configuration(path, &text)
}

pub(crate) fn parse_configuration(
    path: &Path,
    text: &str,
) -> Result<ConfigurationCatalog, WizardError> {
    let mut catalog = ConfigurationCatalog::default();
    for block in definition_blocks(text) {
        let (name, value) = match split_define(&block.define) {
            Ok(pair) => pair,
            Err(err) => {
                log::warn!("{}: skipping block: {}", path.display(), err);
                catalog.warnings.push(ParseWarning {
                    path: path.to_path_buf(),
                    fragment: block.define.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };
        let (description, informations) =
            split_informations(&block.comment).map_err(|e| WizardError::AnnotationEvaluation {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })?;
        catalog.params.insert(
            name.clone(),
            Parameter {
                name,
                value,
                description,
                informations,
            },
        );
    }
    Ok(catalog)
}
