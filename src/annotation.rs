//! Annotation marker detection inside doxygen comments.
//!
//! A comment may carry a structured payload introduced by a literal marker:
//! `$WIZARD` for parameter metadata, `$WIZARD_MODULE` for a module
//! declaration, `$WIZARD_LIST` for named enum value lists. Text before the
//! marker is the human description; text from one past the `$` onward is a
//! named data-literal assignment evaluated by [`crate::literal`].

use crate::literal::{LiteralError, parse_assignment};
use serde_json::{Map, Value};

/// The three annotation kinds and the variable each payload must bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Parameter,
    Module,
    List,
}

impl AnnotationKind {
    pub fn marker(self) -> &'static str {
        match self {
            AnnotationKind::Parameter => "$WIZARD",
            AnnotationKind::Module => "$WIZARD_MODULE",
            AnnotationKind::List => "$WIZARD_LIST",
        }
    }

    fn var(self) -> &'static str {
        // The bound variable is the marker without its `$`.
        &self.marker()[1..]
    }
}

/// Split a parameter comment into `(description, informations)`.
///
/// Without a `$WIZARD` marker the whole trimmed comment is the description
/// and the informations mapping is empty. With one, the payload must
/// evaluate to a mapping; failure is fatal for the file being parsed.
pub fn split_informations(comment: &str) -> Result<(String, Map<String, Value>), LiteralError> {
    match comment.find(AnnotationKind::Parameter.marker()) {
        None => Ok((comment.trim().to_string(), Map::new())),
        Some(idx) => {
            let value = parse_assignment(&comment[idx + 1..], AnnotationKind::Parameter.var())?;
            Ok((comment[..idx].trim().to_string(), into_mapping(value)?))
        }
    }
}

/// Look for a module or list annotation in a comment. `None` when the
/// marker is absent; `Some(Err(..))` when the payload does not evaluate.
/// On success yields the free-text description and the payload mapping.
pub fn find_payload(
    comment: &str,
    kind: AnnotationKind,
) -> Option<Result<(String, Map<String, Value>), LiteralError>> {
    let idx = comment.find(kind.marker())?;
    let parsed = parse_assignment(&comment[idx + 1..], kind.var()).and_then(into_mapping);
    Some(parsed.map(|map| (comment[..idx].trim().to_string(), map)))
}

fn into_mapping(value: Value) -> Result<Map<String, Value>, LiteralError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(LiteralError {
            offset: 0,
            message: format!("annotation payload must be a mapping, found {other}"),
        }),
    }
}
