//! `#define` fragment splitting and value substitution.

use crate::error::WizardError;
use regex::{Captures, Regex};

/// Split a raw `NAME VALUE` define fragment on its first whitespace run.
/// The value is everything remaining, right-trimmed; it may be empty for
/// flag-style defines. An empty fragment has no name to isolate.
pub fn split_define(fragment: &str) -> Result<(String, String), WizardError> {
    let trimmed = fragment.trim();
    if trimmed.is_empty() {
        return Err(WizardError::MalformedDefinition {
            fragment: fragment.to_string(),
        });
    }
    match trimmed.split_once(|c: char| c.is_whitespace()) {
        Some((name, rest)) => Ok((name.to_string(), rest.trim().to_string())),
        None => Ok((trimmed.to_string(), String::new())),
    }
}

/// Rewrite the value of `#define <name> <value>` occurrences in a text
/// blob, preserving the `#define NAME` prefix (and its whitespace)
/// verbatim. Exact-name match only: the mandatory whitespace after the
/// name keeps `FOO` from touching `FOOBAR`. Returns the input unchanged
/// when the name does not occur.
pub fn substitute(text: &str, name: &str, value: &str) -> String {
    let pattern = format!(r"(#define\s+{}\s+)(\S+)", regex::escape(name));
    let re = Regex::new(&pattern).expect("escaped define name forms a valid pattern");
    re.replace_all(text, |caps: &Captures| format!("{}{}", &caps[1], value))
        .into_owned()
}
