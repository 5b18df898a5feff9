//! Structural validation of translations objects.
//!
//! A translations object maps source texts to objects that map language
//! identifiers to translated strings:
//!
//! ```json
//! { "hello": { "es": "hola", "it": "ciao" } }
//! ```

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

/// Language identifier to translated text, in insertion order.
pub type Targets = IndexMap<String, String>;

/// Source text to its per-language translations, in insertion order.
///
/// Loaded entries keep the order of the payload; entries added by lookups
/// are appended.
pub type Entries = IndexMap<String, Targets>;

/// First structural problem found in a candidate translations object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid translations at '{field_path}': {message}")]
pub struct ValidationError {
    /// Path to the offending value (e.g., `hello.es`), empty for the root
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Validate a generic value tree and build owned [`Entries`] from it.
///
/// The result never borrows from `data`, so later changes to the caller's
/// value cannot leak into a table loaded from it.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use cocorita::validate::validate_entries;
///
/// let entries = validate_entries(&json!({ "hello": { "it": "ciao" } })).unwrap();
/// assert_eq!(entries["hello"]["it"], "ciao");
///
/// assert!(validate_entries(&json!({ "a": 123 })).is_err());
/// ```
///
/// # Errors
/// - `data` is not an object
/// - a source text maps to anything but an object
/// - a translation is anything but a string
pub fn validate_entries(data: &Value) -> Result<Entries, ValidationError> {
    let Value::Object(sources) = data else {
        return Err(ValidationError::new("", format!("expected an object, found {}", kind(data))));
    };

    let mut entries = Entries::with_capacity(sources.len());
    for (source, targets) in sources {
        entries.insert(source.clone(), validate_targets(source, targets)?);
    }
    Ok(entries)
}

/// Validate the language map of a single source text.
fn validate_targets(source: &str, targets: &Value) -> Result<Targets, ValidationError> {
    let Value::Object(languages) = targets else {
        return Err(ValidationError::new(
            source,
            format!("expected an object of translations, found {}", kind(targets)),
        ));
    };

    let mut result = Targets::with_capacity(languages.len());
    for (language, text) in languages {
        match text {
            Value::String(text) => {
                result.insert(language.clone(), text.clone());
            }
            other => {
                return Err(ValidationError::new(
                    format!("{source}.{language}"),
                    format!("expected a string, found {}", kind(other)),
                ));
            }
        }
    }
    Ok(result)
}

/// Human readable name of a value's type.
pub(crate) const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
