//! `{{ name }}` placeholder substitution.

use std::fmt::Display;
use std::sync::LazyLock;

use regex::{
    NoExpand,
    Regex,
};
use serde_json::{
    Number,
    Value,
};

use crate::error::TableError;
use crate::validate::kind;

/// Pattern every replacement name must match.
pub const REPLACEMENT_KEY_PATTERN: &str = "^[a-zA-Z0-9_]+$";

/// Compiled [`REPLACEMENT_KEY_PATTERN`].
#[allow(clippy::expect_used)]
static REPLACEMENT_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(REPLACEMENT_KEY_PATTERN).expect("replacement key pattern is valid")
});

/// Ordered placeholder values for [`TranslationTable::tr_with`](crate::TranslationTable::tr_with).
///
/// Values are converted to strings when they are added. Names are checked
/// later, when the replacements are applied.
///
/// # Examples
/// ```
/// use cocorita::Replacements;
///
/// let replacements = Replacements::new().with("num", 3).with("name", "Ada");
/// assert_eq!(replacements.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    /// `(name, value)` pairs in insertion order
    pairs: Vec<(String, String)>,
}

impl Replacements {
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a replacement, stringifying `value` immediately.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        self.pairs.push((name.into(), value.to_string()));
    }

    /// Builder form of [`Replacements::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Build replacements from a dynamic map argument.
    ///
    /// Pairs keep the order of the map. Strings are used as-is, numbers and
    /// booleans in their natural text form, with whole floats written without
    /// a fraction (`3.0` → `3`).
    ///
    /// # Errors
    /// [`TableError::InvalidInput`] if `value` is not an object or one of its
    /// values is `null`, an array or an object.
    pub fn from_value(value: &Value) -> Result<Self, TableError> {
        let Value::Object(map) = value else {
            return Err(TableError::input("replaces parameter must be a map"));
        };

        let mut replacements = Self::new();
        for (name, value) in map {
            match value {
                Value::String(text) => replacements.insert(name.as_str(), text),
                Value::Number(number) => replacements.insert(name.as_str(), number_text(number)),
                Value::Bool(flag) => replacements.insert(name.as_str(), flag),
                other => {
                    return Err(TableError::input(format!(
                        "replace parameter '{name}' must be a string, number or boolean, found {}",
                        kind(other)
                    )));
                }
            }
        }
        Ok(replacements)
    }

    /// Check every name and compile its placeholder pattern.
    ///
    /// Nothing is applied unless all names are valid.
    pub(crate) fn compile(&self) -> Result<Vec<CompiledReplacement<'_>>, TableError> {
        self.pairs
            .iter()
            .map(|(name, value)| {
                if !REPLACEMENT_KEY.is_match(name) {
                    return Err(TableError::InvalidReplacementKey { key: name.clone() });
                }
                let pattern = format!(r"\{{\{{\s*{}\s*\}}\}}", regex::escape(name));
                let regex = Regex::new(&pattern)
                    .map_err(|_| TableError::InvalidReplacementKey { key: name.clone() })?;
                Ok(CompiledReplacement { regex, value })
            })
            .collect()
    }
}

/// Text form of a number, dropping the `.0` of whole floats.
fn number_text(number: &Number) -> String {
    let text = number.to_string();
    match text.strip_suffix(".0") {
        Some("-0") => "0".to_string(),
        Some(whole) => whole.to_string(),
        None => text,
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Replacements {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut replacements = Self::new();
        for (name, value) in iter {
            replacements.insert(name, value);
        }
        replacements
    }
}

/// A validated replacement ready to apply.
#[derive(Debug)]
pub(crate) struct CompiledReplacement<'a> {
    /// Matches `{{ name }}` with any inner whitespace
    regex: Regex,
    value: &'a str,
}

/// Substitute every occurrence of each placeholder, one replacement at a
/// time in the given order.
pub(crate) fn apply(text: &str, replacements: &[CompiledReplacement<'_>]) -> String {
    let mut result = text.to_string();
    for replacement in replacements {
        result = replacement.regex.replace_all(&result, NoExpand(replacement.value)).into_owned();
    }
    result
}
