use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

use crate::error::TableError;

/// What [`TranslationTable::tr`](crate::TranslationTable::tr) returns when
/// the active language has no translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultTarget {
    /// The source text itself
    Source,
    /// An empty string
    #[default]
    Blank,
}

impl DefaultTarget {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Blank => "blank",
        }
    }
}

impl FromStr for DefaultTarget {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source" => Ok(Self::Source),
            "blank" => Ok(Self::Blank),
            _ => Err(TableError::config("invalid defaultTarget option")),
        }
    }
}

impl fmt::Display for DefaultTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for [`TranslationTable::new`](crate::TranslationTable::new).
///
/// Field names follow the camelCase convention of translation tool
/// configuration files:
///
/// ```json
/// { "language": "it", "initialize": ["en"], "defaultTarget": "source" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableOptions {
    /// Initial active language
    pub language: Option<String>,

    /// Languages that always receive an entry.
    ///
    /// When a looked up source text has no translation for one of these
    /// languages, the source text itself is stored for it.
    pub initialize: Option<Vec<String>>,

    /// Result of a lookup that misses. Defaults to [`DefaultTarget::Blank`].
    pub default_target: Option<DefaultTarget>,
}

impl TableOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn initialize<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initialize = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn default_target(mut self, default_target: DefaultTarget) -> Self {
        self.default_target = Some(default_target);
        self
    }

    /// Read options from a dynamic options object.
    ///
    /// Absent and `null` fields keep their defaults. Unknown fields are
    /// ignored.
    ///
    /// # Errors
    /// [`TableError::InvalidConfig`] when:
    /// - `value` is neither an object nor `null`
    /// - `language` is not a string
    /// - `initialize` is not an array of strings
    /// - `defaultTarget` is not `"source"` or `"blank"`
    pub fn from_value(value: &Value) -> Result<Self, TableError> {
        let options = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(options) => options,
            _ => return Err(TableError::config("options must be an object")),
        };

        let language = match options.get("language") {
            None | Some(Value::Null) => None,
            Some(Value::String(language)) => Some(language.clone()),
            Some(_) => return Err(TableError::config("options.language must be a string")),
        };

        let initialize = match options.get("initialize") {
            None | Some(Value::Null) => None,
            Some(Value::Array(languages)) => Some(string_array(languages).ok_or_else(|| {
                TableError::config("options.initialize must be a string array")
            })?),
            Some(_) => return Err(TableError::config("options.initialize must be a string array")),
        };

        let default_target = match options.get("defaultTarget") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name.parse()?),
            Some(_) => return Err(TableError::config("invalid defaultTarget option")),
        };

        Ok(Self { language, initialize, default_target })
    }
}

/// Collect an array of strings, or `None` if any element is not a string.
fn string_array(values: &[Value]) -> Option<Vec<String>> {
    values.iter().map(|value| value.as_str().map(str::to_string)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn from_value_full_options() {
        let value = json!({
            "language": "it",
            "initialize": ["en", "de"],
            "defaultTarget": "source"
        });

        let options = TableOptions::from_value(&value).unwrap();

        assert_that!(options.language, some(eq("it")));
        assert_that!(options.initialize, some(elements_are![eq("en"), eq("de")]));
        assert_eq!(options.default_target, Some(DefaultTarget::Source));
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!({}))]
    #[case(json!({ "language": null, "initialize": null, "defaultTarget": null }))]
    #[case(json!({ "unknown": 1 }))]
    fn from_value_defaults(#[case] value: Value) {
        assert_that!(TableOptions::from_value(&value), ok(eq(&TableOptions::default())));
    }

    #[rstest]
    #[case(json!("it"), "options must be an object")]
    #[case(json!({ "language": 1 }), "options.language must be a string")]
    #[case(json!({ "language": ["it"] }), "options.language must be a string")]
    #[case(json!({ "initialize": "en" }), "options.initialize must be a string array")]
    #[case(json!({ "initialize": ["en", 1] }), "options.initialize must be a string array")]
    #[case(json!({ "defaultTarget": "target" }), "invalid defaultTarget option")]
    #[case(json!({ "defaultTarget": "" }), "invalid defaultTarget option")]
    #[case(json!({ "defaultTarget": true }), "invalid defaultTarget option")]
    fn from_value_invalid(#[case] value: Value, #[case] message: &str) {
        assert_that!(
            TableOptions::from_value(&value),
            err(eq(&TableError::InvalidConfig(message.to_string())))
        );
    }

    #[rstest]
    fn builder_sets_fields() {
        let options = TableOptions::new()
            .language("es")
            .initialize(["en"])
            .default_target(DefaultTarget::Blank);

        assert_that!(options.language, some(eq("es")));
        assert_that!(options.initialize, some(elements_are![eq("en")]));
        assert_eq!(options.default_target, Some(DefaultTarget::Blank));
    }

    #[rstest]
    fn deserialize_camel_case() {
        let options: TableOptions =
            serde_json::from_str(r#"{"defaultTarget": "blank", "initialize": []}"#).unwrap();

        assert_eq!(options.default_target, Some(DefaultTarget::Blank));
        assert_that!(options.initialize, some(is_empty()));
        assert!(options.language.is_none());
    }

    #[rstest]
    fn default_target_round_trips_through_str() {
        for target in [DefaultTarget::Source, DefaultTarget::Blank] {
            assert_eq!(target.to_string().parse::<DefaultTarget>(), Ok(target));
        }
    }
}
