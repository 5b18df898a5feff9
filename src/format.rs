//! JSON and YAML adapters for translation tables.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::TableError;
use crate::validate::{
    Entries,
    validate_entries,
};

/// Message used for every rejected text payload.
const INVALID_SOURCE: &str = "invalid source";

/// Serialization format of a translations file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Resolve a dynamic format argument.
    ///
    /// # Errors
    /// - `None` → [`TableError::MissingFormat`]
    /// - not a string → [`TableError::InvalidConfig`]
    /// - unknown name → [`TableError::UnsupportedFormat`]
    pub fn from_arg(format: Option<&Value>) -> Result<Self, TableError> {
        match format {
            None => Err(TableError::MissingFormat),
            Some(Value::String(name)) => name.parse(),
            Some(_) => Err(TableError::config("format parameter must be a string")),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl FromStr for Format {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(TableError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode and validate a translations payload.
///
/// Parse and validation failures are both reported as
/// [`TableError::InvalidData`] with the same message; the underlying cause
/// is only logged.
pub(crate) fn decode(text: &str, format: Format) -> Result<Entries, TableError> {
    let parsed: Result<Value, String> = match format {
        Format::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
    };

    let value = parsed.map_err(|cause| {
        tracing::debug!(%format, %cause, "Failed to parse translations payload");
        TableError::InvalidData(INVALID_SOURCE.to_string())
    })?;

    validate_entries(&value).map_err(|cause| {
        tracing::debug!(%format, %cause, "Parsed payload is not a translations object");
        TableError::InvalidData(INVALID_SOURCE.to_string())
    })
}

/// Encode entries in the given format.
///
/// JSON output orders source texts lexicographically and keeps each
/// language map in insertion order. YAML output orders keys at every level.
pub(crate) fn encode(entries: &Entries, format: Format) -> Result<String, TableError> {
    match format {
        Format::Json => {
            let sorted: BTreeMap<&str, _> =
                entries.iter().map(|(source, targets)| (source.as_str(), targets)).collect();
            serde_json::to_string_pretty(&sorted)
                .map_err(|e| TableError::InvalidData(e.to_string()))
        }
        Format::Yaml => {
            let sorted: BTreeMap<&str, BTreeMap<&str, &str>> = entries
                .iter()
                .map(|(source, targets)| {
                    let targets = targets
                        .iter()
                        .map(|(language, text)| (language.as_str(), text.as_str()))
                        .collect();
                    (source.as_str(), targets)
                })
                .collect();
            serde_yaml::to_string(&sorted).map_err(|e| TableError::InvalidData(e.to_string()))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::test_utils::sample_entries;

    #[rstest]
    #[case("json", Format::Json)]
    #[case("yaml", Format::Yaml)]
    fn test_format_from_str(#[case] name: &str, #[case] expected: Format) {
        assert_eq!(name.parse::<Format>(), Ok(expected));
        assert_eq!(expected.to_string(), name);
    }

    #[rstest]
    #[case("yml")]
    #[case("JSON")]
    #[case("")]
    fn test_format_from_str_unsupported(#[case] name: &str) {
        assert_eq!(name.parse::<Format>(), Err(TableError::UnsupportedFormat(name.to_string())));
    }

    #[rstest]
    #[case(None, Err(TableError::MissingFormat))]
    #[case(Some(json!(123)), Err(TableError::config("format parameter must be a string")))]
    #[case(Some(json!("foo")), Err(TableError::UnsupportedFormat("foo".to_string())))]
    #[case(Some(json!("yaml")), Ok(Format::Yaml))]
    fn test_format_from_arg(
        #[case] arg: Option<Value>,
        #[case] expected: std::result::Result<Format, TableError>,
    ) {
        assert_eq!(Format::from_arg(arg.as_ref()), expected);
    }

    #[googletest::test]
    fn test_decode_yaml_block_scalar() {
        let text = "\"hello\\nworld\":\n  es: |-\n    hola\n    mundo\n";

        let entries = decode(text, Format::Yaml).unwrap();

        expect_that!(entries["hello\nworld"].get("es"), some(eq(&"hola\nmundo".to_string())));
    }

    #[googletest::test]
    fn test_decode_yaml_flow_style() {
        let entries = decode("{hello: {it: ciao, es: hola}}", Format::Yaml).unwrap();

        expect_that!(entries["hello"].len(), eq(2));
        expect_that!(entries["hello"].get("it"), some(eq(&"ciao".to_string())));
    }

    #[rstest]
    #[case("foo", Format::Json)]
    #[case("", Format::Json)]
    #[case("[]", Format::Json)]
    #[case(r#"{"a": {"en": 1}}"#, Format::Json)]
    #[case("a: [1, 2", Format::Yaml)]
    #[case("a: b", Format::Yaml)]
    #[case("- a\n- b", Format::Yaml)]
    fn test_decode_rejects_invalid_payloads(#[case] text: &str, #[case] format: Format) {
        let expected = Err(TableError::InvalidData("invalid source".to_string()));

        assert_eq!(decode(text, format), expected);
    }

    #[rstest]
    fn test_encode_json_sorts_top_level_only() {
        let mut entries = Entries::new();
        entries.insert("zeta".to_string(), [("it".to_string(), "z".to_string())].into());
        entries.insert("alpha".to_string(), [("it".to_string(), "a".to_string())].into());
        entries.insert("mid".to_string(), [("it".to_string(), "m".to_string())].into());

        let text = encode(&entries, Format::Json).unwrap();

        let alpha = text.find("\"alpha\"").unwrap();
        let mid = text.find("\"mid\"").unwrap();
        let zeta = text.find("\"zeta\"").unwrap();
        assert!(alpha < mid && mid < zeta);
        assert!(text.contains("\n  \"alpha\": {\n    \"it\": \"a\"\n  }"));
    }

    #[rstest]
    fn test_encode_yaml_sorts_every_level() {
        let mut entries = Entries::new();
        entries.insert(
            "world".to_string(),
            [("it".to_string(), "mondo".to_string()), ("de".to_string(), "welt".to_string())]
                .into(),
        );
        entries.insert(
            "hello".to_string(),
            [("it".to_string(), "ciao".to_string()), ("de".to_string(), "hallo".to_string())]
                .into(),
        );

        let text = encode(&entries, Format::Yaml).unwrap();

        assert_eq!(text, "hello:\n  de: hallo\n  it: ciao\nworld:\n  de: welt\n  it: mondo\n");
    }

    #[rstest]
    #[case(Format::Json)]
    #[case(Format::Yaml)]
    fn test_encoded_output_decodes_to_same_entries(#[case] format: Format) {
        let entries = sample_entries();

        let text = encode(&entries, format).unwrap();

        assert_eq!(decode(&text, format).unwrap(), entries);
    }
}
