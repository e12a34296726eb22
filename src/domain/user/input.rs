//! Per-field request input that keeps "missing" apart from "sent empty"

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One editable field of a request body.
///
/// Use with `#[serde(default)]` so that a missing key becomes `Absent`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldInput {
    /// Key not present in the body
    #[default]
    Absent,
    /// Key present with an explicit `null`
    Null,
    /// Key present with any other JSON value
    Value(Value),
}

/// What a present field holds, as far as validation cares
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FieldContent<'a> {
    Absent,
    /// `null`, `""` or whitespace only
    Empty,
    /// String with surrounding whitespace removed
    Text(&'a str),
    /// Present but not a string
    Other,
}

impl FieldInput {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Value(Value::String(value.into()))
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    pub(crate) fn content(&self) -> FieldContent<'_> {
        match self {
            Self::Absent => FieldContent::Absent,
            Self::Null => FieldContent::Empty,
            Self::Value(Value::String(s)) => match s.trim() {
                "" => FieldContent::Empty,
                trimmed => FieldContent::Text(trimmed),
            },
            Self::Value(_) => FieldContent::Other,
        }
    }
}

impl<'de> Deserialize<'de> for FieldInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            None => Self::Null,
            Some(value) => Self::Value(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        field: FieldInput,
    }

    fn parse(json: &str) -> FieldInput {
        serde_json::from_str::<Body>(json).unwrap().field
    }

    #[test]
    fn test_missing_key_is_absent() {
        assert_eq!(parse("{}"), FieldInput::Absent);
        assert!(!parse("{}").is_present());
    }

    #[test]
    fn test_null_is_present() {
        let input = parse(r#"{"field": null}"#);
        assert_eq!(input, FieldInput::Null);
        assert!(input.is_present());
        assert_eq!(input.content(), FieldContent::Empty);
    }

    #[test]
    fn test_string_values() {
        assert_eq!(parse(r#"{"field": ""}"#).content(), FieldContent::Empty);
        assert_eq!(parse(r#"{"field": "   "}"#).content(), FieldContent::Empty);
        assert_eq!(
            parse(r#"{"field": "John"}"#).content(),
            FieldContent::Text("John")
        );
    }

    #[test]
    fn test_text_is_trimmed() {
        assert_eq!(
            parse(r#"{"field": "  John Smith\t"}"#).content(),
            FieldContent::Text("John Smith")
        );
    }

    #[test]
    fn test_non_string_values() {
        assert_eq!(parse(r#"{"field": 12345}"#).content(), FieldContent::Other);
        assert_eq!(parse(r#"{"field": ["a"]}"#).content(), FieldContent::Other);
        assert_eq!(parse(r#"{"field": false}"#).content(), FieldContent::Other);
    }
}
