//! Policy data - the object the wizard builds
//!
//! A policy owns an ordered list of models. Order matters: each model may
//! consume the inputs and outputs of the model before it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Field type used when the user enters a bare name
pub const DEFAULT_FIELD_TYPE: &str = "string";

/// Valid field names: identifier characters, dots allowed after the first
static FIELD_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").unwrap());

/// A named data reference used as a model input or output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
}

fn default_field_type() -> String {
    DEFAULT_FIELD_TYPE.to_string()
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }

    /// Parse user text of the form `name` or `name:type`
    ///
    /// Returns `None` when the name is not a valid identifier or the type
    /// part is empty.
    pub fn parse(text: &str) -> Option<Field> {
        let text = text.trim();
        let (name, field_type) = match text.split_once(':') {
            Some((name, field_type)) => (name.trim(), field_type.trim()),
            None => (text, DEFAULT_FIELD_TYPE),
        };

        if field_type.is_empty() || !FIELD_NAME_REGEX.is_match(name) {
            return None;
        }

        Some(Field::new(name, field_type))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.field_type)
    }
}

/// One computational unit of a policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub inputs: Vec<Field>,
    pub outputs: Vec<Field>,
    #[serde(rename = "type")]
    pub model_type: String,
    pub configuration: String,
}

impl Model {
    /// Short one-line label for list display
    pub fn summary(&self) -> String {
        let model_type = if self.model_type.is_empty() {
            "untyped"
        } else {
            self.model_type.as_str()
        };
        format!(
            "{} ({} in → {} out)",
            model_type,
            self.inputs.len(),
            self.outputs.len()
        )
    }
}

/// The policy under construction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub name: String,
    pub description: String,
    pub models: Vec<Model>,
}

impl Policy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_parse_bare_name_uses_default_type() {
        let field = Field::parse("  price ").unwrap();
        assert_eq!(field, Field::new("price", "string"));
    }

    #[test]
    fn test_field_parse_with_type() {
        let field = Field::parse("timestamp : datetime").unwrap();
        assert_eq!(field.name, "timestamp");
        assert_eq!(field.field_type, "datetime");
    }

    #[test]
    fn test_field_parse_rejects_bad_input() {
        assert!(Field::parse("").is_none());
        assert!(Field::parse("1abc").is_none());
        assert!(Field::parse("has space").is_none());
        assert!(Field::parse("name:").is_none());
    }

    #[test]
    fn test_field_display() {
        assert_eq!(Field::new("raw", "string").to_string(), "raw:string");
    }

    #[test]
    fn test_model_serializes_type_key() {
        let model = Model {
            inputs: vec![Field::new("raw", "string")],
            outputs: vec![Field::new("text", "string")],
            model_type: "Morphline".to_string(),
            configuration: "{}".to_string(),
        };

        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["type"], "Morphline");
        assert_eq!(json["inputs"][0]["type"], "string");
    }

    #[test]
    fn test_field_deserialize_missing_type() {
        let field: Field = serde_json::from_str(r#"{"name":"raw"}"#).unwrap();
        assert_eq!(field.field_type, DEFAULT_FIELD_TYPE);
    }

    #[test]
    fn test_model_summary() {
        let model = Model {
            inputs: vec![Field::new("a", "string")],
            outputs: vec![Field::new("b", "string"), Field::new("c", "long")],
            model_type: "DateTime".to_string(),
            configuration: String::new(),
        };
        assert_eq!(model.summary(), "DateTime (1 in → 2 out)");
        assert_eq!(Model::default().summary(), "untyped (0 in → 0 out)");
    }
}
