use std::str::FromStr;

use serde_json::Value;

use crate::error::{Error, ParseFailure, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadFormat {
    Json,
    Yaml,
}

impl FromStr for PayloadFormat {
    type Err = ParseFailure;

    fn from_str(s: &str) -> Result<Self, ParseFailure> {
        match s.to_lowercase().as_str() {
            "json" => Ok(PayloadFormat::Json),
            "yaml" | "yml" => Ok(PayloadFormat::Yaml),
            other => Err(ParseFailure::Unsupported(other.to_string())),
        }
    }
}

impl PayloadFormat {
    pub fn parse(self, text: &str) -> Result<Value, ParseFailure> {
        Ok(match self {
            PayloadFormat::Json => serde_json::from_str::<Value>(text)?,
            PayloadFormat::Yaml => yaml_to_json(serde_yaml::from_str(text)?),
        })
    }
}

/// Parses `text` in the named format.
///
/// Errors name the lowercased payload type so the failure can be traced back to the input.
#[tracing::instrument(skip(text))]
pub fn parse(payload: &str, text: &str) -> Result<Value> {
    let payload = payload.to_lowercase();
    payload
        .parse::<PayloadFormat>()
        .and_then(|format| format.parse(text))
        .map_err(|source| {
            tracing::error!("{source}");
            Error::Parse { payload, source }
        })
}

/// Converts a YAML value into the JSON data model.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                // NaN and infinities have no JSON representation
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (key_text(k), yaml_to_json(v)))
                .collect(),
        ),
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn key_text(key: serde_yaml::Value) -> String {
    match yaml_to_json(key) {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
