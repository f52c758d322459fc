//! Decoder boundary.
//!
//! Turns raw document bytes into the generic `serde_json::Value` tree the
//! normalizer works on. JSON is decoded with `serde_json`; YAML with
//! `serde_yaml`, then converted into the same tree so downstream code never
//! sees two value types.

use crate::errors::{Result, SpecDiffError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::str::FromStr;

/// Default upper bound on a single document, in bytes (10 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Explicit document format hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Yaml => "YAML",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            other => Err(format!("unknown format '{}', expected json or yaml", other)),
        }
    }
}

/// Decode a document into a generic tree.
///
/// Without a hint, JSON is attempted first and YAML second. When both fail the
/// error reported is the JSON one for text that looks like a JSON object and
/// the YAML one otherwise.
///
/// # Errors
///
/// - `EmptyDocument` if the input is empty or whitespace only
/// - `Parse` if the input is not UTF-8 or not valid in the chosen format
/// - `NotAMapping` if the decoded root is not a mapping
pub fn decode(bytes: &[u8], hint: Option<Format>) -> Result<Value> {
    let text = std::str::from_utf8(bytes).map_err(|e| SpecDiffError::Parse {
        format: "UTF-8".to_string(),
        reason: e.to_string(),
    })?;

    if text.trim().is_empty() {
        return Err(SpecDiffError::EmptyDocument);
    }

    let tree = match hint {
        Some(Format::Json) => decode_json(text)?,
        Some(Format::Yaml) => decode_yaml(text)?,
        None => sniff(text)?,
    };

    if !tree.is_object() {
        return Err(SpecDiffError::NotAMapping);
    }
    Ok(tree)
}

/// Decode a document after checking it against a size limit.
///
/// # Errors
///
/// - `TooLarge` if `bytes` is longer than `max_bytes`
/// - anything [`decode`] returns
pub fn decode_limited(bytes: &[u8], hint: Option<Format>, max_bytes: usize) -> Result<Value> {
    if bytes.len() > max_bytes {
        return Err(SpecDiffError::TooLarge {
            size: bytes.len(),
            limit: max_bytes,
        });
    }
    decode(bytes, hint)
}

fn sniff(text: &str) -> Result<Value> {
    match decode_json(text) {
        Ok(tree) => Ok(tree),
        Err(json_err) => match decode_yaml(text) {
            Ok(tree) => Ok(tree),
            Err(_) if text.trim_start().starts_with('{') => Err(json_err),
            Err(yaml_err) => Err(yaml_err),
        },
    }
}

fn decode_json(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| parse_error(Format::Json, e))
}

fn decode_yaml(text: &str) -> Result<Value> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| parse_error(Format::Yaml, e))?;
    yaml_to_json(yaml)
}

fn parse_error(format: Format, err: impl std::fmt::Display) -> SpecDiffError {
    SpecDiffError::Parse {
        format: format.label().to_string(),
        reason: err.to_string(),
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> Result<Value> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => yaml_number(&n),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, item) in mapping {
                object.insert(yaml_key(key)?, yaml_to_json(item)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        // NaN and infinities have no JSON number form
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(n.to_string()))
    }
}

/// Scalar keys are stringified so `200:` and `"200":` address the same entry.
fn yaml_key(key: serde_yaml::Value) -> Result<String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => yaml_key(tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => Err(SpecDiffError::Parse {
            format: Format::Yaml.label().to_string(),
            reason: "mapping keys must be scalars".to_string(),
        }),
    }
}
