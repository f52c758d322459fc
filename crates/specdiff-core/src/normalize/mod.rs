//! Normalizer: dialect-specific document tree → [`NormalizedSpec`].
//!
//! The walk over `info`, `paths`, path items and operations is shared. The
//! pieces that differ between OpenAPI 3.x and Swagger 2.0 (parameter type,
//! request body, response body) are picked per [`Dialect`] from the
//! `openapi3` and `swagger2` modules. Body schemas from both are flattened by
//! [`schema::flatten`].
//!
//! Only the document root, `info`, `paths`, each path item and each operation
//! are validated strictly. Anything malformed below an operation is skipped
//! and logged at debug level.

pub mod openapi3;
pub mod schema;
pub mod swagger2;

use crate::errors::{Result, SpecDiffError};
use crate::model::{
    Endpoint, FieldMap, NormalizedSpec, Operation, Parameter, ParameterLocation, Response,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON object alias used throughout the normalizer.
pub(crate) type Object = Map<String, Value>;

/// Path item keys that hold operations, in their lowercase document form.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "post", "put", "delete", "patch", "options", "head", "trace",
];

/// Source dialect of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    OpenApi3,
    Swagger2,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::OpenApi3 => "openapi3",
            Dialect::Swagger2 => "swagger2",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the dialect from the root version marker.
///
/// `openapi` is checked before `swagger`. Unquoted YAML versions arrive as
/// numbers and are accepted.
///
/// # Errors
///
/// - `NotAMapping` if the root is not a mapping
/// - `UnsupportedDialect` if neither marker names a supported version
pub fn detect_dialect(tree: &Value) -> Result<Dialect> {
    let root = tree.as_object().ok_or(SpecDiffError::NotAMapping)?;

    if root.get("openapi").is_some_and(is_openapi3) {
        return Ok(Dialect::OpenApi3);
    }
    if root.get("swagger").is_some_and(is_swagger2) {
        return Ok(Dialect::Swagger2);
    }

    let found = if let Some(v) = root.get("openapi") {
        format!("openapi {}", scalar_text(v))
    } else if let Some(v) = root.get("swagger") {
        format!("swagger {}", scalar_text(v))
    } else {
        "no 'openapi' or 'swagger' version field".to_string()
    };
    Err(SpecDiffError::UnsupportedDialect { found })
}

fn is_openapi3(version: &Value) -> bool {
    match version {
        Value::String(s) => s.starts_with('3'),
        Value::Number(n) => n.as_f64().is_some_and(|v| (3.0..4.0).contains(&v)),
        _ => false,
    }
}

fn is_swagger2(version: &Value) -> bool {
    match version {
        Value::String(s) => s == "2.0",
        Value::Number(n) => n.as_f64() == Some(2.0),
        _ => false,
    }
}

/// Normalize a decoded tree of the given dialect.
///
/// # Errors
///
/// - `NotAMapping` if the root is not a mapping
/// - `MissingKey` if `info` or `paths` is absent
/// - `Malformed` if `info`, `paths`, a path item or an operation is not a mapping
pub fn normalize(tree: &Value, dialect: Dialect) -> Result<NormalizedSpec> {
    let root = tree.as_object().ok_or(SpecDiffError::NotAMapping)?;
    let info = require_mapping(root, "info")?;
    let paths = require_mapping(root, "paths")?;

    let mut spec = NormalizedSpec::new(
        info.get("title").map(scalar_text).unwrap_or_default(),
        info.get("version").map(scalar_text).unwrap_or_default(),
    );

    for (path, item) in paths {
        let location = format!("paths.{}", path);
        let item = item.as_object().ok_or_else(|| malformed(&location, "a mapping"))?;
        let endpoint = normalize_path_item(path, item, dialect, &location)?;
        spec.endpoints.insert(path.clone(), endpoint);
    }

    tracing::debug!(
        dialect = dialect.as_str(),
        endpoint_count = spec.endpoints.len(),
        operation_count = spec.operation_count(),
        "normalized document"
    );
    Ok(spec)
}

fn normalize_path_item(
    path: &str,
    item: &Object,
    dialect: Dialect,
    location: &str,
) -> Result<Endpoint> {
    let mut endpoint = Endpoint::new(path);
    let shared = item.get("parameters");

    for (key, raw_op) in item {
        let method = key.to_ascii_lowercase();
        if !HTTP_METHODS.contains(&method.as_str()) {
            continue;
        }
        let op_location = format!("{}.{}", location, key);
        let op = raw_op
            .as_object()
            .ok_or_else(|| malformed(&op_location, "a mapping"))?;

        let params = merged_parameters(shared, op.get("parameters"), &op_location);
        let operation = match dialect {
            Dialect::OpenApi3 => openapi3::operation(op, &params, &op_location),
            Dialect::Swagger2 => swagger2::operation(op, &params, &op_location),
        };
        endpoint.operations.insert(method.to_ascii_uppercase(), operation);
    }
    Ok(endpoint)
}

/// Path-level parameters followed by operation-level ones; an operation-level
/// entry with the same `(name, in)` replaces the inherited one in place.
fn merged_parameters<'a>(
    shared: Option<&'a Value>,
    own: Option<&'a Value>,
    location: &str,
) -> Vec<&'a Object> {
    let mut merged: IndexMap<(&'a str, &'a str), &'a Object> = IndexMap::new();
    for list in [shared, own].into_iter().flatten() {
        let Some(items) = list.as_array() else {
            tracing::debug!(location, "ignoring non-sequence parameters");
            continue;
        };
        for raw in items {
            let Some(param) = raw.as_object() else {
                tracing::debug!(location, "ignoring non-mapping parameter");
                continue;
            };
            match (str_field(param, "name"), str_field(param, "in")) {
                (Some(name), Some(place)) => {
                    merged.insert((name, place), param);
                }
                _ => tracing::debug!(location, "ignoring parameter without name or location"),
            }
        }
    }
    merged.into_values().collect()
}

/// Build a canonical parameter if `in` names a parameter location.
pub(crate) fn to_parameter(
    param: &Object,
    param_type: String,
    location: &str,
) -> Option<Parameter> {
    let name = str_field(param, "name")?;
    let place = str_field(param, "in")?;
    let Some(loc) = ParameterLocation::parse(place) else {
        tracing::debug!(location, parameter = name, place, "ignoring parameter location");
        return None;
    };
    Some(Parameter {
        name: name.to_string(),
        location: loc,
        required: bool_field(param, "required"),
        param_type,
    })
}

pub(crate) fn insert_parameter(operation: &mut Operation, parameter: Parameter) {
    operation.parameters.insert(parameter.key(), parameter);
}

/// Walk `responses`, extracting each body with the dialect's rule.
pub(crate) fn collect_responses<F>(
    op: &Object,
    location: &str,
    body: F,
) -> IndexMap<String, Response>
where
    F: Fn(&Object) -> FieldMap,
{
    let mut responses = IndexMap::new();
    let Some(raw) = op.get("responses") else {
        return responses;
    };
    let Some(raw) = raw.as_object() else {
        tracing::debug!(location, "ignoring non-mapping responses");
        return responses;
    };
    for (code, value) in raw {
        let status = normalize_status(code);
        let mut response = Response::new(status.clone());
        match value.as_object() {
            Some(resp) => response.body_fields = body(resp),
            None => tracing::debug!(location, status = %status, "non-mapping response has no body"),
        }
        responses.insert(status, response);
    }
    responses
}

/// Uppercase wildcard ranges (`4xx` → `4XX`); `default` is kept as is.
pub fn normalize_status(code: &str) -> String {
    if code.eq_ignore_ascii_case("default") {
        "default".to_string()
    } else {
        code.to_ascii_uppercase()
    }
}

fn require_mapping<'a>(root: &'a Object, key: &str) -> Result<&'a Object> {
    root.get(key)
        .ok_or_else(|| SpecDiffError::MissingKey {
            key: key.to_string(),
        })?
        .as_object()
        .ok_or_else(|| malformed(key, "a mapping"))
}

fn malformed(location: &str, expected: &str) -> SpecDiffError {
    SpecDiffError::Malformed {
        location: location.to_string(),
        expected: expected.to_string(),
    }
}

pub(crate) fn str_field<'a>(object: &'a Object, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

pub(crate) fn bool_field(object: &Object, key: &str) -> bool {
    object.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Text of a scalar without JSON quoting.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
