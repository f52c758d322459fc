//! OpenAPI 3.x extraction rules.
//!
//! - parameter type from `schema.type` (or the schema of its single `content` entry)
//! - request body from `requestBody.content[<media>].schema`
//! - response body from `responses[<code>].content[<media>].schema`

use super::schema::{flatten, type_token};
use super::{collect_responses, insert_parameter, to_parameter, Object};
use crate::model::{FieldMap, Operation};
use serde_json::Value;

pub(crate) fn operation(op: &Object, params: &[&Object], location: &str) -> Operation {
    let mut operation = Operation::default();

    for param in params {
        let param_type = param
            .get("schema")
            .or_else(|| param.get("content").and_then(media_schema))
            .map(type_token)
            .unwrap_or_default();
        if let Some(parameter) = to_parameter(param, param_type, location) {
            insert_parameter(&mut operation, parameter);
        }
    }

    if let Some(body) = op.get("requestBody").and_then(Value::as_object) {
        operation.request_body = content_fields(body);
    }
    operation.responses = collect_responses(op, location, content_fields);
    operation
}

/// Flatten the schema of the preferred media type under `content`.
fn content_fields(holder: &Object) -> FieldMap {
    holder
        .get("content")
        .and_then(media_schema)
        .map(flatten)
        .unwrap_or_default()
}

/// Schema of the preferred media type: `application/json`, then the first
/// type mentioning `json`, then the first type carrying a schema.
pub fn media_schema(content: &Value) -> Option<&Value> {
    let content = content.as_object()?;
    let schema_of = |media: &str| content.get(media).and_then(|m| m.get("schema"));

    schema_of("application/json")
        .or_else(|| {
            content
                .keys()
                .filter(|media| media.contains("json"))
                .find_map(|media| schema_of(media.as_str()))
        })
        .or_else(|| content.values().find_map(|m| m.get("schema")))
}
