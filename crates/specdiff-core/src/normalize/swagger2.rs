//! Swagger 2.0 extraction rules.
//!
//! - parameter type from the parameter's own `type`
//! - request body from the first `in: body` parameter's `schema`, plus one
//!   field per `in: formData` parameter
//! - response body from `responses[<code>].schema`

use super::schema::{flatten, object_field, object_type};
use super::{bool_field, collect_responses, insert_parameter, str_field, to_parameter, Object};
use crate::model::{FieldMap, Operation};

pub(crate) fn operation(op: &Object, params: &[&Object], location: &str) -> Operation {
    let mut operation = Operation::default();
    let mut body: Option<FieldMap> = None;
    let mut form = FieldMap::new();

    for param in params {
        match str_field(param, "in") {
            Some("body") => {
                if body.is_none() {
                    body = Some(param.get("schema").map(flatten).unwrap_or_default());
                }
            }
            Some("formData") => {
                if let Some(name) = str_field(param, "name") {
                    form.insert(
                        name.to_string(),
                        object_field(name.to_string(), param, bool_field(param, "required")),
                    );
                }
            }
            _ => {
                let param_type = object_type(param);
                if let Some(parameter) = to_parameter(param, param_type, location) {
                    insert_parameter(&mut operation, parameter);
                }
            }
        }
    }

    let mut request_body = body.unwrap_or_default();
    request_body.extend(form);
    operation.request_body = request_body;

    operation.responses = collect_responses(op, location, |resp| {
        resp.get("schema").map(flatten).unwrap_or_default()
    });
    operation
}
