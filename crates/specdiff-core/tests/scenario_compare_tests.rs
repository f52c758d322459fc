//! End-to-end comparisons of two documents through the orchestrator.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{openapi3, query_param, swagger2, users_get, users_post};
use serde_json::json;
use specdiff_core::{compare, ChangeCategory, Severity};

// S1: endpoint removed entirely
#[test]
fn test_scenario_endpoint_removed_is_breaking() {
    let old = openapi3(json!({"/users": {"get": {"responses": {"200": {"description": "ok"}}}}}));
    let new = openapi3(json!({}));

    let result = compare(&old, &new).expect("comparison should succeed");

    assert_eq!(result.changes.len(), 1);
    let change = &result.changes[0];
    assert_eq!(change.severity, Severity::Breaking);
    assert_eq!(change.category, ChangeCategory::Endpoint);
    assert_eq!(change.path, "/users");
    assert_eq!(change.method, None);
    assert_eq!(change.field, None);
    assert_eq!(change.message, "Endpoint removed: /users");
}

// S2: optional query parameter becomes required
#[test]
fn test_scenario_parameter_made_required_is_breaking() {
    let old = users_get(vec![query_param("limit", "integer", false)]);
    let new = users_get(vec![query_param("limit", "integer", true)]);

    let result = compare(&old, &new).unwrap();

    assert_eq!(result.changes.len(), 1);
    let change = &result.changes[0];
    assert_eq!(change.severity, Severity::Breaking);
    assert_eq!(change.category, ChangeCategory::Parameter);
    assert_eq!(change.path, "/users");
    assert_eq!(change.method.as_deref(), Some("GET"));
    assert_eq!(change.field.as_deref(), Some("limit"));
}

// S3: request body gains a required field
#[test]
fn test_scenario_required_request_field_added_is_breaking() {
    let old = users_post(json!({"name": {"type": "string"}}), &["name"]);
    let new = users_post(
        json!({"name": {"type": "string"}, "email": {"type": "string"}}),
        &["name", "email"],
    );

    let result = compare(&old, &new).unwrap();

    assert_eq!(result.changes.len(), 1);
    let change = &result.changes[0];
    assert_eq!(change.severity, Severity::Breaking);
    assert_eq!(change.category, ChangeCategory::Schema);
    assert_eq!(change.field.as_deref(), Some("email"));
    assert_eq!(change.message, "Required request body field added: email");
}

// S4: a new path is added
#[test]
fn test_scenario_new_endpoint_is_non_breaking() {
    let old = openapi3(json!({}));
    let new = openapi3(json!({"/posts": {"post": {"responses": {"201": {"description": "ok"}}}}}));

    let result = compare(&old, &new).unwrap();

    assert_eq!(result.changes.len(), 1);
    assert_eq!(result.changes[0].severity, Severity::NonBreaking);
    assert_eq!(result.changes[0].category, ChangeCategory::Endpoint);
    assert_eq!(result.changes[0].path, "/posts");
    assert_eq!(result.summary.non_breaking, 1);
}

// S5: response body gains an optional field
#[test]
fn test_scenario_response_field_added_is_non_breaking() {
    let response = |properties: serde_json::Value| {
        openapi3(json!({"/users": {"get": {"responses": {"200": {
            "description": "ok",
            "content": {"application/json": {"schema": {
                "type": "object", "properties": properties
            }}}
        }}}}}))
    };
    let old = response(json!({"items": {"type": "array", "items": {"type": "string"}}}));
    let new = response(json!({
        "items": {"type": "array", "items": {"type": "string"}},
        "total": {"type": "integer"}
    }));

    let result = compare(&old, &new).unwrap();

    assert_eq!(result.changes.len(), 1);
    let change = &result.changes[0];
    assert_eq!(change.severity, Severity::NonBreaking);
    assert_eq!(change.category, ChangeCategory::Response);
    assert_eq!(change.field.as_deref(), Some("total"));
}

// S6: parameter type changes
#[test]
fn test_scenario_parameter_type_changed_is_breaking() {
    let old = users_get(vec![query_param("limit", "integer", false)]);
    let new = users_get(vec![query_param("limit", "string", false)]);

    let result = compare(&old, &new).unwrap();

    assert_eq!(result.changes.len(), 1);
    let change = &result.changes[0];
    assert_eq!(change.severity, Severity::Breaking);
    assert_eq!(change.category, ChangeCategory::Parameter);
    assert_eq!(change.field.as_deref(), Some("limit"));
    assert_eq!(
        change.message,
        "Parameter type changed: limit (integer -> string)"
    );
}

#[test]
fn test_swagger_old_against_openapi_new() {
    // GIVEN the same API described in both dialects, with one optional
    // parameter added on the OpenAPI side
    let old = swagger2(json!({"/users": {"get": {
        "parameters": [{"name": "limit", "in": "query", "type": "integer"}],
        "responses": {"200": {"description": "ok"}}
    }}}));
    let new = users_get(vec![
        query_param("limit", "integer", false),
        query_param("offset", "integer", false),
    ]);

    // WHEN comparing across dialects
    let result = compare(&old, &new).unwrap();

    // THEN only the new parameter is reported
    assert_eq!(result.changes.len(), 1);
    assert_eq!(result.changes[0].severity, Severity::NonBreaking);
    assert_eq!(result.changes[0].field.as_deref(), Some("offset"));
    assert_eq!(
        result.changes[0].message,
        "New optional parameter: offset"
    );
}

#[test]
fn test_mixed_changes_are_grouped_and_counted() {
    let old = openapi3(json!({
        "/users": {
            "get": {
                "parameters": [{"name": "limit", "in": "query", "schema": {"type": "integer"}}],
                "responses": {
                    "200": {"content": {"application/json": {"schema": {
                        "type": "object",
                        "properties": {
                            "status": {"type": "string", "enum": ["active", "banned"]},
                            "age": {"type": "integer"}
                        }
                    }}}},
                    "404": {"description": "missing"}
                }
            },
            "delete": {"responses": {"204": {"description": "gone"}}}
        },
        "/legacy": {"get": {"responses": {"200": {"description": "ok"}}}}
    }));
    let new = openapi3(json!({
        "/users": {
            "get": {
                "parameters": [
                    {"name": "limit", "in": "query", "schema": {"type": "integer"}},
                    {"name": "tenant", "in": "header", "required": true, "schema": {"type": "string"}}
                ],
                "responses": {
                    "200": {"content": {"application/json": {"schema": {
                        "type": "object",
                        "properties": {
                            "status": {"type": "string", "enum": ["active", "pending"]},
                            "age": {"type": "string"}
                        }
                    }}}}
                }
            },
            "delete": {"responses": {"204": {"description": "gone"}}}
        },
        "/posts": {"get": {"responses": {"200": {"description": "ok"}}}}
    }));

    let result = compare(&old, &new).unwrap();

    let messages: Vec<&str> = result.changes.iter().map(|c| c.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Endpoint removed: /legacy",
            "New endpoint: /posts",
            "Required request parameter added: tenant",
            "Non-2xx response removed: 404 GET /users",
            "Enum value removed: status (banned)",
            "Enum value added: status (pending)",
            "Field type changed: age (integer -> string)",
        ]
    );

    let categories: Vec<ChangeCategory> = result.changes.iter().map(|c| c.category).collect();
    assert_eq!(
        categories,
        vec![
            ChangeCategory::Endpoint,
            ChangeCategory::Endpoint,
            ChangeCategory::Parameter,
            ChangeCategory::Response,
            ChangeCategory::Response,
            ChangeCategory::Response,
            ChangeCategory::Response,
        ]
    );
    assert_eq!(result.changes[3].field.as_deref(), Some("Response 404"));

    assert_eq!(result.summary.breaking, 4);
    assert_eq!(result.summary.potentially_breaking, 2);
    assert_eq!(result.summary.non_breaking, 1);
    assert_eq!(result.summary.total(), result.changes.len());
}

#[test]
fn test_scalar_array_item_type_change_is_breaking() {
    // GIVEN a request body array whose items change from string to integer
    let old = users_post(json!({"tags": {"type": "array", "items": {"type": "string"}}}), &[]);
    let new = users_post(json!({"tags": {"type": "array", "items": {"type": "integer"}}}), &[]);

    // WHEN comparing
    let result = compare(&old, &new).unwrap();

    // THEN the item type change is reported on the array field
    assert_eq!(result.changes.len(), 1);
    let change = &result.changes[0];
    assert_eq!(change.severity, Severity::Breaking);
    assert_eq!(change.category, ChangeCategory::Schema);
    assert_eq!(change.field.as_deref(), Some("tags"));
    assert_eq!(
        change.message,
        "Field type changed: tags (array<string> -> array<integer>)"
    );
}

#[test]
fn test_scalar_array_item_enum_removal_is_breaking() {
    let tags = |literals: serde_json::Value| {
        users_post(
            json!({"tags": {"type": "array", "items": {"type": "string", "enum": literals}}}),
            &[],
        )
    };

    let result = compare(&tags(json!(["a", "b"])), &tags(json!(["a"]))).unwrap();

    assert_eq!(result.changes.len(), 1);
    assert_eq!(result.changes[0].severity, Severity::Breaking);
    assert_eq!(result.changes[0].message, "Enum value removed: tags (b)");
    assert_eq!(result.summary.breaking, 1);
}
