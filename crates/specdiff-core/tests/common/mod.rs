use serde_json::{json, Value};

/// Wrap a `paths` mapping in a minimal OpenAPI 3.0 document
#[allow(dead_code)]
pub fn openapi3(paths: Value) -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {"title": "Users API", "version": "1.0.0"},
        "paths": paths
    })
}

/// Wrap a `paths` mapping in a minimal Swagger 2.0 document
#[allow(dead_code)]
pub fn swagger2(paths: Value) -> Value {
    json!({
        "swagger": "2.0",
        "info": {"title": "Users API", "version": "1.0.0"},
        "paths": paths
    })
}

/// An OpenAPI 3 object schema with the given properties and required names
#[allow(dead_code)]
pub fn object_schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "required": required,
        "properties": properties
    })
}

/// An OpenAPI 3 JSON request body
#[allow(dead_code)]
pub fn json_body(schema: Value) -> Value {
    json!({"content": {"application/json": {"schema": schema}}})
}

/// An OpenAPI 3 query parameter
#[allow(dead_code)]
pub fn query_param(name: &str, ty: &str, required: bool) -> Value {
    json!({"name": name, "in": "query", "required": required, "schema": {"type": ty}})
}

/// `GET /users` with the given parameters and a plain 200 response
#[allow(dead_code)]
pub fn users_get(params: Vec<Value>) -> Value {
    openapi3(json!({
        "/users": {
            "get": {
                "parameters": params,
                "responses": {"200": {"description": "ok"}}
            }
        }
    }))
}

/// `POST /users` whose JSON body requires the given fields
#[allow(dead_code)]
pub fn users_post(properties: Value, required: &[&str]) -> Value {
    openapi3(json!({
        "/users": {
            "post": {
                "requestBody": json_body(object_schema(properties, required)),
                "responses": {"201": {"description": "created"}}
            }
        }
    }))
}
