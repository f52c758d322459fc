//! Body schema flattening.
//!
//! A body schema becomes a flat map from field path to [`SchemaField`]:
//!
//! - object properties are joined with `.` (`address.city`)
//! - arrays add no segment; their `items` fields sit under the array's path
//!   (`users`, `users.email`)
//! - an array of scalars is one field typed `array<item>` (`array<string>`)
//!   that carries the item's `enum` and `default`
//! - a `$ref` is opaque: the field gets type `object` and no children
//! - inline `allOf` members are merged before descending
//!
//! The walk follows document order, so the same schema always yields the
//! same map in the same order.

use super::Object;
use crate::model::{FieldMap, SchemaField};
use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

/// Flatten a body schema. Non-object roots yield no fields; an array root
/// flattens through its items.
pub fn flatten(schema: &Value) -> FieldMap {
    let mut fields = FieldMap::new();
    descend(schema, "", &mut fields);
    fields
}

/// Type token of a schema.
///
/// `$ref` → `object`; a `type` string as is; a `type` array joined with `|`;
/// otherwise inferred from `properties` (`object`), `items` (`array`) or the
/// first typed `allOf` member, else empty. Arrays of scalars with a typed
/// item become `array<item>`.
pub fn type_token(schema: &Value) -> String {
    schema.as_object().map(object_type).unwrap_or_default()
}

pub(crate) fn object_type(schema: &Object) -> String {
    let own = declared_type(schema);
    match scalar_items(schema).map(object_type) {
        Some(item) if !item.is_empty() => format!("array<{}>", item),
        _ => own,
    }
}

/// Item schema of an array whose items have no properties of their own.
/// Object items are flattened into child fields instead.
fn scalar_items(schema: &Object) -> Option<&Object> {
    if declared_type(schema) != "array" {
        return None;
    }
    let items = schema.get("items")?.as_object()?;
    if !items.contains_key("$ref") && !ObjectShape::of(items).properties.is_empty() {
        return None;
    }
    Some(items)
}

/// Innermost item schema, following nested arrays of scalars.
fn element(schema: &Object) -> &Object {
    let mut current = schema;
    while let Some(items) = scalar_items(current) {
        current = items;
    }
    current
}

fn declared_type(schema: &Object) -> String {
    if schema.contains_key("$ref") {
        return "object".to_string();
    }
    match schema.get("type") {
        Some(Value::String(t)) => return t.clone(),
        Some(Value::Array(types)) => {
            return types
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("|")
        }
        _ => {}
    }
    if schema.contains_key("properties") {
        return "object".to_string();
    }
    if schema.contains_key("items") {
        return "array".to_string();
    }
    schema
        .get("allOf")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .map(type_token)
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

/// Declared enum literals as strings; non-strings use their JSON text.
pub fn enum_values(schema: &Value) -> IndexSet<String> {
    schema.as_object().map(object_enum).unwrap_or_default()
}

fn object_enum(schema: &Object) -> IndexSet<String> {
    schema
        .get("enum")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .map(|literal| match literal {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

/// Build a field from a property schema.
pub fn field(name: String, schema: &Value, required: bool) -> SchemaField {
    match schema.as_object() {
        Some(object) => object_field(name, object, required),
        None => SchemaField {
            name,
            required,
            ..SchemaField::default()
        },
    }
}

/// Build a field from a schema-like object. Swagger `formData` parameters
/// carry `type`, `enum` and `default` directly and go through here too.
pub(crate) fn object_field(name: String, schema: &Object, required: bool) -> SchemaField {
    let item = element(schema);
    let mut enum_values = object_enum(schema);
    enum_values.extend(object_enum(item));
    SchemaField {
        name,
        field_type: object_type(schema),
        required,
        enum_values,
        has_default: schema.contains_key("default") || item.contains_key("default"),
    }
}

/// Properties and required names of an object schema with inline `allOf`
/// members merged in. Later members override earlier ones on name clashes.
struct ObjectShape<'a> {
    properties: IndexMap<&'a str, &'a Value>,
    required: IndexSet<&'a str>,
}

impl<'a> ObjectShape<'a> {
    fn of(schema: &'a Object) -> Self {
        let mut shape = ObjectShape {
            properties: IndexMap::new(),
            required: IndexSet::new(),
        };
        shape.absorb(schema);
        shape
    }

    fn absorb(&mut self, schema: &'a Object) {
        if let Some(props) = schema.get("properties").and_then(Value::as_object) {
            for (name, prop) in props {
                self.properties.insert(name.as_str(), prop);
            }
        }
        if let Some(required) = schema.get("required").and_then(Value::as_array) {
            self.required
                .extend(required.iter().filter_map(Value::as_str));
        }
        if let Some(members) = schema.get("allOf").and_then(Value::as_array) {
            for member in members.iter().filter_map(Value::as_object) {
                if !member.contains_key("$ref") {
                    self.absorb(member);
                }
            }
        }
    }
}

fn descend(schema: &Value, prefix: &str, out: &mut FieldMap) {
    let Some(object) = schema.as_object() else {
        return;
    };
    if object.contains_key("$ref") {
        return;
    }

    let shape = ObjectShape::of(object);
    if !shape.properties.is_empty() {
        for (name, prop) in &shape.properties {
            let path = join(prefix, name);
            let required = shape.required.contains(name);
            out.insert(path.clone(), field(path.clone(), prop, required));
            descend(prop, &path, out);
        }
    } else if let Some(items) = object.get("items") {
        descend(items, prefix, out);
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
