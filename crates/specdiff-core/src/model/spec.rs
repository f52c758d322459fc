//! Canonical API description, independent of the source dialect.
//!
//! Every map is an `IndexMap` so iteration follows document order, which in
//! turn fixes the order of diff output.

use indexmap::{IndexMap, IndexSet};

/// Field path → field, flattened from a body schema.
pub type FieldMap = IndexMap<String, SchemaField>;

/// A normalized API description.
///
/// `title` and `version` are informational only and never diffed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedSpec {
    pub title: String,
    pub version: String,
    /// Keyed by the literal path template, e.g. `/users/{id}`
    pub endpoints: IndexMap<String, Endpoint>,
}

impl NormalizedSpec {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            endpoints: IndexMap::new(),
        }
    }

    /// Total number of (path, method) pairs.
    pub fn operation_count(&self) -> usize {
        self.endpoints.values().map(|e| e.operations.len()).sum()
    }
}

/// All operations declared under one path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Endpoint {
    pub path: String,
    /// Keyed by uppercase HTTP method
    pub operations: IndexMap<String, Operation>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            operations: IndexMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Operation {
    pub parameters: IndexMap<ParameterKey, Parameter>,
    pub request_body: FieldMap,
    /// Keyed by status code; wildcard ranges are uppercase (`4XX`)
    pub responses: IndexMap<String, Response>,
}

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub const ALL: [ParameterLocation; 4] = [
        ParameterLocation::Query,
        ParameterLocation::Path,
        ParameterLocation::Header,
        ParameterLocation::Cookie,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Path => "path",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }

    /// Parse an `in` value. Body-ish locations (`body`, `formData`) are not
    /// parameter locations and return `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|loc| loc.as_str() == raw)
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a parameter within an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterKey {
    pub name: String,
    pub location: ParameterLocation,
}

impl ParameterKey {
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    /// Raw type token, compared by exact string equality
    pub param_type: String,
}

impl Parameter {
    pub fn key(&self) -> ParameterKey {
        ParameterKey::new(self.name.clone(), self.location)
    }
}

/// One flattened property of a body schema.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaField {
    /// Full dotted field path
    pub name: String,
    pub field_type: String,
    pub required: bool,
    /// Enum literals as strings; empty when no enum is declared
    pub enum_values: IndexSet<String>,
    pub has_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Response {
    pub status_code: String,
    pub body_fields: FieldMap,
}

impl Response {
    pub fn new(status_code: impl Into<String>) -> Self {
        Self {
            status_code: status_code.into(),
            body_fields: FieldMap::new(),
        }
    }

    /// True for any code in the 2xx range, including the `2XX` wildcard.
    pub fn is_success(&self) -> bool {
        is_success_status(&self.status_code)
    }
}

pub fn is_success_status(code: &str) -> bool {
    code.starts_with('2')
}
