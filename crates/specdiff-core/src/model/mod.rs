//! Canonical data model.
//!
//! `spec` holds the dialect-independent shape both documents are normalized
//! into; `change` holds the classified output returned to callers.

pub mod change;
pub mod spec;

pub use change::{Change, ChangeCategory, ComparisonResult, Severity, Summary};
pub use spec::{
    Endpoint, FieldMap, NormalizedSpec, Operation, Parameter, ParameterKey, ParameterLocation,
    Response, SchemaField,
};
