//! Raw change events produced by the differ.

use crate::model::ParameterLocation;

/// Every kind of structural difference the differ can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangeKind {
    EndpointAdded,
    EndpointRemoved,
    MethodAdded,
    MethodRemoved,
    ParameterAdded,
    ParameterRemoved,
    ParameterRequiredChanged,
    ParameterTypeChanged,
    FieldAdded,
    FieldRemoved,
    FieldRequiredChanged,
    FieldTypeChanged,
    EnumValueAdded,
    EnumValueRemoved,
    DefaultRemoved,
    ResponseAdded,
    ResponseRemoved,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 17] = [
        ChangeKind::EndpointAdded,
        ChangeKind::EndpointRemoved,
        ChangeKind::MethodAdded,
        ChangeKind::MethodRemoved,
        ChangeKind::ParameterAdded,
        ChangeKind::ParameterRemoved,
        ChangeKind::ParameterRequiredChanged,
        ChangeKind::ParameterTypeChanged,
        ChangeKind::FieldAdded,
        ChangeKind::FieldRemoved,
        ChangeKind::FieldRequiredChanged,
        ChangeKind::FieldTypeChanged,
        ChangeKind::EnumValueAdded,
        ChangeKind::EnumValueRemoved,
        ChangeKind::DefaultRemoved,
        ChangeKind::ResponseAdded,
        ChangeKind::ResponseRemoved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::EndpointAdded => "endpoint-added",
            ChangeKind::EndpointRemoved => "endpoint-removed",
            ChangeKind::MethodAdded => "method-added",
            ChangeKind::MethodRemoved => "method-removed",
            ChangeKind::ParameterAdded => "parameter-added",
            ChangeKind::ParameterRemoved => "parameter-removed",
            ChangeKind::ParameterRequiredChanged => "parameter-required-changed",
            ChangeKind::ParameterTypeChanged => "parameter-type-changed",
            ChangeKind::FieldAdded => "field-added",
            ChangeKind::FieldRemoved => "field-removed",
            ChangeKind::FieldRequiredChanged => "field-required-changed",
            ChangeKind::FieldTypeChanged => "field-type-changed",
            ChangeKind::EnumValueAdded => "enum-value-added",
            ChangeKind::EnumValueRemoved => "enum-value-removed",
            ChangeKind::DefaultRemoved => "default-removed",
            ChangeKind::ResponseAdded => "response-added",
            ChangeKind::ResponseRemoved => "response-removed",
        }
    }

    /// The kind reported when old and new are swapped, for kinds that have one.
    ///
    /// Required and default flips are one-directional and have no inverse.
    pub fn inverse(&self) -> Option<ChangeKind> {
        use ChangeKind::*;
        Some(match self {
            EndpointAdded => EndpointRemoved,
            EndpointRemoved => EndpointAdded,
            MethodAdded => MethodRemoved,
            MethodRemoved => MethodAdded,
            ParameterAdded => ParameterRemoved,
            ParameterRemoved => ParameterAdded,
            FieldAdded => FieldRemoved,
            FieldRemoved => FieldAdded,
            EnumValueAdded => EnumValueRemoved,
            EnumValueRemoved => EnumValueAdded,
            ResponseAdded => ResponseRemoved,
            ResponseRemoved => ResponseAdded,
            ParameterTypeChanged => ParameterTypeChanged,
            FieldTypeChanged => FieldTypeChanged,
            ParameterRequiredChanged | FieldRequiredChanged | DefaultRemoved => return None,
        })
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which body a schema field belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Request,
    Response { status: String },
}

/// What inside an operation an event is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    /// The whole path
    Endpoint,
    /// One method under the path
    Method,
    Parameter {
        name: String,
        location: ParameterLocation,
    },
    /// A flattened body field, addressed by its field path
    Field { body: BodyKind, name: String },
    /// A declared response status
    Response { status: String },
}

/// A raw structural difference.
///
/// `required` is the added element's flag for `*-added` kinds and false
/// otherwise. `before`/`after` hold the values the kind is about: type
/// tokens, enum literals, `"false"`/`"true"` for required flips.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub path: String,
    pub method: Option<String>,
    pub subject: Subject,
    pub required: bool,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl ChangeEvent {
    pub fn new(kind: ChangeKind, path: impl Into<String>, subject: Subject) -> Self {
        Self {
            kind,
            path: path.into(),
            method: None,
            subject,
            required: false,
            before: None,
            after: None,
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    /// The `field` value reported on the classified change.
    pub fn field(&self) -> Option<String> {
        match &self.subject {
            Subject::Endpoint | Subject::Method => None,
            Subject::Parameter { name, .. } | Subject::Field { name, .. } => Some(name.clone()),
            Subject::Response { status } => Some(format!("Response {}", status)),
        }
    }

    /// True for fields of a response body.
    pub fn in_response_body(&self) -> bool {
        matches!(
            self.subject,
            Subject::Field {
                body: BodyKind::Response { .. },
                ..
            }
        )
    }
}
