//! The classification rule table.
//!
//! Each [`Rule`] is one row of [`RULES`]: a severity and the fixed message
//! prefix. [`rule_for`] picks the row for an event; it is a single exhaustive
//! match, so a new [`ChangeKind`] cannot be added without a rule.

use crate::diff::{ChangeEvent, ChangeKind, Subject};
use crate::model::spec::is_success_status;
use crate::model::Severity;

/// One row of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    EndpointRemoved,
    MethodRemoved,
    RequiredParameterAdded,
    ParameterMadeRequired,
    ParameterRemoved,
    ParameterTypeChanged,
    RequiredRequestFieldAdded,
    FieldRemoved,
    FieldMadeRequired,
    FieldTypeChanged,
    EnumValueRemoved,
    SuccessResponseRemoved,
    OtherResponseRemoved,
    EnumValueAdded,
    DefaultRemoved,
    EndpointAdded,
    MethodAdded,
    OptionalParameterAdded,
    OptionalRequestFieldAdded,
    ResponseFieldAdded,
    ResponseAdded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleRow {
    pub rule: Rule,
    pub severity: Severity,
    pub text: &'static str,
}

const fn row(rule: Rule, severity: Severity, text: &'static str) -> RuleRow {
    RuleRow {
        rule,
        severity,
        text,
    }
}

use Severity::{Breaking, NonBreaking, PotentiallyBreaking};

/// Rule table, in [`Rule`] declaration order.
pub static RULES: [RuleRow; 21] = [
    row(Rule::EndpointRemoved, Breaking, "Endpoint removed"),
    row(Rule::MethodRemoved, Breaking, "HTTP method removed"),
    row(Rule::RequiredParameterAdded, Breaking, "Required request parameter added"),
    row(Rule::ParameterMadeRequired, Breaking, "Parameter made required"),
    row(Rule::ParameterRemoved, Breaking, "Parameter removed"),
    row(Rule::ParameterTypeChanged, Breaking, "Parameter type changed"),
    row(Rule::RequiredRequestFieldAdded, Breaking, "Required request body field added"),
    row(Rule::FieldRemoved, Breaking, "Request/response field removed"),
    row(Rule::FieldMadeRequired, Breaking, "Field made required"),
    row(Rule::FieldTypeChanged, Breaking, "Field type changed"),
    row(Rule::EnumValueRemoved, Breaking, "Enum value removed"),
    row(Rule::SuccessResponseRemoved, Breaking, "Success response (2xx) removed"),
    row(Rule::OtherResponseRemoved, PotentiallyBreaking, "Non-2xx response removed"),
    row(Rule::EnumValueAdded, PotentiallyBreaking, "Enum value added"),
    row(Rule::DefaultRemoved, PotentiallyBreaking, "Default value removed"),
    row(Rule::EndpointAdded, NonBreaking, "New endpoint"),
    row(Rule::MethodAdded, NonBreaking, "New HTTP method"),
    row(Rule::OptionalParameterAdded, NonBreaking, "New optional parameter"),
    row(Rule::OptionalRequestFieldAdded, NonBreaking, "New optional request field"),
    row(Rule::ResponseFieldAdded, NonBreaking, "New response field"),
    row(Rule::ResponseAdded, NonBreaking, "New response status"),
];

impl Rule {
    pub fn row(self) -> &'static RuleRow {
        &RULES[self as usize]
    }

    pub fn severity(self) -> Severity {
        self.row().severity
    }

    pub fn text(self) -> &'static str {
        self.row().text
    }
}

/// Select the rule for an event.
///
/// Response-body field additions are checked before the required flag: a
/// new response field never breaks callers, whatever its required flag.
pub fn rule_for(event: &ChangeEvent) -> Rule {
    match event.kind {
        ChangeKind::EndpointRemoved => Rule::EndpointRemoved,
        ChangeKind::EndpointAdded => Rule::EndpointAdded,
        ChangeKind::MethodRemoved => Rule::MethodRemoved,
        ChangeKind::MethodAdded => Rule::MethodAdded,
        ChangeKind::ParameterAdded if event.required => Rule::RequiredParameterAdded,
        ChangeKind::ParameterAdded => Rule::OptionalParameterAdded,
        ChangeKind::ParameterRemoved => Rule::ParameterRemoved,
        ChangeKind::ParameterRequiredChanged => Rule::ParameterMadeRequired,
        ChangeKind::ParameterTypeChanged => Rule::ParameterTypeChanged,
        ChangeKind::FieldAdded if event.in_response_body() => Rule::ResponseFieldAdded,
        ChangeKind::FieldAdded if event.required => Rule::RequiredRequestFieldAdded,
        ChangeKind::FieldAdded => Rule::OptionalRequestFieldAdded,
        ChangeKind::FieldRemoved => Rule::FieldRemoved,
        ChangeKind::FieldRequiredChanged => Rule::FieldMadeRequired,
        ChangeKind::FieldTypeChanged => Rule::FieldTypeChanged,
        ChangeKind::EnumValueRemoved => Rule::EnumValueRemoved,
        ChangeKind::EnumValueAdded => Rule::EnumValueAdded,
        ChangeKind::DefaultRemoved => Rule::DefaultRemoved,
        ChangeKind::ResponseAdded => Rule::ResponseAdded,
        ChangeKind::ResponseRemoved => match &event.subject {
            Subject::Response { status } if is_success_status(status) => {
                Rule::SuccessResponseRemoved
            }
            _ => Rule::OtherResponseRemoved,
        },
    }
}

/// Text naming what changed, appended to the rule text.
pub fn subject_text(event: &ChangeEvent) -> String {
    let method = event.method.as_deref().unwrap_or_default();
    match (&event.subject, event.kind) {
        (Subject::Endpoint, _) => event.path.clone(),
        (Subject::Method, _) => format!("{} {}", method, event.path),
        (Subject::Response { status }, _) => format!("{} {} {}", status, method, event.path),
        (
            Subject::Parameter { name, .. } | Subject::Field { name, .. },
            ChangeKind::ParameterTypeChanged | ChangeKind::FieldTypeChanged,
        ) => format!(
            "{} ({} -> {})",
            name,
            display_type(event.before.as_deref()),
            display_type(event.after.as_deref())
        ),
        (Subject::Field { name, .. }, ChangeKind::EnumValueRemoved) => {
            format!("{} ({})", name, event.before.as_deref().unwrap_or_default())
        }
        (Subject::Field { name, .. }, ChangeKind::EnumValueAdded) => {
            format!("{} ({})", name, event.after.as_deref().unwrap_or_default())
        }
        (Subject::Parameter { name, .. } | Subject::Field { name, .. }, _) => name.clone(),
    }
}

fn display_type(token: Option<&str>) -> &str {
    match token {
        Some(t) if !t.is_empty() => t,
        _ => "untyped",
    }
}
