//! Classifier: [`ChangeEvent`] → [`Change`].
//!
//! Classification is local to one event. The severity and message prefix
//! come from the static rule table in [`rules`]; the category comes from
//! what the event is about.

pub mod rules;

use crate::diff::{BodyKind, ChangeEvent, Subject};
use crate::model::{Change, ChangeCategory};

pub use rules::{rule_for, Rule, RuleRow, RULES};

/// Classify one event.
pub fn classify(event: &ChangeEvent) -> Change {
    let rule = rule_for(event);
    Change {
        severity: rule.severity(),
        category: category_of(event),
        path: event.path.clone(),
        method: event.method.clone(),
        field: event.field(),
        message: format!("{}: {}", rule.text(), rules::subject_text(event)),
    }
}

/// Classify a sequence of events, preserving order.
pub fn classify_all(events: &[ChangeEvent]) -> Vec<Change> {
    events.iter().map(classify).collect()
}

/// Request-body fields are `schema`; response-body fields are `response`.
pub fn category_of(event: &ChangeEvent) -> ChangeCategory {
    match &event.subject {
        Subject::Endpoint => ChangeCategory::Endpoint,
        Subject::Method => ChangeCategory::Method,
        Subject::Parameter { .. } => ChangeCategory::Parameter,
        Subject::Field {
            body: BodyKind::Request,
            ..
        } => ChangeCategory::Schema,
        Subject::Field {
            body: BodyKind::Response { .. },
            ..
        }
        | Subject::Response { .. } => ChangeCategory::Response,
    }
}
