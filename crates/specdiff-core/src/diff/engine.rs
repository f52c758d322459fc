//! Diff computation engine.
//!
//! The entry point is [`diff`]. Each category is a set comparison over keys:
//! paths, methods, `(name, location)` parameter keys, field paths and status
//! codes. Events are collected into one bucket per category and concatenated
//! at the end, which yields the fixed global grouping.

use crate::diff::model::{BodyKind, ChangeEvent, ChangeKind, Subject};
use crate::model::{Endpoint, FieldMap, NormalizedSpec, Operation, SchemaField};

/// Per-category event buckets, concatenated in declaration order.
#[derive(Default)]
struct Buckets {
    endpoints: Vec<ChangeEvent>,
    methods: Vec<ChangeEvent>,
    parameters: Vec<ChangeEvent>,
    request_schema: Vec<ChangeEvent>,
    responses: Vec<ChangeEvent>,
    response_schema: Vec<ChangeEvent>,
}

impl Buckets {
    fn into_events(self) -> Vec<ChangeEvent> {
        let mut events = self.endpoints;
        events.extend(self.methods);
        events.extend(self.parameters);
        events.extend(self.request_schema);
        events.extend(self.responses);
        events.extend(self.response_schema);
        events
    }
}

/// Compute the structural differences from `old` to `new`.
pub fn diff(old: &NormalizedSpec, new: &NormalizedSpec) -> Vec<ChangeEvent> {
    let mut buckets = Buckets::default();

    for (path, old_endpoint) in &old.endpoints {
        match new.endpoints.get(path) {
            Some(new_endpoint) => diff_endpoint(path, old_endpoint, new_endpoint, &mut buckets),
            None => buckets.endpoints.push(ChangeEvent::new(
                ChangeKind::EndpointRemoved,
                path,
                Subject::Endpoint,
            )),
        }
    }
    for path in new.endpoints.keys() {
        if !old.endpoints.contains_key(path) {
            buckets.endpoints.push(ChangeEvent::new(
                ChangeKind::EndpointAdded,
                path,
                Subject::Endpoint,
            ));
        }
    }

    buckets.into_events()
}

fn diff_endpoint(path: &str, old: &Endpoint, new: &Endpoint, buckets: &mut Buckets) {
    for (method, old_op) in &old.operations {
        match new.operations.get(method) {
            Some(new_op) => {
                let site = Site { path, method };
                diff_operation(&site, old_op, new_op, buckets);
            }
            None => buckets.methods.push(
                ChangeEvent::new(ChangeKind::MethodRemoved, path, Subject::Method)
                    .with_method(method),
            ),
        }
    }
    for method in new.operations.keys() {
        if !old.operations.contains_key(method) {
            buckets.methods.push(
                ChangeEvent::new(ChangeKind::MethodAdded, path, Subject::Method)
                    .with_method(method),
            );
        }
    }
}

/// Address of the operation being compared.
struct Site<'a> {
    path: &'a str,
    method: &'a str,
}

impl Site<'_> {
    fn event(&self, kind: ChangeKind, subject: Subject) -> ChangeEvent {
        ChangeEvent::new(kind, self.path, subject).with_method(self.method)
    }
}

fn diff_operation(site: &Site<'_>, old: &Operation, new: &Operation, buckets: &mut Buckets) {
    diff_parameters(site, old, new, &mut buckets.parameters);
    diff_fields(
        site,
        &BodyKind::Request,
        &old.request_body,
        &new.request_body,
        &mut buckets.request_schema,
    );

    for (status, old_response) in &old.responses {
        match new.responses.get(status) {
            Some(new_response) => diff_fields(
                site,
                &BodyKind::Response {
                    status: status.clone(),
                },
                &old_response.body_fields,
                &new_response.body_fields,
                &mut buckets.response_schema,
            ),
            None => buckets.responses.push(site.event(
                ChangeKind::ResponseRemoved,
                Subject::Response {
                    status: status.clone(),
                },
            )),
        }
    }
    for status in new.responses.keys() {
        if !old.responses.contains_key(status) {
            buckets.responses.push(site.event(
                ChangeKind::ResponseAdded,
                Subject::Response {
                    status: status.clone(),
                },
            ));
        }
    }
}

fn diff_parameters(site: &Site<'_>, old: &Operation, new: &Operation, out: &mut Vec<ChangeEvent>) {
    for (key, old_param) in &old.parameters {
        let subject = Subject::Parameter {
            name: key.name.clone(),
            location: key.location,
        };
        let Some(new_param) = new.parameters.get(key) else {
            out.push(
                site.event(ChangeKind::ParameterRemoved, subject)
                    .with_before(old_param.param_type.as_str()),
            );
            continue;
        };
        if !old_param.required && new_param.required {
            out.push(
                site.event(ChangeKind::ParameterRequiredChanged, subject.clone())
                    .with_before("false")
                    .with_after("true"),
            );
        }
        if old_param.param_type != new_param.param_type {
            out.push(
                site.event(ChangeKind::ParameterTypeChanged, subject)
                    .with_before(old_param.param_type.as_str())
                    .with_after(new_param.param_type.as_str()),
            );
        }
    }
    for (key, new_param) in &new.parameters {
        if !old.parameters.contains_key(key) {
            out.push(
                site.event(
                    ChangeKind::ParameterAdded,
                    Subject::Parameter {
                        name: key.name.clone(),
                        location: key.location,
                    },
                )
                .with_required(new_param.required)
                .with_after(new_param.param_type.as_str()),
            );
        }
    }
}

fn diff_fields(
    site: &Site<'_>,
    body: &BodyKind,
    old: &FieldMap,
    new: &FieldMap,
    out: &mut Vec<ChangeEvent>,
) {
    let subject = |name: &str| Subject::Field {
        body: body.clone(),
        name: name.to_string(),
    };

    for (name, old_field) in old {
        match new.get(name) {
            Some(new_field) => diff_field(site, subject(name), old_field, new_field, out),
            None => out.push(
                site.event(ChangeKind::FieldRemoved, subject(name))
                    .with_before(old_field.field_type.as_str()),
            ),
        }
    }
    for (name, new_field) in new {
        if !old.contains_key(name) {
            out.push(
                site.event(ChangeKind::FieldAdded, subject(name))
                    .with_required(new_field.required)
                    .with_after(new_field.field_type.as_str()),
            );
        }
    }
}

fn diff_field(
    site: &Site<'_>,
    subject: Subject,
    old: &SchemaField,
    new: &SchemaField,
    out: &mut Vec<ChangeEvent>,
) {
    if !old.required && new.required {
        out.push(
            site.event(ChangeKind::FieldRequiredChanged, subject.clone())
                .with_before("false")
                .with_after("true"),
        );
    }
    if old.field_type != new.field_type {
        out.push(
            site.event(ChangeKind::FieldTypeChanged, subject.clone())
                .with_before(old.field_type.as_str())
                .with_after(new.field_type.as_str()),
        );
    }
    for literal in old.enum_values.difference(&new.enum_values) {
        out.push(
            site.event(ChangeKind::EnumValueRemoved, subject.clone())
                .with_before(literal.as_str()),
        );
    }
    for literal in new.enum_values.difference(&old.enum_values) {
        out.push(
            site.event(ChangeKind::EnumValueAdded, subject.clone())
                .with_after(literal.as_str()),
        );
    }
    if old.has_default && !new.has_default {
        out.push(site.event(ChangeKind::DefaultRemoved, subject));
    }
}
