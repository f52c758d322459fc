//! Structural differ.
//!
//! Compares two [`NormalizedSpec`](crate::model::NormalizedSpec) values and
//! produces raw [`ChangeEvent`]s with no severity attached.
//!
//! ## Entry point
//!
//! ```ignore
//! use specdiff_core::diff::diff;
//!
//! let events = diff(&old_spec, &new_spec);
//! ```
//!
//! ## Guarantees
//!
//! - **Purity**: no side effects; the same inputs always yield the same
//!   events in the same order.
//! - **Idempotence**: diffing a spec against itself yields nothing.
//! - **Grouping**: all endpoint events come first, then method, parameter,
//!   request schema, response and response schema events. Within a group the
//!   old document's keys are walked first (removals and changes), then the
//!   new document's (additions).

pub mod engine;
pub mod model;

pub use engine::diff;
pub use model::{BodyKind, ChangeEvent, ChangeKind, Subject};
