//! Core types shared across specdiff facilities
//!
//! This crate provides foundational types used by both the error and
//! logging facilities of `specdiff-core`:
//!
//! - **Correlation types**: ComparisonId
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::ComparisonId;
