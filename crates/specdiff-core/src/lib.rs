//! specdiff core - OpenAPI / Swagger contract change detection
//!
//! This crate turns two versions of an API description into a classified
//! list of contract changes:
//! - Decoding raw JSON/YAML bytes into a generic document tree
//! - Normalizing OpenAPI 3.x and Swagger 2.0 trees into one canonical model
//! - Structural diffing of two canonical specs into raw change events
//! - Rule-table classification of each event as breaking, potentially
//!   breaking or non-breaking
//! - A thin orchestrator that sequences the pipeline and aggregates counts

pub mod classify;
pub mod compare;
pub mod decode;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod normalize;

// Re-export commonly used types
pub use classify::{classify, classify_all};
pub use compare::{
    compare, compare_documents, compare_files, CancelFlag, CompareOptions, Comparison,
};
pub use decode::{decode, Format};
pub use diff::{diff, BodyKind, ChangeEvent, ChangeKind, Subject};
pub use errors::{DocumentSide, ExError, ExErrorKind, Result, SpecDiffError};
pub use model::{Change, ChangeCategory, ComparisonResult, NormalizedSpec, Severity, Summary};
pub use normalize::{detect_dialect, normalize, Dialect};

// Macros expand to paths under this crate
#[doc(hidden)]
pub use specdiff_core_types;
