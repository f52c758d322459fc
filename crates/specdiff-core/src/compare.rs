//! Orchestrator: decode → detect dialect → normalize → diff → classify.
//!
//! The old document is fully decoded and normalized before the new one is
//! touched, so the first error reported is always the old document's if both
//! are broken. Every error leaving this module is an [`ExError`] tagged with
//! the side that caused it and the comparison id.
//!
//! ## Logging
//!
//! - `log_op_start!` / `log_op_end!` / `log_op_error!` around each comparison,
//!   carrying `comparison_id`
//! - per-side dialect and endpoint counts at debug level

use crate::classify::classify_all;
use crate::decode::{decode_limited, Format, DEFAULT_MAX_DOCUMENT_BYTES};
use crate::diff::diff;
use crate::errors::{DocumentSide, ExError, ExErrorKind, SpecDiffError};
use crate::model::{ComparisonResult, NormalizedSpec};
use crate::normalize::{detect_dialect, normalize};
use crate::{log_op_end, log_op_error, log_op_start};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use specdiff_core_types::ComparisonId;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Options for comparing raw documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareOptions {
    /// Documents longer than this are rejected before decoding
    pub max_document_bytes: usize,
    /// Format of the old document; `None` sniffs JSON then YAML
    pub old_format: Option<Format>,
    /// Format of the new document; `None` sniffs JSON then YAML
    pub new_format: Option<Format>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            old_format: None,
            new_format: None,
        }
    }
}

impl CompareOptions {
    fn format(&self, side: DocumentSide) -> Option<Format> {
        match side {
            DocumentSide::Old => self.old_format,
            DocumentSide::New => self.new_format,
        }
    }
}

/// Cooperative cancellation shared between a caller and a running comparison.
///
/// Checked between stages; a cancelled comparison never returns a partial
/// result.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A single comparison run.
///
/// [`compare`] and [`compare_documents`] cover the common case; build a
/// `Comparison` directly to observe its id or to cancel it.
#[derive(Debug, Clone, Default)]
pub struct Comparison {
    id: ComparisonId,
    cancel: CancelFlag,
}

impl Comparison {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an id handed in by the caller instead of a fresh one.
    pub fn with_id(mut self, id: ComparisonId) -> Self {
        self.id = id;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn id(&self) -> &ComparisonId {
        &self.id
    }

    /// Compare two decoded document trees.
    ///
    /// # Errors
    ///
    /// - `UnsupportedDialect` / `Structure` for the first broken document
    /// - `Cancelled` if the cancel flag is raised between stages
    pub fn run(&self, old_tree: &Value, new_tree: &Value) -> Result<ComparisonResult, ExError> {
        self.logged(|| {
            let old = self.normalize_side(old_tree, DocumentSide::Old)?;
            let new = self.normalize_side(new_tree, DocumentSide::New)?;
            self.finish(&old, &new)
        })
    }

    /// Decode and compare two raw documents.
    ///
    /// # Errors
    ///
    /// - `InputTooLarge` if a document exceeds `options.max_document_bytes`
    /// - `Parse` if a document is empty, malformed or not a mapping
    /// - `UnsupportedDialect` / `Structure` as for [`Comparison::run`]
    /// - `Cancelled` if the cancel flag is raised between stages
    pub fn run_documents(
        &self,
        old_bytes: &[u8],
        new_bytes: &[u8],
        options: &CompareOptions,
    ) -> Result<ComparisonResult, ExError> {
        self.logged(|| {
            let old = self.load_side(old_bytes, DocumentSide::Old, options)?;
            let new = self.load_side(new_bytes, DocumentSide::New, options)?;
            self.finish(&old, &new)
        })
    }

    /// Read, decode and compare two documents on disk.
    ///
    /// Each file is read right before it is decoded, so a broken old document
    /// is reported even when the new path cannot be read.
    ///
    /// # Errors
    ///
    /// - `Io` if a file cannot be read
    /// - everything [`Comparison::run_documents`] reports
    pub fn run_files(
        &self,
        old_path: &Path,
        new_path: &Path,
        options: &CompareOptions,
    ) -> Result<ComparisonResult, ExError> {
        self.logged(|| {
            let old_bytes = self.read_side(old_path, DocumentSide::Old)?;
            let old = self.load_side(&old_bytes, DocumentSide::Old, options)?;
            let new_bytes = self.read_side(new_path, DocumentSide::New)?;
            let new = self.load_side(&new_bytes, DocumentSide::New, options)?;
            self.finish(&old, &new)
        })
    }

    fn logged<F>(&self, run: F) -> Result<ComparisonResult, ExError>
    where
        F: FnOnce() -> Result<ComparisonResult, ExError>,
    {
        log_op_start!("compare", comparison_id = %self.id);
        let start = Instant::now();

        let result = run().map_err(|e| {
            log_op_error!(
                "compare",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                comparison_id = %self.id
            );
            e
        })?;

        log_op_end!(
            "compare",
            duration_ms = start.elapsed().as_millis() as u64,
            comparison_id = %self.id,
            change_count = result.changes.len(),
            breaking_count = result.summary.breaking
        );
        Ok(result)
    }

    fn read_side(&self, path: &Path, side: DocumentSide) -> Result<Vec<u8>, ExError> {
        self.checkpoint("read")?;
        std::fs::read(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("read_document")
                .with_side(side)
                .with_location(path.display().to_string())
                .with_comparison_id(self.id.clone())
                .with_message(e.to_string())
        })
    }

    fn load_side(
        &self,
        bytes: &[u8],
        side: DocumentSide,
        options: &CompareOptions,
    ) -> Result<NormalizedSpec, ExError> {
        self.checkpoint("decode")?;
        let tree = decode_limited(bytes, options.format(side), options.max_document_bytes)
            .map_err(|e| self.side_error(e, side))?;
        self.normalize_side(&tree, side)
    }

    fn normalize_side(&self, tree: &Value, side: DocumentSide) -> Result<NormalizedSpec, ExError> {
        self.checkpoint("normalize")?;
        let dialect = detect_dialect(tree).map_err(|e| self.side_error(e, side))?;
        tracing::debug!(
            comparison_id = %self.id,
            side = side.as_str(),
            dialect = dialect.as_str(),
            "dialect detected"
        );
        normalize(tree, dialect).map_err(|e| self.side_error(e, side))
    }

    fn finish(
        &self,
        old: &NormalizedSpec,
        new: &NormalizedSpec,
    ) -> Result<ComparisonResult, ExError> {
        self.checkpoint("diff")?;
        let events = diff(old, new);
        tracing::debug!(
            comparison_id = %self.id,
            event_count = events.len(),
            "diff computed"
        );

        self.checkpoint("classify")?;
        Ok(ComparisonResult::from_changes(classify_all(&events)))
    }

    fn checkpoint(&self, stage: &str) -> Result<(), ExError> {
        if self.cancel.is_cancelled() {
            return Err(ExError::new(ExErrorKind::Cancelled)
                .with_op(stage)
                .with_comparison_id(self.id.clone())
                .with_message(format!("comparison cancelled before {}", stage)));
        }
        Ok(())
    }

    fn side_error(&self, err: SpecDiffError, side: DocumentSide) -> ExError {
        ExError::from(err)
            .with_side(side)
            .with_comparison_id(self.id.clone())
    }
}

/// Compare two decoded document trees.
///
/// # Errors
///
/// See [`Comparison::run`].
pub fn compare(old_tree: &Value, new_tree: &Value) -> Result<ComparisonResult, ExError> {
    Comparison::new().run(old_tree, new_tree)
}

/// Decode and compare two raw documents.
///
/// # Errors
///
/// See [`Comparison::run_documents`].
pub fn compare_documents(
    old_bytes: &[u8],
    new_bytes: &[u8],
    options: &CompareOptions,
) -> Result<ComparisonResult, ExError> {
    Comparison::new().run_documents(old_bytes, new_bytes, options)
}

/// Read, decode and compare two documents on disk.
///
/// # Errors
///
/// See [`Comparison::run_files`].
pub fn compare_files(
    old_path: &Path,
    new_path: &Path,
    options: &CompareOptions,
) -> Result<ComparisonResult, ExError> {
    Comparison::new().run_files(old_path, new_path, options)
}
