use specdiff_core_types::ComparisonId;
use thiserror::Error;

/// Result type alias using SpecDiffError
pub type Result<T> = std::result::Result<T, SpecDiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error surfaced by a comparison maps to one of these kinds. The
/// first three are the externally documented input failures; the rest are
/// ambient (limits, I/O at the edges, cancellation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    /// Malformed JSON/YAML, empty input, or a non-mapping document root
    Parse,
    /// Neither `openapi: 3.x` nor `swagger: 2.0` was found
    UnsupportedDialect,
    /// A required top-level key is absent, or a structural element has the wrong shape
    Structure,
    /// The document exceeds the configured size limit
    InputTooLarge,

    // Integration/IO
    Io,
    Serialization,

    // Lifecycle
    /// The caller abandoned the comparison between stages
    Cancelled,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Parse => "ERR_PARSE",
            ExErrorKind::UnsupportedDialect => "ERR_UNSUPPORTED_DIALECT",
            ExErrorKind::Structure => "ERR_STRUCTURE",
            ExErrorKind::InputTooLarge => "ERR_INPUT_TOO_LARGE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Cancelled => "ERR_CANCELLED",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Which of the two compared documents an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentSide {
    Old,
    New,
}

impl DocumentSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentSide::Old => "old",
            DocumentSide::New => "new",
        }
    }
}

impl std::fmt::Display for DocumentSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical structured error type
///
/// Carries a stable kind for programmatic handling, plus the input side,
/// document location and comparison id for anyone reading the error.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    side: Option<DocumentSide>,
    location: Option<String>,
    comparison_id: Option<ComparisonId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            side: None,
            location: None,
            comparison_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Record which input triggered the error
    pub fn with_side(mut self, side: DocumentSide) -> Self {
        self.side = Some(side);
        self
    }

    /// Add the document location (dotted key path) the error refers to
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Add comparison correlation id
    pub fn with_comparison_id(mut self, id: ComparisonId) -> Self {
        self.comparison_id = Some(id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the input side, if known
    pub fn side(&self) -> Option<DocumentSide> {
        self.side
    }

    /// Get the document location, if any
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Get the comparison id, if any
    pub fn comparison_id(&self) -> Option<&ComparisonId> {
        self.comparison_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(side) = self.side {
            write!(f, " {} document", side)?;
        }
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(location) = &self.location {
            write!(f, " (at: {})", location)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy raised inside the decoder and normalizer
///
/// These carry no notion of which input they came from; the orchestrator
/// converts them into [`ExError`] and attaches the side.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecDiffError {
    // ===== Decode Errors =====
    /// Document text could not be decoded as JSON or YAML
    #[error("Invalid {format}: {reason}")]
    Parse { format: String, reason: String },

    /// Document is empty or whitespace only
    #[error("Specification is empty")]
    EmptyDocument,

    /// Document decoded, but its root is not a mapping
    #[error("Specification must be a JSON object")]
    NotAMapping,

    /// Document is larger than the configured limit
    #[error("Specification is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    // ===== Dialect Errors =====
    /// No supported dialect marker at the document root
    #[error("Unsupported specification dialect: {found}")]
    UnsupportedDialect { found: String },

    // ===== Structure Errors =====
    /// A required key is absent
    #[error("Specification must include '{key}' field")]
    MissingKey { key: String },

    /// An element has the wrong shape
    #[error("'{location}' must be {expected}")]
    Malformed { location: String, expected: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding of a result)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from SpecDiffError to ExError
impl From<SpecDiffError> for ExError {
    fn from(err: SpecDiffError) -> Self {
        let message = err.to_string();
        match err {
            SpecDiffError::Parse { .. }
            | SpecDiffError::EmptyDocument
            | SpecDiffError::NotAMapping => ExError::new(ExErrorKind::Parse)
                .with_op("decode")
                .with_message(message),

            SpecDiffError::TooLarge { .. } => ExError::new(ExErrorKind::InputTooLarge)
                .with_op("decode")
                .with_message(message),

            SpecDiffError::UnsupportedDialect { .. } => {
                ExError::new(ExErrorKind::UnsupportedDialect)
                    .with_op("detect_dialect")
                    .with_message(message)
            }

            SpecDiffError::MissingKey { key } => ExError::new(ExErrorKind::Structure)
                .with_op("normalize")
                .with_location(key)
                .with_message(message),

            SpecDiffError::Malformed { location, .. } => ExError::new(ExErrorKind::Structure)
                .with_op("normalize")
                .with_location(location)
                .with_message(message),

            SpecDiffError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to SpecDiffError
impl From<serde_json::Error> for SpecDiffError {
    fn from(err: serde_json::Error) -> Self {
        SpecDiffError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::Parse, "ERR_PARSE"),
            (ExErrorKind::UnsupportedDialect, "ERR_UNSUPPORTED_DIALECT"),
            (ExErrorKind::Structure, "ERR_STRUCTURE"),
            (ExErrorKind::InputTooLarge, "ERR_INPUT_TOO_LARGE"),
            (ExErrorKind::Cancelled, "ERR_CANCELLED"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_missing_key_maps_to_structure() {
        let err: ExError = SpecDiffError::MissingKey {
            key: "paths".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::Structure);
        assert_eq!(err.location(), Some("paths"));
        assert_eq!(err.message(), "Specification must include 'paths' field");
    }

    #[test]
    fn test_decode_failures_map_to_parse() {
        for source in [
            SpecDiffError::EmptyDocument,
            SpecDiffError::NotAMapping,
            SpecDiffError::Parse {
                format: "JSON".to_string(),
                reason: "eof".to_string(),
            },
        ] {
            let err: ExError = source.into();
            assert_eq!(err.kind(), ExErrorKind::Parse);
        }
    }

    #[test]
    fn test_display_includes_side_and_location() {
        let err = ExError::new(ExErrorKind::Structure)
            .with_side(DocumentSide::New)
            .with_location("paths./users")
            .with_message("must be a mapping");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_STRUCTURE] new document"));
        assert!(rendered.contains("(at: paths./users)"));
    }

    #[test]
    fn test_side_none_by_default() {
        let err = ExError::new(ExErrorKind::Internal);
        assert!(err.side().is_none());
        assert!(err.comparison_id().is_none());
    }
}
