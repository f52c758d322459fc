//! Correlation types for comparison tracking
//!
//! Every comparison request gets a fresh [`ComparisonId`] so that its log
//! events and any error it surfaces can be tied back together.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single comparison request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComparisonId(String);

impl ComparisonId {
    /// Generate a new random ComparisonId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (e.g. an id handed in by a transport layer)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for ComparisonId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ComparisonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_id_generation() {
        let id1 = ComparisonId::new();
        let id2 = ComparisonId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_comparison_id_display() {
        let id = ComparisonId::new();
        assert_eq!(format!("{}", id), id.as_str());
    }

    #[test]
    fn test_comparison_id_from_string() {
        let id = ComparisonId::from_string("cmp-123".to_string());
        assert_eq!(id.as_str(), "cmp-123");
    }

    #[test]
    fn test_serialization() {
        let id = ComparisonId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ComparisonId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
