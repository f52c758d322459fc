//! Classified comparison output.
//!
//! These types serialize to the stable JSON contract:
//!
//! ```json
//! {
//!   "summary": {"breaking": 1, "potentially_breaking": 0, "non_breaking": 0},
//!   "changes": [
//!     {"type": "breaking", "category": "endpoint", "path": "/users",
//!      "method": null, "field": null, "message": "Endpoint removed: /users"}
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// How risky a change is for existing clients.
///
/// Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    NonBreaking,
    PotentiallyBreaking,
    Breaking,
}

impl Severity {
    pub const ALL: [Severity; 3] = [
        Severity::Breaking,
        Severity::PotentiallyBreaking,
        Severity::NonBreaking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Breaking => "breaking",
            Severity::PotentiallyBreaking => "potentially_breaking",
            Severity::NonBreaking => "non_breaking",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeCategory {
    Endpoint,
    Method,
    Parameter,
    Schema,
    Response,
}

impl ChangeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeCategory::Endpoint => "endpoint",
            ChangeCategory::Method => "method",
            ChangeCategory::Parameter => "parameter",
            ChangeCategory::Schema => "schema",
            ChangeCategory::Response => "response",
        }
    }
}

impl std::fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified contract change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub category: ChangeCategory,
    pub path: String,
    pub method: Option<String>,
    pub field: Option<String>,
    pub message: String,
}

/// Per-severity change counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub breaking: usize,
    pub potentially_breaking: usize,
    pub non_breaking: usize,
}

impl Summary {
    pub fn from_changes(changes: &[Change]) -> Self {
        let mut summary = Summary::default();
        for change in changes {
            summary.record(change.severity);
        }
        summary
    }

    fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Breaking => self.breaking += 1,
            Severity::PotentiallyBreaking => self.potentially_breaking += 1,
            Severity::NonBreaking => self.non_breaking += 1,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Breaking => self.breaking,
            Severity::PotentiallyBreaking => self.potentially_breaking,
            Severity::NonBreaking => self.non_breaking,
        }
    }

    /// Number of changes at `severity` or worse.
    pub fn at_least(&self, severity: Severity) -> usize {
        Severity::ALL
            .iter()
            .filter(|s| **s >= severity)
            .map(|s| self.count(*s))
            .sum()
    }

    pub fn total(&self) -> usize {
        self.breaking + self.potentially_breaking + self.non_breaking
    }
}

/// Everything a comparison returns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub summary: Summary,
    pub changes: Vec<Change>,
}

impl ComparisonResult {
    /// Build a result whose summary is derived from `changes`.
    pub fn from_changes(changes: Vec<Change>) -> Self {
        Self {
            summary: Summary::from_changes(&changes),
            changes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
