//! The claim-review state machine behind the operator dashboard.
//!
//! A [`ReviewBoard`] holds the in-session list of reviewable claims, the
//! active severity filter, and the current selection. Transitions are
//! synchronous and framework-free so the whole review workflow unit-tests
//! headlessly; rendering layers consume the board read-only.
//!
//! Claims are never deleted within a session, and there is no persistence:
//! dropping the board drops the review state.
pub mod board;

pub use board::{ReviewBoard, ReviewError};

use serde::{Deserialize, Serialize};

/// Reviewer-facing risk tier assigned to a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Warning,
    Minor,
    Verified,
}

/// A reviewer's disposition of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Pending,
    Accepted,
    Rejected,
    Research,
}

/// Filter tabs above the verification queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    All,
    Critical,
    Warning,
    Minor,
    Verified,
}

impl Tab {
    /// Exact severity match; `All` is the identity filter.
    pub fn admits(&self, severity: Severity) -> bool {
        match self {
            Tab::All => true,
            Tab::Critical => severity == Severity::Critical,
            Tab::Warning => severity == Severity::Warning,
            Tab::Minor => severity == Severity::Minor,
            Tab::Verified => severity == Severity::Verified,
        }
    }
}

/// A claim augmented with review-workflow state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewableClaim {
    pub id: String,
    pub severity: Severity,
    /// Quoted excerpt shown in the queue.
    pub excerpt: String,
    pub location: String,
    pub confidence: String,
    pub status: String,
    pub correction: Option<String>,
    pub decision: Decision,
    pub decision_note: Option<String>,
    /// Local wall-clock `HH:MM` of the last decision, if any.
    pub updated_at: Option<String>,
}

impl ReviewableClaim {
    /// A freshly loaded claim: pending, carrying the severity's default
    /// status line.
    pub fn new(
        id: impl Into<String>,
        severity: Severity,
        excerpt: impl Into<String>,
        location: impl Into<String>,
        confidence: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            excerpt: excerpt.into(),
            location: location.into(),
            confidence: confidence.into(),
            status: default_status(severity).to_string(),
            correction: None,
            decision: Decision::Pending,
            decision_note: None,
            updated_at: None,
        }
    }

    pub fn with_correction(mut self, correction: impl Into<String>) -> Self {
        self.correction = Some(correction.into());
        self
    }
}

fn default_status(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "Requires correction",
        Severity::Warning => "Partially unsupported",
        Severity::Minor => "Needs updated context",
        Severity::Verified => "Fully supported",
    }
}

/// Fixed status line and note recorded for each non-pending decision.
pub(crate) fn decision_copy(decision: Decision) -> Option<(&'static str, &'static str)> {
    match decision {
        Decision::Accepted => Some(("Fix applied", "Claim updated with verified correction.")),
        Decision::Rejected => Some((
            "Marked as intentionally kept",
            "Reviewer chose to retain original copy.",
        )),
        Decision::Research => Some((
            "Escalated for deeper research",
            "Sent to research queue for follow-up context.",
        )),
        Decision::Pending => None,
    }
}
