//! Outcome of a single migration step.

use serde::Serialize;
use std::fmt;

/// Result of one migration step, consumed by the orchestrator's branching.
///
/// `Failed` is a normal value, not an error: per-index steps report it and
/// the run moves on to the next index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The step changed the cluster
    Success { details: String },
    /// The step found its work already done and changed nothing
    AlreadyApplied { details: String },
    /// The step did not complete
    Failed {
        reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        http_status: Option<u16>,
    },
}

impl StepOutcome {
    pub fn success(details: impl Into<String>) -> Self {
        StepOutcome::Success {
            details: details.into(),
        }
    }

    pub fn already_applied(details: impl Into<String>) -> Self {
        StepOutcome::AlreadyApplied {
            details: details.into(),
        }
    }

    pub fn failed(reason: impl Into<String>, http_status: Option<u16>) -> Self {
        StepOutcome::Failed {
            reason: reason.into(),
            http_status,
        }
    }

    /// `true` for `Success` and `AlreadyApplied`: the step's postcondition holds.
    pub fn is_applied(&self) -> bool {
        !self.is_failed()
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Success { details } => write!(f, "success: {}", details),
            StepOutcome::AlreadyApplied { details } => write!(f, "already applied: {}", details),
            StepOutcome::Failed {
                reason,
                http_status: Some(status),
            } => write!(f, "failed ({}): {}", status, reason),
            StepOutcome::Failed {
                reason,
                http_status: None,
            } => write!(f, "failed: {}", reason),
        }
    }
}

#[cfg(test)]
#[path = "outcome_test.rs"]
mod tests;
