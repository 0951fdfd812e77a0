//! Operation status models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution state of a queued operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum OperationStatus {
    /// Waiting in the queue.
    NotStarted,
    /// Running.
    Executing,
    /// Completed successfully.
    Succeeded,
    /// Completed with an error.
    Failed,
    /// Restarted after an interruption.
    Resumed,
    /// A state this client does not know about.
    #[serde(other)]
    Unknown,
}

impl OperationStatus {
    /// Whether the operation has finished, successfully or not.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Wire name of the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "notStarted",
            Self::Executing => "executing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Resumed => "resumed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `GET operations/{alias}/status/{id}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    /// Current state.
    pub status: OperationStatus,
}
