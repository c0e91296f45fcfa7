use crate::types::{AssignmentId, StaffId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Validation error: {reason}")]
    Validation { reason: String },

    #[error("Concurrent update on staff record '{staff_id}': expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        staff_id: StaffId,
        expected: u64,
        actual: u64,
    },

    #[error("Staff record '{staff_id}' not registered")]
    UnknownStaff { staff_id: StaffId },

    #[error("Assignment '{assignment_id}' not found")]
    UnknownAssignment { assignment_id: AssignmentId },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DispatchError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;
