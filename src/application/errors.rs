use thiserror::Error;

use crate::core::ports::{LedgerError, TaskStoreError};
use crate::core::tracking::DecideError;

#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("time entry not found: {0}")]
    EntryNotFound(String),

    #[error("task is already being tracked by you")]
    AlreadyTracking,

    #[error("task is not being tracked by you")]
    NotTrackingByYou,

    #[error("start time must be before end time")]
    InvalidRange,

    #[error("concurrent update on task {0}, retry")]
    Conflict(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl From<TaskStoreError> for TrackingError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::NotFound(task_id) => TrackingError::TaskNotFound(task_id),
            TaskStoreError::RevisionMismatch { task_id, .. } => TrackingError::Conflict(task_id),
            TaskStoreError::Backend(message) => TrackingError::Backend(message),
        }
    }
}

impl From<LedgerError> for TrackingError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(entry_id) => TrackingError::EntryNotFound(entry_id),
            LedgerError::Backend(message) => TrackingError::Backend(message),
        }
    }
}

impl From<DecideError> for TrackingError {
    fn from(err: DecideError) -> Self {
        match err {
            DecideError::AlreadyTracking => TrackingError::AlreadyTracking,
            DecideError::NotTrackingByYou => TrackingError::NotTrackingByYou,
        }
    }
}

impl From<anyhow::Error> for TrackingError {
    fn from(err: anyhow::Error) -> Self {
        TrackingError::Backend(err.to_string())
    }
}
