// Ports define what the core needs from the outside world, without implementing it.
//
// Purpose
// - Describe abstract input and output capabilities as traits (task store,
//   entry ledger, membership authority, identity directory, clock).
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits in the
//   adapters layer.
//
// Testing guidance
// - Provide in memory implementations for tests and local development.

use async_trait::async_trait;
use thiserror::Error;

use crate::core::task::{Task, TrackingSession};
use crate::core::time_entry::TimeEntry;

#[derive(Debug, Error)]
pub enum TaskStoreError {
    #[error("task not found: {0}")]
    NotFound(String),

    #[error("revision mismatch for task {task_id}: expected {expected}, actual {actual}")]
    RevisionMismatch {
        task_id: String,
        expected: i64,
        actual: i64,
    },

    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("time entry not found: {0}")]
    NotFound(String),

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn get(&self, task_id: &str) -> Result<Task, TaskStoreError>;

    /// Replaces the open-session value, guarded by the revision the caller
    /// observed. A mismatch means a concurrent writer got there first; the
    /// caller surfaces that as a retryable conflict instead of writing over it.
    async fn update_tracking(
        &self,
        task_id: &str,
        expected_revision: i64,
        tracking: Option<TrackingSession>,
    ) -> Result<Task, TaskStoreError>;

    /// Overwrites the cached aggregate. Not revision-guarded: the value is
    /// derived from the ledger and idempotent to rewrite.
    async fn set_time_tracked(&self, task_id: &str, total_secs: i64) -> Result<(), TaskStoreError>;

    /// Every task with an open session for this user, most recently started
    /// first. Cardinality 0 or 1 under the exclusivity invariant.
    async fn tracked_by_user(&self, user_id: &str) -> Result<Vec<Task>, TaskStoreError>;
}

#[async_trait]
pub trait TimeEntryLedger: Send + Sync {
    async fn append(&self, entry: TimeEntry) -> Result<(), LedgerError>;
    async fn get(&self, entry_id: &str) -> Result<TimeEntry, LedgerError>;
    async fn remove(&self, entry_id: &str) -> Result<TimeEntry, LedgerError>;

    /// All entries for a task, newest first by start time.
    async fn list_by_task(&self, task_id: &str) -> Result<Vec<TimeEntry>, LedgerError>;
}

/// Membership authority owned by the surrounding application.
#[async_trait]
pub trait Membership: Send + Sync {
    async fn is_member(&self, workspace_id: &str, user_id: &str) -> anyhow::Result<bool>;
}

/// Resolves the display name credited on an entry at creation time.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    async fn display_name(&self, user_id: &str) -> anyhow::Result<String>;
}

pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}
