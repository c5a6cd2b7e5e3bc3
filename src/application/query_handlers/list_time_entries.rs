// Query handler for a task's entry ledger, newest first.

use std::sync::Arc;

use crate::application::errors::TrackingError;
use crate::core::ports::{Membership, TaskStore, TimeEntryLedger};
use crate::core::time_entry::TimeEntry;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TimeEntryPage {
    pub total: usize,
    pub entries: Vec<TimeEntry>,
}

pub struct ListTimeEntriesHandler {
    task_store: Arc<dyn TaskStore>,
    ledger: Arc<dyn TimeEntryLedger>,
    membership: Arc<dyn Membership>,
}

impl ListTimeEntriesHandler {
    pub fn new(
        task_store: Arc<dyn TaskStore>,
        ledger: Arc<dyn TimeEntryLedger>,
        membership: Arc<dyn Membership>,
    ) -> Self {
        Self {
            task_store,
            ledger,
            membership,
        }
    }

    pub async fn handle(&self, task_id: &str, user_id: &str) -> Result<TimeEntryPage, TrackingError> {
        let task = self.task_store.get(task_id).await?;
        if !self.membership.is_member(&task.workspace_id, user_id).await? {
            return Err(TrackingError::Unauthorized);
        }

        let entries = self.ledger.list_by_task(task_id).await?;
        Ok(TimeEntryPage {
            total: entries.len(),
            entries,
        })
    }
}
