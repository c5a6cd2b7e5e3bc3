// Entry deletion command handler.
//
// Responsibilities
// - Only the user credited on an entry may delete it; the requester must
//   also still be a member of the owning task's workspace.
// - The owning task is derived from the entry so the aggregate can be
//   recomputed after removal.

use std::sync::Arc;

use crate::application::aggregator::TimeTrackedAggregator;
use crate::application::errors::TrackingError;
use crate::core::ports::{Membership, TaskStore, TimeEntryLedger};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DeletedTimeEntry {
    pub id: String,
}

pub struct DeleteTimeEntryHandler {
    task_store: Arc<dyn TaskStore>,
    ledger: Arc<dyn TimeEntryLedger>,
    membership: Arc<dyn Membership>,
    aggregator: Arc<TimeTrackedAggregator>,
}

impl DeleteTimeEntryHandler {
    pub fn new(
        task_store: Arc<dyn TaskStore>,
        ledger: Arc<dyn TimeEntryLedger>,
        membership: Arc<dyn Membership>,
        aggregator: Arc<TimeTrackedAggregator>,
    ) -> Self {
        Self {
            task_store,
            ledger,
            membership,
            aggregator,
        }
    }

    pub async fn handle(&self, entry_id: &str, user_id: &str) -> Result<DeletedTimeEntry, TrackingError> {
        let entry = self.ledger.get(entry_id).await?;
        if entry.user_id != user_id {
            return Err(TrackingError::Unauthorized);
        }
        let task = self.task_store.get(&entry.task_id).await?;
        if !self.membership.is_member(&task.workspace_id, user_id).await? {
            return Err(TrackingError::Unauthorized);
        }

        self.ledger.remove(entry_id).await?;
        self.aggregator.recompute(&entry.task_id).await?;
        tracing::info!(entry_id, task_id = %entry.task_id, user_id, "time entry deleted");

        Ok(DeletedTimeEntry { id: entry.id })
    }
}
