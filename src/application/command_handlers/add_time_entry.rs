// Manual entry command handler.
//
// Responsibilities
// - Validate the interval and record an entry with user-supplied bounds,
//   then recompute the aggregate. This path never touches the open session:
//   a task can accumulate manual entries without ever being started.

use std::sync::Arc;

use uuid::Uuid;

use crate::application::aggregator::TimeTrackedAggregator;
use crate::application::errors::TrackingError;
use crate::core::ports::{IdentityDirectory, Membership, TaskStore, TimeEntryLedger};
use crate::core::time_entry::TimeEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTimeEntry {
    pub task_id: String,
    pub user_id: String,
    pub start_time: i64,
    pub end_time: i64,
    pub description: Option<String>,
}

pub struct AddTimeEntryHandler {
    task_store: Arc<dyn TaskStore>,
    ledger: Arc<dyn TimeEntryLedger>,
    membership: Arc<dyn Membership>,
    identities: Arc<dyn IdentityDirectory>,
    aggregator: Arc<TimeTrackedAggregator>,
}

impl AddTimeEntryHandler {
    pub fn new(
        task_store: Arc<dyn TaskStore>,
        ledger: Arc<dyn TimeEntryLedger>,
        membership: Arc<dyn Membership>,
        identities: Arc<dyn IdentityDirectory>,
        aggregator: Arc<TimeTrackedAggregator>,
    ) -> Self {
        Self {
            task_store,
            ledger,
            membership,
            identities,
            aggregator,
        }
    }

    pub async fn handle(&self, command: AddTimeEntry) -> Result<TimeEntry, TrackingError> {
        let task = self.task_store.get(&command.task_id).await?;
        if !self.membership.is_member(&task.workspace_id, &command.user_id).await? {
            return Err(TrackingError::Unauthorized);
        }
        if command.start_time >= command.end_time {
            return Err(TrackingError::InvalidRange);
        }

        let user_name = self.identities.display_name(&command.user_id).await?;
        let entry = TimeEntry::new(
            Uuid::now_v7().to_string(),
            command.task_id.as_str(),
            command.user_id.as_str(),
            user_name,
            command.start_time,
            command.end_time,
            command.description.unwrap_or_default(),
        );
        self.ledger.append(entry.clone()).await?;
        self.aggregator.recompute(&command.task_id).await?;
        tracing::info!(
            task_id = %command.task_id,
            user_id = %command.user_id,
            duration = entry.duration,
            "manual time entry added"
        );

        Ok(entry)
    }
}
