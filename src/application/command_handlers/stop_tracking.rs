// Stop command handler: closes the open session on a task.
//
// Responsibilities
// - Refuse the stop unless the session belongs to the acting user, then
//   check workspace membership.
// - Clear the session under the revision check before materializing the
//   entry, so a lost race surfaces as a conflict instead of a duplicate.
// - Record an entry and recompute the aggregate only when time elapsed.

use std::sync::Arc;

use uuid::Uuid;

use crate::application::aggregator::TimeTrackedAggregator;
use crate::application::errors::TrackingError;
use crate::core::ports::{Clock, IdentityDirectory, Membership, TaskStore, TimeEntryLedger};
use crate::core::time_entry::TimeEntry;
use crate::core::tracking::decide_stop;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StoppedTracking {
    pub task_id: String,
    pub stopped_at: i64,
    pub duration: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_entry: Option<TimeEntry>,
}

pub struct StopTrackingHandler {
    task_store: Arc<dyn TaskStore>,
    ledger: Arc<dyn TimeEntryLedger>,
    membership: Arc<dyn Membership>,
    identities: Arc<dyn IdentityDirectory>,
    clock: Arc<dyn Clock>,
    aggregator: Arc<TimeTrackedAggregator>,
}

impl StopTrackingHandler {
    pub fn new(
        task_store: Arc<dyn TaskStore>,
        ledger: Arc<dyn TimeEntryLedger>,
        membership: Arc<dyn Membership>,
        identities: Arc<dyn IdentityDirectory>,
        clock: Arc<dyn Clock>,
        aggregator: Arc<TimeTrackedAggregator>,
    ) -> Self {
        Self {
            task_store,
            ledger,
            membership,
            identities,
            clock,
            aggregator,
        }
    }

    pub async fn handle(&self, task_id: &str, user_id: &str) -> Result<StoppedTracking, TrackingError> {
        let task = self.task_store.get(task_id).await?;
        let outcome = decide_stop(&task, user_id, self.clock.now_ms())?;
        if !self.membership.is_member(&task.workspace_id, user_id).await? {
            return Err(TrackingError::Unauthorized);
        }

        // Resolve the credited name before touching the session, so an
        // identity failure leaves the session untouched.
        let user_name = if outcome.closed.is_some() {
            self.identities.display_name(user_id).await?
        } else {
            String::new()
        };

        self.task_store
            .update_tracking(task_id, task.revision, None)
            .await?;

        let time_entry = match outcome.closed {
            Some(closed) => {
                let entry = TimeEntry::new(
                    Uuid::now_v7().to_string(),
                    task_id,
                    user_id,
                    user_name,
                    closed.start_time,
                    closed.end_time,
                    "",
                );
                self.ledger.append(entry.clone()).await?;
                self.aggregator.recompute(task_id).await?;
                tracing::info!(task_id, user_id, duration = entry.duration, "tracking stopped");
                Some(entry)
            }
            None => {
                tracing::info!(task_id, user_id, "tracking stopped with no elapsed time");
                None
            }
        };

        Ok(StoppedTracking {
            task_id: task_id.to_string(),
            stopped_at: outcome.stopped_at,
            duration: outcome.duration,
            time_entry,
        })
    }
}
