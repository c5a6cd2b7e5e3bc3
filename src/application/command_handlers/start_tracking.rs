// Start command handler: opens a tracking session on a task.
//
// Responsibilities
// - Check workspace membership, then refuse a start the user already holds.
// - Close every other task this user is tracking first, so at most one
//   session stays open per user across the whole system. Those closures are
//   best effort: a failure is logged and skipped, never aborting the start.
// - Write the new session under the revision check.

use std::sync::Arc;

use crate::application::command_handlers::stop_tracking::StopTrackingHandler;
use crate::application::errors::TrackingError;
use crate::core::ports::{Clock, Membership, TaskStore};
use crate::core::task::TrackingSession;
use crate::core::tracking::decide_start;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StartedTracking {
    pub task_id: String,
    pub started_at: i64,
}

pub struct StartTrackingHandler {
    task_store: Arc<dyn TaskStore>,
    membership: Arc<dyn Membership>,
    clock: Arc<dyn Clock>,
    stop_handler: Arc<StopTrackingHandler>,
}

impl StartTrackingHandler {
    pub fn new(
        task_store: Arc<dyn TaskStore>,
        membership: Arc<dyn Membership>,
        clock: Arc<dyn Clock>,
        stop_handler: Arc<StopTrackingHandler>,
    ) -> Self {
        Self {
            task_store,
            membership,
            clock,
            stop_handler,
        }
    }

    pub async fn handle(&self, task_id: &str, user_id: &str) -> Result<StartedTracking, TrackingError> {
        let task = self.task_store.get(task_id).await?;
        if !self.membership.is_member(&task.workspace_id, user_id).await? {
            return Err(TrackingError::Unauthorized);
        }
        decide_start(&task, user_id)?;

        for other in self.task_store.tracked_by_user(user_id).await? {
            if let Err(err) = self.stop_handler.handle(&other.id, user_id).await {
                tracing::warn!(
                    task_id = %other.id,
                    user_id,
                    error = %err,
                    "failed to close the previous session, continuing"
                );
            }
        }

        let session = TrackingSession {
            user_id: user_id.to_string(),
            started_at: self.clock.now_ms(),
        };
        let started_at = session.started_at;
        self.task_store
            .update_tracking(task_id, task.revision, Some(session))
            .await?;
        tracing::info!(task_id, user_id, "tracking started");

        Ok(StartedTracking {
            task_id: task_id.to_string(),
            started_at,
        })
    }
}
