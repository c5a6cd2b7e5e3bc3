// Query handler for "which task am I tracking right now".
//
// Purpose
// - Serve the persistent tracking indicator: the at-most-one task with an
//   open session for this user, anywhere in the system. If the best-effort
//   closure during a start ever leaves a brief overlap, the most recently
//   started session wins.

use std::sync::Arc;

use crate::application::errors::TrackingError;
use crate::core::ports::TaskStore;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ActiveSessionView {
    pub task_id: String,
    pub workspace_id: String,
    pub task_name: String,
    pub started_at: i64,
    pub time_tracked: i64,
}

pub struct ActiveSessionHandler {
    task_store: Arc<dyn TaskStore>,
}

impl ActiveSessionHandler {
    pub fn new(task_store: Arc<dyn TaskStore>) -> Self {
        Self { task_store }
    }

    pub async fn handle(&self, user_id: &str) -> Result<Option<ActiveSessionView>, TrackingError> {
        let tasks = self.task_store.tracked_by_user(user_id).await?;
        for task in tasks {
            if let Some(session) = &task.tracking {
                return Ok(Some(ActiveSessionView {
                    task_id: task.id.clone(),
                    workspace_id: task.workspace_id.clone(),
                    task_name: task.name.clone(),
                    started_at: session.started_at,
                    time_tracked: task.time_tracked,
                }));
            }
        }
        Ok(None)
    }
}
