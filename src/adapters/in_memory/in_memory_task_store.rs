// In memory implementation of the TaskStore port.
//
// Purpose
// - Support handler tests and local development without a database.
//
// Responsibilities
// - Guard the open-session value with a per-task revision check.
// - Keep a user to task index next to the task map, updated under the same
//   write lock, so the active-session lookup is a single read instead of a
//   scan over every task.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::core::ports::{TaskStore, TaskStoreError};
use crate::core::task::{Task, TrackingSession};

#[derive(Default)]
struct Inner {
    tasks: HashMap<String, Task>,
    // One row per user under the exclusivity invariant. A Vec absorbs the
    // transient overlap while a best-effort closure is still catching up.
    active_by_user: HashMap<String, Vec<String>>,
}

#[derive(Default)]
pub struct InMemoryTaskStore {
    inner: RwLock<Inner>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a task, replacing any prior task with the same id.
    pub async fn insert(&self, task: Task) {
        let mut guard = self.inner.write().await;
        let previous_user = guard
            .tasks
            .get(&task.id)
            .and_then(|previous| previous.tracking.as_ref())
            .map(|session| session.user_id.clone());
        if let Some(user_id) = previous_user {
            unindex(&mut guard, &user_id, &task.id);
        }
        if let Some(session) = task.tracking.clone() {
            guard
                .active_by_user
                .entry(session.user_id)
                .or_default()
                .push(task.id.clone());
        }
        guard.tasks.insert(task.id.clone(), task);
    }
}

fn unindex(inner: &mut Inner, user_id: &str, task_id: &str) {
    if let Some(task_ids) = inner.active_by_user.get_mut(user_id) {
        task_ids.retain(|id| id != task_id);
        if task_ids.is_empty() {
            inner.active_by_user.remove(user_id);
        }
    }
}

#[async_trait::async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn get(&self, task_id: &str) -> Result<Task, TaskStoreError> {
        let guard = self.inner.read().await;
        guard
            .tasks
            .get(task_id)
            .cloned()
            .ok_or_else(|| TaskStoreError::NotFound(task_id.to_string()))
    }

    async fn update_tracking(
        &self,
        task_id: &str,
        expected_revision: i64,
        tracking: Option<TrackingSession>,
    ) -> Result<Task, TaskStoreError> {
        let mut guard = self.inner.write().await;
        let task = guard
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| TaskStoreError::NotFound(task_id.to_string()))?;
        if task.revision != expected_revision {
            return Err(TaskStoreError::RevisionMismatch {
                task_id: task_id.to_string(),
                expected: expected_revision,
                actual: task.revision,
            });
        }

        let previous_user = task.tracking.as_ref().map(|session| session.user_id.clone());
        task.tracking = tracking;
        task.revision += 1;
        let updated = task.clone();

        if let Some(user_id) = previous_user {
            unindex(&mut guard, &user_id, task_id);
        }
        if let Some(session) = &updated.tracking {
            guard
                .active_by_user
                .entry(session.user_id.clone())
                .or_default()
                .push(task_id.to_string());
        }
        Ok(updated)
    }

    async fn set_time_tracked(&self, task_id: &str, total_secs: i64) -> Result<(), TaskStoreError> {
        let mut guard = self.inner.write().await;
        let task = guard
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| TaskStoreError::NotFound(task_id.to_string()))?;
        task.time_tracked = total_secs;
        Ok(())
    }

    async fn tracked_by_user(&self, user_id: &str) -> Result<Vec<Task>, TaskStoreError> {
        let guard = self.inner.read().await;
        let mut tasks: Vec<Task> = guard
            .active_by_user
            .get(user_id)
            .into_iter()
            .flatten()
            .filter_map(|task_id| guard.tasks.get(task_id))
            .filter(|task| task.tracked_by(user_id))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| {
            let a_started = a.tracking.as_ref().map(|s| s.started_at);
            let b_started = b.tracking.as_ref().map(|s| s.started_at);
            b_started.cmp(&a_started)
        });
        Ok(tasks)
    }
}

#[cfg(test)]
mod in_memory_task_store_tests {
    use super::*;
    use rstest::rstest;

    const T0: i64 = 1_700_000_000_000;

    fn session(user_id: &str, started_at: i64) -> TrackingSession {
        TrackingSession {
            user_id: user_id.to_string(),
            started_at,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_get_a_seeded_task() {
        let store = InMemoryTaskStore::new();
        store.insert(Task::new("task-0001", "workspace-0001", "Write the report")).await;

        let task = store.get("task-0001").await.unwrap();

        assert_eq!(task.name, "Write the report");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_to_get_an_unknown_task() {
        let store = InMemoryTaskStore::new();

        let result = store.get("task-missing").await;

        assert!(matches!(result, Err(TaskStoreError::NotFound(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_set_and_clear_the_session_and_index_together() {
        let store = InMemoryTaskStore::new();
        store.insert(Task::new("task-0001", "workspace-0001", "Write the report")).await;

        let task = store
            .update_tracking("task-0001", 0, Some(session("user-0001", T0)))
            .await
            .unwrap();
        assert_eq!(task.revision, 1);
        assert!(task.tracked_by("user-0001"));
        let active = store.tracked_by_user("user-0001").await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "task-0001");

        store.update_tracking("task-0001", 1, None).await.unwrap();
        assert!(store.tracked_by_user("user-0001").await.unwrap().is_empty());
        assert!(!store.get("task-0001").await.unwrap().is_tracking());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_to_update_with_a_stale_revision() {
        let store = InMemoryTaskStore::new();
        store.insert(Task::new("task-0001", "workspace-0001", "Write the report")).await;
        store
            .update_tracking("task-0001", 0, Some(session("user-0001", T0)))
            .await
            .unwrap();

        let result = store.update_tracking("task-0001", 0, None).await;

        match result {
            Err(TaskStoreError::RevisionMismatch { expected, actual, .. }) => {
                assert_eq!(expected, 0);
                assert_eq!(actual, 1);
            }
            _ => panic!("expected RevisionMismatch error"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reindex_when_another_user_takes_over_the_task() {
        let store = InMemoryTaskStore::new();
        store.insert(Task::new("task-0001", "workspace-0001", "Write the report")).await;
        store
            .update_tracking("task-0001", 0, Some(session("user-0001", T0)))
            .await
            .unwrap();

        store
            .update_tracking("task-0001", 1, Some(session("user-0002", T0 + 60_000)))
            .await
            .unwrap();

        assert!(store.tracked_by_user("user-0001").await.unwrap().is_empty());
        let active = store.tracked_by_user("user-0002").await.unwrap();
        assert_eq!(active.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_order_active_tasks_most_recently_started_first() {
        let store = InMemoryTaskStore::new();
        store.insert(Task::new("task-0001", "workspace-0001", "Write the report")).await;
        store.insert(Task::new("task-0002", "workspace-0001", "Review the report")).await;
        store
            .update_tracking("task-0001", 0, Some(session("user-0001", T0)))
            .await
            .unwrap();
        store
            .update_tracking("task-0002", 0, Some(session("user-0001", T0 + 30_000)))
            .await
            .unwrap();

        let active = store.tracked_by_user("user-0001").await.unwrap();

        assert_eq!(active.len(), 2);
        assert_eq!(active[0].id, "task-0002");
        assert_eq!(active[1].id, "task-0001");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_bump_the_revision_when_writing_the_aggregate() {
        let store = InMemoryTaskStore::new();
        store.insert(Task::new("task-0001", "workspace-0001", "Write the report")).await;

        store.set_time_tracked("task-0001", 125).await.unwrap();

        let task = store.get("task-0001").await.unwrap();
        assert_eq!(task.time_tracked, 125);
        assert_eq!(task.revision, 0);
    }
}
