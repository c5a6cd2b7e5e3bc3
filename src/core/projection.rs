// Read-side projection of elapsed time, for live display only.
//
// Purpose
// - Reconstruct "time spent so far including the open session" from the
//   authoritative fields the server persists: `time_tracked` plus the
//   session start.
//
// Boundaries
// - Display math only. Nothing here is authoritative and nothing here may
//   ever be written back to the server.

use crate::core::task::Task;
use crate::core::time_entry::duration_secs;

/// Cadence at which a consumer is expected to re-evaluate the projection.
pub const DISPLAY_REFRESH_MS: u64 = 1_000;

/// Total seconds to display for a task right now: closed time plus the open
/// session's elapsed time, clamped so a skewed clock never shrinks the total.
pub fn projected_total_secs(task: &Task, now_ms: i64) -> i64 {
    let live = task
        .tracking
        .as_ref()
        .map(|session| duration_secs(session.started_at, now_ms).max(0))
        .unwrap_or(0);
    task.time_tracked + live
}

/// Client-side companion that carries the last synced server state between
/// refreshes. `sync` adopts authoritative state, `display_total` is the value
/// to render, and `apply_stop` replaces the local estimate with the duration
/// the server actually recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElapsedProjector {
    base_secs: i64,
    active_since: Option<i64>,
}

impl ElapsedProjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync(&mut self, task: &Task) {
        self.base_secs = task.time_tracked;
        self.active_since = task.tracking.as_ref().map(|session| session.started_at);
    }

    pub fn is_live(&self) -> bool {
        self.active_since.is_some()
    }

    pub fn display_total(&self, now_ms: i64) -> i64 {
        let live = self
            .active_since
            .map(|started_at| duration_secs(started_at, now_ms).max(0))
            .unwrap_or(0);
        self.base_secs + live
    }

    pub fn apply_stop(&mut self, duration: i64) {
        self.base_secs += duration.max(0);
        self.active_since = None;
    }
}

/// Renders seconds as `MM:SS`, or `HH:MM:SS` once a full hour is reached.
pub fn format_duration(total_secs: i64) -> String {
    let total = total_secs.max(0);
    let hours = total / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod projection_tests {
    use super::*;
    use crate::core::task::TrackingSession;
    use rstest::{fixture, rstest};

    const T0: i64 = 1_700_000_000_000;

    #[fixture]
    fn active_task() -> Task {
        let mut task = Task::new("task-0001", "workspace-0001", "Write the report");
        task.time_tracked = 300;
        task.tracking = Some(TrackingSession {
            user_id: "user-0001".to_string(),
            started_at: T0,
        });
        task
    }

    #[rstest]
    fn it_should_project_closed_time_only_for_an_idle_task() {
        let mut task = Task::new("task-0001", "workspace-0001", "Write the report");
        task.time_tracked = 300;

        assert_eq!(projected_total_secs(&task, T0), 300);
    }

    #[rstest]
    fn it_should_add_the_open_session_elapsed_time(active_task: Task) {
        assert_eq!(projected_total_secs(&active_task, T0 + 45_000), 345);
    }

    #[rstest]
    fn it_should_never_shrink_the_total_on_a_skewed_clock(active_task: Task) {
        assert_eq!(projected_total_secs(&active_task, T0 - 45_000), 300);
    }

    #[rstest]
    fn it_should_tick_from_the_last_synced_state(active_task: Task) {
        let mut projector = ElapsedProjector::new();
        projector.sync(&active_task);

        assert!(projector.is_live());
        assert_eq!(projector.display_total(T0 + 5_000), 305);
        assert_eq!(projector.display_total(T0 + 6_000), 306);
    }

    #[rstest]
    fn it_should_replace_the_local_estimate_with_the_server_duration(active_task: Task) {
        let mut projector = ElapsedProjector::new();
        projector.sync(&active_task);
        // Locally about 9 seconds have been displayed, but the server closed
        // the session at 7 seconds. The server figure wins.
        assert_eq!(projector.display_total(T0 + 9_400), 309);

        projector.apply_stop(7);

        assert!(!projector.is_live());
        assert_eq!(projector.display_total(T0 + 60_000), 307);
    }

    #[rstest]
    #[case(0, "00:00")]
    #[case(59, "00:59")]
    #[case(125, "02:05")]
    #[case(3_600, "01:00:00")]
    #[case(3_725, "01:02:05")]
    #[case(-5, "00:00")]
    fn it_should_format_durations_for_display(#[case] secs: i64, #[case] expected: &str) {
        assert_eq!(format_duration(secs), expected);
    }
}
