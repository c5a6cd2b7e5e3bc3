// Pure transition rules for the tracking session lifecycle.
//
// Purpose
// - Validate a start or stop request against the current task state and
//   describe the effect to apply, without performing input or output.
//
// Responsibilities
// - A task can be started unless this same user already has it open.
// - Only the user who opened a session may close it.
// - Closing a session yields an interval to record only when at least one
//   whole second elapsed.

use thiserror::Error;

use crate::core::task::Task;
use crate::core::time_entry::duration_secs;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("task is already being tracked by you")]
    AlreadyTracking,
    #[error("task is not being tracked by you")]
    NotTrackingByYou,
}

/// An interval closed by a stop, ready to be materialized as a time entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedSession {
    pub user_id: String,
    pub start_time: i64,
    pub end_time: i64,
    pub duration: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopOutcome {
    pub stopped_at: i64,
    pub duration: i64,
    pub closed: Option<ClosedSession>,
}

pub fn decide_start(task: &Task, user_id: &str) -> Result<(), DecideError> {
    if task.tracked_by(user_id) {
        return Err(DecideError::AlreadyTracking);
    }
    Ok(())
}

pub fn decide_stop(task: &Task, user_id: &str, now_ms: i64) -> Result<StopOutcome, DecideError> {
    let session = match &task.tracking {
        Some(session) if session.user_id == user_id => session,
        _ => return Err(DecideError::NotTrackingByYou),
    };

    let duration = duration_secs(session.started_at, now_ms);
    if duration <= 0 {
        // Started and stopped within the same second, or the clock moved
        // backwards. The session still closes but no entry is recorded.
        return Ok(StopOutcome {
            stopped_at: now_ms,
            duration: 0,
            closed: None,
        });
    }

    Ok(StopOutcome {
        stopped_at: now_ms,
        duration,
        closed: Some(ClosedSession {
            user_id: session.user_id.clone(),
            start_time: session.started_at,
            end_time: now_ms,
            duration,
        }),
    })
}

#[cfg(test)]
mod tracking_decide_tests {
    use super::*;
    use crate::core::task::TrackingSession;
    use rstest::{fixture, rstest};

    const T0: i64 = 1_700_000_000_000;

    #[fixture]
    fn idle_task() -> Task {
        Task::new("task-0001", "workspace-0001", "Write the report")
    }

    #[fixture]
    fn active_task(idle_task: Task) -> Task {
        let mut task = idle_task;
        task.tracking = Some(TrackingSession {
            user_id: "user-0001".to_string(),
            started_at: T0,
        });
        task
    }

    #[rstest]
    fn it_should_allow_starting_an_idle_task(idle_task: Task) {
        assert_eq!(decide_start(&idle_task, "user-0001"), Ok(()));
    }

    #[rstest]
    fn it_should_reject_starting_a_task_the_user_already_tracks(active_task: Task) {
        assert_eq!(decide_start(&active_task, "user-0001"), Err(DecideError::AlreadyTracking));
    }

    #[rstest]
    fn it_should_allow_another_user_to_start_an_occupied_task(active_task: Task) {
        assert_eq!(decide_start(&active_task, "user-0002"), Ok(()));
    }

    #[rstest]
    fn it_should_close_a_session_with_the_elapsed_duration(active_task: Task) {
        let outcome = decide_stop(&active_task, "user-0001", T0 + 125_000).unwrap();

        assert_eq!(outcome.duration, 125);
        assert_eq!(
            outcome.closed,
            Some(ClosedSession {
                user_id: "user-0001".to_string(),
                start_time: T0,
                end_time: T0 + 125_000,
                duration: 125,
            })
        );
    }

    #[rstest]
    fn it_should_reject_a_stop_from_a_user_without_the_session(active_task: Task) {
        assert_eq!(
            decide_stop(&active_task, "user-0002", T0 + 125_000),
            Err(DecideError::NotTrackingByYou)
        );
    }

    #[rstest]
    fn it_should_reject_a_stop_on_an_idle_task(idle_task: Task) {
        assert_eq!(
            decide_stop(&idle_task, "user-0001", T0),
            Err(DecideError::NotTrackingByYou)
        );
    }

    #[rstest]
    #[case(0)]
    #[case(999)]
    fn it_should_close_a_sub_second_session_without_an_interval(active_task: Task, #[case] elapsed_ms: i64) {
        let outcome = decide_stop(&active_task, "user-0001", T0 + elapsed_ms).unwrap();

        assert_eq!(outcome.duration, 0);
        assert_eq!(outcome.closed, None);
    }

    #[rstest]
    fn it_should_close_a_session_stopped_behind_its_start_without_an_interval(active_task: Task) {
        let outcome = decide_stop(&active_task, "user-0001", T0 - 5_000).unwrap();

        assert_eq!(outcome.duration, 0);
        assert_eq!(outcome.closed, None);
    }
}
