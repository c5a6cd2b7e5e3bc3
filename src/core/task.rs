// Task tracking state as owned by the time-tracking engine.
//
// Purpose
// - Carry the subset of a task this engine reads and writes: the open
//   session and the cumulative tracked time.
//
// Notes
// - The open session is a single optional value, so the tracking flag, the
//   tracking user and the session start are always jointly present or
//   jointly absent.
// - All timestamps are epoch milliseconds; `time_tracked` is whole seconds
//   of closed work and never includes the open session.
// - `revision` guards read-modify-write of the session value. Aggregate
//   writes do not bump it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingSession {
    pub user_id: String,
    pub started_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub tracking: Option<TrackingSession>,
    pub time_tracked: i64,
    pub revision: i64,
}

impl Task {
    pub fn new(id: impl Into<String>, workspace_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            workspace_id: workspace_id.into(),
            name: name.into(),
            tracking: None,
            time_tracked: 0,
            revision: 0,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// True when the open session, if any, belongs to this user.
    pub fn tracked_by(&self, user_id: &str) -> bool {
        self.tracking.as_ref().is_some_and(|session| session.user_id == user_id)
    }
}
