// A time entry is an immutable closed interval of work credited to one user.
//
// Purpose
// - Record either an automatically closed tracking session or a manually
//   added interval, with the duration stored redundantly for aggregation.
//
// Notes
// - `user_name` is captured when the entry is created, not joined live, so
//   entries keep showing the name as of when the work was logged.
// - Timestamps are epoch milliseconds; `duration` is whole seconds, floored.

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeEntry {
    pub id: String,
    pub task_id: String,
    pub user_id: String,
    pub user_name: String,
    pub start_time: i64,
    pub end_time: i64,
    pub duration: i64,
    pub description: String,
}

impl TimeEntry {
    pub fn new(
        id: impl Into<String>,
        task_id: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        start_time: i64,
        end_time: i64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            task_id: task_id.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            start_time,
            end_time,
            duration: duration_secs(start_time, end_time),
            description: description.into(),
        }
    }
}

/// Elapsed whole seconds between two millisecond timestamps, rounded towards
/// negative infinity so sub-second intervals count as zero.
pub fn duration_secs(start_ms: i64, end_ms: i64) -> i64 {
    (end_ms - start_ms).div_euclid(1_000)
}
