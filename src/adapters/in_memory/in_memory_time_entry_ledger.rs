// In memory implementation of the TimeEntryLedger port.
//
// Purpose
// - Support handler tests and local development without a database.
//
// Responsibilities
// - Store fully-formed entries and serve them newest first per task.

use tokio::sync::RwLock;

use crate::core::ports::{LedgerError, TimeEntryLedger};
use crate::core::time_entry::TimeEntry;

#[derive(Default)]
pub struct InMemoryTimeEntryLedger {
    entries: RwLock<Vec<TimeEntry>>,
}

impl InMemoryTimeEntryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TimeEntryLedger for InMemoryTimeEntryLedger {
    async fn append(&self, entry: TimeEntry) -> Result<(), LedgerError> {
        let mut guard = self.entries.write().await;
        guard.push(entry);
        Ok(())
    }

    async fn get(&self, entry_id: &str) -> Result<TimeEntry, LedgerError> {
        let guard = self.entries.read().await;
        guard
            .iter()
            .find(|entry| entry.id == entry_id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(entry_id.to_string()))
    }

    async fn remove(&self, entry_id: &str) -> Result<TimeEntry, LedgerError> {
        let mut guard = self.entries.write().await;
        let index = guard
            .iter()
            .position(|entry| entry.id == entry_id)
            .ok_or_else(|| LedgerError::NotFound(entry_id.to_string()))?;
        Ok(guard.remove(index))
    }

    async fn list_by_task(&self, task_id: &str) -> Result<Vec<TimeEntry>, LedgerError> {
        let guard = self.entries.read().await;
        let mut entries: Vec<TimeEntry> = guard
            .iter()
            .filter(|entry| entry.task_id == task_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(entries)
    }
}
