// Shared application state for the HTTP shell.
//
// Responsibilities
// - Wire ports into handlers once, in one place, for the binary and for
//   router-level tests.

use std::sync::Arc;

use crate::application::aggregator::TimeTrackedAggregator;
use crate::application::command_handlers::add_time_entry::AddTimeEntryHandler;
use crate::application::command_handlers::delete_time_entry::DeleteTimeEntryHandler;
use crate::application::command_handlers::start_tracking::StartTrackingHandler;
use crate::application::command_handlers::stop_tracking::StopTrackingHandler;
use crate::application::query_handlers::active_session::ActiveSessionHandler;
use crate::application::query_handlers::list_time_entries::ListTimeEntriesHandler;
use crate::core::ports::{Clock, IdentityDirectory, Membership, TaskStore, TimeEntryLedger};

#[derive(Clone)]
pub struct AppState {
    pub start_tracking: Arc<StartTrackingHandler>,
    pub stop_tracking: Arc<StopTrackingHandler>,
    pub add_time_entry: Arc<AddTimeEntryHandler>,
    pub delete_time_entry: Arc<DeleteTimeEntryHandler>,
    pub list_time_entries: Arc<ListTimeEntriesHandler>,
    pub active_session: Arc<ActiveSessionHandler>,
}

impl AppState {
    pub fn new(
        task_store: Arc<dyn TaskStore>,
        ledger: Arc<dyn TimeEntryLedger>,
        membership: Arc<dyn Membership>,
        identities: Arc<dyn IdentityDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let aggregator = Arc::new(TimeTrackedAggregator::new(task_store.clone(), ledger.clone()));
        let stop_tracking = Arc::new(StopTrackingHandler::new(
            task_store.clone(),
            ledger.clone(),
            membership.clone(),
            identities.clone(),
            clock.clone(),
            aggregator.clone(),
        ));
        let start_tracking = Arc::new(StartTrackingHandler::new(
            task_store.clone(),
            membership.clone(),
            clock,
            stop_tracking.clone(),
        ));
        let add_time_entry = Arc::new(AddTimeEntryHandler::new(
            task_store.clone(),
            ledger.clone(),
            membership.clone(),
            identities,
            aggregator.clone(),
        ));
        let delete_time_entry = Arc::new(DeleteTimeEntryHandler::new(
            task_store.clone(),
            ledger.clone(),
            membership.clone(),
            aggregator,
        ));
        let list_time_entries = Arc::new(ListTimeEntriesHandler::new(
            task_store.clone(),
            ledger,
            membership,
        ));
        let active_session = Arc::new(ActiveSessionHandler::new(task_store));

        Self {
            start_tracking,
            stop_tracking,
            add_time_entry,
            delete_time_entry,
            list_time_entries,
            active_session,
        }
    }
}
