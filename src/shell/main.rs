// Composition root for the time-tracking engine.
//
// Responsibilities
// - Read config from environment.
// - Instantiate concrete infrastructure implementations.
// - Wire implementations into the handlers and serve the HTTP router.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use task_tracking::adapters::clock::SystemClock;
use task_tracking::adapters::in_memory::in_memory_identity_directory::InMemoryIdentityDirectory;
use task_tracking::adapters::in_memory::in_memory_membership::InMemoryMembership;
use task_tracking::adapters::in_memory::in_memory_task_store::InMemoryTaskStore;
use task_tracking::adapters::in_memory::in_memory_time_entry_ledger::InMemoryTimeEntryLedger;
use task_tracking::core::task::Task;
use task_tracking::shell::config::HttpConfig;
use task_tracking::shell::http::router;
use task_tracking::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    // In-memory deps for now
    let task_store = Arc::new(InMemoryTaskStore::new());
    let ledger = Arc::new(InMemoryTimeEntryLedger::new());
    let membership = Arc::new(InMemoryMembership::new());
    let identities = Arc::new(InMemoryIdentityDirectory::new());
    seed(&task_store, &membership, &identities).await;

    let state = AppState::new(
        task_store,
        ledger,
        membership,
        identities,
        Arc::new(SystemClock),
    );

    let config = HttpConfig::from_env();
    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    tracing::info!("time tracking API listening on http://{}", config.addr());
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Seeds one workspace, one member and two tasks so the API is exercisable
/// out of the box.
async fn seed(
    task_store: &InMemoryTaskStore,
    membership: &InMemoryMembership,
    identities: &InMemoryIdentityDirectory,
) {
    membership.add_member("workspace-demo", "user-demo").await;
    identities
        .add_user("user-demo", Some("Demo User"), "demo@example.com")
        .await;
    task_store
        .insert(Task::new("task-demo-1", "workspace-demo", "Plan the sprint"))
        .await;
    task_store
        .insert(Task::new("task-demo-2", "workspace-demo", "Review the backlog"))
        .await;
    tracing::info!("seeded demo workspace 'workspace-demo' with user 'user-demo'");
}
