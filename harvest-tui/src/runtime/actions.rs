use std::sync::Arc;
use std::time::Instant;

use crate::api::{ApiError, TimeTrackingService};
use crate::catalog::build_catalog;
use crate::types::ProjectWithTasks;

use super::commands::{Command, Message, MessageTx};

/// Run every command on its own task; completions come back through `message_tx`.
pub fn dispatch(
    commands: Vec<Command>,
    service: &Arc<dyn TimeTrackingService>,
    message_tx: &MessageTx,
) {
    for command in commands {
        tracing::debug!(?command, "dispatching command");
        let service = Arc::clone(service);
        let message_tx = message_tx.clone();
        tokio::spawn(async move {
            let message = execute(command, service.as_ref()).await;
            // The receiver only goes away when the app is shutting down.
            let _ = message_tx.send(message);
        });
    }
}

/// Perform one command against the service and wrap the outcome as a message.
pub async fn execute(command: Command, service: &dyn TimeTrackingService) -> Message {
    match command {
        Command::FetchEntries { date, request_id } => Message::EntriesFetched {
            date,
            request_id,
            result: service.fetch_entries(date).await,
        },
        Command::FetchCatalog => Message::CatalogFetched(fetch_catalog(service).await),
        Command::CreateEntry(entry) => Message::EntryCreated(service.create_entry(&entry).await),
        Command::UpdateEntry { id, patch } => Message::EntryUpdated {
            id,
            result: service.update_entry(id, &patch).await,
        },
        Command::DeleteEntry { id } => Message::EntryDeleted {
            id,
            result: service.delete_entry(id).await,
        },
        Command::StartTimer { id } => Message::TimerStarted {
            id,
            result: service.start_timer(id).await,
        },
        Command::StopTimer { id } => Message::TimerStopped {
            id,
            result: service.stop_timer(id).await,
        },
        Command::Tick { after } => {
            tokio::time::sleep(after).await;
            Message::Tick { at: Instant::now() }
        }
    }
}

async fn fetch_catalog(
    service: &dyn TimeTrackingService,
) -> Result<Vec<ProjectWithTasks>, ApiError> {
    let (projects, assignments) =
        tokio::try_join!(service.fetch_projects(), service.fetch_task_assignments())?;
    Ok(build_catalog(projects, assignments))
}
