use crate::api::TimeTrackingService;
use crate::app::App;
use crate::recents::RecentsStore;
use anyhow::{Context, Result};
use std::path::PathBuf;
use time::Date;

/// Where the recently used selections live.
pub enum RecentsSource {
    File(PathBuf),
    Memory,
}

/// Validate credentials and build the initial state. Entries and the catalog are
/// fetched by the engine itself once the event loop starts.
pub async fn initialize_app(
    service: &dyn TimeTrackingService,
    focused_date: Date,
    recents: RecentsSource,
) -> Result<App> {
    let user = service
        .validate_credentials()
        .await
        .context("Could not sign in to Harvest")?;
    tracing::info!(user_id = user.id, "credentials validated");

    Ok(App::new(user, focused_date, load_recents(recents)))
}

fn load_recents(source: RecentsSource) -> RecentsStore {
    match source {
        RecentsSource::Memory => RecentsStore::in_memory(Vec::new()),
        RecentsSource::File(path) => match RecentsStore::load(path) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("{e}; starting with no recent selections");
                RecentsStore::in_memory(Vec::new())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DevBackend;
    use crate::app::View;
    use time::macros::date;

    #[tokio::test]
    async fn builds_loading_app_for_date() {
        let day = date!(2026 - 10 - 16);
        let service = DevBackend::seeded(day);
        let app = initialize_app(&service, day, RecentsSource::Memory)
            .await
            .unwrap();
        assert_eq!(app.focused_date, day);
        assert!(matches!(app.view, View::Loading(_)));
        assert!(app.recents.items().is_empty());
        assert!(app.recents.path().is_none());
    }

    #[tokio::test]
    async fn corrupt_recents_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recents.json");
        std::fs::write(&path, "not json").unwrap();

        let day = date!(2026 - 10 - 16);
        let service = DevBackend::seeded(day);
        let app = initialize_app(&service, day, RecentsSource::File(path))
            .await
            .unwrap();
        assert!(app.recents.items().is_empty());
    }
}
