use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use time::Date;

use crate::api::{ApiError, TimeTrackingService};
use crate::types::{
    EntryPatch, NamedRef, NewTimeEntry, Project, TaskAssignment, TimeEntry, User,
};

/// In-memory stand-in for Harvest, used by `harvest-tui dev` and tests.
///
/// Mirrors the remote rules the engine has to cope with: only one timer runs at a
/// time, and locked entries reject every mutation.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
}

#[derive(Debug)]
struct DevStore {
    entries: Vec<TimeEntry>,
    projects: Vec<Project>,
    assignments: Vec<TaskAssignment>,
    next_id: u64,
}

impl DevBackend {
    /// Seed demo data with today's entries on `today`.
    pub fn seeded(today: Date) -> Self {
        Self {
            store: Arc::new(Mutex::new(seed_dev_store(today))),
        }
    }

    fn with_store<T>(&self, f: impl FnOnce(&mut DevStore) -> T) -> T {
        let mut store = self.store.lock().expect("dev store lock poisoned");
        f(&mut store)
    }
}

impl DevStore {
    fn entry_mut(&mut self, id: u64) -> Result<&mut TimeEntry, ApiError> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ApiError::NotFound)
    }

    fn unlocked_entry_mut(&mut self, id: u64) -> Result<&mut TimeEntry, ApiError> {
        let entry = self.entry_mut(id)?;
        if entry.is_locked {
            return Err(rejected("Entry is locked and cannot be modified"));
        }
        Ok(entry)
    }

    fn task_for(&self, project_id: u64, task_id: u64) -> Result<NamedRef, ApiError> {
        self.assignments
            .iter()
            .find(|a| a.project_id == project_id && a.task.id == task_id)
            .map(|a| a.task.clone())
            .ok_or_else(|| rejected("Task is not assigned to this project"))
    }
}

fn rejected(message: &str) -> ApiError {
    ApiError::RemoteRejected {
        status: 422,
        message: message.to_string(),
    }
}

#[async_trait]
impl TimeTrackingService for DevBackend {
    async fn validate_credentials(&self) -> Result<User, ApiError> {
        Ok(User {
            id: 1,
            first_name: "Dev".to_string(),
            last_name: "User".to_string(),
        })
    }

    async fn fetch_entries(&self, date: Date) -> Result<Vec<TimeEntry>, ApiError> {
        Ok(self.with_store(|store| {
            let mut entries: Vec<TimeEntry> = store
                .entries
                .iter()
                .filter(|e| e.spent_date == date)
                .cloned()
                .collect();
            // Newest first, like the remote listing.
            entries.sort_by(|a, b| b.id.cmp(&a.id));
            entries
        }))
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>, ApiError> {
        Ok(self.with_store(|store| store.projects.clone()))
    }

    async fn fetch_task_assignments(&self) -> Result<Vec<TaskAssignment>, ApiError> {
        Ok(self.with_store(|store| store.assignments.clone()))
    }

    async fn create_entry(&self, entry: &NewTimeEntry) -> Result<TimeEntry, ApiError> {
        self.with_store(|store| {
            let project = store
                .projects
                .iter()
                .find(|p| p.id == entry.project_id)
                .cloned()
                .ok_or(ApiError::NotFound)?;
            let task = store.task_for(project.id, entry.task_id)?;

            let created = TimeEntry {
                id: store.next_id,
                client: project.client.clone(),
                project: NamedRef::new(project.id, project.name),
                task,
                notes: entry.notes.clone(),
                hours: entry.hours,
                spent_date: entry.spent_date,
                is_running: false,
                is_locked: false,
                is_billable: entry.billable.unwrap_or(true),
            };
            store.next_id += 1;
            store.entries.push(created.clone());
            Ok(created)
        })
    }

    async fn update_entry(&self, id: u64, patch: &EntryPatch) -> Result<TimeEntry, ApiError> {
        self.with_store(|store| {
            let project_id = store.unlocked_entry_mut(id)?.project.id;
            let task = match patch.task_id {
                Some(task_id) => Some(store.task_for(project_id, task_id)?),
                None => None,
            };

            let entry = store.unlocked_entry_mut(id)?;
            if let Some(hours) = patch.hours {
                entry.hours = hours;
            }
            if let Some(notes) = &patch.notes {
                entry.notes = notes.clone();
            }
            if let Some(task) = task {
                entry.task = task;
            }
            if let Some(billable) = patch.billable {
                entry.is_billable = billable;
            }
            Ok(entry.clone())
        })
    }

    async fn delete_entry(&self, id: u64) -> Result<(), ApiError> {
        self.with_store(|store| {
            store.unlocked_entry_mut(id)?;
            store.entries.retain(|e| e.id != id);
            Ok(())
        })
    }

    async fn start_timer(&self, id: u64) -> Result<TimeEntry, ApiError> {
        self.with_store(|store| {
            store.unlocked_entry_mut(id)?;
            for entry in store.entries.iter_mut() {
                entry.is_running = entry.id == id;
            }
            store.entry_mut(id).map(|e| e.clone())
        })
    }

    async fn stop_timer(&self, id: u64) -> Result<TimeEntry, ApiError> {
        self.with_store(|store| {
            let entry = store.unlocked_entry_mut(id)?;
            entry.is_running = false;
            Ok(entry.clone())
        })
    }
}

fn seed_dev_store(today: Date) -> DevStore {
    let acme = NamedRef::new(10, "Acme Corp");
    let globex = NamedRef::new(20, "Globex");
    let initech = NamedRef::new(30, "Initech");

    let project = |id: u64, name: &str, client: &NamedRef| Project {
        id,
        name: name.to_string(),
        client: client.clone(),
    };
    let assign = |project_id: u64, task_id: u64, name: &str| TaskAssignment {
        project_id,
        task: NamedRef::new(task_id, name),
    };

    let projects = vec![
        project(100, "Website Redesign", &acme),
        project(101, "Mobile App", &acme),
        project(200, "Support Retainer", &globex),
        // No task assignments: never offered for selection.
        project(300, "TPS Reports", &initech),
    ];
    let assignments = vec![
        assign(100, 1, "Design"),
        assign(100, 2, "Development"),
        assign(100, 3, "Meetings"),
        assign(101, 2, "Development"),
        assign(200, 4, "Support"),
        assign(200, 3, "Meetings"),
    ];

    let entry = |id: u64, project: &Project, task: NamedRef, notes: &str, hours: f64| TimeEntry {
        id,
        client: project.client.clone(),
        project: NamedRef::new(project.id, project.name.clone()),
        task,
        notes: notes.to_string(),
        hours,
        spent_date: today,
        is_running: false,
        is_locked: false,
        is_billable: true,
    };

    let mut entries = vec![
        entry(
            1,
            &projects[0],
            NamedRef::new(1, "Design"),
            "Landing page mockups",
            1.5,
        ),
        entry(
            2,
            &projects[2],
            NamedRef::new(4, "Support"),
            "Ticket triage",
            0.75,
        ),
        entry(
            3,
            &projects[1],
            NamedRef::new(2, "Development"),
            "Offline sync",
            0.5,
        ),
    ];
    entries[1].is_locked = true;
    entries[2].is_running = true;

    DevStore {
        entries,
        projects,
        assignments,
        next_id: 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn backend() -> DevBackend {
        DevBackend::seeded(date!(2026 - 10 - 16))
    }

    #[tokio::test]
    async fn test_fetch_entries_filters_by_date() {
        let dev = backend();
        assert_eq!(dev.fetch_entries(date!(2026 - 10 - 16)).await.unwrap().len(), 3);
        assert!(dev
            .fetch_entries(date!(2026 - 10 - 15))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_start_timer_stops_other_running_entry() {
        let dev = backend();
        let started = dev.start_timer(1).await.unwrap();
        assert!(started.is_running);

        let entries = dev.fetch_entries(date!(2026 - 10 - 16)).await.unwrap();
        let running: Vec<u64> = entries.iter().filter(|e| e.is_running).map(|e| e.id).collect();
        assert_eq!(running, vec![1]);
    }

    #[tokio::test]
    async fn test_locked_entry_rejects_mutations() {
        let dev = backend();
        assert!(matches!(
            dev.start_timer(2).await,
            Err(ApiError::RemoteRejected { status: 422, .. })
        ));
        assert!(matches!(
            dev.delete_entry(2).await,
            Err(ApiError::RemoteRejected { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_and_update_entry() {
        let dev = backend();
        let created = dev
            .create_entry(&NewTimeEntry {
                project_id: 200,
                task_id: 3,
                spent_date: date!(2026 - 10 - 16),
                hours: 1.0,
                notes: "Weekly sync".to_string(),
                billable: Some(false),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 4);
        assert_eq!(created.client.name, "Globex");
        assert!(!created.is_billable);

        let updated = dev
            .update_entry(
                created.id,
                &EntryPatch {
                    hours: Some(2.0),
                    task_id: Some(4),
                    ..EntryPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.hours, 2.0);
        assert_eq!(updated.task.name, "Support");
        assert_eq!(updated.notes, "Weekly sync");
    }

    #[tokio::test]
    async fn test_create_with_unassigned_task_is_rejected() {
        let dev = backend();
        let result = dev
            .create_entry(&NewTimeEntry {
                project_id: 101,
                task_id: 1,
                spent_date: date!(2026 - 10 - 16),
                hours: 1.0,
                notes: String::new(),
                billable: None,
            })
            .await;
        assert!(matches!(result, Err(ApiError::RemoteRejected { .. })));
    }

    #[tokio::test]
    async fn test_missing_entry_is_not_found() {
        assert_eq!(backend().stop_timer(999).await, Err(ApiError::NotFound));
    }
}
