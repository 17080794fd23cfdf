use serde::{Deserialize, Serialize};
use time::Date;

/// An id + display name pair, used for clients, projects and tasks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NamedRef {
    pub id: u64,
    pub name: String,
}

impl NamedRef {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A time entry as owned by the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    pub id: u64,
    pub client: NamedRef,
    pub project: NamedRef,
    pub task: NamedRef,
    pub notes: String,
    pub hours: f64,
    pub spent_date: Date,
    pub is_running: bool,
    pub is_locked: bool,
    pub is_billable: bool,
}

/// A project as returned by the project listing, before tasks are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub client: NamedRef,
}

/// One task assignable on one project.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskAssignment {
    pub project_id: u64,
    pub task: NamedRef,
}

/// A project together with the tasks that can be logged against it.
/// The task list is never empty once built by `catalog::build_catalog`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectWithTasks {
    pub id: u64,
    pub name: String,
    pub client: NamedRef,
    pub tasks: Vec<NamedRef>,
}

impl ProjectWithTasks {
    pub fn label(&self) -> String {
        format!("{} - {}", self.client.name, self.name)
    }

    pub fn task_position(&self, task_id: u64) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }
}

/// A remembered (client, project, task) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecentSelection {
    pub client_id: u64,
    pub project_id: u64,
    pub task_id: u64,
}

impl RecentSelection {
    pub fn new(client_id: u64, project_id: u64, task_id: u64) -> Self {
        Self {
            client_id,
            project_id,
            task_id,
        }
    }
}

/// The authenticated user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Payload for creating a new (stopped) entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimeEntry {
    pub project_id: u64,
    pub task_id: u64,
    pub spent_date: Date,
    pub hours: f64,
    pub notes: String,
    pub billable: Option<bool>,
}

/// Partial update of an entry. `None` fields are left unchanged remotely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub hours: Option<f64>,
    pub notes: Option<String>,
    pub task_id: Option<u64>,
    pub billable: Option<bool>,
}
