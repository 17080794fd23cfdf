use serde::{Deserialize, Serialize};

use crate::time_utils::parse_date;
use crate::types::{NamedRef, Project, TaskAssignment, TimeEntry, User};

use super::ApiError;

/// A page of a Harvest list endpoint.
pub trait Page {
    type Item;

    fn into_parts(self) -> (Vec<Self::Item>, Option<u32>);
}

#[derive(Deserialize)]
pub struct UserDto {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        User {
            id: dto.id,
            first_name: dto.first_name,
            last_name: dto.last_name,
        }
    }
}

#[derive(Deserialize)]
pub struct TimeEntryDto {
    pub id: u64,
    pub spent_date: String,
    #[serde(default)]
    pub hours: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub is_running: bool,
    #[serde(default)]
    pub billable: bool,
    pub client: NamedRef,
    pub project: NamedRef,
    pub task: NamedRef,
}

impl TryFrom<TimeEntryDto> for TimeEntry {
    type Error = ApiError;

    fn try_from(dto: TimeEntryDto) -> Result<Self, Self::Error> {
        let spent_date = parse_date(&dto.spent_date).ok_or_else(|| {
            ApiError::MalformedResponse(format!("invalid spent_date {:?}", dto.spent_date))
        })?;
        Ok(TimeEntry {
            id: dto.id,
            client: dto.client,
            project: dto.project,
            task: dto.task,
            notes: dto.notes.unwrap_or_default(),
            hours: dto.hours.unwrap_or(0.0).max(0.0),
            spent_date,
            is_running: dto.is_running,
            is_locked: dto.is_locked,
            is_billable: dto.billable,
        })
    }
}

#[derive(Deserialize)]
pub struct TimeEntriesPage {
    pub time_entries: Vec<TimeEntryDto>,
    pub next_page: Option<u32>,
}

impl Page for TimeEntriesPage {
    type Item = TimeEntryDto;

    fn into_parts(self) -> (Vec<Self::Item>, Option<u32>) {
        (self.time_entries, self.next_page)
    }
}

#[derive(Deserialize)]
pub struct ProjectDto {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub client: Option<NamedRef>,
}

impl From<ProjectDto> for Project {
    fn from(dto: ProjectDto) -> Self {
        Project {
            id: dto.id,
            name: dto.name,
            client: dto.client.unwrap_or_else(|| NamedRef::new(0, "(no client)")),
        }
    }
}

#[derive(Deserialize)]
pub struct ProjectsPage {
    pub projects: Vec<ProjectDto>,
    pub next_page: Option<u32>,
}

impl Page for ProjectsPage {
    type Item = ProjectDto;

    fn into_parts(self) -> (Vec<Self::Item>, Option<u32>) {
        (self.projects, self.next_page)
    }
}

#[derive(Deserialize)]
pub struct TaskAssignmentDto {
    pub project: NamedRef,
    pub task: NamedRef,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl From<TaskAssignmentDto> for TaskAssignment {
    fn from(dto: TaskAssignmentDto) -> Self {
        TaskAssignment {
            project_id: dto.project.id,
            task: dto.task,
        }
    }
}

#[derive(Deserialize)]
pub struct TaskAssignmentsPage {
    pub task_assignments: Vec<TaskAssignmentDto>,
    pub next_page: Option<u32>,
}

impl Page for TaskAssignmentsPage {
    type Item = TaskAssignmentDto;

    fn into_parts(self) -> (Vec<Self::Item>, Option<u32>) {
        (self.task_assignments, self.next_page)
    }
}

#[derive(Serialize)]
pub struct CreateTimeEntryRequest<'a> {
    pub project_id: u64,
    pub task_id: u64,
    pub spent_date: String,
    pub hours: f64,
    pub notes: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable: Option<bool>,
}

#[derive(Serialize)]
pub struct UpdateTimeEntryRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_time_entry_page_parses() {
        let raw = r#"{
            "time_entries": [{
                "id": 636708426,
                "spent_date": "2026-10-16",
                "hours": 1.25,
                "notes": null,
                "is_locked": true,
                "is_running": false,
                "billable": true,
                "client": {"id": 5735776, "name": "123 Industries"},
                "project": {"id": 14307913, "name": "Marketing Website", "code": "MW"},
                "task": {"id": 8083365, "name": "Graphic Design"},
                "user": {"id": 1782959, "name": "Kim Allen"}
            }],
            "per_page": 100,
            "total_pages": 2,
            "next_page": 2,
            "page": 1
        }"#;

        let page: TimeEntriesPage = serde_json::from_str(raw).unwrap();
        let (items, next) = page.into_parts();
        assert_eq!(next, Some(2));

        let entry = TimeEntry::try_from(items.into_iter().next().unwrap()).unwrap();
        assert_eq!(entry.spent_date, date!(2026 - 10 - 16));
        assert_eq!(entry.notes, "");
        assert!(entry.is_locked);
        assert!(entry.is_billable);
        assert_eq!(entry.project.name, "Marketing Website");
    }

    #[test]
    fn test_bad_spent_date_is_malformed() {
        let dto = TimeEntryDto {
            id: 1,
            spent_date: "16/10/2026".to_string(),
            hours: Some(1.0),
            notes: None,
            is_locked: false,
            is_running: false,
            billable: false,
            client: NamedRef::new(1, "c"),
            project: NamedRef::new(2, "p"),
            task: NamedRef::new(3, "t"),
        };
        assert!(matches!(
            TimeEntry::try_from(dto),
            Err(ApiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_update_request_skips_unset_fields() {
        let body = UpdateTimeEntryRequest {
            hours: Some(1.5),
            notes: Some("standup"),
            task_id: None,
            billable: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"hours":1.5,"notes":"standup"}"#
        );
    }
}
