use crate::types::{NamedRef, Project, ProjectWithTasks, RecentSelection, TaskAssignment};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One row of the project selection list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRow {
    /// Index into the catalog. `recent_task_id` is set for rows pinned from the recents list.
    Project {
        catalog_index: usize,
        recent_task_id: Option<u64>,
    },
    Divider,
}

impl SelectionRow {
    pub fn is_divider(&self) -> bool {
        matches!(self, SelectionRow::Divider)
    }
}

/// Attach task assignments to their projects. Projects without any task are dropped.
pub fn build_catalog(
    projects: Vec<Project>,
    assignments: Vec<TaskAssignment>,
) -> Vec<ProjectWithTasks> {
    let mut tasks_by_project: HashMap<u64, Vec<NamedRef>> = HashMap::new();
    for assignment in assignments {
        let tasks = tasks_by_project.entry(assignment.project_id).or_default();
        if !tasks.iter().any(|t| t.id == assignment.task.id) {
            tasks.push(assignment.task);
        }
    }

    let mut catalog: Vec<ProjectWithTasks> = projects
        .into_iter()
        .filter_map(|project| {
            let mut tasks = tasks_by_project.remove(&project.id)?;
            if tasks.is_empty() {
                return None;
            }
            tasks.sort_by(|a, b| a.name.cmp(&b.name));
            Some(ProjectWithTasks {
                id: project.id,
                name: project.name,
                client: project.client,
                tasks,
            })
        })
        .collect();

    sort_catalog(&mut catalog);
    catalog
}

/// Client name, then project name, case-sensitive ascending.
fn catalog_order(a: &ProjectWithTasks, b: &ProjectWithTasks) -> Ordering {
    a.client
        .name
        .cmp(&b.client.name)
        .then_with(|| a.name.cmp(&b.name))
}

pub fn sort_catalog(catalog: &mut [ProjectWithTasks]) {
    catalog.sort_by(catalog_order);
}

/// Recents pinned on top (stale ones skipped), a divider if any were pinned,
/// then the whole catalog in alphabetical order.
pub fn assemble_selection_list(
    catalog: &[ProjectWithTasks],
    recents: &[RecentSelection],
) -> Vec<SelectionRow> {
    let mut rows: Vec<SelectionRow> = recents
        .iter()
        .filter_map(|recent| {
            catalog
                .iter()
                .position(|p| p.id == recent.project_id && p.client.id == recent.client_id)
                .map(|catalog_index| SelectionRow::Project {
                    catalog_index,
                    recent_task_id: Some(recent.task_id),
                })
        })
        .collect();

    if !rows.is_empty() {
        rows.push(SelectionRow::Divider);
    }

    let mut order: Vec<usize> = (0..catalog.len()).collect();
    order.sort_by(|&a, &b| catalog_order(&catalog[a], &catalog[b]));
    rows.extend(order.into_iter().map(|catalog_index| SelectionRow::Project {
        catalog_index,
        recent_task_id: None,
    }));

    rows
}
