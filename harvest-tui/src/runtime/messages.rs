use time::Date;

use crate::api::ApiError;
use crate::app::{App, Draft, TaskFlow, TaskPicker, View};
use crate::types::{ProjectWithTasks, RecentSelection, TimeEntry};

use super::commands::{Command, Message};
use super::update::request_entries;

pub(super) fn handle_message(app: &mut App, message: Message) -> Vec<Command> {
    match message {
        Message::EntriesFetched {
            date,
            request_id,
            result,
        } => on_entries_fetched(app, date, request_id, result),
        Message::CatalogFetched(result) => on_catalog_fetched(app, result),
        Message::EntryCreated(result) => on_entry_created(app, result),
        Message::EntryUpdated { id, result } => on_entry_updated(app, id, result),
        Message::EntryDeleted { id, result } => on_entry_deleted(app, id, result),
        Message::TimerStarted { id, result } => on_timer_started(app, id, result),
        Message::TimerStopped { id, result } => on_timer_stopped(app, id, result),
        // Ticks are handled by the reducer itself.
        Message::Tick { .. } => Vec::new(),
    }
}

fn on_entries_fetched(
    app: &mut App,
    date: Date,
    request_id: u64,
    result: Result<Vec<TimeEntry>, ApiError>,
) -> Vec<Command> {
    if request_id != app.entries_request || date != app.focused_date {
        tracing::debug!(request_id, %date, "discarding stale entries response");
        return Vec::new();
    }

    app.entries_loading = false;
    match result {
        Ok(entries) => {
            tracing::debug!(count = entries.len(), %date, "entries loaded");
            app.entries = entries;
            app.clamp_selection();
            app.banners.entries = None;
        }
        Err(e) => {
            tracing::warn!("failed to load entries for {}: {}", date, e);
            app.banners.entries = Some(format!("Could not load entries: {}", e));
        }
    }

    if let View::Loading(loading) = &mut app.view {
        loading.entries_done = true;
    }
    finish_loading(app);
    Vec::new()
}

fn on_catalog_fetched(
    app: &mut App,
    result: Result<Vec<ProjectWithTasks>, ApiError>,
) -> Vec<Command> {
    app.catalog_loading = false;
    let fetched = result.is_ok();
    match result {
        Ok(catalog) => {
            tracing::debug!(projects = catalog.len(), "catalog loaded");
            app.catalog = catalog;
            app.catalog_loaded = true;
            app.banners.catalog = None;
        }
        Err(e) => {
            tracing::warn!("failed to load projects: {}", e);
            app.banners.catalog = Some(format!("Could not load projects: {}", e));
        }
    }

    if let View::Loading(loading) = &mut app.view {
        loading.catalog_done = true;
    }
    finish_loading(app);

    resume_pending_task_edit(app, fetched);
    Vec::new()
}

fn finish_loading(app: &mut App) {
    if let View::Loading(loading) = &app.view {
        if loading.is_complete() {
            app.view = View::List;
        }
    }
}

/// Open task selection for an edit that asked for it before the catalog was loaded.
fn resume_pending_task_edit(app: &mut App, fetched: bool) {
    if app.view != View::EditEntry {
        return;
    }
    let Some(draft) = app.edit_draft_mut() else {
        return;
    };
    if !draft.pending_task_edit {
        return;
    }
    draft.pending_task_edit = false;
    let project_id = draft.original.project.id;
    let current_task = draft.task.id;

    if !fetched {
        app.set_error("Could not load tasks for this project");
        return;
    }
    match open_edit_task_picker(app, project_id, current_task) {
        Some(picker) => app.navigate_to(View::SelectTask(picker)),
        None => app.set_error("This project is no longer available"),
    }
}

pub(super) fn open_edit_task_picker(
    app: &App,
    project_id: u64,
    current_task: u64,
) -> Option<TaskPicker> {
    let project = app.catalog.iter().find(|p| p.id == project_id)?.clone();
    let cursor = project.task_position(current_task).unwrap_or(0);
    Some(TaskPicker {
        project,
        cursor,
        flow: TaskFlow::Edit,
    })
}

fn on_entry_created(app: &mut App, result: Result<TimeEntry, ApiError>) -> Vec<Command> {
    app.saving = false;
    let entry = match result {
        Ok(entry) => entry,
        Err(e) => {
            tracing::warn!("failed to create entry: {}", e);
            app.set_error(format!("Could not create entry: {}", e));
            return Vec::new();
        }
    };

    tracing::info!(id = entry.id, "entry created");
    app.recents.add(RecentSelection::new(
        entry.client.id,
        entry.project.id,
        entry.task.id,
    ));
    if let Err(e) = app.recents.save() {
        tracing::warn!("failed to save recents: {}", e);
    }

    // The submitting view cannot be left while saving, so a new-entry draft here is the one sent.
    if matches!(app.draft, Some(Draft::New(_)))
        || matches!(app.view, View::BillableToggle | View::NewEntryForm)
    {
        app.back_to_list();
    }

    let mut commands = Vec::new();
    let running = entry.is_running;
    let summary = format!("{} - {}", entry.project.name, entry.task.name);
    if entry.spent_date == app.focused_date {
        app.entries.insert(0, entry);
        app.selected_entry_index = 0;
    }
    if running {
        commands.push(request_entries(app));
    }
    app.set_success(format!("Created entry for {}", summary));
    commands
}

fn on_entry_updated(app: &mut App, id: u64, result: Result<TimeEntry, ApiError>) -> Vec<Command> {
    app.saving = false;
    match result {
        Ok(entry) => {
            tracing::info!(id, "entry updated");
            app.patch_entry(entry);
            if app.edit_draft().is_some_and(|d| d.original.id == id) {
                app.back_to_list();
            }
            app.set_success("Entry saved");
        }
        Err(e) => {
            tracing::warn!(id, "failed to update entry: {}", e);
            app.set_error(format!("Could not save entry: {}", e));
        }
    }
    Vec::new()
}

fn on_entry_deleted(app: &mut App, id: u64, result: Result<(), ApiError>) -> Vec<Command> {
    app.saving = false;
    match result {
        Ok(()) => {
            tracing::info!(id, "entry deleted");
            app.remove_entry(id);
            if matches!(&app.view, View::ConfirmDelete(target) if target.id == id) {
                app.navigate_to(View::List);
            }
            app.set_success("Entry deleted");
        }
        Err(e) => {
            tracing::warn!(id, "failed to delete entry: {}", e);
            app.set_error(format!("Could not delete entry: {}", e));
        }
    }
    Vec::new()
}

fn on_timer_started(app: &mut App, id: u64, result: Result<TimeEntry, ApiError>) -> Vec<Command> {
    match result {
        Ok(entry) => {
            tracing::info!(id, "timer started");
            app.patch_entry(entry);
            app.set_success("Timer started");
            // Starting a timer stops any other one remotely; re-read the whole day.
            vec![request_entries(app)]
        }
        Err(e) => {
            tracing::warn!(id, "failed to start timer: {}", e);
            app.set_error(format!("Could not start timer: {}", e));
            Vec::new()
        }
    }
}

fn on_timer_stopped(app: &mut App, id: u64, result: Result<TimeEntry, ApiError>) -> Vec<Command> {
    match result {
        Ok(entry) => {
            tracing::info!(id, "timer stopped");
            app.patch_entry(entry);
            app.set_success("Timer stopped");
        }
        Err(e) => {
            tracing::warn!(id, "failed to stop timer: {}", e);
            app.set_error(format!("Could not stop timer: {}", e));
        }
    }
    Vec::new()
}
