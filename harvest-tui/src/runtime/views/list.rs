use crate::app::{App, Draft, EditDraft, NewEntryDraft, PickerOrigin, ProjectPicker, View};
use crate::time_utils::{describe_date, local_today};
use crate::types::TimeEntry;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::commands::Command;
use super::super::update::{quit, request_catalog, request_entries};

pub(super) fn handle_list_key(key: KeyEvent, app: &mut App) -> Vec<Command> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next_entry();
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous_entry();
            Vec::new()
        }
        KeyCode::Char('h') | KeyCode::Left => change_day(app, -1),
        KeyCode::Char('l') | KeyCode::Right => change_day(app, 1),
        KeyCode::Char('t') => {
            let today = local_today();
            if today == app.focused_date {
                return Vec::new();
            }
            app.focus_date(today);
            app.clear_status();
            vec![request_entries(app)]
        }
        KeyCode::Char('n') => start_new_entry(app, PickerOrigin::Wizard),
        KeyCode::Char('N') => start_new_entry(app, PickerOrigin::Form),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(entry) = guarded_target(app, "edited") {
                app.draft = Some(Draft::Edit(EditDraft::from_entry(&entry)));
                app.navigate_to(View::EditEntry);
            }
            Vec::new()
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(entry) = guarded_target(app, "deleted") {
                app.navigate_to(View::ConfirmDelete(entry));
            }
            Vec::new()
        }
        KeyCode::Char('s') | KeyCode::Char(' ') => toggle_timer(app),
        KeyCode::Char('r') => {
            app.set_info("Refreshing...");
            let mut commands = vec![request_entries(app)];
            if !app.catalog_loading {
                commands.push(request_catalog(app));
            }
            commands
        }
        KeyCode::Char('?') => {
            app.navigate_to(View::Help);
            Vec::new()
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            quit(app);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn change_day(app: &mut App, days: i64) -> Vec<Command> {
    app.shift_focused_date(days);
    app.set_info(describe_date(app.focused_date));
    vec![request_entries(app)]
}

fn start_new_entry(app: &mut App, origin: PickerOrigin) -> Vec<Command> {
    if app.catalog.is_empty() {
        if app.catalog_loaded {
            app.set_error("No projects with assigned tasks");
        } else {
            app.set_error("Projects are not loaded yet, press r to retry");
        }
        return Vec::new();
    }

    app.draft = Some(Draft::New(NewEntryDraft::new(app.focused_date)));
    match origin {
        PickerOrigin::Wizard => app.navigate_to(View::SelectProject(ProjectPicker::new(origin))),
        PickerOrigin::Form => app.navigate_to(View::NewEntryForm),
    }
    Vec::new()
}

/// The selected entry, if it may be edited or deleted. Otherwise says why not.
fn guarded_target(app: &mut App, verb: &str) -> Option<TimeEntry> {
    let entry = app.selected_entry()?.clone();
    if entry.is_locked {
        app.set_error(format!("Entry is locked and cannot be {}", verb));
        return None;
    }
    if entry.is_running {
        app.set_error(format!(
            "Timer is running, stop the timer first before this entry can be {}",
            verb
        ));
        return None;
    }
    Some(entry)
}

fn toggle_timer(app: &mut App) -> Vec<Command> {
    let Some(entry) = app.selected_entry() else {
        return Vec::new();
    };
    let (id, locked, running) = (entry.id, entry.is_locked, entry.is_running);

    if locked {
        app.set_error("Entry is locked, its timer cannot be started or stopped");
        return Vec::new();
    }
    if running {
        app.set_info("Stopping timer...");
        vec![Command::StopTimer { id }]
    } else {
        app.set_info("Starting timer...");
        vec![Command::StartTimer { id }]
    }
}
