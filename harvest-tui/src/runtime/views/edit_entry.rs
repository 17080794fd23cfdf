use crate::app::{App, EditField, View};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::commands::Command;
use super::super::messages::open_edit_task_picker;
use super::super::update::request_catalog;
use super::{capitalize, edit_text, is_ctrl, STILL_SAVING};

pub(super) fn handle_edit_entry_key(key: KeyEvent, app: &mut App) -> Vec<Command> {
    let Some(draft) = app.edit_draft_mut() else {
        return Vec::new();
    };
    let field = draft.field;

    if is_ctrl(&key, 'b') {
        draft.billable = !draft.billable;
        return Vec::new();
    }
    if is_ctrl(&key, 's') {
        return save(app);
    }

    match key.code {
        KeyCode::Tab => draft.field = field.next(),
        KeyCode::BackTab => draft.field = field.prev(),
        KeyCode::Esc => app.back_to_list(),
        KeyCode::Enter if field == EditField::Task => return select_task(app),
        KeyCode::Enter => {}
        _ => match field {
            EditField::Notes => {
                edit_text(&mut draft.notes, &key);
            }
            EditField::Duration => {
                edit_text(&mut draft.duration, &key);
            }
            EditField::Task => {}
        },
    }
    Vec::new()
}

fn select_task(app: &mut App) -> Vec<Command> {
    let Some(draft) = app.edit_draft() else {
        return Vec::new();
    };
    let (project_id, task_id) = (draft.original.project.id, draft.task.id);

    if !app.catalog_loaded {
        if let Some(draft) = app.edit_draft_mut() {
            draft.pending_task_edit = true;
        }
        app.set_info("Loading tasks...");
        if app.catalog_loading {
            return Vec::new();
        }
        return vec![request_catalog(app)];
    }

    match open_edit_task_picker(app, project_id, task_id) {
        Some(picker) => app.navigate_to(View::SelectTask(picker)),
        None => app.set_error("This project is no longer available"),
    }
    Vec::new()
}

fn save(app: &mut App) -> Vec<Command> {
    if app.saving {
        app.set_info(STILL_SAVING);
        return Vec::new();
    }
    let Some(draft) = app.edit_draft() else {
        return Vec::new();
    };
    let id = draft.original.id;
    match draft.to_patch() {
        Ok(patch) => {
            app.saving = true;
            app.set_info("Saving...");
            vec![Command::UpdateEntry { id, patch }]
        }
        Err(e) => {
            app.set_error(capitalize(&e.to_string()));
            Vec::new()
        }
    }
}
