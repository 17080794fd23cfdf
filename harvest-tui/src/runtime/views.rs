use crate::app::{App, TextInput, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::commands::Command;

mod confirm_delete;
mod edit_entry;
mod help;
mod list;
mod new_entry_form;
mod selection;
mod wizard;

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App) -> Vec<Command> {
    match app.view.clone() {
        View::Loading(_) => Vec::new(),
        View::List => list::handle_list_key(key, app),
        View::SelectProject(picker) => selection::handle_select_project_key(key, app, picker),
        View::SelectTask(picker) => selection::handle_select_task_key(key, app, picker),
        View::NewEntryForm => new_entry_form::handle_new_entry_form_key(key, app),
        View::NotesInput => wizard::handle_notes_key(key, app),
        View::DurationInput => wizard::handle_duration_key(key, app),
        View::BillableToggle => wizard::handle_billable_key(key, app),
        View::EditEntry => edit_entry::handle_edit_entry_key(key, app),
        View::ConfirmDelete(target) => confirm_delete::handle_confirm_delete_key(key, app, target),
        View::Help => help::handle_help_key(app),
    }
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// Apply a line-editing key to `input`. Returns false when the key is not an edit.
fn edit_text(input: &mut TextInput, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => input.clear(),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            input.insert(c)
        }
        KeyCode::Backspace => input.backspace(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => return false,
    }
    true
}

/// Shown when a submit or a way out of the submitting view is tried while a save is in flight.
const STILL_SAVING: &str = "Still saving, hold on";

/// Validate the new-entry draft and issue the create. Problems become a status message.
fn submit_new_entry(app: &mut App) -> Vec<Command> {
    if app.saving {
        app.set_info(STILL_SAVING);
        return Vec::new();
    }
    let Some(draft) = app.new_draft() else {
        return Vec::new();
    };
    match draft.to_new_entry() {
        Ok(entry) => {
            app.saving = true;
            app.set_info("Creating entry...");
            vec![Command::CreateEntry(entry)]
        }
        Err(e) => {
            app.set_error(capitalize(&e.to_string()));
            Vec::new()
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
pub(super) mod keys {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    pub fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn char(c: char) -> KeyEvent {
        press(KeyCode::Char(c))
    }

    pub fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}
