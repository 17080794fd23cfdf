//! The step-by-step new entry flow: notes, duration, billable.

use crate::app::{App, View};
use crate::time_utils::parse_duration;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::commands::Command;
use super::{capitalize, edit_text, submit_new_entry, STILL_SAVING};
use crate::app::DraftError;

pub(super) fn handle_notes_key(key: KeyEvent, app: &mut App) -> Vec<Command> {
    match key.code {
        KeyCode::Enter => app.navigate_to(View::DurationInput),
        KeyCode::Esc => app.back_to_list(),
        _ => {
            if let Some(draft) = app.new_draft_mut() {
                edit_text(&mut draft.notes, &key);
            }
        }
    }
    Vec::new()
}

pub(super) fn handle_duration_key(key: KeyEvent, app: &mut App) -> Vec<Command> {
    match key.code {
        KeyCode::Enter => {
            let Some(draft) = app.new_draft() else {
                return Vec::new();
            };
            match parse_duration(&draft.duration.value) {
                Ok(_) => app.navigate_to(View::BillableToggle),
                Err(e) => app.set_error(capitalize(&DraftError::from(e).to_string())),
            }
        }
        KeyCode::Esc => app.navigate_to(View::NotesInput),
        _ => {
            if let Some(draft) = app.new_draft_mut() {
                edit_text(&mut draft.duration, &key);
            }
        }
    }
    Vec::new()
}

pub(super) fn handle_billable_key(key: KeyEvent, app: &mut App) -> Vec<Command> {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('b') | KeyCode::Tab => {
            if let Some(draft) = app.new_draft_mut() {
                draft.billable = !draft.billable;
            }
            Vec::new()
        }
        KeyCode::Char(c @ ('y' | 'n')) => {
            if let Some(draft) = app.new_draft_mut() {
                draft.billable = c == 'y';
            }
            Vec::new()
        }
        KeyCode::Enter => submit_new_entry(app),
        KeyCode::Esc if app.saving => {
            app.set_info(STILL_SAVING);
            Vec::new()
        }
        KeyCode::Esc => {
            app.navigate_to(View::DurationInput);
            Vec::new()
        }
        _ => Vec::new(),
    }
}
