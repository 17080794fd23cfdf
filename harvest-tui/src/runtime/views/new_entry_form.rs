use crate::app::{App, NewEntryField, PickerOrigin, ProjectPicker, View};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::commands::Command;
use super::{edit_text, is_ctrl, submit_new_entry, STILL_SAVING};

pub(super) fn handle_new_entry_form_key(key: KeyEvent, app: &mut App) -> Vec<Command> {
    if is_ctrl(&key, 's') {
        return submit_new_entry(app);
    }
    let Some(field) = app.new_draft().map(|d| d.field) else {
        return Vec::new();
    };

    match key.code {
        KeyCode::Esc | KeyCode::Enter if app.saving => app.set_info(STILL_SAVING),
        KeyCode::Esc => app.back_to_list(),
        KeyCode::Tab => set_field(app, field.next()),
        KeyCode::BackTab => set_field(app, field.prev()),
        KeyCode::Enter if field == NewEntryField::Project => {
            let picker = ProjectPicker {
                cursor: current_project_row(app),
                origin: PickerOrigin::Form,
            };
            app.navigate_to(View::SelectProject(picker));
        }
        KeyCode::Char(' ') if field == NewEntryField::Billable => {
            if let Some(draft) = app.new_draft_mut() {
                draft.billable = !draft.billable;
            }
        }
        _ => {
            if let Some(draft) = app.new_draft_mut() {
                match field {
                    NewEntryField::Notes => {
                        edit_text(&mut draft.notes, &key);
                    }
                    NewEntryField::Duration => {
                        edit_text(&mut draft.duration, &key);
                    }
                    NewEntryField::Project | NewEntryField::Billable => {}
                }
            }
        }
    }
    Vec::new()
}

fn set_field(app: &mut App, field: NewEntryField) {
    if let Some(draft) = app.new_draft_mut() {
        draft.field = field;
    }
}

/// Row of the draft's project in the full catalog part of the list, or the top.
fn current_project_row(app: &App) -> usize {
    let Some(project_id) = app
        .new_draft()
        .and_then(|d| d.project.as_ref())
        .map(|p| p.id)
    else {
        return 0;
    };
    app.selection_rows()
        .iter()
        .rposition(|row| match row {
            crate::catalog::SelectionRow::Project { catalog_index, .. } => {
                app.catalog[*catalog_index].id == project_id
            }
            crate::catalog::SelectionRow::Divider => false,
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::super::keys::*;
    use super::*;
    use crate::app::{fixtures, Severity};
    use crate::runtime::commands::Event;
    use crate::runtime::update::update;

    fn key(app: &mut App, key: KeyEvent) -> Vec<Command> {
        update(app, Event::Key(key))
    }

    fn form_app() -> App {
        let mut app = fixtures::app();
        key(&mut app, char('N'));
        app
    }

    #[test]
    fn submit_without_project_is_a_validation_error() {
        let mut app = form_app();
        assert!(key(&mut app, ctrl('s')).is_empty());
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.severity, Severity::Error);
        assert_eq!(status.text, "Choose a project and task first");
        assert_eq!(app.view, View::NewEntryForm);
    }

    #[test]
    fn form_fills_and_submits() {
        let mut app = form_app();
        key(&mut app, press(KeyCode::Enter));
        key(&mut app, press(KeyCode::Enter));
        // Website Redesign has two tasks; take the second.
        key(&mut app, char('j'));
        key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.view, View::NewEntryForm);

        key(&mut app, press(KeyCode::Tab));
        for c in "Specs".chars() {
            key(&mut app, char(c));
        }
        key(&mut app, press(KeyCode::Tab));
        key(&mut app, ctrl('x'));
        for c in "2:15".chars() {
            key(&mut app, char(c));
        }
        key(&mut app, press(KeyCode::Tab));
        key(&mut app, char(' '));

        let commands = key(&mut app, ctrl('s'));
        match commands.as_slice() {
            [Command::CreateEntry(entry)] => {
                assert_eq!(entry.project_id, 100);
                assert_eq!(entry.task_id, 2);
                assert_eq!(entry.notes, "Specs");
                assert_eq!(entry.hours, 2.25);
                assert_eq!(entry.billable, Some(false));
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn backtab_wraps_to_billable() {
        let mut app = form_app();
        key(&mut app, press(KeyCode::BackTab));
        assert_eq!(app.new_draft().unwrap().field, NewEntryField::Billable);
    }

    #[test]
    fn reopening_selection_starts_at_chosen_project() {
        let mut app = form_app();
        key(&mut app, press(KeyCode::Enter));
        key(&mut app, char('j'));
        key(&mut app, press(KeyCode::Enter));
        key(&mut app, press(KeyCode::Enter));
        assert_eq!(
            app.view,
            View::SelectProject(ProjectPicker {
                cursor: 1,
                origin: PickerOrigin::Form
            })
        );
    }

    #[test]
    fn esc_cancels_form() {
        let mut app = form_app();
        key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.view, View::List);
        assert!(app.draft.is_none());
    }

    #[test]
    fn form_stays_open_while_saving() {
        let mut app = form_app();
        for _ in 0..3 {
            key(&mut app, press(KeyCode::Enter));
        }
        assert_eq!(app.view, View::NewEntryForm);
        assert_eq!(key(&mut app, ctrl('s')).len(), 1);

        key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.view, View::NewEntryForm);
        assert!(app.draft.is_some());
        key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.view, View::NewEntryForm);
        assert_eq!(app.status.as_ref().unwrap().text, "Still saving, hold on");
    }
}
