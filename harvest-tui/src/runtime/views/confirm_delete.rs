use crate::app::{App, View};
use crate::types::TimeEntry;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::commands::Command;
use super::STILL_SAVING;

pub(super) fn handle_confirm_delete_key(
    key: KeyEvent,
    app: &mut App,
    target: TimeEntry,
) -> Vec<Command> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            if app.saving {
                app.set_info(STILL_SAVING);
                return Vec::new();
            }
            app.saving = true;
            app.set_info("Deleting...");
            vec![Command::DeleteEntry { id: target.id }]
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.navigate_to(View::List);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::keys::*;
    use super::*;
    use crate::app::fixtures;
    use crate::runtime::commands::{Event, Message};
    use crate::runtime::update::update;

    #[test]
    fn confirm_issues_delete_and_waits() {
        let mut app = fixtures::app();
        let target = app.entries[1].clone();
        app.view = View::ConfirmDelete(target.clone());

        let commands = handle_confirm_delete_key(char('y'), &mut app, target);
        assert_eq!(commands, vec![Command::DeleteEntry { id: 2 }]);
        assert_eq!(app.entries.len(), 2);
    }

    #[test]
    fn cancel_returns_to_list() {
        let mut app = fixtures::app();
        let target = app.entries[0].clone();
        app.view = View::ConfirmDelete(target.clone());

        assert!(handle_confirm_delete_key(press(KeyCode::Esc), &mut app, target).is_empty());
        assert_eq!(app.view, View::List);
        assert_eq!(app.entries.len(), 2);
    }

    #[test]
    fn second_confirm_is_ignored_while_deleting() {
        let mut app = fixtures::app();
        let target = app.entries[0].clone();
        app.view = View::ConfirmDelete(target.clone());

        assert_eq!(
            handle_confirm_delete_key(char('y'), &mut app, target.clone()).len(),
            1
        );
        assert!(handle_confirm_delete_key(char('y'), &mut app, target).is_empty());
        assert!(app.saving);

        update(
            &mut app,
            Event::Message(Message::EntryDeleted { id: 1, result: Ok(()) }),
        );
        assert!(!app.saving);
        assert_eq!(app.view, View::List);
        assert_eq!(app.status.as_ref().unwrap().text, "Entry deleted");
    }
}
