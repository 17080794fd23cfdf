use crate::app::{App, View};

use super::super::commands::Command;

pub(super) fn handle_help_key(app: &mut App) -> Vec<Command> {
    app.navigate_to(View::List);
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::super::keys::*;
    use crate::app::{fixtures, View};
    use crate::runtime::commands::Event;
    use crate::runtime::update::update;

    #[test]
    fn any_key_dismisses_help() {
        let mut app = fixtures::app();
        update(&mut app, Event::Key(char('?')));
        assert_eq!(app.view, View::Help);
        update(&mut app, Event::Key(char('x')));
        assert_eq!(app.view, View::List);
        assert!(app.running);
    }

    #[test]
    fn ctrl_c_still_quits_from_help() {
        let mut app = fixtures::app();
        app.view = View::Help;
        update(&mut app, Event::Key(ctrl('c')));
        assert!(!app.running);
    }
}
