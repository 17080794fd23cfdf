use crate::app::navigation::{next_row, previous_row};
use crate::app::{App, PickerOrigin, ProjectPicker, TaskFlow, TaskPicker, View};
use crate::catalog::SelectionRow;
use crate::types::{NamedRef, ProjectWithTasks};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::commands::Command;

pub(super) fn handle_select_project_key(
    key: KeyEvent,
    app: &mut App,
    mut picker: ProjectPicker,
) -> Vec<Command> {
    let rows = app.selection_rows();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            picker.cursor = next_row(&rows, picker.cursor);
            app.view = View::SelectProject(picker);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            picker.cursor = previous_row(&rows, picker.cursor);
            app.view = View::SelectProject(picker);
        }
        KeyCode::Enter => match rows.get(picker.cursor).copied() {
            Some(SelectionRow::Project {
                catalog_index,
                recent_task_id,
            }) => {
                let project = app.catalog[catalog_index].clone();
                choose_project(app, picker, project, recent_task_id);
            }
            Some(SelectionRow::Divider) => {
                picker.cursor = next_row(&rows, picker.cursor);
                app.view = View::SelectProject(picker);
            }
            None => {}
        },
        KeyCode::Esc => match picker.origin {
            PickerOrigin::Wizard => app.back_to_list(),
            PickerOrigin::Form => app.navigate_to(View::NewEntryForm),
        },
        _ => {}
    }
    Vec::new()
}

fn choose_project(
    app: &mut App,
    picker: ProjectPicker,
    project: ProjectWithTasks,
    recent_task_id: Option<u64>,
) {
    match project.tasks.len() {
        0 => app.set_error(format!("{} has no tasks to log time against", project.label())),
        1 => {
            let task = project.tasks[0].clone();
            select_for_new_entry(app, picker.origin, project, task);
        }
        _ => {
            let cursor = recent_task_id
                .and_then(|id| project.task_position(id))
                .or_else(|| {
                    // Returning to a project already in the draft keeps its task highlighted.
                    let draft = app.new_draft()?;
                    let task = draft.task.as_ref()?;
                    (draft.project.as_ref()?.id == project.id)
                        .then(|| project.task_position(task.id))
                        .flatten()
                })
                .unwrap_or(0);
            app.navigate_to(View::SelectTask(TaskPicker {
                project,
                cursor,
                flow: TaskFlow::NewEntry {
                    origin: picker.origin,
                    project_cursor: picker.cursor,
                },
            }));
        }
    }
}

fn select_for_new_entry(
    app: &mut App,
    origin: PickerOrigin,
    project: ProjectWithTasks,
    task: NamedRef,
) {
    if let Some(draft) = app.new_draft_mut() {
        draft.project = Some(project);
        draft.task = Some(task);
    }
    match origin {
        PickerOrigin::Wizard => app.navigate_to(View::NotesInput),
        PickerOrigin::Form => app.navigate_to(View::NewEntryForm),
    }
}

pub(super) fn handle_select_task_key(
    key: KeyEvent,
    app: &mut App,
    mut picker: TaskPicker,
) -> Vec<Command> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if picker.cursor + 1 < picker.project.tasks.len() {
                picker.cursor += 1;
            }
            app.view = View::SelectTask(picker);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            picker.cursor = picker.cursor.saturating_sub(1);
            app.view = View::SelectTask(picker);
        }
        KeyCode::Enter => {
            let Some(task) = picker.project.tasks.get(picker.cursor).cloned() else {
                return Vec::new();
            };
            match picker.flow {
                TaskFlow::NewEntry { origin, .. } => {
                    select_for_new_entry(app, origin, picker.project, task)
                }
                TaskFlow::Edit => {
                    if let Some(draft) = app.edit_draft_mut() {
                        draft.task = task;
                    }
                    app.navigate_to(View::EditEntry);
                }
            }
        }
        KeyCode::Esc => match picker.flow {
            TaskFlow::NewEntry {
                origin,
                project_cursor,
            } => app.navigate_to(View::SelectProject(ProjectPicker {
                cursor: project_cursor,
                origin,
            })),
            TaskFlow::Edit => app.navigate_to(View::EditEntry),
        },
        _ => {}
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::super::keys::*;
    use super::*;
    use crate::app::{fixtures, Draft, EditDraft, NewEntryDraft, ViewKind};
    use crate::runtime::commands::Event;
    use crate::runtime::update::update;
    use crate::types::RecentSelection;

    fn key(app: &mut App, key: KeyEvent) {
        update(app, Event::Key(key));
    }

    fn wizard_app() -> App {
        let mut app = fixtures::app();
        key(&mut app, char('n'));
        app
    }

    #[test]
    fn single_task_project_is_auto_picked() {
        let mut app = wizard_app();
        // Catalog order: Acme Corp - Website Redesign, Globex - Support Retainer.
        key(&mut app, char('j'));
        key(&mut app, press(KeyCode::Enter));

        assert_eq!(app.view, View::NotesInput);
        let draft = app.new_draft().unwrap();
        assert_eq!(draft.project.as_ref().unwrap().id, 200);
        assert_eq!(draft.task.as_ref().unwrap().name, "Support");
    }

    #[test]
    fn multi_task_project_opens_task_selection() {
        let mut app = wizard_app();
        key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.view.kind(), ViewKind::SelectTask);

        key(&mut app, char('j'));
        key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.view, View::NotesInput);
        assert_eq!(app.new_draft().unwrap().task.as_ref().unwrap().id, 2);
    }

    #[test]
    fn recent_row_preselects_remembered_task() {
        let mut app = fixtures::app_with_recent(RecentSelection::new(10, 100, 2));
        key(&mut app, char('n'));
        key(&mut app, press(KeyCode::Enter));

        match &app.view {
            View::SelectTask(picker) => {
                assert_eq!(picker.project.id, 100);
                assert_eq!(picker.cursor, 1);
            }
            other => panic!("expected task selection, got {other:?}"),
        }
    }

    #[test]
    fn recent_row_with_missing_task_has_no_preselection() {
        let mut app = fixtures::app_with_recent(RecentSelection::new(10, 100, 99));
        key(&mut app, char('n'));
        key(&mut app, press(KeyCode::Enter));
        match &app.view {
            View::SelectTask(picker) => assert_eq!(picker.cursor, 0),
            other => panic!("expected task selection, got {other:?}"),
        }
    }

    #[test]
    fn cursor_skips_divider_between_recents_and_catalog() {
        let mut app = fixtures::app_with_recent(RecentSelection::new(20, 200, 4));
        key(&mut app, char('n'));
        key(&mut app, char('j'));
        assert_eq!(
            app.view,
            View::SelectProject(ProjectPicker {
                cursor: 2,
                origin: PickerOrigin::Wizard
            })
        );
    }

    #[test]
    fn divider_enter_only_advances_cursor() {
        let mut app = fixtures::app_with_recent(RecentSelection::new(20, 200, 4));
        app.draft = Some(Draft::New(NewEntryDraft::new(fixtures::DAY)));
        app.view = View::SelectProject(ProjectPicker {
            cursor: 1,
            origin: PickerOrigin::Wizard,
        });
        key(&mut app, press(KeyCode::Enter));
        assert_eq!(
            app.view,
            View::SelectProject(ProjectPicker {
                cursor: 2,
                origin: PickerOrigin::Wizard
            })
        );
        assert!(app.new_draft().unwrap().project.is_none());
    }

    #[test]
    fn esc_from_task_restores_project_cursor() {
        let mut app = fixtures::app_with_recent(RecentSelection::new(10, 100, 1));
        key(&mut app, char('n'));
        key(&mut app, char('j'));
        key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.view.kind(), ViewKind::SelectTask);

        key(&mut app, press(KeyCode::Esc));
        assert_eq!(
            app.view,
            View::SelectProject(ProjectPicker {
                cursor: 2,
                origin: PickerOrigin::Wizard
            })
        );
        assert!(app.new_draft().unwrap().project.is_none());
    }

    #[test]
    fn esc_from_wizard_project_discards_draft() {
        let mut app = wizard_app();
        key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.view, View::List);
        assert!(app.draft.is_none());
    }

    #[test]
    fn form_origin_returns_to_form() {
        let mut app = fixtures::app();
        key(&mut app, char('N'));
        key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.view.kind(), ViewKind::SelectProject);

        // Single-task project: auto-picked, back to the form.
        key(&mut app, char('j'));
        key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.view, View::NewEntryForm);
        assert_eq!(app.new_draft().unwrap().task.as_ref().unwrap().id, 4);

        key(&mut app, press(KeyCode::Enter));
        key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.view, View::NewEntryForm);
        assert!(app.new_draft().is_some());
    }

    #[test]
    fn edit_flow_task_selection_returns_to_edit() {
        let mut app = fixtures::app();
        app.draft = Some(Draft::Edit(EditDraft::from_entry(&app.entries[0])));
        app.view = View::SelectTask(TaskPicker {
            project: fixtures::catalog()[0].clone(),
            cursor: 1,
            flow: TaskFlow::Edit,
        });

        key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.view, View::EditEntry);
        assert_eq!(app.edit_draft().unwrap().task.id, 2);
    }

    #[test]
    fn edit_flow_esc_keeps_task() {
        let mut app = fixtures::app();
        app.draft = Some(Draft::Edit(EditDraft::from_entry(&app.entries[0])));
        app.view = View::SelectTask(TaskPicker {
            project: fixtures::catalog()[0].clone(),
            cursor: 1,
            flow: TaskFlow::Edit,
        });
        key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.view, View::EditEntry);
        assert_eq!(app.edit_draft().unwrap().task.id, 1);
    }
}
