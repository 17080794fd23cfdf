//! What to draw, derived from [`App`] alone. The `ui` module only paints this.

use super::{App, EditField, NewEntryField, Severity, TextInput, View, ViewKind};
use crate::catalog::SelectionRow;
use crate::time_utils::{describe_date, format_hours};

#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub view: ViewKind,
    pub title: String,
    pub header: Header,
    pub banners: Vec<String>,
    pub body: Body,
    pub status: Option<StatusView>,
    pub hints: Vec<(&'static str, &'static str)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub user: String,
    pub date: String,
    pub day_total: String,
    pub refreshing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub text: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Loading {
        entries_done: bool,
        catalog_done: bool,
    },
    Entries {
        rows: Vec<EntryRow>,
        selected: usize,
    },
    Picker {
        prompt: String,
        rows: Vec<PickerRow>,
        selected: usize,
    },
    Form {
        fields: Vec<FormField>,
    },
    Confirm {
        lines: Vec<String>,
    },
    Help {
        bindings: Vec<(&'static str, &'static str)>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    pub project: String,
    pub task: String,
    pub notes: String,
    pub hours: String,
    pub running: bool,
    pub locked: bool,
    pub billable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickerRow {
    Item { label: String, recent: bool },
    Divider,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub focused: bool,
    /// Cursor column when the field is an editable text input with focus.
    pub cursor: Option<usize>,
}

impl FormField {
    fn fixed(label: &'static str, value: impl Into<String>, focused: bool) -> Self {
        Self {
            label,
            value: value.into(),
            focused,
            cursor: None,
        }
    }

    fn text(label: &'static str, input: &TextInput, focused: bool) -> Self {
        Self {
            label,
            value: input.value.clone(),
            focused,
            cursor: focused.then(|| input.cursor_column()),
        }
    }
}

const LIST_HINTS: &[(&str, &str)] = &[
    ("j/k", "move"),
    ("h/l", "day"),
    ("n", "new"),
    ("e", "edit"),
    ("d", "delete"),
    ("s", "start/stop"),
    ("r", "refresh"),
    ("?", "help"),
    ("q", "quit"),
];
const PICKER_HINTS: &[(&str, &str)] = &[("j/k", "move"), ("Enter", "choose"), ("Esc", "back")];
const TEXT_HINTS: &[(&str, &str)] = &[("Enter", "next"), ("Ctrl+X", "clear"), ("Esc", "back")];
const BILLABLE_HINTS: &[(&str, &str)] = &[
    ("Space", "toggle"),
    ("y/n", "yes/no"),
    ("Enter", "create"),
    ("Esc", "back"),
];
const FORM_HINTS: &[(&str, &str)] = &[
    ("Tab", "next field"),
    ("Enter", "choose project"),
    ("Ctrl+S", "create"),
    ("Esc", "cancel"),
];
const EDIT_HINTS: &[(&str, &str)] = &[
    ("Tab", "next field"),
    ("Enter", "change task"),
    ("Ctrl+B", "billable"),
    ("Ctrl+S", "save"),
    ("Esc", "discard"),
];
const CONFIRM_HINTS: &[(&str, &str)] = &[("y", "delete"), ("n", "cancel")];
const HELP_HINTS: &[(&str, &str)] = &[("any key", "close")];
const NO_HINTS: &[(&str, &str)] = &[];
const HELP_BINDINGS: &[(&str, &str)] = &[
    ("j / k, Up / Down", "move selection"),
    ("h / l, Left / Right", "previous / next day"),
    ("t", "jump to today"),
    ("n", "new entry, step by step"),
    ("N", "new entry as a form"),
    ("e, Enter", "edit selected entry"),
    ("d, Delete", "delete selected entry"),
    ("s, Space", "start / stop timer"),
    ("r", "refresh entries and projects"),
    ("q, Esc", "quit"),
    ("Ctrl+C", "quit from anywhere"),
];

pub fn describe(app: &App) -> Screen {
    let (title, body, hints) = match &app.view {
        View::Loading(loading) => (
            "Loading".to_string(),
            Body::Loading {
                entries_done: loading.entries_done,
                catalog_done: loading.catalog_done,
            },
            NO_HINTS,
        ),
        View::List => ("Time entries".to_string(), entries_body(app), LIST_HINTS),
        View::SelectProject(picker) => (
            "Select project".to_string(),
            Body::Picker {
                prompt: "Project".to_string(),
                rows: project_rows(app),
                selected: picker.cursor,
            },
            PICKER_HINTS,
        ),
        View::SelectTask(picker) => (
            "Select task".to_string(),
            Body::Picker {
                prompt: picker.project.label(),
                rows: picker
                    .project
                    .tasks
                    .iter()
                    .map(|t| PickerRow::Item {
                        label: t.name.clone(),
                        recent: false,
                    })
                    .collect(),
                selected: picker.cursor,
            },
            PICKER_HINTS,
        ),
        View::NotesInput => ("New entry: notes".to_string(), wizard_body(app), TEXT_HINTS),
        View::DurationInput => (
            "New entry: duration".to_string(),
            wizard_body(app),
            TEXT_HINTS,
        ),
        View::BillableToggle => (
            "New entry: billable".to_string(),
            wizard_body(app),
            BILLABLE_HINTS,
        ),
        View::NewEntryForm => ("New entry".to_string(), new_form_body(app), FORM_HINTS),
        View::EditEntry => ("Edit entry".to_string(), edit_body(app), EDIT_HINTS),
        View::ConfirmDelete(target) => (
            "Delete entry?".to_string(),
            Body::Confirm {
                lines: vec![
                    format!("{} - {}", target.project.name, target.task.name),
                    format!(
                        "{}  ·  {}",
                        describe_date(target.spent_date),
                        format_hours(target.hours)
                    ),
                    target.notes.clone(),
                ],
            },
            CONFIRM_HINTS,
        ),
        View::Help => (
            "Help".to_string(),
            Body::Help {
                bindings: HELP_BINDINGS.to_vec(),
            },
            HELP_HINTS,
        ),
    };

    Screen {
        view: app.view.kind(),
        title,
        header: Header {
            user: app.user.full_name(),
            date: describe_date(app.focused_date),
            day_total: format_hours(app.day_total()),
            refreshing: app.entries_loading || app.catalog_loading,
        },
        banners: app.banners.iter().map(str::to_string).collect(),
        body,
        status: app.status.as_ref().map(|s| StatusView {
            text: s.text.clone(),
            severity: s.severity,
        }),
        hints: hints.to_vec(),
    }
}

fn entries_body(app: &App) -> Body {
    let rows = app
        .entries
        .iter()
        .map(|e| EntryRow {
            project: format!("{} - {}", e.client.name, e.project.name),
            task: e.task.name.clone(),
            notes: e.notes.clone(),
            hours: format_hours(e.hours),
            running: e.is_running,
            locked: e.is_locked,
            billable: e.is_billable,
        })
        .collect();
    Body::Entries {
        rows,
        selected: app.selected_entry_index,
    }
}

fn project_rows(app: &App) -> Vec<PickerRow> {
    app.selection_rows()
        .into_iter()
        .map(|row| match row {
            SelectionRow::Project {
                catalog_index,
                recent_task_id,
            } => {
                let project = &app.catalog[catalog_index];
                let label = match recent_task_id.and_then(|id| {
                    project.tasks.iter().find(|t| t.id == id)
                }) {
                    Some(task) => format!("{} / {}", project.label(), task.name),
                    None => project.label(),
                };
                PickerRow::Item {
                    label,
                    recent: recent_task_id.is_some(),
                }
            }
            SelectionRow::Divider => PickerRow::Divider,
        })
        .collect()
}

fn selection_label(app: &App) -> String {
    match app.new_draft() {
        Some(draft) => match (&draft.project, &draft.task) {
            (Some(project), Some(task)) => format!("{} / {}", project.label(), task.name),
            _ => "(none)".to_string(),
        },
        None => String::new(),
    }
}

fn billable_label(billable: bool) -> &'static str {
    if billable {
        "yes"
    } else {
        "no"
    }
}

/// One step of the wizard: earlier answers shown fixed, the current one focused.
fn wizard_body(app: &App) -> Body {
    let Some(draft) = app.new_draft() else {
        return Body::Form { fields: Vec::new() };
    };
    let step = app.view.kind();
    let mut fields = vec![FormField::fixed("Project", selection_label(app), false)];

    fields.push(FormField::text(
        "Notes",
        &draft.notes,
        step == ViewKind::NotesInput,
    ));
    if step != ViewKind::NotesInput {
        fields.push(FormField::text(
            "Duration",
            &draft.duration,
            step == ViewKind::DurationInput,
        ));
    }
    if step == ViewKind::BillableToggle {
        fields.push(FormField::fixed(
            "Billable",
            billable_label(draft.billable),
            true,
        ));
    }
    Body::Form { fields }
}

fn new_form_body(app: &App) -> Body {
    let Some(draft) = app.new_draft() else {
        return Body::Form { fields: Vec::new() };
    };
    Body::Form {
        fields: vec![
            FormField::fixed(
                "Project",
                selection_label(app),
                draft.field == NewEntryField::Project,
            ),
            FormField::text("Notes", &draft.notes, draft.field == NewEntryField::Notes),
            FormField::text(
                "Duration",
                &draft.duration,
                draft.field == NewEntryField::Duration,
            ),
            FormField::fixed(
                "Billable",
                billable_label(draft.billable),
                draft.field == NewEntryField::Billable,
            ),
        ],
    }
}

fn edit_body(app: &App) -> Body {
    let Some(draft) = app.edit_draft() else {
        return Body::Form { fields: Vec::new() };
    };
    let project = format!(
        "{} - {}",
        draft.original.client.name, draft.original.project.name
    );
    let task = if draft.pending_task_edit {
        format!("{} (loading tasks...)", draft.task.name)
    } else {
        draft.task.name.clone()
    };
    Body::Form {
        fields: vec![
            FormField::fixed("Project", project, false),
            FormField::fixed("Task", task, draft.field == EditField::Task),
            FormField::text("Notes", &draft.notes, draft.field == EditField::Notes),
            FormField::text(
                "Duration",
                &draft.duration,
                draft.field == EditField::Duration,
            ),
            FormField::fixed("Billable", billable_label(draft.billable), false),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{fixtures, Draft, EditDraft, LoadingState, PickerOrigin, ProjectPicker};
    use crate::types::RecentSelection;

    #[test]
    fn list_screen_describes_entries_and_header() {
        let mut app = fixtures::app();
        app.entries[1].is_running = true;
        app.selected_entry_index = 1;
        app.banners.catalog = Some("Could not load projects".to_string());

        let screen = describe(&app);
        assert_eq!(screen.view, ViewKind::List);
        assert_eq!(screen.header.user, "Kim Allen");
        assert_eq!(screen.header.date, "Fri 16 Oct 2026");
        assert_eq!(screen.header.day_total, "2:15");
        assert_eq!(screen.banners, vec!["Could not load projects".to_string()]);
        match screen.body {
            Body::Entries { rows, selected } => {
                assert_eq!(selected, 1);
                assert_eq!(rows[0].project, "Acme Corp - Website Redesign");
                assert_eq!(rows[0].hours, "1:30");
                assert!(rows[1].running);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn project_picker_shows_recent_section() {
        let mut app = fixtures::app_with_recent(RecentSelection::new(20, 200, 4));
        app.view = View::SelectProject(ProjectPicker::new(PickerOrigin::Wizard));

        match describe(&app).body {
            Body::Picker { rows, selected, .. } => {
                assert_eq!(selected, 0);
                assert_eq!(
                    rows,
                    vec![
                        PickerRow::Item {
                            label: "Globex - Support Retainer / Support".to_string(),
                            recent: true
                        },
                        PickerRow::Divider,
                        PickerRow::Item {
                            label: "Acme Corp - Website Redesign".to_string(),
                            recent: false
                        },
                        PickerRow::Item {
                            label: "Globex - Support Retainer".to_string(),
                            recent: false
                        },
                    ]
                );
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn edit_screen_marks_focused_field() {
        let mut app = fixtures::app();
        let mut draft = EditDraft::from_entry(&app.entries[0]);
        draft.field = EditField::Notes;
        app.draft = Some(Draft::Edit(draft));
        app.view = View::EditEntry;

        match describe(&app).body {
            Body::Form { fields } => {
                let focused: Vec<&str> =
                    fields.iter().filter(|f| f.focused).map(|f| f.label).collect();
                assert_eq!(focused, vec!["Notes"]);
                assert_eq!(fields[2].cursor, Some("entry 1".len()));
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn loading_screen_reports_progress() {
        let mut app = fixtures::app();
        app.view = View::Loading(LoadingState {
            entries_done: true,
            catalog_done: false,
        });
        let screen = describe(&app);
        assert!(screen.hints.is_empty());
        assert_eq!(
            screen.body,
            Body::Loading {
                entries_done: true,
                catalog_done: false
            }
        );
    }
}
