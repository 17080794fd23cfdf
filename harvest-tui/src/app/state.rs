use std::time::Instant;
use time::Date;

use crate::types::{NamedRef, ProjectWithTasks, TimeEntry};

/// Which screen the engine is on. Each variant carries only what that screen needs.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Loading(LoadingState),
    List,
    SelectProject(ProjectPicker),
    SelectTask(TaskPicker),
    NewEntryForm,
    NotesInput,
    DurationInput,
    BillableToggle,
    EditEntry,
    ConfirmDelete(TimeEntry),
    Help,
}

impl View {
    pub fn kind(&self) -> ViewKind {
        match self {
            View::Loading(_) => ViewKind::Loading,
            View::List => ViewKind::List,
            View::SelectProject(_) => ViewKind::SelectProject,
            View::SelectTask(_) => ViewKind::SelectTask,
            View::NewEntryForm => ViewKind::NewEntryForm,
            View::NotesInput => ViewKind::NotesInput,
            View::DurationInput => ViewKind::DurationInput,
            View::BillableToggle => ViewKind::BillableToggle,
            View::EditEntry => ViewKind::EditEntry,
            View::ConfirmDelete(_) => ViewKind::ConfirmDelete,
            View::Help => ViewKind::Help,
        }
    }
}

/// Data-less mirror of [`View`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Loading,
    List,
    SelectProject,
    SelectTask,
    NewEntryForm,
    NotesInput,
    DurationInput,
    BillableToggle,
    EditEntry,
    ConfirmDelete,
    Help,
}

/// Join flags for the two startup fetches. A failed fetch still counts as done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingState {
    pub entries_done: bool,
    pub catalog_done: bool,
}

impl LoadingState {
    pub fn is_complete(&self) -> bool {
        self.entries_done && self.catalog_done
    }
}

/// Where a project/task selection was started from, and so where it returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOrigin {
    Wizard,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectPicker {
    /// Index into the assembled selection list (recents, divider, catalog).
    pub cursor: usize,
    pub origin: PickerOrigin,
}

impl ProjectPicker {
    pub fn new(origin: PickerOrigin) -> Self {
        Self { cursor: 0, origin }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFlow {
    /// Picking a task for a new entry; `project_cursor` restores the project list on back.
    NewEntry {
        origin: PickerOrigin,
        project_cursor: usize,
    },
    /// Re-selecting the task of the entry being edited.
    Edit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskPicker {
    pub project: ProjectWithTasks,
    pub cursor: usize,
    pub flow: TaskFlow,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Cursor position counted in characters, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        let mut p = pos - 1;
        while !self.value.is_char_boundary(p) {
            p -= 1;
        }
        p
    }

    fn next_boundary(&self, pos: usize) -> usize {
        let mut p = pos + 1;
        while p < self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}

/// The one draft the engine may hold at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    New(NewEntryDraft),
    Edit(EditDraft),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewEntryField {
    Project,
    Notes,
    Duration,
    Billable,
}

impl NewEntryField {
    const ORDER: [NewEntryField; 4] = [
        NewEntryField::Project,
        NewEntryField::Notes,
        NewEntryField::Duration,
        NewEntryField::Billable,
    ];

    pub fn next(self) -> Self {
        cycle(&Self::ORDER, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ORDER, self, Self::ORDER.len() - 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEntryDraft {
    pub project: Option<ProjectWithTasks>,
    pub task: Option<NamedRef>,
    pub notes: TextInput,
    pub duration: TextInput,
    pub billable: bool,
    pub field: NewEntryField,
    pub spent_date: Date,
}

impl NewEntryDraft {
    pub fn new(spent_date: Date) -> Self {
        Self {
            project: None,
            task: None,
            notes: TextInput::default(),
            duration: TextInput::from_str("0:00"),
            billable: true,
            field: NewEntryField::Project,
            spent_date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Task,
    Notes,
    Duration,
}

impl EditField {
    const ORDER: [EditField; 3] = [EditField::Task, EditField::Notes, EditField::Duration];

    pub fn next(self) -> Self {
        cycle(&Self::ORDER, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ORDER, self, Self::ORDER.len() - 1)
    }
}

fn cycle<T: Copy + PartialEq>(order: &[T], current: T, step: usize) -> T {
    let pos = order.iter().position(|f| *f == current).unwrap_or(0);
    order[(pos + step) % order.len()]
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub original: TimeEntry,
    pub task: NamedRef,
    pub notes: TextInput,
    pub duration: TextInput,
    pub billable: bool,
    pub field: EditField,
    /// Task selection was requested before the catalog arrived.
    pub pending_task_edit: bool,
}

impl EditDraft {
    pub fn from_entry(entry: &TimeEntry) -> Self {
        Self {
            original: entry.clone(),
            task: entry.task.clone(),
            notes: TextInput::from_str(&entry.notes),
            duration: TextInput::from_str(&crate::time_utils::format_hours(entry.hours)),
            billable: entry.is_billable,
            field: EditField::Task,
            pending_task_edit: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Transient one-line message, expired by the tick after a few seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub text: String,
    pub severity: Severity,
    pub set_at: Instant,
}

/// Persistent fetch failures, one slot per fetch kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Banners {
    pub entries: Option<String>,
    pub catalog: Option<String>,
}

impl Banners {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().chain(self.catalog.iter()).map(String::as_str)
    }
}
