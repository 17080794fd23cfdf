use std::time::{Duration, Instant};
use time::Date;

use crate::catalog::{assemble_selection_list, SelectionRow};
use crate::recents::RecentsStore;
use crate::types::{ProjectWithTasks, TimeEntry, User};

mod drafts;
pub mod navigation;
pub mod screen;
mod state;

pub use drafts::DraftError;
pub use state::{
    Banners, Draft, EditDraft, EditField, LoadingState, NewEntryDraft, NewEntryField,
    PickerOrigin, ProjectPicker, Severity, StatusLine, TaskFlow, TaskPicker, TextInput, View,
    ViewKind,
};

/// How long a transient status line stays visible.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

pub struct App {
    pub running: bool,
    /// Printed once the terminal is restored.
    pub farewell: Option<String>,
    pub view: View,
    pub user: User,

    // Cached day of entries
    pub focused_date: Date,
    pub entries: Vec<TimeEntry>,
    pub selected_entry_index: usize,

    // Project/task catalog and recently used selections
    pub catalog: Vec<ProjectWithTasks>,
    pub catalog_loaded: bool,
    pub recents: RecentsStore,

    pub draft: Option<Draft>,
    pub status: Option<StatusLine>,
    pub banners: Banners,

    // Request bookkeeping
    pub entries_request: u64,
    pub entries_loading: bool,
    pub catalog_loading: bool,
    pub saving: bool,
    pub last_entries_refresh: Instant,
}

impl App {
    pub fn new(user: User, focused_date: Date, recents: RecentsStore) -> Self {
        Self {
            running: true,
            farewell: None,
            view: View::Loading(LoadingState::default()),
            user,
            focused_date,
            entries: Vec::new(),
            selected_entry_index: 0,
            catalog: Vec::new(),
            catalog_loaded: false,
            recents,
            draft: None,
            status: None,
            banners: Banners::default(),
            entries_request: 0,
            entries_loading: false,
            catalog_loading: false,
            saving: false,
            last_entries_refresh: Instant::now(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, View::Loading(_))
    }

    /// Switch view. Any transient status belongs to the view being left.
    pub fn navigate_to(&mut self, view: View) {
        self.view = view;
        self.clear_status();
    }

    /// Leave a draft flow and go back to the entry list.
    pub fn back_to_list(&mut self) {
        self.draft = None;
        self.navigate_to(View::List);
    }

    pub fn set_status(&mut self, severity: Severity, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            severity,
            set_at: Instant::now(),
        });
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.set_status(Severity::Info, text);
    }

    pub fn set_success(&mut self, text: impl Into<String>) {
        self.set_status(Severity::Success, text);
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.set_status(Severity::Error, text);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Drop the status line once it has been visible for [`STATUS_TTL`].
    pub fn expire_status(&mut self, now: Instant) {
        if let Some(status) = &self.status {
            if now.saturating_duration_since(status.set_at) >= STATUS_TTL {
                self.status = None;
            }
        }
    }

    pub fn selected_entry(&self) -> Option<&TimeEntry> {
        self.entries.get(self.selected_entry_index)
    }

    pub fn day_total(&self) -> f64 {
        self.entries.iter().map(|e| e.hours).sum()
    }

    pub fn has_running_entry(&self) -> bool {
        self.entries.iter().any(|e| e.is_running)
    }

    /// The project selection list as currently shown: recents, divider, full catalog.
    pub fn selection_rows(&self) -> Vec<SelectionRow> {
        assemble_selection_list(&self.catalog, self.recents.items())
    }

    pub fn new_draft(&self) -> Option<&NewEntryDraft> {
        match &self.draft {
            Some(Draft::New(draft)) => Some(draft),
            _ => None,
        }
    }

    pub fn new_draft_mut(&mut self) -> Option<&mut NewEntryDraft> {
        match &mut self.draft {
            Some(Draft::New(draft)) => Some(draft),
            _ => None,
        }
    }

    pub fn edit_draft(&self) -> Option<&EditDraft> {
        match &self.draft {
            Some(Draft::Edit(draft)) => Some(draft),
            _ => None,
        }
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut EditDraft> {
        match &mut self.draft {
            Some(Draft::Edit(draft)) => Some(draft),
            _ => None,
        }
    }

    /// Replace the cached entry with the same id, if it is still cached.
    pub fn patch_entry(&mut self, entry: TimeEntry) -> bool {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(cached) => {
                *cached = entry;
                true
            }
            None => false,
        }
    }

    pub fn remove_entry(&mut self, id: u64) {
        self.entries.retain(|e| e.id != id);
        self.clamp_selection();
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::types::{NamedRef, RecentSelection};
    use time::macros::date;

    pub const DAY: Date = date!(2026 - 10 - 16);

    pub fn user() -> User {
        User {
            id: 7,
            first_name: "Kim".to_string(),
            last_name: "Allen".to_string(),
        }
    }

    pub fn entry(id: u64, hours: f64) -> TimeEntry {
        TimeEntry {
            id,
            client: NamedRef::new(10, "Acme Corp"),
            project: NamedRef::new(100, "Website Redesign"),
            task: NamedRef::new(1, "Design"),
            notes: format!("entry {}", id),
            hours,
            spent_date: DAY,
            is_running: false,
            is_locked: false,
            is_billable: true,
        }
    }

    pub fn catalog() -> Vec<ProjectWithTasks> {
        vec![
            ProjectWithTasks {
                id: 100,
                name: "Website Redesign".to_string(),
                client: NamedRef::new(10, "Acme Corp"),
                tasks: vec![NamedRef::new(1, "Design"), NamedRef::new(2, "Development")],
            },
            ProjectWithTasks {
                id: 200,
                name: "Support Retainer".to_string(),
                client: NamedRef::new(20, "Globex"),
                tasks: vec![NamedRef::new(4, "Support")],
            },
        ]
    }

    /// An app past loading, on the List view with two entries and a loaded catalog.
    pub fn app() -> App {
        let mut app = App::new(user(), DAY, RecentsStore::in_memory(Vec::new()));
        app.view = View::List;
        app.entries = vec![entry(1, 1.5), entry(2, 0.75)];
        app.catalog = catalog();
        app.catalog_loaded = true;
        app
    }

    pub fn app_with_recent(recent: RecentSelection) -> App {
        let mut app = app();
        app.recents = RecentsStore::in_memory(vec![recent]);
        app
    }
}
