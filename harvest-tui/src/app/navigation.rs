use time::{Date, Duration};

use super::App;
use crate::catalog::SelectionRow;

impl App {
    pub fn select_next_entry(&mut self) {
        if self.selected_entry_index + 1 < self.entries.len() {
            self.selected_entry_index += 1;
        }
    }

    pub fn select_previous_entry(&mut self) {
        self.selected_entry_index = self.selected_entry_index.saturating_sub(1);
    }

    /// Keep the selection a valid index, or 0 for an empty list.
    pub fn clamp_selection(&mut self) {
        if self.selected_entry_index >= self.entries.len() {
            self.selected_entry_index = self.entries.len().saturating_sub(1);
        }
    }

    /// Move focus to `date`. The cached entries belong to the old date and are dropped.
    pub fn focus_date(&mut self, date: Date) {
        self.focused_date = date;
        self.entries.clear();
        self.selected_entry_index = 0;
    }

    pub fn shift_focused_date(&mut self, days: i64) {
        let target = self.focused_date.saturating_add(Duration::days(days));
        self.focus_date(target);
    }
}

/// Next cursor position in a selection list, stepping over dividers.
pub fn next_row(rows: &[SelectionRow], cursor: usize) -> usize {
    let mut next = cursor;
    while next + 1 < rows.len() {
        next += 1;
        if !rows[next].is_divider() {
            return next;
        }
    }
    cursor
}

/// Previous cursor position in a selection list, stepping over dividers.
pub fn previous_row(rows: &[SelectionRow], cursor: usize) -> usize {
    let mut prev = cursor;
    while prev > 0 {
        prev -= 1;
        if !rows[prev].is_divider() {
            return prev;
        }
    }
    cursor
}
