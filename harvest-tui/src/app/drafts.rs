use thiserror::Error;

use super::{EditDraft, NewEntryDraft};
use crate::time_utils::{parse_duration, DurationError};
use crate::types::{EntryPatch, NewTimeEntry};

/// Why a draft cannot be turned into a request yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("choose a project and task first")]
    MissingSelection,
    #[error("{0} (e.g. 1:30)")]
    Duration(#[from] DurationError),
}

impl NewEntryDraft {
    pub fn to_new_entry(&self) -> Result<NewTimeEntry, DraftError> {
        let (project, task) = match (&self.project, &self.task) {
            (Some(project), Some(task)) => (project, task),
            _ => return Err(DraftError::MissingSelection),
        };
        let hours = parse_duration(&self.duration.value)?;
        Ok(NewTimeEntry {
            project_id: project.id,
            task_id: task.id,
            spent_date: self.spent_date,
            hours,
            notes: self.notes.value.clone(),
            billable: Some(self.billable),
        })
    }
}

impl EditDraft {
    /// Hours and notes are always sent; task and billable only when they changed.
    pub fn to_patch(&self) -> Result<EntryPatch, DraftError> {
        let hours = parse_duration(&self.duration.value)?;
        Ok(EntryPatch {
            hours: Some(hours),
            notes: Some(self.notes.value.clone()),
            task_id: (self.task.id != self.original.task.id).then_some(self.task.id),
            billable: (self.billable != self.original.is_billable).then_some(self.billable),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{fixtures, TextInput};
    use crate::types::NamedRef;

    #[test]
    fn new_entry_requires_project_and_task() {
        let draft = NewEntryDraft::new(fixtures::DAY);
        assert_eq!(draft.to_new_entry(), Err(DraftError::MissingSelection));
    }

    #[test]
    fn new_entry_carries_draft_fields() {
        let mut draft = NewEntryDraft::new(fixtures::DAY);
        draft.project = Some(fixtures::catalog()[0].clone());
        draft.task = Some(NamedRef::new(2, "Development"));
        draft.notes = TextInput::from_str("Standup");
        draft.duration = TextInput::from_str("1:45");
        draft.billable = false;

        let entry = draft.to_new_entry().unwrap();
        assert_eq!(entry.project_id, 100);
        assert_eq!(entry.task_id, 2);
        assert_eq!(entry.hours, 1.75);
        assert_eq!(entry.notes, "Standup");
        assert_eq!(entry.billable, Some(false));
        assert_eq!(entry.spent_date, fixtures::DAY);
    }

    #[test]
    fn invalid_duration_is_reported() {
        let mut draft = EditDraft::from_entry(&fixtures::entry(1, 1.0));
        draft.duration = TextInput::from_str("1:75");
        assert_eq!(
            draft.to_patch(),
            Err(DraftError::Duration(DurationError::InvalidFormat))
        );
    }

    #[test]
    fn patch_only_sends_changed_task_and_billable() {
        let entry = fixtures::entry(1, 1.5);
        let mut draft = EditDraft::from_entry(&entry);
        let patch = draft.to_patch().unwrap();
        assert_eq!(patch.hours, Some(1.5));
        assert_eq!(patch.notes.as_deref(), Some("entry 1"));
        assert_eq!(patch.task_id, None);
        assert_eq!(patch.billable, None);

        draft.task = NamedRef::new(2, "Development");
        draft.billable = false;
        let patch = draft.to_patch().unwrap();
        assert_eq!(patch.task_id, Some(2));
        assert_eq!(patch.billable, Some(false));
    }
}
