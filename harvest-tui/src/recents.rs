use crate::types::RecentSelection;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MAX_RECENTS: usize = 3;

#[derive(Debug, Error)]
pub enum RecentsError {
    #[error("failed to read recents file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse recents file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write recents file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Move `selection` to the front, dropping any existing copy, capped at [`MAX_RECENTS`].
pub fn add_recent(recents: &mut Vec<RecentSelection>, selection: RecentSelection) {
    recents.retain(|r| *r != selection);
    recents.insert(0, selection);
    recents.truncate(MAX_RECENTS);
}

/// Most-recently-used project/task combinations, optionally backed by a JSON file.
#[derive(Debug, Clone, Default)]
pub struct RecentsStore {
    path: Option<PathBuf>,
    items: Vec<RecentSelection>,
}

impl RecentsStore {
    /// A store that never touches disk.
    pub fn in_memory(items: Vec<RecentSelection>) -> Self {
        let mut store = Self { path: None, items };
        store.items.truncate(MAX_RECENTS);
        store
    }

    /// Load from `path`. A missing file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, RecentsError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path: Some(path),
                items: Vec::new(),
            });
        }

        let raw = std::fs::read_to_string(&path).map_err(|source| RecentsError::Read {
            path: path.clone(),
            source,
        })?;
        let mut items: Vec<RecentSelection> = if raw.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&raw).map_err(|source| RecentsError::Parse {
                path: path.clone(),
                source,
            })?
        };
        items.truncate(MAX_RECENTS);

        Ok(Self {
            path: Some(path),
            items,
        })
    }

    pub fn items(&self) -> &[RecentSelection] {
        &self.items
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn add(&mut self, selection: RecentSelection) {
        add_recent(&mut self.items, selection);
    }

    /// Write the list to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<(), RecentsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let write_err = |source| RecentsError::Write {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let raw = serde_json::to_string_pretty(&self.items)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        std::fs::write(path, raw).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(c: u64, p: u64, t: u64) -> RecentSelection {
        RecentSelection::new(c, p, t)
    }

    #[test]
    fn test_add_to_empty() {
        let mut recents = Vec::new();
        add_recent(&mut recents, triple(123, 456, 789));
        assert_eq!(recents, vec![triple(123, 456, 789)]);
    }

    #[test]
    fn test_add_duplicate_moves_to_front() {
        let mut recents = vec![triple(1, 1, 1), triple(2, 2, 2), triple(3, 3, 3)];
        add_recent(&mut recents, triple(2, 2, 2));

        assert_eq!(recents.len(), 3);
        assert_eq!(recents[0], triple(2, 2, 2));
        assert_eq!(recents.iter().filter(|r| **r == triple(2, 2, 2)).count(), 1);
        assert_eq!(recents, vec![triple(2, 2, 2), triple(1, 1, 1), triple(3, 3, 3)]);
    }

    #[test]
    fn test_add_new_evicts_oldest() {
        let mut recents = vec![triple(1, 1, 1), triple(2, 2, 2), triple(3, 3, 3)];
        add_recent(&mut recents, triple(4, 4, 4));

        assert_eq!(recents, vec![triple(4, 4, 4), triple(1, 1, 1), triple(2, 2, 2)]);
    }

    #[test]
    fn test_same_project_different_task_is_distinct() {
        let mut recents = vec![triple(1, 10, 100)];
        add_recent(&mut recents, triple(1, 10, 200));
        assert_eq!(recents, vec![triple(1, 10, 200), triple(1, 10, 100)]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecentsStore::load(dir.path().join("recents.json")).unwrap();
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("recents.json");

        let mut store = RecentsStore::load(&path).unwrap();
        store.add(triple(1, 2, 3));
        store.add(triple(4, 5, 6));
        store.save().unwrap();

        let reloaded = RecentsStore::load(&path).unwrap();
        assert_eq!(reloaded.items(), &[triple(4, 5, 6), triple(1, 2, 3)]);
    }

    #[test]
    fn test_load_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recents.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            RecentsStore::load(&path),
            Err(RecentsError::Parse { .. })
        ));
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let store = RecentsStore::in_memory(vec![triple(1, 2, 3)]);
        assert!(store.save().is_ok());
        assert!(store.path().is_none());
    }
}
