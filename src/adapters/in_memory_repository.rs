//! In-memory table repository for testing.
//!
//! Snapshots are encoded exactly as on disk but kept in a shared HashMap, so
//! training runs can be checkpointed without touching the file system.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Result, error::Error, ports::TableRepository, q_learning::SavedQTable};

#[derive(Debug, Default)]
struct Storage {
    snapshots: HashMap<String, Vec<u8>>,
    saves: usize,
}

/// In-memory repository for testing.
///
/// # Examples
///
/// ```
/// use qtictactoe::adapters::InMemoryRepository;
/// use qtictactoe::ports::TableRepository;
/// use qtictactoe::q_learning::{QTable, SavedQTable, TrainingMetadata};
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let snapshot = SavedQTable::new(QTable::new(), TrainingMetadata::default());
///
/// repo.save(&snapshot, Path::new("table"))?;
/// assert_eq!(repo.load(Path::new("table"))?, Some(snapshot));
/// assert_eq!(repo.load(Path::new("other"))?, None);
/// # Ok::<(), qtictactoe::Error>(())
/// ```
///
/// All clones share the same underlying storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<Storage>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, Storage> {
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of distinct paths holding a snapshot.
    pub fn count(&self) -> usize {
        self.storage().snapshots.len()
    }

    /// Total number of save calls, including overwrites.
    pub fn save_count(&self) -> usize {
        self.storage().saves
    }

    /// Check if a snapshot exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        let key = path.to_string_lossy().to_string();
        self.storage().snapshots.contains_key(&key)
    }

    /// Clear all stored snapshots and counters.
    pub fn clear(&self) {
        let mut storage = self.storage();
        storage.snapshots.clear();
        storage.saves = 0;
    }
}

impl TableRepository for InMemoryRepository {
    fn save(&self, snapshot: &SavedQTable, path: &Path) -> Result<()> {
        let key = path.to_string_lossy().to_string();

        let bytes = rmp_serde::to_vec(snapshot).map_err(|e| Error::SerializationContext {
            operation: "serialize Q-table for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        let mut storage = self.storage();
        storage.snapshots.insert(key, bytes);
        storage.saves += 1;
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Option<SavedQTable>> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage();

        let Some(bytes) = storage.snapshots.get(&key) else {
            return Ok(None);
        };

        rmp_serde::from_slice(bytes)
            .map(Some)
            .map_err(|e| Error::SerializationContext {
                operation: "deserialize Q-table from in-memory storage".to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::q_learning::{QTable, TrainingMetadata};

    fn empty_snapshot() -> SavedQTable {
        SavedQTable::new(QTable::new(), TrainingMetadata::default())
    }

    #[test]
    fn test_in_memory_save_and_load() {
        let repo = InMemoryRepository::new();
        let path = Path::new("table");

        assert_eq!(repo.count(), 0);
        assert!(!repo.contains(path));

        repo.save(&empty_snapshot(), path).unwrap();
        repo.save(&empty_snapshot(), path).unwrap();
        assert_eq!(repo.count(), 1);
        assert_eq!(repo.save_count(), 2);
        assert!(repo.contains(path));

        assert_eq!(repo.load(path).unwrap(), Some(empty_snapshot()));
    }

    #[test]
    fn test_load_nonexistent_returns_none() {
        let repo = InMemoryRepository::new();
        assert!(repo.load(Path::new("nonexistent")).unwrap().is_none());
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();

        repo1.save(&empty_snapshot(), Path::new("shared")).unwrap();
        assert!(repo2.load(Path::new("shared")).unwrap().is_some());

        repo2.clear();
        assert_eq!(repo1.count(), 0);
        assert_eq!(repo1.save_count(), 0);
    }
}
