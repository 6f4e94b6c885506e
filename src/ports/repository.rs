//! Repository port for Q-table persistence.
//!
//! This module defines the trait boundary between the agent and the storage
//! used for its value table.

use std::path::Path;

use crate::{Result, q_learning::SavedQTable};

/// Port for persisting and loading Q-table snapshots.
///
/// Every save overwrites the whole snapshot at `path`. A missing snapshot is
/// not an error: `load` reports it as `Ok(None)` so callers can start from an
/// empty table.
///
/// # Examples
///
/// ```no_run
/// use qtictactoe::ports::TableRepository;
/// use qtictactoe::q_learning::SavedQTable;
/// use std::path::Path;
///
/// fn backup<R: TableRepository>(repo: &R, from: &Path, to: &Path) -> qtictactoe::Result<()> {
///     if let Some(snapshot) = repo.load(from)? {
///         repo.save(&snapshot, to)?;
///     }
///     Ok(())
/// }
/// ```
pub trait TableRepository {
    /// Save a snapshot to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path cannot be created or written to
    /// - Serialization fails
    fn save(&self, snapshot: &SavedQTable, path: &Path) -> Result<()>;

    /// Load a snapshot, returning `None` if nothing is stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be read or decoded.
    fn load(&self, path: &Path) -> Result<Option<SavedQTable>>;
}
