//! Snapshot format for persisted Q-tables.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    q_learning::{AgentConfig, QTable},
};

/// Information recorded alongside a saved table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Self-play episodes that contributed to the table
    pub episodes_trained: usize,
    /// Hyperparameters in effect when the table was saved
    pub config: Option<AgentConfig>,
}

/// Whole-table snapshot written by a [`TableRepository`](crate::ports::TableRepository)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQTable {
    pub version: u32,
    pub q_table: QTable,
    pub metadata: TrainingMetadata,
}

impl SavedQTable {
    pub const VERSION: u32 = 1;

    pub fn new(q_table: QTable, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            q_table,
            metadata,
        }
    }

    /// Unwrap the snapshot after checking its format version.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSnapshotVersion`] for snapshots written by
    /// a different format version.
    pub fn into_parts(self) -> Result<(QTable, TrainingMetadata)> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedSnapshotVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok((self.q_table, self.metadata))
    }
}
