//! MessagePack implementation of the table repository.
//!
//! Snapshots are encoded with rmp_serde into a single file per path.

use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::Path,
};

use crate::{Result, error::Error, ports::TableRepository, q_learning::SavedQTable};

/// Default file name for the persisted table.
pub const DEFAULT_TABLE_PATH: &str = "q_table.msgpack";

/// MessagePack-based table repository.
///
/// # Examples
///
/// ```no_run
/// use qtictactoe::adapters::MsgPackRepository;
/// use qtictactoe::ports::TableRepository;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// match repo.load(Path::new("q_table.msgpack"))? {
///     Some(snapshot) => println!("{} entries", snapshot.q_table.size()),
///     None => println!("no table yet"),
/// }
/// # Ok::<(), qtictactoe::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl TableRepository for MsgPackRepository {
    fn save(&self, snapshot: &SavedQTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, snapshot).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize Q-table to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Option<SavedQTable>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::Io {
                    operation: format!("open file {path:?}"),
                    source,
                });
            }
        };

        let snapshot = rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| {
            Error::SerializationContext {
                operation: "deserialize Q-table from MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Some(snapshot))
    }
}
