//! Durable slot contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide read/overwrite access to named key-value slots.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `write_slot` replaces the previous value whole; there is no partial
//!   update of a slot.
//! - Read paths surface storage and decode errors instead of masking them;
//!   recovery policy belongs to the caller.

use crate::db::DbError;
use crate::model::task::{decode_snapshot, encode_snapshot, SnapshotError, Task};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key holding the serialized task collection.
pub const TASKS_SLOT_KEY: &str = "tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for slot read/write operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Snapshot(SnapshotError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "malformed slot payload: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Snapshot(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<SnapshotError> for RepoError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// Repository interface for durable slots.
pub trait SlotRepository {
    /// Reads the current value of a slot, `None` when the slot is absent.
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>>;

    /// Overwrites a slot with a new whole value, creating it when absent.
    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()>;

    /// Reads and decodes the task collection slot.
    ///
    /// `None` means the slot has never been written.
    fn read_tasks(&self) -> RepoResult<Option<Vec<Task>>> {
        match self.read_slot(TASKS_SLOT_KEY)? {
            Some(raw) => Ok(Some(decode_snapshot(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encodes and overwrites the task collection slot.
    fn write_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        let payload = encode_snapshot(tasks)?;
        self.write_slot(TASKS_SLOT_KEY, &payload)
    }
}

/// SQLite-backed slot repository.
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value)
             VALUES (?1, ?2)
             ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}
