//! Task domain model and snapshot wire format.
//!
//! # Responsibility
//! - Define the task record shown by the single-screen list UI.
//! - Encode/decode the full-collection snapshot persisted in the tasks slot.
//!
//! # Invariants
//! - `id` is stable for the lifetime of a task and never reused within one
//!   collection.
//! - Snapshot order matches in-memory list order (insertion order).
//! - Wire field names are fixed: `id`, `text`, `completed`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one task.
///
/// Kept as a type alias to make semantic intent explicit in signatures. The
/// wire form is the hyphenated UUID string, so callers outside the core only
/// ever see an opaque token.
pub type TaskId = Uuid;

/// One to-do item as rendered and persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable opaque ID, assigned at creation.
    pub id: TaskId,
    /// User-entered content.
    pub text: String,
    /// Completion flag; starts `false`.
    pub completed: bool,
}

impl Task {
    /// Creates a new pending task with a generated stable ID.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), text)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by decode paths where identity already exists in the snapshot.
    pub fn with_id(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// Flips the completion flag.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Replaces the task text.
    pub fn rename(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// Snapshot codec failure.
#[derive(Debug)]
pub enum SnapshotError {
    /// Payload is not valid JSON for a task array.
    Serde(serde_json::Error),
    /// Decoded collection repeats a task id.
    DuplicateTaskId(TaskId),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serde(err) => write!(f, "{err}"),
            Self::DuplicateTaskId(id) => write!(f, "snapshot repeats task id: {id}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serde(err) => Some(err),
            Self::DuplicateTaskId(_) => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Serializes the full task collection into the slot payload.
///
/// The payload is a bare JSON array of `{id, text, completed}` records, in
/// list order, with no version envelope.
pub fn encode_snapshot(tasks: &[Task]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(tasks)?)
}

/// Parses a slot payload back into the ordered task collection.
///
/// # Errors
/// - `SnapshotError::Serde` when the payload is not a valid task array.
/// - `SnapshotError::DuplicateTaskId` when two records share an id; persisted
///   state violating the uniqueness invariant is rejected, not masked.
pub fn decode_snapshot(raw: &str) -> Result<Vec<Task>, SnapshotError> {
    let tasks: Vec<Task> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id) {
            return Err(SnapshotError::DuplicateTaskId(task.id));
        }
    }

    Ok(tasks)
}
