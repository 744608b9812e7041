//! Transient edit-mode session state.
//!
//! # Responsibility
//! - Track which task, if any, is currently being revised, together with the
//!   pending buffer text seeded from it.
//!
//! # Invariants
//! - At most one task is in edit mode at a time.
//! - Edit state lives beside the task list, not inside it, and is never
//!   persisted.

use crate::model::task::TaskId;

/// Two-mode editing session: viewing, or revising exactly one task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditMode {
    /// No task is being revised.
    #[default]
    Idle,
    /// One task's text is being revised before commit or cancellation.
    Editing {
        /// Task under revision.
        task_id: TaskId,
        /// Pending text, seeded from the task at `begin_edit` time.
        buffer: String,
    },
}

impl EditMode {
    /// Whether any task is currently in edit mode.
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// The task under revision, if any.
    pub fn editing_task(&self) -> Option<TaskId> {
        match self {
            Self::Idle => None,
            Self::Editing { task_id, .. } => Some(*task_id),
        }
    }

    /// The pending buffer text, if a task is in edit mode.
    pub fn buffer(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Editing { buffer, .. } => Some(buffer.as_str()),
        }
    }
}
