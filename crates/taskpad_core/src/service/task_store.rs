//! Task store use-case service.
//!
//! # Responsibility
//! - Own the ordered in-memory task list and the edit-mode session state.
//! - Mirror every collection change into the durable tasks slot through the
//!   single-writer queue.
//!
//! # Invariants
//! - Task ids are unique within the list; insertion order is preserved.
//! - Each mutating operation queues at most one full-snapshot write after the
//!   in-memory list has changed.
//! - Slot write failures never roll back in-memory state; memory and storage
//!   may diverge until the next successful write.
//! - Log events carry ids, counts and sizes only, never task text.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::edit::EditMode;
use crate::model::task::{encode_snapshot, Task, TaskId};
use crate::repo::slot_repo::{SlotRepository, SqliteSlotRepository, TASKS_SLOT_KEY};
use crate::repo::slot_writer::SlotWriter;
use log::{debug, error, info};
use rusqlite::Connection;
use std::path::Path;

/// The single-screen to-do list: ordered tasks plus one editing session.
///
/// All mutations are synchronous on the caller's thread; persistence happens
/// asynchronously on the writer thread and is fire-and-forget.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    edit: EditMode,
    writer: SlotWriter,
}

impl TaskStore {
    /// Opens the slot database at `path` and loads the persisted collection.
    ///
    /// An absent slot yields an empty list. Malformed or unreadable slot
    /// *data* is logged and also yields an empty list — the store stays
    /// usable and the next successful write replaces the bad payload.
    /// Failure to open the database itself is a bootstrap error and is
    /// returned to the caller.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let conn = open_db(path)?;
        Ok(Self::from_connection(conn))
    }

    /// Opens an in-memory store; state does not outlive the writer thread.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        let tasks = load_tasks(&conn);
        let writer = SlotWriter::start(conn, TASKS_SLOT_KEY);
        info!(
            "event=store_open module=service status=ok count={}",
            tasks.len()
        );

        Self {
            tasks,
            edit: EditMode::Idle,
            writer,
        }
    }

    /// Appends a new pending task, unless the trimmed text is empty.
    ///
    /// Returns the fresh id on success, `None` for the blank-input no-op.
    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("event=task_add module=service status=skipped reason=empty_text");
            return None;
        }

        let task = Task::new(trimmed);
        let id = task.id;
        self.tasks.push(task);
        debug!(
            "event=task_add module=service status=ok task_id={id} count={}",
            self.tasks.len()
        );
        self.queue_snapshot("task_add");
        Some(id)
    }

    /// Removes the task with a matching id; absent ids are not an error.
    ///
    /// The slot is rewritten either way, matching the one-write-per-request
    /// contract of the UI surface.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;

        if removed {
            debug!(
                "event=task_remove module=service status=ok task_id={id} count={}",
                self.tasks.len()
            );
        } else {
            debug!("event=task_remove module=service status=skipped reason=unknown_id task_id={id}");
        }
        self.queue_snapshot("task_remove");
        removed
    }

    /// Flips the completion flag of the task with a matching id.
    ///
    /// Applying it twice restores the original flag. Absent ids are a no-op;
    /// the slot is rewritten either way.
    pub fn toggle_completed(&mut self, id: TaskId) -> bool {
        let toggled = match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.toggle_completed();
                debug!(
                    "event=task_toggle module=service status=ok task_id={id} completed={}",
                    task.completed
                );
                true
            }
            None => {
                debug!(
                    "event=task_toggle module=service status=skipped reason=unknown_id task_id={id}"
                );
                false
            }
        };
        self.queue_snapshot("task_toggle");
        toggled
    }

    /// Enters edit mode for `id`, seeding the buffer with `current_text`.
    ///
    /// Replaces any previous editing session; only one task is in edit mode
    /// at a time.
    pub fn begin_edit(&mut self, id: TaskId, current_text: &str) {
        self.edit = EditMode::Editing {
            task_id: id,
            buffer: current_text.to_string(),
        };
        debug!("event=edit_begin module=service status=ok task_id={id}");
    }

    /// Commits the editing session, replacing the matching task's text.
    ///
    /// Always returns the session to `Idle`. Edits enforce the same trimmed
    /// non-empty rule as `add`: blank text discards the edit like a cancel,
    /// leaving the task untouched and queueing no write. An absent id leaves
    /// the list unchanged but still rewrites the slot.
    pub fn commit_edit(&mut self, id: TaskId, new_text: &str) -> bool {
        self.edit = EditMode::Idle;

        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            debug!("event=edit_commit module=service status=skipped reason=empty_text task_id={id}");
            return false;
        }

        let renamed = match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.rename(trimmed);
                debug!("event=edit_commit module=service status=ok task_id={id}");
                true
            }
            None => {
                debug!(
                    "event=edit_commit module=service status=skipped reason=unknown_id task_id={id}"
                );
                false
            }
        };
        self.queue_snapshot("edit_commit");
        renamed
    }

    /// Leaves edit mode and discards the buffer without touching any task.
    pub fn cancel_edit(&mut self) {
        self.edit = EditMode::Idle;
        debug!("event=edit_cancel module=service status=ok");
    }

    /// Ordered task list for rendering.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Current editing session for rendering.
    pub fn edit_mode(&self) -> &EditMode {
        &self.edit
    }

    /// Looks up one task by id.
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Blocks until every write queued so far has been applied.
    pub fn flush(&self) {
        self.writer.flush();
    }

    /// Drains the write queue and joins the writer thread.
    pub fn close(self) {
        info!(
            "event=store_close module=service status=ok count={}",
            self.tasks.len()
        );
    }

    fn queue_snapshot(&self, operation: &str) {
        match encode_snapshot(&self.tasks) {
            Ok(payload) => self.writer.queue(payload),
            Err(err) => error!(
                "event=snapshot_encode module=service status=error op={operation} error={err}"
            ),
        }
    }
}

fn load_tasks(conn: &Connection) -> Vec<Task> {
    let repo = SqliteSlotRepository::new(conn);
    match repo.read_tasks() {
        Ok(Some(tasks)) => {
            info!(
                "event=tasks_load module=service status=ok count={}",
                tasks.len()
            );
            tasks
        }
        Ok(None) => {
            info!("event=tasks_load module=service status=ok count=0 slot=absent");
            Vec::new()
        }
        Err(err) => {
            error!(
                "event=tasks_load module=service status=error recovery=empty_list error={err}"
            );
            Vec::new()
        }
    }
}
