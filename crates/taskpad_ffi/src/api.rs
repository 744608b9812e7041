//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the task-list input events and rendering snapshot to Dart via
//!   FRB.
//! - Keep one process-global store alive across calls.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Malformed ids are reported in the response envelope and ignored by the
//!   store.
//! - Responses echo ids and counts, never log task text on the Rust side.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};
use taskpad_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Task, TaskId, TaskStore,
};
use uuid::Uuid;

const STORE_DB_FILE_NAME: &str = "taskpad_tasks.sqlite3";
static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE: OnceLock<Mutex<TaskStore>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One task row as rendered by the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    /// Stable opaque task id in string form.
    pub id: String,
    /// Current task text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
}

/// Editing session snapshot for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditModeView {
    /// Task currently under revision.
    pub task_id: String,
    /// Pending buffer text seeded at `request_edit` time.
    pub buffer: String,
}

/// Rendering snapshot: the ordered list plus the editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Tasks in insertion order.
    pub items: Vec<TaskView>,
    /// Editing session, when one task is in edit mode.
    pub editing: Option<EditModeView>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for task input events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the event changed or entered state as requested.
    pub ok: bool,
    /// Id of the task the event applied to, when one exists.
    pub task_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: Option<String>) -> Self {
        Self {
            ok: true,
            task_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Appends a new pending task from the input field.
///
/// # FFI contract
/// - Sync call; persistence happens on the background writer.
/// - Blank (all-whitespace) text is a no-op reported with `ok=false`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn submit_new_task(text: String) -> TaskActionResponse {
    match with_store(|store| store.add(&text)) {
        Ok(Some(id)) => TaskActionResponse::success("Task added.", Some(id.to_string())),
        Ok(None) => TaskActionResponse::failure("Task text is empty; nothing added."),
        Err(err) => TaskActionResponse::failure(err),
    }
}

/// Deletes the task with the given id.
///
/// # FFI contract
/// - Sync call; persistence happens on the background writer.
/// - Unknown ids are a no-op reported with `ok=false`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn request_delete(id: String) -> TaskActionResponse {
    let task_id = match parse_task_id(&id) {
        Ok(task_id) => task_id,
        Err(message) => return TaskActionResponse::failure(message),
    };
    match with_store(|store| store.remove(task_id)) {
        Ok(true) => TaskActionResponse::success("Task removed.", Some(id)),
        Ok(false) => TaskActionResponse::failure("No matching task; nothing removed."),
        Err(err) => TaskActionResponse::failure(err),
    }
}

/// Toggles the completion flag of the task with the given id.
///
/// # FFI contract
/// - Sync call; persistence happens on the background writer.
/// - Unknown ids are a no-op reported with `ok=false`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn request_toggle(id: String) -> TaskActionResponse {
    let task_id = match parse_task_id(&id) {
        Ok(task_id) => task_id,
        Err(message) => return TaskActionResponse::failure(message),
    };
    match with_store(|store| store.toggle_completed(task_id)) {
        Ok(true) => TaskActionResponse::success("Task completion toggled.", Some(id)),
        Ok(false) => TaskActionResponse::failure("No matching task; nothing toggled."),
        Err(err) => TaskActionResponse::failure(err),
    }
}

/// Enters edit mode for the task with the given id.
///
/// The buffer is seeded with `current_text` exactly as the row displays it;
/// any previous editing session is replaced.
///
/// # FFI contract
/// - Sync call, in-memory only (no persistence side effect).
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn request_edit(id: String, current_text: String) -> TaskActionResponse {
    let task_id = match parse_task_id(&id) {
        Ok(task_id) => task_id,
        Err(message) => return TaskActionResponse::failure(message),
    };
    match with_store(|store| store.begin_edit(task_id, &current_text)) {
        Ok(()) => TaskActionResponse::success("Edit started.", Some(id)),
        Err(err) => TaskActionResponse::failure(err),
    }
}

/// Commits the editing session with the final text.
///
/// Edits enforce the same non-empty rule as creation: blank text discards
/// the edit and leaves the task untouched. Edit mode ends either way.
///
/// # FFI contract
/// - Sync call; persistence happens on the background writer.
/// - Blank text or unknown ids are no-ops reported with `ok=false`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn submit_edit(id: String, text: String) -> TaskActionResponse {
    let task_id = match parse_task_id(&id) {
        Ok(task_id) => task_id,
        Err(message) => return TaskActionResponse::failure(message),
    };
    match with_store(|store| store.commit_edit(task_id, &text)) {
        Ok(true) => TaskActionResponse::success("Task text updated.", Some(id)),
        Ok(false) => TaskActionResponse::failure("Edit discarded; task unchanged."),
        Err(err) => TaskActionResponse::failure(err),
    }
}

/// Leaves edit mode without changing any task.
///
/// # FFI contract
/// - Sync call, in-memory only (no persistence side effect).
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn cancel_edit() -> TaskActionResponse {
    match with_store(|store| store.cancel_edit()) {
        Ok(()) => TaskActionResponse::success("Edit cancelled.", None),
        Err(err) => TaskActionResponse::failure(err),
    }
}

/// Returns the rendering snapshot: ordered tasks plus the editing session.
///
/// # FFI contract
/// - Sync call, non-blocking (reads in-memory state only).
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_tasks() -> TaskListResponse {
    let snapshot = with_store(|store| {
        let items = store.tasks().iter().map(to_task_view).collect::<Vec<_>>();
        let editing = match store.edit_mode() {
            taskpad_core::EditMode::Idle => None,
            taskpad_core::EditMode::Editing { task_id, buffer } => Some(EditModeView {
                task_id: task_id.to_string(),
                buffer: buffer.clone(),
            }),
        };
        (items, editing)
    });

    match snapshot {
        Ok((items, editing)) => {
            let message = format!("Found {} task(s).", items.len());
            TaskListResponse {
                items,
                editing,
                message,
            }
        }
        Err(err) => TaskListResponse {
            items: Vec::new(),
            editing: None,
            message: err,
        },
    }
}

/// Blocks until every queued slot write has been applied.
///
/// Intended for app-lifecycle hooks (moving to background) and tests.
///
/// # FFI contract
/// - Sync call; may wait briefly on the background writer.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn flush_tasks() -> TaskActionResponse {
    match with_store(|store| store.flush()) {
        Ok(()) => TaskActionResponse::success("Pending writes applied.", None),
        Err(err) => TaskActionResponse::failure(err),
    }
}

fn parse_task_id(raw: &str) -> Result<TaskId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid task id: `{raw}`"))
}

fn to_task_view(task: &Task) -> TaskView {
    TaskView {
        id: task.id.to_string(),
        text: task.text.clone(),
        completed: task.completed,
    }
}

fn resolve_store_db_path() -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("TASKPAD_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}

fn with_store<T>(f: impl FnOnce(&mut TaskStore) -> T) -> Result<T, String> {
    let mutex = match STORE.get() {
        Some(mutex) => mutex,
        None => {
            let store = TaskStore::open(resolve_store_db_path())
                .map_err(|err| format!("store open failed: {err}"))?;
            STORE.get_or_init(|| Mutex::new(store))
        }
    };

    let mut guard = mutex.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(f(&mut guard))
}
