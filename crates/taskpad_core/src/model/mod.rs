//! Domain model for the single-screen task list.
//!
//! # Responsibility
//! - Define the persisted task record and its snapshot wire format.
//! - Define the transient edit-mode session state.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`, unique within a list.
//! - Edit-mode state is session-scoped and never enters the persisted
//!   snapshot.

pub mod edit;
pub mod task;
