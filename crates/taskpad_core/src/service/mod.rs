//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory task-list state and orchestrate persistence around it.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod task_store;
