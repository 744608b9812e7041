//! Flutter-facing FFI crate for Taskpad.
//!
//! The Dart side binds against [`api`]; everything else stays inside
//! `taskpad_core`.

pub mod api;
