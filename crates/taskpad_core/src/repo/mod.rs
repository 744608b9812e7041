//! Persistence layer for the durable task slot.
//!
//! # Responsibility
//! - Define the slot read/overwrite contract and its SQLite implementation.
//! - Serialize all slot writes through a single background writer.
//!
//! # Invariants
//! - A slot holds one whole value; every write replaces it in full.
//! - Writer failures are logged, never propagated to mutation callers.

pub mod slot_repo;
pub mod slot_writer;
