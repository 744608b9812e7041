//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskpad_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("taskpad_core ping={}", taskpad_core::ping());
    println!("taskpad_core version={}", taskpad_core::core_version());

    // The probe runs against an in-memory store so repeated runs start clean.
    match taskpad_core::TaskStore::open_in_memory() {
        Ok(mut store) => {
            let added = store.add("probe task").is_some();
            println!("taskpad_core probe_added={added}");
            println!("taskpad_core probe_tasks={}", store.len());
            store.close();
        }
        Err(err) => println!("taskpad_core store_error={err}"),
    }
}
