//! Single-writer persistence queue.
//!
//! # Responsibility
//! - Apply slot overwrites strictly in submission order on one dedicated
//!   thread that owns the database connection.
//! - Keep mutation callers non-blocking: queueing a write never waits on I/O
//!   and never reports failure to the caller.
//!
//! # Invariants
//! - Exactly one thread writes to the backing connection.
//! - Queued writes are drained before the writer shuts down.
//! - A failed write is logged and dropped; it is never retried and never
//!   rolls back in-memory state.

use crate::repo::slot_repo::{SlotRepository, SqliteSlotRepository};
use log::{debug, error, info};
use rusqlite::Connection;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

enum WriteJob {
    /// Replace the slot value with this payload.
    Overwrite(String),
    /// Acknowledge once every previously queued job has been applied.
    Flush(Sender<()>),
}

/// Handle to the background slot writer.
///
/// Dropping the handle drains the queue and joins the thread, so every
/// queued write lands before shutdown completes.
#[derive(Debug)]
pub struct SlotWriter {
    tx: Option<Sender<WriteJob>>,
    handle: Option<JoinHandle<()>>,
    key: &'static str,
}

impl SlotWriter {
    /// Moves the connection onto a new writer thread bound to one slot key.
    pub fn start(conn: Connection, key: &'static str) -> Self {
        let (tx, rx) = channel();
        let handle = thread::spawn(move || writer_loop(conn, key, rx));
        info!("event=slot_writer_start module=repo status=ok key={key}");

        Self {
            tx: Some(tx),
            handle: Some(handle),
            key,
        }
    }

    /// Queues a full-payload overwrite; fire-and-forget.
    pub fn queue(&self, payload: String) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(WriteJob::Overwrite(payload)).is_err() {
            error!(
                "event=slot_write module=repo status=error key={} error_code=writer_unavailable",
                self.key
            );
        }
    }

    /// Blocks until every write queued before this call has been applied.
    pub fn flush(&self) {
        let Some(tx) = &self.tx else {
            return;
        };
        let (ack_tx, ack_rx) = channel();
        if tx.send(WriteJob::Flush(ack_tx)).is_err() || ack_rx.recv().is_err() {
            error!(
                "event=slot_flush module=repo status=error key={} error_code=writer_unavailable",
                self.key
            );
        }
    }

    fn shutdown(&mut self) {
        // Closing the channel lets the writer loop drain and exit.
        drop(self.tx.take());

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!(
                    "event=slot_writer_stop module=repo status=error key={} error_code=writer_panicked",
                    self.key
                );
                return;
            }
            info!(
                "event=slot_writer_stop module=repo status=ok key={}",
                self.key
            );
        }
    }
}

impl Drop for SlotWriter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn writer_loop(conn: Connection, key: &'static str, rx: Receiver<WriteJob>) {
    let repo = SqliteSlotRepository::new(&conn);

    while let Ok(job) = rx.recv() {
        match job {
            WriteJob::Overwrite(payload) => match repo.write_slot(key, &payload) {
                Ok(()) => debug!(
                    "event=slot_write module=repo status=ok key={key} bytes={}",
                    payload.len()
                ),
                Err(err) => error!(
                    "event=slot_write module=repo status=error key={key} bytes={} error={err}",
                    payload.len()
                ),
            },
            WriteJob::Flush(ack) => {
                // Receiver may have given up waiting; nothing to do then.
                let _ = ack.send(());
            }
        }
    }
}
