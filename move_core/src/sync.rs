//! Debounced remote synchronization.
//!
//! Every mutation hands the latest remote record to [`RemoteSync::schedule`].
//! A pending write waits out a quiet period; a newer schedule cancels the
//! wait and starts a fresh one, so a burst of mutations produces a single
//! write carrying the final state. A write that has already started is never
//! aborted; writes run one at a time, so a newer record always lands after
//! an older one that is still in flight.
//!
//! Status flows idle -> syncing -> synced | error. `synced` reverts to idle
//! after a short delay; `error` stays until the next attempt. Failed writes
//! are not retried.

use crate::store::{RemoteRecord, RemoteStore};
use crate::{Result, SyncStatus};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Timing parameters for remote writes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncSettings {
    /// Quiet period after the last mutation before writing
    pub debounce: Duration,
    /// How long `synced` is shown before reverting to idle
    pub synced_reset: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            synced_reset: Duration::from_millis(2000),
        }
    }
}

/// A scheduled write that may still be waiting out its debounce
struct PendingWrite {
    cancel: CancellationToken,
    /// Resolves to true if the task performed the write
    handle: JoinHandle<bool>,
    record: RemoteRecord,
    generation: u64,
}

/// Shared pieces a write task needs
#[derive(Clone)]
struct Writer {
    store: Arc<dyn RemoteStore>,
    status: Arc<watch::Sender<SyncStatus>>,
    synced_reset: Duration,
    runtime: Handle,
    /// Held for the whole remote update
    in_flight: Arc<Mutex<()>>,
    /// Generation of the most recently scheduled record
    latest: Arc<AtomicU64>,
}

impl Writer {
    fn is_superseded(&self, generation: u64) -> bool {
        self.latest.load(Ordering::SeqCst) != generation
    }

    async fn write(&self, record: &RemoteRecord, generation: u64) -> Result<()> {
        let _guard = self.in_flight.lock().await;
        self.status.send_replace(SyncStatus::Syncing);

        let result = self.store.update(record).await;

        // A newer record is queued; its write reports the final status
        if self.is_superseded(generation) {
            if let Err(e) = &result {
                tracing::warn!("Failed to sync superseded progress for {}: {}", record.user_id, e);
            }
            return result;
        }

        match result {
            Ok(()) => {
                tracing::debug!("Synced progress for {}", record.user_id);
                self.status.send_replace(SyncStatus::Synced);

                let status = Arc::clone(&self.status);
                let reset = self.synced_reset;
                self.runtime.spawn(async move {
                    tokio::time::sleep(reset).await;
                    status.send_if_modified(|s| {
                        if *s == SyncStatus::Synced {
                            *s = SyncStatus::Idle;
                            true
                        } else {
                            false
                        }
                    });
                });
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to sync progress for {}: {}", record.user_id, e);
                self.status.send_replace(SyncStatus::Error);
                Err(e)
            }
        }
    }
}

/// Debounced writer of one user's remote row
pub struct RemoteSync {
    user_id: Uuid,
    debounce: Duration,
    writer: Writer,
    pending: Option<PendingWrite>,
}

impl RemoteSync {
    /// Must be called from within a tokio runtime; write tasks are spawned on it.
    pub fn new(
        store: Arc<dyn RemoteStore>,
        user_id: Uuid,
        settings: SyncSettings,
        status: Arc<watch::Sender<SyncStatus>>,
    ) -> Self {
        Self {
            user_id,
            debounce: settings.debounce,
            writer: Writer {
                store,
                status,
                synced_reset: settings.synced_reset,
                runtime: Handle::current(),
                in_flight: Arc::new(Mutex::new(())),
                latest: Arc::new(AtomicU64::new(0)),
            },
            pending: None,
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn status(&self) -> SyncStatus {
        *self.writer.status.borrow()
    }

    /// Replace any waiting write with one for `record`
    pub fn schedule(&mut self, record: RemoteRecord) {
        if let Some(previous) = self.pending.take() {
            previous.cancel.cancel();
        }

        let generation = self.writer.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let writer = self.writer.clone();
        let debounce = self.debounce;
        let task_record = record.clone();

        let handle = self.writer.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!("Pending remote write superseded");
                    false
                }
                _ = tokio::time::sleep(debounce) => {
                    let _ = writer.write(&task_record, generation).await;
                    true
                }
            }
        });

        self.pending = Some(PendingWrite {
            cancel,
            handle,
            record,
            generation,
        });
    }

    /// Whether a write is waiting or in flight
    pub fn has_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| !pending.handle.is_finished())
    }

    /// Write the latest scheduled record now instead of after the debounce
    ///
    /// Waits for a write already in flight instead of repeating it.
    pub async fn flush(&mut self) -> Result<()> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };

        pending.cancel.cancel();
        let already_written = pending.handle.await.unwrap_or(false);
        if already_written {
            return Ok(());
        }

        self.writer.write(&pending.record, pending.generation).await
    }
}
