//! Debounced background saving of circuit state.
//!
//! Snapshots are sent to a worker task over a channel. The worker holds the
//! newest snapshot until no other arrives for the configured delay, then
//! writes it. Closing the autosaver flushes whatever is pending.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::state::CircuitState;
use crate::store::StateStore;

/// Default delay between the last change and the write.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Snapshots buffered between the session and the worker.
const CHANNEL_CAPACITY: usize = 64;

/// Somewhere the autosaver can write snapshots.
#[async_trait]
pub trait StateSink: Send {
    /// Persist a snapshot. Returns `false` if it was skipped as a repeat.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn write(&mut self, state: &CircuitState) -> Result<bool>;
}

#[async_trait]
impl<T: StateStore + Send> StateSink for T {
    async fn write(&mut self, state: &CircuitState) -> Result<bool> {
        self.save_state(state)
    }
}

/// Counters reported when the autosaver finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AutosaveStats {
    /// Snapshots submitted.
    pub received: u64,
    /// Snapshots written to the sink.
    pub written: u64,
    /// Snapshots the sink skipped as repeats of the latest state.
    pub skipped: u64,
    /// Snapshots replaced by a newer one before the delay ran out.
    pub superseded: u64,
    /// Writes that failed.
    pub failed: u64,
}

/// Handle to a running autosave worker.
#[derive(Debug)]
pub struct Autosaver<S> {
    tx: mpsc::Sender<CircuitState>,
    task: JoinHandle<(S, AutosaveStats)>,
}

impl<S: StateSink + 'static> Autosaver<S> {
    /// Start a worker writing to `sink` once `delay` passes without a new
    /// snapshot.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(sink: S, delay: Duration) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let task = tokio::spawn(run(sink, rx, delay));
        debug!(delay_ms = delay.as_millis(), "Autosave worker started");
        Self { tx, task }
    }

    /// Queue a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Autosave`] if the worker has stopped.
    pub async fn submit(&self, state: CircuitState) -> Result<()> {
        self.tx
            .send(state)
            .await
            .map_err(|_| Error::autosave("worker is no longer running"))
    }

    /// Flush any pending snapshot, stop the worker and report counters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Autosave`] if the worker panicked.
    pub async fn finish(self) -> Result<AutosaveStats> {
        self.into_sink().await.map(|(_, stats)| stats)
    }

    /// Like [`Self::finish`], also handing back the sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Autosave`] if the worker panicked.
    pub async fn into_sink(self) -> Result<(S, AutosaveStats)> {
        drop(self.tx);
        let (sink, stats) = self
            .task
            .await
            .map_err(|e| Error::autosave(format!("worker failed: {e}")))?;
        debug!(
            received = stats.received,
            written = stats.written,
            skipped = stats.skipped,
            "Autosave worker finished"
        );
        Ok((sink, stats))
    }
}

async fn run<S: StateSink>(
    mut sink: S,
    mut rx: mpsc::Receiver<CircuitState>,
    delay: Duration,
) -> (S, AutosaveStats) {
    let mut stats = AutosaveStats::default();
    let mut pending: Option<CircuitState> = None;

    loop {
        let next = if pending.is_none() {
            rx.recv().await
        } else {
            tokio::select! {
                msg = rx.recv() => msg,
                () = tokio::time::sleep(delay) => {
                    if let Some(state) = pending.take() {
                        flush(&mut sink, &state, &mut stats).await;
                    }
                    continue;
                }
            }
        };

        match next {
            Some(state) => {
                stats.received += 1;
                trace!(id = %state.id, "Autosave snapshot queued");
                if pending.replace(state).is_some() {
                    stats.superseded += 1;
                }
            }
            None => {
                if let Some(state) = pending.take() {
                    flush(&mut sink, &state, &mut stats).await;
                }
                break;
            }
        }
    }

    (sink, stats)
}

async fn flush<S: StateSink>(sink: &mut S, state: &CircuitState, stats: &mut AutosaveStats) {
    match sink.write(state).await {
        Ok(true) => {
            stats.written += 1;
            debug!(id = %state.id, "Autosaved circuit state");
        }
        Ok(false) => stats.skipped += 1,
        Err(e) => {
            stats.failed += 1;
            warn!(id = %state.id, error = %e, "Autosave write failed");
        }
    }
}
