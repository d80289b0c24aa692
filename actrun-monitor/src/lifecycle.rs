//! Run lifecycle state machine and poll loop
//!
//! One run at a time moves through `Idle → Starting → Polling` and ends in
//! `Succeeded`, `Failed` or `Aborted`. While polling, status checks fire on
//! a fixed cadence with at most one check in flight; a check still running
//! when the next tick arrives causes that tick to be skipped, not queued.
//! Only a remote-reported terminal status ends the loop: a failing status
//! check is logged and retried on the next tick. There is no client-side
//! poll cap.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use actrun_core::domain::run::{RunSnapshot, RunStatus};

use crate::api::{RunApi, RunApiError};

/// Where the controller currently is for the active run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Starting,
    Polling,
    Succeeded,
    Failed,
    Aborted,
}

impl RunPhase {
    fn terminal_for(status: RunStatus) -> Self {
        match status {
            RunStatus::Succeeded => RunPhase::Succeeded,
            RunStatus::Aborted => RunPhase::Aborted,
            // FAILED and TIMED-OUT both count as failure.
            _ => RunPhase::Failed,
        }
    }
}

/// Progress notifications emitted by the poll loop.
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// A status check completed
    Status(RunSnapshot),
    /// The run succeeded and its dataset was fetched
    Results(Value),
    /// The run succeeded but the results fetch failed; the run itself is
    /// not re-attempted
    ResultsError(String),
    /// Terminal status reached; no further events follow
    Finished { status: RunStatus },
}

/// Failure to start a run. The controller returns to idle; nothing was
/// scheduled.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to start run: {0}")]
    Failed(String),
}

/// Monitor tuning knobs.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Wall-clock cadence of status checks
    pub poll_interval: Duration,
    /// Record cap passed to the results fetch
    pub results_limit: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            results_limit: 100,
        }
    }
}

/// Starts runs and owns their poll loops.
///
/// Each [`RunMonitor::start`] call produces an independent [`RunWatch`];
/// starting a new run simply means dropping the previous watch (which tears
/// its poll loop down) and starting again.
pub struct RunMonitor<A> {
    api: Arc<A>,
    config: MonitorConfig,
}

impl<A: RunApi + 'static> RunMonitor<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_config(api, MonitorConfig::default())
    }

    pub fn with_config(api: Arc<A>, config: MonitorConfig) -> Self {
        Self { api, config }
    }

    /// Starts a run and begins polling its status.
    ///
    /// On failure the error distinguishes a rejected input payload from
    /// everything else; no poll loop is scheduled either way.
    pub async fn start(&self, actor_id: &str, input: Value) -> Result<RunWatch, StartError> {
        tracing::info!(actor_id, "starting run");

        let started = self
            .api
            .start_run(actor_id, &input)
            .await
            .map_err(|e| match e {
                RunApiError::InvalidInput(msg) => StartError::InvalidInput(msg),
                RunApiError::Failed(msg) => StartError::Failed(msg),
            })?;

        tracing::info!(run_id = %started.id, status = %started.status, "run started");

        let (event_tx, event_rx) = mpsc::channel(64);
        let (phase_tx, phase_rx) = watch::channel(RunPhase::Polling);

        let task = tokio::spawn(poll_loop(
            Arc::clone(&self.api),
            started.id.clone(),
            self.config.clone(),
            event_tx,
            phase_tx,
        ));

        Ok(RunWatch {
            run_id: started.id,
            initial_status: started.status,
            started_at: Instant::now(),
            events: event_rx,
            phase: phase_rx,
            handle: PollHandle { task },
        })
    }
}

/// Handle on one active run: its identity, the event stream, and the means
/// to stop polling.
pub struct RunWatch {
    run_id: String,
    initial_status: RunStatus,
    started_at: Instant,
    events: mpsc::Receiver<RunEvent>,
    phase: watch::Receiver<RunPhase>,
    handle: PollHandle,
}

impl RunWatch {
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Status reported by the start call itself, before any poll.
    pub fn initial_status(&self) -> RunStatus {
        self.initial_status
    }

    /// Local wall-clock time since the run was started, for display.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Next progress event; `None` once the loop has ended and all events
    /// were consumed.
    pub async fn next_event(&mut self) -> Option<RunEvent> {
        self.events.recv().await
    }

    /// Current controller phase. Cancellation does not rewrite this; it
    /// stays at whatever the last poll observed.
    pub fn phase(&self) -> RunPhase {
        *self.phase.borrow()
    }

    /// Stops the poll loop. Idempotent and callable in any phase; no
    /// further check fires and whatever a check in flight would have
    /// reported is discarded.
    pub fn cancel(&self) {
        self.handle.cancel();
    }
}

/// Cancellable handle on the scheduled poll task.
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    // Tearing down the watch must deterministically stop the timer.
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn poll_loop<A: RunApi>(
    api: Arc<A>,
    run_id: String,
    config: MonitorConfig,
    events: mpsc::Sender<RunEvent>,
    phase: watch::Sender<RunPhase>,
) {
    let mut ticker = time::interval(config.poll_interval);
    // A slow check must skip ticks, never queue them: at most one status
    // request is in flight per run.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately; consume it so the first check
    // happens one full interval after the run started.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let snapshot = match api.run_status(&run_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                // Status-check failures never end the run; the next tick
                // retries.
                tracing::warn!(run_id = %run_id, error = %e, "status check failed");
                continue;
            }
        };

        let status = snapshot.status;
        if events.send(RunEvent::Status(snapshot)).await.is_err() {
            // Listener went away; nothing left to poll for.
            return;
        }

        if !status.is_terminal() {
            continue;
        }

        let _ = phase.send(RunPhase::terminal_for(status));

        if status == RunStatus::Succeeded {
            match api.run_results(&run_id, config.results_limit).await {
                Ok(results) => {
                    let _ = events.send(RunEvent::Results(results)).await;
                }
                Err(e) => {
                    tracing::warn!(run_id = %run_id, error = %e, "results fetch failed");
                    let _ = events.send(RunEvent::ResultsError(e.to_string())).await;
                }
            }
        }

        let _ = events.send(RunEvent::Finished { status }).await;
        return;
    }
}
