use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult};

/// Continuation decision returned by a tick callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickDecision {
    Continue,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerState {
    /// Never started.
    Idle,
    /// Registered for the next refresh signal.
    Pending,
    Completed,
    Cancelled,
}

/// Shared cancellation flag for one scheduler run.
///
/// Clones observe the same flag; cancelling any clone stops the run before
/// its next tick, even when cancellation happens from inside a tick.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[derive(Debug)]
struct FrameRun {
    token: CancellationToken,
    start_ms: Option<f64>,
    last_elapsed_ms: f64,
}

/// Recurring tick driver synced to the host's refresh signal.
///
/// A run starts with [`start`](Self::start) and stays registered until its
/// tick reports [`TickDecision::Complete`] or it is cancelled. The first
/// dispatched frame records the start timestamp and reports zero elapsed
/// time; later frames report `now - start`, never decreasing.
#[derive(Debug)]
pub struct FrameScheduler {
    run: Option<FrameRun>,
    state: SchedulerState,
    ticks_fired: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            run: None,
            state: SchedulerState::Idle,
            ticks_fired: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Whether a tick will fire on the next dispatched refresh.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| !run.token.is_cancelled())
    }

    /// Ticks fired over the scheduler's lifetime, across runs.
    #[must_use]
    pub fn ticks_fired(&self) -> u64 {
        self.ticks_fired
    }

    /// Starts a new run, cancelling any run still in flight.
    pub fn start(&mut self) -> CancellationToken {
        if let Some(previous) = self.run.take() {
            debug!("replacing in-flight frame run");
            previous.token.cancel();
        }
        let token = CancellationToken::new();
        self.run = Some(FrameRun {
            token: token.clone(),
            start_ms: None,
            last_elapsed_ms: 0.0,
        });
        self.state = SchedulerState::Pending;
        token
    }

    /// Cancels the current run. No-op when nothing is running.
    pub fn cancel(&mut self) {
        if let Some(run) = self.run.take() {
            run.token.cancel();
            self.state = SchedulerState::Cancelled;
            debug!(ticks_fired = self.ticks_fired, "frame run cancelled");
        }
    }

    /// Handles one refresh signal at host timestamp `now_ms`.
    ///
    /// Fires `on_tick` with the elapsed milliseconds when a run is pending and
    /// returns its decision; returns `Ok(None)` without firing otherwise. A
    /// tick error ends the run and is propagated.
    pub fn dispatch<F>(&mut self, now_ms: f64, on_tick: F) -> ChartResult<Option<TickDecision>>
    where
        F: FnOnce(f64) -> ChartResult<TickDecision>,
    {
        if !now_ms.is_finite() {
            return Err(ChartError::InvalidData(
                "frame timestamp must be finite".to_owned(),
            ));
        }

        let Some(run) = self.run.as_mut() else {
            return Ok(None);
        };
        if run.token.is_cancelled() {
            self.run = None;
            self.state = SchedulerState::Cancelled;
            return Ok(None);
        }

        let start_ms = *run.start_ms.get_or_insert(now_ms);
        let elapsed_ms = (now_ms - start_ms).max(run.last_elapsed_ms);
        run.last_elapsed_ms = elapsed_ms;
        let token = run.token.clone();

        self.ticks_fired += 1;
        trace!(elapsed_ms, "frame tick");
        let decision = match on_tick(elapsed_ms) {
            Ok(decision) => decision,
            Err(err) => {
                token.cancel();
                self.run = None;
                self.state = SchedulerState::Cancelled;
                return Err(err);
            }
        };

        match decision {
            TickDecision::Complete => {
                self.run = None;
                self.state = SchedulerState::Completed;
                debug!(elapsed_ms, "frame run completed");
            }
            TickDecision::Continue if token.is_cancelled() => {
                self.run = None;
                self.state = SchedulerState::Cancelled;
            }
            TickDecision::Continue => {}
        }
        Ok(Some(decision))
    }
}
