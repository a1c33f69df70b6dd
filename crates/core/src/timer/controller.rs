//! Lock-protected owner of the timer state
//!
//! Every transition reads the clock and swaps the state under one lock, so a
//! pause racing a resume (or a double resume) can never observe a half-applied
//! transition. Phase changes are broadcast on a watch channel for the display
//! layer.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info};
use trak_common::time::Clock;
use trak_domain::{Result, TaskId, TimerPhase, TimerSnapshot, TimerState, TrakError};

/// Result of stopping the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoppedTimer {
    pub task_id: TaskId,
    /// Active seconds: wall time from start to stop minus paused time
    pub active_secs: u64,
}

/// Timer state controller
pub struct TimerController {
    state: Mutex<TimerState>,
    clock: Arc<dyn Clock>,
    phase_tx: watch::Sender<TimerPhase>,
}

impl std::fmt::Debug for TimerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerController").field("state", &*self.state.lock()).finish_non_exhaustive()
    }
}

impl TimerController {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let (phase_tx, _) = watch::channel(TimerPhase::Idle);
        Self { state: Mutex::new(TimerState::Idle), clock, phase_tx }
    }

    fn publish(&self, phase: TimerPhase) {
        self.phase_tx.send_if_modified(|current| {
            let changed = *current != phase;
            *current = phase;
            changed
        });
    }

    /// `Idle -> Running` bound to `task_id`
    ///
    /// Rejected while another task is being tracked; the state is unchanged.
    pub fn start(&self, task_id: TaskId) -> Result<()> {
        let mut state = self.state.lock();
        if let Some(active) = state.task_id() {
            return Err(TrakError::Validation(format!(
                "task {active} is already being tracked, stop it first"
            )));
        }
        *state = TimerState::started(task_id, self.clock.now_millis());
        self.publish(TimerPhase::Running);
        info!(task_id, "timer started");
        Ok(())
    }

    /// `Running -> Paused`; returns `false` from any other state
    pub fn pause(&self) -> bool {
        let mut state = self.state.lock();
        let now = self.clock.now_millis();
        let Some(next) = state.paused(now) else {
            debug!(phase = %state.phase(), "pause ignored");
            return false;
        };
        *state = next;
        self.publish(TimerPhase::Paused);
        info!(task_id = ?state.task_id(), elapsed_secs = next.elapsed_secs(now), "timer paused");
        true
    }

    /// `Paused -> Running`; returns `false` from any other state
    pub fn resume(&self) -> bool {
        let mut state = self.state.lock();
        let Some(next) = state.resumed(self.clock.now_millis()) else {
            debug!(phase = %state.phase(), "resume ignored");
            return false;
        };
        *state = next;
        self.publish(TimerPhase::Running);
        info!(task_id = ?state.task_id(), "timer resumed");
        true
    }

    /// `Running|Paused -> Idle`, returning the final active seconds
    pub fn stop(&self) -> Option<StoppedTimer> {
        let mut state = self.state.lock();
        let task_id = state.task_id()?;
        let active_secs = state.elapsed_secs(self.clock.now_millis());
        *state = TimerState::Idle;
        self.publish(TimerPhase::Idle);
        info!(task_id, active_secs, "timer stopped");
        Some(StoppedTimer { task_id, active_secs })
    }

    /// Stop only if the timer is still bound to `task_id`
    pub fn stop_if(&self, task_id: TaskId) -> Option<StoppedTimer> {
        let mut state = self.state.lock();
        if state.task_id() != Some(task_id) {
            return None;
        }
        let active_secs = state.elapsed_secs(self.clock.now_millis());
        *state = TimerState::Idle;
        self.publish(TimerPhase::Idle);
        info!(task_id, active_secs, "timer stopped");
        Some(StoppedTimer { task_id, active_secs })
    }

    /// Any state `-> Idle`, discarding elapsed time
    pub fn reset(&self) {
        *self.state.lock() = TimerState::Idle;
        self.publish(TimerPhase::Idle);
        debug!("timer reset");
    }

    /// Reset only if the timer is bound to `task_id`; returns whether it was
    pub fn reset_if(&self, task_id: TaskId) -> bool {
        let mut state = self.state.lock();
        if state.task_id() != Some(task_id) {
            return false;
        }
        *state = TimerState::Idle;
        self.publish(TimerPhase::Idle);
        debug!(task_id, "timer reset");
        true
    }

    /// Active elapsed seconds: live while running, frozen while paused
    pub fn elapsed_seconds(&self) -> u64 {
        self.state.lock().elapsed_secs(self.clock.now_millis())
    }

    pub fn phase(&self) -> TimerPhase {
        self.state.lock().phase()
    }

    pub fn task_id(&self) -> Option<TaskId> {
        self.state.lock().task_id()
    }

    pub fn state(&self) -> TimerState {
        *self.state.lock()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.lock().snapshot(self.clock.now_millis())
    }

    /// Watch phase changes
    pub fn subscribe(&self) -> watch::Receiver<TimerPhase> {
        self.phase_tx.subscribe()
    }
}
