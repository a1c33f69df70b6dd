//! Timer state machine
//!
//! Elapsed time is never accumulated by ticking. It is recomputed from the
//! start timestamp and the total paused seconds, so a late or skipped render
//! cannot make the timer drift.
//!
//! ```text
//! Idle --start--> Running --pause--> Paused
//!  ^                |  ^                |
//!  |                |  +----resume------+
//!  +------stop------+-------stop--------+
//! ```
//!
//! All transitions are pure and take the current epoch milliseconds, so the
//! controller in `trak-core` decides where "now" comes from.

use serde::{Deserialize, Serialize};

use super::task::TaskId;
use crate::impl_domain_status_conversions;

/// Coarse timer phase, used for subscriptions and display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    #[default]
    Idle,
    Running,
    Paused,
}

impl_domain_status_conversions!(TimerPhase {
    Idle => "idle",
    Running => "running",
    Paused => "paused",
});

/// Full timer state
///
/// `started_at_ms` is epoch milliseconds; `paused_secs` is the total of all
/// completed pause intervals in whole seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TimerState {
    #[default]
    Idle,
    Running {
        task_id: TaskId,
        started_at_ms: i64,
        paused_secs: u64,
    },
    Paused {
        task_id: TaskId,
        started_at_ms: i64,
        paused_secs: u64,
        /// Instant the current pause began, consumed by resume
        paused_at_ms: i64,
        /// Elapsed seconds at the moment of pausing
        frozen_elapsed: u64,
    },
}

/// Whole seconds between two epoch-millisecond instants, never negative
fn whole_secs_between(from_ms: i64, to_ms: i64) -> u64 {
    u64::try_from(to_ms.saturating_sub(from_ms).div_euclid(1000)).unwrap_or(0)
}

impl TimerState {
    /// Fresh running state for `task_id` starting at `now_ms`
    pub const fn started(task_id: TaskId, now_ms: i64) -> Self {
        Self::Running { task_id, started_at_ms: now_ms, paused_secs: 0 }
    }

    pub const fn phase(&self) -> TimerPhase {
        match self {
            Self::Idle => TimerPhase::Idle,
            Self::Running { .. } => TimerPhase::Running,
            Self::Paused { .. } => TimerPhase::Paused,
        }
    }

    /// Task bound to the timer, `None` when idle
    pub const fn task_id(&self) -> Option<TaskId> {
        match self {
            Self::Idle => None,
            Self::Running { task_id, .. } | Self::Paused { task_id, .. } => Some(*task_id),
        }
    }

    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Active elapsed seconds at `now_ms`
    ///
    /// Running: `floor((now - started_at) / 1000) - paused_secs`, clamped at
    /// zero. Paused: the value frozen at pause time. Idle: zero.
    pub fn elapsed_secs(&self, now_ms: i64) -> u64 {
        match *self {
            Self::Idle => 0,
            Self::Running { started_at_ms, paused_secs, .. } => {
                whole_secs_between(started_at_ms, now_ms).saturating_sub(paused_secs)
            }
            Self::Paused { frozen_elapsed, .. } => frozen_elapsed,
        }
    }

    /// `Running -> Paused`, `None` from any other state
    pub fn paused(&self, now_ms: i64) -> Option<Self> {
        match *self {
            Self::Running { task_id, started_at_ms, paused_secs } => Some(Self::Paused {
                task_id,
                started_at_ms,
                paused_secs,
                paused_at_ms: now_ms,
                frozen_elapsed: self.elapsed_secs(now_ms),
            }),
            _ => None,
        }
    }

    /// `Paused -> Running`, `None` from any other state
    ///
    /// The whole seconds spent paused are added to `paused_secs`.
    pub fn resumed(&self, now_ms: i64) -> Option<Self> {
        match *self {
            Self::Paused { task_id, started_at_ms, paused_secs, paused_at_ms, .. } => {
                Some(Self::Running {
                    task_id,
                    started_at_ms,
                    paused_secs: paused_secs
                        .saturating_add(whole_secs_between(paused_at_ms, now_ms)),
                })
            }
            _ => None,
        }
    }

    pub fn snapshot(&self, now_ms: i64) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase(),
            task_id: self.task_id(),
            elapsed_secs: self.elapsed_secs(now_ms),
        }
    }
}

/// Point-in-time view of the timer published to readers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub task_id: Option<TaskId>,
    pub elapsed_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_700_000_000_000;

    #[test]
    fn running_elapsed_is_floored() {
        let state = TimerState::started(1, T0);
        assert_eq!(state.elapsed_secs(T0), 0);
        assert_eq!(state.elapsed_secs(T0 + 999), 0);
        assert_eq!(state.elapsed_secs(T0 + 61_500), 61);
    }

    #[test]
    fn elapsed_never_negative_when_clock_goes_back() {
        let state = TimerState::started(1, T0);
        assert_eq!(state.elapsed_secs(T0 - 5_000), 0);
    }

    #[test]
    fn pause_freezes_and_resume_accumulates() {
        let running = TimerState::started(3, T0);
        let paused = running.paused(T0 + 10_000).unwrap();
        assert_eq!(paused.phase(), TimerPhase::Paused);
        assert_eq!(paused.elapsed_secs(T0 + 500_000), 10);

        let resumed = paused.resumed(T0 + 70_000).unwrap();
        assert_eq!(resumed, TimerState::Running { task_id: 3, started_at_ms: T0, paused_secs: 60 });
        assert_eq!(resumed.elapsed_secs(T0 + 75_000), 15);
    }

    #[test]
    fn transitions_from_wrong_state_are_rejected() {
        assert!(TimerState::Idle.paused(T0).is_none());
        assert!(TimerState::Idle.resumed(T0).is_none());
        let running = TimerState::started(1, T0);
        assert!(running.resumed(T0 + 1_000).is_none());
        let paused = running.paused(T0 + 1_000).unwrap();
        assert!(paused.paused(T0 + 2_000).is_none());
    }

    #[test]
    fn snapshot_reflects_state() {
        let snap = TimerState::started(9, T0).snapshot(T0 + 3_000);
        assert_eq!(
            snap,
            TimerSnapshot { phase: TimerPhase::Running, task_id: Some(9), elapsed_secs: 3 }
        );
        assert_eq!(TimerState::Idle.snapshot(T0), TimerSnapshot::default());
    }
}
