//! Display layer
//!
//! Rendering never stores elapsed time; each frame asks the controller, which
//! recomputes from timestamps. A late frame therefore shows the right value.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use trak_common::time::{format_clock, format_minutes, recurring};
use trak_domain::{Task, TimerPhase, TimerSnapshot};

use crate::timer::TimerController;

/// Number of break tasks in a list
pub fn count_breaks(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.is_break()).count()
}

/// One line of the task timeline
///
/// `#12  09:30  Write report  [completed]  1h 5m`
pub fn format_task_line(task: &Task) -> String {
    let mut line = format!("#{:<4} {}  {}", task.id, task.start_time.format("%H:%M"), task.title);
    if let Some(status) = task.status {
        line.push_str(&format!("  [{status}]"));
    }
    if task.is_completed() {
        line.push_str("  ");
        line.push_str(&format_minutes(task.duration_minutes()));
    }
    line
}

/// Status line for the live timer
pub fn format_timer_line(snapshot: &TimerSnapshot, title: Option<&str>) -> String {
    let face = format_clock(snapshot.elapsed_secs);
    match (snapshot.phase, title) {
        (TimerPhase::Idle, _) => format!("[idle] {face}"),
        (phase, Some(title)) => format!("[{phase}] {face}  {title}"),
        (phase, None) => format!("[{phase}] {face}"),
    }
}

/// Periodic redraw of the running timer
///
/// Ticks only while the timer is `Running`: the interval is dropped when the
/// timer leaves that phase and recreated when it comes back. Dropping the
/// refresher stops everything.
#[derive(Debug)]
pub struct DisplayRefresher {
    task: JoinHandle<()>,
}

impl DisplayRefresher {
    /// Start refreshing, calling `render` once per `period` while running
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(timer: Arc<TimerController>, period: Duration, render: F) -> Self
    where
        F: Fn(TimerSnapshot) + Send + Sync + 'static,
    {
        let render = Arc::new(render);
        let phases = timer.subscribe();
        let task = tokio::spawn(Self::run(timer, phases, period, render));
        Self { task }
    }

    async fn run<F>(
        timer: Arc<TimerController>,
        mut phases: watch::Receiver<TimerPhase>,
        period: Duration,
        render: Arc<F>,
    ) where
        F: Fn(TimerSnapshot) + Send + Sync + 'static,
    {
        loop {
            let phase = *phases.borrow_and_update();
            if phase == TimerPhase::Running {
                debug!(period_ms = period.as_millis(), "display refresh started");
                render(timer.snapshot());
                let ticker = {
                    let timer = Arc::clone(&timer);
                    let render = Arc::clone(&render);
                    recurring(period, move || render(timer.snapshot()))
                };

                let still_running = loop {
                    if phases.changed().await.is_err() {
                        break false;
                    }
                    if *phases.borrow_and_update() != TimerPhase::Running {
                        break true;
                    }
                };
                ticker.cancel();
                debug!("display refresh stopped");
                if !still_running {
                    return;
                }
                // Final frame so the view shows the frozen or reset value
                render(timer.snapshot());
                continue;
            }

            if phases.changed().await.is_err() {
                return;
            }
        }
    }

    /// Stop refreshing
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for DisplayRefresher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
