//! Task lifecycle commands

use std::sync::Arc;

use trak_common::time::{format_clock, format_minutes};
use trak_core::display::{count_breaks, format_task_line, format_timer_line};
use trak_core::StopOutcome;
use trak_domain::{PeriodStats, Result, TaskId, TaskPatch};

use crate::console::Console;
use crate::context::AppContext;

fn print_stopped(console: &Console, outcome: &StopOutcome) {
    console.line(format!(
        "Stopped '{}' after {} ({})",
        outcome.task.title,
        format_clock(outcome.active_secs),
        format_minutes(outcome.task.duration_minutes()),
    ));
}

/// Without an explicit description the typed text is treated as raw input
/// for the assistant to turn into a title.
fn enhance_in_background(ctx: &Arc<AppContext>, console: &Console, id: TaskId, input: &str) {
    if ctx.assistant.spawn_enhancement(id, input.to_string()).is_some() {
        console.line("AI is suggesting a title...");
    }
}

pub(super) async fn start(
    ctx: &Arc<AppContext>,
    console: &Console,
    title: &str,
    description: Option<String>,
) -> Result<()> {
    let raw_input = description.is_none();
    let task = ctx.lifecycle.start_task(title, description).await?;
    if raw_input {
        enhance_in_background(ctx, console, task.id, title);
    }
    Ok(())
}

pub(super) async fn switch(
    ctx: &Arc<AppContext>,
    console: &Console,
    title: &str,
    description: Option<String>,
) -> Result<()> {
    let raw_input = description.is_none();
    let (stopped, task) = ctx.lifecycle.switch_task(title, description).await?;
    if let Some(outcome) = &stopped {
        print_stopped(console, outcome);
    }
    if raw_input {
        enhance_in_background(ctx, console, task.id, title);
    }
    Ok(())
}

pub(super) async fn take_break(ctx: &Arc<AppContext>, console: &Console) -> Result<()> {
    let (stopped, _) = ctx.lifecycle.take_break().await?;
    if let Some(outcome) = &stopped {
        print_stopped(console, outcome);
    }
    Ok(())
}

pub(super) async fn stop(ctx: &Arc<AppContext>, console: &Console) -> Result<()> {
    let outcome = ctx.lifecycle.stop_task().await?;
    print_stopped(console, &outcome);
    Ok(())
}

pub(super) fn pause(ctx: &Arc<AppContext>, console: &Console) {
    if ctx.lifecycle.pause() {
        status(ctx, console);
    } else {
        console.line("Nothing is running");
    }
}

pub(super) fn resume(ctx: &Arc<AppContext>, console: &Console) {
    if ctx.lifecycle.resume() {
        status(ctx, console);
    } else {
        console.line("Timer is not paused");
    }
}

pub(super) fn status(ctx: &Arc<AppContext>, console: &Console) {
    let title = ctx.lifecycle.current_task().map(|t| t.title);
    console.line(format_timer_line(&ctx.timer.snapshot(), title.as_deref()));
}

pub(super) fn today(ctx: &Arc<AppContext>, console: &Console) {
    let tasks = ctx.store.tasks();
    if tasks.is_empty() {
        console.line("No tasks today");
        return;
    }
    for task in &tasks {
        console.line(format_task_line(task));
    }
    console.line(format!("{} tasks, {} breaks", tasks.len(), count_breaks(&tasks)));
}

fn period_line(label: &str, period: &PeriodStats) -> String {
    let mut line = format!(
        "{label}: {} tasks, {}",
        period.tasks_count,
        format_minutes(period.total_time)
    );
    if let Some(breaks) = period.breaks {
        line.push_str(&format!(", {breaks} breaks"));
    }
    line
}

pub(super) fn stats(ctx: &Arc<AppContext>, console: &Console) {
    let stats = ctx.store.stats();
    console.line(period_line("Today", &stats.today));
    console.line(period_line("All time", &stats.all_time));
}

pub(super) async fn rename(
    ctx: &Arc<AppContext>,
    console: &Console,
    id: TaskId,
    title: String,
) -> Result<()> {
    let patch = TaskPatch { title: Some(title), ..TaskPatch::default() };
    let task = ctx.lifecycle.update_task(id, patch).await?;
    console.line(format_task_line(&task));
    Ok(())
}

pub(super) async fn describe(
    ctx: &Arc<AppContext>,
    console: &Console,
    id: TaskId,
    description: String,
) -> Result<()> {
    let patch = TaskPatch { description: Some(description), ..TaskPatch::default() };
    let task = ctx.lifecycle.update_task(id, patch).await?;
    console.line(format_task_line(&task));
    Ok(())
}

pub(super) async fn delete(ctx: &Arc<AppContext>, console: &Console, ids: &[TaskId]) -> Result<()> {
    if let [id] = ids {
        ctx.lifecycle.delete_task(*id).await?;
        console.line(format!("Deleted task #{id}"));
    } else {
        let deleted = ctx.lifecycle.delete_tasks(ids).await;
        console.line(format!("Deleted {deleted} of {} tasks", ids.len()));
    }
    Ok(())
}
