//! Assistant commands

use std::sync::Arc;

use trak_core::display::format_task_line;
use trak_core::Notification;
use trak_domain::{Result, TaskId, TaskPatch, TrakError};

use crate::console::Console;
use crate::context::AppContext;

pub(super) async fn categorize(
    ctx: &Arc<AppContext>,
    console: &Console,
    id: TaskId,
    category: Option<String>,
) -> Result<()> {
    let category = match category {
        Some(category) => category,
        None => {
            let Some(task) = ctx.store.tasks().into_iter().find(|t| t.id == id) else {
                let err = TrakError::Validation(format!("task #{id} is not in today's list"));
                ctx.notifier.notify(Notification::error("Cannot suggest a category", err.to_string()));
                return Err(err);
            };
            let suggestion =
                ctx.assistant.suggest_category(&task.title, task.description.as_deref()).await?;
            console.line(format!("Suggested category: {suggestion}"));
            suggestion
        }
    };

    let patch = TaskPatch { category: Some(category), ..TaskPatch::default() };
    let task = ctx.lifecycle.update_task(id, patch).await?;
    console.line(format_task_line(&task));
    Ok(())
}

pub(super) async fn retitle(ctx: &Arc<AppContext>, console: &Console, id: TaskId) -> Result<()> {
    let task = ctx.assistant.regenerate_title(id).await?;
    console.line(format_task_line(&task));
    Ok(())
}

pub(super) async fn summary(ctx: &Arc<AppContext>, console: &Console) -> Result<()> {
    let summary = ctx.assistant.generate_summary().await?;
    console.line(summary);
    Ok(())
}

/// Stream the reply as it arrives; the fallback text is printed when the
/// reply differs from what was streamed.
pub(super) async fn chat(ctx: &Arc<AppContext>, console: &Console, message: &str) -> Result<()> {
    let mut streamed = String::new();
    let reply = ctx
        .assistant
        .chat(message, |token| {
            console.write(token);
            streamed.push_str(token);
        })
        .await?;

    if !streamed.is_empty() {
        console.line("");
    }
    if reply != streamed {
        console.line(reply);
    }
    Ok(())
}

pub(super) async fn status(ctx: &Arc<AppContext>, console: &Console) -> Result<()> {
    let status = ctx.assistant.status().await?;
    let url = ctx.settings.current().ollama_url;
    if status.available {
        let models = status.model_names();
        if models.is_empty() {
            console.line(format!("Ollama is running at {url} with no models installed"));
        } else {
            console.line(format!("Ollama is running at {url}; models: {}", models.join(", ")));
        }
    } else {
        console.line(format!("Ollama is not reachable at {url}"));
    }
    Ok(())
}
