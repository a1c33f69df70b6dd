//! Assistant service
//!
//! Every operation is gated on the cached `use_ai` setting and never issues a
//! request while it is off.

use std::sync::Arc;

use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use trak_domain::constants::{CHAT_FALLBACK_REPLY, CHAT_RECENT_TASKS};
use trak_domain::{
    AiStatus, CategoryRequest, ChatContext, ChatEvent, ChatRequest, ContextStats, PeriodStats,
    Result, Settings, SummaryRequest, SummaryTask, Task, TaskId, TaskPatch, TitleRequest,
    TrakError,
};

use super::ports::AiApi;
use crate::notifier_ports::{Notification, Notifier};
use crate::store::AppStore;
use crate::tasks::LifecycleService;

/// Remove surrounding whitespace and one layer of matching quotes
///
/// Models like to answer `"Fix login bug"` with the quotes included.
pub fn strip_quotes(raw: &str) -> String {
    let trimmed = raw.trim();
    for (open, close) in [('"', '"'), ('\'', '\''), ('\u{201c}', '\u{201d}')] {
        if let Some(inner) = trimmed.strip_prefix(open).and_then(|s| s.strip_suffix(close)) {
            return inner.trim().to_string();
        }
    }
    trimmed.to_string()
}

#[allow(clippy::cast_possible_truncation)]
fn round_minutes(minutes: f64) -> i64 {
    if minutes.is_finite() {
        minutes.round() as i64
    } else {
        0
    }
}

fn context_stats(stats: &PeriodStats) -> ContextStats {
    ContextStats { tasks_count: stats.tasks_count, total_time: round_minutes(stats.total_time) }
}

/// AI assistant service
pub struct AssistantService {
    ai: Arc<dyn AiApi>,
    lifecycle: Arc<LifecycleService>,
    store: Arc<AppStore>,
    notifier: Arc<dyn Notifier>,
}

impl AssistantService {
    pub fn new(
        ai: Arc<dyn AiApi>,
        lifecycle: Arc<LifecycleService>,
        store: Arc<AppStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { ai, lifecycle, store, notifier }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.settings().use_ai
    }

    fn enabled_settings(&self) -> Result<Settings> {
        let settings = self.store.settings();
        if settings.use_ai {
            Ok(settings)
        } else {
            Err(TrakError::Validation("AI is disabled, enable it in settings".into()))
        }
    }

    fn report<T>(&self, title: &str, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            warn!(error = %err, "{title}");
            self.notifier.notify(Notification::error(title, err.to_string()));
        }
        result
    }

    /* ---------------------------------------------------------------------- */
    /* Task enhancement */
    /* ---------------------------------------------------------------------- */

    /// Generate a title from the user's free-text input and apply it
    ///
    /// The input becomes the description. The update is only sent if
    /// `task_id` is still the task being tracked; `Ok(None)` otherwise.
    #[instrument(skip(self, user_input))]
    pub async fn enhance_task(&self, task_id: TaskId, user_input: &str) -> Result<Option<Task>> {
        let settings = self.enabled_settings()?;
        let request = TitleRequest {
            description: user_input.to_string(),
            model: settings.ollama_model,
            url: settings.ollama_url,
        };
        let title = strip_quotes(&self.ai.generate_title(&request).await?.title);
        if title.is_empty() {
            debug!(task_id, "model returned an empty title, keeping the original");
            return Ok(None);
        }

        let patch = TaskPatch {
            title: Some(title),
            description: Some(user_input.to_string()),
            ..TaskPatch::default()
        };
        let updated = self.lifecycle.update_if_current(task_id, patch).await?;
        if let Some(task) = &updated {
            info!(task_id, title = %task.title, "task enhanced");
            self.notifier.notify(Notification::success("Task enhanced", task.title.clone()));
        }
        Ok(updated)
    }

    /// Replace any task's title with one generated from its description
    ///
    /// The task is looked up in today's list (or is the current task). A
    /// missing or blank description is a `Validation` error and no request
    /// is made.
    #[instrument(skip(self))]
    pub async fn regenerate_title(&self, task_id: TaskId) -> Result<Task> {
        let title = self.report("AI title generation failed", self.title_for(task_id).await)?;
        let patch = TaskPatch { title: Some(title), ..TaskPatch::default() };
        let task = self.lifecycle.update_task(task_id, patch).await?;
        info!(task_id, title = %task.title, "title regenerated");
        self.notifier
            .notify(Notification::success("AI generated", format!("New title: \"{}\"", task.title)));
        Ok(task)
    }

    async fn title_for(&self, task_id: TaskId) -> Result<String> {
        let settings = self.enabled_settings()?;
        let task = self
            .store
            .tasks()
            .into_iter()
            .chain(self.store.current_task())
            .find(|t| t.id == task_id)
            .ok_or_else(|| TrakError::NotFound(format!("task {task_id} is not in today's list")))?;
        let description = task.description.as_deref().map(str::trim).unwrap_or_default();
        if description.is_empty() {
            return Err(TrakError::Validation(
                "a description is required to generate a title".into(),
            ));
        }

        let request = TitleRequest {
            description: description.to_string(),
            model: settings.ollama_model,
            url: settings.ollama_url,
        };
        let title = strip_quotes(&self.ai.generate_title(&request).await?.title);
        if title.is_empty() {
            return Err(TrakError::Validation("the model returned an empty title".into()));
        }
        Ok(title)
    }

    /// Run [`enhance_task`](Self::enhance_task) in the background
    ///
    /// Does nothing (and spawns nothing) while AI is disabled. Failures are
    /// logged only.
    pub fn spawn_enhancement(
        self: &Arc<Self>,
        task_id: TaskId,
        user_input: String,
    ) -> Option<JoinHandle<()>> {
        if !self.is_enabled() {
            return None;
        }
        let this = Arc::clone(self);
        Some(tokio::spawn(async move {
            if let Err(err) = this.enhance_task(task_id, &user_input).await {
                warn!(task_id, error = %err, "background task enhancement failed");
            }
        }))
    }

    /* ---------------------------------------------------------------------- */
    /* Suggestions and summaries */
    /* ---------------------------------------------------------------------- */

    /// Suggest a category for a task
    pub async fn suggest_category(&self, title: &str, description: Option<&str>) -> Result<String> {
        let result = async {
            let settings = self.enabled_settings()?;
            let request = CategoryRequest {
                title: title.to_string(),
                description: description.unwrap_or_default().to_string(),
                model: settings.ollama_model,
                url: settings.ollama_url,
            };
            Ok::<_, TrakError>(strip_quotes(&self.ai.generate_category(&request).await?.category))
        }
        .await;
        self.report("Category suggestion failed", result)
    }

    /// Summarize today's completed tasks
    #[instrument(skip(self))]
    pub async fn generate_summary(&self) -> Result<String> {
        let result = async {
            let settings = self.enabled_settings()?;
            let tasks: Vec<SummaryTask> = self
                .store
                .tasks()
                .into_iter()
                .filter(Task::is_completed)
                .map(|t| SummaryTask {
                    duration: t.duration_minutes(),
                    description: t.description.unwrap_or_default(),
                    title: t.title,
                })
                .collect();
            if tasks.is_empty() {
                return Err(TrakError::Validation("no completed tasks to summarize".into()));
            }
            let request =
                SummaryRequest { tasks, model: settings.ollama_model, url: settings.ollama_url };
            Ok::<_, TrakError>(self.ai.generate_summary(&request).await?.summary.trim().to_string())
        }
        .await;
        self.report("Summary failed", result)
    }

    /// Availability of the configured Ollama instance and its models
    pub async fn status(&self) -> Result<AiStatus> {
        let result = async {
            let settings = self.enabled_settings()?;
            self.ai.status(&settings.ollama_url).await
        }
        .await;
        self.report("AI status check failed", result)
    }

    /* ---------------------------------------------------------------------- */
    /* Chat */
    /* ---------------------------------------------------------------------- */

    /// Context sent with every chat message
    pub fn chat_context(&self) -> ChatContext {
        let state = self.store.snapshot();
        let completed: Vec<&Task> = state.tasks.iter().filter(|t| t.is_completed()).collect();
        let recent_tasks = completed
            .iter()
            .skip(completed.len().saturating_sub(CHAT_RECENT_TASKS))
            .map(|t| format!("\"{}\" ({} min)", t.title, round_minutes(t.duration_minutes())))
            .collect();

        ChatContext {
            today_stats: context_stats(&state.stats.today),
            alltime_stats: context_stats(&state.stats.all_time),
            recent_tasks,
            current_task: state.current_task.map_or_else(|| "None".to_string(), |t| t.title),
        }
    }

    /// Ask the assistant a question, streaming the reply through `on_token`
    ///
    /// Returns the full reply. Transport failures and error frames yield the
    /// fixed fallback reply instead of an error; only a disabled assistant or
    /// a blank message is rejected.
    #[instrument(skip(self, message, on_token))]
    pub async fn chat<F>(&self, message: &str, mut on_token: F) -> Result<String>
    where
        F: FnMut(&str) + Send,
    {
        let message = message.trim();
        if message.is_empty() {
            return Err(TrakError::Validation("message cannot be empty".into()));
        }
        let settings = self.report("AI disabled", self.enabled_settings())?;

        let request = ChatRequest {
            message: message.to_string(),
            context: self.chat_context(),
            model: settings.ollama_model,
            url: settings.ollama_url,
        };

        match self.stream_reply(&request, &mut on_token).await {
            Ok(reply) => {
                debug!(chars = reply.len(), "chat reply complete");
                Ok(reply)
            }
            Err(err) => {
                warn!(error = %err, "chat failed");
                self.notifier.notify(Notification::error("Chat failed", err.to_string()));
                Ok(CHAT_FALLBACK_REPLY.to_string())
            }
        }
    }

    async fn stream_reply<F>(&self, request: &ChatRequest, on_token: &mut F) -> Result<String>
    where
        F: FnMut(&str) + Send,
    {
        let mut stream = self.ai.chat(request).await?;
        let mut reply = String::new();
        while let Some(event) = stream.next().await {
            match event? {
                ChatEvent::Token(token) => {
                    on_token(&token);
                    reply.push_str(&token);
                }
                ChatEvent::Error(message) => return Err(TrakError::Network(message)),
            }
        }
        Ok(reply)
    }
}
