//! Data export, import and bulk deletion

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};
use trak_common::time::Clock;
use trak_domain::types::transfer::parse_import;
use trak_domain::{ExportBundle, NewTask, Result, TrakError};

use crate::notifier_ports::{Notification, Notifier};
use crate::settings::SettingsApi;
use crate::tasks::{LifecycleService, TaskApi};

/// Outcome of an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub failed: usize,
}

pub struct TransferService {
    tasks: Arc<dyn TaskApi>,
    settings: Arc<dyn SettingsApi>,
    lifecycle: Arc<LifecycleService>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
}

impl TransferService {
    pub fn new(
        tasks: Arc<dyn TaskApi>,
        settings: Arc<dyn SettingsApi>,
        lifecycle: Arc<LifecycleService>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { tasks, settings, lifecycle, clock, notifier }
    }

    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.clock.now_millis()).unwrap_or_default()
    }

    fn report<T>(&self, title: &str, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            warn!(error = %err, "{title}");
            self.notifier.notify(Notification::error(title, err.to_string()));
        }
        result
    }

    /// Collect every task and setting into an export bundle
    #[instrument(skip(self))]
    pub async fn export(&self) -> Result<ExportBundle> {
        let result = async {
            let tasks = self.tasks.list_tasks().await?;
            let settings = self.settings.all_settings().await?;
            Ok::<_, TrakError>(ExportBundle::new(tasks, settings, self.now()))
        }
        .await;
        let bundle = self.report("Export failed", result)?;
        info!(tasks = bundle.tasks.len(), "data exported");
        self.notifier.notify(Notification::success(
            "Data exported",
            format!("Exported {} tasks", bundle.tasks.len()),
        ));
        Ok(bundle)
    }

    /// Export as pretty-printed JSON
    pub async fn export_json(&self) -> Result<String> {
        let bundle = self.export().await?;
        serde_json::to_string_pretty(&bundle).map_err(|e| TrakError::Internal(e.to_string()))
    }

    /// Suggested file name for an export taken now
    pub fn export_file_name(&self) -> String {
        format!("trak-export-{}.json", self.now().format("%Y-%m-%d"))
    }

    /// Recreate the tasks of an export file
    ///
    /// A file without a `tasks` array is rejected outright. Individual tasks
    /// that fail are counted and skipped.
    #[instrument(skip(self, raw))]
    pub async fn import(&self, raw: &str) -> Result<ImportReport> {
        let entries = self.report("Import failed", parse_import(raw))?;
        let mut report = ImportReport::default();

        for entry in entries {
            let task: NewTask = match entry {
                Ok(task) => task.into(),
                Err(reason) => {
                    warn!(%reason, "skipping malformed task entry");
                    report.failed += 1;
                    continue;
                }
            };
            match self.tasks.create_task(&task).await {
                Ok(created) => {
                    report.imported += 1;
                    info!(task_id = created.id, "task imported");
                }
                Err(err) => {
                    warn!(title = %task.title, error = %err, "failed to import task");
                    report.failed += 1;
                }
            }
        }

        self.lifecycle.refresh().await;
        self.notifier.notify(Notification::success(
            "Data imported",
            format!("Imported {} tasks", report.imported),
        ));
        Ok(report)
    }

    /// Delete every task on the backend
    ///
    /// Resets the timer if the task being tracked is among them.
    #[instrument(skip(self))]
    pub async fn clear_all(&self) -> Result<usize> {
        let tasks = self.report("Clear failed", self.tasks.list_tasks().await)?;
        let ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
        let deleted = self.lifecycle.delete_tasks(&ids).await;
        info!(deleted, total = ids.len(), "all data cleared");
        self.notifier.notify(Notification::success(
            "All data cleared",
            format!("Deleted {deleted} tasks"),
        ));
        Ok(deleted)
    }
}
