//! Export file format

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::settings::SettingsMap;
use super::task::{NewTask, Task};
use crate::constants::EXPORT_FORMAT_VERSION;
use crate::{Result, TrakError};

/// Everything written by an export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub version: String,
    #[serde(rename = "exportDate")]
    pub export_date: DateTime<Utc>,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub settings: SettingsMap,
}

impl ExportBundle {
    pub fn new(tasks: Vec<Task>, settings: SettingsMap, export_date: DateTime<Utc>) -> Self {
        Self { version: EXPORT_FORMAT_VERSION.to_string(), export_date, tasks, settings }
    }
}

/// The subset of a task that an import recreates
///
/// Only `title` is required; ids, timestamps and durations in the file are
/// ignored because the backend assigns them on creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImportTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "nullable_tags")]
    pub tags: Vec<String>,
}

fn nullable_tags<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<ImportTask> for NewTask {
    fn from(task: ImportTask) -> Self {
        Self {
            title: task.title,
            description: task.description,
            category: task.category,
            tags: task.tags,
        }
    }
}

/// Extract the task entries of an import file
///
/// The file must be a JSON object with a `tasks` array. Entries that do not
/// look like tasks are returned as `Err` so the caller can count and skip
/// them.
pub fn parse_import(raw: &str) -> Result<Vec<std::result::Result<ImportTask, String>>> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| TrakError::Validation(format!("malformed import file: {e}")))?;
    let tasks = value
        .get("tasks")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| TrakError::Validation("malformed import file: missing tasks array".into()))?;

    Ok(tasks
        .iter()
        .map(|entry| ImportTask::deserialize(entry).map_err(|e| e.to_string()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_uses_camel_case_date() {
        let bundle = ExportBundle::new(Vec::new(), SettingsMap::new(), Utc::now());
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["version"], "1.0.0");
        assert!(json.get("exportDate").is_some());
    }

    #[test]
    fn import_requires_tasks_array() {
        assert!(matches!(parse_import("[]"), Err(TrakError::Validation(_))));
        assert!(matches!(parse_import(r#"{"tasks": {}}"#), Err(TrakError::Validation(_))));
        assert!(matches!(parse_import("not json"), Err(TrakError::Validation(_))));
    }

    #[test]
    fn import_keeps_bad_entries_as_errors() {
        let entries = parse_import(
            r#"{"tasks": [{"id": 3, "title": "A", "tags": null, "duration": 5},
                          {"description": "no title"}]}"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        let first = entries[0].clone().unwrap();
        assert_eq!(first.title, "A");
        assert!(first.tags.is_empty());
        assert!(entries[1].is_err());
    }
}
