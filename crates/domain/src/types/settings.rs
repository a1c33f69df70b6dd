//! User settings
//!
//! The backend stores every setting as a nullable string. Booleans travel as
//! `"true"`/`"false"` and are decoded here into typed fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL};
use crate::impl_domain_status_conversions;
use crate::{Result, TrakError};

/// Raw settings as returned by `GET /settings/`
pub type SettingsMap = BTreeMap<String, Option<String>>;

/// Settings understood by this client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    UseAi,
    OllamaModel,
    OllamaUrl,
    CloseToTray,
}

impl_domain_status_conversions!(SettingKey {
    UseAi => "use_ai",
    OllamaModel => "ollama_model",
    OllamaUrl => "ollama_url",
    CloseToTray => "close_to_tray",
});

impl SettingKey {
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Self::UseAi | Self::CloseToTray)
    }

    /// Validate and normalize a user-supplied value for this key
    ///
    /// Boolean keys accept `true/false`, `on/off`, `yes/no` and `1/0` and are
    /// normalized to `"true"`/`"false"`. Other keys must be non-blank.
    pub fn normalize(&self, value: &str) -> Result<String> {
        let value = value.trim();
        if self.is_boolean() {
            return match value.to_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Ok("true".to_string()),
                "false" | "off" | "no" | "0" => Ok("false".to_string()),
                _ => Err(TrakError::Validation(format!("{self} expects true or false, got '{value}'"))),
            };
        }
        if value.is_empty() {
            return Err(TrakError::Validation(format!("{self} cannot be empty")));
        }
        if *self == Self::OllamaUrl && !(value.starts_with("http://") || value.starts_with("https://"))
        {
            return Err(TrakError::Validation(format!("{self} must be an http(s) URL")));
        }
        Ok(value.to_string())
    }
}

/// Typed view of the user's settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub use_ai: bool,
    pub ollama_model: String,
    pub ollama_url: String,
    pub close_to_tray: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_ai: false,
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            close_to_tray: true,
        }
    }
}

impl Settings {
    /// Decode the backend's string map
    ///
    /// `use_ai` is on only for the exact string `"true"`; `close_to_tray` is
    /// on unless it is exactly `"false"`. Missing or blank model and URL fall
    /// back to the defaults.
    pub fn from_map(map: &SettingsMap) -> Self {
        let get = |key: SettingKey| map.get(key.as_str()).and_then(Option::as_deref);
        let non_blank = |key: SettingKey, default: &str| {
            get(key).filter(|v| !v.trim().is_empty()).unwrap_or(default).to_string()
        };

        Self {
            use_ai: get(SettingKey::UseAi) == Some("true"),
            ollama_model: non_blank(SettingKey::OllamaModel, DEFAULT_OLLAMA_MODEL),
            ollama_url: non_blank(SettingKey::OllamaUrl, DEFAULT_OLLAMA_URL),
            close_to_tray: get(SettingKey::CloseToTray) != Some("false"),
        }
    }

    /// Apply an already-normalized value
    pub fn apply(&mut self, key: SettingKey, value: &str) {
        match key {
            SettingKey::UseAi => self.use_ai = value == "true",
            SettingKey::OllamaModel => self.ollama_model = value.to_string(),
            SettingKey::OllamaUrl => self.ollama_url = value.to_string(),
            SettingKey::CloseToTray => self.close_to_tray = value != "false",
        }
    }

    /// Encode back into the backend's string form
    pub fn value_of(&self, key: SettingKey) -> String {
        match key {
            SettingKey::UseAi => self.use_ai.to_string(),
            SettingKey::OllamaModel => self.ollama_model.clone(),
            SettingKey::OllamaUrl => self.ollama_url.clone(),
            SettingKey::CloseToTray => self.close_to_tray.to_string(),
        }
    }
}

/// A single setting as returned by `GET /settings/{key}` and `POST /settings/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingEntry {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, Option<&str>)]) -> SettingsMap {
        pairs.iter().map(|(k, v)| ((*k).to_string(), v.map(str::to_string))).collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        let settings = Settings::from_map(&SettingsMap::new());
        assert_eq!(settings, Settings::default());
        assert!(!settings.use_ai);
        assert!(settings.close_to_tray);
    }

    #[test]
    fn booleans_use_exact_string_rules() {
        let settings = Settings::from_map(&map(&[
            ("use_ai", Some("TRUE")),
            ("close_to_tray", Some("no")),
        ]));
        assert!(!settings.use_ai);
        assert!(settings.close_to_tray);

        let settings = Settings::from_map(&map(&[
            ("use_ai", Some("true")),
            ("close_to_tray", Some("false")),
        ]));
        assert!(settings.use_ai);
        assert!(!settings.close_to_tray);
    }

    #[test]
    fn null_or_blank_strings_fall_back() {
        let settings = Settings::from_map(&map(&[
            ("ollama_model", None),
            ("ollama_url", Some("  ")),
            ("theme", Some("dark")),
        ]));
        assert_eq!(settings.ollama_model, "mistral:7b-instruct-q4_0");
        assert_eq!(settings.ollama_url, "http://localhost:11434");
    }

    #[test]
    fn normalize_booleans_and_text() {
        assert_eq!(SettingKey::UseAi.normalize("On").unwrap(), "true");
        assert_eq!(SettingKey::CloseToTray.normalize("0").unwrap(), "false");
        assert!(SettingKey::UseAi.normalize("maybe").is_err());
        assert!(SettingKey::OllamaModel.normalize(" ").is_err());
        assert!(SettingKey::OllamaUrl.normalize("localhost:11434").is_err());
        assert_eq!(SettingKey::OllamaModel.normalize(" llama3 ").unwrap(), "llama3");
    }

    #[test]
    fn apply_and_value_of_agree() {
        let mut settings = Settings::default();
        for key in SettingKey::ALL {
            let value = match key {
                SettingKey::UseAi => "true",
                SettingKey::CloseToTray => "false",
                SettingKey::OllamaModel => "llama3",
                SettingKey::OllamaUrl => "http://gpu:11434",
            };
            settings.apply(*key, value);
            assert_eq!(settings.value_of(*key), value);
        }
    }
}
