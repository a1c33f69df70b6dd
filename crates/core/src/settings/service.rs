//! Settings service

use std::sync::Arc;

use tracing::{info, instrument, warn};
use trak_domain::{Result, SettingKey, Settings};

use super::ports::SettingsApi;
use crate::notifier_ports::{Notification, Notifier};
use crate::store::AppStore;

pub struct SettingsService {
    api: Arc<dyn SettingsApi>,
    store: Arc<AppStore>,
    notifier: Arc<dyn Notifier>,
}

impl SettingsService {
    pub fn new(api: Arc<dyn SettingsApi>, store: Arc<AppStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, store, notifier }
    }

    /// Cached settings
    pub fn current(&self) -> Settings {
        self.store.settings()
    }

    /// Load all settings from the backend into the store
    ///
    /// On failure the cached copy (defaults at startup) stays in place.
    #[instrument(skip(self))]
    pub async fn fetch_settings(&self) -> Result<Settings> {
        match self.api.all_settings().await {
            Ok(map) => {
                let settings = Settings::from_map(&map);
                self.store.set_settings(settings.clone());
                info!(use_ai = settings.use_ai, model = %settings.ollama_model, "settings loaded");
                Ok(settings)
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch settings");
                self.notifier.notify(Notification::error("Failed to load settings", err.to_string()));
                Err(err)
            }
        }
    }

    /// Raw value of one setting as stored on the backend
    pub async fn get_setting(&self, key: SettingKey) -> Result<Option<String>> {
        let entry = self.api.get_setting(key.as_str()).await?;
        Ok(entry.value)
    }

    /// Validate, store on the backend, then update the cached copy
    #[instrument(skip(self))]
    pub async fn update_setting(&self, key: SettingKey, value: &str) -> Result<Settings> {
        let normalized = match key.normalize(value) {
            Ok(v) => v,
            Err(err) => {
                self.notifier.notify(Notification::error("Invalid setting", err.to_string()));
                return Err(err);
            }
        };

        let entry = match self.api.put_setting(key.as_str(), &normalized).await {
            Ok(entry) => entry,
            Err(err) => {
                warn!(%key, error = %err, "failed to update setting");
                self.notifier.notify(Notification::error("Failed to save setting", err.to_string()));
                return Err(err);
            }
        };

        let mut settings = self.store.settings();
        settings.apply(key, entry.value.as_deref().unwrap_or(&normalized));
        self.store.set_settings(settings.clone());
        info!(%key, value = %settings.value_of(key), "setting updated");
        self.notifier.notify(Notification::success("Settings saved", format!("{key} updated")));
        Ok(settings)
    }

    /// Turn a boolean setting on or off
    pub async fn set_flag(&self, key: SettingKey, enabled: bool) -> Result<Settings> {
        self.update_setting(key, if enabled { "true" } else { "false" }).await
    }
}
