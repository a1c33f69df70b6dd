//! Port interfaces for the settings endpoints

use async_trait::async_trait;
use trak_domain::{Result, SettingEntry, SettingsMap};

/// Settings storage, owned by the REST backend
#[async_trait]
pub trait SettingsApi: Send + Sync {
    /// `GET /settings/`
    async fn all_settings(&self) -> Result<SettingsMap>;

    /// `GET /settings/{key}`
    async fn get_setting(&self, key: &str) -> Result<SettingEntry>;

    /// `POST /settings/`; creates or replaces the value
    async fn put_setting(&self, key: &str, value: &str) -> Result<SettingEntry>;
}
