//! `SettingsApi` over the `/settings` endpoints

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::instrument;
use trak_core::SettingsApi;
use trak_domain::{Result, SettingEntry, SettingsMap, TrakError};

use super::client::ApiClient;

#[derive(Serialize)]
struct SettingUpdate<'a> {
    key: &'a str,
    value: &'a str,
}

/// Settings endpoints of the REST backend
pub struct RestSettingsApi {
    client: Arc<ApiClient>,
}

impl RestSettingsApi {
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

/// Keys are interpolated into the path, so only plain identifiers pass.
fn checked_key(key: &str) -> Result<&str> {
    let valid = !key.is_empty()
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(key)
    } else {
        Err(TrakError::Validation(format!("invalid setting key '{key}'")))
    }
}

#[async_trait]
impl SettingsApi for RestSettingsApi {
    async fn all_settings(&self) -> Result<SettingsMap> {
        Ok(self.client.get("/settings/").await?)
    }

    async fn get_setting(&self, key: &str) -> Result<SettingEntry> {
        let key = checked_key(key)?;
        Ok(self.client.get(&format!("/settings/{key}")).await?)
    }

    #[instrument(skip(self, value))]
    async fn put_setting(&self, key: &str, value: &str) -> Result<SettingEntry> {
        let key = checked_key(key)?;
        Ok(self.client.post("/settings/", &SettingUpdate { key, value }).await?)
    }
}
