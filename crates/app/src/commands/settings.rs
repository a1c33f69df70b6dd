//! Settings commands

use std::sync::Arc;

use trak_core::Notification;
use trak_domain::{Result, SettingKey};

use crate::console::Console;
use crate::context::AppContext;

pub(super) fn show(ctx: &Arc<AppContext>, console: &Console) {
    let settings = ctx.settings.current();
    for key in SettingKey::ALL {
        console.line(format!("{:<14} {}", key.as_str(), settings.value_of(*key)));
    }
}

pub(super) async fn get(ctx: &Arc<AppContext>, console: &Console, key: SettingKey) -> Result<()> {
    match ctx.settings.get_setting(key).await {
        Ok(value) => {
            console.line(format!("{key} = {}", value.as_deref().unwrap_or("(unset)")));
            Ok(())
        }
        Err(err) => {
            ctx.notifier.notify(Notification::error("Failed to load setting", err.to_string()));
            Err(err)
        }
    }
}

pub(super) async fn set(
    ctx: &Arc<AppContext>,
    console: &Console,
    key: SettingKey,
    value: &str,
) -> Result<()> {
    let settings = ctx.settings.update_setting(key, value).await?;
    console.line(format!("{key} = {}", settings.value_of(key)));
    Ok(())
}
