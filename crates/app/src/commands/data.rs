//! Export, import and clear

use std::path::{Path, PathBuf};
use std::sync::Arc;

use trak_core::Notification;
use trak_domain::{Result, TrakError};

use crate::console::Console;
use crate::context::AppContext;

fn file_error(ctx: &AppContext, title: &str, path: &Path, err: &std::io::Error) -> TrakError {
    let err = TrakError::Validation(format!("{}: {err}", path.display()));
    ctx.notifier.notify(Notification::error(title, err.to_string()));
    err
}

pub(super) async fn export(
    ctx: &Arc<AppContext>,
    console: &Console,
    path: Option<PathBuf>,
) -> Result<()> {
    let json = ctx.transfer.export_json().await?;
    let path = path.unwrap_or_else(|| PathBuf::from(ctx.transfer.export_file_name()));
    tokio::fs::write(&path, json).await.map_err(|e| file_error(ctx, "Export failed", &path, &e))?;
    console.line(format!("Wrote {}", path.display()));
    Ok(())
}

pub(super) async fn import(ctx: &Arc<AppContext>, console: &Console, path: &Path) -> Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| file_error(ctx, "Import failed", path, &e))?;
    let report = ctx.transfer.import(&raw).await?;
    console.line(format!("Imported {} tasks, {} failed", report.imported, report.failed));
    Ok(())
}

pub(super) async fn clear(ctx: &Arc<AppContext>, console: &Console, confirmed: bool) -> Result<()> {
    if !confirmed {
        console.line("This deletes every task on the server. Run 'clear --yes' to confirm.");
        return Ok(());
    }
    let deleted = ctx.transfer.clear_all().await?;
    console.line(format!("Deleted {deleted} tasks"));
    Ok(())
}
