//! Window commands

use std::sync::Arc;

use trak_core::{close_action, CloseAction};

use crate::console::Console;
use crate::context::AppContext;

/// Close, or hide to the tray when `close_to_tray` is on
pub(super) fn close(ctx: &Arc<AppContext>, console: &Console) {
    match close_action(&ctx.settings.current()) {
        CloseAction::HideToTray => {
            ctx.window.minimize();
            console.line("Hidden to tray, tracking continues. Type 'quit' to exit.");
        }
        CloseAction::Quit => ctx.window.close(),
    }
}
