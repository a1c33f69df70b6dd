//! Line-oriented interactive shell
//!
//! Reads commands until `quit`, end of input, or the window bridge signals
//! shutdown. `watch` takes over the current line with a live timer until the
//! next line of input arrives.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::watch;
use tracing::{debug, info};
use trak_core::display::format_timer_line;
use trak_core::DisplayRefresher;
use trak_domain::{Result, TimerPhase, TrakError};

use crate::commands::{self, Command};
use crate::console::Console;
use crate::context::AppContext;

const PROMPT: &str = "trak> ";

/// Run the shell over `input`
///
/// # Errors
///
/// Returns `TrakError::Internal` if reading input fails.
pub async fn run<R>(
    ctx: Arc<AppContext>,
    console: Console,
    input: R,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    console.line("TRAK ready. Type 'help' for commands.");

    loop {
        if *shutdown.borrow() {
            break;
        }
        console.write(PROMPT);

        let line = tokio::select! {
            line = lines.next_line() => line.map_err(|e| TrakError::Internal(format!("stdin: {e}")))?,
            _ = shutdown.changed() => break,
        };
        let Some(line) = line else {
            console.line("");
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Err(err) => console.line(format!("error: {err}")),
            Ok(Command::Quit) => break,
            Ok(Command::Watch) => {
                if !watch_timer(&ctx, &console, &mut lines, &mut shutdown).await {
                    break;
                }
            }
            Ok(command) => {
                if let Err(err) = commands::execute(&ctx, &console, command).await {
                    debug!(error = %err, "command failed");
                }
            }
        }
    }

    info!("shell finished");
    Ok(())
}

/// Live timer display; returns `false` when input ended or shutdown was
/// signalled while watching
async fn watch_timer<R>(
    ctx: &Arc<AppContext>,
    console: &Console,
    lines: &mut Lines<R>,
    shutdown: &mut watch::Receiver<bool>,
) -> bool
where
    R: AsyncBufRead + Unpin,
{
    if ctx.timer.phase() == TimerPhase::Idle {
        console.line("Nothing is being tracked");
        return true;
    }
    console.line("Press Enter to stop watching");

    let title = ctx.lifecycle.current_task().map(|t| t.title);
    if ctx.timer.phase() != TimerPhase::Running {
        console.status(&format_timer_line(&ctx.timer.snapshot(), title.as_deref()));
    }

    let out = console.clone();
    let refresher =
        DisplayRefresher::spawn(Arc::clone(&ctx.timer), ctx.refresh_interval(), move |snapshot| {
            out.status(&format_timer_line(&snapshot, title.as_deref()));
        });

    let keep_going = tokio::select! {
        line = lines.next_line() => matches!(line, Ok(Some(_))),
        _ = shutdown.changed() => false,
    };

    drop(refresher);
    console.line("");
    keep_going
}
