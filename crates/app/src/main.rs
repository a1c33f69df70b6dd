//! TRAK - time tracking shell
//!
//! Main entry point: load configuration, start logging, wire the context and
//! run either one command or the interactive shell.

use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use tokio::io::BufReader;
use trak_app::adapters::{ConsoleNotifier, HeadlessWindow};
use trak_app::utils::logging;
use trak_app::{commands, shell, AppContext, Cli, Console};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = trak_infra::config::load(cli.config.clone()).context("loading configuration")?;
    cli.apply(&mut config);
    config.validate().context("validating configuration")?;

    logging::init(&config.logging);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "TRAK starting");

    let console = Console::stdout();
    let window = Arc::new(HeadlessWindow::new(config.api.base_url.clone()));
    let shutdown = window.shutdown_signal();
    let notifier = Arc::new(ConsoleNotifier::new(console.clone()));

    let ctx = Arc::new(AppContext::new(config, window, notifier).context("wiring services")?);
    ctx.initialize().await;

    if let Some(line) = cli.one_shot() {
        commands::run_once(&ctx, &console, &line).await?;
        return Ok(());
    }

    let stdin = BufReader::new(tokio::io::stdin());
    shell::run(ctx, console, stdin, shutdown).await?;
    tracing::info!("TRAK stopped");
    Ok(())
}
