//! Window bridge for a terminal session
//!
//! There is no window to manage. Minimize and maximize are logged; closing
//! signals the shell to shut down.

use tokio::sync::watch;
use tracing::info;
use trak_core::WindowControls;

pub struct HeadlessWindow {
    api_url: String,
    shutdown: watch::Sender<bool>,
}

impl HeadlessWindow {
    pub fn new(api_url: impl Into<String>) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self { api_url: api_url.into(), shutdown }
    }

    /// Becomes `true` once the window has been closed
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    pub fn is_closed(&self) -> bool {
        *self.shutdown.borrow()
    }
}

impl WindowControls for HeadlessWindow {
    fn minimize(&self) {
        info!("window minimized");
    }

    fn maximize(&self) {
        info!("window maximized");
    }

    fn close(&self) {
        info!("window closed");
        self.shutdown.send_replace(true);
    }

    fn api_url(&self) -> String {
        self.api_url.clone()
    }
}
