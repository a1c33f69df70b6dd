//! Port for the host window
//!
//! The client never talks to a window manager directly. The host injects
//! these controls, and the REST base URL is read from the same bridge.

use trak_domain::Settings;

/// Window controls supplied by the host
pub trait WindowControls: Send + Sync {
    fn minimize(&self);

    fn maximize(&self);

    /// Close the window, or hide it when closing to the tray
    fn close(&self);

    /// Base URL of the REST backend
    fn api_url(&self) -> String;
}

/// What a close request should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    HideToTray,
    Quit,
}

/// Decide how to handle a close request from the user's settings
pub const fn close_action(settings: &Settings) -> CloseAction {
    if settings.close_to_tray {
        CloseAction::HideToTray
    } else {
        CloseAction::Quit
    }
}
