//! Notifications printed to the shell

use trak_core::{Notification, NotificationLevel, Notifier};

use crate::console::Console;

/// Prints transient notifications as tagged lines
pub struct ConsoleNotifier {
    console: Console,
}

impl ConsoleNotifier {
    pub const fn new(console: Console) -> Self {
        Self { console }
    }
}

fn tag(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Info => "[info]",
        NotificationLevel::Success => "[ok]",
        NotificationLevel::Error => "[error]",
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let line = if notification.message.is_empty() {
            format!("{} {}", tag(notification.level), notification.title)
        } else {
            format!("{} {}: {}", tag(notification.level), notification.title, notification.message)
        };
        self.console.line(line);
    }
}
