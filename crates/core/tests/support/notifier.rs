use parking_lot::Mutex;
use trak_core::{Notification, NotificationLevel, Notifier};

/// Notifier that keeps everything it was sent
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.sent.lock().iter().filter(|n| n.level == NotificationLevel::Error).cloned().collect()
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().push(notification);
    }
}
