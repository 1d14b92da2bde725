use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing::debug;

use crate::notify::{
    Notification, NotificationId, NotificationKind, DEFAULT_DURATION, MAX_VISIBLE,
};

/// Ordered list of visible notifications, newest first.
///
/// Cloning yields another handle onto the same list. Each pushed notification owns an
/// expiry timer that removes it by id, so timers never touch a different entry even
/// after evictions or early dismissals reshuffle the list.
///
/// Pushing spawns the expiry timer, so it must happen inside a tokio runtime.
#[derive(Clone)]
pub struct NotificationQueue {
    visible: Arc<watch::Sender<Vec<Notification>>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self {
            visible: Arc::new(tx),
        }
    }

    /// Inserts a notification at the front and truncates the list to `MAX_VISIBLE`.
    /// A missing or zero `duration` falls back to `DEFAULT_DURATION`. Never fails.
    pub fn push(
        &self,
        kind: NotificationKind,
        title: Option<String>,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> NotificationId {
        let duration = duration
            .filter(|d| !d.is_zero())
            .unwrap_or(DEFAULT_DURATION);
        let notification = Notification {
            id: NotificationId::new(),
            kind,
            title,
            message: message.into(),
            duration,
            created_at: Utc::now(),
        };
        let id = notification.id;

        // Deadline is fixed here, not when the spawned task first gets polled.
        let expiry = tokio::time::sleep(duration);

        self.visible.send_modify(|list| {
            list.insert(0, notification);
            list.truncate(MAX_VISIBLE);
        });
        debug!(%id, kind = kind.label(), "notification pushed");

        let visible = Arc::downgrade(&self.visible);
        tokio::spawn(async move {
            expiry.await;
            expire(&visible, id);
        });

        id
    }

    pub fn success(&self, title: &str, message: impl Into<String>) -> NotificationId {
        self.push(NotificationKind::Success, Some(title.to_string()), message, None)
    }

    pub fn error(&self, title: &str, message: impl Into<String>) -> NotificationId {
        self.push(NotificationKind::Error, Some(title.to_string()), message, None)
    }

    pub fn info(&self, title: &str, message: impl Into<String>) -> NotificationId {
        self.push(NotificationKind::Info, Some(title.to_string()), message, None)
    }

    /// Removes one notification early. Returns false if it was already gone.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        remove(&self.visible, id)
    }

    /// Snapshot of the visible list, newest first.
    pub fn visible(&self) -> Vec<Notification> {
        self.visible.borrow().clone()
    }

    /// Receiver that is marked changed on every push, eviction, dismissal and expiry.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.visible.subscribe()
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

fn expire(visible: &Weak<watch::Sender<Vec<Notification>>>, id: NotificationId) {
    // Every queue handle is gone; nothing left to update.
    let Some(visible) = visible.upgrade() else {
        return;
    };
    if remove(&visible, id) {
        debug!(%id, "notification expired");
    }
}

fn remove(visible: &watch::Sender<Vec<Notification>>, id: NotificationId) -> bool {
    visible.send_if_modified(|list| {
        let before = list.len();
        list.retain(|n| n.id != id);
        list.len() != before
    })
}
