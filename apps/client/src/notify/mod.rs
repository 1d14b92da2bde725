//! Notifications: transient, auto-expiring user-facing messages.
//!
//! The queue is an owned service: `main` builds one `NotificationQueue` and hands
//! clones of it to whatever needs to raise a message. There is no global.
#![allow(dead_code)]

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod queue;

pub use queue::NotificationQueue;

/// Maximum number of notifications visible at once. Pushing past it evicts the oldest.
pub const MAX_VISIBLE: usize = 4;
/// Lifetime of a notification when the caller does not pick one.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(3500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(Uuid);

impl NotificationId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: Option<String>,
    pub message: String,
    pub duration: Duration,
    pub created_at: DateTime<Utc>,
}
