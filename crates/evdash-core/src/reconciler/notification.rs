use std::time::{Duration, Instant};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A transient message about the outcome of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Increases with every notification raised by the same notifier
    pub sequence: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub raised_at: Instant,
    pub expires_at: Instant,
}

impl Notification {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Holds at most one notification; a newer one replaces the older one.
#[derive(Debug, Clone)]
pub struct Notifier {
    ttl: Duration,
    sequence: u64,
    current: Option<Notification>,
}

impl Notifier {
    pub const fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sequence: 0,
            current: None,
        }
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) -> Notification {
        self.notify_at(kind, message, Instant::now())
    }

    pub fn notify_at(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: Instant,
    ) -> Notification {
        self.sequence += 1;
        let notification = Notification {
            sequence: self.sequence,
            kind,
            message: message.into(),
            raised_at: now,
            expires_at: now + self.ttl,
        };
        self.current = Some(notification.clone());
        notification
    }

    /// The visible notification, if it has not expired yet.
    pub fn current(&self) -> Option<&Notification> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|notification| notification.is_visible_at(now))
    }

    /// The most recent notification, expired or not.
    pub const fn latest(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
