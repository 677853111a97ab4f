//! Notification model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    /// Daily supplement reminder
    Reminder,
    /// Report review outcome
    Report,
    /// Consumption target milestones
    Achievement,
    System,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(alias = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    /// Epoch milliseconds
    pub created_at: i64,
    /// Screen to open when the notification is tapped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Payload for adding a notification; new notifications are always unread
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationDraft {
    pub id: Option<String>,
    pub title: String,
    pub message: String,
    #[serde(alias = "type")]
    pub kind: NotificationKind,
    pub link: Option<String>,
}

impl NotificationDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn generated_id(now: i64, sequence: usize) -> String {
        format!("notification-{now}-{sequence}")
    }

    pub fn into_notification(self, now: i64, sequence: usize) -> Notification {
        Notification {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Self::generated_id(now, sequence)),
            title: self.title,
            message: self.message,
            kind: self.kind,
            read: false,
            created_at: now,
            link: self.link,
        }
    }
}

/// Notification list filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationFilters {
    /// Only show this kind; `None` shows all kinds
    pub kind: Option<NotificationKind>,
    pub unread_only: bool,
}

impl NotificationFilters {
    pub fn matches(&self, notification: &Notification) -> bool {
        if self.unread_only && notification.read {
            return false;
        }
        self.kind.is_none_or(|kind| kind == notification.kind)
    }
}
