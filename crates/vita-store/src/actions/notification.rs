//! Notification actions

use serde::{Deserialize, Serialize};

use crate::domain_models::{Notification, NotificationDraft, NotificationFilters};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NotificationAction {
    SetList(Vec<Notification>),
    /// New notification, prepended and unread
    Add(NotificationDraft),
    MarkRead(NotificationIdPayload),
    MarkAllRead,
    Delete(NotificationIdPayload),
    ClearAll,
    SetFilters(NotificationFilters),
    SetLoading(bool),
    SetError(Option<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationIdPayload {
    pub id: String,
}

impl NotificationIdPayload {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
