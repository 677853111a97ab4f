//! Notification State

use serde::{Deserialize, Serialize};

use crate::domain_models::{Notification, NotificationFilters};

/// `unread_count` always equals the number of unread items in `list`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationState {
    /// Newest first
    pub list: Vec<Notification>,
    pub unread_count: usize,
    pub filters: NotificationFilters,
    pub loading: bool,
    pub error: Option<String>,
}

impl NotificationState {
    pub fn initial() -> Self {
        Self::default()
    }

    /// Count unread notifications in the list
    pub fn recount(&self) -> usize {
        self.list.iter().filter(|n| !n.read).count()
    }

    pub fn find(&self, id: &str) -> Option<&Notification> {
        self.list.iter().find(|n| n.id == id)
    }

    pub fn unread(&self) -> Vec<&Notification> {
        self.list.iter().filter(|n| !n.read).collect()
    }

    /// Notifications passing the current filters
    pub fn filtered(&self) -> Vec<&Notification> {
        self.list.iter().filter(|n| self.filters.matches(n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_models::NotificationDraft;

    #[test]
    fn test_recount_and_unread() {
        let mut state = NotificationState::initial();
        state.list = vec![
            NotificationDraft::new("a").into_notification(1, 0),
            NotificationDraft::new("b").into_notification(2, 1),
        ];
        state.list[0].read = true;

        assert_eq!(state.recount(), 1);
        assert_eq!(state.unread().len(), 1);
        assert_eq!(state.unread()[0].title, "b");
        assert!(state.find("notification-1-0").is_some());
    }
}
