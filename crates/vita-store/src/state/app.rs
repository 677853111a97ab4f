//! Application State Tree

use serde::{Deserialize, Serialize};

use super::{AuthState, NotificationState, ReportState, UiState, UserState};

/// Root state: one owned slice per domain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateTree {
    pub auth: AuthState,
    pub user: UserState,
    pub reports: ReportState,
    pub notifications: NotificationState,
    pub ui: UiState,
}

impl StateTree {
    /// Every slice at its domain's initial state
    pub fn initial() -> Self {
        Self {
            auth: AuthState::initial(),
            user: UserState::initial(),
            reports: ReportState::initial(),
            notifications: NotificationState::initial(),
            ui: UiState::initial(),
        }
    }

    /// Owned copy of one slice
    pub fn slice(&self, name: SliceName) -> Slice {
        match name {
            SliceName::Auth => Slice::Auth(self.auth.clone()),
            SliceName::User => Slice::User(self.user.clone()),
            SliceName::Reports => Slice::Reports(self.reports.clone()),
            SliceName::Notifications => Slice::Notifications(self.notifications.clone()),
            SliceName::Ui => Slice::Ui(self.ui.clone()),
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SliceName {
    Auth,
    User,
    Reports,
    Notifications,
    Ui,
}

/// A single domain slice, detached from the tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Slice {
    Auth(AuthState),
    User(UserState),
    Reports(ReportState),
    Notifications(NotificationState),
    Ui(UiState),
}

impl Slice {
    pub fn name(&self) -> SliceName {
        match self {
            Slice::Auth(_) => SliceName::Auth,
            Slice::User(_) => SliceName::User,
            Slice::Reports(_) => SliceName::Reports,
            Slice::Notifications(_) => SliceName::Notifications,
            Slice::Ui(_) => SliceName::Ui,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_slice_names_round_trip() {
        for name in SliceName::iter() {
            let parsed: SliceName = name.to_string().parse().unwrap();
            assert_eq!(parsed, name);
            assert_eq!(StateTree::initial().slice(name).name(), name);
        }
        assert_eq!("notifications".parse::<SliceName>().unwrap(), SliceName::Notifications);
    }

    #[test]
    fn test_initial_equals_default() {
        assert_eq!(StateTree::initial(), StateTree::default());
    }
}
