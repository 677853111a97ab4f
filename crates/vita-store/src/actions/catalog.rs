//! Action catalog
//!
//! The closed set of action-type identifiers the store understands. The
//! string form (`AUTH_LOGIN`, ...) is what untyped callers pass to
//! `Store::dispatch_raw`; typed callers build `Action` values directly.

use serde::Serialize;

/// Domain an action type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Domain {
    Auth,
    User,
    Report,
    Notification,
    Ui,
    App,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    // Auth
    AuthLogin,
    AuthLogout,
    AuthRefreshToken,
    AuthSetRememberMe,

    // User
    UserSetProfile,
    UserUpdateProfile,
    UserIncrementConsumption,
    UserSetConsumption,
    UserResetConsumption,
    UserUpdateHemoglobin,
    UserSetStatistics,
    UserUpdatePreferences,
    UserSetLoading,
    UserSetError,

    // Report
    ReportSetList,
    ReportAdd,
    ReportUpdate,
    ReportDelete,
    ReportSetCurrent,
    ReportClearCurrent,
    ReportSetFilters,
    ReportResetFilters,
    ReportSetPage,
    ReportSetLoading,
    ReportSetError,

    // Notification
    NotificationSetList,
    NotificationAdd,
    NotificationMarkRead,
    NotificationMarkAllRead,
    NotificationDelete,
    NotificationClearAll,
    NotificationSetFilters,
    NotificationSetLoading,
    NotificationSetError,

    // UI
    UiSetLoading,
    UiShowModal,
    UiHideModal,
    UiShowToast,
    UiHideToast,
    UiSetTheme,
    UiSetLanguage,
    UiNavigate,
    UiGoBack,
    UiSetBottomNav,
    UiToggleDrawer,
    UiSetAppBar,
    UiSetScreenState,
    UiSetOverlay,

    // App
    AppReset,
    AppClearErrors,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    pub fn domain(&self) -> Domain {
        use ActionType::*;
        match self {
            AuthLogin | AuthLogout | AuthRefreshToken | AuthSetRememberMe => Domain::Auth,
            UserSetProfile
            | UserUpdateProfile
            | UserIncrementConsumption
            | UserSetConsumption
            | UserResetConsumption
            | UserUpdateHemoglobin
            | UserSetStatistics
            | UserUpdatePreferences
            | UserSetLoading
            | UserSetError => Domain::User,
            ReportSetList | ReportAdd | ReportUpdate | ReportDelete | ReportSetCurrent
            | ReportClearCurrent | ReportSetFilters | ReportResetFilters | ReportSetPage
            | ReportSetLoading | ReportSetError => Domain::Report,
            NotificationSetList
            | NotificationAdd
            | NotificationMarkRead
            | NotificationMarkAllRead
            | NotificationDelete
            | NotificationClearAll
            | NotificationSetFilters
            | NotificationSetLoading
            | NotificationSetError => Domain::Notification,
            UiSetLoading | UiShowModal | UiHideModal | UiShowToast | UiHideToast | UiSetTheme
            | UiSetLanguage | UiNavigate | UiGoBack | UiSetBottomNav | UiToggleDrawer
            | UiSetAppBar | UiSetScreenState | UiSetOverlay => Domain::Ui,
            AppReset | AppClearErrors => Domain::App,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_identifiers_are_screaming_snake_case() {
        assert_eq!(ActionType::AuthLogin.as_str(), "AUTH_LOGIN");
        assert_eq!(
            ActionType::UserIncrementConsumption.to_string(),
            "USER_INCREMENT_CONSUMPTION"
        );
        assert_eq!(
            ActionType::NotificationMarkAllRead.as_str(),
            "NOTIFICATION_MARK_ALL_READ"
        );
        assert_eq!(ActionType::UiSetAppBar.as_str(), "UI_SET_APP_BAR");
    }

    #[test]
    fn test_identifier_prefix_matches_domain() {
        for action_type in ActionType::iter() {
            let prefix = action_type.domain().to_string().to_uppercase();
            assert!(
                action_type.as_str().starts_with(&format!("{prefix}_")),
                "{action_type} is not in domain {prefix}"
            );
            assert_eq!(action_type.as_str().parse::<ActionType>().unwrap(), action_type);
        }
    }

    #[test]
    fn test_unknown_identifier_rejected() {
        assert!("USER_TELEPORT".parse::<ActionType>().is_err());
        assert!("auth_login".parse::<ActionType>().is_err());
    }
}
