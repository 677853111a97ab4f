//! Actions module
//!
//! This module defines all actions in the store using a tagged action
//! architecture. The root `Action` enum is tagged by domain; each domain
//! enum carries typed payloads, so the router and the payload shape are
//! checked together.
//!
//! Untyped callers go through `Action::from_parts`, which resolves the
//! identifier against the `ActionType` catalog and decodes the JSON payload
//! once, at the boundary.

pub mod app;
pub mod auth;
pub mod catalog;
pub mod notification;
pub mod report;
pub mod ui;
pub mod user;

pub use app::AppAction;
pub use auth::{AuthAction, LoginPayload, RefreshPayload, DEFAULT_TOKEN_TTL_MS};
pub use catalog::{ActionType, Domain};
pub use notification::{NotificationAction, NotificationIdPayload};
pub use report::{PagePayload, ReportAction, ReportIdPayload, ReportListPayload};
pub use ui::{
    DrawerPayload, LoadingPayload, NavigatePayload, ScreenStatePayload, ToastPayload, UiAction,
    DEFAULT_TOAST_DURATION_MS,
};
pub use user::{ConsumptionPayload, HemoglobinPayload, UserAction};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Root action enum - tagged by domain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Action {
    Auth(AuthAction),
    User(UserAction),
    Report(ReportAction),
    Notification(NotificationAction),
    Ui(UiAction),
    App(AppAction),

    /// Identifier outside the catalog; reduced as a no-op
    Unrecognized { action_type: String, payload: Value },

    /// Not part of the catalog: tags the notification sent after state has
    /// been restored from storage
    Restored,
}

impl Action {
    /// Catalog identifier, `None` for unrecognized and restore actions
    pub fn action_type(&self) -> Option<ActionType> {
        use ActionType as T;
        let action_type = match self {
            Action::Auth(action) => match action {
                AuthAction::Login(_) => T::AuthLogin,
                AuthAction::Logout => T::AuthLogout,
                AuthAction::RefreshToken(_) => T::AuthRefreshToken,
                AuthAction::SetRememberMe(_) => T::AuthSetRememberMe,
            },
            Action::User(action) => match action {
                UserAction::SetProfile(_) => T::UserSetProfile,
                UserAction::UpdateProfile(_) => T::UserUpdateProfile,
                UserAction::IncrementConsumption => T::UserIncrementConsumption,
                UserAction::SetConsumption(_) => T::UserSetConsumption,
                UserAction::ResetConsumption => T::UserResetConsumption,
                UserAction::UpdateHemoglobin(_) => T::UserUpdateHemoglobin,
                UserAction::SetStatistics(_) => T::UserSetStatistics,
                UserAction::UpdatePreferences(_) => T::UserUpdatePreferences,
                UserAction::SetLoading(_) => T::UserSetLoading,
                UserAction::SetError(_) => T::UserSetError,
            },
            Action::Report(action) => match action {
                ReportAction::SetList(_) => T::ReportSetList,
                ReportAction::Add(_) => T::ReportAdd,
                ReportAction::Update(_) => T::ReportUpdate,
                ReportAction::Delete(_) => T::ReportDelete,
                ReportAction::SetCurrent(_) => T::ReportSetCurrent,
                ReportAction::ClearCurrent => T::ReportClearCurrent,
                ReportAction::SetFilters(_) => T::ReportSetFilters,
                ReportAction::ResetFilters => T::ReportResetFilters,
                ReportAction::SetPage(_) => T::ReportSetPage,
                ReportAction::SetLoading(_) => T::ReportSetLoading,
                ReportAction::SetError(_) => T::ReportSetError,
            },
            Action::Notification(action) => match action {
                NotificationAction::SetList(_) => T::NotificationSetList,
                NotificationAction::Add(_) => T::NotificationAdd,
                NotificationAction::MarkRead(_) => T::NotificationMarkRead,
                NotificationAction::MarkAllRead => T::NotificationMarkAllRead,
                NotificationAction::Delete(_) => T::NotificationDelete,
                NotificationAction::ClearAll => T::NotificationClearAll,
                NotificationAction::SetFilters(_) => T::NotificationSetFilters,
                NotificationAction::SetLoading(_) => T::NotificationSetLoading,
                NotificationAction::SetError(_) => T::NotificationSetError,
            },
            Action::Ui(action) => match action {
                UiAction::SetLoading(_) => T::UiSetLoading,
                UiAction::ShowModal(_) => T::UiShowModal,
                UiAction::HideModal => T::UiHideModal,
                UiAction::ShowToast(_) => T::UiShowToast,
                UiAction::HideToast => T::UiHideToast,
                UiAction::SetTheme(_) => T::UiSetTheme,
                UiAction::SetLanguage(_) => T::UiSetLanguage,
                UiAction::Navigate(_) => T::UiNavigate,
                UiAction::GoBack => T::UiGoBack,
                UiAction::SetBottomNav(_) => T::UiSetBottomNav,
                UiAction::ToggleDrawer(_) => T::UiToggleDrawer,
                UiAction::SetAppBar(_) => T::UiSetAppBar,
                UiAction::SetScreenState(_) => T::UiSetScreenState,
                UiAction::SetOverlay(_) => T::UiSetOverlay,
            },
            Action::App(action) => match action {
                AppAction::Reset => T::AppReset,
                AppAction::ClearErrors => T::AppClearErrors,
            },
            Action::Unrecognized { .. } | Action::Restored => return None,
        };
        Some(action_type)
    }

    /// Human-readable identifier, including non-catalog actions
    pub fn name(&self) -> String {
        match self {
            Action::Unrecognized { action_type, .. } => action_type.clone(),
            Action::Restored => "@@RESTORED".to_string(),
            other => other
                .action_type()
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
        }
    }

    /// Build an action from an identifier and a JSON payload.
    ///
    /// Unknown identifiers become `Action::Unrecognized`. Payloads that do
    /// not fit the identifier's shape are replaced by that shape's default.
    pub fn from_parts(action_type: &str, payload: Value) -> Action {
        let Ok(parsed) = action_type.parse::<ActionType>() else {
            return Action::Unrecognized {
                action_type: action_type.to_string(),
                payload,
            };
        };
        Self::from_type(parsed, payload)
    }

    /// Build an action from a catalog identifier and a JSON payload
    pub fn from_type(action_type: ActionType, payload: Value) -> Action {
        use ActionType as T;
        let p = Payload {
            action_type,
            value: payload,
        };
        match action_type {
            T::AuthLogin => Action::Auth(AuthAction::Login(p.decode())),
            T::AuthLogout => Action::Auth(AuthAction::Logout),
            T::AuthRefreshToken => Action::Auth(AuthAction::RefreshToken(p.decode())),
            T::AuthSetRememberMe => Action::Auth(AuthAction::SetRememberMe(p.decode())),

            T::UserSetProfile => Action::User(UserAction::SetProfile(p.decode())),
            T::UserUpdateProfile => Action::User(UserAction::UpdateProfile(p.decode())),
            T::UserIncrementConsumption => Action::User(UserAction::IncrementConsumption),
            T::UserSetConsumption => Action::User(UserAction::SetConsumption(p.decode())),
            T::UserResetConsumption => Action::User(UserAction::ResetConsumption),
            T::UserUpdateHemoglobin => Action::User(UserAction::UpdateHemoglobin(p.decode())),
            T::UserSetStatistics => Action::User(UserAction::SetStatistics(p.decode())),
            T::UserUpdatePreferences => Action::User(UserAction::UpdatePreferences(p.decode())),
            T::UserSetLoading => Action::User(UserAction::SetLoading(p.decode())),
            T::UserSetError => Action::User(UserAction::SetError(p.decode())),

            T::ReportSetList => Action::Report(ReportAction::SetList(p.decode_list())),
            T::ReportAdd => Action::Report(ReportAction::Add(p.decode())),
            T::ReportUpdate => Action::Report(ReportAction::Update(p.decode())),
            T::ReportDelete => Action::Report(ReportAction::Delete(p.decode())),
            T::ReportSetCurrent => Action::Report(ReportAction::SetCurrent(p.decode())),
            T::ReportClearCurrent => Action::Report(ReportAction::ClearCurrent),
            T::ReportSetFilters => Action::Report(ReportAction::SetFilters(p.decode())),
            T::ReportResetFilters => Action::Report(ReportAction::ResetFilters),
            T::ReportSetPage => Action::Report(ReportAction::SetPage(p.decode())),
            T::ReportSetLoading => Action::Report(ReportAction::SetLoading(p.decode())),
            T::ReportSetError => Action::Report(ReportAction::SetError(p.decode())),

            T::NotificationSetList => {
                Action::Notification(NotificationAction::SetList(p.decode()))
            }
            T::NotificationAdd => Action::Notification(NotificationAction::Add(p.decode())),
            T::NotificationMarkRead => {
                Action::Notification(NotificationAction::MarkRead(p.decode()))
            }
            T::NotificationMarkAllRead => Action::Notification(NotificationAction::MarkAllRead),
            T::NotificationDelete => Action::Notification(NotificationAction::Delete(p.decode())),
            T::NotificationClearAll => Action::Notification(NotificationAction::ClearAll),
            T::NotificationSetFilters => {
                Action::Notification(NotificationAction::SetFilters(p.decode()))
            }
            T::NotificationSetLoading => {
                Action::Notification(NotificationAction::SetLoading(p.decode()))
            }
            T::NotificationSetError => {
                Action::Notification(NotificationAction::SetError(p.decode()))
            }

            T::UiSetLoading => Action::Ui(UiAction::SetLoading(p.decode())),
            T::UiShowModal => Action::Ui(UiAction::ShowModal(p.decode())),
            T::UiHideModal => Action::Ui(UiAction::HideModal),
            T::UiShowToast => Action::Ui(UiAction::ShowToast(p.decode())),
            T::UiHideToast => Action::Ui(UiAction::HideToast),
            T::UiSetTheme => Action::Ui(UiAction::SetTheme(p.decode())),
            T::UiSetLanguage => Action::Ui(UiAction::SetLanguage(p.decode())),
            T::UiNavigate => Action::Ui(UiAction::Navigate(p.decode())),
            T::UiGoBack => Action::Ui(UiAction::GoBack),
            T::UiSetBottomNav => Action::Ui(UiAction::SetBottomNav(p.decode())),
            T::UiToggleDrawer => Action::Ui(UiAction::ToggleDrawer(
                p.decode::<DrawerPayload>().open,
            )),
            T::UiSetAppBar => Action::Ui(UiAction::SetAppBar(p.decode())),
            T::UiSetScreenState => Action::Ui(UiAction::SetScreenState(p.decode())),
            T::UiSetOverlay => Action::Ui(UiAction::SetOverlay(p.decode())),

            T::AppReset => Action::App(AppAction::Reset),
            T::AppClearErrors => Action::App(AppAction::ClearErrors),
        }
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

impl From<UserAction> for Action {
    fn from(action: UserAction) -> Self {
        Action::User(action)
    }
}

impl From<ReportAction> for Action {
    fn from(action: ReportAction) -> Self {
        Action::Report(action)
    }
}

impl From<NotificationAction> for Action {
    fn from(action: NotificationAction) -> Self {
        Action::Notification(action)
    }
}

impl From<UiAction> for Action {
    fn from(action: UiAction) -> Self {
        Action::Ui(action)
    }
}

impl From<AppAction> for Action {
    fn from(action: AppAction) -> Self {
        Action::App(action)
    }
}

/// A dispatched action with its wall-clock timestamp
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRecord {
    pub action: Action,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl ActionRecord {
    pub fn new(action: impl Into<Action>, timestamp: i64) -> Self {
        Self {
            action: action.into(),
            timestamp,
        }
    }
}

/// Raw payload on its way into a typed action
struct Payload {
    action_type: ActionType,
    value: Value,
}

impl Payload {
    fn decode<T: DeserializeOwned + Default>(&self) -> T {
        if self.value.is_null() {
            return T::default();
        }
        match serde_json::from_value(self.value.clone()) {
            Ok(decoded) => decoded,
            Err(e) => {
                log::warn!(
                    "{}: payload does not match the expected shape ({}), using defaults",
                    self.action_type,
                    e
                );
                T::default()
            }
        }
    }

    /// Report lists arrive either bare or wrapped as `{reports, total}`
    fn decode_list(&self) -> ReportListPayload {
        if self.value.is_array() {
            return ReportListPayload {
                reports: self.decode(),
                total: None,
            };
        }
        self.decode()
    }
}
