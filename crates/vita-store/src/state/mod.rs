//! Application State Module
//!
//! Contains all state types used by the store, organized by domain.

mod app;
mod auth;
mod notification;
mod report;
mod ui;
mod user;

pub use app::{Slice, SliceName, StateTree};
pub use auth::AuthState;
pub use notification::NotificationState;
pub use report::{Pagination, ReportPage, ReportState, ReportStatistics, DEFAULT_PAGE_LIMIT};
pub use ui::{AppBar, Modal, ScreenState, Theme, Toast, ToastKind, UiState, DEFAULT_LANGUAGE};
pub use user::{
    HemoglobinState, PreferencesPatch, Units, UserPreferences, UserProfile, UserState,
    UserStatistics, VitaminConsumption, DEFAULT_CONSUMPTION_TARGET,
};
