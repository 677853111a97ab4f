//! UI actions

use serde::{Deserialize, Serialize};

use crate::state::{AppBar, Modal, Theme, ToastKind};

/// Toast display time applied when the payload omits `durationMs`
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UiAction {
    SetLoading(LoadingPayload),
    ShowModal(Modal),
    HideModal,
    ShowToast(ToastPayload),
    HideToast,
    SetTheme(Theme),
    SetLanguage(String),
    /// Push a screen onto the breadcrumb trail
    Navigate(NavigatePayload),
    /// Pop the current screen
    GoBack,
    SetBottomNav(bool),
    /// Toggle the drawer, or force it open/closed
    ToggleDrawer(Option<bool>),
    SetAppBar(AppBar),
    SetScreenState(ScreenStatePayload),
    SetOverlay(bool),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoadingPayload {
    pub key: String,
    pub loading: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToastPayload {
    pub message: String,
    pub kind: ToastKind,
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigatePayload {
    pub screen: String,
}

/// Partial screen state; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScreenStatePayload {
    pub screen: String,
    pub scroll_offset: Option<u32>,
    pub view_mode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DrawerPayload {
    pub open: Option<bool>,
}
