//! UI State
//!
//! Ephemeral presentation flags. Only `theme` and `language` survive a
//! restart.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_LANGUAGE: &str = "id";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::EnumString, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Modal {
    /// Identifies which dialog is open, e.g. `confirm-logout`
    pub id: String,
    pub title: Option<String>,
    pub message: Option<String>,
    pub confirm_label: Option<String>,
    pub cancel_label: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub duration_ms: u64,
    /// Epoch milliseconds
    pub shown_at: i64,
}

impl Toast {
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.shown_at.saturating_add(self.duration_ms as i64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppBar {
    pub visible: bool,
    pub title: Option<String>,
    pub show_back: bool,
}

impl Default for AppBar {
    fn default() -> Self {
        Self {
            visible: true,
            title: None,
            show_back: false,
        }
    }
}

/// Per-screen presentation state kept across navigation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScreenState {
    pub scroll_offset: u32,
    /// e.g. `list` or `grid`
    pub view_mode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiState {
    /// Loading flags keyed by operation, e.g. `reports.fetch`
    pub loading: BTreeMap<String, bool>,
    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub theme: Theme,
    pub language: String,
    /// Visited screens, oldest first
    pub breadcrumbs: Vec<String>,
    pub bottom_nav_visible: bool,
    pub drawer_open: bool,
    pub app_bar: AppBar,
    pub screens: BTreeMap<String, ScreenState>,
    pub overlay_visible: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            loading: BTreeMap::new(),
            modal: None,
            toast: None,
            theme: Theme::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            breadcrumbs: Vec::new(),
            bottom_nav_visible: true,
            drawer_open: false,
            app_bar: AppBar::default(),
            screens: BTreeMap::new(),
            overlay_visible: false,
        }
    }
}

impl UiState {
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn is_loading(&self, key: &str) -> bool {
        self.loading.get(key).copied().unwrap_or(false)
    }

    pub fn is_anything_loading(&self) -> bool {
        self.loading.values().any(|loading| *loading)
    }

    pub fn current_screen(&self) -> Option<&str> {
        self.breadcrumbs.last().map(String::as_str)
    }
}
