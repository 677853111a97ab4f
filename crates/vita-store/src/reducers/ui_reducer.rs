//! UI Reducer

use crate::actions::{UiAction, DEFAULT_TOAST_DURATION_MS};
use crate::reducers::ReduceContext;
use crate::state::{Toast, UiState};

/// Reducer for UI state.
pub fn reduce_ui(mut state: UiState, action: &UiAction, ctx: &ReduceContext) -> UiState {
    match action {
        UiAction::SetLoading(payload) => {
            if payload.loading {
                state.loading.insert(payload.key.clone(), true);
            } else {
                state.loading.remove(&payload.key);
            }
        }
        UiAction::ShowModal(modal) => {
            state.modal = Some(modal.clone());
            state.overlay_visible = true;
        }
        UiAction::HideModal => {
            state.modal = None;
            state.overlay_visible = false;
        }
        UiAction::ShowToast(payload) => {
            state.toast = Some(Toast {
                message: payload.message.clone(),
                kind: payload.kind,
                duration_ms: payload.duration_ms.unwrap_or(DEFAULT_TOAST_DURATION_MS),
                shown_at: ctx.now,
            });
        }
        UiAction::HideToast => {
            state.toast = None;
        }
        UiAction::SetTheme(theme) => {
            state.theme = *theme;
        }
        UiAction::SetLanguage(language) => {
            if language.trim().is_empty() {
                log::warn!("Ignoring empty language code");
                return state;
            }
            state.language = language.trim().to_string();
        }
        UiAction::Navigate(payload) => {
            if payload.screen.is_empty() || state.current_screen() == Some(payload.screen.as_str()) {
                return state;
            }
            state.breadcrumbs.push(payload.screen.clone());
            if state.breadcrumbs.len() > ctx.breadcrumb_limit {
                let excess = state.breadcrumbs.len() - ctx.breadcrumb_limit;
                state.breadcrumbs.drain(..excess);
            }
            state.drawer_open = false;
        }
        UiAction::GoBack => {
            state.breadcrumbs.pop();
        }
        UiAction::SetBottomNav(visible) => {
            state.bottom_nav_visible = *visible;
        }
        UiAction::ToggleDrawer(open) => {
            state.drawer_open = open.unwrap_or(!state.drawer_open);
        }
        UiAction::SetAppBar(app_bar) => {
            state.app_bar = app_bar.clone();
        }
        UiAction::SetScreenState(payload) => {
            let screen = state.screens.entry(payload.screen.clone()).or_default();
            if let Some(offset) = payload.scroll_offset {
                screen.scroll_offset = offset;
            }
            if payload.view_mode.is_some() {
                screen.view_mode.clone_from(&payload.view_mode);
            }
        }
        UiAction::SetOverlay(visible) => {
            state.overlay_visible = *visible;
        }
    }
    state
}
