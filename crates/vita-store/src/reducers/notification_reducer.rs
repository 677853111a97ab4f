//! Notification Reducer
//!
//! `unread_count` is adjusted in place for single-item changes and recounted
//! for everything else.

use crate::actions::NotificationAction;
use crate::domain_models::{free_sequence, NotificationDraft};
use crate::reducers::ReduceContext;
use crate::state::NotificationState;

/// Reducer for notification state.
pub fn reduce_notifications(
    mut state: NotificationState,
    action: &NotificationAction,
    ctx: &ReduceContext,
) -> NotificationState {
    match action {
        NotificationAction::SetList(list) => {
            state.list = list.clone();
            state.unread_count = state.recount();
            state.loading = false;
        }
        NotificationAction::Add(draft) => {
            let sequence = free_sequence(state.list.len(), |sequence| {
                let id = NotificationDraft::generated_id(ctx.now, sequence);
                state.list.iter().any(|n| n.id == id)
            });
            let notification = draft.clone().into_notification(ctx.now, sequence);
            state.list.insert(0, notification);
            state.unread_count += 1;
        }
        NotificationAction::MarkRead(payload) => {
            for notification in state.list.iter_mut().filter(|n| n.id == payload.id) {
                notification.read = true;
            }
            state.unread_count = state.recount();
        }
        NotificationAction::MarkAllRead => {
            for notification in &mut state.list {
                notification.read = true;
            }
            state.unread_count = 0;
        }
        NotificationAction::Delete(payload) => {
            let Some(index) = state.list.iter().position(|n| n.id == payload.id) else {
                log::warn!("Notification {} not found, nothing to delete", payload.id);
                return state;
            };
            let removed = state.list.remove(index);
            if !removed.read {
                state.unread_count = state.unread_count.saturating_sub(1);
            }
        }
        NotificationAction::ClearAll => {
            state.list.clear();
            state.unread_count = 0;
        }
        NotificationAction::SetFilters(filters) => {
            state.filters = filters.clone();
        }
        NotificationAction::SetLoading(loading) => {
            state.loading = *loading;
        }
        NotificationAction::SetError(error) => {
            state.error.clone_from(error);
            state.loading = false;
        }
    }
    debug_assert_eq!(state.unread_count, state.recount());
    state
}
