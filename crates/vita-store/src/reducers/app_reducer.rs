use crate::actions::{Action, AppAction, AuthAction, ReportAction};
use crate::reducers::{
    auth_reducer, notification_reducer, report_reducer, ui_reducer, user_reducer, ChangeSet,
    ReduceContext,
};
use crate::state::{NotificationState, ReportState, StateTree, UserState};

/// Root reducer - routes an action to the slice it belongs to.
///
/// Returns the next tree together with the set of slices whose value
/// differs from the input tree. An empty set means the action was a no-op.
pub fn reduce(mut state: StateTree, action: &Action, ctx: &ReduceContext) -> (StateTree, ChangeSet) {
    let mut changes = ChangeSet::empty();

    match action {
        Action::Auth(auth_action) => {
            let is_logout = matches!(auth_action, AuthAction::Logout);
            apply(&mut state.auth, &mut changes, ChangeSet::AUTH, |auth| {
                auth_reducer::reduce_auth(auth, auth_action, ctx)
            });
            if is_logout {
                // Private data goes with the session, presentation stays
                apply(&mut state.user, &mut changes, ChangeSet::USER, |_| {
                    UserState::initial()
                });
                apply(&mut state.reports, &mut changes, ChangeSet::REPORTS, |_| {
                    ReportState::initial()
                });
                apply(
                    &mut state.notifications,
                    &mut changes,
                    ChangeSet::NOTIFICATIONS,
                    |_| NotificationState::initial(),
                );
            }
        }
        Action::User(user_action) => {
            apply(&mut state.user, &mut changes, ChangeSet::USER, |user| {
                user_reducer::reduce_user(user, user_action, ctx)
            });
        }
        Action::Report(report_action) => {
            apply(&mut state.reports, &mut changes, ChangeSet::REPORTS, |reports| {
                report_reducer::reduce_reports(reports, report_action, ctx)
            });
            if matches!(report_action, ReportAction::Add(_)) {
                apply(&mut state.user, &mut changes, ChangeSet::USER, |mut user| {
                    user.statistics.reports_submitted =
                        user.statistics.reports_submitted.saturating_add(1);
                    user.statistics.last_report_at = Some(ctx.now);
                    user
                });
            }
        }
        Action::Notification(notification_action) => {
            apply(
                &mut state.notifications,
                &mut changes,
                ChangeSet::NOTIFICATIONS,
                |notifications| {
                    notification_reducer::reduce_notifications(
                        notifications,
                        notification_action,
                        ctx,
                    )
                },
            );
        }
        Action::Ui(ui_action) => {
            apply(&mut state.ui, &mut changes, ChangeSet::UI, |ui| {
                ui_reducer::reduce_ui(ui, ui_action, ctx)
            });
        }
        Action::App(AppAction::Reset) => {
            let initial = StateTree::initial();
            changes = diff(&state, &initial);
            log::info!("Resetting store state");
            state = initial;
        }
        Action::App(AppAction::ClearErrors) => {
            apply(&mut state.user, &mut changes, ChangeSet::USER, |mut user| {
                user.error = None;
                user
            });
            apply(&mut state.reports, &mut changes, ChangeSet::REPORTS, |mut reports| {
                reports.error = None;
                reports
            });
            apply(
                &mut state.notifications,
                &mut changes,
                ChangeSet::NOTIFICATIONS,
                |mut notifications| {
                    notifications.error = None;
                    notifications
                },
            );
        }
        Action::Unrecognized { action_type, .. } => {
            log::warn!("Unknown action type: {}", action_type);
        }
        Action::Restored => {}
    }

    (state, changes)
}

/// Run a slice reducer and record the slice in `changes` if it moved
fn apply<S, F>(slot: &mut S, changes: &mut ChangeSet, flag: ChangeSet, reducer: F)
where
    S: Clone + PartialEq,
    F: FnOnce(S) -> S,
{
    let next = reducer(slot.clone());
    if next != *slot {
        changes.insert(flag);
        *slot = next;
    }
}

/// Slices that differ between two trees
pub fn diff(prev: &StateTree, next: &StateTree) -> ChangeSet {
    let mut changes = ChangeSet::empty();
    changes.set(ChangeSet::AUTH, prev.auth != next.auth);
    changes.set(ChangeSet::USER, prev.user != next.user);
    changes.set(ChangeSet::REPORTS, prev.reports != next.reports);
    changes.set(
        ChangeSet::NOTIFICATIONS,
        prev.notifications != next.notifications,
    );
    changes.set(ChangeSet::UI, prev.ui != next.ui);
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{HemoglobinPayload, LoginPayload, NotificationAction, UiAction, UserAction};
    use crate::domain_models::{NotificationDraft, ReportDraft};
    use crate::state::Theme;
    use proptest::prelude::*;
    use serde_json::json;

    fn run(state: StateTree, action: impl Into<Action>) -> (StateTree, ChangeSet) {
        reduce(state, &action.into(), &ReduceContext::at(1_000))
    }

    #[test]
    fn test_only_touched_slice_changes() {
        let (state, changes) = run(StateTree::initial(), UserAction::IncrementConsumption);
        assert_eq!(changes, ChangeSet::USER);
        assert_eq!(state.auth, StateTree::initial().auth);
        assert_eq!(state.user.vitamin_consumption.count, 1);
    }

    #[test]
    fn test_noop_reports_no_change() {
        let (_, changes) = run(StateTree::initial(), UiAction::GoBack);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_unknown_action_is_noop() {
        let tree = StateTree::initial();
        let action = Action::from_parts("NOT_A_REAL_ACTION", json!({"x": 1}));
        let (next, changes) = run(tree.clone(), action);
        assert!(changes.is_empty());
        assert_eq!(next, tree);
    }

    #[test]
    fn test_logout_clears_private_slices_but_keeps_ui() {
        let (state, _) = run(StateTree::initial(), AuthAction::Login(LoginPayload::new("t", 1_000)));
        let (state, _) = run(state, UserAction::IncrementConsumption);
        let (state, _) = run(state, ReportAction::Add(ReportDraft::new("r")));
        let (state, _) = run(state, NotificationAction::Add(NotificationDraft::new("n")));
        let (state, _) = run(state, UiAction::SetTheme(Theme::Dark));

        let (state, changes) = run(state, AuthAction::Logout);
        assert_eq!(
            changes,
            ChangeSet::AUTH | ChangeSet::USER | ChangeSet::REPORTS | ChangeSet::NOTIFICATIONS
        );
        assert_eq!(state.user, UserState::initial());
        assert!(state.reports.list.is_empty());
        assert!(state.notifications.list.is_empty());
        assert_eq!(state.ui.theme, Theme::Dark);
    }

    #[test]
    fn test_report_add_counts_submission() {
        let (state, changes) = run(StateTree::initial(), ReportAction::Add(ReportDraft::new("r")));
        assert_eq!(changes, ChangeSet::REPORTS | ChangeSet::USER);
        assert_eq!(state.user.statistics.reports_submitted, 1);
        assert_eq!(state.user.statistics.last_report_at, Some(1_000));
    }

    #[test]
    fn test_clear_errors() {
        let (state, _) = run(StateTree::initial(), UserAction::SetError(Some("e".to_string())));
        let (state, _) = run(state, ReportAction::SetError(Some("e".to_string())));
        let (state, changes) = run(state, AppAction::ClearErrors);
        assert_eq!(changes, ChangeSet::USER | ChangeSet::REPORTS);
        assert!(state.user.error.is_none());
        assert!(state.reports.error.is_none());
    }

    #[test]
    fn test_reset_restores_every_slice() {
        let (state, _) = run(StateTree::initial(), UserAction::IncrementConsumption);
        let (state, _) = run(state, UiAction::SetTheme(Theme::Dark));
        let (state, changes) = run(state, AppAction::Reset);
        assert_eq!(state, StateTree::initial());
        assert_eq!(changes, ChangeSet::USER | ChangeSet::UI);

        let (_, changes) = run(state, AppAction::Reset);
        assert!(changes.is_empty());
    }

    fn user_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::from(UserAction::IncrementConsumption)),
            Just(Action::from(UserAction::ResetConsumption)),
            (8.0f64..16.0)
                .prop_map(|v| Action::from(UserAction::UpdateHemoglobin(HemoglobinPayload::new(v)))),
            any::<bool>().prop_map(|b| Action::from(UserAction::SetLoading(b))),
        ]
    }

    proptest! {
        #[test]
        fn user_actions_leave_other_slices_untouched(actions in prop::collection::vec(user_action(), 1..30)) {
            let initial = StateTree::initial();
            let mut state = initial.clone();
            for action in &actions {
                let (next, changes) = reduce(state, action, &ReduceContext::at(0));
                prop_assert!((changes - ChangeSet::USER).is_empty());
                state = next;
            }
            prop_assert_eq!(&state.auth, &initial.auth);
            prop_assert_eq!(&state.reports, &initial.reports);
            prop_assert_eq!(&state.notifications, &initial.notifications);
            prop_assert_eq!(&state.ui, &initial.ui);
        }
    }
}
