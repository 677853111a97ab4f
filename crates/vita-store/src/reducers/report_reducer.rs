//! Report Reducer
//!
//! Statistics are recounted from the list after every change to it, so the
//! counters cannot drift from the list contents.

use crate::actions::ReportAction;
use crate::domain_models::{free_sequence, ReportDraft, ReportFilters};
use crate::reducers::ReduceContext;
use crate::state::ReportState;

/// Reducer for report state.
pub fn reduce_reports(
    mut state: ReportState,
    action: &ReportAction,
    ctx: &ReduceContext,
) -> ReportState {
    match action {
        ReportAction::SetList(payload) => {
            state.list = payload.reports.clone();
            state.pagination.total = payload.total.unwrap_or(state.list.len());
            state.refresh_statistics();
            state.loading = false;
        }
        ReportAction::Add(draft) => {
            let sequence = free_sequence(state.list.len(), |sequence| {
                let id = ReportDraft::generated_id(ctx.now, sequence);
                state.list.iter().any(|r| r.id == id)
            });
            let report = draft.clone().into_report(ctx.now, sequence);
            log::debug!("Adding report {}", report.id);
            state.list.insert(0, report);
            state.pagination.total = state.pagination.total.saturating_add(1);
            state.refresh_statistics();
        }
        ReportAction::Update(patch) => {
            let Some(report) = state.list.iter_mut().find(|r| r.id == patch.id) else {
                log::warn!("Report {} not found, nothing to update", patch.id);
                return state;
            };
            patch.apply_to(report, ctx.now);
            let updated = report.clone();
            if state
                .current_report
                .as_ref()
                .is_some_and(|current| current.id == updated.id)
            {
                state.current_report = Some(updated);
            }
            state.refresh_statistics();
        }
        ReportAction::Delete(payload) => {
            let before = state.list.len();
            state.list.retain(|r| r.id != payload.id);
            if state.list.len() == before {
                log::warn!("Report {} not found, nothing to delete", payload.id);
                return state;
            }
            state.pagination.total = state.pagination.total.saturating_sub(1);
            if state
                .current_report
                .as_ref()
                .is_some_and(|current| current.id == payload.id)
            {
                state.current_report = None;
            }
            state.refresh_statistics();
        }
        ReportAction::SetCurrent(report) => {
            state.current_report = Some(report.clone());
        }
        ReportAction::ClearCurrent => {
            state.current_report = None;
        }
        ReportAction::SetFilters(patch) => {
            state.filters.merge(patch);
            state.pagination.page = 1;
        }
        ReportAction::ResetFilters => {
            state.filters = ReportFilters::default();
            state.pagination.page = 1;
        }
        ReportAction::SetPage(payload) => {
            if let Some(page) = payload.page {
                state.pagination.page = page.max(1);
            }
            if let Some(limit) = payload.limit {
                state.pagination.limit = limit.max(1);
            }
        }
        ReportAction::SetLoading(loading) => {
            state.loading = *loading;
        }
        ReportAction::SetError(error) => {
            state.error.clone_from(error);
            state.loading = false;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{PagePayload, ReportIdPayload, ReportListPayload};
    use crate::domain_models::{
        ReportDraft, ReportFiltersPatch, ReportPatch, ReportStatus, StatusFilter,
    };
    use crate::state::ReportStatistics;

    fn reduce(state: ReportState, action: ReportAction, now: i64) -> ReportState {
        reduce_reports(state, &action, &ReduceContext::at(now))
    }

    fn add(state: ReportState, title: &str, now: i64) -> ReportState {
        reduce(state, ReportAction::Add(ReportDraft::new(title)), now)
    }

    #[test]
    fn test_add_prepends_and_counts_pending() {
        let state = add(ReportState::initial(), "first", 1);
        let state = add(state, "second", 2);

        assert_eq!(state.list[0].title, "second");
        assert_eq!(state.list[1].title, "first");
        assert_eq!(state.statistics.total, 2);
        assert_eq!(state.statistics.pending, 2);
        assert_eq!(state.pagination.total, 2);
        assert_ne!(state.list[0].id, state.list[1].id);
    }

    #[test]
    fn test_status_change_moves_counters() {
        let state = add(ReportState::initial(), "r", 1);
        let id = state.list[0].id.clone();
        let state = reduce(
            state,
            ReportAction::Update(ReportPatch {
                id,
                status: Some(ReportStatus::Approved),
                ..ReportPatch::default()
            }),
            5,
        );
        assert_eq!(
            state.statistics,
            ReportStatistics {
                total: 1,
                pending: 0,
                approved: 1,
                rejected: 0,
            }
        );
        assert_eq!(state.list[0].updated_at, 5);
    }

    #[test]
    fn test_delete_recounts_and_clears_current() {
        let state = add(ReportState::initial(), "a", 1);
        let state = add(state, "b", 2);
        let doomed = state.list[0].clone();
        let state = reduce(state, ReportAction::SetCurrent(doomed.clone()), 3);

        let state = reduce(
            state,
            ReportAction::Delete(ReportIdPayload { id: doomed.id }),
            4,
        );
        assert_eq!(state.list.len(), 1);
        assert_eq!(state.statistics.total, 1);
        assert_eq!(state.statistics.pending, 1);
        assert_eq!(state.pagination.total, 1);
        assert!(state.current_report.is_none());
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let state = add(ReportState::initial(), "a", 1);
        let after = reduce(
            state.clone(),
            ReportAction::Delete(ReportIdPayload {
                id: "missing".to_string(),
            }),
            2,
        );
        assert_eq!(after, state);
    }

    #[test]
    fn test_ids_stay_unique_after_delete() {
        let state = add(ReportState::initial(), "a", 1_000);
        let state = add(state, "b", 1_000);
        let oldest = state.list[1].id.clone();
        let state = reduce(state, ReportAction::Delete(ReportIdPayload { id: oldest }), 1_000);
        let state = add(state, "c", 1_000);

        assert_eq!(state.list.len(), 2);
        assert_ne!(state.list[0].id, state.list[1].id);

        let newest = state.list[0].id.clone();
        let state = reduce(state, ReportAction::Delete(ReportIdPayload { id: newest }), 1_000);
        assert_eq!(state.list.len(), 1);
        assert_eq!(state.list[0].title, "b");
        assert_eq!(state.pagination.total, 1);
        assert_eq!(state.statistics.total, 1);
    }

    #[test]
    fn test_set_list_replaces_and_recounts() {
        let mut approved = ReportDraft::new("x").into_report(1, 0);
        approved.status = ReportStatus::Approved;
        let state = reduce(
            add(ReportState::initial(), "old", 1),
            ReportAction::SetList(ReportListPayload {
                reports: vec![approved],
                total: Some(40),
            }),
            2,
        );
        assert_eq!(state.list.len(), 1);
        assert_eq!(state.statistics.approved, 1);
        assert_eq!(state.statistics.pending, 0);
        assert_eq!(state.pagination.total, 40);
    }

    #[test]
    fn test_filters_reset_page() {
        let state = reduce(
            ReportState::initial(),
            ReportAction::SetPage(PagePayload {
                page: Some(3),
                limit: Some(0),
            }),
            0,
        );
        assert_eq!(state.pagination.page, 3);
        assert_eq!(state.pagination.limit, 1);

        let state = reduce(
            state,
            ReportAction::SetFilters(ReportFiltersPatch {
                status: Some(StatusFilter::Rejected),
                ..ReportFiltersPatch::default()
            }),
            0,
        );
        assert_eq!(state.pagination.page, 1);
        assert_eq!(state.filters.status, StatusFilter::Rejected);

        let state = reduce(state, ReportAction::ResetFilters, 0);
        assert_eq!(state.filters, ReportFilters::default());
    }
}
