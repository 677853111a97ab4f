//! Domain models shared by state, actions and reducers

mod hemoglobin;
mod notification;
mod report;
mod report_filter;

pub use hemoglobin::{
    HemoglobinReading, HemoglobinStatus, Trend, HEMOGLOBIN_HISTORY_LIMIT,
    LOW_HEMOGLOBIN_THRESHOLD,
};
pub use notification::{Notification, NotificationDraft, NotificationFilters, NotificationKind};
pub use report::{Report, ReportDraft, ReportPatch, ReportStatus};
pub use report_filter::{
    start_of_day_ms, ReportFilters, ReportFiltersPatch, SortField, SortOrder, StatusFilter,
};

/// First sequence at or after `start` for which `taken` is false
///
/// Generated ids embed the list length, which shrinks again after a delete,
/// so a fresh id has to be checked against the ids still in the list.
pub(crate) fn free_sequence(start: usize, taken: impl Fn(usize) -> bool) -> usize {
    (start..).find(|&sequence| !taken(sequence)).unwrap_or(start)
}
