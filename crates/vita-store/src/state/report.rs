//! Report State

use serde::{Deserialize, Serialize};

use crate::domain_models::{Report, ReportFilters, ReportStatus};

pub const DEFAULT_PAGE_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportState {
    /// Newest first on insert
    pub list: Vec<Report>,
    pub current_report: Option<Report>,
    pub filters: ReportFilters,
    pub pagination: Pagination,
    pub statistics: ReportStatistics,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based
    pub page: usize,
    pub limit: usize,
    /// Total number of reports known to the backend
    pub total: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            total: 0,
        }
    }
}

/// Report counts by status, always derived from the list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportStatistics {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl ReportStatistics {
    pub fn from_reports(reports: &[Report]) -> Self {
        reports.iter().fold(
            Self {
                total: reports.len(),
                ..Self::default()
            },
            |mut stats, report| {
                match report.status {
                    ReportStatus::Pending => stats.pending += 1,
                    ReportStatus::Approved => stats.approved += 1,
                    ReportStatus::Rejected => stats.rejected += 1,
                }
                stats
            },
        )
    }
}

/// One page of the filtered report list
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPage<'a> {
    pub items: Vec<&'a Report>,
    pub page: usize,
    pub limit: usize,
    /// Number of reports passing the current filters
    pub total_filtered: usize,
    pub total_pages: usize,
}

impl ReportPage<'_> {
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

impl ReportState {
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn find(&self, id: &str) -> Option<&Report> {
        self.list.iter().find(|r| r.id == id)
    }

    /// Reports passing the current filters, in the configured sort order
    pub fn filtered(&self) -> Vec<&Report> {
        self.filters.apply(&self.list)
    }

    /// Current page of the filtered list
    pub fn paginated(&self) -> ReportPage<'_> {
        self.page(self.pagination.page, self.pagination.limit)
    }

    /// Page `page` (1-based) of the filtered list with `limit` items per page
    pub fn page(&self, page: usize, limit: usize) -> ReportPage<'_> {
        let filtered = self.filtered();
        let total_filtered = filtered.len();
        let page = page.max(1);
        let limit = limit.max(1);
        let start = (page - 1).saturating_mul(limit).min(total_filtered);
        let end = page.saturating_mul(limit).min(total_filtered);

        ReportPage {
            items: filtered[start..end].to_vec(),
            page,
            limit,
            total_filtered,
            total_pages: total_filtered.div_ceil(limit),
        }
    }

    /// Recount statistics from the list
    pub fn refresh_statistics(&mut self) {
        self.statistics = ReportStatistics::from_reports(&self.list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_models::ReportDraft;

    fn state_with(n: usize) -> ReportState {
        let mut state = ReportState::initial();
        state.list = (0..n)
            .map(|i| ReportDraft::new(format!("r{i}")).into_report(i as i64 * 1_000, i))
            .collect();
        state.refresh_statistics();
        state
    }

    #[test]
    fn test_pagination_slices_filtered_list() {
        let state = state_with(25);

        let first = state.page(1, 10);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total_filtered, 25);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_more());
        // Default sort is newest first
        assert_eq!(first.items[0].title, "r24");

        let last = state.page(3, 10);
        assert_eq!(last.items.len(), 5);
        assert!(!last.has_more());

        let beyond = state.page(9, 10);
        assert!(beyond.items.is_empty());
    }

    #[test]
    fn test_statistics_from_list() {
        let mut state = state_with(3);
        state.list[0].status = ReportStatus::Approved;
        state.list[1].status = ReportStatus::Rejected;
        state.refresh_statistics();
        assert_eq!(
            state.statistics,
            ReportStatistics {
                total: 3,
                pending: 1,
                approved: 1,
                rejected: 1,
            }
        );
    }
}
