//! Report filter model
//!
//! Filtering, sorting and pagination options for the report list.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;

use super::{Report, ReportStatus};

/// Status filter for the report list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Show all reports
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
}

impl StatusFilter {
    pub fn matches(&self, status: ReportStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == ReportStatus::Pending,
            StatusFilter::Approved => status == ReportStatus::Approved,
            StatusFilter::Rejected => status == ReportStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    Status,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportFilters {
    pub status: StatusFilter,
    /// Inclusive lower bound on the creation date (UTC)
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the creation date (UTC)
    pub date_to: Option<NaiveDate>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

/// Partial filter update; `None` keeps the current value
///
/// The date bounds take `Some(None)` to clear them. In JSON an absent key
/// keeps the bound and `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportFiltersPatch {
    pub status: Option<StatusFilter>,
    #[serde(
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_from: Option<Option<NaiveDate>>,
    #[serde(
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_to: Option<Option<NaiveDate>>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
}

/// Only called for keys that are present, so `null` becomes `Some(None)`
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ReportFilters {
    pub fn merge(&mut self, patch: &ReportFiltersPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(date_from) = patch.date_from {
            self.date_from = date_from;
        }
        if let Some(date_to) = patch.date_to {
            self.date_to = date_to;
        }
        if let Some(sort_by) = patch.sort_by {
            self.sort_by = sort_by;
        }
        if let Some(sort_order) = patch.sort_order {
            self.sort_order = sort_order;
        }
    }

    /// Check whether a report passes the status and date filters
    pub fn matches(&self, report: &Report) -> bool {
        if !self.status.matches(report.status) {
            return false;
        }
        if self.date_from.is_none() && self.date_to.is_none() {
            return true;
        }
        let Some(created) = DateTime::<Utc>::from_timestamp_millis(report.created_at) else {
            return false;
        };
        let created = created.date_naive();
        if self.date_from.is_some_and(|from| created < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| created > to) {
            return false;
        }
        true
    }

    fn compare(&self, a: &Report, b: &Report) -> Ordering {
        let ordering = match self.sort_by {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortField::Status => a.status.label().cmp(b.status.label()),
        };
        match self.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Filter and sort `reports`, returning references in display order
    pub fn apply<'a>(&self, reports: &'a [Report]) -> Vec<&'a Report> {
        let mut filtered: Vec<&Report> = reports.iter().filter(|r| self.matches(r)).collect();
        filtered.sort_by(|a, b| self.compare(a, b));
        filtered
    }
}

/// Start of `date` as epoch milliseconds (UTC)
pub fn start_of_day_ms(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}
