//! Report actions

use serde::{Deserialize, Serialize};

use crate::domain_models::{Report, ReportDraft, ReportFiltersPatch, ReportPatch};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ReportAction {
    /// Replace the list with a fetched page
    SetList(ReportListPayload),
    /// Submit a new report (prepended, always pending)
    Add(ReportDraft),
    Update(ReportPatch),
    Delete(ReportIdPayload),
    SetCurrent(Report),
    ClearCurrent,
    /// Merge filters and jump back to the first page
    SetFilters(ReportFiltersPatch),
    ResetFilters,
    SetPage(PagePayload),
    SetLoading(bool),
    SetError(Option<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportListPayload {
    pub reports: Vec<Report>,
    /// Backend total; defaults to the number of reports given
    pub total: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportIdPayload {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PagePayload {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}
