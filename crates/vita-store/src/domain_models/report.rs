//! Consumption report model
//!
//! A report is a user submission (e.g. photo proof of a taken supplement)
//! that staff review and approve or reject.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReportStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Approved => "approved",
            ReportStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub image_urls: Vec<String>,
    /// Epoch milliseconds
    pub created_at: i64,
    /// Epoch milliseconds
    pub updated_at: i64,
}

/// Payload for submitting a new report
///
/// New reports always start out `Pending`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportDraft {
    /// Caller-assigned id; generated from the action timestamp when absent
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub image_urls: Vec<String>,
    /// Defaults to the action timestamp
    pub created_at: Option<i64>,
}

impl ReportDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Id given to a draft without one
    pub fn generated_id(now: i64, sequence: usize) -> String {
        format!("report-{now}-{sequence}")
    }

    /// Build the report, filling id and timestamps from `now`.
    ///
    /// `sequence` disambiguates ids generated within the same millisecond.
    pub fn into_report(self, now: i64, sequence: usize) -> Report {
        let created_at = self.created_at.unwrap_or(now);
        Report {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Self::generated_id(now, sequence)),
            title: self.title,
            description: self.description,
            status: ReportStatus::Pending,
            category: self.category,
            image_urls: self.image_urls,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Partial update for an existing report, matched by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportPatch {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ReportStatus>,
    pub category: Option<String>,
    pub image_urls: Option<Vec<String>>,
}

impl ReportPatch {
    /// Apply the patch, stamping `updated_at`
    pub fn apply_to(&self, report: &mut Report, now: i64) {
        if let Some(title) = &self.title {
            report.title = title.clone();
        }
        if let Some(description) = &self.description {
            report.description = description.clone();
        }
        if let Some(status) = self.status {
            report.status = status;
        }
        if let Some(category) = &self.category {
            report.category = Some(category.clone());
        }
        if let Some(image_urls) = &self.image_urls {
            report.image_urls = image_urls.clone();
        }
        report.updated_at = now;
    }
}
