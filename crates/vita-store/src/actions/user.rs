//! User actions

use serde::{Deserialize, Serialize};

use crate::state::{PreferencesPatch, UserProfile, UserStatistics};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UserAction {
    /// Replace the whole profile
    SetProfile(UserProfile),
    /// Overwrite only the fields that are set
    UpdateProfile(UserProfile),
    /// One supplement tablet taken now
    IncrementConsumption,
    SetConsumption(ConsumptionPayload),
    ResetConsumption,
    UpdateHemoglobin(HemoglobinPayload),
    SetStatistics(UserStatistics),
    UpdatePreferences(PreferencesPatch),
    SetLoading(bool),
    SetError(Option<String>),
}

/// Server-side consumption figures; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsumptionPayload {
    pub count: Option<u32>,
    pub target: Option<u32>,
    pub last_consumed: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HemoglobinPayload {
    /// g/dL
    pub value: f64,
    /// Defaults to the action timestamp
    pub measured_at: Option<i64>,
}

impl HemoglobinPayload {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            measured_at: None,
        }
    }
}
