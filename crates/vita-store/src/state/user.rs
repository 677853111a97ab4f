//! User State

use serde::{Deserialize, Serialize};

use crate::domain_models::{HemoglobinReading, HemoglobinStatus, Trend};

/// Default number of supplement tablets in a program
pub const DEFAULT_CONSUMPTION_TARGET: u32 = 48;

/// User profile, consumption progress and hemoglobin monitoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserState {
    pub profile: UserProfile,
    pub vitamin_consumption: VitaminConsumption,
    pub hemoglobin: HemoglobinState,
    pub statistics: UserStatistics,
    pub preferences: UserPreferences,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// ISO date, e.g. `2009-04-17`
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub school: Option<String>,
    pub class_name: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Overwrite every field that is set in `patch`
    pub fn merge(&mut self, patch: &UserProfile) {
        fn take<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
        take(&mut self.id, &patch.id);
        take(&mut self.name, &patch.name);
        take(&mut self.email, &patch.email);
        take(&mut self.phone, &patch.phone);
        take(&mut self.date_of_birth, &patch.date_of_birth);
        take(&mut self.gender, &patch.gender);
        take(&mut self.school, &patch.school);
        take(&mut self.class_name, &patch.class_name);
        take(&mut self.height_cm, &patch.height_cm);
        take(&mut self.weight_kg, &patch.weight_kg);
        take(&mut self.avatar_url, &patch.avatar_url);
    }
}

/// Supplement consumption progress
///
/// `percentage` is always `round(count / target * 100)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VitaminConsumption {
    pub count: u32,
    pub target: u32,
    pub percentage: u32,
    /// Epoch milliseconds
    pub last_consumed: Option<i64>,
}

impl Default for VitaminConsumption {
    fn default() -> Self {
        Self {
            count: 0,
            target: DEFAULT_CONSUMPTION_TARGET,
            percentage: 0,
            last_consumed: None,
        }
    }
}

impl VitaminConsumption {
    /// Progress percentage, rounded half up; zero when there is no target
    pub fn percentage_of(count: u32, target: u32) -> u32 {
        if target == 0 {
            return 0;
        }
        (f64::from(count) / f64::from(target) * 100.0).round() as u32
    }

    pub fn recompute_percentage(&mut self) {
        self.percentage = Self::percentage_of(self.count, self.target);
    }

    pub fn remaining(&self) -> u32 {
        self.target.saturating_sub(self.count)
    }

    pub fn is_target_reached(&self) -> bool {
        self.target > 0 && self.count >= self.target
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HemoglobinState {
    pub current: Option<f64>,
    pub previous: Option<f64>,
    pub trend: Trend,
    /// Oldest first, at most `HEMOGLOBIN_HISTORY_LIMIT` entries
    pub history: Vec<HemoglobinReading>,
    /// Epoch milliseconds
    pub last_measured: Option<i64>,
}

impl HemoglobinState {
    pub fn latest_reading(&self) -> Option<&HemoglobinReading> {
        self.history.last()
    }

    pub fn status(&self) -> HemoglobinStatus {
        HemoglobinStatus::classify(self.current)
    }

    /// Trend of the current value against the previous one under `deadband`
    pub fn trend_with(&self, deadband: f64) -> Trend {
        match self.current {
            Some(current) => Trend::between(self.previous, current, deadband),
            None => Trend::Stable,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserStatistics {
    pub total_consumed: u32,
    /// Consecutive calendar days (UTC) with at least one consumption
    pub current_streak: u32,
    pub longest_streak: u32,
    pub reports_submitted: u32,
    /// Epoch milliseconds
    pub last_report_at: Option<i64>,
}

/// Measurement system for height, weight and hemoglobin display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// cm, kg and g/dL
    #[default]
    Metric,
    Imperial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPreferences {
    pub reminders_enabled: bool,
    /// Local time of the daily reminder, `HH:MM`
    pub reminder_time: String,
    pub units: Units,
    pub share_data: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            reminders_enabled: true,
            reminder_time: "07:00".to_string(),
            units: Units::Metric,
            share_data: false,
        }
    }
}

/// Partial preferences update; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreferencesPatch {
    pub reminders_enabled: Option<bool>,
    pub reminder_time: Option<String>,
    pub units: Option<Units>,
    pub share_data: Option<bool>,
}

impl UserPreferences {
    pub fn merge(&mut self, patch: &PreferencesPatch) {
        if let Some(enabled) = patch.reminders_enabled {
            self.reminders_enabled = enabled;
        }
        if let Some(time) = &patch.reminder_time {
            self.reminder_time.clone_from(time);
        }
        if let Some(units) = patch.units {
            self.units = units;
        }
        if let Some(share) = patch.share_data {
            self.share_data = share;
        }
    }
}

impl UserState {
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn remaining_consumption(&self) -> u32 {
        self.vitamin_consumption.remaining()
    }

    pub fn is_target_reached(&self) -> bool {
        self.vitamin_consumption.is_target_reached()
    }

    pub fn latest_reading(&self) -> Option<&HemoglobinReading> {
        self.hemoglobin.latest_reading()
    }

    pub fn hemoglobin_status(&self) -> HemoglobinStatus {
        self.hemoglobin.status()
    }
}
