//! Hemoglobin model
//!
//! Readings, trend classification and anemia status.

use serde::{Deserialize, Serialize};

/// Hemoglobin below this value (g/dL) is considered low
pub const LOW_HEMOGLOBIN_THRESHOLD: f64 = 12.0;

/// Number of readings kept in the hemoglobin history
pub const HEMOGLOBIN_HISTORY_LIMIT: usize = 10;

/// A single hemoglobin measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HemoglobinReading {
    /// Value in g/dL
    pub value: f64,
    /// Epoch milliseconds
    pub measured_at: i64,
}

/// Direction of change between two consecutive readings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

impl Trend {
    /// Classify the change from `previous` to `current`.
    ///
    /// Changes whose magnitude does not exceed `deadband` are `Stable`; a
    /// deadband of zero compares strictly. Without a previous reading the
    /// trend is `Stable`.
    pub fn between(previous: Option<f64>, current: f64, deadband: f64) -> Self {
        let Some(previous) = previous else {
            return Trend::Stable;
        };
        let deadband = deadband.max(0.0);
        let delta = current - previous;
        if delta > deadband {
            Trend::Up
        } else if delta < -deadband {
            Trend::Down
        } else {
            Trend::Stable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }
}

/// Anemia screening status for a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HemoglobinStatus {
    Low,
    Normal,
    Unknown,
}

impl HemoglobinStatus {
    pub fn classify(value: Option<f64>) -> Self {
        match value {
            Some(v) if v < LOW_HEMOGLOBIN_THRESHOLD => HemoglobinStatus::Low,
            Some(_) => HemoglobinStatus::Normal,
            None => HemoglobinStatus::Unknown,
        }
    }
}
