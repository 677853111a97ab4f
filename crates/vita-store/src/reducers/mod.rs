//! Reducers
//!
//! One reducer per domain slice plus the root reducer that routes actions to
//! them. Domain reducers take their slice by value and return the next slice;
//! they never see action-type strings and never read the clock.

pub mod app_reducer;
pub mod auth_reducer;
pub mod notification_reducer;
pub mod report_reducer;
pub mod ui_reducer;
pub mod user_reducer;

use bitflags::bitflags;
use vita_config::StoreConfig;

use crate::state::SliceName;

/// Inputs a reducer may depend on besides the slice and the action
#[derive(Debug, Clone, PartialEq)]
pub struct ReduceContext {
    /// Timestamp of the action being reduced (epoch milliseconds)
    pub now: i64,
    /// Hemoglobin changes within this band count as stable
    pub hemoglobin_trend_deadband: f64,
    /// Maximum number of navigation breadcrumbs kept
    pub breadcrumb_limit: usize,
}

impl ReduceContext {
    pub fn new(now: i64, config: &StoreConfig) -> Self {
        Self {
            now,
            hemoglobin_trend_deadband: config.hemoglobin_trend_deadband,
            breadcrumb_limit: config.breadcrumb_limit,
        }
    }

    /// Context with default tunables, for reducing outside a store
    pub fn at(now: i64) -> Self {
        Self::new(now, &StoreConfig::default())
    }
}

bitflags! {
    /// Slices whose value changed while reducing one action
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ChangeSet: u8 {
        const AUTH = 1 << 0;
        const USER = 1 << 1;
        const REPORTS = 1 << 2;
        const NOTIFICATIONS = 1 << 3;
        const UI = 1 << 4;
    }
}

impl ChangeSet {
    pub fn slice(name: SliceName) -> Self {
        match name {
            SliceName::Auth => ChangeSet::AUTH,
            SliceName::User => ChangeSet::USER,
            SliceName::Reports => ChangeSet::REPORTS,
            SliceName::Notifications => ChangeSet::NOTIFICATIONS,
            SliceName::Ui => ChangeSet::UI,
        }
    }

    pub fn touches(&self, name: SliceName) -> bool {
        self.contains(Self::slice(name))
    }
}
