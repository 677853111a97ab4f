//! User Reducer
//!
//! Handles profile, supplement consumption and hemoglobin updates.

use chrono::{DateTime, NaiveDate, Utc};

use crate::actions::UserAction;
use crate::domain_models::{HemoglobinReading, Trend, HEMOGLOBIN_HISTORY_LIMIT};
use crate::reducers::ReduceContext;
use crate::state::{UserState, UserStatistics};

/// Reducer for user state.
pub fn reduce_user(mut state: UserState, action: &UserAction, ctx: &ReduceContext) -> UserState {
    match action {
        UserAction::SetProfile(profile) => {
            state.profile = profile.clone();
        }
        UserAction::UpdateProfile(patch) => {
            state.profile.merge(patch);
        }
        UserAction::IncrementConsumption => {
            let previous = state.vitamin_consumption.last_consumed;
            let consumption = &mut state.vitamin_consumption;
            consumption.count = consumption.count.saturating_add(1);
            consumption.recompute_percentage();
            consumption.last_consumed = Some(ctx.now);

            record_consumption(&mut state.statistics, previous, ctx.now);
            log::debug!(
                "Consumption {}/{} ({}%)",
                consumption.count,
                consumption.target,
                consumption.percentage
            );
        }
        UserAction::SetConsumption(payload) => {
            let consumption = &mut state.vitamin_consumption;
            if let Some(count) = payload.count {
                consumption.count = count;
            }
            if let Some(target) = payload.target {
                consumption.target = target;
            }
            if payload.last_consumed.is_some() {
                consumption.last_consumed = payload.last_consumed;
            }
            consumption.recompute_percentage();
        }
        UserAction::ResetConsumption => {
            state.vitamin_consumption.count = 0;
            state.vitamin_consumption.last_consumed = None;
            state.vitamin_consumption.recompute_percentage();
            state.statistics.current_streak = 0;
        }
        UserAction::UpdateHemoglobin(payload) => {
            if !payload.value.is_finite() || payload.value <= 0.0 {
                log::warn!("Ignoring hemoglobin value {}", payload.value);
                return state;
            }
            let measured_at = payload.measured_at.unwrap_or(ctx.now);
            let hemoglobin = &mut state.hemoglobin;
            hemoglobin.previous = hemoglobin.current;
            hemoglobin.current = Some(payload.value);
            hemoglobin.trend = Trend::between(
                hemoglobin.previous,
                payload.value,
                ctx.hemoglobin_trend_deadband,
            );
            hemoglobin.history.push(HemoglobinReading {
                value: payload.value,
                measured_at,
            });
            if hemoglobin.history.len() > HEMOGLOBIN_HISTORY_LIMIT {
                let excess = hemoglobin.history.len() - HEMOGLOBIN_HISTORY_LIMIT;
                hemoglobin.history.drain(..excess);
            }
            hemoglobin.last_measured = Some(measured_at);
        }
        UserAction::SetStatistics(statistics) => {
            state.statistics = statistics.clone();
        }
        UserAction::UpdatePreferences(patch) => {
            state.preferences.merge(patch);
        }
        UserAction::SetLoading(loading) => {
            state.loading = *loading;
        }
        UserAction::SetError(error) => {
            state.error.clone_from(error);
            state.loading = false;
        }
    }
    state
}

fn utc_day(ms: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.date_naive())
}

/// Update totals and the daily streak for a consumption at `now`
fn record_consumption(stats: &mut UserStatistics, previous: Option<i64>, now: i64) {
    stats.total_consumed = stats.total_consumed.saturating_add(1);

    let today = utc_day(now);
    let last_day = previous.and_then(utc_day);
    stats.current_streak = match (last_day, today) {
        (Some(last), Some(today)) if last == today => stats.current_streak.max(1),
        (Some(last), Some(today)) if last.succ_opt() == Some(today) => {
            stats.current_streak.saturating_add(1)
        }
        _ => 1,
    };
    stats.longest_streak = stats.longest_streak.max(stats.current_streak);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ConsumptionPayload, HemoglobinPayload};
    use crate::state::UserProfile;
    use proptest::prelude::*;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    fn reduce(state: UserState, action: UserAction, now: i64) -> UserState {
        reduce_user(state, &action, &ReduceContext::at(now))
    }

    fn hb(state: UserState, value: f64, now: i64) -> UserState {
        reduce(
            state,
            UserAction::UpdateHemoglobin(HemoglobinPayload::new(value)),
            now,
        )
    }

    #[test]
    fn test_increment_from_initial() {
        let state = reduce(UserState::initial(), UserAction::IncrementConsumption, 100);
        assert_eq!(state.vitamin_consumption.count, 1);
        assert_eq!(state.vitamin_consumption.percentage, 2);
        assert_eq!(state.vitamin_consumption.last_consumed, Some(100));
        assert_eq!(state.statistics.total_consumed, 1);
        assert_eq!(state.statistics.current_streak, 1);
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        let mut state = UserState::initial();
        state = reduce(state, UserAction::IncrementConsumption, 0);
        state = reduce(state, UserAction::IncrementConsumption, DAY_MS / 2);
        assert_eq!(state.statistics.current_streak, 1);
        state = reduce(state, UserAction::IncrementConsumption, DAY_MS);
        state = reduce(state, UserAction::IncrementConsumption, 2 * DAY_MS);
        assert_eq!(state.statistics.current_streak, 3);

        // Skipping a day restarts the streak but keeps the record
        state = reduce(state, UserAction::IncrementConsumption, 4 * DAY_MS);
        assert_eq!(state.statistics.current_streak, 1);
        assert_eq!(state.statistics.longest_streak, 3);
        assert_eq!(state.statistics.total_consumed, 5);
    }

    #[test]
    fn test_set_consumption_recomputes_percentage() {
        let state = reduce(
            UserState::initial(),
            UserAction::SetConsumption(ConsumptionPayload {
                count: Some(12),
                target: Some(24),
                last_consumed: None,
            }),
            0,
        );
        assert_eq!(state.vitamin_consumption.percentage, 50);

        let state = reduce(state, UserAction::ResetConsumption, 0);
        assert_eq!(state.vitamin_consumption.count, 0);
        assert_eq!(state.vitamin_consumption.target, 24);
        assert_eq!(state.vitamin_consumption.percentage, 0);
    }

    #[test]
    fn test_hemoglobin_trend_and_previous() {
        let state = hb(UserState::initial(), 11.0, 1);
        assert_eq!(state.hemoglobin.trend, Trend::Stable);
        assert_eq!(state.hemoglobin.previous, None);

        let state = hb(state, 12.0, 2);
        assert_eq!(state.hemoglobin.previous, Some(11.0));
        assert_eq!(state.hemoglobin.current, Some(12.0));
        assert_eq!(state.hemoglobin.trend, Trend::Up);
        assert_eq!(state.hemoglobin.last_measured, Some(2));

        // Within the default 0.2 deadband
        let state = hb(state, 11.9, 3);
        assert_eq!(state.hemoglobin.trend, Trend::Stable);

        let state = hb(state, 10.0, 4);
        assert_eq!(state.hemoglobin.trend, Trend::Down);
    }

    #[test]
    fn test_zero_deadband_compares_strictly() {
        let ctx = ReduceContext {
            hemoglobin_trend_deadband: 0.0,
            ..ReduceContext::at(0)
        };
        let state = reduce_user(
            UserState::initial(),
            &UserAction::UpdateHemoglobin(HemoglobinPayload::new(12.0)),
            &ctx,
        );
        let state = reduce_user(
            state,
            &UserAction::UpdateHemoglobin(HemoglobinPayload::new(12.1)),
            &ctx,
        );
        assert_eq!(state.hemoglobin.trend, Trend::Up);
    }

    #[test]
    fn test_hemoglobin_history_keeps_last_ten() {
        let mut state = UserState::initial();
        for i in 0..15 {
            state = hb(state, 10.0 + f64::from(i) * 0.1, i64::from(i));
        }
        let history = &state.hemoglobin.history;
        assert_eq!(history.len(), HEMOGLOBIN_HISTORY_LIMIT);
        assert_eq!(history.first().unwrap().measured_at, 5);
        assert_eq!(history.last().unwrap().measured_at, 14);
        assert_eq!(state.hemoglobin.latest_reading().unwrap().measured_at, 14);
    }

    #[test]
    fn test_invalid_hemoglobin_is_ignored() {
        let before = hb(UserState::initial(), 12.0, 1);
        let after = hb(before.clone(), f64::NAN, 2);
        assert_eq!(after.hemoglobin.history, before.hemoglobin.history);
        let after = hb(before.clone(), -3.0, 2);
        assert_eq!(after.hemoglobin.current, Some(12.0));
    }

    #[test]
    fn test_update_profile_merges() {
        let state = reduce(
            UserState::initial(),
            UserAction::SetProfile(UserProfile {
                name: Some("Ayu".to_string()),
                email: Some("ayu@example.com".to_string()),
                ..UserProfile::default()
            }),
            0,
        );
        let state = reduce(
            state,
            UserAction::UpdateProfile(UserProfile {
                email: Some("ayu@sekolah.id".to_string()),
                ..UserProfile::default()
            }),
            0,
        );
        assert_eq!(state.profile.name.as_deref(), Some("Ayu"));
        assert_eq!(state.profile.email.as_deref(), Some("ayu@sekolah.id"));
    }

    #[test]
    fn test_set_error_stops_loading() {
        let state = reduce(UserState::initial(), UserAction::SetLoading(true), 0);
        assert!(state.loading);
        let state = reduce(state, UserAction::SetError(Some("offline".to_string())), 0);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("offline"));
    }

    proptest! {
        #[test]
        fn increment_keeps_percentage_rounded(count in 0u32..10_000, target in 1u32..10_000) {
            let state = reduce(
                UserState::initial(),
                UserAction::SetConsumption(ConsumptionPayload {
                    count: Some(count),
                    target: Some(target),
                    last_consumed: None,
                }),
                0,
            );
            let state = reduce(state, UserAction::IncrementConsumption, 1);

            let consumption = &state.vitamin_consumption;
            let expected = (f64::from(count + 1) / f64::from(target) * 100.0).round() as u32;
            prop_assert_eq!(consumption.count, count + 1);
            prop_assert_eq!(consumption.target, target);
            prop_assert_eq!(consumption.percentage, expected);
            prop_assert_eq!(consumption.remaining(), target.saturating_sub(count + 1));
        }
    }
}
