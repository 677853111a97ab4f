//! Auth State

use serde::{Deserialize, Serialize};

/// Authentication session
///
/// `is_logged_in` implies both `token` and `token_expiry` are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthState {
    pub is_logged_in: bool,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    /// Epoch milliseconds
    pub token_expiry: Option<i64>,
    pub session_id: Option<String>,
    /// Epoch milliseconds
    pub last_login: Option<i64>,
    pub remember_me: bool,
}

impl AuthState {
    /// Logged-out state
    pub fn initial() -> Self {
        Self::default()
    }

    /// Logged in with a token that has not expired at `now`
    pub fn is_authenticated(&self, now: i64) -> bool {
        self.is_logged_in
            && self.token.is_some()
            && self.token_expiry.is_some_and(|expiry| now < expiry)
    }

    /// Milliseconds until the token expires, `None` when logged out
    pub fn time_until_expiry(&self, now: i64) -> Option<i64> {
        if !self.is_logged_in {
            return None;
        }
        self.token_expiry.map(|expiry| (expiry - now).max(0))
    }

    /// Token is still valid but expires within `threshold_ms`
    pub fn needs_refresh(&self, now: i64, threshold_ms: i64) -> bool {
        self.is_authenticated(now)
            && self
                .time_until_expiry(now)
                .is_some_and(|remaining| remaining <= threshold_ms)
    }
}
