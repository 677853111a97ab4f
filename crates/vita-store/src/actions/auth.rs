//! Auth actions

use serde::{Deserialize, Serialize};

/// Token lifetime applied when a login payload omits `expiresIn`
pub const DEFAULT_TOKEN_TTL_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AuthAction {
    /// Successful sign-in
    Login(LoginPayload),
    /// Sign out; also clears the user's private data
    Logout,
    /// New access token issued for the current session
    RefreshToken(RefreshPayload),
    SetRememberMe(bool),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginPayload {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    /// Token lifetime in milliseconds from the login time
    pub expires_in: Option<i64>,
    pub session_id: Option<String>,
    pub remember_me: bool,
}

impl LoginPayload {
    pub fn new(token: impl Into<String>, expires_in: i64) -> Self {
        Self {
            token: Some(token.into()),
            expires_in: Some(expires_in),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RefreshPayload {
    pub token: Option<String>,
    /// Keeps the existing refresh token when absent
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}
