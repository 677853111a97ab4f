//! Auth Reducer

use crate::actions::{AuthAction, DEFAULT_TOKEN_TTL_MS};
use crate::reducers::ReduceContext;
use crate::state::AuthState;

/// Reducer for auth state.
///
/// Logout only resets this slice; clearing the other private slices is the
/// root reducer's job.
pub fn reduce_auth(mut state: AuthState, action: &AuthAction, ctx: &ReduceContext) -> AuthState {
    match action {
        AuthAction::Login(payload) => {
            let Some(token) = payload.token.clone().filter(|t| !t.is_empty()) else {
                log::warn!("Login without a token, staying logged out");
                return AuthState {
                    remember_me: payload.remember_me,
                    ..AuthState::initial()
                };
            };
            let ttl = payload.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_MS);
            state = AuthState {
                is_logged_in: true,
                token: Some(token),
                refresh_token: payload.refresh_token.clone(),
                token_expiry: Some(ctx.now.saturating_add(ttl)),
                session_id: Some(
                    payload
                        .session_id
                        .clone()
                        .unwrap_or_else(|| format!("session-{}", ctx.now)),
                ),
                last_login: Some(ctx.now),
                remember_me: payload.remember_me,
            };
            log::info!("Logged in, session {:?}", state.session_id);
        }
        AuthAction::Logout => {
            state = AuthState::initial();
        }
        AuthAction::RefreshToken(payload) => {
            if !state.is_logged_in {
                log::warn!("Token refresh while logged out, ignoring");
                return state;
            }
            let Some(token) = payload.token.clone().filter(|t| !t.is_empty()) else {
                log::warn!("Token refresh without a token, ignoring");
                return state;
            };
            let ttl = payload.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_MS);
            state.token = Some(token);
            state.token_expiry = Some(ctx.now.saturating_add(ttl));
            if payload.refresh_token.is_some() {
                state.refresh_token.clone_from(&payload.refresh_token);
            }
        }
        AuthAction::SetRememberMe(remember) => {
            state.remember_me = *remember;
        }
    }
    state
}
