//! App-wide actions

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AppAction {
    /// Replace every slice with its initial state
    Reset,
    /// Clear the `error` field of every slice that has one
    ClearErrors,
}
