use crate::actions::ActionRecord;
use crate::state::StateTree;

pub mod logging;
pub mod sanitize;

pub use logging::LoggingMiddleware;
pub use sanitize::SanitizeMiddleware;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Middleware runs in registration order. Each one receives the record
/// produced by the previous one and returns the record the next stage
/// sees, so it can rewrite the action or its timestamp. Middleware cannot
/// stop an action; to drop one, rewrite it into an unrecognized action.
pub trait Middleware: Send {
    /// Handle an action
    ///
    /// - `record`: The action and its dispatch timestamp
    /// - `state`: Current application state (read-only snapshot)
    fn handle(&mut self, record: ActionRecord, state: &StateTree) -> ActionRecord;
}

impl<F> Middleware for F
where
    F: FnMut(ActionRecord, &StateTree) -> ActionRecord + Send,
{
    fn handle(&mut self, record: ActionRecord, state: &StateTree) -> ActionRecord {
        self(record, state)
    }
}
