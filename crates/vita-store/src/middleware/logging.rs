//! LoggingMiddleware - logs all actions for debugging

use super::Middleware;
use crate::actions::ActionRecord;
use crate::state::StateTree;

/// LoggingMiddleware - logs every action that passes through the store
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for LoggingMiddleware {
    fn handle(&mut self, record: ActionRecord, _state: &StateTree) -> ActionRecord {
        log::debug!("Action @{}: {:?}", record.timestamp, record.action);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::UserAction;

    #[test]
    fn test_logging_middleware_passes_through() {
        let mut middleware = LoggingMiddleware::new();
        let record = ActionRecord::new(UserAction::IncrementConsumption, 42);

        let out = middleware.handle(record.clone(), &StateTree::initial());

        assert_eq!(out, record);
    }
}
