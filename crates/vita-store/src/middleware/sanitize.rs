//! SanitizeMiddleware - normalizes user-entered text before it is stored

use super::Middleware;
use crate::actions::{Action, ActionRecord, NotificationAction, ReportAction};
use crate::state::StateTree;

/// Trims surrounding whitespace from report and notification text
#[derive(Debug, Default)]
pub struct SanitizeMiddleware;

impl SanitizeMiddleware {
    pub fn new() -> Self {
        Self
    }
}

fn trim_in_place(text: &mut String) {
    let trimmed = text.trim();
    if trimmed.len() != text.len() {
        *text = trimmed.to_string();
    }
}

impl Middleware for SanitizeMiddleware {
    fn handle(&mut self, mut record: ActionRecord, _state: &StateTree) -> ActionRecord {
        match &mut record.action {
            Action::Report(ReportAction::Add(draft)) => {
                trim_in_place(&mut draft.title);
                trim_in_place(&mut draft.description);
            }
            Action::Report(ReportAction::Update(patch)) => {
                if let Some(title) = patch.title.as_mut() {
                    trim_in_place(title);
                }
                if let Some(description) = patch.description.as_mut() {
                    trim_in_place(description);
                }
            }
            Action::Notification(NotificationAction::Add(draft)) => {
                trim_in_place(&mut draft.title);
                trim_in_place(&mut draft.message);
            }
            _ => {}
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_models::ReportDraft;

    #[test]
    fn test_trims_report_draft() {
        let mut middleware = SanitizeMiddleware::new();
        let draft = ReportDraft::new("  Minum TTD  ").with_description("\tsudah\n");
        let record = ActionRecord::new(ReportAction::Add(draft), 0);

        let out = middleware.handle(record, &StateTree::initial());

        let Action::Report(ReportAction::Add(draft)) = out.action else {
            panic!("action kind changed");
        };
        assert_eq!(draft.title, "Minum TTD");
        assert_eq!(draft.description, "sudah");
    }

    #[test]
    fn test_other_actions_untouched() {
        let mut middleware = SanitizeMiddleware::new();
        let record = ActionRecord::new(crate::actions::UserAction::IncrementConsumption, 7);
        assert_eq!(middleware.handle(record.clone(), &StateTree::initial()), record);
    }
}
