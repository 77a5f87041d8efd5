//! States of the reservation workflow.

use serde::Serialize;

use crate::domain::foundation::StateMachine;

/// Steps a visitor's reservation passes through between the empty form and
/// the summary page.
///
/// ```text
/// Start -> Submitted -> Rejected -> Start
///                    -> Staged   -> Confirmed
///                                -> Lost
///                                -> Submitted (resubmitted form)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// Empty form shown.
    Start,
    /// Form posted, rules not yet applied.
    Submitted,
    /// At least one rule failed; the form is shown again.
    Rejected,
    /// Reservation held in the session.
    Staged,
    /// Staged reservation read back and handed to the repository.
    Confirmed,
    /// Staged reservation could not be read back.
    Lost,
}

impl StateMachine for WorkflowState {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use WorkflowState::*;
        match self {
            Start => vec![Submitted],
            Submitted => vec![Rejected, Staged],
            Rejected => vec![Start],
            Staged => vec![Confirmed, Lost, Submitted],
            Confirmed | Lost => vec![],
        }
    }
}
