//! Workflow error types.

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::ports::{RepoError, SessionStoreError};

/// Failures the workflow cannot turn into a visitor-facing outcome.
///
/// Validation failures and lost session state never appear here; they are
/// outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("Storage failure: {0}")]
    Storage(#[from] RepoError),

    #[error("Session failure: {0}")]
    Session(#[from] SessionStoreError),

    #[error("Invalid workflow transition: {0}")]
    Transition(#[from] ValidationError),
}

impl WorkflowError {
    pub fn code(&self) -> ErrorCode {
        match self {
            WorkflowError::Storage(e) => e.code(),
            WorkflowError::Session(e) => e.code(),
            WorkflowError::Transition(_) => ErrorCode::InvalidStateTransition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_follows_the_wrapped_error() {
        let err: WorkflowError = RepoError::database("search", "boom").into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);

        let err: WorkflowError = SessionStoreError::Unavailable("down".into()).into();
        assert_eq!(err.code(), ErrorCode::SessionStoreError);
    }
}
