use thiserror::Error;

use crate::models::TaskId;

/// A required task field is missing or unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a task description")]
    EmptyText,
    #[error("Please select a deadline")]
    MissingDeadline,
    #[error("Invalid deadline '{0}' (use YYYY-MM-DD, today, tomorrow or +N)")]
    InvalidDeadline(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("task not found: {0}")]
    NotFound(TaskId),
}
