use thiserror::Error;

use crate::goals::goals_model::GoalId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid goals payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Goal '{0}' not found")]
    NotFound(GoalId),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
