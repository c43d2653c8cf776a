use edututor_utils::loader::error::LoadingError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Loading(#[from] LoadingError),
    #[error("malformed question catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// A rejected session transition. The session is left unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("please select an option")]
    NoSelection,
    #[error("option {option} does not exist, choose between 1 and {options}")]
    InvalidOption { option: u8, options: usize },
    #[error("the quiz is already completed")]
    Completed,
    #[error("the quiz is still in progress")]
    InProgress,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("score {score} is outside of 0..={total}")]
    ScoreOutOfRange { score: u32, total: u32 },
    #[error("failed to store quiz result: {0}")]
    Storage(#[from] DbErr),
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("no quiz in progress")]
    NoSession,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Record(#[from] RecordError),
}
