use axum::response::{IntoResponse, Response};
use edututor_core::quiz::error::{QuizError as CoreQuizError, RecordError, SessionError};
use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum QuizError {
    #[error("no questions found")]
    NoQuestions,

    #[error("the number of questions has to be positive")]
    InvalidCount,

    #[error(transparent)]
    SeaOrmError(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Core(#[from] CoreQuizError),
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        match self {
            QuizError::NoQuestions => (StatusCode::NOT_FOUND, "no questions found").into_response(),
            QuizError::InvalidCount => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()).into_response(),
            QuizError::SeaOrmError(e) => {
                (StatusCode::SERVICE_UNAVAILABLE, format!("Database error: {e}")).into_response()
            }
            QuizError::Core(CoreQuizError::NoSession) => {
                (StatusCode::NOT_FOUND, "no quiz in progress").into_response()
            }
            QuizError::Core(CoreQuizError::Session(e @ (SessionError::NoSelection | SessionError::InvalidOption { .. }))) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
            }
            QuizError::Core(CoreQuizError::Session(e @ (SessionError::Completed | SessionError::InProgress))) => {
                (StatusCode::CONFLICT, e.to_string()).into_response()
            }
            QuizError::Core(CoreQuizError::Record(e @ RecordError::Storage(_))) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("The quiz is completed but its result could not be saved, please retry: {e}"),
            )
                .into_response(),
            QuizError::Core(CoreQuizError::Record(e @ RecordError::ScoreOutOfRange { .. })) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Quiz error: {e}")).into_response()
            }
        }
    }
}
