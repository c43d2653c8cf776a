use axum::response::{IntoResponse, Response};
use edututor_core::assistant::AssistantError as CoreAssistantError;
use edututor_core::document::DocumentError;
use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum AssistantError {
    #[error(transparent)]
    Assistant(#[from] CoreAssistantError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

fn assistant_response(error: &CoreAssistantError) -> Response {
    match error {
        CoreAssistantError::EmptyQuestion => (StatusCode::UNPROCESSABLE_ENTITY, error.to_string()).into_response(),
        CoreAssistantError::OpenAi(_) => {
            (StatusCode::BAD_GATEWAY, "The AI service did not answer").into_response()
        }
    }
}

impl IntoResponse for AssistantError {
    fn into_response(self) -> Response {
        match &self {
            AssistantError::Assistant(e) | AssistantError::Document(DocumentError::Assistant(e)) => {
                assistant_response(e)
            }
            AssistantError::Document(e @ (DocumentError::NoText | DocumentError::Pdf(_))) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
            }
            AssistantError::Document(DocumentError::Extraction) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read the document").into_response()
            }
        }
    }
}
