use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum AnalyticsError {
    #[error(transparent)]
    SeaOrmError(#[from] sea_orm::DbErr),
}

impl IntoResponse for AnalyticsError {
    fn into_response(self) -> Response {
        match self {
            AnalyticsError::SeaOrmError(e) => {
                (StatusCode::SERVICE_UNAVAILABLE, format!("Database error: {e}")).into_response()
            }
        }
    }
}
