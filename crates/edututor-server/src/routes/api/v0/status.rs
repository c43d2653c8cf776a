use crate::AppConfig;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use edututor_core::status::{get_catalog_status, get_sea_orm_db_status};
use edututor_model::status::Status;
use http::StatusCode;
use sea_orm::DatabaseConnection;
use tracing::instrument;

pub fn create_router<S>() -> Router<S> {
    Router::new().route("/", get(get_status)).with_state(())
}

#[utoipa::path(
    get,
    path = "/api/v0/status",
    responses(
        (status = OK, description = "Server is ok", body = Status, example = json!({ "database": "ok", "catalog": "12 questions" })),
        (status = INTERNAL_SERVER_ERROR, description = "A component is unhealthy", body = Status),
    ),
    tag = "util"
)]
#[instrument(skip_all)]
pub(crate) async fn get_status(
    Extension(conn): Extension<DatabaseConnection>,
    Extension(app_config): Extension<AppConfig>,
) -> impl IntoResponse {
    let status = Status {
        database: get_sea_orm_db_status(&conn, None).await,
        catalog: get_catalog_status(app_config.catalog()),
    };
    let status_code = if status.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status_code, Json(status))
}
