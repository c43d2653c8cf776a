use crate::permissions::{RequireEducator, RequireStudent};
use crate::routes::api::v0::analytics::error::AnalyticsError;
use axum::extract::Query;
use axum::routing::get;
use axum::{Extension, Json, Router};
use edututor_core::analytics::{
    educator_dashboard, load_all_records, load_user_records, student_dashboard, student_reports,
};
use edututor_model::analytics::{EducatorDashboard, StudentDashboard, StudentReport};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::IntoParams;

mod error;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/student", get(get_student_dashboard))
        .nest(
            "/educator",
            Router::new()
                .route("/", get(get_educator_dashboard))
                .route("/reports", get(get_student_reports)),
        )
        .with_state(())
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct SubjectFilter {
    /// Only attempts of this subject, `All` or no value selects every subject
    subject: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v0/analytics/student",
    responses(
        (status = OK, body = StudentDashboard, description = "Quiz history of the current student"),
    ),
    tag = "v0/analytics",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn get_student_dashboard(
    RequireStudent(user): RequireStudent,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Json<StudentDashboard>, AnalyticsError> {
    let records = load_user_records(&conn, user.id).await?;
    Ok(Json(student_dashboard(&records)))
}

#[utoipa::path(
    get,
    path = "/api/v0/analytics/educator",
    params(SubjectFilter),
    responses(
        (status = OK, body = EducatorDashboard, description = "Attempts of all students"),
        (status = FORBIDDEN, description = "Only educators can see all results"),
    ),
    tag = "v0/analytics",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn get_educator_dashboard(
    RequireEducator(_): RequireEducator,
    Extension(conn): Extension<DatabaseConnection>,
    Query(filter): Query<SubjectFilter>,
) -> Result<Json<EducatorDashboard>, AnalyticsError> {
    let records = load_all_records(&conn).await?;
    Ok(Json(educator_dashboard(&records, filter.subject.as_deref())))
}

#[utoipa::path(
    get,
    path = "/api/v0/analytics/educator/reports",
    responses(
        (status = OK, body = Vec<StudentReport>, description = "Summary per student"),
        (status = FORBIDDEN, description = "Only educators can see all results"),
    ),
    tag = "v0/analytics",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn get_student_reports(
    RequireEducator(_): RequireEducator,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Json<Vec<StudentReport>>, AnalyticsError> {
    let records = load_all_records(&conn).await?;
    Ok(Json(student_reports(&records)))
}
