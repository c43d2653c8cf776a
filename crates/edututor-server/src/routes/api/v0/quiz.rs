use crate::AppConfig;
use crate::permissions::RequireStudent;
use crate::routes::api::v0::quiz::error::QuizError;
use crate::user::ExtractUserId;
use axum::Json;
use axum::{
    Extension, Router,
    response::IntoResponse,
    routing::{get, post},
};
use edututor_core::analytics::load_user_records;
use edututor_core::quiz::recorder::SeaOrmScoreRecorder;
use edututor_core::quiz::session::QuizSession;
use edututor_model::quiz::Difficulty;
use edututor_model::quiz::catalog::CatalogIndex;
use edututor_model::quiz::score::ScoreRecord;
use edututor_model::quiz::session::{QuizMetadata, QuizSessionStatus, StartQuiz, SubmitAnswer};
use http::StatusCode;
use sea_orm::DatabaseConnection;
use std::str::FromStr;

mod error;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/catalog", get(get_catalog))
        .route("/scores", get(get_scores))
        .nest(
            "/session",
            Router::new()
                .route("/", get(get_session).post(start_session).delete(abandon_session))
                .route("/answer", post(submit_answer))
                .route("/finish", post(finish_session)),
        )
        .with_state(())
}

#[utoipa::path(
    get,
    path = "/api/v0/quiz/catalog",
    responses(
        (status = OK, body = CatalogIndex, description = "Number of questions per subject, topic and difficulty"),
    ),
    tag = "v0/quiz",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn get_catalog(
    ExtractUserId(_): ExtractUserId,
    Extension(app_config): Extension<AppConfig>,
) -> impl IntoResponse {
    Json(app_config.catalog().index())
}

#[utoipa::path(
    post,
    path = "/api/v0/quiz/session",
    request_body = StartQuiz,
    responses(
        (status = CREATED, body = QuizSessionStatus, description = "Quiz started, a quiz in progress is abandoned"),
        (status = NOT_FOUND, description = "no questions found"),
        (status = FORBIDDEN, description = "Only students can take quizzes"),
    ),
    tag = "v0/quiz",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn start_session(
    RequireStudent(user): RequireStudent,
    Extension(app_config): Extension<AppConfig>,
    Json(request): Json<StartQuiz>,
) -> Result<impl IntoResponse, QuizError> {
    let limits = app_config.quiz_limits();
    let count = request.count.unwrap_or(limits.default_count).min(limits.max_count);
    if count == 0 {
        return Err(QuizError::InvalidCount);
    }

    let Ok(difficulty) = Difficulty::from_str(request.difficulty.trim()) else {
        tracing::debug!(difficulty = %request.difficulty, "unknown difficulty");
        return Err(QuizError::NoQuestions);
    };
    let subject = request.subject.trim().to_lowercase();
    let topic = request.topic.trim().to_lowercase();

    let questions = app_config
        .catalog()
        .sample(&subject, &topic, difficulty.as_ref(), count);
    if questions.is_empty() {
        tracing::debug!(%subject, %topic, %difficulty, "no questions found");
        return Err(QuizError::NoQuestions);
    }

    let session = QuizSession::new(
        QuizMetadata {
            subject,
            topic,
            difficulty,
        },
        questions,
    );
    let status = app_config.sessions().start(user.id, session).await;
    tracing::info!(user_id = %user.id, total = status.total, "quiz started");
    Ok((StatusCode::CREATED, Json(status)))
}

#[utoipa::path(
    get,
    path = "/api/v0/quiz/session",
    responses(
        (status = OK, body = QuizSessionStatus, description = "Progress of the current quiz"),
        (status = NOT_FOUND, description = "no quiz in progress"),
    ),
    tag = "v0/quiz",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn get_session(
    ExtractUserId(user_id): ExtractUserId,
    Extension(app_config): Extension<AppConfig>,
) -> Result<Json<QuizSessionStatus>, QuizError> {
    Ok(Json(app_config.sessions().status(user_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v0/quiz/session/answer",
    request_body = SubmitAnswer,
    responses(
        (status = OK, body = QuizSessionStatus, description = "Answer accepted. After the last answer the result is recorded and the quiz ends"),
        (status = NOT_FOUND, description = "no quiz in progress"),
        (status = CONFLICT, description = "The quiz is already completed"),
        (status = UNPROCESSABLE_ENTITY, description = "No option or an option that does not exist was selected"),
        (status = SERVICE_UNAVAILABLE, description = "The quiz is completed but the result could not be recorded"),
    ),
    tag = "v0/quiz",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn submit_answer(
    ExtractUserId(user_id): ExtractUserId,
    Extension(app_config): Extension<AppConfig>,
    Extension(conn): Extension<DatabaseConnection>,
    Json(answer): Json<SubmitAnswer>,
) -> Result<Json<QuizSessionStatus>, QuizError> {
    let recorder = SeaOrmScoreRecorder::new(conn);
    let status = app_config
        .sessions()
        .answer(user_id, answer.selected_option, &recorder)
        .await?;
    Ok(Json(status))
}

#[utoipa::path(
    post,
    path = "/api/v0/quiz/session/finish",
    responses(
        (status = OK, body = QuizSessionStatus, description = "Result of a completed quiz recorded"),
        (status = NOT_FOUND, description = "no quiz in progress"),
        (status = CONFLICT, description = "The quiz is still in progress"),
        (status = SERVICE_UNAVAILABLE, description = "The result could not be recorded"),
    ),
    tag = "v0/quiz",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn finish_session(
    ExtractUserId(user_id): ExtractUserId,
    Extension(app_config): Extension<AppConfig>,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Json<QuizSessionStatus>, QuizError> {
    let recorder = SeaOrmScoreRecorder::new(conn);
    Ok(Json(app_config.sessions().finish(user_id, &recorder).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v0/quiz/session",
    responses(
        (status = NO_CONTENT, description = "Quiz abandoned, nothing is recorded"),
        (status = NOT_FOUND, description = "no quiz in progress"),
    ),
    tag = "v0/quiz",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn abandon_session(
    ExtractUserId(user_id): ExtractUserId,
    Extension(app_config): Extension<AppConfig>,
) -> Result<StatusCode, QuizError> {
    app_config.sessions().abandon(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v0/quiz/scores",
    responses(
        (status = OK, body = Vec<ScoreRecord>, description = "Recorded results of the current user, oldest first"),
    ),
    tag = "v0/quiz",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn get_scores(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Json<Vec<ScoreRecord>>, QuizError> {
    Ok(Json(load_user_records(&conn, user_id).await?))
}
