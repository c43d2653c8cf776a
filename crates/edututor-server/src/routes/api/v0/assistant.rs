use crate::AppConfig;
use crate::routes::api::v0::assistant::error::AssistantError;
use crate::user::ExtractUserId;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Query};
use axum::routing::post;
use axum::{Extension, Json, Router};
use edututor_core::assistant::ask;
use edututor_core::document::ask_document;
use edututor_model::assistant::{Answer, AskRequest, DocumentQuestion};

mod error;

const MAX_DOCUMENT_SIZE: usize = 20 * 1024 * 1024;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/ask", post(ask_question))
        .route(
            "/pdf",
            post(ask_pdf).layer(DefaultBodyLimit::max(MAX_DOCUMENT_SIZE)),
        )
        .with_state(())
}

#[utoipa::path(
    post,
    path = "/api/v0/assistant/ask",
    request_body = AskRequest,
    responses(
        (status = OK, body = Answer, description = "Answer of the tutor"),
        (status = UNPROCESSABLE_ENTITY, description = "The question is empty"),
        (status = BAD_GATEWAY, description = "The AI service did not answer"),
    ),
    tag = "v0/assistant",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn ask_question(
    ExtractUserId(user_id): ExtractUserId,
    Extension(app_config): Extension<AppConfig>,
    Json(request): Json<AskRequest>,
) -> Result<Json<Answer>, AssistantError> {
    let llm_config = app_config.llm_config();
    tracing::debug!(%user_id, with_context = request.context.is_some(), "asking tutor");
    let answer = ask(
        llm_config,
        llm_config.get_assistant_model(),
        &request.question,
        request.context.as_deref(),
    )
    .await?;
    Ok(Json(Answer { answer }))
}

#[utoipa::path(
    post,
    path = "/api/v0/assistant/pdf",
    params(DocumentQuestion),
    request_body(content = Vec<u8>, description = "The pdf document", content_type = "application/pdf"),
    responses(
        (status = OK, body = Answer, description = "Answer based on the first pages of the document"),
        (status = UNPROCESSABLE_ENTITY, description = "The question is empty or the document has no readable text"),
        (status = BAD_GATEWAY, description = "The AI service did not answer"),
    ),
    tag = "v0/assistant",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn ask_pdf(
    ExtractUserId(user_id): ExtractUserId,
    Extension(app_config): Extension<AppConfig>,
    Query(query): Query<DocumentQuestion>,
    pdf: Bytes,
) -> Result<Json<Answer>, AssistantError> {
    tracing::debug!(%user_id, size = pdf.len(), "asking question about pdf");
    let answer = ask_document(app_config.llm_config(), pdf.to_vec(), &query.question).await?;
    Ok(Json(Answer { answer }))
}
