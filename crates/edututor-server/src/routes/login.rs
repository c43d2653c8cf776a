use crate::db;
use crate::routes::error::{ErrorData, LoginError, LoginErrorType};
use crate::user::{ExtractUser, ExtractUserId};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use edututor_db::access_tokens;
use edututor_model::login::{PasswordLogin, Registration, Token};
use edututor_model::user::User;
use edututor_model_tools::convert::IntoModel;
use http::StatusCode;
use sea_orm::DatabaseConnection;
use std::borrow::Cow;
use std::error::Error;

pub fn create_router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new()
        .route("/register", post(register))
        .route("/whoami", get(whoami))
        .route("/logout", post(logout))
        .nest("/login", Router::new().route("/password", post(login_password)))
        .with_state(())
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = Registration,
    responses(
        (status = CREATED, description = "User registered", body = User),
        (status = CONFLICT, description = "Username or email already taken", body = ErrorData<LoginErrorType>),
        (status = UNPROCESSABLE_ENTITY, description = "Missing username, email or password", body = ErrorData<LoginErrorType>),
    ),
    tag = "auth"
)]
pub(crate) async fn register(
    Extension(conn): Extension<DatabaseConnection>,
    Json(registration): Json<Registration>,
) -> Result<impl IntoResponse, LoginError> {
    let user: User = db::user::register(&conn, registration).await?.into_model();
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    post,
    path = "/login/password",
    request_body = PasswordLogin,
    responses(
        (status = OK, description = "Successful login, returns Bearer token", body = Token, example = json!( Token { access_token: "abcToken12345678".into() })),
        (status = UNAUTHORIZED, description = "Unknown user or wrong password", body = ErrorData<LoginErrorType>),
    ),
    tag = "auth"
)]
pub(crate) async fn login_password(
    Extension(conn): Extension<DatabaseConnection>,
    Json(login): Json<PasswordLogin>,
) -> Result<Json<Token>, LoginError> {
    let access_token = db::user::login(&conn, &login.username, &login.password).await?;
    Ok(Json(Token { access_token }))
}

async fn whoami(user: Option<ExtractUser>) -> impl IntoResponse {
    match user {
        None => {
            tracing::debug!("no user found");
            (StatusCode::NOT_FOUND, Cow::Borrowed("no user"))
        }
        Some(ExtractUser(user)) => (StatusCode::OK, Cow::Owned(format!("Hello {}", user.username))),
    }
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = NO_CONTENT, description = "User Logged out successfully"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to delete access token")
    ),
    tag = "auth",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn logout(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
) -> impl IntoResponse {
    if let Err(error) = access_tokens::Mutation::delete_access_token(&conn, user_id).await {
        tracing::error!(
            user = %user_id,
            error = &error as &dyn Error,
            "failed to delete access token"
        );
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    tracing::debug!(user = %user_id, "user logged out");
    StatusCode::NO_CONTENT
}
