use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::{Extension, RequestPartsExt};
use axum_extra::TypedHeader;
use axum_extra::extract::Cached;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use edututor_db::user;
use edututor_model::user::User;
use edututor_model_tools::convert::IntoModel;
use http::StatusCode;
use http::request::Parts;

use sea_orm::DatabaseConnection;
use std::error::Error;
use url::form_urlencoded;
use uuid::Uuid;

pub fn extract_auth_token_from_params(parts: &Parts) -> Option<String> {
    if let Some(query) = parts.uri.query() {
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if key == "access_token" {
                return Some(value.to_string());
            }
        }
    }
    None
}

pub(crate) type Rejection = (StatusCode, &'static str);

#[derive(Clone)]
struct Session {
    user: User,
}

/// The authenticated user of a request.
#[derive(Clone)]
pub(crate) struct ExtractUser(pub User);

#[derive(Clone)]
pub(crate) struct ExtractUserId(pub Uuid);

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Try to extract token from Authorization header first
        let token = if let Ok(TypedHeader(Authorization(bearer))) =
            parts.extract::<TypedHeader<Authorization<Bearer>>>().await
        {
            bearer.token().to_owned()
        } else if let Some(token) = extract_auth_token_from_params(parts) {
            token
        } else {
            return Err((StatusCode::UNAUTHORIZED, "No authentication token provided"));
        };

        let Extension::<DatabaseConnection>(conn) =
            parts
                .extract::<Extension<DatabaseConnection>>()
                .await
                .map_err(|error| {
                    tracing::error!(
                        error = &error as &dyn Error,
                        "database connection not found in app data"
                    );
                    (StatusCode::INTERNAL_SERVER_ERROR, "Database Connection not found")
                })?;

        Self::from_db(&conn, &token).await.map(|user| Self { user })
    }
}

impl Session {
    async fn from_db(conn: &DatabaseConnection, token: &str) -> Result<User, Rejection> {
        let user = match user::Query::find_by_token(conn, token).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err((StatusCode::UNAUTHORIZED, "Authentication failed.")),
            Err(_) => return Err((StatusCode::SERVICE_UNAVAILABLE, "Error loading user")),
        };

        sentry::configure_scope(|scope| {
            scope.set_user(Some(sentry::User {
                id: Some(user.id.as_hyphenated().to_string()),
                ..Default::default()
            }));
        });

        Ok(user.into_model())
    }
}

impl<S> OptionalFromRequestParts<S> for ExtractUser
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let Ok(session) = Cached::<Session>::from_request_parts(parts, state).await else {
            return Ok(None);
        };
        Ok(Some(Self(session.0.user)))
    }
}

impl<S> FromRequestParts<S> for ExtractUser
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session: Session = Cached::<Session>::from_request_parts(parts, state).await?.0;
        Ok(Self(session.user))
    }
}

impl<S> FromRequestParts<S> for ExtractUserId
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session: Session = Cached::<Session>::from_request_parts(parts, state).await?.0;
        Ok(Self(session.user.id))
    }
}
