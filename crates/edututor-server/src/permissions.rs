use crate::user::{ExtractUser, Rejection};
use axum::extract::FromRequestParts;
use axum_extra::extract::Cached;
use edututor_model::user::{Role, User};
use http::StatusCode;
use http::request::Parts;

async fn require_role<S>(parts: &mut Parts, state: &S, role: Role) -> Result<User, Rejection>
where
    S: Send + Sync,
{
    let ExtractUser(user) = Cached::<ExtractUser>::from_request_parts(parts, state).await?.0;
    if user.role != role {
        tracing::debug!(user_id = %user.id, required = %role, actual = %user.role, "missing role");
        return Err((StatusCode::FORBIDDEN, "Access denied for this role"));
    }
    Ok(user)
}

/// A user that takes quizzes.
pub(crate) struct RequireStudent(pub User);

/// A user that can see the results of all students.
pub(crate) struct RequireEducator(pub User);

impl<S> FromRequestParts<S> for RequireStudent
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Student).await.map(Self)
    }
}

impl<S> FromRequestParts<S> for RequireEducator
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Educator).await.map(Self)
    }
}
