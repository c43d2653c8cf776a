use edututor_entity::access_tokens::{Column as AccessTokenColumn, Entity as AccessToken};
use edututor_entity::user::{Column as UserColumn, Entity as UserEntity, Model as User};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect};
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_user_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<User>, DbErr> {
        UserEntity::find_by_id(id).one(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn std::error::Error, "error loading user");
        })
    }

    pub async fn find_by_username<C: ConnectionTrait>(conn: &C, username: &str) -> Result<Option<User>, DbErr> {
        UserEntity::find()
            .filter(UserColumn::Username.eq(username))
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn std::error::Error, "error loading user by username");
            })
    }

    /// Looks up whether a username or email is already taken.
    pub async fn exists_with_username_or_email<C: ConnectionTrait>(
        conn: &C,
        username: &str,
        email: &str,
    ) -> Result<bool, DbErr> {
        let user = UserEntity::find()
            .filter(UserColumn::Username.eq(username).or(UserColumn::Email.eq(email)))
            .select_only()
            .column(UserColumn::Id)
            .into_tuple::<Uuid>()
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn std::error::Error, "error checking for existing user");
            })?;
        Ok(user.is_some())
    }

    pub async fn find_by_token<C: ConnectionTrait>(conn: &C, token: &str) -> Result<Option<User>, DbErr> {
        UserEntity::find()
            .inner_join(AccessToken)
            .filter(AccessTokenColumn::AccessToken.eq(token))
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn std::error::Error, "error finding user by token");
            })
    }
}
