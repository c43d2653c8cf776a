use chrono::Utc;
use edututor_entity::user::{ActiveModel, Entity, Model, Role};
use sea_orm::ActiveValue::Set;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create_user<C: ConnectionTrait>(
        conn: &C,
        username: String,
        email: String,
        password_hash: String,
        role: Role,
    ) -> Result<Model, DbErr> {
        let new_user = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(role),
            created_at: Set(Utc::now().naive_utc()),
        };

        Entity::insert(new_user)
            .exec_with_returning(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "failed to create user");
            })
    }

    pub async fn delete<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<(), DbErr> {
        let res = Entity::delete_by_id(user_id).exec(conn).await;
        if let Err(error) = res {
            tracing::error!(error = &error as &dyn Error, "failed to delete user");
            return Err(error);
        }
        Ok(())
    }
}
