use chrono::NaiveDateTime;
use edututor_entity::quiz::result;
use sea_orm::ActiveValue::Set;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use std::error::Error;
use uuid::Uuid;

/// Values of a result row that is about to be appended.
#[derive(Debug, Clone)]
pub struct NewQuizResult<'a> {
    pub user_id: Uuid,
    pub subject: &'a str,
    pub topic: &'a str,
    pub difficulty: &'a str,
    pub score: i32,
    pub total: i32,
    pub timestamp: NaiveDateTime,
}

pub struct Mutation;

impl Mutation {
    /// Appends a result row. Results are never updated or deleted afterwards.
    pub async fn insert_result<C: ConnectionTrait>(conn: &C, new: NewQuizResult<'_>) -> Result<result::Model, DbErr> {
        let model = result::ActiveModel {
            user_id: Set(new.user_id),
            subject: Set(new.subject.to_owned()),
            topic: Set(new.topic.to_owned()),
            difficulty: Set(new.difficulty.to_owned()),
            score: Set(new.score),
            total: Set(new.total),
            timestamp: Set(new.timestamp),
            ..Default::default()
        };
        result::Entity::insert(model)
            .exec_with_returning(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, user_id = %new.user_id, "failed to store quiz result");
            })
    }
}
