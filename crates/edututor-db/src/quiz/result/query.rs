use edututor_entity::quiz::result;
use edututor_entity::quiz::result::{Entity as QuizResult, Model as QuizResultModel};
use edututor_entity::user::Model as UserModel;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Select};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

fn ordered(query: Select<QuizResult>) -> Select<QuizResult> {
    query
        .order_by_asc(result::Column::Timestamp)
        .order_by_asc(result::Column::Id)
}

fn filter_subject(query: Select<QuizResult>, subject: Option<&str>) -> Select<QuizResult> {
    match subject {
        Some(subject) => query.filter(
            Expr::expr(Func::lower(Expr::col((QuizResult, result::Column::Subject)))).eq(subject.to_lowercase()),
        ),
        None => query,
    }
}

impl Query {
    /// History of a single user, oldest first.
    pub async fn get_results_by_user<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
    ) -> Result<Vec<QuizResultModel>, DbErr> {
        ordered(QuizResult::find().filter(result::Column::UserId.eq(user_id)))
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %user_id, "failed to load quiz results");
            })
    }

    /// All results, optionally restricted to a subject (compared case-insensitively).
    pub async fn get_results<C: ConnectionTrait>(
        conn: &C,
        subject: Option<&str>,
    ) -> Result<Vec<QuizResultModel>, DbErr> {
        filter_subject(ordered(QuizResult::find()), subject)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "failed to load quiz results");
            })
    }

    /// All results together with the user that produced them.
    pub async fn get_results_with_users<C: ConnectionTrait>(
        conn: &C,
        subject: Option<&str>,
    ) -> Result<Vec<(QuizResultModel, Option<UserModel>)>, DbErr> {
        filter_subject(ordered(QuizResult::find()), subject)
            .find_also_related(edututor_entity::user::Entity)
            .all(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "failed to load quiz results with users");
            })
    }
}
