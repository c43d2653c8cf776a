use crate::quiz::catalog::QuestionCatalog;
use edututor_model::status::ComponentStatus;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::Query;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use std::error::Error;
use std::time::Duration;
use tokio::time::timeout;
use tracing::instrument;

#[instrument(skip_all)]
pub async fn get_sea_orm_db_status(conn: &DatabaseConnection, duration: Option<Duration>) -> ComponentStatus {
    let mut query = Query::select();
    query.expr(Expr::current_timestamp());
    let result = timeout(
        duration.unwrap_or_else(|| Duration::from_secs(5)),
        conn.execute(conn.get_database_backend().build(&query)),
    )
    .await;
    match result {
        Ok(Ok(_)) => ComponentStatus::ok(),
        Ok(Err(error)) => {
            tracing::error!(error = &error as &dyn Error, "db error during health check");
            ComponentStatus::from_error_text("unavailable")
        }
        Err(error) => {
            tracing::error!(error = &error as &dyn Error, "db health check timed out");
            ComponentStatus::from_error_text("timeout")
        }
    }
}

/// An empty catalog is reported as an error, the quiz cannot be used without questions.
#[must_use]
pub fn get_catalog_status(catalog: &QuestionCatalog) -> ComponentStatus {
    if catalog.is_empty() {
        ComponentStatus::from_error_text("no questions loaded")
    } else {
        ComponentStatus::from_ok_text(&format!("{} questions", catalog.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Database;
    use test_log::test;

    #[test(tokio::test)]
    async fn test_db_status() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        assert!(get_sea_orm_db_status(&db, None).await.is_ok());
    }

    #[test]
    fn test_catalog_status() {
        assert!(!get_catalog_status(&QuestionCatalog::default()).is_ok());
        let catalog = QuestionCatalog::from_json(
            br#"{"math": {"algebra": {"easy": [{"question": "?", "options": ["a"], "correct_option": 1}]}}}"#,
        )
        .unwrap();
        assert!(get_catalog_status(&catalog).is_ok());
    }
}
