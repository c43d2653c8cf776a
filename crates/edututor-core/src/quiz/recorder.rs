use crate::quiz::error::RecordError;
use async_trait::async_trait;
use edututor_db::quiz::result::{Mutation, NewQuizResult};
use edututor_model::quiz::score::ScoreRecord;
use sea_orm::DatabaseConnection;

/// Appends the results of completed quizzes to durable storage.
#[async_trait]
pub trait ScoreRecorder: Send + Sync {
    /// Stores `record`. Failures are reported, retrying is up to the caller.
    async fn record(&self, record: &ScoreRecord) -> Result<(), RecordError>;
}

fn validate(record: &ScoreRecord) -> Result<(), RecordError> {
    if record.score > record.total {
        return Err(RecordError::ScoreOutOfRange {
            score: record.score,
            total: record.total,
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct SeaOrmScoreRecorder {
    conn: DatabaseConnection,
}

impl SeaOrmScoreRecorder {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ScoreRecorder for SeaOrmScoreRecorder {
    async fn record(&self, record: &ScoreRecord) -> Result<(), RecordError> {
        validate(record)?;
        let out_of_range = || RecordError::ScoreOutOfRange {
            score: record.score,
            total: record.total,
        };
        let new = NewQuizResult {
            user_id: record.user_id,
            subject: &record.subject,
            topic: &record.topic,
            difficulty: record.difficulty.as_ref(),
            score: i32::try_from(record.score).map_err(|_| out_of_range())?,
            total: i32::try_from(record.total).map_err(|_| out_of_range())?,
            timestamp: record.timestamp,
        };
        let stored = Mutation::insert_result(&self.conn, new).await?;
        tracing::info!(
            id = stored.id,
            user_id = %record.user_id,
            score = record.score,
            total = record.total,
            "recorded quiz result"
        );
        Ok(())
    }
}
