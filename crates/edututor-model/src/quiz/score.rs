use crate::quiz::Difficulty;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Result of one completed quiz. Never changed once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScoreRecord {
    pub user_id: Uuid,
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub score: u32,
    pub total: u32,
    pub timestamp: NaiveDateTime,
}

/// A score record together with the name of the student it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserScoreRecord {
    pub username: String,
    pub record: ScoreRecord,
}
