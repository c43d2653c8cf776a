use crate::quiz::Difficulty;
use crate::quiz::question::QuestionView;
use crate::quiz::score::ScoreRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuizMetadata {
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
}

/// Request to start a quiz. Keys are matched case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StartQuiz {
    #[schema(example = "math")]
    pub subject: String,
    #[schema(example = "algebra")]
    pub topic: String,
    #[schema(example = "easy")]
    pub difficulty: String,
    /// Upper bound of questions, the server default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitAnswer {
    /// 1-based option of the current question
    pub selected_option: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuizSessionStatus {
    pub state: SessionState,
    pub quiz: QuizMetadata,
    pub answered: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<usize>,
    /// Set once the result has been stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ScoreRecord>,
}
