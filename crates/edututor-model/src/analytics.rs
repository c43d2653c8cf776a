use crate::quiz::Difficulty;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// One quiz attempt as shown on a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Attempt {
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub score: u32,
    pub total: u32,
    /// Score in percent, rounded to two decimals
    pub percentage: f64,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentDashboard {
    pub attempts: Vec<Attempt>,
    pub attempt_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentAttempt {
    pub username: String,
    pub attempt: Attempt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EducatorDashboard {
    pub attempts: Vec<StudentAttempt>,
    /// All subjects with at least one attempt, independent of the filter
    pub subjects: Vec<String>,
    /// Sum of scores per username
    pub score_by_student: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentReport {
    pub username: String,
    pub attempts: usize,
    pub total_score: u64,
    pub total_questions: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_percentage: Option<f64>,
}
