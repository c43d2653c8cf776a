use edututor_db::quiz::result::Query;
use edututor_model::analytics::{Attempt, EducatorDashboard, StudentAttempt, StudentDashboard, StudentReport};
use edututor_model::quiz::score::{ScoreRecord, UserScoreRecord};
use edututor_model_tools::convert::TryIntoModel;
use edututor_model_tools::error::ConversionError;
use sea_orm::{ConnectionTrait, DbErr};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use uuid::Uuid;

/// Filter value that selects every subject.
pub const ALL_SUBJECTS: &str = "All";

/// `score / total` in percent, rounded to two decimals. A quiz without questions counts as 0.
#[must_use]
pub fn percentage(score: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (f64::from(score) / f64::from(total) * 10_000.0).round() / 100.0
}

fn average(values: impl ExactSizeIterator<Item = f64>) -> Option<f64> {
    let count = values.len();
    if count == 0 {
        return None;
    }
    let sum: f64 = values.sum();
    #[allow(clippy::cast_precision_loss)]
    Some((sum / count as f64 * 100.0).round() / 100.0)
}

fn attempt(record: &ScoreRecord) -> Attempt {
    Attempt {
        subject: record.subject.clone(),
        topic: record.topic.clone(),
        difficulty: record.difficulty,
        score: record.score,
        total: record.total,
        percentage: percentage(record.score, record.total),
        timestamp: record.timestamp,
    }
}

/// Quiz history of a single student, oldest attempt first.
#[must_use]
pub fn student_dashboard(records: &[ScoreRecord]) -> StudentDashboard {
    let mut attempts: Vec<Attempt> = records.iter().map(attempt).collect();
    attempts.sort_by_key(|attempt| attempt.timestamp);
    let average_percentage = average(attempts.iter().map(|attempt| attempt.percentage));
    StudentDashboard {
        attempt_count: attempts.len(),
        attempts,
        average_percentage,
    }
}

fn matches_subject(record: &ScoreRecord, subject: Option<&str>) -> bool {
    match subject {
        None => true,
        Some(subject) if subject.eq_ignore_ascii_case(ALL_SUBJECTS) => true,
        Some(subject) => record.subject.to_lowercase() == subject.to_lowercase(),
    }
}

/// Attempts of all students, optionally restricted to one subject.
///
/// The subject list always covers every recorded subject so that a filter can be changed.
#[must_use]
pub fn educator_dashboard(records: &[UserScoreRecord], subject: Option<&str>) -> EducatorDashboard {
    let subjects: BTreeSet<&str> = records.iter().map(|entry| entry.record.subject.as_str()).collect();

    let mut attempts = vec![];
    let mut score_by_student: BTreeMap<String, u64> = BTreeMap::new();
    for entry in records.iter().filter(|entry| matches_subject(&entry.record, subject)) {
        *score_by_student.entry(entry.username.clone()).or_default() += u64::from(entry.record.score);
        attempts.push(StudentAttempt {
            username: entry.username.clone(),
            attempt: attempt(&entry.record),
        });
    }
    attempts.sort_by_key(|entry| entry.attempt.timestamp);

    EducatorDashboard {
        attempts,
        subjects: subjects.into_iter().map(str::to_owned).collect(),
        score_by_student,
    }
}

/// Summary per student, ordered by username.
#[must_use]
pub fn student_reports(records: &[UserScoreRecord]) -> Vec<StudentReport> {
    let mut by_student: BTreeMap<&str, Vec<&ScoreRecord>> = BTreeMap::new();
    for entry in records {
        by_student.entry(entry.username.as_str()).or_default().push(&entry.record);
    }

    by_student
        .into_iter()
        .map(|(username, records)| StudentReport {
            username: username.to_owned(),
            attempts: records.len(),
            total_score: records.iter().map(|record| u64::from(record.score)).sum(),
            total_questions: records.iter().map(|record| u64::from(record.total)).sum(),
            average_percentage: average(records.iter().map(|record| percentage(record.score, record.total))),
        })
        .collect()
}

fn skip_invalid<T>(result: Result<T, ConversionError>, id: i32) -> Option<T> {
    result
        .inspect_err(|error| {
            tracing::warn!(error = error as &dyn Error, id, "skipping unreadable quiz result");
        })
        .ok()
}

/// Score history of a user. Rows that cannot be read are skipped.
pub async fn load_user_records<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<Vec<ScoreRecord>, DbErr> {
    let results = Query::get_results_by_user(conn, user_id).await?;
    Ok(results
        .into_iter()
        .filter_map(|result| {
            let id = result.id;
            skip_invalid(result.try_into_model(), id)
        })
        .collect())
}

/// Score records of all users together with their usernames.
pub async fn load_all_records<C: ConnectionTrait>(conn: &C) -> Result<Vec<UserScoreRecord>, DbErr> {
    let results = Query::get_results_with_users(conn, None).await?;
    Ok(results
        .into_iter()
        .filter_map(|(result, user)| {
            let id = result.id;
            let Some(user) = user else {
                tracing::warn!(id, "skipping quiz result without user");
                return None;
            };
            skip_invalid(result.try_into_model(), id).map(|record| UserScoreRecord {
                username: user.username,
                record,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use edututor_model::quiz::Difficulty;
    use sea_orm::{ConnectionTrait, Database};
    use test_log::test;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn record(subject: &str, score: u32, total: u32, day: u32) -> ScoreRecord {
        ScoreRecord {
            user_id: Uuid::nil(),
            subject: subject.to_owned(),
            topic: "topic".to_owned(),
            difficulty: Difficulty::Medium,
            score,
            total,
            timestamp: at(day),
        }
    }

    fn entry(username: &str, subject: &str, score: u32, total: u32, day: u32) -> UserScoreRecord {
        UserScoreRecord {
            username: username.to_owned(),
            record: record(subject, score, total, day),
        }
    }

    #[test]
    fn test_percentage() {
        assert!((percentage(1, 3) - 33.33).abs() < f64::EPSILON);
        assert!((percentage(2, 3) - 66.67).abs() < f64::EPSILON);
        assert!((percentage(3, 3) - 100.0).abs() < f64::EPSILON);
        assert!(percentage(0, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_student_dashboard() {
        let dashboard = student_dashboard(&[record("Math", 1, 2, 3), record("Physics", 3, 3, 1)]);
        assert_eq!(dashboard.attempt_count, 2);
        assert_eq!(dashboard.attempts[0].subject, "Physics");
        assert!((dashboard.attempts[1].percentage - 50.0).abs() < f64::EPSILON);
        assert_eq!(dashboard.average_percentage, Some(75.0));
    }

    #[test]
    fn test_empty_student_dashboard() {
        let dashboard = student_dashboard(&[]);
        assert_eq!(dashboard.attempt_count, 0);
        assert!(dashboard.average_percentage.is_none());
    }

    #[test]
    fn test_educator_dashboard_filter() {
        let records = [
            entry("ada", "Math", 2, 3, 2),
            entry("alan", "math", 1, 3, 1),
            entry("ada", "Physics", 3, 3, 3),
        ];

        let all = educator_dashboard(&records, Some("All"));
        assert_eq!(all.attempts.len(), 3);
        assert_eq!(all.attempts[0].username, "alan");
        assert_eq!(all.score_by_student["ada"], 5);
        assert_eq!(all.score_by_student["alan"], 1);
        assert_eq!(all, educator_dashboard(&records, None));

        let math = educator_dashboard(&records, Some("MATH"));
        assert_eq!(math.attempts.len(), 2);
        assert_eq!(math.score_by_student["ada"], 2);
        assert_eq!(math.subjects, ["Math", "Physics", "math"]);

        let none = educator_dashboard(&records, Some("History"));
        assert!(none.attempts.is_empty());
        assert!(none.score_by_student.is_empty());
        assert_eq!(none.subjects.len(), 3);
    }

    #[test]
    fn test_student_reports() {
        let reports = student_reports(&[
            entry("alan", "Math", 0, 2, 1),
            entry("ada", "Math", 2, 2, 2),
            entry("ada", "Physics", 1, 2, 3),
        ]);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].username, "ada");
        assert_eq!(reports[0].attempts, 2);
        assert_eq!(reports[0].total_score, 3);
        assert_eq!(reports[0].total_questions, 4);
        assert_eq!(reports[0].average_percentage, Some(75.0));
        assert_eq!(reports[1].average_percentage, Some(0.0));
    }

    #[test(tokio::test)]
    async fn test_unreadable_rows_are_skipped() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        edututor_db::schema::setup_schema(&db).await.unwrap();
        let user = edututor_db::user::Mutation::create_user(
            &db,
            "ada".to_owned(),
            "ada@example.org".to_owned(),
            "hash".to_owned(),
            edututor_entity::user::Role::Student,
        )
        .await
        .unwrap();

        for (difficulty, score, total) in [("easy", 1, 2), ("impossible", 1, 2), ("hard", 5, 2)] {
            edututor_db::quiz::result::Mutation::insert_result(
                &db,
                edututor_db::quiz::result::NewQuizResult {
                    user_id: user.id,
                    subject: "Math",
                    topic: "Algebra",
                    difficulty,
                    score,
                    total,
                    timestamp: at(1),
                },
            )
            .await
            .unwrap();
        }

        let records = load_user_records(&db, user.id).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].difficulty, Difficulty::Easy);

        let all = load_all_records(&db).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].username, "ada");

        // A broken database is reported instead of treated as empty
        db.execute_unprepared("DROP TABLE quiz_results").await.unwrap();
        assert!(load_user_records(&db, user.id).await.is_err());
    }
}
