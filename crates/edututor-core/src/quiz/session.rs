use crate::quiz::error::SessionError;
use chrono::NaiveDateTime;
use edututor_model::quiz::question::Question;
use edututor_model::quiz::score::ScoreRecord;
use edututor_model::quiz::session::{QuizMetadata, QuizSessionStatus, SessionState};
use uuid::Uuid;

/// One attempt at a sampled quiz.
///
/// Questions are fixed at creation and answered strictly in order. `answers[i]` is only set for
/// `i < cursor`, and the session is completed once `cursor` reaches the number of questions.
#[derive(Debug, Clone)]
pub struct QuizSession {
    metadata: QuizMetadata,
    questions: Vec<Question>,
    answers: Vec<Option<u8>>,
    cursor: usize,
    // Set once the result has been stored, the session must not be recorded twice
    record: Option<ScoreRecord>,
}

impl QuizSession {
    #[must_use]
    pub fn new(metadata: QuizMetadata, questions: Vec<Question>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            metadata,
            questions,
            answers,
            cursor: 0,
            record: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.cursor < self.questions.len() {
            SessionState::InProgress
        } else {
            SessionState::Completed
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state() == SessionState::Completed
    }

    #[must_use]
    pub fn metadata(&self) -> &QuizMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<u8>] {
        &self.answers
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn record(&self) -> Option<&ScoreRecord> {
        self.record.as_ref()
    }

    pub fn current_question(&self) -> Result<&Question, SessionError> {
        self.questions.get(self.cursor).ok_or(SessionError::Completed)
    }

    /// Stores the selected 1-based option for the current question and moves on.
    ///
    /// A rejected answer leaves the session untouched.
    pub fn submit_answer(&mut self, selected_option: Option<u8>) -> Result<SessionState, SessionError> {
        let question = self.current_question()?;
        let option = selected_option.ok_or(SessionError::NoSelection)?;
        if !question.accepts(option) {
            return Err(SessionError::InvalidOption {
                option,
                options: question.options.len(),
            });
        }

        self.answers[self.cursor] = Some(option);
        self.cursor += 1;
        Ok(self.state())
    }

    /// Number of correctly answered questions.
    pub fn compute_score(&self) -> Result<usize, SessionError> {
        if !self.is_completed() {
            return Err(SessionError::InProgress);
        }
        Ok(self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, answer)| answer.is_some_and(|answer| question.is_correct(answer)))
            .count())
    }

    /// The result of a completed session, ready to be recorded.
    pub fn to_record(&self, user_id: Uuid, timestamp: NaiveDateTime) -> Result<ScoreRecord, SessionError> {
        let score = self.compute_score()?;
        Ok(ScoreRecord {
            user_id,
            subject: self.metadata.subject.clone(),
            topic: self.metadata.topic.clone(),
            difficulty: self.metadata.difficulty,
            // A session never holds more than u32::MAX questions
            score: u32::try_from(score).unwrap_or(u32::MAX),
            total: u32::try_from(self.questions.len()).unwrap_or(u32::MAX),
            timestamp,
        })
    }

    pub(crate) fn set_record(&mut self, record: ScoreRecord) {
        self.record = Some(record);
    }

    #[must_use]
    pub fn status(&self) -> QuizSessionStatus {
        QuizSessionStatus {
            state: self.state(),
            quiz: self.metadata.clone(),
            answered: self.cursor,
            total: self.questions.len(),
            current_question: self
                .current_question()
                .ok()
                .map(|question| question.view(self.cursor + 1)),
            score: self.compute_score().ok(),
            record: self.record.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use edututor_model::quiz::Difficulty;

    fn question(text: &str, correct_option: u8) -> Question {
        Question {
            text: text.to_owned(),
            options: vec!["a".to_owned(), "b".to_owned(), "c".to_owned(), "d".to_owned()],
            correct_option,
        }
    }

    fn metadata() -> QuizMetadata {
        QuizMetadata {
            subject: "math".to_owned(),
            topic: "algebra".to_owned(),
            difficulty: Difficulty::Easy,
        }
    }

    fn session(correct: &[u8]) -> QuizSession {
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, &option)| question(&format!("question {i}"), option))
            .collect();
        QuizSession::new(metadata(), questions)
    }

    #[test]
    fn test_initial_state() {
        let session = session(&[1, 2, 3]);
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.cursor(), 0);
        assert!(session.answers().iter().all(Option::is_none));
        assert_eq!(session.current_question().unwrap().text, "question 0");
    }

    #[test]
    fn test_completes_after_exactly_all_answers() {
        let mut session = session(&[1, 2, 3, 4]);
        for i in 0..4 {
            assert_eq!(session.state(), SessionState::InProgress, "completed after {i} answers");
            assert_eq!(session.cursor(), i);
            session.submit_answer(Some(1)).unwrap();
        }
        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.cursor(), 4);
        assert_eq!(session.submit_answer(Some(1)), Err(SessionError::Completed));
        assert_eq!(session.current_question(), Err(SessionError::Completed));
        assert_eq!(session.cursor(), 4);
    }

    #[test]
    fn test_null_answer_changes_nothing() {
        let mut session = session(&[1, 2]);
        session.submit_answer(Some(2)).unwrap();

        assert_eq!(session.submit_answer(None), Err(SessionError::NoSelection));
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.answers(), &[Some(2), None]);
    }

    #[test]
    fn test_out_of_range_answer_changes_nothing() {
        let mut session = session(&[1, 2]);
        assert_eq!(
            session.submit_answer(Some(5)),
            Err(SessionError::InvalidOption { option: 5, options: 4 })
        );
        assert_eq!(
            session.submit_answer(Some(0)),
            Err(SessionError::InvalidOption { option: 0, options: 4 })
        );
        assert_eq!(session.cursor(), 0);
        assert!(session.answers().iter().all(Option::is_none));
    }

    #[test]
    fn test_score_only_when_completed() {
        let mut session = session(&[2, 1]);
        assert_eq!(session.compute_score(), Err(SessionError::InProgress));
        session.submit_answer(Some(2)).unwrap();
        assert_eq!(session.compute_score(), Err(SessionError::InProgress));
        assert_eq!(session.submit_answer(Some(3)), Ok(SessionState::Completed));

        assert_eq!(session.compute_score(), Ok(1));
        // Scoring has no side effects
        assert_eq!(session.compute_score(), Ok(1));
        assert_eq!(session.answers(), &[Some(2), Some(3)]);
    }

    #[test]
    fn test_record_of_completed_session() {
        let mut session = session(&[2, 1]);
        let user_id = Uuid::new_v4();
        let now = Utc::now().naive_utc();
        assert_eq!(session.to_record(user_id, now), Err(SessionError::InProgress));

        session.submit_answer(Some(2)).unwrap();
        session.submit_answer(Some(3)).unwrap();

        let record = session.to_record(user_id, now).unwrap();
        assert_eq!(record.score, 1);
        assert_eq!(record.total, 2);
        assert_eq!(record.user_id, user_id);
        assert_eq!(record.subject, "math");
        assert_eq!(record.difficulty, Difficulty::Easy);
        assert_eq!(record.timestamp, now);
    }

    #[test]
    fn test_empty_session_is_completed() {
        let session = session(&[]);
        assert!(session.is_completed());
        assert_eq!(session.compute_score(), Ok(0));
    }

    #[test]
    fn test_status_hides_answers() {
        let mut session = session(&[2, 1]);
        let status = session.status();
        assert_eq!(status.state, SessionState::InProgress);
        assert_eq!(status.total, 2);
        assert_eq!(status.current_question.as_ref().unwrap().number, 1);
        assert!(status.score.is_none());

        session.submit_answer(Some(2)).unwrap();
        session.submit_answer(Some(1)).unwrap();
        let status = session.status();
        assert_eq!(status.state, SessionState::Completed);
        assert!(status.current_question.is_none());
        assert_eq!(status.score, Some(2));
        assert!(status.record.is_none());
    }
}
