use crate::quiz::error::QuizError;
use crate::quiz::recorder::ScoreRecorder;
use crate::quiz::session::QuizSession;
use chrono::Utc;
use edututor_model::quiz::session::{QuizSessionStatus, SessionState};
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

type SharedSession = Arc<Mutex<QuizSession>>;

/// Quiz sessions of all users, at most one per user.
///
/// The map lock is only held to look sessions up, each session has its own lock so that
/// recording a result does not block other users.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, SharedSession>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn get(&self, user_id: Uuid) -> Result<SharedSession, QuizError> {
        self.sessions
            .lock()
            .await
            .get(&user_id)
            .cloned()
            .ok_or(QuizError::NoSession)
    }

    // Only removes the entry if it still belongs to `session`, a new quiz may have replaced it
    async fn discard(&self, user_id: Uuid, session: &SharedSession) {
        let mut sessions = self.sessions.lock().await;
        if sessions.get(&user_id).is_some_and(|current| Arc::ptr_eq(current, session)) {
            sessions.remove(&user_id);
        }
    }

    /// Starts a new quiz, abandoning any quiz the user had in progress.
    pub async fn start(&self, user_id: Uuid, session: QuizSession) -> QuizSessionStatus {
        let status = session.status();
        let previous = self
            .sessions
            .lock()
            .await
            .insert(user_id, Arc::new(Mutex::new(session)));
        if previous.is_some() {
            tracing::debug!(%user_id, "abandoned previous quiz");
        }
        status
    }

    pub async fn status(&self, user_id: Uuid) -> Result<QuizSessionStatus, QuizError> {
        let session = self.get(user_id).await?;
        let session = session.lock().await;
        Ok(session.status())
    }

    /// Answers the current question.
    ///
    /// Completing the quiz records the result and discards the session. If recording fails the
    /// completed session is kept so that [`SessionStore::finish`] can retry.
    pub async fn answer<R: ScoreRecorder + ?Sized>(
        &self,
        user_id: Uuid,
        selected_option: Option<u8>,
        recorder: &R,
    ) -> Result<QuizSessionStatus, QuizError> {
        let shared = self.get(user_id).await?;
        let mut session = shared.lock().await;
        if session.submit_answer(selected_option)? == SessionState::InProgress {
            return Ok(session.status());
        }
        drop(session);
        self.finish_shared(user_id, &shared, recorder).await
    }

    /// Records the result of a completed quiz that could not be recorded before.
    pub async fn finish<R: ScoreRecorder + ?Sized>(
        &self,
        user_id: Uuid,
        recorder: &R,
    ) -> Result<QuizSessionStatus, QuizError> {
        let shared = self.get(user_id).await?;
        self.finish_shared(user_id, &shared, recorder).await
    }

    async fn finish_shared<R: ScoreRecorder + ?Sized>(
        &self,
        user_id: Uuid,
        shared: &SharedSession,
        recorder: &R,
    ) -> Result<QuizSessionStatus, QuizError> {
        let mut session = shared.lock().await;
        if session.record().is_none() {
            let record = session.to_record(user_id, Utc::now().naive_utc())?;
            recorder.record(&record).await.inspect_err(|error| {
                tracing::warn!(error = error as &dyn Error, %user_id, "keeping completed quiz, result was not recorded");
            })?;
            session.set_record(record);
        }
        let status = session.status();
        drop(session);
        self.discard(user_id, shared).await;
        Ok(status)
    }

    /// Drops the quiz of the user without recording anything.
    pub async fn abandon(&self, user_id: Uuid) -> Result<(), QuizError> {
        let removed = self.sessions.lock().await.remove(&user_id);
        match removed {
            Some(_) => {
                tracing::debug!(%user_id, "quiz abandoned");
                Ok(())
            }
            None => Err(QuizError::NoSession),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::error::SessionError;
    use crate::quiz::recorder::memory::MemoryScoreRecorder;
    use edututor_model::quiz::Difficulty;
    use edututor_model::quiz::question::Question;
    use edututor_model::quiz::session::QuizMetadata;
    use test_log::test;

    fn session(correct: &[u8]) -> QuizSession {
        let questions = correct
            .iter()
            .map(|&correct_option| Question {
                text: format!("question with answer {correct_option}"),
                options: vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
                correct_option,
            })
            .collect();
        QuizSession::new(
            QuizMetadata {
                subject: "math".to_owned(),
                topic: "algebra".to_owned(),
                difficulty: Difficulty::Easy,
            },
            questions,
        )
    }

    #[test(tokio::test)]
    async fn test_completed_quiz_is_recorded_once_and_discarded() {
        let store = SessionStore::new();
        let recorder = MemoryScoreRecorder::default();
        let user_id = Uuid::new_v4();

        store.start(user_id, session(&[2, 1])).await;
        let status = store.answer(user_id, Some(2), &recorder).await.unwrap();
        assert_eq!(status.state, SessionState::InProgress);
        assert!(recorder.records.lock().unwrap().is_empty());

        let status = store.answer(user_id, Some(3), &recorder).await.unwrap();
        assert_eq!(status.state, SessionState::Completed);
        assert_eq!(status.score, Some(1));
        let record = status.record.unwrap();
        assert_eq!((record.score, record.total), (1, 2));

        let records = recorder.records.lock().unwrap().clone();
        assert_eq!(records, vec![record]);

        assert!(matches!(store.status(user_id).await, Err(QuizError::NoSession)));
        assert!(matches!(
            store.answer(user_id, Some(1), &recorder).await,
            Err(QuizError::NoSession)
        ));
    }

    #[test(tokio::test)]
    async fn test_rejected_answer_keeps_session() {
        let store = SessionStore::new();
        let recorder = MemoryScoreRecorder::default();
        let user_id = Uuid::new_v4();

        store.start(user_id, session(&[1])).await;
        assert!(matches!(
            store.answer(user_id, None, &recorder).await,
            Err(QuizError::Session(SessionError::NoSelection))
        ));
        let status = store.status(user_id).await.unwrap();
        assert_eq!(status.answered, 0);
        assert_eq!(status.state, SessionState::InProgress);
    }

    #[test(tokio::test)]
    async fn test_failed_recording_can_be_retried() {
        let store = SessionStore::new();
        let recorder = MemoryScoreRecorder::default();
        let user_id = Uuid::new_v4();
        *recorder.failing.lock().unwrap() = true;

        store.start(user_id, session(&[1])).await;
        let result = store.answer(user_id, Some(1), &recorder).await;
        assert!(matches!(result, Err(QuizError::Record(_))));

        let status = store.status(user_id).await.unwrap();
        assert_eq!(status.state, SessionState::Completed);
        assert!(status.record.is_none());

        *recorder.failing.lock().unwrap() = false;
        let status = store.finish(user_id, &recorder).await.unwrap();
        assert_eq!(status.record.unwrap().score, 1);
        assert_eq!(recorder.records.lock().unwrap().len(), 1);
        assert!(matches!(store.status(user_id).await, Err(QuizError::NoSession)));
    }

    #[test(tokio::test)]
    async fn test_finish_in_progress_quiz_is_rejected() {
        let store = SessionStore::new();
        let recorder = MemoryScoreRecorder::default();
        let user_id = Uuid::new_v4();

        store.start(user_id, session(&[1, 2])).await;
        assert!(matches!(
            store.finish(user_id, &recorder).await,
            Err(QuizError::Session(SessionError::InProgress))
        ));
        assert!(recorder.records.lock().unwrap().is_empty());
    }

    #[test(tokio::test)]
    async fn test_abandon_records_nothing() {
        let store = SessionStore::new();
        let recorder = MemoryScoreRecorder::default();
        let user_id = Uuid::new_v4();

        store.start(user_id, session(&[1, 2])).await;
        store.answer(user_id, Some(1), &recorder).await.unwrap();
        store.abandon(user_id).await.unwrap();

        assert!(matches!(store.status(user_id).await, Err(QuizError::NoSession)));
        assert!(matches!(store.abandon(user_id).await, Err(QuizError::NoSession)));
        assert!(recorder.records.lock().unwrap().is_empty());
    }

    #[test(tokio::test)]
    async fn test_new_quiz_replaces_old_one() {
        let store = SessionStore::new();
        let recorder = MemoryScoreRecorder::default();
        let user_id = Uuid::new_v4();
        let other = Uuid::new_v4();

        store.start(user_id, session(&[1, 2])).await;
        store.start(other, session(&[1])).await;
        store.answer(user_id, Some(1), &recorder).await.unwrap();
        store.start(user_id, session(&[3, 3, 3])).await;

        let status = store.status(user_id).await.unwrap();
        assert_eq!(status.answered, 0);
        assert_eq!(status.total, 3);
        assert_eq!(store.status(other).await.unwrap().total, 1);
        assert!(recorder.records.lock().unwrap().is_empty());
    }
}
