use async_trait::async_trait;
use quiz_core::model::{Quiz, QuizId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by quiz gateways.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("quiz not found")]
    NotFound,

    #[error("quiz api responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("invalid quiz api base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("invalid quiz payload: {0}")]
    InvalidPayload(#[from] quiz_core::Error),

    #[error("quiz gateway unavailable: {0}")]
    Unavailable(String),
}

/// Remote source of quizzes and sink for attempt status updates.
#[async_trait]
pub trait QuizGateway: Send + Sync {
    /// Fetch a quiz by id.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` if the quiz does not exist, or other
    /// transport/payload errors.
    async fn get_quiz(&self, id: &QuizId) -> Result<Quiz, GatewayError>;

    /// Fetch the whole catalog in backend order.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport or payload failures.
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, GatewayError>;

    /// Replace the stored quiz with `quiz` (used to flip its status).
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the update is rejected or cannot be sent.
    async fn update_quiz(&self, quiz: &Quiz) -> Result<(), GatewayError>;
}

/// In-memory gateway for tests and offline runs.
///
/// Every accepted update is also appended to a log so callers can assert on
/// what was submitted.
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    quizzes: Arc<Mutex<Vec<Quiz>>>,
    updates: Arc<Mutex<Vec<Quiz>>>,
    fail_updates: Arc<AtomicBool>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_quiz(self, quiz: Quiz) -> Self {
        self.insert_quiz(quiz);
        self
    }

    /// Insert or replace a quiz, keeping its catalog position on replace.
    pub fn insert_quiz(&self, quiz: Quiz) {
        let mut guard = lock(&self.quizzes);
        match guard.iter_mut().find(|existing| existing.id() == quiz.id()) {
            Some(slot) => *slot = quiz,
            None => guard.push(quiz),
        }
    }

    /// Make every `update_quiz` call fail.
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Make every call fail as if the backend were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Updates received so far, oldest first.
    #[must_use]
    pub fn updates(&self) -> Vec<Quiz> {
        lock(&self.updates).clone()
    }

    fn check_available(&self) -> Result<(), GatewayError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("in-memory gateway offline".into()));
        }
        Ok(())
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[async_trait]
impl QuizGateway for InMemoryGateway {
    async fn get_quiz(&self, id: &QuizId) -> Result<Quiz, GatewayError> {
        self.check_available()?;
        lock(&self.quizzes)
            .iter()
            .find(|quiz| quiz.id() == id)
            .cloned()
            .ok_or(GatewayError::NotFound)
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>, GatewayError> {
        self.check_available()?;
        Ok(lock(&self.quizzes).clone())
    }

    async fn update_quiz(&self, quiz: &Quiz) -> Result<(), GatewayError> {
        self.check_available()?;
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("updates rejected".into()));
        }
        {
            let mut guard = lock(&self.quizzes);
            let slot = guard
                .iter_mut()
                .find(|existing| existing.id() == quiz.id())
                .ok_or(GatewayError::NotFound)?;
            *slot = quiz.clone();
        }
        lock(&self.updates).push(quiz.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{ClassId, Difficulty, QuizDraft, QuizStatus};

    fn quiz(id: u64, status: QuizStatus) -> Quiz {
        QuizDraft {
            id: QuizId::from(id),
            heading: format!("Quiz {id}"),
            topic: "Topic".into(),
            difficulty: Difficulty::Easy,
            class_id: ClassId::new("1"),
            status,
            questions: Vec::new(),
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn get_missing_quiz_is_not_found() {
        let gateway = InMemoryGateway::new();
        let err = gateway.get_quiz(&QuizId::from(9)).await.unwrap_err();
        assert!(matches!(err, GatewayError::NotFound));
    }

    #[tokio::test]
    async fn update_replaces_quiz_and_is_logged() {
        let gateway = InMemoryGateway::new()
            .with_quiz(quiz(1, QuizStatus::Live))
            .with_quiz(quiz(2, QuizStatus::Upcoming));

        let done = quiz(1, QuizStatus::Completed);
        gateway.update_quiz(&done).await.unwrap();

        let listed = gateway.list_quizzes().await.unwrap();
        assert_eq!(listed[0].status(), QuizStatus::Completed);
        assert_eq!(listed[1].id(), &QuizId::from(2));
        assert_eq!(gateway.updates(), vec![done]);
    }

    #[tokio::test]
    async fn failing_updates_leave_state_untouched() {
        let gateway = InMemoryGateway::new().with_quiz(quiz(1, QuizStatus::Live));
        gateway.set_fail_updates(true);

        let err = gateway
            .update_quiz(&quiz(1, QuizStatus::Completed))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Unavailable(_)));
        assert!(gateway.updates().is_empty());
        let current = gateway.get_quiz(&QuizId::from(1)).await.unwrap();
        assert_eq!(current.status(), QuizStatus::Live);
    }

    #[tokio::test]
    async fn unavailable_gateway_rejects_reads() {
        let gateway = InMemoryGateway::new().with_quiz(quiz(1, QuizStatus::Live));
        gateway.set_unavailable(true);
        assert!(gateway.list_quizzes().await.is_err());
    }
}
