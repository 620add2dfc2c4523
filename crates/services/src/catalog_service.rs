use std::sync::Arc;

use gateway::QuizGateway;
use quiz_core::catalog::QuizFilter;
use quiz_core::model::{Quiz, QuizId};

use crate::error::CatalogError;

/// Read-side access to the quiz catalog.
#[derive(Clone)]
pub struct QuizCatalogService {
    gateway: Arc<dyn QuizGateway>,
}

impl QuizCatalogService {
    #[must_use]
    pub fn new(gateway: Arc<dyn QuizGateway>) -> Self {
        Self { gateway }
    }

    /// Quizzes matching `filter`, in backend order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Gateway` if the catalog cannot be fetched.
    pub async fn list(&self, filter: &QuizFilter) -> Result<Vec<Quiz>, CatalogError> {
        let quizzes = self.gateway.list_quizzes().await?;
        let total = quizzes.len();
        let quizzes = filter.apply(quizzes);
        tracing::debug!(total, shown = quizzes.len(), "catalog loaded");
        Ok(quizzes)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Gateway` if the quiz cannot be fetched.
    pub async fn get(&self, id: &QuizId) -> Result<Quiz, CatalogError> {
        Ok(self.gateway.get_quiz(id).await?)
    }
}
