use std::sync::Arc;

use gateway::QuizGateway;
use quiz_core::model::QuizId;

use super::controller::QuizSessionController;
use super::environment::{Navigator, SessionEnvironment};
use crate::Clock;
use crate::error::SessionError;

/// Builds session controllers that share one gateway, clock and time budget.
#[derive(Clone)]
pub struct QuizSessionService {
    clock: Clock,
    gateway: Arc<dyn QuizGateway>,
    time_budget_secs: u32,
}

impl QuizSessionService {
    #[must_use]
    pub fn new(clock: Clock, gateway: Arc<dyn QuizGateway>, time_budget_secs: u32) -> Self {
        Self {
            clock,
            gateway,
            time_budget_secs,
        }
    }

    #[must_use]
    pub fn time_budget_secs(&self) -> u32 {
        self.time_budget_secs
    }

    /// A fresh controller in the `Loading` phase.
    #[must_use]
    pub fn controller(
        &self,
        environment: Arc<dyn SessionEnvironment>,
        navigator: Arc<dyn Navigator>,
    ) -> QuizSessionController {
        QuizSessionController::new(
            Arc::clone(&self.gateway),
            environment,
            navigator,
            self.clock,
            self.time_budget_secs,
        )
    }

    /// Build a controller and load `quiz_id` into it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the quiz cannot be loaded or started.
    pub async fn start(
        &self,
        quiz_id: &QuizId,
        environment: Arc<dyn SessionEnvironment>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<QuizSessionController, SessionError> {
        let mut controller = self.controller(environment, navigator);
        controller.initialize(quiz_id).await?;
        Ok(controller)
    }
}
