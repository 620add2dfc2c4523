use std::sync::Arc;

use gateway::{HttpQuizGateway, QuizGateway};

use crate::catalog_service::QuizCatalogService;
use crate::config::QuizClientConfig;
use crate::error::AppServicesError;
use crate::sessions::QuizSessionService;
use crate::Clock;

/// Assembles app-facing services over one quiz gateway.
#[derive(Clone)]
pub struct AppServices {
    config: QuizClientConfig,
    catalog: Arc<QuizCatalogService>,
    sessions: Arc<QuizSessionService>,
}

impl AppServices {
    /// Build services backed by the quiz REST API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Gateway` if the base URL is invalid or the
    /// HTTP client cannot be built.
    pub fn from_config(config: &QuizClientConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let gateway = HttpQuizGateway::new(&config.api_base_url, config.http_timeout)?;
        tracing::info!(base_url = %gateway.base_url(), "quiz api configured");
        Ok(Self::with_gateway(config.clone(), clock, Arc::new(gateway)))
    }

    /// Build services over any gateway (in-memory for tests and offline runs).
    #[must_use]
    pub fn with_gateway(
        config: QuizClientConfig,
        clock: Clock,
        gateway: Arc<dyn QuizGateway>,
    ) -> Self {
        let catalog = Arc::new(QuizCatalogService::new(Arc::clone(&gateway)));
        let sessions = Arc::new(QuizSessionService::new(
            clock,
            gateway,
            config.time_budget_secs,
        ));
        Self {
            config,
            catalog,
            sessions,
        }
    }

    #[must_use]
    pub fn config(&self) -> &QuizClientConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<QuizCatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<QuizSessionService> {
        Arc::clone(&self.sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;

    #[test]
    fn from_config_rejects_bad_base_url() {
        let config = QuizClientConfig::default().with_api_base_url("not a url");
        let err = AppServices::from_config(&config, fixed_clock()).err().unwrap();
        assert!(matches!(err, AppServicesError::Gateway(_)));
    }

    #[test]
    fn sessions_use_configured_budget() {
        let config = QuizClientConfig::default()
            .with_time_budget_secs(90)
            .unwrap();
        let services = AppServices::from_config(&config, fixed_clock()).unwrap();
        assert_eq!(services.sessions().time_budget_secs(), 90);
        assert_eq!(services.config().api_base_url, "http://localhost:1000");
    }
}
