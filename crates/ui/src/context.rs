use std::sync::Arc;

use services::{QuizCatalogService, QuizSessionService, SessionEnvironment};

pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<QuizCatalogService>;
    fn sessions(&self) -> Arc<QuizSessionService>;
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<QuizCatalogService>,
    sessions: Arc<QuizSessionService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            sessions: app.sessions(),
        }
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

/// Replaces the webview fullscreen bridge for quiz attempts when provided as
/// context (headless runs, view tests).
#[derive(Clone)]
pub struct EnvironmentOverride(pub Arc<dyn SessionEnvironment>);

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
