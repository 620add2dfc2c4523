//! Shared error types for the services crate.

use thiserror::Error;

use gateway::GatewayError;
use quiz_core::session::SessionStartError;

/// Errors emitted while loading a quiz session.
///
/// Everything here is fatal to the attempt; nothing is retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("failed to load quiz: {0}")]
    Fetch(#[from] GatewayError),
    #[error(transparent)]
    Start(#[from] SessionStartError),
    #[error("session already initialized")]
    AlreadyInitialized,
}

/// Errors emitted by `QuizCatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Errors raised by a session environment (fullscreen control).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnvironmentError {
    #[error("fullscreen request rejected: {0}")]
    Rejected(String),
    #[error("presentation surface is no longer attached")]
    Detached,
}

/// Errors emitted while reading client configuration.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("time budget must be > 0 seconds")]
    ZeroTimeBudget,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
