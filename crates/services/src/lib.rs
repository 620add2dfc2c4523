#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod config;
pub mod error;
pub mod sessions;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use catalog_service::QuizCatalogService;
pub use config::QuizClientConfig;
pub use error::{AppServicesError, CatalogError, ConfigError, EnvironmentError, SessionError};

pub use sessions::{
    ChannelNavigator, FULLSCREEN_EXIT_NOTICE, FullscreenChanges, FullscreenSubscribers, Navigator,
    QuizSessionController, QuizSessionService, QuizSessionView, RecordingNavigator,
    ScriptedEnvironment, SessionDriver, SessionEnvironment, SessionIntent, SessionPhase,
};
