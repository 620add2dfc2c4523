mod controller;
mod driver;
mod environment;
mod service;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::{FULLSCREEN_EXIT_NOTICE, QuizSessionController, SessionIntent, SessionPhase};
pub use driver::{SessionDriver, TICK_PERIOD};
pub use environment::{
    ChannelNavigator, FullscreenChanges, FullscreenSubscribers, Navigator, RecordingNavigator,
    ScriptedEnvironment, SessionEnvironment,
};
pub use service::QuizSessionService;
pub use view::QuizSessionView;
