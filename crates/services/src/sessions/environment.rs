//! Seams between the session controller and the platform it runs on.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quiz_core::session::AttemptResult;
use tokio::sync::mpsc;

use crate::error::EnvironmentError;

/// Stream of fullscreen state changes (`true` = fullscreen active).
pub type FullscreenChanges = mpsc::UnboundedReceiver<bool>;

/// Fullscreen control and user notices, provided by the presentation surface.
pub trait SessionEnvironment: Send + Sync {
    /// Ask the surface to enter fullscreen. Best-effort.
    ///
    /// # Errors
    ///
    /// Returns `EnvironmentError` if the request cannot be issued.
    fn request_fullscreen(&self) -> Result<(), EnvironmentError>;

    /// Ask the surface to leave fullscreen. Best-effort.
    ///
    /// # Errors
    ///
    /// Returns `EnvironmentError` if the request cannot be issued.
    fn exit_fullscreen(&self) -> Result<(), EnvironmentError>;

    /// Subscribe to fullscreen state changes.
    fn on_fullscreen_change(&self) -> FullscreenChanges;

    /// Show a blocking notice to the user.
    fn show_notice(&self, message: &str);
}

/// Receives the single terminal event of an attempt.
pub trait Navigator: Send + Sync {
    fn navigate_to_result(&self, result: &AttemptResult);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fan-out of fullscreen changes to every live subscriber.
#[derive(Clone, Default)]
pub struct FullscreenSubscribers {
    senders: Arc<Mutex<Vec<mpsc::UnboundedSender<bool>>>>,
}

impl FullscreenSubscribers {
    #[must_use]
    pub fn subscribe(&self) -> FullscreenChanges {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.senders).push(tx);
        rx
    }

    /// Deliver `active` to every subscriber, dropping the ones that went away.
    pub fn publish(&self, active: bool) {
        lock(&self.senders).retain(|tx| tx.send(active).is_ok());
    }
}

//
// ─── SCRIPTED ENVIRONMENT ──────────────────────────────────────────────────────
//

/// Environment driven entirely from code, for tests and headless runs.
///
/// Entering/leaving fullscreen publishes the change the same way a real
/// surface would; `leave_fullscreen` simulates the user breaking out.
#[derive(Clone, Default)]
pub struct ScriptedEnvironment {
    subscribers: FullscreenSubscribers,
    fullscreen: Arc<AtomicBool>,
    reject_fullscreen: Arc<AtomicBool>,
    enter_requests: Arc<AtomicUsize>,
    exit_requests: Arc<AtomicUsize>,
    notices: Arc<Mutex<Vec<String>>>,
}

impl ScriptedEnvironment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `request_fullscreen` fail.
    pub fn set_reject_fullscreen(&self, reject: bool) {
        self.reject_fullscreen.store(reject, Ordering::SeqCst);
    }

    /// The user left fullscreen (e.g. pressed Escape).
    pub fn leave_fullscreen(&self) {
        if self.fullscreen.swap(false, Ordering::SeqCst) {
            self.subscribers.publish(false);
        }
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn enter_requests(&self) -> usize {
        self.enter_requests.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn exit_requests(&self) -> usize {
        self.exit_requests.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn notices(&self) -> Vec<String> {
        lock(&self.notices).clone()
    }
}

impl SessionEnvironment for ScriptedEnvironment {
    fn request_fullscreen(&self) -> Result<(), EnvironmentError> {
        self.enter_requests.fetch_add(1, Ordering::SeqCst);
        if self.reject_fullscreen.load(Ordering::SeqCst) {
            return Err(EnvironmentError::Rejected("scripted rejection".into()));
        }
        if !self.fullscreen.swap(true, Ordering::SeqCst) {
            self.subscribers.publish(true);
        }
        Ok(())
    }

    fn exit_fullscreen(&self) -> Result<(), EnvironmentError> {
        self.exit_requests.fetch_add(1, Ordering::SeqCst);
        if self.fullscreen.swap(false, Ordering::SeqCst) {
            self.subscribers.publish(false);
        }
        Ok(())
    }

    fn on_fullscreen_change(&self) -> FullscreenChanges {
        self.subscribers.subscribe()
    }

    fn show_notice(&self, message: &str) {
        lock(&self.notices).push(message.to_string());
    }
}

//
// ─── NAVIGATORS ────────────────────────────────────────────────────────────────
//

/// Navigator that remembers every result it was handed.
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    results: Arc<Mutex<Vec<AttemptResult>>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn results(&self) -> Vec<AttemptResult> {
        lock(&self.results).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to_result(&self, result: &AttemptResult) {
        lock(&self.results).push(result.clone());
    }
}

/// Navigator that forwards results over a channel to whoever owns routing.
#[derive(Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<AttemptResult>,
}

impl ChannelNavigator {
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AttemptResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate_to_result(&self, result: &AttemptResult) {
        if self.tx.send(result.clone()).is_err() {
            tracing::warn!(quiz_id = %result.quiz_id, "result dropped: router is gone");
        }
    }
}
