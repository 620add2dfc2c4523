use std::sync::Arc;

use gateway::QuizGateway;
use quiz_core::model::{Quiz, QuizId, QuizStatus};
use quiz_core::session::{AttemptResult, EndReason, QuizSession, Selection};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::environment::{FullscreenChanges, Navigator, SessionEnvironment};
use super::view::QuizSessionView;
use crate::Clock;
use crate::error::SessionError;

/// Notice shown before an attempt is cut short by leaving fullscreen.
pub const FULLSCREEN_EXIT_NOTICE: &str = "You exited fullscreen mode. The quiz will now end.";

/// Coarse lifecycle of a controller, for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Active,
    Terminating,
    Terminated,
    LoadFailed,
}

/// Commands the presentation surface sends to a running attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionIntent {
    SelectOption(usize),
    Next,
    Previous,
    End,
}

struct ActiveSession {
    quiz: Quiz,
    session: QuizSession,
    fullscreen_active: bool,
}

enum State {
    Loading,
    Active(Box<ActiveSession>),
    Terminating,
    Terminated(AttemptResult),
    LoadFailed,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Owns one quiz attempt from loading to the result hand-off.
///
/// The controller is single-owner: timer ticks, fullscreen notifications and
/// user intents are all fed through `&mut self`, so a termination can never
/// interleave with another event. `end_session` moves the state out of
/// `Active` before doing any side effect, which makes it idempotent.
pub struct QuizSessionController {
    gateway: Arc<dyn QuizGateway>,
    environment: Arc<dyn SessionEnvironment>,
    navigator: Arc<dyn Navigator>,
    clock: Clock,
    time_budget_secs: u32,
    state: State,
    fullscreen_changes: Option<FullscreenChanges>,
    submission: Option<JoinHandle<()>>,
}

impl QuizSessionController {
    #[must_use]
    pub fn new(
        gateway: Arc<dyn QuizGateway>,
        environment: Arc<dyn SessionEnvironment>,
        navigator: Arc<dyn Navigator>,
        clock: Clock,
        time_budget_secs: u32,
    ) -> Self {
        Self {
            gateway,
            environment,
            navigator,
            clock,
            time_budget_secs,
            state: State::Loading,
            fullscreen_changes: None,
            submission: None,
        }
    }

    /// Load the quiz and start the attempt.
    ///
    /// Fullscreen is requested once the questions are in place; a refused
    /// request is logged and the attempt continues windowed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Fetch` if the quiz cannot be loaded,
    /// `SessionError::Start` if it has no questions, and
    /// `SessionError::AlreadyInitialized` on a second call.
    pub async fn initialize(&mut self, quiz_id: &QuizId) -> Result<(), SessionError> {
        if !matches!(self.state, State::Loading) {
            return Err(SessionError::AlreadyInitialized);
        }

        let quiz = match self.gateway.get_quiz(quiz_id).await {
            Ok(quiz) => quiz,
            Err(error) => {
                tracing::warn!(%quiz_id, %error, "quiz failed to load");
                self.state = State::LoadFailed;
                return Err(error.into());
            }
        };

        let session = match QuizSession::new(&quiz, self.time_budget_secs, self.clock.now()) {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!(%quiz_id, %error, "quiz cannot be started");
                self.state = State::LoadFailed;
                return Err(error.into());
            }
        };

        // Subscribe before requesting so the resulting change is not missed.
        self.fullscreen_changes = Some(self.environment.on_fullscreen_change());
        let fullscreen_active = match self.environment.request_fullscreen() {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(%quiz_id, %error, "fullscreen request failed");
                false
            }
        };

        tracing::info!(
            %quiz_id,
            questions = session.total_questions(),
            time_budget_secs = self.time_budget_secs,
            "quiz session started"
        );
        self.state = State::Active(Box::new(ActiveSession {
            quiz,
            session,
            fullscreen_active,
        }));
        Ok(())
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match self.state {
            State::Loading => SessionPhase::Loading,
            State::Active(_) => SessionPhase::Active,
            State::Terminating => SessionPhase::Terminating,
            State::Terminated(_) => SessionPhase::Terminated,
            State::LoadFailed => SessionPhase::LoadFailed,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active(_))
    }

    /// The running attempt, if any.
    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.state {
            State::Active(active) => Some(&active.session),
            _ => None,
        }
    }

    /// Final result once the attempt has ended.
    #[must_use]
    pub fn result(&self) -> Option<&AttemptResult> {
        match &self.state {
            State::Terminated(result) => Some(result),
            _ => None,
        }
    }

    /// Hand the fullscreen subscription to whoever drives the event loop.
    pub fn take_fullscreen_changes(&mut self) -> Option<FullscreenChanges> {
        self.fullscreen_changes.take()
    }

    /// Render-ready snapshot; `None` unless the attempt is running.
    #[must_use]
    pub fn view(&self) -> Option<QuizSessionView> {
        match &self.state {
            State::Active(active) => Some(QuizSessionView::build(
                SessionPhase::Active,
                &active.quiz,
                &active.session,
            )),
            _ => None,
        }
    }

    //
    // ─── EVENTS ────────────────────────────────────────────────────────────────
    //

    /// One second elapsed. Returns the remaining time while the attempt runs.
    pub fn tick(&mut self) -> Option<u32> {
        let State::Active(active) = &mut self.state else {
            return None;
        };
        let remaining = active.session.tick();
        if remaining == 0 {
            tracing::debug!(quiz_id = %active.session.quiz_id(), "time budget exhausted");
        }
        Some(remaining)
    }

    /// Answer the current question. Returns `true` if the answer was locked.
    pub fn select_option(&mut self, option: usize) -> bool {
        let State::Active(active) = &mut self.state else {
            return false;
        };
        match active.session.select_option(option) {
            Selection::Locked(answer) => {
                tracing::debug!(
                    question = active.session.current_index(),
                    option,
                    correct = answer.correct,
                    "answer locked"
                );
                true
            }
            Selection::AlreadyLocked | Selection::OutOfRange => false,
        }
    }

    pub fn next(&mut self) -> bool {
        match &mut self.state {
            State::Active(active) => active.session.next(),
            _ => false,
        }
    }

    pub fn previous(&mut self) -> bool {
        match &mut self.state {
            State::Active(active) => active.session.previous(),
            _ => false,
        }
    }

    /// React to a fullscreen state change reported by the environment.
    ///
    /// Only a drop out of an active fullscreen ends the attempt.
    pub fn fullscreen_changed(&mut self, active: bool) -> Option<AttemptResult> {
        let State::Active(running) = &mut self.state else {
            tracing::debug!(active, "fullscreen change ignored outside an active attempt");
            return None;
        };
        let was_active = std::mem::replace(&mut running.fullscreen_active, active);
        if !(was_active && !active) {
            return None;
        }

        tracing::info!(quiz_id = %running.session.quiz_id(), "fullscreen left during attempt");
        self.environment.show_notice(FULLSCREEN_EXIT_NOTICE);
        self.end_session(EndReason::FullscreenExit)
    }

    /// Apply one intent from the presentation surface.
    pub fn dispatch(&mut self, intent: SessionIntent) -> Option<AttemptResult> {
        match intent {
            SessionIntent::SelectOption(option) => {
                self.select_option(option);
                None
            }
            SessionIntent::Next => {
                self.next();
                None
            }
            SessionIntent::Previous => {
                self.previous();
                None
            }
            SessionIntent::End => self.end_session(EndReason::Explicit),
        }
    }

    /// End the attempt. Only the first call while active has any effect.
    ///
    /// Leaves fullscreen, dispatches the completion update without waiting
    /// for it, then hands the result to the navigator.
    pub fn end_session(&mut self, reason: EndReason) -> Option<AttemptResult> {
        if !self.is_active() {
            tracing::debug!(reason = reason.as_str(), "end_session ignored");
            return None;
        }
        let State::Active(active) = std::mem::replace(&mut self.state, State::Terminating) else {
            return None;
        };

        if let Err(error) = self.environment.exit_fullscreen() {
            tracing::warn!(%error, "failed to leave fullscreen");
        }

        let result = active.session.finish(reason, self.clock.now());
        tracing::info!(
            quiz_id = %result.quiz_id,
            score = result.score,
            total = result.total,
            reason = reason.as_str(),
            "quiz session ended"
        );

        self.submission = self.spawn_submission(active.quiz.with_status(QuizStatus::Completed));
        self.navigator.navigate_to_result(&result);
        self.state = State::Terminated(result.clone());
        Some(result)
    }

    fn spawn_submission(&self, quiz: Quiz) -> Option<JoinHandle<()>> {
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!(quiz_id = %quiz.id(), "no async runtime; completion not submitted");
            return None;
        };
        let gateway = Arc::clone(&self.gateway);
        Some(handle.spawn(async move {
            match gateway.update_quiz(&quiz).await {
                Ok(()) => tracing::debug!(quiz_id = %quiz.id(), "completion submitted"),
                Err(error) => {
                    tracing::warn!(quiz_id = %quiz.id(), %error, "failed to submit completion");
                }
            }
        }))
    }

    /// Wait for the detached completion update, if one was dispatched.
    pub async fn wait_for_submission(&mut self) {
        if let Some(task) = self.submission.take() {
            if let Err(error) = task.await {
                tracing::warn!(%error, "submission task did not finish");
            }
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
