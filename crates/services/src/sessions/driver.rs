use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};

use super::controller::{QuizSessionController, SessionIntent};
use super::environment::FullscreenChanges;
use super::view::QuizSessionView;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Event loop multiplexing the countdown, fullscreen changes and user intents
/// into a single controller.
///
/// The loop publishes a fresh view after every event and returns the
/// controller once the attempt is no longer active. The interval lives inside
/// `run`, so no tick can fire after termination.
pub struct SessionDriver {
    controller: QuizSessionController,
    tick_period: Duration,
}

impl SessionDriver {
    #[must_use]
    pub fn new(controller: QuizSessionController) -> Self {
        Self {
            controller,
            tick_period: TICK_PERIOD,
        }
    }

    #[must_use]
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    /// Drive the attempt until it ends or the presentation goes away.
    ///
    /// A closed `intents` channel stops the loop without ending the attempt.
    pub async fn run(
        mut self,
        mut intents: mpsc::UnboundedReceiver<SessionIntent>,
        views: watch::Sender<Option<QuizSessionView>>,
    ) -> QuizSessionController {
        let mut fullscreen: Option<FullscreenChanges> = self.controller.take_fullscreen_changes();
        let mut ticker = time::interval_at(Instant::now() + self.tick_period, self.tick_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        views.send_replace(self.controller.view());

        while self.controller.is_active() {
            tokio::select! {
                biased;

                change = next_change(&mut fullscreen) => match change {
                    Some(active) => {
                        self.controller.fullscreen_changed(active);
                    }
                    None => {
                        tracing::debug!("fullscreen notifications closed");
                        fullscreen = None;
                    }
                },
                intent = intents.recv() => match intent {
                    Some(intent) => {
                        self.controller.dispatch(intent);
                    }
                    None => {
                        tracing::debug!("presentation detached; leaving attempt open");
                        break;
                    }
                },
                _ = ticker.tick() => {
                    self.controller.tick();
                }
            }

            views.send_replace(self.controller.view());
        }

        self.controller
    }
}

async fn next_change(changes: &mut Option<FullscreenChanges>) -> Option<bool> {
    match changes {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
