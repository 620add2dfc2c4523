//! Fullscreen and notices for the desktop webview.
//!
//! `WebviewEnvironment` is the thread-safe half handed to the session
//! controller. It only queues commands; `WebviewBridge::run` executes them as
//! document scripts from inside the page that owns the attempt and feeds the
//! document's fullscreen changes back to subscribers.
//!
//! Commands run strictly in order, and a notice holds the queue until the user
//! dismisses it. `WebviewEnvironment::settled` lets the page wait for that
//! before it leaves.

use dioxus::document::eval;
use services::{EnvironmentError, FullscreenChanges, FullscreenSubscribers, SessionEnvironment};
use tokio::sync::{mpsc, oneshot};

use crate::views::quiz::scripts::{
    EXIT_FULLSCREEN_JS, FULLSCREEN_WATCH_JS, REQUEST_FULLSCREEN_JS, notice_script,
};

#[derive(Debug)]
pub enum SurfaceCommand {
    EnterFullscreen,
    ExitFullscreen,
    Notice(String),
    /// Answered once every earlier command has been applied.
    Settle(oneshot::Sender<()>),
}

#[derive(Clone)]
pub struct WebviewEnvironment {
    commands: mpsc::UnboundedSender<SurfaceCommand>,
    subscribers: FullscreenSubscribers,
}

pub struct WebviewBridge {
    commands: mpsc::UnboundedReceiver<SurfaceCommand>,
    subscribers: FullscreenSubscribers,
}

impl WebviewEnvironment {
    #[must_use]
    pub fn new() -> (Self, WebviewBridge) {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscribers = FullscreenSubscribers::default();
        (
            Self {
                commands: tx,
                subscribers: subscribers.clone(),
            },
            WebviewBridge {
                commands: rx,
                subscribers,
            },
        )
    }

    /// Wait until every command queued so far has run, including the user
    /// dismissing any notice. Returns at once when the bridge is gone.
    pub async fn settled(&self) {
        let (done, settled) = oneshot::channel();
        if self.send(SurfaceCommand::Settle(done)).is_ok() {
            let _ = settled.await;
        }
    }

    fn send(&self, command: SurfaceCommand) -> Result<(), EnvironmentError> {
        self.commands
            .send(command)
            .map_err(|_| EnvironmentError::Detached)
    }
}

impl SessionEnvironment for WebviewEnvironment {
    fn request_fullscreen(&self) -> Result<(), EnvironmentError> {
        self.send(SurfaceCommand::EnterFullscreen)
    }

    fn exit_fullscreen(&self) -> Result<(), EnvironmentError> {
        self.send(SurfaceCommand::ExitFullscreen)
    }

    fn on_fullscreen_change(&self) -> FullscreenChanges {
        self.subscribers.subscribe()
    }

    fn show_notice(&self, message: &str) {
        if self.send(SurfaceCommand::Notice(message.to_owned())).is_err() {
            tracing::warn!(message, "notice dropped: page is gone");
        }
    }
}

impl WebviewBridge {
    /// Execute queued commands until every `WebviewEnvironment` is dropped.
    ///
    /// Must be spawned from a component so document scripts have a target.
    pub async fn run(mut self) {
        let mut watcher = eval(FULLSCREEN_WATCH_JS);
        let mut watching = true;

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => apply(command).await,
                    None => break,
                },
                change = watcher.recv::<bool>(), if watching => match change {
                    Ok(active) => self.subscribers.publish(active),
                    Err(error) => {
                        tracing::warn!(?error, "fullscreen watcher stopped");
                        watching = false;
                    }
                },
            }
        }

        // Any value releases the document listeners.
        let _ = watcher.send(true);
    }
}

async fn apply(command: SurfaceCommand) {
    tracing::debug!(?command, "applying surface command");
    match command {
        SurfaceCommand::EnterFullscreen => {
            let _ = eval(REQUEST_FULLSCREEN_JS);
        }
        SurfaceCommand::ExitFullscreen => {
            let _ = eval(EXIT_FULLSCREEN_JS);
        }
        SurfaceCommand::Notice(message) => {
            let mut notice = eval(&notice_script(&message));
            if let Err(error) = notice.recv::<bool>().await {
                tracing::warn!(?error, "notice was not acknowledged");
            }
        }
        SurfaceCommand::Settle(done) => {
            let _ = done.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_queue_until_bridge_runs() {
        let (env, mut bridge) = WebviewEnvironment::new();
        env.request_fullscreen().unwrap();
        env.show_notice("hi");
        env.exit_fullscreen().unwrap();

        assert!(matches!(
            bridge.commands.try_recv(),
            Ok(SurfaceCommand::EnterFullscreen)
        ));
        assert!(matches!(
            bridge.commands.try_recv(),
            Ok(SurfaceCommand::Notice(message)) if message == "hi"
        ));
        assert!(matches!(
            bridge.commands.try_recv(),
            Ok(SurfaceCommand::ExitFullscreen)
        ));
    }

    #[tokio::test]
    async fn settled_waits_for_commands_queued_before_it() {
        let (env, mut bridge) = WebviewEnvironment::new();
        env.show_notice("bye");

        let waiter = tokio::spawn({
            let env = env.clone();
            async move { env.settled().await }
        });

        assert!(matches!(
            bridge.commands.recv().await,
            Some(SurfaceCommand::Notice(_))
        ));
        let Some(SurfaceCommand::Settle(done)) = bridge.commands.recv().await else {
            panic!("expected a settle request after the notice");
        };
        assert!(!waiter.is_finished());
        done.send(()).unwrap();
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn settled_returns_when_bridge_is_gone() {
        let (env, bridge) = WebviewEnvironment::new();
        drop(bridge);
        env.settled().await;
    }

    #[test]
    fn detached_bridge_rejects_requests() {
        let (env, bridge) = WebviewEnvironment::new();
        drop(bridge);
        assert!(matches!(
            env.request_fullscreen(),
            Err(EnvironmentError::Detached)
        ));
    }

    #[test]
    fn changes_reach_subscribers() {
        let (env, bridge) = WebviewEnvironment::new();
        let mut changes = env.on_fullscreen_change();
        bridge.subscribers.publish(false);
        assert_eq!(changes.try_recv(), Ok(false));
    }
}
