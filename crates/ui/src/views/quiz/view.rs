use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::model::QuizId;
use services::{ChannelNavigator, SessionDriver, SessionEnvironment, SessionIntent};
use tokio::sync::{mpsc, watch};

use crate::context::{AppContext, EnvironmentOverride};
use crate::platform::WebviewEnvironment;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{OptionVm, QuizVm};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PagePhase {
    Loading,
    Running,
    Failed(ViewError),
    /// The attempt ended; waiting for the route change.
    Finished,
}

#[component]
pub fn QuizView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let environment_override = try_consume_context::<EnvironmentOverride>();

    let mut phase = use_signal(|| PagePhase::Loading);
    let mut vm = use_signal(|| None::<QuizVm>);
    let mut intents = use_signal(|| None::<mpsc::UnboundedSender<SessionIntent>>);

    use_future(move || {
        let sessions = ctx.sessions();
        let raw_id = id.clone();
        let environment_override = environment_override.clone();
        async move {
            let Ok(quiz_id) = QuizId::new(raw_id) else {
                phase.set(PagePhase::Failed(ViewError::LoadFailed));
                return;
            };

            let mut webview = None;
            let environment: Arc<dyn SessionEnvironment> = match environment_override {
                Some(EnvironmentOverride(environment)) => environment,
                None => {
                    let (environment, bridge) = WebviewEnvironment::new();
                    spawn(bridge.run());
                    webview = Some(environment.clone());
                    Arc::new(environment)
                }
            };
            let (result_navigator, mut results) = ChannelNavigator::new();

            let controller = match sessions
                .start(&quiz_id, environment, Arc::new(result_navigator))
                .await
            {
                Ok(controller) => controller,
                Err(err) => {
                    phase.set(PagePhase::Failed(ViewError::from(&err)));
                    return;
                }
            };

            let (intent_tx, intent_rx) = mpsc::unbounded_channel();
            let (views_tx, mut views_rx) = watch::channel(controller.view());
            intents.set(Some(intent_tx));
            vm.set(views_rx.borrow().as_ref().map(QuizVm::from_view));
            phase.set(PagePhase::Running);

            spawn(async move {
                SessionDriver::new(controller)
                    .run(intent_rx, views_tx)
                    .await;
            });

            while views_rx.changed().await.is_ok() {
                let next = views_rx.borrow_and_update().as_ref().map(QuizVm::from_view);
                if let Some(next) = next {
                    vm.set(Some(next));
                }
            }

            if let Ok(result) = results.try_recv() {
                phase.set(PagePhase::Finished);
                intents.set(None);
                // The fullscreen-exit notice must be dismissed before the page changes.
                if let Some(webview) = &webview {
                    webview.settled().await;
                }
                navigator.push(Route::QuizResult {
                    score: result.score,
                    total: result.total,
                });
            }
        }
    });

    let send = move |intent: SessionIntent| {
        if let Some(tx) = intents.read().as_ref() {
            let _ = tx.send(intent);
        }
    };

    let current_phase = phase();
    let current_vm = vm.read().clone();

    rsx! {
        div { class: "page quiz-page", id: "quiz-root",
            match (current_phase, current_vm) {
                (PagePhase::Failed(err), _) => rsx! {
                    div { class: "quiz-error",
                        p { "{err.message()}" }
                        button {
                            onclick: move |_| {
                                navigator.push(Route::Home {});
                            },
                            "Back to catalog"
                        }
                    }
                },
                (PagePhase::Finished, _) => rsx! {
                    p { "Quiz finished." }
                },
                (PagePhase::Running, Some(vm)) => rsx! {
                    QuizPanel { vm, on_intent: send }
                },
                _ => rsx! {
                    p { "Loading quiz..." }
                },
            }
        }
    }
}

#[component]
fn QuizPanel(vm: QuizVm, on_intent: EventHandler<SessionIntent>) -> Element {
    rsx! {
        header { class: "quiz-header",
            span { class: "quiz-heading", "Quiz: {vm.heading}" }
            span {
                class: if vm.time_up { "quiz-timer time-up" } else { "quiz-timer" },
                id: "quiz-timer",
                "{vm.timer_label}"
            }
        }
        div { class: "quiz-progress", style: "{vm.progress_style()}" }

        div { class: "quiz-badges",
            span { class: "badge", "Topic: {vm.topic}" }
            span { class: "badge", "Difficulty: {vm.difficulty_label}" }
            span { class: "badge", "{vm.position_label}" }
        }

        h2 { class: "quiz-question", "{vm.prompt}" }

        div { class: "quiz-options",
            for option in vm.options.clone() {
                OptionButton { key: "{option.index}", option, locked: vm.locked, on_intent }
            }
            if let Some(reveal) = vm.reveal.clone() {
                div { class: "quiz-reveal", "{reveal}" }
            }
        }

        div { class: "quiz-nav",
            button {
                id: "quiz-previous",
                disabled: !vm.can_previous,
                onclick: move |_| on_intent.call(SessionIntent::Previous),
                "Previous"
            }
            button {
                id: "quiz-end",
                class: "danger",
                onclick: move |_| on_intent.call(SessionIntent::End),
                "End quiz"
            }
            button {
                id: "quiz-next",
                disabled: !vm.can_next,
                onclick: move |_| on_intent.call(SessionIntent::Next),
                "Next"
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, locked: bool, on_intent: EventHandler<SessionIntent>) -> Element {
    let index = option.index;
    rsx! {
        button {
            class: option.state.class(),
            disabled: locked,
            onclick: move |_| on_intent.call(SessionIntent::SelectOption(index)),
            span { class: "option-letter", "{option.letter}" }
            "{option.text}"
        }
    }
}
