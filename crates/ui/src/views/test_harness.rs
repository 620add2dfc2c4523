use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use gateway::{InMemoryGateway, QuizGateway};
use quiz_core::model::{ClassId, Difficulty, Question, Quiz, QuizDraft, QuizId, QuizStatus};
use quiz_core::time::fixed_now;
use services::{Clock, QuizCatalogService, QuizSessionService, ScriptedEnvironment};

use crate::context::{EnvironmentOverride, UiApp, build_app_context};
use crate::views::{HomeView, QuizView, ResultView};

#[derive(Clone)]
struct TestApp {
    catalog: Arc<QuizCatalogService>,
    sessions: Arc<QuizSessionService>,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Arc<QuizCatalogService> {
        Arc::clone(&self.catalog)
    }

    fn sessions(&self) -> Arc<QuizSessionService> {
        Arc::clone(&self.sessions)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz(String),
    Result { score: u32, total: u32 },
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    environment: ScriptedEnvironment,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    use_context_provider(|| EnvironmentOverride(Arc::new(props.environment.clone())));
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz(id) => rsx! { QuizView { id } },
        ViewKind::Result { score, total } => rsx! { ResultView { score, total } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub gateway: InMemoryGateway,
    pub environment: ScriptedEnvironment,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let pending futures and resources resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..5 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn sample_quiz(id: &str, heading: &str, status: QuizStatus) -> Quiz {
    QuizDraft {
        id: QuizId::new(id).expect("quiz id"),
        heading: heading.to_string(),
        topic: "Science".to_string(),
        difficulty: Difficulty::Medium,
        class_id: ClassId::new("5"),
        status,
        questions: vec![
            Question::new(
                "What do plants release?",
                vec!["Oxygen".into(), "Helium".into(), "Argon".into()],
                0,
                Some(Difficulty::Easy),
            )
            .expect("question"),
            Question::new("Boiling point of water?", vec!["50".into(), "100".into()], 1, None)
                .expect("question"),
        ],
    }
    .validate()
    .expect("quiz")
}

pub fn setup_view_harness(view: ViewKind, gateway: InMemoryGateway) -> ViewHarness {
    setup_view_harness_with_gateway(view, gateway.clone(), Arc::new(gateway))
}

/// `gateway` backs the services; `in_memory` is what the test inspects.
pub fn setup_view_harness_with_gateway(
    view: ViewKind,
    in_memory: InMemoryGateway,
    gateway: Arc<dyn QuizGateway>,
) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let app = Arc::new(TestApp {
        catalog: Arc::new(QuizCatalogService::new(Arc::clone(&gateway))),
        sessions: Arc::new(QuizSessionService::new(clock, gateway, 300)),
    });
    let environment = ScriptedEnvironment::new();

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            environment: environment.clone(),
        },
    );

    ViewHarness {
        dom,
        gateway: in_memory,
        environment,
    }
}
