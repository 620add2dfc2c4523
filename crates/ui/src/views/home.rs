use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::catalog::{QuizFilter, StatusFilter};
use quiz_core::model::QuizStatus;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::quiz::scripts::REQUEST_FULLSCREEN_JS;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizCardVm, map_quiz_cards};

#[derive(Clone, Debug, PartialEq)]
struct CatalogData {
    cards: Vec<QuizCardVm>,
}

fn status_filter_label(filter: StatusFilter) -> &'static str {
    match filter {
        StatusFilter::All => "All",
        StatusFilter::Only(status) => status.label(),
    }
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let mut status = use_signal(StatusFilter::default);
    let mut query = use_signal(String::new);

    let mut resource = use_resource(move || {
        let catalog = catalog.clone();
        let filter = QuizFilter::default()
            .with_status(status())
            .with_query(query());
        async move {
            let quizzes = catalog.list(&filter).await.map_err(ViewError::from)?;
            Ok(CatalogData {
                cards: map_quiz_cards(&quizzes),
            })
        }
    });

    let state = view_state_from_resource(&resource);
    let filters = std::iter::once(StatusFilter::All)
        .chain(QuizStatus::ALL.into_iter().map(StatusFilter::Only));

    rsx! {
        div { class: "page catalog-page",
            h2 { "Quiz catalog" }

            div { class: "catalog-controls",
                input {
                    id: "catalog-search",
                    r#type: "search",
                    placeholder: "Search by heading or topic",
                    value: "{query}",
                    oninput: move |evt| query.set(evt.value()),
                }
                div { class: "status-filters",
                    for filter in filters {
                        button {
                            class: if status() == filter { "filter active" } else { "filter" },
                            onclick: move |_| status.set(filter),
                            "{status_filter_label(filter)}"
                        }
                    }
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading quizzes..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.cards.is_empty() {
                        p { class: "empty", "No quizzes found" }
                    } else {
                        ul { class: "quiz-cards",
                            for card in data.cards {
                                QuizCard { key: "{card.id}", card }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button { onclick: move |_| resource.restart(), "Retry" }
                },
            }
        }
    }
}

#[component]
fn QuizCard(card: QuizCardVm) -> Element {
    rsx! {
        li { class: "quiz-card",
            div { class: "quiz-card-header",
                span { class: "quiz-topic", "{card.topic}" }
                span { class: "quiz-status", "{card.status_label}" }
            }
            h3 { "{card.heading}" }
            p { class: "quiz-meta",
                "Difficulty: {card.difficulty_label} | {card.question_count_label()}"
            }
            if card.can_start {
                Link {
                    class: "quiz-start",
                    to: Route::Quiz { id: card.id.clone() },
                    // Fullscreen requests must come from a user gesture.
                    onclick: move |_| {
                        let _ = eval(REQUEST_FULLSCREEN_JS);
                    },
                    "Take quiz"
                }
            }
        }
    }
}
