use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{HomeView, QuizView, ResultView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/result/:score/:total", ResultView)] QuizResult { score: u32, total: u32 },
    #[end_layout]
    #[route("/quiz/:id", QuizView)] Quiz { id: String },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            nav { class: "topbar",
                h1 { "Quizzes" }
                Link { to: Route::Home {}, "Catalog" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
