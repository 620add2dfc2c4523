use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;
use crate::vm::ResultVm;

#[component]
pub fn ResultView(score: u32, total: u32) -> Element {
    let vm = ResultVm::new(score, total);

    rsx! {
        div { class: "page result-page",
            h2 { "Quiz result" }
            p { class: "result-percentage", "{vm.percentage}%" }
            p { "{vm.summary()}" }
            ul { class: "result-breakdown",
                li { "Correct: {vm.correct}" }
                li { "Incorrect: {vm.incorrect}" }
                li { "Total: {vm.total}" }
            }
            Link { to: Route::Home {}, "Back to catalog" }
        }
    }
}
