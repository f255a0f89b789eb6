use dioxus::prelude::*;

use crate::vm::GameVm;

#[component]
pub fn GameView(vm: GameVm, error: Option<String>, on_answer: Callback<String>) -> Element {
    rsx! {
        div { class: "screen game",
            div { class: "progress-row",
                progress { class: "pixel-progress", value: "{vm.number}", max: "{vm.total}" }
                span { class: "progress-text", "{vm.progress_text()}" }
            }

            section { class: "pixel-card",
                h3 { class: "card-title", "{vm.label}" }
                p { class: "question", "{vm.title}" }
                div { class: "options",
                    for (index, option) in vm.options.iter().cloned().enumerate() {
                        OptionButton { key: "{index}", option, on_choose: on_answer }
                    }
                }
            }

            if let Some(message) = error {
                p { class: "error", "{message}" }
            }

            p { class: "score", "Score: {vm.score}" }
        }
    }
}

#[component]
fn OptionButton(option: String, on_choose: Callback<String>) -> Element {
    let label = option.clone();
    rsx! {
        button {
            class: "pixel-btn",
            onclick: move |_| on_choose.call(option.clone()),
            "{label}"
        }
    }
}
