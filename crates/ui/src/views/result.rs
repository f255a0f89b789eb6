use dioxus::prelude::*;

use crate::vm::ResultVm;

#[component]
pub fn ResultView(vm: ResultVm, on_retry: Callback<()>) -> Element {
    let (card_class, button_class) = if vm.passed {
        ("pixel-card dark", "pixel-btn success")
    } else {
        ("pixel-card", "pixel-btn danger")
    };
    let icon = if vm.passed { "🏆" } else { "✖" };

    rsx! {
        div { class: "screen result",
            div { class: "result-icon", "{icon}" }
            section { class: "{card_class}",
                h3 { class: "card-title", "{vm.heading}" }
                h2 { "{vm.score_line}" }
                p { class: "verdict", "{vm.message}" }

                if let Some(note) = vm.note.as_ref() {
                    p { class: "error", "Note: {note}" }
                }

                button {
                    class: "{button_class}",
                    onclick: move |_| on_retry.call(()),
                    "TRY AGAIN"
                }
            }
        }
    }
}
