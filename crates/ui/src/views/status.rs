use dioxus::prelude::*;

/// Blinking status line shown while the quiz waits on the network.
#[component]
pub fn StatusView(text: String, show_progress: bool) -> Element {
    rsx! {
        div { class: "screen status",
            p { class: "blink", "{text}" }
            if show_progress {
                progress { class: "pixel-progress", value: "50", max: "100" }
            }
        }
    }
}
