use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::{EMPTY_ID_PROMPT, HomeVm, parse_user_id};

#[component]
pub fn HomeView(vm: HomeVm, error: Option<String>, on_start: Callback<String>) -> Element {
    let ctx = use_context::<AppContext>();
    let footer = format!("QUESTIONS FROM: {}", ctx.endpoint_label());

    let mut input = use_signal(|| vm.user_id.clone());
    let notice = use_signal(|| None::<String>);

    let submit = use_callback(move |()| {
        let mut notice = notice;
        match parse_user_id(&input()) {
            Some(user_id) => {
                notice.set(None);
                on_start.call(user_id);
            }
            None => notice.set(Some(EMPTY_ID_PROMPT.to_string())),
        }
    });

    // A local validation notice wins over intent and session errors.
    let error = notice().or(error).or(vm.error);

    rsx! {
        div { class: "screen home",
            div { class: "stars", "★ ★ ★" }
            h1 { "PIXEL QUIZ" }
            p { "Enter your ID to challenge the master!" }

            input {
                class: "pixel-input",
                r#type: "text",
                placeholder: "Enter ID...",
                value: "{input}",
                oninput: move |evt| input.set(evt.value()),
                onkeydown: move |evt: KeyboardEvent| {
                    if evt.key() == Key::Enter {
                        submit.call(());
                    }
                },
            }

            if let Some(message) = error {
                p { class: "error", "{message}" }
            }

            button {
                class: "pixel-btn primary",
                r#type: "button",
                onclick: move |_| submit.call(()),
                "PRESS START"
            }

            p { class: "footer", "{footer}" }
        }
    }
}
