use std::sync::Arc;

use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{GameView, HomeView, ResultView, StatusView, use_session_snapshot};
use crate::vm::{Screen, map_game, map_home, map_result};

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Pixel Quiz" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                QuizScreens {}
            }
        }
    }
}

/// Renders the screen for the current session phase.
///
/// Intents are spawned in this scope. Phase views unmount while a fetch or
/// submit is still pending, and their tasks go with them.
#[component]
pub fn QuizScreens() -> Element {
    let quiz = use_context::<AppContext>().quiz();
    let snapshot = use_session_snapshot();
    let intent_error = use_signal(|| None::<String>);

    let on_start = use_callback({
        let quiz = Arc::clone(&quiz);
        move |user_id: String| {
            let mut intent_error = intent_error;
            intent_error.set(None);
            let quiz = Arc::clone(&quiz);
            spawn(async move {
                if let Err(err) = quiz.start(&user_id).await {
                    intent_error.set(Some(err.to_string()));
                }
            });
        }
    });

    let on_answer = use_callback({
        let quiz = Arc::clone(&quiz);
        move |option: String| {
            let mut intent_error = intent_error;
            let quiz = Arc::clone(&quiz);
            spawn(async move {
                match quiz.answer(&option).await {
                    Ok(_) => intent_error.set(None),
                    Err(err) => intent_error.set(Some(err.to_string())),
                }
            });
        }
    });

    let on_retry = use_callback(move |()| {
        let mut intent_error = intent_error;
        intent_error.set(None);
        quiz.reset();
    });

    let snapshot = snapshot();
    let screen = Screen::from(snapshot.phase);
    let error = intent_error();

    match screen {
        Screen::Home => rsx! {
            HomeView { vm: map_home(&snapshot), error, on_start }
        },
        Screen::Game => match map_game(&snapshot) {
            Some(vm) => rsx! { GameView { vm, error, on_answer } },
            None => rsx! { StatusView { text: "LOADING QUESTION...".to_string(), show_progress: false } },
        },
        Screen::Result => match map_result(&snapshot) {
            Some(vm) => rsx! { ResultView { vm, on_retry } },
            None => rsx! { StatusView { text: "SAVING SCORE...".to_string(), show_progress: false } },
        },
        Screen::Loading | Screen::Saving => {
            let text = screen.status_text().unwrap_or_default().to_string();
            rsx! {
                StatusView { text, show_progress: screen == Screen::Loading }
            }
        }
    }
}
