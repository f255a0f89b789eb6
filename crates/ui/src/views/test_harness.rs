use std::any::Any;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use dioxus::core::{ElementId, Event, Mutation, Mutations};
use dioxus::prelude::*;
use dioxus_html::{
    Code, Key, Location, Modifiers, PlatformEventData, SerializedFormData,
    SerializedHtmlEventConverter, SerializedKeyboardData, SerializedMouseData,
};
use quiz_core::model::{Phase, QuizRules};
use services::{
    MockQuestionSource, MockScoreSubmitter, QuestionSource, QuizService, ScoreSubmitter,
};

use crate::app::QuizScreens;
use crate::context::{UiApp, build_app_context};

struct TestApp {
    quiz: Arc<QuizService>,
}

impl UiApp for TestApp {
    fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    fn endpoint_label(&self) -> String {
        "offline".to_string()
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ScreensHarness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(app));
    rsx! { QuizScreens {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub quiz: Arc<QuizService>,
    listeners: Vec<(String, ElementId)>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        let mut mutations = Mutations::default();
        self.dom.rebuild(&mut mutations);
        self.record(mutations);
        self.drive_dom();
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.drive_dom();
    }

    /// Drives the dom until the session reaches `phase`, then lets the screen catch up.
    pub async fn drive_until(&mut self, phase: Phase, limit: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + limit;
        while self.quiz.snapshot().phase != phase {
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            self.drive_async().await;
        }
        for _ in 0..3 {
            self.drive_async().await;
        }
        true
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Clicks the `nth` element with a click listener on the current screen.
    pub fn click(&mut self, nth: usize) {
        self.dispatch("click", nth, SerializedMouseData::default());
    }

    pub fn type_text(&mut self, text: &str) {
        self.dispatch("input", 0, SerializedFormData::new(text.to_string(), Vec::new()));
    }

    pub fn press_enter(&mut self) {
        let key = SerializedKeyboardData::new(
            Key::Enter,
            Code::Enter,
            Location::Standard,
            false,
            Modifiers::empty(),
            false,
        );
        self.dispatch("keydown", 0, key);
    }

    fn dispatch(&mut self, name: &str, nth: usize, data: impl Any) {
        let id = self
            .listeners
            .iter()
            .filter(|(listener, _)| listener == name)
            .map(|(_, id)| *id)
            .nth(nth)
            .unwrap_or_else(|| panic!("no {name} listener #{nth} on screen"));
        let data: Rc<dyn Any> = Rc::new(PlatformEventData::new(Box::new(data)));
        self.dom
            .runtime()
            .handle_event(name, Event::new(data, true), id);
        self.drive_dom();
    }

    fn drive_dom(&mut self) {
        self.dom.process_events();
        let mut mutations = Mutations::default();
        self.dom.render_immediate(&mut mutations);
        self.record(mutations);
        self.dom.process_events();
    }

    // A screen switch recreates every listener in one batch. Attribute and
    // text patches carry none, so the previous set stays valid.
    fn record(&mut self, mutations: Mutations) {
        let listeners: Vec<_> = mutations
            .edits
            .into_iter()
            .filter_map(|edit| match edit {
                Mutation::NewEventListener { name, id } => Some((name, id)),
                _ => None,
            })
            .collect();
        if !listeners.is_empty() {
            self.listeners = listeners;
        }
    }
}

/// Offline quiz with no simulated delay.
pub fn offline_quiz(count: u32, threshold: u32) -> Arc<QuizService> {
    quiz_with_submitter(count, threshold, Arc::new(MockScoreSubmitter::default()))
}

pub fn quiz_with_submitter(
    count: u32,
    threshold: u32,
    submitter: Arc<dyn ScoreSubmitter>,
) -> Arc<QuizService> {
    quiz_with_ports(
        count,
        threshold,
        Arc::new(MockQuestionSource::builtin(Duration::ZERO)),
        submitter,
    )
}

/// Offline quiz whose fetch and submit both take `delay`.
pub fn delayed_quiz(count: u32, threshold: u32, delay: Duration) -> Arc<QuizService> {
    quiz_with_ports(
        count,
        threshold,
        Arc::new(MockQuestionSource::builtin(delay)),
        Arc::new(MockScoreSubmitter::new(delay)),
    )
}

fn quiz_with_ports(
    count: u32,
    threshold: u32,
    source: Arc<dyn QuestionSource>,
    submitter: Arc<dyn ScoreSubmitter>,
) -> Arc<QuizService> {
    let rules = QuizRules::new(NonZeroU32::new(count).expect("non-zero count"), threshold);
    Arc::new(QuizService::new(rules, source, submitter))
}

pub fn setup_view_harness(quiz: Arc<QuizService>) -> ViewHarness {
    dioxus_html::set_event_converter(Box::new(SerializedHtmlEventConverter));
    let app = Arc::new(TestApp {
        quiz: Arc::clone(&quiz),
    });
    let dom = VirtualDom::new_with_props(ScreensHarness, HarnessProps { app });
    ViewHarness {
        dom,
        quiz,
        listeners: Vec::new(),
    }
}
