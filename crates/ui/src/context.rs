use std::sync::Arc;

use services::QuizService;

pub trait UiApp: Send + Sync {
    fn quiz(&self) -> Arc<QuizService>;

    /// Shown in the footer, e.g. "offline" or the endpoint host.
    fn endpoint_label(&self) -> String;
}

#[derive(Clone)]
pub struct AppContext {
    quiz: Arc<QuizService>,
    endpoint_label: String,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz: app.quiz(),
            endpoint_label: app.endpoint_label(),
        }
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn endpoint_label(&self) -> &str {
        &self.endpoint_label
    }
}

// Provided by the composition root in `crates/app`.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: Arc<dyn UiApp>) -> AppContext {
    AppContext::new(&app)
}
