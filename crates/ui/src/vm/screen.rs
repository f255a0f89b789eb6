use quiz_core::model::Phase;

/// Which screen a phase is rendered as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    Loading,
    Game,
    Saving,
    Result,
}

impl From<Phase> for Screen {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Idle => Screen::Home,
            Phase::Loading => Screen::Loading,
            Phase::Playing => Screen::Game,
            Phase::Saving => Screen::Saving,
            Phase::Finished => Screen::Result,
        }
    }
}

impl Screen {
    /// Status line for the transitional screens.
    #[must_use]
    pub fn status_text(self) -> Option<&'static str> {
        match self {
            Screen::Loading => Some("LOADING DATA..."),
            Screen::Saving => Some("SAVING SCORE..."),
            Screen::Home | Screen::Game | Screen::Result => None,
        }
    }
}
