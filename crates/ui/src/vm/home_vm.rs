use quiz_core::model::SessionSnapshot;

pub const EMPTY_ID_PROMPT: &str = "Please enter an ID to start!";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HomeVm {
    /// Last identifier used, kept across resets to prefill the input.
    pub user_id: String,
    pub error: Option<String>,
}

#[must_use]
pub fn map_home(snapshot: &SessionSnapshot) -> HomeVm {
    HomeVm {
        user_id: snapshot.user_id.clone(),
        error: snapshot.last_error.clone(),
    }
}

/// Trimmed identifier, or `None` when nothing usable was typed.
#[must_use]
pub fn parse_user_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
