use quiz_core::model::{Phase, SessionSnapshot};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub passed: bool,
    pub heading: &'static str,
    pub score_line: String,
    pub message: &'static str,
    /// Non-fatal note, e.g. the score could not be saved online.
    pub note: Option<String>,
}

/// `None` until the session is finished. Pass/fail is recomputed from the
/// session rules rather than trusted from the submit step.
#[must_use]
pub fn map_result(snapshot: &SessionSnapshot) -> Option<ResultVm> {
    if snapshot.phase != Phase::Finished {
        return None;
    }
    let result = snapshot.result()?;

    let (heading, message) = if result.passed {
        (
            "MISSION COMPLETE",
            "Congratulations! You have proven your worth.",
        )
    } else {
        ("GAME OVER", "The Master is unimpressed. Train harder!")
    };

    Some(ResultVm {
        passed: result.passed,
        heading,
        score_line: format!("Score: {} / {}", result.score, result.total),
        message,
        note: snapshot.last_error.clone(),
    })
}
