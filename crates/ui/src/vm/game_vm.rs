use quiz_core::model::SessionSnapshot;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameVm {
    /// 1-based number of the current question.
    pub number: usize,
    pub total: usize,
    pub label: String,
    pub title: String,
    pub options: Vec<String>,
    pub score: u32,
}

impl GameVm {
    #[must_use]
    pub fn progress_text(&self) -> String {
        format!("{}/{}", self.number, self.total)
    }
}

/// `None` unless a question is awaiting an answer.
#[must_use]
pub fn map_game(snapshot: &SessionSnapshot) -> Option<GameVm> {
    let question = snapshot.current_question()?;
    let number = snapshot.current_index + 1;
    Some(GameVm {
        number,
        total: snapshot.total(),
        label: format!("Q{number}: The Master Asks"),
        title: question.title().to_string(),
        options: question.options().to_vec(),
        score: snapshot.score,
    })
}
