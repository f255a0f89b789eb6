use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

/// The user's choice for one question.
///
/// Recorded once per question, in question order, and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub selected: String,
    pub correct: bool,
}

impl AnswerRecord {
    #[must_use]
    pub fn new(question_id: QuestionId, selected: impl Into<String>, correct: bool) -> Self {
        Self {
            question_id,
            selected: selected.into(),
            correct,
        }
    }
}
