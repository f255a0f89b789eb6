use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Minimum number of options a multiple-choice question must offer.
pub const MIN_OPTIONS: usize = 2;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has an empty title")]
    EmptyTitle { id: QuestionId },

    #[error("question {id} needs at least {min} options, got {len}", min = MIN_OPTIONS)]
    TooFewOptions { id: QuestionId, len: usize },

    #[error("question {id}: answer {answer:?} is not one of the options")]
    AnswerNotAnOption { id: QuestionId, answer: String },

    #[error("question {id}: answer {answer:?} appears {count} times among the options")]
    AmbiguousAnswer {
        id: QuestionId,
        answer: String,
        count: usize,
    },
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// Always holds a non-empty title, at least two options, and an answer that
/// matches exactly one option. Deserialization runs the same checks as
/// [`Question::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionWire")]
pub struct Question {
    id: QuestionId,
    title: String,
    options: Vec<String>,
    answer: String,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the title is blank, fewer than two options are
    /// given, or the answer does not match exactly one option.
    pub fn new(
        id: QuestionId,
        title: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let title = title.into();
        let answer = answer.into();

        if title.trim().is_empty() {
            return Err(QuestionError::EmptyTitle { id });
        }
        if options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions {
                id,
                len: options.len(),
            });
        }
        match options.iter().filter(|option| **option == answer).count() {
            0 => return Err(QuestionError::AnswerNotAnOption { id, answer }),
            1 => {}
            count => {
                return Err(QuestionError::AmbiguousAnswer { id, answer, count });
            }
        }

        Ok(Self {
            id,
            title,
            options,
            answer,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Exact, case-sensitive comparison against the correct answer.
    #[must_use]
    pub fn is_correct(&self, selected: &str) -> bool {
        self.answer == selected
    }
}

#[derive(Deserialize)]
struct QuestionWire {
    id: QuestionId,
    title: String,
    options: Vec<String>,
    answer: String,
}

impl TryFrom<QuestionWire> for Question {
    type Error = QuestionError;

    fn try_from(wire: QuestionWire) -> Result<Self, Self::Error> {
        Question::new(wire.id, wire.title, wire.options, wire.answer)
    }
}
