use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

pub const DEFAULT_QUESTION_COUNT: u32 = 5;
pub const DEFAULT_PASS_THRESHOLD: u32 = 3;

/// Fixed parameters of a quiz: how many questions to ask and how many correct
/// answers are needed to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRules {
    question_count: NonZeroU32,
    pass_threshold: u32,
}

impl QuizRules {
    #[must_use]
    pub fn new(question_count: NonZeroU32, pass_threshold: u32) -> Self {
        Self {
            question_count,
            pass_threshold,
        }
    }

    #[must_use]
    pub fn question_count(&self) -> NonZeroU32 {
        self.question_count
    }

    #[must_use]
    pub fn pass_threshold(&self) -> u32 {
        self.pass_threshold
    }

    /// `score >= pass_threshold`. A score equal to the threshold passes.
    #[must_use]
    pub fn passed(&self, score: u32) -> bool {
        score >= self.pass_threshold
    }

    #[must_use]
    pub fn evaluate(&self, score: u32, total: u32) -> QuizResult {
        QuizResult {
            score,
            total,
            passed: self.passed(score),
        }
    }
}

impl Default for QuizRules {
    fn default() -> Self {
        Self {
            question_count: NonZeroU32::new(DEFAULT_QUESTION_COUNT).unwrap_or(NonZeroU32::MIN),
            pass_threshold: DEFAULT_PASS_THRESHOLD,
        }
    }
}

/// Outcome of a completed play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
    pub passed: bool,
}
