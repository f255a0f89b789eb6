use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{AnswerRecord, Question, QuestionId, QuizResult, QuizRules, SessionGeneration};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {operation} while {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: Phase,
    },

    #[error("result belongs to session {issued}, current session is {current}")]
    StaleGeneration {
        issued: SessionGeneration,
        current: SessionGeneration,
    },

    #[error("user id must not be empty")]
    EmptyUserId,

    #[error("no questions were returned")]
    EmptyQuestions,

    #[error("question id {0} appears more than once")]
    DuplicateQuestionId(QuestionId),
}

//
// ─── PHASE ────────────────────────────────────────────────────────────────────
//

/// Lifecycle stage of a quiz session.
///
/// `Idle → Loading → Playing → Saving → Finished`, with `Loading → Idle` on a
/// failed fetch and `reset` returning to `Idle` from anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Playing,
    Saving,
    Finished,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Playing => "playing",
            Phase::Saving => "saving",
            Phase::Finished => "finished",
        }
    }

    /// Phases in which answers have been or are being recorded.
    #[must_use]
    pub fn is_in_play(self) -> bool {
        matches!(self, Phase::Playing | Phase::Saving | Phase::Finished)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── TICKETS ──────────────────────────────────────────────────────────────────
//

/// Issued when a session enters `Loading`; hand it back with the fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: SessionGeneration,
    pub count: u32,
}

/// Issued when a session enters `Saving`; carries everything the score
/// submission needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub generation: SessionGeneration,
    pub user_id: String,
    pub result: QuizResult,
}

/// What happened after recording an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerStep {
    /// More questions remain; the session stays in `Playing`.
    Next { correct: bool },
    /// That was the last question; the session is now `Saving`.
    Complete { correct: bool, ticket: SubmitTicket },
}

impl AnswerStep {
    #[must_use]
    pub fn correct(&self) -> bool {
        match self {
            AnswerStep::Next { correct } | AnswerStep::Complete { correct, .. } => *correct,
        }
    }
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// The quiz session state machine.
///
/// Purely synchronous; async callers obtain a ticket when entering `Loading` or
/// `Saving` and return it with the outcome. Results tagged with an older
/// generation are refused so a reset always wins over in-flight work.
#[derive(Debug, Clone)]
pub struct Session {
    rules: QuizRules,
    generation: SessionGeneration,
    phase: Phase,
    user_id: String,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    answers: Vec<AnswerRecord>,
    last_error: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(rules: QuizRules) -> Self {
        Self {
            rules,
            generation: SessionGeneration::default(),
            phase: Phase::Idle,
            user_id: String::new(),
            questions: Vec::new(),
            current_index: 0,
            score: 0,
            answers: Vec::new(),
            last_error: None,
        }
    }

    #[must_use]
    pub fn rules(&self) -> QuizRules {
        self.rules
    }

    #[must_use]
    pub fn generation(&self) -> SessionGeneration {
        self.generation
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase == Phase::Playing {
            self.questions.get(self.current_index)
        } else {
            None
        }
    }

    /// Begin a new play-through for `user_id` and enter `Loading`.
    ///
    /// Allowed from `Idle` and `Finished`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyUserId` for a blank id and
    /// `SessionError::InvalidPhase` while another play-through is active.
    pub fn begin(&mut self, user_id: &str) -> Result<LoadTicket, SessionError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(SessionError::EmptyUserId);
        }
        self.expect_phase("start", &[Phase::Idle, Phase::Finished])?;

        self.clear_progress();
        self.last_error = None;
        self.user_id = user_id.to_string();
        self.generation = self.generation.next();
        self.phase = Phase::Loading;

        Ok(LoadTicket {
            generation: self.generation,
            count: self.rules.question_count().get(),
        })
    }

    /// Store fetched questions and enter `Playing`.
    ///
    /// Questions beyond the configured count are dropped.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleGeneration` if a reset happened since the
    /// ticket was issued, `SessionError::InvalidPhase` outside `Loading`, and
    /// `EmptyQuestions` / `DuplicateQuestionId` for unusable question sets. On
    /// error the session is left untouched.
    pub fn load_questions(
        &mut self,
        ticket: LoadTicket,
        mut questions: Vec<Question>,
    ) -> Result<(), SessionError> {
        self.expect_generation(ticket.generation)?;
        self.expect_phase("load questions", &[Phase::Loading])?;

        let limit = usize::try_from(ticket.count).unwrap_or(usize::MAX);
        questions.truncate(limit);
        if questions.is_empty() {
            return Err(SessionError::EmptyQuestions);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        if let Some(dup) = questions.iter().map(Question::id).find(|id| !seen.insert(*id)) {
            return Err(SessionError::DuplicateQuestionId(dup));
        }

        self.questions = questions;
        self.phase = Phase::Playing;
        Ok(())
    }

    /// Abandon a failed load: back to `Idle` with `message` as the last error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleGeneration` or `SessionError::InvalidPhase`
    /// if the ticket no longer applies.
    pub fn fail_loading(
        &mut self,
        ticket: LoadTicket,
        message: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.expect_generation(ticket.generation)?;
        self.expect_phase("fail loading", &[Phase::Loading])?;

        self.clear_progress();
        self.last_error = Some(message.into());
        self.phase = Phase::Idle;
        Ok(())
    }

    /// Record `selected` for the current question and advance.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` outside `Playing`; nothing changes.
    pub fn answer(&mut self, selected: &str) -> Result<AnswerStep, SessionError> {
        self.expect_phase("answer", &[Phase::Playing])?;
        let Some(question) = self.questions.get(self.current_index) else {
            return Err(SessionError::InvalidPhase {
                operation: "answer",
                phase: self.phase,
            });
        };

        let correct = question.is_correct(selected);
        self.answers
            .push(AnswerRecord::new(question.id(), selected, correct));
        if correct {
            self.score = self.score.saturating_add(1);
        }
        self.current_index += 1;

        if self.current_index < self.questions.len() {
            return Ok(AnswerStep::Next { correct });
        }

        self.phase = Phase::Saving;
        Ok(AnswerStep::Complete {
            correct,
            ticket: SubmitTicket {
                generation: self.generation,
                user_id: self.user_id.clone(),
                result: self.result(),
            },
        })
    }

    /// Leave `Saving` for `Finished`.
    ///
    /// Score and pass/fail are already fixed when saving starts; `note` only
    /// attaches an informational message, typically when submission failed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleGeneration` or `SessionError::InvalidPhase`
    /// if the ticket no longer applies.
    pub fn finish(
        &mut self,
        generation: SessionGeneration,
        note: Option<String>,
    ) -> Result<QuizResult, SessionError> {
        self.expect_generation(generation)?;
        self.expect_phase("finish", &[Phase::Saving])?;

        self.last_error = note;
        self.phase = Phase::Finished;
        Ok(self.result())
    }

    /// Back to `Idle` from any phase. Keeps the user id.
    pub fn reset(&mut self) -> SessionGeneration {
        self.clear_progress();
        self.last_error = None;
        self.generation = self.generation.next();
        self.phase = Phase::Idle;
        self.generation
    }

    /// Score, total and pass/fail for the answers recorded so far.
    #[must_use]
    pub fn result(&self) -> QuizResult {
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        self.rules.evaluate(self.score, total)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            rules: self.rules,
            generation: self.generation,
            phase: self.phase,
            user_id: self.user_id.clone(),
            questions: self.questions.clone(),
            current_index: self.current_index,
            score: self.score,
            answers: self.answers.clone(),
            last_error: self.last_error.clone(),
        }
    }

    fn clear_progress(&mut self) {
        self.questions.clear();
        self.answers.clear();
        self.current_index = 0;
        self.score = 0;
    }

    fn expect_phase(&self, operation: &'static str, allowed: &[Phase]) -> Result<(), SessionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(SessionError::InvalidPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    fn expect_generation(&self, issued: SessionGeneration) -> Result<(), SessionError> {
        if issued == self.generation {
            Ok(())
        } else {
            Err(SessionError::StaleGeneration {
                issued,
                current: self.generation,
            })
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(QuizRules::default())
    }
}

//
// ─── SNAPSHOT ─────────────────────────────────────────────────────────────────
//

/// Read-only copy of a session, handed to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub rules: QuizRules,
    pub generation: SessionGeneration,
    pub phase: Phase,
    pub user_id: String,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub score: u32,
    pub answers: Vec<AnswerRecord>,
    pub last_error: Option<String>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase == Phase::Playing {
            self.questions.get(self.current_index)
        } else {
            None
        }
    }

    /// Recomputes pass/fail with the same rule used at finish time.
    ///
    /// Only available once the last answer is in.
    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        match self.phase {
            Phase::Saving | Phase::Finished => {
                let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
                Some(self.rules.evaluate(self.score, total))
            }
            _ => None,
        }
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Session::default().snapshot()
    }
}
