use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quiz_core::model::{
    AnswerStep, LoadTicket, Question, QuizResult, QuizRules, Session, SessionError,
    SessionSnapshot,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::messages::{SAVE_FAILED_NOTE, load_failure_message};
use crate::config::EndpointHint;
use crate::error::{FetchError, QuizError};
use crate::question_source::QuestionSource;
use crate::score_submitter::{ScoreSubmission, ScoreSubmitter};

/// How a `start` call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// Questions loaded, the session is playing.
    Ready { total: usize },
    /// Loading failed, the session is idle with `message` as its last error.
    Failed { message: String },
    /// The session was reset while loading; the fetch result was dropped.
    Superseded,
}

/// How an `answer` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// More questions remain.
    Next { correct: bool },
    /// That was the last question and the session is finished. `saved` is
    /// false when the score submission failed.
    Finished {
        correct: bool,
        result: QuizResult,
        saved: bool,
    },
    /// The session was reset while the score was being submitted.
    Superseded { correct: bool },
}

/// Owns one quiz session and drives it through fetch and submit.
///
/// The session lock is never held across an await. Every mutation publishes a
/// fresh snapshot to subscribers.
pub struct QuizService {
    source: Arc<dyn QuestionSource>,
    submitter: Arc<dyn ScoreSubmitter>,
    endpoint_hint: Option<EndpointHint>,
    session: Mutex<Session>,
    updates: watch::Sender<SessionSnapshot>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        rules: QuizRules,
        source: Arc<dyn QuestionSource>,
        submitter: Arc<dyn ScoreSubmitter>,
    ) -> Self {
        let session = Session::new(rules);
        let (updates, _) = watch::channel(session.snapshot());
        Self {
            source,
            submitter,
            endpoint_hint: None,
            session: Mutex::new(session),
            updates,
        }
    }

    #[must_use]
    pub fn with_endpoint_hint(mut self, hint: Option<EndpointHint>) -> Self {
        self.endpoint_hint = hint;
        self
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    /// Receive a snapshot after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.updates.subscribe()
    }

    /// Start a play-through for `user_id` and wait for the questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` for a blank user id or when a play-through is
    /// already active. Fetch failures are reported through
    /// `StartOutcome::Failed` and the session's last error.
    pub async fn start(&self, user_id: &str) -> Result<StartOutcome, QuizError> {
        let ticket = self.mutate(|session| session.begin(user_id))?;
        info!(generation = %ticket.generation, count = ticket.count, "loading questions");

        let fetched = self.source.fetch_questions(ticket.count).await;

        let applied = self.mutate(|session| match fetched {
            Ok(questions) => self.apply_questions(session, ticket, questions),
            Err(err) => self.apply_fetch_failure(session, ticket, &err),
        });

        match applied {
            Err(SessionError::StaleGeneration { issued, current }) => {
                debug!(%issued, %current, "discarding questions for a reset session");
                Ok(StartOutcome::Superseded)
            }
            other => Ok(other?),
        }
    }

    /// Answer the current question. On the last question this also submits
    /// the score and waits for the session to finish.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when no question is awaiting an answer; the session
    /// is left unchanged.
    pub async fn answer(&self, selected: &str) -> Result<AnswerOutcome, QuizError> {
        let step = self.mutate(|session| session.answer(selected))?;

        let (correct, ticket) = match step {
            AnswerStep::Next { correct } => return Ok(AnswerOutcome::Next { correct }),
            AnswerStep::Complete { correct, ticket } => (correct, ticket),
        };
        info!(
            generation = %ticket.generation,
            score = ticket.result.score,
            total = ticket.result.total,
            passed = ticket.result.passed,
            "saving score"
        );

        let submission = ScoreSubmission::from(&ticket);
        let note = match self.submitter.submit_score(&submission).await {
            Ok(ack) => {
                info!(message = %ack.message, "score saved");
                None
            }
            Err(err) => {
                warn!(error = %err, "failed to save score");
                Some(SAVE_FAILED_NOTE.to_string())
            }
        };
        let saved = note.is_none();

        match self.mutate(|session| session.finish(ticket.generation, note)) {
            Ok(result) => Ok(AnswerOutcome::Finished {
                correct,
                result,
                saved,
            }),
            Err(SessionError::StaleGeneration { issued, current }) => {
                debug!(%issued, %current, "discarding submit result for a reset session");
                Ok(AnswerOutcome::Superseded { correct })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Return to idle from any phase, dropping in-flight fetch or submit results.
    pub fn reset(&self) {
        let generation = self.mutate(Session::reset);
        info!(%generation, "session reset");
    }

    fn apply_questions(
        &self,
        session: &mut Session,
        ticket: LoadTicket,
        questions: Vec<Question>,
    ) -> Result<StartOutcome, SessionError> {
        match session.load_questions(ticket, questions) {
            Ok(()) => {
                let total = session.questions().len();
                info!(generation = %ticket.generation, total, "questions loaded");
                Ok(StartOutcome::Ready { total })
            }
            Err(SessionError::EmptyQuestions) => {
                self.apply_fetch_failure(session, ticket, &FetchError::Empty)
            }
            Err(err @ SessionError::DuplicateQuestionId(_)) => {
                let err = FetchError::Malformed(err.to_string());
                self.apply_fetch_failure(session, ticket, &err)
            }
            Err(err) => Err(err),
        }
    }

    fn apply_fetch_failure(
        &self,
        session: &mut Session,
        ticket: LoadTicket,
        err: &FetchError,
    ) -> Result<StartOutcome, SessionError> {
        let message = load_failure_message(err, self.endpoint_hint);
        session.fail_loading(ticket, message.clone())?;
        warn!(generation = %ticket.generation, error = %err, "failed to load questions");
        Ok(StartOutcome::Failed { message })
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        let mut session = self.lock();
        let out = f(&mut *session);
        self.updates.send_replace(session.snapshot());
        out
    }
}
